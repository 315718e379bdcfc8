use invoiceflow_core::domain::department::Department;

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    CommandResult::plain(Department::names().join("\n"))
}
