use invoiceflow_core::catalog::RuleStore;

use crate::commands::{load_reference, CommandResult, EXIT_CATALOG};

pub fn run() -> CommandResult {
    let (_, reference) = match load_reference("rules") {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };

    let configuration = match reference.rules.active_configuration() {
        Ok(configuration) => configuration,
        Err(error) => {
            return CommandResult::failure("rules", "catalog", error.to_string(), EXIT_CATALOG)
        }
    };

    let mut lines = vec![format!(
        "{} ({}): {} rule(s)",
        configuration.name,
        configuration.id,
        configuration.rules.len()
    )];
    for rule in &configuration.rules {
        lines.push(format!(
            "- [{}] {} (priority {}, routing {}) -> {}",
            rule.id.as_str(),
            rule.name,
            rule.priority,
            rule.routing.as_str(),
            rule.approver_ids.join(", ")
        ));
    }

    CommandResult::plain(lines.join("\n"))
}
