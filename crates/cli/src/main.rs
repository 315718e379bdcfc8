use std::process::ExitCode;

fn main() -> ExitCode {
    invoiceflow_cli::run()
}
