pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::execute::ExecuteArgs;

#[derive(Debug, Parser)]
#[command(
    name = "invoiceflow",
    about = "Invoiceflow operator CLI",
    long_about = "Route invoices to approvers, inspect the active rule catalog, and check runtime readiness.",
    after_help = "Examples:\n  invoiceflow execute --amount 1500 --department SALES --requires-manager-approval\n  invoiceflow rules\n  invoiceflow doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the approval workflow for one invoice and show who would be notified")]
    Execute {
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Invoice amount as an exact decimal, e.g. 1000.01"
        )]
        amount: String,
        #[arg(long, help = "Department name (case-insensitive)")]
        department: String,
        #[arg(long, help = "The invoice requires manager sign-off")]
        requires_manager_approval: bool,
        #[arg(long, help = "Emit the workflow response as JSON")]
        json: bool,
    },
    #[command(about = "List departments in routing order")]
    Departments,
    #[command(about = "List the active rules in declaration order")]
    Rules,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, catalog loading, and a sample routing run")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Execute { amount, department, requires_manager_approval, json } => {
            commands::execute::run(ExecuteArgs { amount, department, requires_manager_approval, json })
        }
        Command::Departments => commands::departments::run(),
        Command::Rules => commands::rules::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
