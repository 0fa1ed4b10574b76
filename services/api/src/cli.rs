use crate::demo::{run_batch, run_demo, run_evaluate, run_rules, BatchArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_5c::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "5C Credit Evaluator",
    about = "Score loan applicants against the 5C criteria with a fuzzy rule engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate one applicant and print the full derivation
    Evaluate(EvaluateArgs),
    /// Evaluate every applicant in a CSV export
    Batch(BatchArgs),
    /// Print the acceptance and rejection rule tables
    Rules,
    /// Walk through the reference applicants
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Rules => {
            run_rules();
            Ok(())
        }
        Command::Demo => {
            run_demo();
            Ok(())
        }
    }
}
