use crate::demo::{run_assess, run_catalog_list, run_catalog_show, run_demo, AssessArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use maturity_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Maturity Assessment Engine",
    about = "Score maturity questionnaires and serve assessment reports from the command line",
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
    /// Inspect the registered question catalogs
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Score a response file against a catalog and print the report
    Assess(AssessArgs),
    /// Render a report for a built-in sample response set
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List catalog keys with domain and question counts
    List,
    /// Print every domain, question and option of one catalog
    Show(CatalogShowArgs),
}

#[derive(Args, Debug)]
pub(crate) struct CatalogShowArgs {
    /// Catalog key, e.g. control-tower
    pub(crate) key: String,
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
        Command::Catalog {
            command: CatalogCommand::List,
        } => run_catalog_list(),
        Command::Catalog {
            command: CatalogCommand::Show(args),
        } => run_catalog_show(&args.key),
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}
