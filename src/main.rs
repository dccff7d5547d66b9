use clap::Parser;
use squall::cli::{self, Commands};
use squall::output::{CommandData, SquallOutput, SquallStatus};
use squall::{commands, ux, SquallError};


async fn run_command(args: cli::Cli) -> Result<CommandData, SquallError> {
    let mut backend = args.engine.into_backend(&args.db_connection_string).await?;
    let migration_directory = args.migration_directory;

    match args.command {
        Commands::Peck { } => {
            commands::peck(&mut backend).await?;
            Ok(CommandData::Peck {})
        }
        Commands::Up { } => {
            commands::peck(&mut backend).await?;
            let report = commands::up(&mut backend, &migration_directory, !args.no_log).await?;
            Ok(CommandData::Up(report))
        }
        Commands::Plan { } => {
            let pending = commands::plan(&mut backend, &migration_directory).await?;
            Ok(CommandData::Plan(pending))
        }
    }
}


/// Entry point for the Squall CLI tool.
///
/// - `peck`: Verify connectivity and create the progress table.
/// - `up`: Apply every migration above the stored watermark.
/// - `plan`: Show what `up` would apply.
#[tokio::main]
async fn main() {
    let args: cli::Cli = cli::Cli::parse();

    if let Err(e) = ux::setup_logging(args.verbose, args.quiet, args.json) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let json = args.json;
    let command_name = args.command.to_string();
    let result = SquallOutput::from_result(command_name, run_command(args).await);

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        }
    } else {
        ux::render_human_output(&result);
    }

    if let SquallStatus::Error = result.status {
        std::process::exit(1);
    }
}
