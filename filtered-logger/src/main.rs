use std::io;
use std::process::ExitCode;

use clap::Parser;
use filtered_logger::db::{stream_table, DbConfig};
use filtered_logger::{build_logger, get_logger, Layout, RedactingFormatter, Result, PII_FIELDS};
use slog::Level;

#[derive(Debug, Parser)]
#[command(
    name = "filtered-logger",
    version,
    about = "Log every row of a MySQL table with PII fields redacted",
    after_help = "Connection settings are read from PERSONAL_DATA_DB_HOST, \
PERSONAL_DATA_DB_USERNAME, PERSONAL_DATA_DB_PASSWORD and PERSONAL_DATA_DB_NAME."
)]
struct Cli {
    /// Table to read.
    #[arg(long, default_value = "users")]
    table: String,
    /// Emit JSON lines instead of the text layout.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DbConfig::from_env()?;

    let logger = if cli.json {
        let formatter = RedactingFormatter::with_layout(PII_FIELDS, Layout::Json)?;
        build_logger(io::stderr(), formatter, Level::Info)
    } else {
        get_logger()?
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(stream_table(&config, &cli.table, &logger))?;
    Ok(())
}
