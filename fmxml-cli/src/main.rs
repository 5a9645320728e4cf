//! Binary entry point for the fmxml CLI.

mod args;

use std::error::Error;

use clap::Parser;
use fmxml_lib::{FmConnector, compile};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    // .env is optional; flags and the real environment win over it
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    TermLogger::init(
        log_level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    match cli.command {
        Command::Compile(args) => {
            let query = args.to_query();
            if !query.action().is_supported() {
                return Err(format!("unsupported action '{}'", args.action).into());
            }
            println!("{}", compile(&query));
        }
        Command::Ping => {
            let connector = FmConnector::from_config(&cli.connection.to_config()?);
            connector.ping().await?;
            println!("ok");
        }
        Command::Databases => {
            let connector = FmConnector::from_config(&cli.connection.to_config()?);
            for name in connector.database_names().await? {
                println!("{name}");
            }
        }
        Command::Query(args) => {
            let connector = FmConnector::from_config(&cli.connection.to_config()?);
            let envelope = connector.query(&args.to_query()).await?;
            info!(
                "{} of {} records",
                envelope.resultset().fetch_size,
                envelope.resultset().count
            );
            println!("{}", serde_json::to_string_pretty(&envelope.records_json()?)?);
        }
    }

    Ok(())
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
