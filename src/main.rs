use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::io::Read;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipelint::dsl::display;
use pipelint::dsl::parsing;
use pipelint::dsl::validation::{self, Validator};
use pipelint::server;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a pipeline definition
    Lint {
        #[clap(short, long, value_parser)]
        file: Option<String>,
    },
    /// Print the jobs of a valid pipeline definition
    Show {
        #[clap(short, long, value_parser)]
        file: Option<String>,
    },
    /// Print the JSON Schema of a pipeline definition
    Schema,
    /// Serve validation over HTTP
    Serve {
        #[clap(short, long, env = "PIPELINT_LISTEN", default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

fn get_input(file: Option<String>) -> anyhow::Result<String> {
    let mut payload = String::new();
    match file {
        Some(file_path) => {
            File::open(&file_path)
                .and_then(|mut file| file.read_to_string(&mut payload))
                .with_context(|| format!("Unable to read {}", file_path))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut payload)
                .context("Unable to read from stdin")?;
        }
    }
    Ok(payload)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pipelint=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let validator = Validator::new();

    match args.command {
        Commands::Lint { file } => {
            let input = get_input(file)?;

            let document = match parsing::decode_document(&input) {
                Ok(document) => document,
                Err(error) => {
                    println!("{}", error);
                    process::exit(1);
                }
            };

            match validator.validate(&document) {
                Ok(()) => {
                    println!("{} pipeline is valid", validation::ok_header("Passed"));
                    Ok(())
                }
                Err(violation) => {
                    tracing::debug!(reason = ?violation.reason, "validation failed");
                    println!(
                        "{} - {}",
                        validation::error_header(&violation.path.to_string()),
                        violation.reason
                    );
                    process::exit(1);
                }
            }
        }

        Commands::Show { file } => {
            let input = get_input(file)?;
            let document = parsing::decode_document(&input)?;
            let pipeline = validator.parse(&document)?;

            display::print_pipeline(&pipeline);
            Ok(())
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&validator.json_schema())?);
            Ok(())
        }

        Commands::Serve { listen } => {
            tracing::info!("Starting pipelint server...");

            tokio::runtime::Runtime::new()
                .context("Unable to start the async runtime")?
                .block_on(server::serve(&listen))
                .with_context(|| format!("Unable to serve on {}", listen))
        }
    }
}
