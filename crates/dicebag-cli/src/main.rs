use anyhow::Result;
use clap::{Parser, Subcommand};
use dicebag::Cnpj;
use dicebag_cli::{build_random, operation_names, parse_args, pick, render, run};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dicebag")]
#[command(about = "Weighted random dispatch and fake data generation", long_about = None)]
struct Cli {
    /// YAML file with locale and date/time defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a weighted entry and dispatch an operation with its parameters
    Pick {
        /// JSON array of [weight, parameters] pairs
        #[arg(long)]
        entries: String,

        /// Registered operation to invoke
        #[arg(long, default_value = "echo")]
        op: String,

        /// Number of samples to draw
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Invoke a registered generator directly
    Run {
        /// Operation name
        name: String,

        /// Positional arguments, each parsed as JSON or taken as a string
        args: Vec<String>,

        /// Number of values to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// List registered operations
    Ops,

    /// Check the check digits of a CNPJ
    ValidateCnpj {
        /// Fourteen digits
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pick { entries, op, count } => {
            let random = build_random(cli.config.as_deref())?;
            for value in pick(&random, &entries, &op, count)? {
                println!("{}", render(&value));
            }
        }
        Commands::Run { name, args, count } => {
            let random = build_random(cli.config.as_deref())?;
            for value in run(&random, &name, &parse_args(&args), count)? {
                println!("{}", render(&value));
            }
        }
        Commands::Ops => {
            let random = build_random(cli.config.as_deref())?;
            for name in operation_names(&random) {
                println!("{}", name);
            }
        }
        Commands::ValidateCnpj { value } => {
            if Cnpj::is_valid(&value) {
                println!("{} is valid", value);
            } else {
                anyhow::bail!("{} is not a valid CNPJ", value);
            }
        }
    }

    Ok(())
}
