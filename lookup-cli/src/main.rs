use clap::{Parser, Subcommand};
use color_eyre::Result;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use lookup_cli::{pricing::pricing_lines, LookupClient};
use shared::pricing::DEFAULT_CONTACT_URL;

/// Look up vehicle registrations on a running lookup service.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Print debug output.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a registration number and print the JSON answer.
    Lookup {
        /// Registration number, e.g. UP32XX1234.
        rc: String,
        /// Access key sent along with the lookup.
        #[arg(long, env = "LOOKUP_KEY")]
        key: String,
        #[arg(long, env = "LOOKUP_BASE_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
    /// Show the access plans and where to get a key.
    Pricing {
        /// Only show the plan lasting this many days.
        #[arg(long)]
        days: Option<u32>,
        #[arg(long, default_value = DEFAULT_CONTACT_URL)]
        contact: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    match cli.command {
        Command::Lookup { rc, key, base_url } => {
            let client = LookupClient::new(&base_url)?;
            let body = client.lookup(&rc, &key)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Pricing { days, contact } => {
            for line in pricing_lines(&contact, days)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
