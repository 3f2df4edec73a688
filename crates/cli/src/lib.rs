pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::recommend::RecommendOptions;
use commands::search::SearchOptions;

#[derive(Debug, Parser)]
#[command(
    name = "botanica",
    about = "Zen Botanica storefront operator CLI",
    long_about = "Inspect storefront configuration, check catalog readiness, and query the catalog \
                  with the same filters and ranking the storefront uses.",
    after_help = "Examples:\n  botanica doctor --json\n  botanica config\n  botanica search --query ginger --max 30\n  botanica recommend --exclude 5 --preference sleep"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate configuration and catalog readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List every product in the loaded catalog")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Filter the catalog the way the product listing does")]
    Search {
        #[arg(long, help = "Text matched against name, description, tags and ingredients")]
        query: Option<String>,
        #[arg(long, help = "Category id such as `sleep` or `energy`")]
        category: Option<String>,
        #[arg(long, help = "Lowest price, e.g. 20 or $20.00")]
        min: Option<String>,
        #[arg(long, help = "Highest price, e.g. 35 or $35.00")]
        max: Option<String>,
        #[arg(long, conflicts_with = "out_of_stock", help = "Only products in stock")]
        in_stock: bool,
        #[arg(long, help = "Only products out of stock")]
        out_of_stock: bool,
    },
    #[command(about = "Rank recommendations for a visitor")]
    Recommend {
        #[arg(long, help = "Product id that must not be recommended")]
        exclude: Option<u32>,
        #[arg(long = "preference", help = "Preference tag; repeat for several")]
        preferences: Vec<String>,
        #[arg(long, conflicts_with = "preferences", help = "Rank without any preference tags")]
        no_preferences: bool,
        #[arg(long, help = "Number of recommendations to return")]
        limit: Option<usize>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Catalog { json } => commands::catalog::run(json),
        Command::Search { query, category, min, max, in_stock, out_of_stock } => {
            let availability = match (in_stock, out_of_stock) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::search::run(&SearchOptions { query, category, min, max, availability })
        }
        Command::Recommend { exclude, preferences, no_preferences, limit } => {
            commands::recommend::run(&RecommendOptions {
                exclude,
                preferences,
                no_preferences,
                limit,
            })
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn stock_flags_conflict() {
        let parsed = Cli::try_parse_from(["botanica", "search", "--in-stock", "--out-of-stock"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn preference_flag_repeats() {
        let cli = Cli::try_parse_from([
            "botanica",
            "recommend",
            "--preference",
            "sleep",
            "--preference",
            "calm",
        ])
        .expect("repeated preferences parse");

        match cli.command {
            Command::Recommend { preferences, .. } => assert_eq!(preferences, ["sleep", "calm"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
