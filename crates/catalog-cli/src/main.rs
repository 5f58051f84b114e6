mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{CharacterSource, SortDirection};
use catalog_http::HttpCharacterSource;
use clap::{Parser, Subcommand};

use crate::commands::list::ListOptions;

#[derive(Parser)]
#[command(name = "character-catalog")]
#[command(about = "Browse, filter and sort the Rick and Morty character catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every character and print the filtered, sorted view
    List {
        /// Keep only these species (repeatable)
        #[arg(long)]
        species: Vec<String>,
        /// Keep only these genders (repeatable)
        #[arg(long)]
        gender: Vec<String>,
        /// Keep only these statuses (repeatable)
        #[arg(long)]
        status: Vec<String>,
        /// Case-insensitive substring match on name
        #[arg(long)]
        search: Option<String>,
        /// Order by first appearance (asc, desc)
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortDirection>,
        /// Number of display pages to print
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Print every matching character
        #[arg(long, conflicts_with = "pages")]
        all: bool,
    },
    /// Launch the interactive TUI browser
    Tui,
}

fn parse_sort(s: &str) -> Result<SortDirection, String> {
    SortDirection::parse(s)
        .ok_or_else(|| format!("unknown sort direction '{s}' (expected asc or desc)"))
}

fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("could not determine cache directory")?;
    let dir = base.join("character-catalog");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create cache directory: {}", dir.display()))?;
    Ok(dir)
}

fn build_source(app_config: &config::AppConfig) -> Arc<dyn CharacterSource> {
    Arc::new(HttpCharacterSource::new(app_config.source_config()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List {
            species,
            gender,
            status,
            search,
            sort,
            pages,
            all,
        } => {
            logging::init_stderr();
            let app_config = config::load_config();
            let source = build_source(&app_config);
            tracing::debug!(source = source.label(), "listing characters");

            let options = ListOptions {
                species,
                gender,
                status,
                search,
                sort,
                pages,
                all,
            };
            commands::list::run(source.as_ref(), app_config.page_size, options).await
        }
        Command::Tui => {
            let _guard = logging::init_file(&cache_dir()?.join("logs"))?;
            let app_config = config::load_config();
            let source = build_source(&app_config);
            tracing::info!(source = source.label(), "starting tui");

            catalog_tui::run(source, app_config.page_size).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_accepts_repeated_filters() {
        let cli = Cli::try_parse_from([
            "character-catalog",
            "list",
            "--species",
            "Human",
            "--species",
            "Alien",
            "--status",
            "Dead",
            "--sort",
            "desc",
        ])
        .unwrap();

        match cli.command {
            Command::List {
                species,
                status,
                sort,
                pages,
                all,
                ..
            } => {
                assert_eq!(species, vec!["Human", "Alien"]);
                assert_eq!(status, vec!["Dead"]);
                assert_eq!(sort, Some(SortDirection::Descending));
                assert_eq!(pages, 1);
                assert!(!all);
            }
            Command::Tui => panic!("expected list"),
        }
    }

    #[test]
    fn list_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["character-catalog", "list", "--sort", "sideways"]).is_err());
    }
}
