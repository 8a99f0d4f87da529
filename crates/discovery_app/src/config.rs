use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use discovery_core::{Catalog, CoordinatorConfig};
use discovery_engine::{ProviderSettings, TrendingWindow};
use engine_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

/// Browse and search movies and series from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "discovery", version)]
pub struct Cli {
    /// TMDB v3 API key.
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Which part of the catalog to search and browse.
    #[arg(long, value_enum, default_value_t = CatalogArg::All)]
    pub catalog: CatalogArg,

    /// Trending window used when browsing the whole catalog.
    #[arg(long, value_enum, default_value_t = TrendingArg::Week)]
    pub trending: TrendingArg,

    /// Response language, e.g. `en-US`.
    #[arg(long)]
    pub language: Option<String>,

    /// Debounce applied to typed queries, in milliseconds.
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Directory holding persisted preferences.
    #[arg(long, default_value = ".")]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    All,
    Movies,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrendingArg {
    Day,
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    File,
    Terminal,
    Both,
}

impl Cli {
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        let debounce = Duration::from_millis(self.debounce_ms);
        CoordinatorConfig {
            debounce,
            suggestion_debounce: debounce,
            catalog: match self.catalog {
                CatalogArg::All => Catalog::All,
                CatalogArg::Movies => Catalog::Movies,
                CatalogArg::Series => Catalog::Series,
            },
            ..CoordinatorConfig::default()
        }
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.api_key.trim().to_string(),
            language: self.language.clone().filter(|lang| !lang.trim().is_empty()),
            trending_window: match self.trending {
                TrendingArg::Day => TrendingWindow::Day,
                TrendingArg::Week => TrendingWindow::Week,
            },
            ..ProviderSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogArg::File => LogDestination::File(self.log_file.clone()),
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both(self.log_file.clone()),
        }
    }
}
