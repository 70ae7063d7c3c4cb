//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Layer command-line values over the environment-derived configuration.
//!
//! Non-responsibilities:
//! - Does not validate values (see `ConfigLoader::build`).

use clap::Parser;
use report_config::constants::{
    ENV_BIND_ADDR, ENV_DATASET_FILE, ENV_LOCALE, ENV_LOCALE_FILE, ENV_LOG_FORMAT,
};
use report_config::{ConfigLoader, LogFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "report-server")]
#[command(about = "Serve filtered report exports as XML, JSON, CSV or custom text", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  report-server --datasets ./datasets.json\n  report-server --bind 0.0.0.0:8080 --log-format json\n  RUST_LOG=debug report-server --datasets ./datasets.json --legacy-csv-charset\n"
)]
pub struct Cli {
    /// Address to listen on (host:port)
    #[arg(long, env = ENV_BIND_ADDR, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Translation locale
    #[arg(long, env = ENV_LOCALE)]
    pub locale: Option<String>,

    /// YAML translation catalog replacing the built-in English one
    #[arg(long, env = ENV_LOCALE_FILE, value_name = "FILE")]
    pub locale_file: Option<PathBuf>,

    /// JSON datasets served by the bundled in-memory backend
    #[arg(long, env = ENV_DATASET_FILE, value_name = "FILE")]
    pub datasets: Option<PathBuf>,

    /// Declare charset=utf-8 on CSV responses (the bytes stay UTF-16LE)
    #[arg(long)]
    pub legacy_csv_charset: bool,

    /// Log output format (plain, json)
    #[arg(long, env = ENV_LOG_FORMAT)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Apply command-line values on top of `loader`.
    pub fn apply(&self, mut loader: ConfigLoader) -> ConfigLoader {
        if let Some(bind) = &self.bind {
            loader = loader.with_bind_addr(bind.clone());
        }
        if let Some(locale) = &self.locale {
            loader = loader.with_locale(locale.clone());
        }
        if let Some(path) = &self.locale_file {
            loader = loader.with_locale_file(path.clone());
        }
        if let Some(path) = &self.datasets {
            loader = loader.with_dataset_file(path.clone());
        }
        // The flag can only switch the legacy label on; the environment may too.
        if self.legacy_csv_charset {
            loader = loader.with_legacy_csv_charset(true);
        }
        if let Some(format) = self.log_format {
            loader = loader.with_log_format(format);
        }
        loader
    }
}
