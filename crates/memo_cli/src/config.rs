//! CLI configuration: flags with environment fallbacks.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "memo.sqlite3";

/// Global flags shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// SQLite file holding the memo snapshot.
    #[arg(long, env = "MEMO_DB", global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "MEMO_LOG_DIR", global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "MEMO_LOG_LEVEL", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Always absolute when set.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    /// Applies defaults relative to the current working directory.
    pub fn resolve(args: ConfigArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(Self::resolve_in(args, &cwd))
    }

    fn resolve_in(args: ConfigArgs, cwd: &Path) -> Self {
        let absolutize = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            }
        };

        Self {
            db_path: absolutize(args.db.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME))),
            log_dir: args.log_dir.map(absolutize),
            log_level: args
                .log_level
                .unwrap_or_else(|| memo_core::default_log_level().to_string()),
        }
    }
}
