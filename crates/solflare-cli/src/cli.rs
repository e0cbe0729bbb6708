//! CLI argument definitions for solflare.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `flares` | Fetch the X-ray flare events of one UTC day |
//! | `route` | Show the archive and files a day maps to |
//! | `cache purge` | Apply the retention policy to the cache now |
//! | `cache clear` | Delete every cached archive file |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--cache-dir` | `$SOLFLARE_CACHE_DIR` or `~/.solflare/noaa` | Cache directory |
//! | `--format` | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `60000` | Per-transfer timeout in ms |
//! | `--offline` | `false` | Serve from the cache only |
//! | `--swpc-host` | `ftp.swpc.noaa.gov` | FTP host of the daily event files |
//! | `--swpc-port` | `21` | FTP port of the daily event files |
//! | `--ngdc-base-url` | NOAA NGDC `goes/xrs/` directory | Base URL of the annual reports |
//! | `--final-after-days` | `4` | Days after which a cached day is final |
//! | `--log-level` | `warn` | Default log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! solflare flares 20250529
//! solflare flares 20150612 --archive swpc --format json --pretty
//! solflare --offline cache purge
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use solflare_core::{
    ArchiveId, SourceStrategy, DEFAULT_NGDC_BASE_URL, DEFAULT_SWPC_HOST, DEFAULT_SWPC_PORT,
};

/// NOAA GOES X-ray flare events by UTC day.
#[derive(Debug, Parser)]
#[command(
    name = "solflare",
    author,
    version,
    about = "NOAA GOES X-ray flare events by UTC day",
    long_about = "solflare retrieves GOES X-ray flare events for a UTC day. Days from 2017 \
onwards come from the SWPC daily event files (FTP); earlier days from the NGDC annual \
reports (HTTP). Raw files are cached on disk and reused."
)]
pub struct Cli {
    /// Cache directory for raw archive files.
    #[arg(long, global = true, env = "SOLFLARE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-transfer timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 60_000)]
    pub timeout_ms: u64,

    /// Never touch the network; cache misses yield empty results.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// FTP host serving the daily event files.
    #[arg(long, global = true, default_value = DEFAULT_SWPC_HOST)]
    pub swpc_host: String,

    #[arg(long, global = true, default_value_t = DEFAULT_SWPC_PORT)]
    pub swpc_port: u16,

    /// Base URL of the annual reports; file names are appended.
    #[arg(long, global = true, default_value = DEFAULT_NGDC_BASE_URL)]
    pub ngdc_base_url: String,

    /// Cached days older than this many whole days are never purged.
    #[arg(long, global = true, default_value_t = 4)]
    pub final_after_days: u32,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per event.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one event per line).
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the flare events of a day.
    Flares(FlaresArgs),
    /// Show which archive and files a day maps to, without I/O.
    Route(RouteArgs),
    /// Cache management commands.
    Cache(CacheArgs),
}

#[derive(Debug, Args)]
pub struct FlaresArgs {
    /// Day as YYYYMMDD.
    pub day: String,

    /// Archive selection.
    #[arg(long, value_enum, default_value_t = ArchiveSelector::Auto)]
    pub archive: ArchiveSelector,
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Day as YYYYMMDD.
    pub day: String,

    #[arg(long, value_enum, default_value_t = ArchiveSelector::Auto)]
    pub archive: ArchiveSelector,
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache management subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Delete files still inside the upstream revision window.
    Purge,
    /// Delete every cached archive file except the reserved README.
    Clear,
}

/// Archive selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArchiveSelector {
    /// Daily archive from 2017, annual archive before.
    Auto,
    /// SWPC daily event files.
    Swpc,
    /// NGDC annual reports.
    Ngdc,
}

impl ArchiveSelector {
    pub const fn strategy(self) -> SourceStrategy {
        match self {
            Self::Auto => SourceStrategy::Auto,
            Self::Swpc => SourceStrategy::Strict(ArchiveId::Swpc),
            Self::Ngdc => SourceStrategy::Strict(ArchiveId::Ngdc),
        }
    }
}
