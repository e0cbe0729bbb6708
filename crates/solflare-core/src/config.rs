use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "SOLFLARE_CACHE_DIR";

pub const DEFAULT_SWPC_HOST: &str = "ftp.swpc.noaa.gov";
pub const DEFAULT_SWPC_PORT: u16 = 21;
pub const DEFAULT_SWPC_EVENTS_DIR: &str = "pub/indices/events";
pub const DEFAULT_NGDC_BASE_URL: &str =
    "https://www.ngdc.noaa.gov/stp/space-weather/solar-data/solar-features/solar-flares/x-rays/goes/xrs/";

/// Reserved documentation file kept in the cache directory.
pub const RESERVED_CACHE_FILE: &str = "README.md";

/// Retention rules applied to the cache directory before each query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgePolicy {
    /// Files whose nominal date is more than this many whole days old are final.
    pub final_after_days: i64,
    /// Files modified more recently than this are never purged.
    pub refresh_after: Duration,
    /// File name exempt from purge and clear.
    pub reserved_file: String,
}

impl Default for PurgePolicy {
    fn default() -> Self {
        Self {
            final_after_days: 4,
            refresh_after: Duration::from_secs(60 * 60),
            reserved_file: String::from(RESERVED_CACHE_FILE),
        }
    }
}

/// Configuration for a [`crate::FlareClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlareConfig {
    /// Directory holding raw archive files.
    pub cache_dir: PathBuf,
    pub swpc_host: String,
    pub swpc_port: u16,
    /// Remote directory of the daily event files.
    pub swpc_events_dir: String,
    pub ftp_user: String,
    pub ftp_password: String,
    /// Base URL of the annual reports; file names are appended.
    pub ngdc_base_url: String,
    /// Per-transfer timeout in milliseconds.
    pub timeout_ms: u64,
    pub purge: PurgePolicy,
}

impl Default for FlareConfig {
    fn default() -> Self {
        Self {
            cache_dir: resolve_cache_dir(),
            swpc_host: String::from(DEFAULT_SWPC_HOST),
            swpc_port: DEFAULT_SWPC_PORT,
            swpc_events_dir: String::from(DEFAULT_SWPC_EVENTS_DIR),
            ftp_user: String::from("anonymous"),
            ftp_password: String::from("example@example.com"),
            ngdc_base_url: String::from(DEFAULT_NGDC_BASE_URL),
            timeout_ms: 60_000,
            purge: PurgePolicy::default(),
        }
    }
}

impl FlareConfig {
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_swpc_host(mut self, host: impl Into<String>, port: u16) -> Self {
        self.swpc_host = host.into();
        self.swpc_port = port;
        self
    }

    pub fn with_ngdc_base_url(mut self, url: impl Into<String>) -> Self {
        self.ngdc_base_url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_purge_policy(mut self, purge: PurgePolicy) -> Self {
        self.purge = purge;
        self
    }
}

/// `$SOLFLARE_CACHE_DIR`, then `$HOME/.solflare/noaa`, then `.solflare/noaa`.
fn resolve_cache_dir() -> PathBuf {
    if let Some(path) = env::var_os(CACHE_DIR_ENV) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".solflare").join("noaa");
    }

    PathBuf::from(".solflare").join("noaa")
}
