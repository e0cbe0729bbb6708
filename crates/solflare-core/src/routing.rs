use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::{NgdcArchive, SwpcArchive};
use crate::cache::CacheStore;
use crate::config::FlareConfig;
use crate::data_source::{ArchiveSource, FetchError, FetchOutcome, ParseReport};
use crate::ftp_client::{FtpClient, NoopFtpClient, SuppaFtpClient};
use crate::http_client::{HttpClient, NoopHttpClient, ReqwestHttpClient};
use crate::{ArchiveId, Day, FlareCollection};

/// First year served by the daily archive under [`SourceStrategy::Auto`].
///
/// The annual report for this year is incomplete upstream.
pub const DAILY_ARCHIVE_FIRST_YEAR: i32 = 2017;

/// Archive selection strategy for routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceStrategy {
    /// Pick the archive from the day's year.
    #[default]
    Auto,
    /// Always use one archive.
    Strict(ArchiveId),
}

/// Year rule of [`SourceStrategy::Auto`].
pub fn archive_for_day(day: &Day) -> ArchiveId {
    if day.year() >= DAILY_ARCHIVE_FIRST_YEAR {
        ArchiveId::Swpc
    } else {
        ArchiveId::Ngdc
    }
}

/// Where a day's data comes from, without doing any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub day: Day,
    pub archive: ArchiveId,
    pub cache_file: String,
    pub remote_location: String,
}

/// Archive registry and fetch-then-parse pipeline.
pub struct SourceRouter {
    adapters: HashMap<ArchiveId, Arc<dyn ArchiveSource>>,
}

impl Default for SourceRouter {
    fn default() -> Self {
        SourceRouterBuilder::new().build()
    }
}

impl SourceRouter {
    /// Adapters sharing an id replace earlier ones.
    pub fn new(adapters: Vec<Arc<dyn ArchiveSource>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.id(), adapter))
            .collect();
        Self { adapters }
    }

    pub fn select(&self, day: &Day, strategy: SourceStrategy) -> ArchiveId {
        match strategy {
            SourceStrategy::Auto => archive_for_day(day),
            SourceStrategy::Strict(archive) => archive,
        }
    }

    /// `None` when the selected archive has no registered adapter.
    pub fn plan(&self, day: &Day, strategy: SourceStrategy) -> Option<RoutePlan> {
        let archive = self.select(day, strategy);
        let adapter = self.adapters.get(&archive)?;
        Some(RoutePlan {
            day: day.clone(),
            archive,
            cache_file: adapter.cache_file_name(day),
            remote_location: adapter.remote_location(day),
        })
    }

    /// Fetch and parse `day`. Failures yield an empty collection, never an error.
    pub fn route(&self, day: &Day, strategy: SourceStrategy, cache: &CacheStore) -> FlareCollection {
        let archive = self.select(day, strategy);

        let Some(adapter) = self.adapters.get(&archive) else {
            warn!(%day, %archive, "no adapter registered for archive");
            let outcome = FetchOutcome::FetchFailed {
                path: cache.root().to_path_buf(),
                error: FetchError::transport(
                    format!("no adapter registered for archive {archive}"),
                    false,
                ),
            };
            return FlareCollection::new(day.clone(), archive, outcome, Vec::new(), Vec::new());
        };

        let outcome = adapter.fetch(day, cache);
        let report = match &outcome {
            FetchOutcome::FetchFailed { path, error } => {
                warn!(%day, %archive, path = %path.display(), %error, "fetch failed; no events");
                ParseReport::default()
            }
            FetchOutcome::CacheHit { path } | FetchOutcome::Fetched { path, .. } => {
                match fs::read(path) {
                    Ok(bytes) => adapter.parse(day, &String::from_utf8_lossy(&bytes)),
                    Err(error) if error.kind() == io::ErrorKind::NotFound => {
                        warn!(%day, %archive, path = %path.display(), "cache file missing; no events");
                        ParseReport::default()
                    }
                    Err(error) => {
                        warn!(%day, %archive, path = %path.display(), %error, "cannot read cache file; no events");
                        ParseReport::default()
                    }
                }
            }
        };

        debug!(
            %day,
            %archive,
            events = report.events.len(),
            skipped = report.skipped.len(),
            "parsed archive file"
        );
        FlareCollection::new(day.clone(), archive, outcome, report.events, report.skipped)
    }
}

/// Builder wiring both archives to real or offline transports.
///
/// ```rust
/// use solflare_core::{FlareConfig, SourceRouterBuilder};
///
/// let router = SourceRouterBuilder::new()
///     .with_config(FlareConfig::default().with_timeout_ms(5_000))
///     .with_offline_mode()
///     .build();
/// # let _ = router;
/// ```
#[derive(Default)]
pub struct SourceRouterBuilder {
    config: Option<FlareConfig>,
    http: Option<Arc<dyn HttpClient>>,
    ftp: Option<Arc<dyn FtpClient>>,
    offline: bool,
}

impl SourceRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: FlareConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the HTTP transport of the annual archive.
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the FTP transport of the daily archive.
    pub fn with_ftp_client(mut self, ftp: Arc<dyn FtpClient>) -> Self {
        self.ftp = Some(ftp);
        self
    }

    /// Use no-op transports; only cached files are served.
    pub fn with_offline_mode(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn build(self) -> SourceRouter {
        let config = self.config.unwrap_or_default();

        let http: Arc<dyn HttpClient> = match self.http {
            _ if self.offline => Arc::new(NoopHttpClient),
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::new()),
        };
        let ftp: Arc<dyn FtpClient> = match self.ftp {
            _ if self.offline => Arc::new(NoopFtpClient),
            Some(ftp) => ftp,
            None => Arc::new(SuppaFtpClient),
        };

        SourceRouter::new(vec![
            Arc::new(SwpcArchive::new(ftp, &config)),
            Arc::new(NgdcArchive::new(http, &config)),
        ])
    }
}
