//! SWPC daily event files, distributed over anonymous FTP.
//!
//! One file per UTC day, `{YYYYMMDD}events.txt`, with `#`/`:` comment lines and
//! whitespace-separated columns:
//!
//! ```text
//! #Event    Begin    Max       End  Obs  Q  Type  Loc/Frq   Particulars       Reg#
//! 1000 +     1748   1752      1755  G15  5   XRA  1-8A      M1.0    2.1E-03   2443
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::build_event;
use crate::cache::CacheStore;
use crate::config::FlareConfig;
use crate::data_source::{ArchiveSource, FetchError, FetchOutcome, LineOutcome, ParseReport};
use crate::ftp_client::{FtpClient, FtpRequest, SuppaFtpClient};
use crate::{ArchiveId, Day};

/// Event-type column value of X-ray flare records.
pub const XRAY_EVENT_TYPE: &str = "XRA";

const MIN_FIELDS: usize = 9;

#[derive(Clone)]
pub struct SwpcArchive {
    ftp: Arc<dyn FtpClient>,
    host: String,
    port: u16,
    events_dir: String,
    user: String,
    password: String,
    timeout_ms: u64,
}

impl Default for SwpcArchive {
    fn default() -> Self {
        Self::new(Arc::new(SuppaFtpClient), &FlareConfig::default())
    }
}

impl SwpcArchive {
    pub fn new(ftp: Arc<dyn FtpClient>, config: &FlareConfig) -> Self {
        Self {
            ftp,
            host: config.swpc_host.clone(),
            port: config.swpc_port,
            events_dir: config.swpc_events_dir.trim_matches('/').to_owned(),
            user: config.ftp_user.clone(),
            password: config.ftp_password.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    fn remote_path(&self, day: &Day) -> String {
        format!("{}/{}", self.events_dir, self.cache_file_name(day))
    }
}

impl ArchiveSource for SwpcArchive {
    fn id(&self) -> ArchiveId {
        ArchiveId::Swpc
    }

    fn cache_file_name(&self, day: &Day) -> String {
        format!("{day}events.txt")
    }

    fn remote_location(&self, day: &Day) -> String {
        format!("ftp://{}/{}", self.host, self.remote_path(day))
    }

    fn fetch(&self, day: &Day, cache: &CacheStore) -> FetchOutcome {
        let file_name = self.cache_file_name(day);
        let path = cache.path_for(&file_name);

        if cache.contains(&file_name) {
            debug!(path = %path.display(), "cache file already exists");
            return FetchOutcome::CacheHit { path };
        }

        info!(%day, host = %self.host, "downloading daily event file");
        let request = FtpRequest::anonymous(&self.host, self.remote_path(day))
            .with_port(self.port)
            .with_credentials(&self.user, &self.password)
            .with_timeout_ms(self.timeout_ms);

        let contents = match self.ftp.retrieve(&request) {
            Ok(contents) => contents,
            Err(error) => {
                warn!(location = %request.location(), %error, "cannot retrieve ftp file");
                cache.remove(&file_name);
                let error = if error.is_disabled() {
                    FetchError::offline(error.message())
                } else {
                    FetchError::transport(error.message(), error.retryable())
                };
                return FetchOutcome::FetchFailed { path, error };
            }
        };

        match cache.write(&file_name, &contents) {
            Ok(path) => FetchOutcome::Fetched {
                path,
                bytes: contents.len(),
            },
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot write cache file");
                let error = FetchError::cache_write(&path, &error);
                FetchOutcome::FetchFailed { path, error }
            }
        }
    }

    fn parse(&self, day: &Day, contents: &str) -> ParseReport {
        ParseReport::collect(contents.lines().map(|line| parse_line(day, line)))
    }
}

fn parse_line(day: &Day, line: &str) -> LineOutcome {
    if line.starts_with('#') || line.starts_with(':') {
        return LineOutcome::Ignored;
    }

    let mut fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() < MIN_FIELDS {
        return LineOutcome::Ignored;
    }
    // `+` marks a continuation of a previous event.
    if fields[1] == "+" {
        fields.remove(1);
        if fields.len() < MIN_FIELDS {
            return LineOutcome::Ignored;
        }
    }
    if fields[6] != XRAY_EVENT_TYPE {
        return LineOutcome::Ignored;
    }

    build_event(
        day,
        Some(fields[0].to_owned()),
        fields[1],
        fields[2],
        fields[3],
        fields[8].to_owned(),
    )
}
