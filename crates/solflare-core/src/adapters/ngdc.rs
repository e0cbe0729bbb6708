//! NGDC annual GOES XRS reports, distributed over HTTP.
//!
//! One file per year. Characters 6..11 of the first field hold `YYMMDD`, then
//! come the begin, max and end times. Two line shapes exist:
//!
//! ```text
//! 31777151031  0835 0839 0841 N05E57 C 17    G15  3.6E-04 12443 151104.6
//! 31777151031  1015 1022 1029  C 15    G15  1.0E-03
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::build_event;
use crate::cache::CacheStore;
use crate::config::FlareConfig;
use crate::data_source::{
    ArchiveSource, FetchError, FetchOutcome, LineOutcome, ParseReport, SkipReason,
};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{ArchiveId, Day};

/// Years whose report is published under a non-standard file name.
pub const NGDC_RENAMED_REPORTS: &[(i32, &str)] =
    &[(2015, "goes-xrs-report_2015_modifiedreplacedmissingrows.txt")];

const FIELDS_WITH_LOCATION: usize = 11;
const FIELDS_WITHOUT_LOCATION: usize = 8;

#[derive(Clone)]
pub struct NgdcArchive {
    http: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for NgdcArchive {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), &FlareConfig::default())
    }
}

impl NgdcArchive {
    pub fn new(http: Arc<dyn HttpClient>, config: &FlareConfig) -> Self {
        Self {
            http,
            base_url: config.ngdc_base_url.trim_end_matches('/').to_owned(),
            timeout_ms: config.timeout_ms,
        }
    }

    fn report_url(&self, day: &Day) -> String {
        format!("{}/{}", self.base_url, self.cache_file_name(day))
    }
}

impl ArchiveSource for NgdcArchive {
    fn id(&self) -> ArchiveId {
        ArchiveId::Ngdc
    }

    fn cache_file_name(&self, day: &Day) -> String {
        let year = day.year();
        NGDC_RENAMED_REPORTS
            .iter()
            .find(|(renamed, _)| *renamed == year)
            .map_or_else(
                || format!("goes-xrs-report_{year}.txt"),
                |(_, name)| (*name).to_owned(),
            )
    }

    fn remote_location(&self, day: &Day) -> String {
        self.report_url(day)
    }

    fn fetch(&self, day: &Day, cache: &CacheStore) -> FetchOutcome {
        let file_name = self.cache_file_name(day);
        let path = cache.path_for(&file_name);

        if cache.contains(&file_name) {
            debug!(path = %path.display(), "cache file already exists");
            return FetchOutcome::CacheHit { path };
        }

        let url = self.report_url(day);
        info!(%day, %url, "downloading annual report");
        let request = HttpRequest::get(&url).with_timeout_ms(self.timeout_ms);

        let response = match self.http.execute(request) {
            Ok(response) => response,
            Err(error) => {
                warn!(%url, %error, "cannot retrieve annual report");
                let error = if error.is_disabled() {
                    FetchError::offline(error.message())
                } else {
                    FetchError::transport(error.message(), error.retryable())
                };
                return FetchOutcome::FetchFailed { path, error };
            }
        };

        if !response.is_success() {
            warn!(%url, status = response.status, "annual report request rejected");
            return FetchOutcome::FetchFailed {
                path,
                error: FetchError::upstream_status(response.status, &url),
            };
        }

        match cache.write(&file_name, &response.body) {
            Ok(path) => FetchOutcome::Fetched {
                path,
                bytes: response.body.len(),
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
    let fields = line.split_whitespace().collect::<Vec<_>>();

    let same_day = fields
        .first()
        .and_then(|first| first.get(5..11))
        .is_some_and(|yymmdd| yymmdd == day.yymmdd());
    if !same_day {
        return LineOutcome::Ignored;
    }

    let (event_name, class_fields) = match fields.len() {
        FIELDS_WITH_LOCATION => (Some(fields[4].to_owned()), (fields[5], fields[6])),
        FIELDS_WITHOUT_LOCATION => (None, (fields[4], fields[5])),
        count => {
            warn!(%day, fields = count, line, "unrecognized annual report line shape");
            return LineOutcome::Skipped(SkipReason::UnrecognizedShape { fields: count });
        }
    };

    let Some(classification) = classification(class_fields.0, class_fields.1) else {
        return LineOutcome::Skipped(SkipReason::InvalidClassification {
            value: format!("{} {}", class_fields.0, class_fields.1),
        });
    };

    build_event(day, event_name, fields[1], fields[2], fields[3], classification)
}

/// `C` + `17` -> `C1.7`.
fn classification(letter: &str, magnitude: &str) -> Option<String> {
    let mut digits = magnitude.chars();
    let whole = digits.next().filter(char::is_ascii_digit)?;
    let tenths = digits.next().filter(char::is_ascii_digit)?;
    if letter.is_empty() {
        return None;
    }
    Some(format!("{letter}{whole}.{tenths}"))
}
