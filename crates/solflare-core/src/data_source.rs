use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::cache::CacheStore;
use crate::{ArchiveId, Day, FlareEvent};

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Connection, protocol or timeout failure.
    Transport,
    /// The server answered with a non-success status.
    UpstreamStatus,
    /// The file could not be written to the cache.
    CacheWrite,
    /// Network access is disabled.
    Offline,
}

/// Structured fetch error carried inside [`FetchOutcome::FetchFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
            retryable,
        }
    }

    pub fn upstream_status(status: u16, url: &str) -> Self {
        Self {
            kind: FetchErrorKind::UpstreamStatus,
            message: format!("{url} returned status {status}"),
            retryable: status >= 500,
        }
    }

    pub fn cache_write(path: &Path, error: &std::io::Error) -> Self {
        Self {
            kind: FetchErrorKind::CacheWrite,
            message: format!("cannot write {}: {error}", path.display()),
            retryable: false,
        }
    }

    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Offline,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of asking an archive for the cached file of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Already cached; no network call was made.
    CacheHit { path: PathBuf },
    /// Retrieved and written to the cache.
    Fetched { path: PathBuf, bytes: usize },
    /// Retrieval failed; `path` holds no fresh data.
    FetchFailed { path: PathBuf, error: FetchError },
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::CacheHit { path } | Self::Fetched { path, .. } | Self::FetchFailed { path, .. } => {
                path
            }
        }
    }

    pub const fn is_cache_hit(&self) -> bool {
        matches!(self, Self::CacheHit { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::FetchFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Why a data-looking line produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The begin time is a placeholder; an event needs a valid start.
    InvalidBeginTime { value: String },
    /// The strength fields cannot form a class plus magnitude.
    InvalidClassification { value: String },
    /// A line of the requested day with an unexpected field count.
    UnrecognizedShape { fields: usize },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBeginTime { value } => write!(f, "invalid begin time '{value}'"),
            Self::InvalidClassification { value } => {
                write!(f, "invalid classification '{value}'")
            }
            Self::UnrecognizedShape { fields } => {
                write!(f, "unrecognized line shape with {fields} fields")
            }
        }
    }
}

/// Outcome of parsing one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Event(FlareEvent),
    /// Comments, headers, other event types and other days.
    Ignored,
    /// A line that should have been an event but is malformed.
    Skipped(SkipReason),
}

/// A malformed line dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the source file.
    pub line_number: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Events and dropped lines of one parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub events: Vec<FlareEvent>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Fold per-line outcomes, numbering lines from 1.
    pub fn collect<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = LineOutcome>,
    {
        let mut report = Self::default();
        let mut ignored = 0_usize;
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                LineOutcome::Event(event) => report.events.push(event),
                LineOutcome::Ignored => ignored += 1,
                LineOutcome::Skipped(reason) => report.skipped.push(SkippedLine {
                    line_number: index + 1,
                    reason,
                }),
            }
        }
        debug!(ignored, "ignored non-event lines");
        report
    }
}

/// An upstream archive: where a day's file lives and how to read it.
pub trait ArchiveSource: Send + Sync {
    fn id(&self) -> ArchiveId;

    /// Name of the cache file holding `day`'s data.
    fn cache_file_name(&self, day: &Day) -> String;

    /// Remote location of that file, for diagnostics.
    fn remote_location(&self, day: &Day) -> String;

    /// Return the cached file for `day`, retrieving it on a cache miss.
    fn fetch(&self, day: &Day, cache: &CacheStore) -> FetchOutcome;

    /// Parse the file contents into the events of `day`.
    fn parse(&self, day: &Day, contents: &str) -> ParseReport;
}
