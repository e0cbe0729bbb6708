use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use serde::Serialize;

use crate::data_source::{FetchOutcome, SkippedLine};
use crate::{ArchiveId, Day, UtcDateTime, ValidationError};

/// Display value for events whose source line carries no identifier.
pub const UNKNOWN_EVENT_NAME: &str = "unknown";

/// One X-ray flare event detected by a GOES satellite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlareEvent {
    /// Upstream identifier; `None` when the source line omits it.
    pub event_name: Option<String>,
    pub begin_time: UtcDateTime,
    pub max_time: UtcDateTime,
    pub end_time: UtcDateTime,
    /// Letter class plus one-decimal magnitude, e.g. `M1.0`.
    pub classification: String,
}

impl FlareEvent {
    pub fn new(
        event_name: Option<String>,
        begin_time: UtcDateTime,
        max_time: UtcDateTime,
        end_time: UtcDateTime,
        classification: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if begin_time > max_time || max_time > end_time {
            return Err(ValidationError::EventOutOfOrder);
        }

        let classification = classification.into();
        if classification.trim().is_empty() {
            return Err(ValidationError::EmptyClassification);
        }

        Ok(Self {
            event_name,
            begin_time,
            max_time,
            end_time,
            classification,
        })
    }

    pub fn name_or_unknown(&self) -> &str {
        self.event_name.as_deref().unwrap_or(UNKNOWN_EVENT_NAME)
    }
}

impl Display for FlareEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name_or_unknown(),
            self.begin_time,
            self.max_time,
            self.end_time,
            self.classification
        )
    }
}

/// Flare events of one day, in source-file line order.
///
/// A collection is built once per query and is read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct FlareCollection {
    day: Day,
    archive: ArchiveId,
    fetch: FetchOutcome,
    events: Vec<FlareEvent>,
    skipped: Vec<SkippedLine>,
}

impl FlareCollection {
    pub(crate) fn new(
        day: Day,
        archive: ArchiveId,
        fetch: FetchOutcome,
        events: Vec<FlareEvent>,
        skipped: Vec<SkippedLine>,
    ) -> Self {
        Self {
            day,
            archive,
            fetch,
            events,
            skipped,
        }
    }

    pub fn day(&self) -> &Day {
        &self.day
    }

    pub const fn archive(&self) -> ArchiveId {
        self.archive
    }

    pub fn fetch(&self) -> &FetchOutcome {
        &self.fetch
    }

    pub fn events(&self) -> &[FlareEvent] {
        &self.events
    }

    /// Malformed lines dropped while parsing.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlareEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Write every event on its own line, in order.
    pub fn dump<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for event in &self.events {
            writeln!(writer, "{event}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FlareCollection {
    type Item = &'a FlareEvent;
    type IntoIter = std::slice::Iter<'a, FlareEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
