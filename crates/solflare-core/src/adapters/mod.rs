mod ngdc;
mod swpc;

pub use ngdc::{NgdcArchive, NGDC_RENAMED_REPORTS};
pub use swpc::{SwpcArchive, XRAY_EVENT_TYPE};

use crate::data_source::{LineOutcome, SkipReason};
use crate::{Day, FlareEvent, UtcDateTime};

/// Build an event from raw `HHMM` fields of `day`, correcting day rollover.
///
/// A max or end time earlier than the begin time belongs to the next day. A
/// placeholder begin time skips the line; a placeholder max time falls back to
/// the begin time and a placeholder end time to the max time. An end time that
/// still precedes the max time is raised to it.
pub(crate) fn build_event(
    day: &Day,
    event_name: Option<String>,
    begin: &str,
    max: &str,
    end: &str,
    classification: String,
) -> LineOutcome {
    let date = day.date();

    let Ok(begin_time) = UtcDateTime::from_date_and_hhmm(date, begin) else {
        return LineOutcome::Skipped(SkipReason::InvalidBeginTime {
            value: begin.to_owned(),
        });
    };

    let roll = |time: UtcDateTime| {
        if time < begin_time {
            time.plus_days(1)
        } else {
            time
        }
    };

    let max_time = UtcDateTime::from_date_and_hhmm(date, max).map_or(begin_time, roll);
    let end_time = UtcDateTime::from_date_and_hhmm(date, end)
        .map_or(max_time, roll)
        .max(max_time);

    match FlareEvent::new(event_name, begin_time, max_time, end_time, classification.clone()) {
        Ok(event) => LineOutcome::Event(event),
        Err(_) => LineOutcome::Skipped(SkipReason::InvalidClassification {
            value: classification,
        }),
    }
}
