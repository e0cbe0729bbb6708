use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::ValidationError;

/// Minute-resolution UTC timestamp of a flare phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Combine a calendar date with an `HHMM` clock field.
    ///
    /// The field must be exactly four ASCII digits naming a valid time of day.
    pub fn from_date_and_hhmm(date: Date, hhmm: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidClockTime {
            value: hhmm.to_owned(),
        };

        if hhmm.len() != 4 || !hhmm.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour = hhmm[..2].parse::<u8>().map_err(|_| invalid())?;
        let minute = hhmm[2..].parse::<u8>().map_err(|_| invalid())?;
        let clock = Time::from_hms(hour, minute, 0).map_err(|_| invalid())?;

        Ok(Self(PrimitiveDateTime::new(date, clock).assume_utc()))
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        // Any UTC value inside the Date range formats as RFC 3339.
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}
