use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

use crate::{UtcDateTime, ValidationError};

const DAY_LEN: usize = 8;

/// Raw day input accepted by a flare query before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayInput {
    Text(String),
    Date(Date),
    DateTime(PrimitiveDateTime),
    Timestamp(OffsetDateTime),
}

impl From<&str> for DayInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DayInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DayInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Date> for DayInput {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<PrimitiveDateTime> for DayInput {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<OffsetDateTime> for DayInput {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<UtcDateTime> for DayInput {
    fn from(value: UtcDateTime) -> Self {
        Self::Timestamp(value.into_inner())
    }
}

impl From<Day> for DayInput {
    fn from(value: Day) -> Self {
        Self::Date(value.date)
    }
}

impl TryFrom<&Value> for DayInput {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let found = match value {
            Value::String(text) => return Ok(Self::Text(text.clone())),
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Err(ValidationError::UnsupportedDayType { found })
    }
}

/// Normalized query day, always rendered as 8-digit `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Day {
    date: Date,
    compact: String,
}

impl Day {
    /// Normalize any supported day input. This is the single validation point.
    pub fn normalize(input: impl Into<DayInput>) -> Result<Self, ValidationError> {
        match input.into() {
            DayInput::Text(text) => Self::parse(&text),
            DayInput::Date(date) => Ok(Self::from_date(date)),
            DayInput::DateTime(value) => Ok(Self::from_date(value.date())),
            DayInput::Timestamp(value) => Ok(Self::from_date(value.date())),
        }
    }

    /// Parse `YYYYMMDD`, ignoring anything after the eighth character.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let candidate = trimmed.get(..DAY_LEN).unwrap_or(trimmed);

        if candidate.len() != DAY_LEN || !candidate.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::InvalidDayFormat {
                value: input.to_owned(),
            });
        }

        let date = parse_compact_date(candidate).ok_or_else(|| {
            ValidationError::InvalidCalendarDate {
                value: candidate.to_owned(),
            }
        })?;

        Ok(Self::from_date(date))
    }

    pub fn from_date(date: Date) -> Self {
        let compact = format!(
            "{:04}{:02}{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        );
        Self { date, compact }
    }

    pub fn as_str(&self) -> &str {
        &self.compact
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn year(&self) -> i32 {
        self.date.year()
    }

    /// Two-digit-year form used by the annual reports.
    pub fn yymmdd(&self) -> &str {
        &self.compact[2..]
    }
}

/// Parse 8 ASCII digits as a calendar date; `None` for anything else.
pub(crate) fn parse_compact_date(text: &str) -> Option<Date> {
    if text.len() != DAY_LEN || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let year = text[..4].parse::<i32>().ok()?;
    let month = text[4..6].parse::<u8>().ok()?;
    let day = text[6..8].parse::<u8>().ok()?;
    let month = Month::try_from(month).ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Day {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Day {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Day> for String {
    fn from(value: Day) -> Self {
        value.compact
    }
}
