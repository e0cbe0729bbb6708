//! # Domain Models
//!
//! Canonical domain types for solar flare queries.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Day`] | Validated `YYYYMMDD` query key |
//! | [`DayInput`] | Raw day input (text, date, timestamp) prior to normalization |
//! | [`FlareEvent`] | One X-ray flare with begin/max/end times and class |
//! | [`FlareCollection`] | Ordered, read-only events of one day |
//! | [`UtcDateTime`] | Minute-resolution UTC timestamp |
//!
//! ## Validation
//!
//! [`Day::normalize`] is the only place day input is validated; everything
//! downstream works with a [`Day`] and never branches on the input type.
//!
//! ```rust
//! use solflare_core::{Day, ValidationError};
//!
//! let day = Day::normalize("20250529")?;
//! assert_eq!(day.yymmdd(), "250529");
//!
//! assert!(matches!(
//!     Day::normalize("foobar"),
//!     Err(ValidationError::InvalidDayFormat { .. })
//! ));
//! # Ok::<(), ValidationError>(())
//! ```

mod day;
mod flare;
mod timestamp;

pub(crate) use day::parse_compact_date;
pub use day::{Day, DayInput};
pub use flare::{FlareCollection, FlareEvent, UNKNOWN_EVENT_NAME};
pub use timestamp::UtcDateTime;
