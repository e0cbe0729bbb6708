//! # Solflare Core
//!
//! Retrieval of NOAA GOES X-ray flare events by UTC day.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Day normalization** of text and date/timestamp input into `YYYYMMDD`
//! - **Two archives**: SWPC daily event files over FTP (2017 onwards) and
//!   NGDC annual reports over HTTP (earlier years)
//! - **A disk cache** of raw archive files with a revision-window purge policy
//! - **Line parsers** for both file formats, reporting skipped lines
//! - **Flare collections**: ordered, read-only events of one day
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | SWPC and NGDC archive adapters (fetch + parse) |
//! | [`cache`] | Cache directory store and purge policy |
//! | [`client`] | Query entry point |
//! | [`config`] | Cache location, upstream endpoints, timeouts |
//! | [`data_source`] | Archive trait, fetch outcomes, line outcomes |
//! | [`domain`] | Domain models (Day, FlareEvent, FlareCollection) |
//! | [`error`] | Validation errors |
//! | [`ftp_client`] | FTP client abstraction |
//! | [`http_client`] | HTTP client abstraction |
//! | [`routing`] | Archive selection by year |
//! | [`source`] | Archive identifiers |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solflare_core::{FlareClient, FlareConfig};
//!
//! let client = FlareClient::new(FlareConfig::default());
//! for flare in &client.flares("20250529")? {
//!     println!("{} peaked at {}", flare.classification, flare.max_time);
//! }
//! # Ok::<(), solflare_core::ValidationError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │ Day::normalize
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  FlareClient    │────▶│ CacheStore purge │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Source Router  │────▶│ SWPC (FTP)       │
//! │  (year rule)    │────▶│ NGDC (HTTP)      │
//! └────────┬────────┘     └──────────────────┘
//!          │ FetchOutcome + parse
//!          ▼
//! ┌─────────────────┐
//! │ FlareCollection │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Only day validation fails a query. Transport, cache and format problems
//! are logged through `tracing` and recorded in the collection:
//!
//! ```rust
//! use solflare_core::{FetchErrorKind, FlareCollection};
//!
//! fn explain(collection: &FlareCollection) {
//!     match collection.fetch().error().map(|error| error.kind()) {
//!         Some(FetchErrorKind::Offline) => { /* cache miss without network */ }
//!         Some(_) => { /* upstream unreachable or rejected */ }
//!         None => {}
//!     }
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod client;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod ftp_client;
pub mod http_client;
pub mod routing;
pub mod source;

pub use adapters::{NgdcArchive, SwpcArchive, NGDC_RENAMED_REPORTS, XRAY_EVENT_TYPE};
pub use cache::{classify_entry, CacheStore, PurgeDecision, PurgeFailure, PurgeReport};
pub use client::FlareClient;
pub use config::{
    FlareConfig, PurgePolicy, CACHE_DIR_ENV, DEFAULT_NGDC_BASE_URL, DEFAULT_SWPC_HOST,
    DEFAULT_SWPC_PORT, RESERVED_CACHE_FILE,
};
pub use data_source::{
    ArchiveSource, FetchError, FetchErrorKind, FetchOutcome, LineOutcome, ParseReport, SkipReason,
    SkippedLine,
};
pub use domain::{Day, DayInput, FlareCollection, FlareEvent, UtcDateTime, UNKNOWN_EVENT_NAME};
pub use error::ValidationError;
pub use ftp_client::{FtpClient, FtpError, FtpRequest, NoopFtpClient, SuppaFtpClient};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use routing::{
    archive_for_day, RoutePlan, SourceRouter, SourceRouterBuilder, SourceStrategy,
    DAILY_ARCHIVE_FIRST_YEAR,
};
pub use source::ArchiveId;
