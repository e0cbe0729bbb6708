//! Behavior-driven tests for flare queries
//!
//! These tests verify HOW a query moves from day validation through archive
//! selection, fetching, caching and parsing, using fake transports only.

use serde_json::json;
use solflare_core::{
    archive_for_day, ArchiveId, Day, DayInput, FetchErrorKind, FetchOutcome, FlareClient,
    FlareConfig, SourceStrategy, ValidationError,
};
use solflare_tests::{client_with, CountingFtp, CountingHttp, ANNUAL_SAMPLE, DAILY_SAMPLE};
use time::{Date, Month};

// =============================================================================
// Query: Day Validation
// =============================================================================

#[test]
fn when_day_is_not_eight_digits_query_fails_before_any_io() {
    // Given: A client whose transports count every call
    let dir = tempfile::tempdir().expect("tempdir");
    let ftp = CountingFtp::serving(DAILY_SAMPLE);
    let http = CountingHttp::serving(ANNUAL_SAMPLE);
    let client = client_with(dir.path(), ftp.clone(), http.clone());

    // When: The caller asks for "foobar"
    let result = client.flares("foobar");

    // Then: A validation error is returned and nothing was fetched
    assert!(matches!(result, Err(ValidationError::InvalidDayFormat { .. })));
    assert_eq!(ftp.calls(), 0);
    assert_eq!(http.calls(), 0);
}

#[test]
fn when_day_is_not_a_calendar_date_query_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(DAILY_SAMPLE),
        CountingHttp::serving(ANNUAL_SAMPLE),
    );

    let result = client.flares("20250230");

    assert!(matches!(
        result,
        Err(ValidationError::InvalidCalendarDate { .. })
    ));
}

#[test]
fn when_day_arrives_as_json_number_it_is_rejected_as_unsupported_type() {
    // Given: A day taken from a JSON document as a number
    let value = json!(20250529);

    // When: It is converted to a day input
    let result = DayInput::try_from(&value);

    // Then: The type itself is rejected
    assert_eq!(
        result,
        Err(ValidationError::UnsupportedDayType { found: "number" })
    );
    assert!(DayInput::try_from(&json!("20250529")).is_ok());
}

#[test]
fn when_day_is_a_date_value_it_normalizes_to_eight_digits() {
    let date = Date::from_calendar_date(2016, Month::March, 1).expect("valid date");
    let day = Day::normalize(date).expect("valid date");
    assert_eq!(day.as_str(), "20160301");
}

// =============================================================================
// Query: Archive Selection
// =============================================================================

#[test]
fn router_selects_daily_archive_iff_year_is_2017_or_later() {
    for (text, expected) in [
        ("19960731", ArchiveId::Ngdc),
        ("20151031", ArchiveId::Ngdc),
        ("20161231", ArchiveId::Ngdc),
        ("20170101", ArchiveId::Swpc),
        ("20250529", ArchiveId::Swpc),
    ] {
        let day = Day::parse(text).expect("valid day");
        assert_eq!(archive_for_day(&day), expected, "day {text}");
    }
}

#[test]
fn when_day_is_before_2017_only_the_http_archive_is_contacted() {
    // Given: Fakes for both archives
    let dir = tempfile::tempdir().expect("tempdir");
    let ftp = CountingFtp::serving(DAILY_SAMPLE);
    let http = CountingHttp::serving(ANNUAL_SAMPLE);
    let client = client_with(dir.path(), ftp.clone(), http.clone());

    // When: A 2015 day is requested
    let collection = client.flares("20151031").expect("valid day");

    // Then: The renamed 2015 annual report is downloaded over HTTP
    assert_eq!(collection.archive(), ArchiveId::Ngdc);
    assert_eq!(ftp.calls(), 0);
    let urls = http.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].ends_with("goes-xrs-report_2015_modifiedreplacedmissingrows.txt"));
}

#[test]
fn when_archive_is_forced_the_year_rule_is_bypassed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ftp = CountingFtp::serving(DAILY_SAMPLE);
    let http = CountingHttp::serving(ANNUAL_SAMPLE);
    let client = client_with(dir.path(), ftp.clone(), http.clone())
        .with_strategy(SourceStrategy::Strict(ArchiveId::Swpc));

    let collection = client.flares("20160301").expect("valid day");

    assert_eq!(collection.archive(), ArchiveId::Swpc);
    assert_eq!(ftp.calls(), 1);
    assert_eq!(http.calls(), 0);
}

// =============================================================================
// Query: Caching
// =============================================================================

#[test]
fn when_same_day_is_queried_twice_second_query_is_served_from_cache() {
    // Given: A client with an empty cache
    let dir = tempfile::tempdir().expect("tempdir");
    let ftp = CountingFtp::serving(DAILY_SAMPLE);
    let client = client_with(dir.path(), ftp.clone(), CountingHttp::serving(""));

    // When: The same day is requested twice in a row
    let first = client.flares("20250529").expect("valid day");
    let second = client.flares("20250529").expect("valid day");

    // Then: Only the first query went to the network
    assert!(matches!(first.fetch(), FetchOutcome::Fetched { .. }));
    assert!(second.fetch().is_cache_hit());
    assert_eq!(ftp.calls(), 1);
    assert_eq!(first.events(), second.events());
    assert!(dir.path().join("20250529events.txt").is_file());
}

#[test]
fn when_offline_a_cached_file_is_still_parsed() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("20250529events.txt"), DAILY_SAMPLE).expect("seed cache");

    let client = FlareClient::offline(FlareConfig::default().with_cache_dir(dir.path()));
    let collection = client.flares("20250529").expect("valid day");

    assert!(collection.fetch().is_cache_hit());
    assert_eq!(collection.len(), 4);
}

// =============================================================================
// Query: Daily Format Parsing
// =============================================================================

#[test]
fn daily_file_with_one_xra_and_one_other_line_yields_one_event() {
    // Given: A daily file with an XRA line and an RSP line
    let file = "\
:Product: 20240101events.txt
#Event    Begin    Max       End  Obs  Q  Type  Loc/Frq   Particulars       Reg#
5010       0412   0420      0431  G16  5   XRA  1-8A      X1.2    1.1E-01   3536
5020       0500   0501      0503  SVI  C   RSP  025-180   III/1
";
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(dir.path(), CountingFtp::serving(file), CountingHttp::serving(""));

    // When: The day is queried
    let collection = client.flares("20240101").expect("valid day");

    // Then: Exactly the XRA event is returned with its fields
    assert_eq!(collection.len(), 1);
    let event = &collection.events()[0];
    assert_eq!(event.name_or_unknown(), "5010");
    assert_eq!(event.begin_time.format_rfc3339(), "2024-01-01T04:12:00Z");
    assert_eq!(event.max_time.format_rfc3339(), "2024-01-01T04:20:00Z");
    assert_eq!(event.end_time.format_rfc3339(), "2024-01-01T04:31:00Z");
    assert_eq!(event.classification, "X1.2");
}

#[test]
fn malformed_daily_lines_fall_back_instead_of_aborting() {
    // Given: A daily file with placeholder begin, max and end fields
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(DAILY_SAMPLE),
        CountingHttp::serving(""),
    );

    // When: The day is parsed
    let collection = client.flares("20250529").expect("valid day");

    // Then: The placeholder-begin line is skipped, the others backfill
    let names = collection
        .iter()
        .map(|event| event.name_or_unknown())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["1000", "1020", "1040", "1050"]);

    let missing_max = &collection.events()[2];
    assert_eq!(missing_max.max_time, missing_max.begin_time);
    assert_eq!(missing_max.end_time.format_rfc3339(), "2025-05-29T20:30:00Z");

    let missing_end = &collection.events()[3];
    assert_eq!(missing_end.end_time, missing_end.max_time);

    assert_eq!(collection.skipped().len(), 1);
    assert_eq!(collection.skipped()[0].line_number, 11);
}

#[test]
fn every_parsed_event_satisfies_begin_max_end_ordering() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(DAILY_SAMPLE),
        CountingHttp::serving(ANNUAL_SAMPLE),
    );

    for day in ["20250529", "20151031"] {
        let collection = client.flares(day).expect("valid day");
        assert!(!collection.is_empty(), "day {day}");
        for event in &collection {
            assert!(event.begin_time <= event.max_time, "{event}");
            assert!(event.max_time <= event.end_time, "{event}");
        }
    }
}

// =============================================================================
// Query: Annual Format Parsing
// =============================================================================

#[test]
fn annual_report_yields_named_and_unknown_events() {
    // Given: An annual report with 11-field and 8-field lines
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(""),
        CountingHttp::serving(ANNUAL_SAMPLE),
    );

    // When: One of its days is queried
    let collection = client.flares("20151031").expect("valid day");

    // Then: Only that day's lines are returned, in file order
    assert_eq!(collection.len(), 3);
    let events = collection.events();
    assert_eq!(events[0].event_name.as_deref(), Some("N05E57"));
    assert_eq!(events[0].classification, "C1.7");
    assert_eq!(events[0].max_time.format_rfc3339(), "2015-10-31T08:39:00Z");
    assert_eq!(events[0].end_time.format_rfc3339(), "2015-10-31T08:41:00Z");
    assert_eq!(events[1].name_or_unknown(), "unknown");
    assert_eq!(events[1].classification, "C1.5");

    // And: An event crossing midnight ends on the next day
    assert_eq!(events[2].max_time.format_rfc3339(), "2015-11-01T00:05:00Z");
    assert_eq!(events[2].end_time.format_rfc3339(), "2015-11-01T00:15:00Z");
}

#[test]
fn annual_time_columns_are_read_as_begin_max_end() {
    // Given: An annual report line whose three times are strictly increasing
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(""),
        CountingHttp::serving("31777151031  0100 0120 0130  C 15    G15  1.0E-03\n"),
    );

    // When: Its day is queried
    let collection = client.flares("20151031").expect("valid day");

    // Then: The second column is the peak and the third the end
    assert_eq!(collection.len(), 1);
    let event = &collection.events()[0];
    assert_eq!(event.begin_time.format_rfc3339(), "2015-10-31T01:00:00Z");
    assert_eq!(event.max_time.format_rfc3339(), "2015-10-31T01:20:00Z");
    assert_eq!(event.end_time.format_rfc3339(), "2015-10-31T01:30:00Z");
}

#[test]
fn annual_report_is_cached_exactly_as_downloaded() {
    // Given: A report body that is not valid UTF-8
    let dir = tempfile::tempdir().expect("tempdir");
    let mut body = ANNUAL_SAMPLE.as_bytes().to_vec();
    body.extend_from_slice(b"31777151031  1200 1210 1220  C 15    G15  \xb0\xff\r\n");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(""),
        CountingHttp::serving(body.clone()),
    );

    // When: A day of that year is queried
    let collection = client.flares("20130525").expect("valid day");

    // Then: The cache file holds the exact bytes received
    assert!(matches!(collection.fetch(), FetchOutcome::Fetched { .. }));
    let cached = std::fs::read(dir.path().join("goes-xrs-report_2013.txt")).expect("read cache");
    assert_eq!(cached, body);
}

// =============================================================================
// Query: Fetch Failures
// =============================================================================

#[test]
fn when_ftp_fetch_fails_query_succeeds_with_empty_collection() {
    // Given: An FTP archive that rejects every retrieval
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(dir.path(), CountingFtp::failing(), CountingHttp::serving(""));

    // When: A daily-archive day is queried
    let collection = client.flares("20250529").expect("fetch failures are not errors");

    // Then: The collection is empty and explains the failure
    assert!(collection.is_empty());
    let error = collection.fetch().error().expect("fetch failed");
    assert_eq!(error.kind(), FetchErrorKind::Transport);
    assert!(!dir.path().join("20250529events.txt").exists());
}

#[test]
fn when_http_returns_not_found_nothing_is_cached() {
    let dir = tempfile::tempdir().expect("tempdir");
    let http = CountingHttp::with_status(404, "<html>not found</html>");
    let client = client_with(dir.path(), CountingFtp::serving(""), http.clone());

    let collection = client.flares("20130525").expect("valid day");

    assert!(collection.is_empty());
    assert_eq!(
        collection.fetch().error().map(|error| error.kind()),
        Some(FetchErrorKind::UpstreamStatus)
    );
    assert!(!dir.path().join("goes-xrs-report_2013.txt").exists());

    // And: The next query tries again
    client.flares("20130525").expect("valid day");
    assert_eq!(http.calls(), 2);
}

#[test]
fn when_offline_and_uncached_query_reports_offline_miss() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = FlareClient::offline(FlareConfig::default().with_cache_dir(dir.path()));

    let collection = client.flares("20130525").expect("valid day");

    assert!(collection.is_empty());
    assert_eq!(
        collection.fetch().error().map(|error| error.kind()),
        Some(FetchErrorKind::Offline)
    );
}

// =============================================================================
// Query: Serialization
// =============================================================================

#[test]
fn collection_serializes_with_rfc3339_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(DAILY_SAMPLE),
        CountingHttp::serving(""),
    );
    let collection = client.flares("20250529").expect("valid day");

    let value = serde_json::to_value(&collection).expect("serialize");

    assert_eq!(value["day"], "20250529");
    assert_eq!(value["archive"], "swpc");
    assert_eq!(value["fetch"]["status"], "fetched");
    assert_eq!(value["events"][0]["begin_time"], "2025-05-29T17:48:00Z");
    assert_eq!(value["skipped"][0]["reason"], "invalid_begin_time");
}

#[test]
fn dump_prints_one_line_per_event_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = client_with(
        dir.path(),
        CountingFtp::serving(DAILY_SAMPLE),
        CountingHttp::serving(""),
    );
    let collection = client.flares("20250529").expect("valid day");

    let mut out = Vec::new();
    collection.dump(&mut out).expect("dump");
    let text = String::from_utf8(out).expect("utf8");

    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("1000 "));
    assert!(lines[0].ends_with("M1.0"));
}
