use std::io::Write;

use serde::Serialize;
use solflare_core::{FetchOutcome, FlareCollection, PurgeReport, RoutePlan};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

pub fn render<W: Write>(
    writer: &mut W,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => match result {
            CommandResult::Flares(collection) => write_json(writer, collection, pretty),
            CommandResult::Route(plan) => write_json(writer, plan, pretty),
            CommandResult::Cache(report) => write_json(writer, report, pretty),
        },
        OutputFormat::Ndjson => match result {
            CommandResult::Flares(collection) => {
                for event in collection {
                    writeln!(writer, "{}", serde_json::to_string(event)?)?;
                }
                Ok(())
            }
            CommandResult::Route(plan) => write_json(writer, plan, false),
            CommandResult::Cache(report) => write_json(writer, report, false),
        },
        OutputFormat::Table => match result {
            CommandResult::Flares(collection) => render_flares_table(writer, collection),
            CommandResult::Route(plan) => render_route_table(writer, plan),
            CommandResult::Cache(report) => render_cache_table(writer, report),
        },
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(writer, "{payload}")?;
    Ok(())
}

fn render_flares_table<W: Write>(writer: &mut W, collection: &FlareCollection) -> Result<(), CliError> {
    writeln!(writer, "day    : {}", collection.day())?;
    writeln!(writer, "archive: {}", collection.archive())?;
    writeln!(writer, "fetch  : {}", fetch_label(collection.fetch()))?;
    writeln!(writer, "events : {}", collection.len())?;
    collection.dump(&mut *writer)?;

    if !collection.skipped().is_empty() {
        writeln!(writer, "skipped:")?;
        for skipped in collection.skipped() {
            writeln!(writer, "  - line {}: {}", skipped.line_number, skipped.reason)?;
        }
    }
    Ok(())
}

fn render_route_table<W: Write>(writer: &mut W, plan: &RoutePlan) -> Result<(), CliError> {
    writeln!(writer, "day       : {}", plan.day)?;
    writeln!(writer, "archive   : {}", plan.archive)?;
    writeln!(writer, "cache_file: {}", plan.cache_file)?;
    writeln!(writer, "remote    : {}", plan.remote_location)?;
    Ok(())
}

fn render_cache_table<W: Write>(writer: &mut W, report: &PurgeReport) -> Result<(), CliError> {
    writeln!(writer, "scanned : {}", report.scanned)?;
    writeln!(writer, "retained: {}", report.retained)?;
    writeln!(writer, "deleted : {}", report.deleted.len())?;
    for path in &report.deleted {
        writeln!(writer, "  - {}", path.display())?;
    }
    if !report.failed.is_empty() {
        writeln!(writer, "failed  : {}", report.failed.len())?;
        for failure in &report.failed {
            writeln!(writer, "  - {}: {}", failure.path.display(), failure.error)?;
        }
    }
    Ok(())
}

fn fetch_label(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::CacheHit { path } => format!("cache hit ({})", path.display()),
        FetchOutcome::Fetched { path, bytes } => {
            format!("fetched {bytes} bytes ({})", path.display())
        }
        FetchOutcome::FetchFailed { error, .. } => format!("failed: {error}"),
    }
}
