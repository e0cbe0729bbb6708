use solflare_core::FlareClient;
use tracing::warn;

use crate::cli::{CacheArgs, CacheCommand};

use super::CommandResult;

pub fn run(args: &CacheArgs, client: &FlareClient) -> CommandResult {
    let report = match args.command {
        CacheCommand::Purge => client.purge_cache(),
        CacheCommand::Clear => client.clear_cache(),
    };

    if !report.failed.is_empty() {
        warn!(failed = report.failed.len(), "some cache files could not be deleted");
    }
    CommandResult::Cache(report)
}
