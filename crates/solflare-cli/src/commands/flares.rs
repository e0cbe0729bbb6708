use solflare_core::FlareClient;
use tracing::info;

use crate::cli::FlaresArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &FlaresArgs, client: FlareClient) -> Result<CommandResult, CliError> {
    let client = client.with_strategy(args.archive.strategy());
    let collection = client.flares(args.day.as_str())?;

    info!(
        day = %collection.day(),
        archive = %collection.archive(),
        events = collection.len(),
        skipped = collection.skipped().len(),
        "flare query complete"
    );
    Ok(CommandResult::Flares(collection))
}
