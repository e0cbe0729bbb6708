use solflare_core::FlareClient;

use crate::cli::RouteArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &RouteArgs, client: FlareClient) -> Result<CommandResult, CliError> {
    let client = client.with_strategy(args.archive.strategy());
    let plan = client.plan(args.day.as_str())?.ok_or_else(|| {
        CliError::Command(format!("no archive registered for day '{}'", args.day))
    })?;
    Ok(CommandResult::Route(plan))
}
