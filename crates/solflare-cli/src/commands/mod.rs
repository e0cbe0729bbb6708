mod cache;
mod flares;
mod route;

use solflare_core::{
    FlareClient, FlareCollection, FlareConfig, PurgePolicy, PurgeReport, RoutePlan,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Data produced by one command, rendered by [`crate::output`].
#[derive(Debug)]
pub enum CommandResult {
    Flares(FlareCollection),
    Route(RoutePlan),
    Cache(PurgeReport),
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = config_from_cli(cli);

    match &cli.command {
        Command::Flares(args) => flares::run(args, client(cli, config)),
        Command::Route(args) => route::run(args, client(cli, config)),
        Command::Cache(args) => Ok(cache::run(args, &client(cli, config))),
    }
}

fn config_from_cli(cli: &Cli) -> FlareConfig {
    let config = FlareConfig::default()
        .with_timeout_ms(cli.timeout_ms)
        .with_swpc_host(&cli.swpc_host, cli.swpc_port)
        .with_ngdc_base_url(&cli.ngdc_base_url)
        .with_purge_policy(PurgePolicy {
            final_after_days: i64::from(cli.final_after_days),
            ..PurgePolicy::default()
        });
    match &cli.cache_dir {
        Some(cache_dir) => config.with_cache_dir(cache_dir),
        None => config,
    }
}

fn client(cli: &Cli, config: FlareConfig) -> FlareClient {
    if cli.offline {
        FlareClient::offline(config)
    } else {
        FlareClient::new(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn offline_flares_for_empty_cache_is_an_empty_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_dir = dir.path().to_string_lossy().into_owned();
        let cli = cli(&["solflare", "--offline", "--cache-dir", &cache_dir, "flares", "20250529"]);

        let CommandResult::Flares(collection) = run(&cli).expect("query succeeds") else {
            panic!("expected flares result");
        };
        assert!(collection.is_empty());
        assert!(collection.fetch().error().is_some());
    }

    #[test]
    fn invalid_day_maps_to_validation_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_dir = dir.path().to_string_lossy().into_owned();
        let cli = cli(&["solflare", "--offline", "--cache-dir", &cache_dir, "flares", "foobar"]);

        let error = run(&cli).expect_err("invalid day");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn upstream_options_reach_the_config() {
        let cli = cli(&[
            "solflare",
            "--swpc-host",
            "127.0.0.1",
            "--swpc-port",
            "2121",
            "--ngdc-base-url",
            "http://127.0.0.1:8080/xrs/",
            "--final-after-days",
            "30",
            "--timeout-ms",
            "500",
            "route",
            "20150612",
        ]);

        let config = config_from_cli(&cli);

        assert_eq!(config.swpc_host, "127.0.0.1");
        assert_eq!(config.swpc_port, 2121);
        assert_eq!(config.ngdc_base_url, "http://127.0.0.1:8080/xrs/");
        assert_eq!(config.purge.final_after_days, 30);
        assert_eq!(config.timeout_ms, 500);
    }

    #[test]
    fn route_uses_configured_annual_base_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_dir = dir.path().to_string_lossy().into_owned();
        let cli = cli(&[
            "solflare",
            "--offline",
            "--cache-dir",
            &cache_dir,
            "--ngdc-base-url",
            "http://127.0.0.1:8080/xrs/",
            "route",
            "20130525",
        ]);

        let CommandResult::Route(plan) = run(&cli).expect("route succeeds") else {
            panic!("expected route result");
        };
        assert_eq!(
            plan.remote_location,
            "http://127.0.0.1:8080/xrs/goes-xrs-report_2013.txt"
        );
    }

    #[test]
    fn cache_clear_removes_archive_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("20250529events.txt"), "x").expect("seed");
        let cache_dir = dir.path().to_string_lossy().into_owned();
        let cli = cli(&["solflare", "--cache-dir", &cache_dir, "cache", "clear"]);

        let CommandResult::Cache(report) = run(&cli).expect("clear succeeds") else {
            panic!("expected cache result");
        };
        assert_eq!(report.deleted.len(), 1);
    }
}
