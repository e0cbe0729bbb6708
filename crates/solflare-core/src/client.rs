use crate::cache::{CacheStore, PurgeReport};
use crate::config::FlareConfig;
use crate::routing::{RoutePlan, SourceRouter, SourceRouterBuilder, SourceStrategy};
use crate::{Day, DayInput, FlareCollection, ValidationError};

/// Query entry point: validate the day, purge the cache, fetch and parse.
///
/// ```rust,no_run
/// use solflare_core::{FlareClient, FlareConfig};
///
/// let client = FlareClient::new(FlareConfig::default());
/// let flares = client.flares("20250529")?;
/// flares.dump(std::io::stdout())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FlareClient {
    cache: CacheStore,
    router: SourceRouter,
    strategy: SourceStrategy,
}

impl FlareClient {
    /// Client using the production FTP and HTTP transports.
    pub fn new(config: FlareConfig) -> Self {
        let router = SourceRouterBuilder::new().with_config(config.clone()).build();
        Self::with_router(config, router)
    }

    /// Client answering from the cache only.
    pub fn offline(config: FlareConfig) -> Self {
        let router = SourceRouterBuilder::new()
            .with_config(config.clone())
            .with_offline_mode()
            .build();
        Self::with_router(config, router)
    }

    pub fn with_router(config: FlareConfig, router: SourceRouter) -> Self {
        Self {
            cache: CacheStore::open(config.cache_dir, config.purge),
            router,
            strategy: SourceStrategy::Auto,
        }
    }

    pub fn with_strategy(mut self, strategy: SourceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub const fn strategy(&self) -> SourceStrategy {
        self.strategy
    }

    /// Flare events of one day.
    ///
    /// Only an invalid day is an error; it is reported before any cache or
    /// network access. Missing data yields an empty collection.
    pub fn flares(&self, day: impl Into<DayInput>) -> Result<FlareCollection, ValidationError> {
        let day = Day::normalize(day)?;
        self.cache.purge();
        Ok(self.router.route(&day, self.strategy, &self.cache))
    }

    /// Archive and file names `day` maps to, without I/O.
    pub fn plan(&self, day: impl Into<DayInput>) -> Result<Option<RoutePlan>, ValidationError> {
        let day = Day::normalize(day)?;
        Ok(self.router.plan(&day, self.strategy))
    }

    pub fn purge_cache(&self) -> PurgeReport {
        self.cache.purge()
    }

    pub fn clear_cache(&self) -> PurgeReport {
        self.cache.clear()
    }
}
