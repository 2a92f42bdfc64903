//! Application dependency grouping.
//!
//! **Note**: this is NOT a Builder pattern — no build steps, no default
//! values, no hidden logic. Just parameter grouping. Singletons (the
//! registry, queue, pairing manager, driver registry) are constructed once
//! at process startup and threaded through explicitly; there is no
//! ambient module-level mutation after init.

use crate::pairing::PairingManager;
use crate::preferences_cache::PreferencesCache;
use crate::queue::MatchmakingQueue;
use crate::registry::ConnectionRegistry;
use crate::search_driver::DriverRegistry;
use rendezvous_core::ports::{BlockStorePort, IdentityStorePort, ModeratorPort};
use rendezvous_core::MatchmakingConfig;
use std::sync::Arc;

/// Everything a use case needs. All fields are required — no defaults, no
/// optional fields.
pub struct AppDeps {
    pub registry: Arc<ConnectionRegistry>,
    pub queue: Arc<MatchmakingQueue>,
    pub pairing: Arc<PairingManager>,
    pub drivers: Arc<DriverRegistry>,
    pub preferences_cache: Arc<PreferencesCache>,

    pub identity_store: Arc<dyn IdentityStorePort>,
    pub block_store: Arc<dyn BlockStorePort>,
    pub moderator: Arc<dyn ModeratorPort>,

    pub config: MatchmakingConfig,
}

impl AppDeps {
    pub fn new(
        identity_store: Arc<dyn IdentityStorePort>,
        block_store: Arc<dyn BlockStorePort>,
        moderator: Arc<dyn ModeratorPort>,
        config: MatchmakingConfig,
    ) -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            queue: Arc::new(MatchmakingQueue::new(
                config.relaxed_phase_wait_threshold_ms,
                config.top_k,
            )),
            pairing: Arc::new(PairingManager::new()),
            drivers: Arc::new(DriverRegistry::new()),
            preferences_cache: Arc::new(PreferencesCache::new()),
            identity_store,
            block_store,
            moderator,
            config,
        }
    }
}
