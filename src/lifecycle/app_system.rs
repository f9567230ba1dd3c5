use crate::clients::{
    RestaurantApiClient, RestaurantDetailClient, RestaurantDetailSource, RestaurantListClient,
    RestaurantListSource, RestaurantSearchSource, ViewModelHandle,
};
use crate::config::{AppConfig, ConfigError};
use crate::framework::{CollectionSource, ViewModelClient, ViewModelOptions};
use crate::model::{Restaurant, RestaurantId};
use crate::onboarding::{FileOnboardingStore, OnboardingStore};
use crate::restaurant_actor::{self, MapContext, RestaurantError};
use crate::session::Session;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Restaurant(#[from] RestaurantError),
    #[error("view-model task failed: {0}")]
    TaskFailed(String),
}

/// Starts, wires and stops the view-models behind the app's screens.
///
/// * **Listing** and **map** view-models start with the system and are mounted
///   (initialized) immediately.
/// * **Detail** and **search** view-models are spawned on demand and stop when the
///   system shuts down.
///
/// ```ignore
/// let mut system = AppSystem::start(AppConfig::from_env()?, Session::anonymous()).await?;
/// let state = system.listing.wait_until_settled().await?;
/// let detail = system.open_detail(RestaurantId(1)).await?;
/// system.shutdown().await?;
/// ```
pub struct AppSystem {
    /// Home screen listing.
    pub listing: RestaurantListClient,

    /// Map screen; menu item names are searchable here.
    pub map: RestaurantListClient,

    api: RestaurantApiClient,
    config: AppConfig,
    onboarding_seen: bool,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl AppSystem {
    /// Reads the onboarding flag, spawns the listing and map view-models and issues
    /// their first fetch.
    pub async fn start(config: AppConfig, session: Session) -> Result<Self, AppError> {
        info!(base_url = %config.api_base_url, signed_in = session.is_signed_in(), "Starting");
        let api = RestaurantApiClient::new(&config.api_base_url, session, config.request_timeout)?;

        let store = FileOnboardingStore::new(&config.onboarding_state_path);
        let onboarding_seen = match store.has_seen().await {
            Ok(seen) => seen,
            Err(e) => {
                warn!(error = %e, "Could not read onboarding state, showing onboarding");
                false
            }
        };

        let context = Self::map_context(&config);
        let buffer = config.channel_buffer;

        let (listing_actor, listing) = restaurant_actor::new(
            Arc::new(RestaurantListSource::new(api.clone())),
            restaurant_actor::listing_options(buffer),
        );
        let (map_actor, map) = restaurant_actor::new(
            Arc::new(RestaurantListSource::new(api.clone())),
            restaurant_actor::map_options(buffer),
        );
        let handles = vec![
            tokio::spawn(listing_actor.run(context)),
            tokio::spawn(map_actor.run(context)),
        ];

        let system = Self {
            listing: RestaurantListClient::new(listing),
            map: RestaurantListClient::new(map),
            api,
            config,
            onboarding_seen,
            handles,
        };
        system.listing.initialize().await?;
        system.map.initialize().await?;
        Ok(system)
    }

    fn map_context(config: &AppConfig) -> MapContext {
        MapContext {
            center: config.map_center,
            ..MapContext::default()
        }
    }

    fn spawn_view_model(
        &mut self,
        source: Arc<dyn CollectionSource<Restaurant>>,
        options: ViewModelOptions,
    ) -> ViewModelClient<Restaurant> {
        self.prune_finished();
        let (actor, client) = restaurant_actor::new(source, options);
        self.handles
            .push(tokio::spawn(actor.run(Self::map_context(&self.config))));
        client
    }

    /// Forgets actors whose screens have been closed.
    fn prune_finished(&mut self) {
        self.handles.retain(|handle| !handle.is_finished());
    }

    /// Number of view-model actors still running.
    pub fn running_view_models(&mut self) -> usize {
        self.prune_finished();
        self.handles.len()
    }

    /// Spawns and mounts a detail view-model for one restaurant.
    pub async fn open_detail(
        &mut self,
        id: RestaurantId,
    ) -> Result<RestaurantDetailClient, AppError> {
        let source = Arc::new(RestaurantDetailSource::new(self.api.clone(), id));
        let options = restaurant_actor::detail_options(self.config.channel_buffer);
        let client = RestaurantDetailClient::new(self.spawn_view_model(source, options));
        client.initialize().await?;
        Ok(client)
    }

    /// Spawns and mounts a view-model over the backend's search results.
    pub async fn open_search(&mut self, query: &str) -> Result<RestaurantListClient, AppError> {
        let source = Arc::new(RestaurantSearchSource::new(self.api.clone(), query));
        let options = restaurant_actor::listing_options(self.config.channel_buffer);
        let client = RestaurantListClient::new(self.spawn_view_model(source, options));
        client.initialize().await?;
        Ok(client)
    }

    /// `true` when the onboarding pager should be shown (flag read once at start-up).
    pub fn should_show_onboarding(&self) -> bool {
        !self.onboarding_seen
    }

    /// Store that records onboarding completion, for an
    /// [`OnboardingFlow`](crate::onboarding::OnboardingFlow).
    pub fn onboarding_store(&self) -> FileOnboardingStore {
        FileOnboardingStore::new(&self.config.onboarding_state_path)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Gracefully shuts down every view-model.
    ///
    /// Dropping the clients closes the request channels; each actor sees the closed
    /// channel and leaves its loop. Clients for detail or search screens that the caller
    /// still holds must be dropped first, or their actors keep running.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        drop(self.listing);
        drop(self.map);

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("View-model task failed: {:?}", e);
                first_failure.get_or_insert(AppError::TaskFailed(e.to_string()));
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}
