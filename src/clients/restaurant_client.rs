use crate::clients::handle::ViewModelHandle;
use crate::framework::{FrameworkError, ViewModelClient};
use crate::model::{MapMarker, Restaurant};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the listing and map view-models.
#[derive(Clone)]
pub struct RestaurantListClient {
    inner: ViewModelClient<Restaurant>,
}

impl RestaurantListClient {
    pub fn new(inner: ViewModelClient<Restaurant>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ViewModelHandle<Restaurant> for RestaurantListClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ViewModelClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RestaurantError::ActorCommunicationError(e.to_string())
    }
}

impl RestaurantListClient {
    /// Updates the search text and returns the restaurants now shown.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<Restaurant>, RestaurantError> {
        debug!("Sending request");
        self.inner.set_query(text).await.map_err(Self::map_error)
    }

    /// Selects a cuisine chip.
    #[instrument(skip(self))]
    pub async fn select_category(&self, label: &str) -> Result<Vec<Restaurant>, RestaurantError> {
        debug!("Sending request");
        self.inner
            .set_category(Some(label.to_string()))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn clear_category(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.inner.set_category(None).await.map_err(Self::map_error)
    }

    /// The restaurants currently shown (empty unless loaded).
    pub fn restaurants(&self) -> Vec<Restaurant> {
        self.inner.current().projection
    }

    /// Map pins for the restaurants currently shown.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.inner.current().projection.iter().map(MapMarker::from).collect()
    }
}

/// Client for a restaurant detail view-model.
#[derive(Clone)]
pub struct RestaurantDetailClient {
    inner: ViewModelClient<Restaurant>,
}

impl RestaurantDetailClient {
    pub fn new(inner: ViewModelClient<Restaurant>) -> Self {
        Self { inner }
    }

    /// The loaded restaurant, if the fetch succeeded.
    pub fn restaurant(&self) -> Option<Restaurant> {
        self.inner.current().projection.into_iter().next()
    }
}

#[async_trait]
impl ViewModelHandle<Restaurant> for RestaurantDetailClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ViewModelClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RestaurantError::ActorCommunicationError(e.to_string())
    }
}
