//! # Restaurant API Client
//!
//! Thin `reqwest` wrapper over the backend REST API, plus the [`CollectionSource`]
//! adapters the view-models fetch through. Every call is a single attempt: a failure is
//! reported as a [`FetchError`] and retrying is left to the caller.

use crate::framework::{CollectionSource, FetchError};
use crate::model::{RawOrder, RawRestaurant, RawReview, Restaurant, RestaurantId};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{header, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Maps a raw `reqwest` outcome into the fetch error taxonomy.
#[async_trait]
pub(crate) trait ResponseExt {
    async fn map_fetch_error(self) -> Result<Response, FetchError>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn map_fetch_error(self) -> Result<Response, FetchError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpStatus {
            status: status.as_u16(),
            body: self.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ResponseExt for Result<Response, reqwest::Error> {
    async fn map_fetch_error(self) -> Result<Response, FetchError> {
        match self {
            Ok(response) => response.map_fetch_error().await,
            Err(e) => Err(FetchError::network(e)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RestaurantApiClient {
    base_url: String,
    session: Session,
    client: reqwest::Client,
}

impl RestaurantApiClient {
    pub fn new(
        base_url: &Url,
        session: Session,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            session,
            client: builder.build()?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(FetchError::network)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, FetchError> {
        debug!(%url, "GET");
        let mut request = self.client.get(url);
        if let Some(token) = self.session.token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = request.send().await.map_fetch_error().await?;
        let body = response.bytes().await.map_err(FetchError::network)?;
        serde_json::from_slice(&body).map_err(FetchError::parse)
    }

    /// `GET /api/restaurants`
    #[instrument(skip(self))]
    pub async fn list_restaurants(&self) -> Result<Vec<RawRestaurant>, FetchError> {
        let url = self.endpoint("/api/restaurants")?;
        self.get_json(url).await
    }

    /// `GET /api/restaurants/{id}`
    #[instrument(skip(self))]
    pub async fn get_restaurant(&self, id: RestaurantId) -> Result<RawRestaurant, FetchError> {
        let url = self.endpoint(&format!("/api/restaurants/{}", id))?;
        self.get_json(url).await
    }

    /// `GET /api/restaurants/search?q=...`
    #[instrument(skip(self))]
    pub async fn search_restaurants(&self, query: &str) -> Result<Vec<RawRestaurant>, FetchError> {
        let mut url = self.endpoint("/api/restaurants/search")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_json(url).await
    }

    /// `GET /api/restaurants/{id}/reviews`
    #[instrument(skip(self))]
    pub async fn restaurant_reviews(&self, id: RestaurantId) -> Result<Vec<RawReview>, FetchError> {
        let url = self.endpoint(&format!("/api/restaurants/{}/reviews", id))?;
        self.get_json(url).await
    }

    /// `GET /api/restaurants/{id}/menu`
    #[instrument(skip(self))]
    pub async fn restaurant_menu(&self, id: RestaurantId) -> Result<RawOrder, FetchError> {
        let url = self.endpoint(&format!("/api/restaurants/{}/menu", id))?;
        self.get_json(url).await
    }
}

/// Full listing, used by the home and map screens.
pub struct RestaurantListSource {
    api: RestaurantApiClient,
}

impl RestaurantListSource {
    pub fn new(api: RestaurantApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CollectionSource<Restaurant> for RestaurantListSource {
    async fn fetch(&self) -> Result<Vec<RawRestaurant>, FetchError> {
        self.api.list_restaurants().await
    }

    fn describe(&self) -> String {
        "GET /api/restaurants".to_string()
    }
}

/// A single restaurant, presented as a one-element collection.
pub struct RestaurantDetailSource {
    api: RestaurantApiClient,
    id: RestaurantId,
}

impl RestaurantDetailSource {
    pub fn new(api: RestaurantApiClient, id: RestaurantId) -> Self {
        Self { api, id }
    }
}

#[async_trait]
impl CollectionSource<Restaurant> for RestaurantDetailSource {
    async fn fetch(&self) -> Result<Vec<RawRestaurant>, FetchError> {
        Ok(vec![self.api.get_restaurant(self.id).await?])
    }

    fn describe(&self) -> String {
        format!("GET /api/restaurants/{}", self.id)
    }
}

/// Server-side search results.
pub struct RestaurantSearchSource {
    api: RestaurantApiClient,
    query: String,
}

impl RestaurantSearchSource {
    pub fn new(api: RestaurantApiClient, query: impl Into<String>) -> Self {
        Self {
            api,
            query: query.into(),
        }
    }
}

#[async_trait]
impl CollectionSource<Restaurant> for RestaurantSearchSource {
    async fn fetch(&self) -> Result<Vec<RawRestaurant>, FetchError> {
        self.api.search_restaurants(&self.query).await
    }

    fn describe(&self) -> String {
        format!("GET /api/restaurants/search?q={}", self.query)
    }
}
