//! # Onboarding
//!
//! A three-page introduction shown once. Whether it has been seen is the only piece of
//! state the app persists locally: it is read once at start-up and written once when the
//! user finishes or skips the pager.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("onboarding state io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("onboarding state at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait OnboardingStore: Send + Sync {
    async fn has_seen(&self) -> Result<bool, StoreError>;
    async fn mark_seen(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OnboardingState {
    #[serde(rename = "hasSeenOnboarding", default)]
    has_seen_onboarding: bool,
}

/// Stores the flag as `{"hasSeenOnboarding": true}` in a JSON file.
#[derive(Debug, Clone)]
pub struct FileOnboardingStore {
    path: PathBuf,
}

impl FileOnboardingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl OnboardingStore for FileOnboardingStore {
    async fn has_seen(&self) -> Result<bool, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No onboarding state yet");
                return Ok(false);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let state: OnboardingState =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(state.has_seen_onboarding)
    }

    async fn mark_seen(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_vec(&OnboardingState {
            has_seen_onboarding: true,
        })
        .map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), "Onboarding marked as seen");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingPage {
    pub title: &'static str,
    /// Only the last page carries the call-to-action.
    pub shows_call_to_action: bool,
}

pub const PAGES: [OnboardingPage; 3] = [
    OnboardingPage {
        title: "Find restaurant near you",
        shows_call_to_action: false,
    },
    OnboardingPage {
        title: "Give quality reviews",
        shows_call_to_action: false,
    },
    OnboardingPage {
        title: "Be an influencer!",
        shows_call_to_action: true,
    },
];

/// Pager over [`PAGES`].
pub struct OnboardingFlow<S: OnboardingStore> {
    store: S,
    index: usize,
    finished: bool,
}

impl<S: OnboardingStore> OnboardingFlow<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            index: 0,
            finished: false,
        }
    }

    pub fn current(&self) -> Option<&'static OnboardingPage> {
        if self.finished {
            None
        } else {
            PAGES.get(self.index)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one page; on the last page this finishes the flow.
    pub async fn next(&mut self) -> Option<&'static OnboardingPage> {
        if self.finished {
            return None;
        }
        if self.index + 1 < PAGES.len() {
            self.index += 1;
            return self.current();
        }
        self.finish().await;
        None
    }

    pub async fn skip(&mut self) {
        if !self.finished {
            self.finish().await;
        }
    }

    async fn finish(&mut self) {
        self.finished = true;
        if let Err(e) = self.store.mark_seen().await {
            warn!(error = %e, "Failed to persist onboarding state");
        }
    }
}
