//! # Generic View-Model Actor
//!
//! This module defines the `ViewModelActor`, the component that owns a screen's canonical
//! collection and its filtered projection. It is the "Server" side of the actor model:
//! requests from clients and completions from fetch tasks are processed one at a time, so
//! the state needs no locks.

use crate::framework::client::ViewModelClient;
use crate::framework::entity::CollectionEntity;
use crate::framework::error::FetchError;
use crate::framework::filter::{filter, FilterPolicy};
use crate::framework::message::{FetchOutcome, ViewModelRequest};
use crate::framework::source::CollectionSource;
use crate::framework::state::{FetchState, ViewState};
use std::error::Error as _;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn, Instrument};

/// Construction options for a view-model.
#[derive(Debug, Clone)]
pub struct ViewModelOptions {
    /// Capacity of the request channel.
    pub buffer_size: usize,
    /// Message published in `FetchState::Error`.
    pub failure_message: String,
    pub filter: FilterPolicy,
}

impl Default for ViewModelOptions {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            failure_message: "Failed to load data".to_string(),
            filter: FilterPolicy::default(),
        }
    }
}

/// The generic actor that drives one remote collection through its fetch lifecycle.
///
/// # Ordering
/// Every fetch is tagged with a sequence number (`ViewState::generation`). Only the
/// completion carrying the latest number is applied; older ones are dropped, so when
/// fetches overlap the most recently *issued* one wins regardless of resolution order.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ViewModelActor::new(source, options)` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run(context)`; the context is handed to the normalizer.
/// 3.  **Use**: call `client.initialize()` and render from `client.subscribe()`.
///
/// The actor stops when every clone of its client has been dropped. Fetches still in
/// flight at that point finish in the background and their results are ignored.
pub struct ViewModelActor<T: CollectionEntity> {
    receiver: mpsc::Receiver<ViewModelRequest<T>>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome<T>>,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome<T>>,
    source: Arc<dyn CollectionSource<T>>,
    options: ViewModelOptions,
    publisher: watch::Sender<ViewState<T>>,
    view: ViewState<T>,
    entity_type: &'static str,
}

impl<T: CollectionEntity> ViewModelActor<T> {
    /// Creates a new `ViewModelActor` and its associated `ViewModelClient`.
    pub fn new(
        source: Arc<dyn CollectionSource<T>>,
        options: ViewModelOptions,
    ) -> (Self, ViewModelClient<T>) {
        let (sender, receiver) = mpsc::channel(options.buffer_size.max(1));
        let (outcomes_tx, outcomes) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(ViewState::default());
        // Just the type name ("Restaurant", not "yumpdum::model::restaurant::Restaurant")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        let actor = Self {
            receiver,
            outcomes_tx,
            outcomes,
            source,
            options,
            publisher,
            view: ViewState::default(),
            entity_type,
        };
        (actor, ViewModelClient::new(sender, state))
    }

    /// Runs the actor's event loop until the request channel closes.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, source = %self.source.describe(), "View-model started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(outcome) = self.outcomes.recv() => self.apply_outcome(outcome, &context),
            }
        }

        info!(
            entity_type,
            generation = self.view.generation,
            state = self.view.fetch.label(),
            "Shutdown"
        );
    }

    fn handle_request(&mut self, request: ViewModelRequest<T>) {
        let entity_type = self.entity_type;
        match request {
            ViewModelRequest::Initialize { respond_to } => {
                if matches!(self.view.fetch, FetchState::Idle) {
                    self.issue_fetch();
                } else {
                    debug!(entity_type, state = self.view.fetch.label(), "Already initialized");
                }
                let _ = respond_to.send(self.view.generation);
            }
            ViewModelRequest::Retry { respond_to } => {
                let seq = self.issue_fetch();
                let _ = respond_to.send(seq);
            }
            ViewModelRequest::SetQuery { text, respond_to } => {
                debug!(entity_type, text = %text, "SetQuery");
                self.view.query.text = text;
                self.refresh_projection();
                self.publish();
                let _ = respond_to.send(self.view.projection.clone());
            }
            ViewModelRequest::SetCategory { label, respond_to } => {
                debug!(entity_type, ?label, "SetCategory");
                self.view.query.category = label;
                self.refresh_projection();
                self.publish();
                let _ = respond_to.send(self.view.projection.clone());
            }
            ViewModelRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.view.clone());
            }
        }
    }

    fn issue_fetch(&mut self) -> u64 {
        self.view.generation += 1;
        let seq = self.view.generation;
        self.view.fetch = FetchState::Loading;
        self.view.projection.clear();
        self.publish();

        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes_tx.clone();
        let span = tracing::info_span!("fetch", entity_type = self.entity_type, seq);
        tokio::spawn(
            async move {
                let result = source.fetch().await;
                // Fails only once the actor has shut down.
                let _ = outcomes.send(FetchOutcome { seq, result });
            }
            .instrument(span),
        );

        info!(entity_type = self.entity_type, seq, "Fetch issued");
        seq
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome<T>, context: &T::Context) {
        let entity_type = self.entity_type;
        let seq = outcome.seq;
        if seq != self.view.generation {
            debug!(entity_type, seq, latest = self.view.generation, "Discarding stale response");
            self.view.stale_discarded += 1;
            self.publish();
            return;
        }

        let loaded = outcome
            .result
            .and_then(|raws| T::normalize_all(raws, context).map_err(FetchError::schema));
        match loaded {
            Ok(items) => {
                info!(entity_type, seq, count = items.len(), "Loaded");
                self.view.fetch = FetchState::Success(items);
            }
            Err(e) => {
                warn!(
                    entity_type,
                    seq,
                    kind = e.kind(),
                    error = %e,
                    cause = ?e.source(),
                    "Fetch failed"
                );
                self.view.fetch = FetchState::Error(self.options.failure_message.clone());
            }
        }
        self.refresh_projection();
        self.publish();
    }

    fn refresh_projection(&mut self) {
        self.view.projection = match &self.view.fetch {
            FetchState::Success(items) => filter(items, &self.view.query, &self.options.filter),
            _ => Vec::new(),
        };
    }

    fn publish(&self) {
        self.publisher.send_replace(self.view.clone());
    }
}
