//! # YumpDum
//!
//! > **Restaurant discovery on top of a remote REST API.**
//!
//! The app's screens (home listing, map, restaurant detail) all follow one pattern: fetch a
//! collection, normalize it, let the user narrow it down with a search box or a cuisine
//! chip, render the result. This crate implements that pattern once as a generic
//! **Remote Collection View-Model** and instantiates it for restaurants.
//!
//! ## Core Concepts
//!
//! ### One actor per screen
//! Each view-model is a `ViewModelActor<T: CollectionEntity>` running in its own Tokio
//! task. Requests (`initialize`, `retry`, `set_query`, `set_category`) and fetch
//! completions are handled one at a time, so the state needs no locks.
//!
//! ### Latest fetch wins
//! Fetches run as spawned tasks tagged with a sequence number. A completion that is not
//! from the most recently issued fetch is dropped, so overlapping retries can never
//! leave the screen showing older data.
//!
//! ### Fail closed at the boundary
//! Raw backend records go through the normalizer before anything is stored. A record
//! missing a required field puts the view-model in `Error` with a user-facing message;
//! the cause is logged, never shown.
//!
//! ### Explicit session
//! The signed-in [`Session`](session::Session) is handed to
//! [`AppSystem::start`](lifecycle::AppSystem::start) and from there to the HTTP client.
//!
//! ## Module Tour
//!
//! - [`framework`] - generic actor, client, filter engine, fetch state and mocks
//! - [`model`] - backend wire shapes and normalized entities
//! - [`restaurant_actor`] - the restaurant normalizer and per-screen options
//! - [`clients`] - `reqwest` API client, collection sources and typed screen clients
//! - [`lifecycle`] - [`AppSystem`](lifecycle::AppSystem) orchestration and tracing setup
//! - [`session`], [`profile`], [`onboarding`] - auth form flow, profile editing, first-launch pager
//! - [`config`] - environment configuration
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --search pizza
//! RUST_LOG=info cargo run -- --category Italian --detail 3
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod onboarding;
pub mod profile;
pub mod restaurant_actor;
pub mod session;
