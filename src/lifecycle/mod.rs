//! # System Lifecycle & Orchestration
//!
//! Starts the view-models behind each screen, injects their dependencies and shuts them
//! down again.
//!
//! ## Wiring
//!
//! [`AppSystem::start`] receives the [`AppConfig`](crate::config::AppConfig) and an explicit
//! [`Session`](crate::session::Session). The session goes into the one
//! [`RestaurantApiClient`](crate::clients::RestaurantApiClient), which every source shares;
//! the map centre goes into the normalizer context handed to each actor's `run`:
//!
//! ```rust,ignore
//! let (listing_actor, listing) = restaurant_actor::new(list_source, listing_options(buffer));
//! let handle = tokio::spawn(listing_actor.run(MapContext { center, ..MapContext::default() }));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the request channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None` and the loop ends
//! 3. **Await completion** - every actor task is joined
//!
//! Fetch tasks still in flight are not awaited; their completions go nowhere.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes the subscriber; see the [`tracing`](self::tracing) module.

pub mod app_system;
pub mod tracing;

pub use app_system::*;
pub use self::tracing::setup_tracing;
