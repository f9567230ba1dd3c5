//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); view-model logs carry an
//! `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **View-model lifecycle**: start, every fetch issued (with its sequence number), shutdown
//! - **Fetch outcomes**: success size, stale responses dropped, failures with `kind` and cause
//! - **HTTP calls**: one span per `RestaurantApiClient` method
//! - **Local state**: onboarding flag reads and writes, identity provider failures
//!
//! ```bash
//! RUST_LOG=info cargo run -- --search pizza
//! RUST_LOG=debug cargo run -- --detail 3
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Starting base_url=https://yumpdum-backend.vercel.app/ signed_in=false
//! INFO View-model started entity_type="Restaurant" source=GET /api/restaurants
//! INFO Fetch issued entity_type="Restaurant" seq=1
//! INFO Loaded entity_type="Restaurant" seq=1 count=12
//! ```
//!
//! A failing backend shows the cause once, at `warn`, while the screen only gets the
//! user-facing message:
//!
//! ```text
//! WARN fetch: Fetch failed entity_type="Restaurant" seq=1 kind="http_status" error=...
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type replaces the module path
        .compact()
        .init();
}
