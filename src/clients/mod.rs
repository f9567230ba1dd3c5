//! Typed clients: the HTTP API client and screen-level wrappers around
//! [`ViewModelClient`](crate::framework::ViewModelClient).

pub mod handle;
pub mod http;
pub mod restaurant_client;

pub use handle::*;
pub use http::*;
pub use restaurant_client::*;
