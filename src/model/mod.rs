//! Pure data structures (DTOs): backend payloads, the normalized
//! [`CollectionEntity`](crate::framework::CollectionEntity) types, and the user profile.

pub mod profile;
pub mod restaurant;

pub use profile::*;
pub use restaurant::*;
