/*
[INPUT]:  HTTP client configuration and backend endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod auth;
pub mod client;
pub mod dex;
pub mod error;
pub mod pools;

pub use auth::AuthBackend;
pub use client::{ClientConfig, DexClient};
pub use error::{DexError, Result};
