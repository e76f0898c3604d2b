//! # Ragline Gateway
//!
//! The HTTP surface of the backend: JSON framing, CORS, and the
//! error-to-status mapping around the retrieval core. Handlers never
//! terminate the process; every failure becomes a JSON error response.

pub mod routes;
pub mod server;

pub use server::{AppState, RetrievalEngine, build_router, start};
