//! API Module
//!
//! HTTP handlers and routing for serving a JSON file cache over REST.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key`, `GET /has/:key`, `POST /touch/:key`
//! - `DELETE /del/:key`, `DELETE /clear`
//! - `POST /get_multiple`, `PUT /set_multiple`, `POST /del_multiple`
//! - `GET /info`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
