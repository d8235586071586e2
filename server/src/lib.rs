//! HTTP surface of the acetlisto item service.
//!
//! # Routes
//! - `GET /` redirects (307) to `/item/`
//! - `POST /items/` creates an item, 201
//! - `GET /items/` lists items, 200
//! - `GET /items/{id}`, `PUT /items/{id}`, `DELETE /items/{id}`, 200 or 404

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

use tokio::net::TcpListener;

pub use acetlisto_core::Item;
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorResponse};
pub use routes::{app, router, SharedStore, ROOT_REDIRECT_TARGET};
pub use server::{with_access_log, Server};

/// Serves a fresh store on an already-bound listener, with access logging.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, with_access_log(app())).await
}
