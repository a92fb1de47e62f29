//! # School Service Module
//!
//! HTTP endpoints for schools under `/api/schools`. Each operation lives in
//! its own sub-module and delegates to `aggregation::SchoolService`, which is
//! registered as `web::Data` in `main.rs`.
//!
//! ## Sub-modules:
//! - `list`: streams every school, or those whose name contains `?name=`,
//!   each with its students.
//! - `create`: stores a new school from a `SchoolRequest`.
//! - `get`: returns one school with its students.
//! - `update`: replaces a school's name, address and email.
//! - `delete`: removes a school.
//! - `error`: maps service outcomes onto HTTP status codes.

mod create;
mod delete;
mod error;
mod get;
mod list;
mod update;


use actix_web::web::{delete, get, post, put, resource, scope};
use actix_web::Scope;

pub use error::ApiError;

/// The base path for all school-related API endpoints.
const API_PATH: &str = "/api/schools";

/// Configures and returns the Actix `Scope` for all school routes.
///
/// # Registered Routes:
///
/// *   **`GET /`** → `list::process`, a streamed JSON array (or NDJSON when
///     the client accepts `application/x-ndjson`) of `SchoolResponse`.
/// *   **`POST /`** → `create::process`, `201 Created` with the stored school.
/// *   **`GET /{id}`** → `get::process`, `404` if the school does not exist.
/// *   **`PUT /{id}`** → `update::process`, `404` if the school does not exist.
/// *   **`DELETE /{id}`** → `delete::process`, always `204 No Content`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("")
                .route(get().to(list::process))
                .route(post().to(create::process)),
        )
        .service(
            resource("/{id}")
                .route(get().to(get::process))
                .route(put().to(update::process))
                .route(delete().to(delete::process)),
        )
}
