//! Types shared between the storage, aggregation and HTTP layers of the
//! school service.
//!
//! - `model`: persisted entities and the drafts used to create them.
//! - `requests`: payloads and query strings accepted by the API.
//! - `responses`: composed bodies returned by the API.

pub mod model;
pub mod requests;
pub mod responses;
