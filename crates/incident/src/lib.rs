//! Incident crate: client for the chamados (incident tracking) REST backend.

/// Async trait over the backend operations
pub mod api;
/// HTTP client
pub mod client;
/// Client error type
pub mod error;
/// Request and response payloads
pub mod models;
/// UI priority labels and their backend codes
pub mod priority;

pub use api::IncidentApi;
pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use models::{
    Author, Comment, Incident, IncidentFilter, IncidentPatch, NewIncident, RecordId, Reporter,
    Technician,
};
pub use priority::{Priority, map_priority_to_backend};
