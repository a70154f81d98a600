//! Incident payloads exchanged with the chamados backend.
//!
//! Field names on the wire follow the backend (`titulo`, `descricao`, ...). The
//! client never validates these values; they are decoded and re-encoded as-is.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use url::form_urlencoded;

use crate::priority::Priority;

/// Identifier that the backend may send either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Number(u64),
    /// Textual identifier.
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<&Self> for RecordId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

/// A tracked support ticket (chamado).
///
/// Missing or `null` fields decode to their defaults.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    /// Identifier
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: RecordId,
    /// Title
    #[serde(rename = "titulo")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub title: String,
    /// Free-text description
    #[serde(rename = "descricao")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub description: String,
    /// Human-facing ticket code
    #[serde(rename = "codigo")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub code: String,
    /// Backend status value
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub status: String,
    /// Backend priority code (e.g. `ALTA`)
    #[serde(rename = "prioridade")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub priority: String,
    /// Creation timestamp as sent by the backend
    #[serde(rename = "dataCriacao")]
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the backend
    #[serde(rename = "dataAtualizacao")]
    pub updated_at: Option<String>,
    /// Closing timestamp as sent by the backend
    #[serde(rename = "dataFechamento")]
    pub closed_at: Option<String>,
    /// Comments, oldest first
    #[serde(rename = "comentarios")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub comments: Vec<Comment>,
    /// User who opened the incident
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
    /// Assigned technician
    #[serde(rename = "tecnico", skip_serializing_if = "Option::is_none")]
    pub technician: Option<Technician>,
}

/// A comment on an incident.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    /// Comment body
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub text: String,
    /// Author of the comment
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub created_by: Author,
    /// Creation timestamp as sent by the backend
    pub created_at: Option<String>,
}

/// Reference to a comment author.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    /// Author identifier
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: RecordId,
    /// Display name
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
}

/// User who reported an incident.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reporter {
    /// User identifier
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    /// Display name
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    /// Department, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Technician assigned to an incident.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Technician {
    /// Technician identifier
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    /// Display name
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
}

/// Input for opening a new incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Department the incident belongs to
    pub department: String,
    /// Priority, mapped to its backend code on the wire
    pub priority: Priority,
    /// Id of the reporting user
    pub user_id: u64,
}

impl NewIncident {
    pub(crate) fn to_body(&self) -> CreateIncidentBody<'_> {
        CreateIncidentBody {
            titulo: &self.title,
            descricao: &self.description,
            departamento: &self.department,
            prioridade: self.priority,
            usuario: UserRef { id: self.user_id },
        }
    }
}

/// Wire body of `POST /chamados`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateIncidentBody<'a> {
    titulo: &'a str,
    descricao: &'a str,
    departamento: &'a str,
    prioridade: Priority,
    usuario: UserRef,
}

#[derive(Debug, Serialize)]
struct UserRef {
    id: u64,
}

/// Partial incident for `PUT /chamados/{id}`.
///
/// Only fields set to `Some` are sent, under the same names the backend uses in
/// [`Incident`]. Values are forwarded verbatim; `priority` in particular is not
/// mapped and must already be a backend code if the backend expects one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncidentPatch {
    /// Title
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ticket code
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority
    #[serde(rename = "prioridade", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Creation timestamp
    #[serde(rename = "dataCriacao", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Update timestamp
    #[serde(rename = "dataAtualizacao", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Closing timestamp
    #[serde(rename = "dataFechamento", skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
    /// Full comment list
    #[serde(rename = "comentarios", skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    /// Reporting user
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
    /// Assigned technician
    #[serde(rename = "tecnico", skip_serializing_if = "Option::is_none")]
    pub technician: Option<Technician>,
}

/// Criteria for `GET /chamados/filtrar`. Unset criteria are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    /// Backend status value
    pub status: Option<String>,
    /// Priority, sent as its backend code
    pub priority: Option<Priority>,
    /// Department name
    pub department: Option<String>,
}

impl IncidentFilter {
    /// Encode the set criteria as `status`, `prioridade`, `departamento` pairs.
    /// Returns an empty string when nothing is set.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(status) = &self.status {
            query.append_pair("status", status);
        }
        if let Some(priority) = self.priority {
            query.append_pair("prioridade", priority.backend_code());
        }
        if let Some(department) = &self.department {
            query.append_pair("departamento", department);
        }
        query.finish()
    }
}
