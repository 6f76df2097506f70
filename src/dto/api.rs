//! Payload shapes for the JSON API endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters accepted by the ticket list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TicketsQuery {
    /// Free-form search applied to subject, name and token.
    pub q: Option<String>,
    /// Status filter; `All` or one of the enumerated statuses.
    pub status: Option<String>,
}

/// Query parameters accepted by the client list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ClientsQuery {
    /// Free-form search applied to email and name.
    pub q: Option<String>,
}

/// Body of a ticket status update.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Body accepted by the ticket-submission endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct TicketSubmission {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub priority: String,
}

/// Body accepted by the attachment-append endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct AttachmentUpload {
    #[validate(length(min = 1))]
    pub filename: String,
    #[validate(range(min = 0))]
    pub size: i64,
    #[validate(length(min = 1))]
    pub reference: String,
}

/// Result of a cascading client deletion.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: usize,
}

/// Non-2xx response body displayable by the operator UI.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}
