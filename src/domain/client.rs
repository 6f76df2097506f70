use serde::Serialize;

use crate::domain::types::ClientEmail;

/// Derived view of a requesting client.
///
/// Clients have no storage of their own: a summary exists exactly as long as
/// at least one ticket carries its email. It is recomputed from the ticket
/// collection on every read and must never be cached across ticket mutations.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub email: ClientEmail,
    /// Taken from the first-encountered ticket of the group.
    pub name: String,
    /// Same derivation rule as `name`.
    pub phone: Option<String>,
    pub ticket_count: usize,
}
