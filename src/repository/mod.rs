use crate::{
    domain::ticket::{NewAttachment, NewTicket, Ticket, TicketStatus},
    domain::types::{ClientEmail, TicketId},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod ticket;

#[cfg(feature = "test-mocks")]
pub mod mock;

/// Read-side operations of the ticket store.
pub trait TicketReader {
    fn get_ticket_by_id(&self, id: &TicketId) -> RepositoryResult<Option<Ticket>>;
    /// Returns all tickets, newest first.
    fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>>;
    /// Returns all tickets with an exact email match, empty when none.
    fn list_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<Vec<Ticket>>;
}

/// Write-side operations of the ticket store.
pub trait TicketWriter {
    /// Inserts the given tickets, assigning ids, sequential tokens and
    /// creation timestamps. Returns the number of rows created.
    fn create_tickets(&self, new_tickets: &[NewTicket]) -> RepositoryResult<usize>;
    /// Replaces the status of one ticket, leaving every other field
    /// untouched. Unknown ids yield [`errors::RepositoryError::NotFound`].
    fn set_ticket_status(&self, id: &TicketId, status: TicketStatus) -> RepositoryResult<Ticket>;
    /// Appends one attachment to the end of the ticket's attachment list.
    fn append_attachment(
        &self,
        id: &TicketId,
        attachment: &NewAttachment,
    ) -> RepositoryResult<Ticket>;
    /// Deletes one ticket. Deleting an absent id is an error, so a second
    /// delete of the same id reports [`errors::RepositoryError::NotFound`].
    fn delete_ticket(&self, id: &TicketId) -> RepositoryResult<()>;
    /// Deletes every ticket owned by the given email as one atomic
    /// operation and returns the number removed. Zero matches is a trivial
    /// success, not an error.
    fn delete_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<usize>;
}
