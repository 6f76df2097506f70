//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::ticket::{NewAttachment, NewTicket, Ticket, TicketStatus};
use crate::domain::types::{ClientEmail, TicketId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{TicketReader, TicketWriter};

mock! {
    pub Repository {}

    impl TicketReader for Repository {
        fn get_ticket_by_id(&self, id: &TicketId) -> RepositoryResult<Option<Ticket>>;
        fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>>;
        fn list_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<Vec<Ticket>>;
    }

    impl TicketWriter for Repository {
        fn create_tickets(&self, new_tickets: &[NewTicket]) -> RepositoryResult<usize>;
        fn set_ticket_status(&self, id: &TicketId, status: TicketStatus) -> RepositoryResult<Ticket>;
        fn append_attachment(
            &self,
            id: &TicketId,
            attachment: &NewAttachment,
        ) -> RepositoryResult<Ticket>;
        fn delete_ticket(&self, id: &TicketId) -> RepositoryResult<()>;
        fn delete_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<usize>;
    }
}
