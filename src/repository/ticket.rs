use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::{DbConnection, DbPool},
    domain::ticket::{NewAttachment, NewTicket, Ticket, TicketStatus},
    domain::types::{ClientEmail, TicketId},
    repository::{
        TicketReader, TicketWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// First display number handed out by an empty store.
const FIRST_TOKEN: i32 = 1001;

/// Diesel implementation of [`TicketReader`] and [`TicketWriter`].
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(Into::into)
    }
}

/// Attaches the ordered attachment rows to their tickets and converts the
/// pairs into domain values.
fn with_attachments(
    conn: &mut diesel::sqlite::SqliteConnection,
    rows: Vec<crate::models::ticket::Ticket>,
) -> RepositoryResult<Vec<Ticket>> {
    use crate::models::ticket::TicketAttachment as DbAttachment;
    use crate::schema::ticket_attachments;

    let attachments = DbAttachment::belonging_to(&rows)
        .order(ticket_attachments::position.asc())
        .load::<DbAttachment>(conn)?
        .grouped_by(&rows);

    rows.into_iter()
        .zip(attachments)
        .map(|pair| Ticket::try_from(pair).map_err(Into::into))
        .collect()
}

impl TicketReader for DieselTicketRepository {
    fn get_ticket_by_id(&self, id: &TicketId) -> RepositoryResult<Option<Ticket>> {
        use crate::models::ticket::Ticket as DbTicket;
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let row = tickets::table
            .find(id.to_string())
            .first::<DbTicket>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(with_attachments(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        use crate::models::ticket::Ticket as DbTicket;
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let rows = tickets::table
            .order(tickets::created_at.desc())
            .load::<DbTicket>(&mut conn)?;

        with_attachments(&mut conn, rows)
    }

    fn list_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<Vec<Ticket>> {
        use crate::models::ticket::Ticket as DbTicket;
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let rows = tickets::table
            .filter(tickets::email.eq(email.as_str()))
            .order(tickets::token.asc())
            .load::<DbTicket>(&mut conn)?;

        with_attachments(&mut conn, rows)
    }
}

impl TicketWriter for DieselTicketRepository {
    fn create_tickets(&self, new_tickets: &[NewTicket]) -> RepositoryResult<usize> {
        use crate::models::ticket::NewTicket as DbNewTicket;
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let max_token: Option<i32> = tickets::table
                .select(diesel::dsl::max(tickets::token))
                .first(conn)?;
            let mut next_token = max_token.map_or(FIRST_TOKEN, |t| t + 1);

            let mut affected = 0;
            for ticket in new_tickets {
                let insertable = DbNewTicket {
                    id: TicketId::new().to_string(),
                    token: next_token,
                    subject: &ticket.subject,
                    name: &ticket.name,
                    email: ticket.email.as_str(),
                    phone: ticket.phone.as_deref(),
                    description: ticket.description.as_deref(),
                    priority: ticket.priority.to_string(),
                    status: TicketStatus::Open.to_string(),
                    created_at: Utc::now().naive_utc(),
                };
                affected += diesel::insert_into(tickets::table)
                    .values(&insertable)
                    .execute(conn)?;
                next_token += 1;
            }

            Ok(affected)
        })
    }

    fn set_ticket_status(&self, id: &TicketId, status: TicketStatus) -> RepositoryResult<Ticket> {
        use crate::models::ticket::Ticket as DbTicket;
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let updated = diesel::update(tickets::table.find(id.to_string()))
            .set(tickets::status.eq(status.to_string()))
            .get_result::<DbTicket>(&mut conn)?;

        with_attachments(&mut conn, vec![updated])?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    fn append_attachment(
        &self,
        id: &TicketId,
        attachment: &NewAttachment,
    ) -> RepositoryResult<Ticket> {
        use crate::models::ticket::{NewTicketAttachment as DbNewAttachment, Ticket as DbTicket};
        use crate::schema::{ticket_attachments, tickets};

        let mut conn = self.conn()?;
        conn.transaction::<Ticket, RepositoryError, _>(|conn| {
            let key = id.to_string();
            let row = tickets::table
                .find(&key)
                .first::<DbTicket>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let existing: i64 = ticket_attachments::table
                .filter(ticket_attachments::ticket_id.eq(&key))
                .count()
                .get_result(conn)?;

            let insertable = DbNewAttachment {
                ticket_id: &key,
                position: existing as i32,
                filename: &attachment.filename,
                size: attachment.size,
                reference: &attachment.reference,
            };
            diesel::insert_into(ticket_attachments::table)
                .values(&insertable)
                .execute(conn)?;

            with_attachments(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_ticket(&self, id: &TicketId) -> RepositoryResult<()> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(tickets::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn delete_tickets_by_email(&self, email: &ClientEmail) -> RepositoryResult<usize> {
        use crate::schema::tickets;

        // Single statement, so the cascade is all-or-nothing; attachment rows
        // go with their tickets via ON DELETE CASCADE.
        let mut conn = self.conn()?;
        let affected = diesel::delete(tickets::table.filter(tickets::email.eq(email.as_str())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
