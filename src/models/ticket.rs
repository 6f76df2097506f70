use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ticket::{Attachment as DomainAttachment, Ticket as DomainTicket};
use crate::domain::types::{ClientEmail, TicketId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tickets)]
/// Diesel model for [`crate::domain::ticket::Ticket`].
pub struct Ticket {
    pub id: String,
    pub token: i32,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::ticket_attachments)]
#[diesel(belongs_to(Ticket, foreign_key = ticket_id))]
#[diesel(primary_key(ticket_id, position))]
/// Diesel model for one attachment row; `position` keeps the list ordered.
pub struct TicketAttachment {
    pub ticket_id: String,
    pub position: i32,
    pub filename: String,
    pub size: i64,
    pub reference: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tickets)]
/// Insertable form of [`Ticket`].
pub struct NewTicket<'a> {
    pub id: String,
    pub token: i32,
    pub subject: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub description: Option<&'a str>,
    pub priority: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ticket_attachments)]
/// Insertable form of [`TicketAttachment`].
pub struct NewTicketAttachment<'a> {
    pub ticket_id: &'a str,
    pub position: i32,
    pub filename: &'a str,
    pub size: i64,
    pub reference: &'a str,
}

impl From<TicketAttachment> for DomainAttachment {
    fn from(attachment: TicketAttachment) -> Self {
        Self {
            filename: attachment.filename,
            size: attachment.size,
            reference: attachment.reference,
        }
    }
}

impl TryFrom<(Ticket, Vec<TicketAttachment>)> for DomainTicket {
    type Error = TypeConstraintError;

    fn try_from(
        (ticket, attachments): (Ticket, Vec<TicketAttachment>),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TicketId::parse(&ticket.id)?,
            token: ticket.token,
            subject: ticket.subject,
            name: ticket.name,
            email: ClientEmail::new(ticket.email)?,
            phone: ticket.phone,
            description: ticket.description,
            priority: ticket.priority.parse()?,
            status: ticket.status.parse()?,
            created_at: ticket.created_at,
            attachments: attachments.into_iter().map(Into::into).collect(),
        })
    }
}
