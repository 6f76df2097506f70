use validator::Validate;

use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::ticket::{NewAttachment, NewTicket, StatusFilter, Ticket, TicketStatus};
use crate::domain::types::{ClientEmail, TicketId};
use crate::dto::api::{AttachmentUpload, StatusUpdate, TicketSubmission, TicketsQuery};
use crate::repository::{TicketReader, TicketWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Applies the text query and status predicate over the ticket collection.
///
/// Pure and side-effect free: with an empty query and the `All` filter the
/// input comes back unchanged, and filtering an already-filtered result with
/// the same parameters is a no-op.
pub fn filter_tickets(tickets: Vec<Ticket>, query: &str, status: &StatusFilter) -> Vec<Ticket> {
    let query = query.trim().to_lowercase();
    tickets
        .into_iter()
        .filter(|ticket| {
            status.matches(ticket.status) && (query.is_empty() || matches_query(ticket, &query))
        })
        .collect()
}

fn matches_query(ticket: &Ticket, query: &str) -> bool {
    ticket.subject.to_lowercase().contains(query)
        || ticket.name.to_lowercase().contains(query)
        || ticket.token.to_string().contains(query)
}

/// Lists tickets for the dashboard, narrowed by the optional query and
/// status filter.
pub fn list_tickets<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: TicketsQuery,
) -> ServiceResult<Vec<Ticket>>
where
    R: TicketReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status = match query.status.as_deref() {
        None | Some("") => StatusFilter::All,
        Some(s) => s.parse()?,
    };
    let tickets = repo.list_tickets().map_err(ServiceError::from)?;

    Ok(filter_tickets(
        tickets,
        query.q.as_deref().unwrap_or(""),
        &status,
    ))
}

/// Fetches a single ticket by its identifier.
pub fn get_ticket<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Ticket>
where
    R: TicketReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = TicketId::parse(id)?;
    repo.get_ticket_by_id(&id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Replaces the status of one ticket. Any status may follow any other.
pub fn set_ticket_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    update: StatusUpdate,
) -> ServiceResult<Ticket>
where
    R: TicketWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = TicketId::parse(id)?;
    let status: TicketStatus = update.status.parse()?;
    repo.set_ticket_status(&id, status).map_err(ServiceError::from)
}

/// Deletes one ticket. Destructive, so gated on the admin role.
pub fn delete_ticket<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: TicketWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = TicketId::parse(id)?;
    repo.delete_ticket(&id).map_err(ServiceError::from)
}

/// Validates a submission payload and creates the ticket.
pub fn submit_ticket<R>(
    repo: &R,
    user: &AuthenticatedUser,
    submission: TicketSubmission,
) -> ServiceResult<usize>
where
    R: TicketWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    submission
        .validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let new_ticket = NewTicket::new(
        submission.subject,
        submission.name,
        ClientEmail::new(submission.email)?,
        submission.phone,
        submission.description,
        submission.priority.parse()?,
    )?;

    repo.create_tickets(&[new_ticket]).map_err(ServiceError::from)
}

/// Appends an attachment to the end of the ticket's attachment list.
pub fn append_ticket_attachment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    upload: AttachmentUpload,
) -> ServiceResult<Ticket>
where
    R: TicketWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    upload
        .validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let id = TicketId::parse(id)?;
    let attachment = NewAttachment::new(upload.filename, upload.size, upload.reference)?;
    repo.append_attachment(&id, &attachment)
        .map_err(ServiceError::from)
}
