use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::ticket::TicketStatus;
use crate::dto::main::DashboardSummary;
use crate::repository::TicketReader;
use crate::services::{ServiceError, ServiceResult};
use crate::SERVICE_ACCESS_ROLE;

/// Computes the status rollup for the operator landing page.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardSummary>
where
    R: TicketReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tickets = repo.list_tickets().map_err(ServiceError::from)?;

    let mut summary = DashboardSummary {
        total: tickets.len(),
        open: 0,
        in_progress: 0,
        closed: 0,
    };
    for ticket in &tickets {
        match ticket.status {
            TicketStatus::Open => summary.open += 1,
            TicketStatus::InProgress => summary.in_progress += 1,
            TicketStatus::Closed => summary.closed += 1,
        }
    }

    Ok(summary)
}
