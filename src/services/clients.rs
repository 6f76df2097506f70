use std::collections::HashMap;

use crate::domain::auth::{AuthenticatedUser, check_role};
use crate::domain::client::ClientSummary;
use crate::domain::ticket::Ticket;
use crate::domain::types::ClientEmail;
use crate::repository::{TicketReader, TicketWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Derives one [`ClientSummary`] per distinct email from the ticket
/// collection. Runs in O(n) over the ticket count; the first-encountered
/// ticket of each group supplies name and phone. Output is sorted by email
/// so responses stay stable across calls.
pub fn summarize_clients(tickets: &[Ticket]) -> Vec<ClientSummary> {
    let mut by_email: HashMap<&ClientEmail, ClientSummary> = HashMap::new();

    for ticket in tickets {
        by_email
            .entry(&ticket.email)
            .and_modify(|summary| summary.ticket_count += 1)
            .or_insert_with(|| ClientSummary {
                email: ticket.email.clone(),
                name: ticket.name.clone(),
                phone: ticket.phone.clone(),
                ticket_count: 1,
            });
    }

    let mut clients: Vec<ClientSummary> = by_email.into_values().collect();
    clients.sort_by(|a, b| a.email.as_str().cmp(b.email.as_str()));
    clients
}

/// Case-insensitive substring match over email and name. An empty query
/// returns the input unchanged.
pub fn search_clients(clients: Vec<ClientSummary>, query: &str) -> Vec<ClientSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return clients;
    }

    clients
        .into_iter()
        .filter(|client| {
            client.email.as_str().contains(&query) || client.name.to_lowercase().contains(&query)
        })
        .collect()
}

/// Lists the client directory, optionally narrowed by a search query.
pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &str,
) -> ServiceResult<Vec<ClientSummary>>
where
    R: TicketReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tickets = repo.list_tickets().map_err(ServiceError::from)?;
    Ok(search_clients(summarize_clients(&tickets), query))
}

/// Returns all tickets of one client; empty when the client has none (a
/// client without tickets is indistinguishable from one that never existed).
pub fn list_client_tickets<R>(
    repo: &R,
    user: &AuthenticatedUser,
    email: &str,
) -> ServiceResult<Vec<Ticket>>
where
    R: TicketReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let email = ClientEmail::new(email)?;
    repo.list_tickets_by_email(&email).map_err(ServiceError::from)
}

/// Removes every ticket owned by the given email as one atomic operation and
/// returns the number removed. Zero matches succeeds with count 0.
///
/// Any client summary materialized before this call is stale afterwards and
/// must be re-derived, never patched.
pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, email: &str) -> ServiceResult<usize>
where
    R: TicketWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let email = ClientEmail::new(email)?;
    repo.delete_tickets_by_email(&email)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{NewTicket, TicketPriority};
    use crate::repository::test::InMemoryTicketRepository;

    fn operator() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "op-1".to_string(),
            email: "operator@example.com".to_string(),
            name: "Operator".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string(), SERVICE_ADMIN_ROLE.to_string()],
            exp: usize::MAX,
        }
    }

    fn new_ticket(subject: &str, name: &str, email: &str, phone: Option<&str>) -> NewTicket {
        NewTicket::new(
            subject.to_string(),
            name.to_string(),
            ClientEmail::new(email).unwrap(),
            phone.map(str::to_string),
            None,
            TicketPriority::Medium,
        )
        .unwrap()
    }

    fn seeded_repo() -> InMemoryTicketRepository {
        let repo = InMemoryTicketRepository::new();
        repo.create_tickets(&[
            new_ticket(
                "Cannot login",
                "Alice Johnson",
                "alice@example.com",
                Some("+91 98765 43210"),
            ),
            new_ticket("Password reset", "Alice J.", "alice@example.com", None),
            new_ticket("Invoice not generated", "Rahul Mehta", "rahul@example.com", None),
        ])
        .unwrap();
        repo
    }

    #[test]
    fn one_summary_per_distinct_email_and_counts_sum_up() {
        let repo = seeded_repo();
        let tickets = repo.list_tickets().unwrap();
        let clients = summarize_clients(&tickets);

        assert_eq!(clients.len(), 2);
        let total: usize = clients.iter().map(|c| c.ticket_count).sum();
        assert_eq!(total, tickets.len());

        let alice = clients
            .iter()
            .find(|c| c.email.as_str() == "alice@example.com")
            .unwrap();
        assert_eq!(alice.ticket_count, 2);
        // First-encountered ticket of the group supplies name and phone.
        assert_eq!(alice.name, tickets.iter().find(|t| t.email == alice.email).unwrap().name);
    }

    #[test]
    fn empty_search_returns_input_unchanged() {
        let repo = seeded_repo();
        let tickets = repo.list_tickets().unwrap();
        let clients = summarize_clients(&tickets);
        assert_eq!(search_clients(clients.clone(), ""), clients);
        assert_eq!(search_clients(clients.clone(), "   "), clients);
    }

    #[test]
    fn search_matches_email_or_name_case_insensitively() {
        let repo = seeded_repo();
        let tickets = repo.list_tickets().unwrap();
        let clients = summarize_clients(&tickets);

        let by_email = search_clients(clients.clone(), "RAHUL@");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].email.as_str(), "rahul@example.com");

        let by_name = search_clients(clients, "mehta");
        assert_eq!(by_name.len(), 1);
    }

    #[test]
    fn cascading_delete_removes_all_client_tickets() {
        let repo = seeded_repo();
        let user = operator();

        let deleted = delete_client(&repo, &user, "alice@example.com").unwrap();
        assert_eq!(deleted, 2);

        let remaining = list_client_tickets(&repo, &user, "alice@example.com").unwrap();
        assert!(remaining.is_empty());

        let clients = list_clients(&repo, &user, "").unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].email.as_str(), "rahul@example.com");
    }

    #[test]
    fn deleting_a_client_without_tickets_is_a_noop_success() {
        let repo = seeded_repo();
        let user = operator();

        let deleted = delete_client(&repo, &user, "nobody@example.com").unwrap();
        assert_eq!(deleted, 0);
    }

    #[test]
    fn delete_requires_admin_role() {
        let repo = seeded_repo();
        let mut user = operator();
        user.roles = vec![SERVICE_ACCESS_ROLE.to_string()];

        let err = delete_client(&repo, &user, "alice@example.com").unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }
}
