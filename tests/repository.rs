use helpdesk_admin::domain::ticket::{NewAttachment, NewTicket, TicketPriority, TicketStatus};
use helpdesk_admin::domain::types::{ClientEmail, TicketId};
use helpdesk_admin::repository::errors::RepositoryError;
use helpdesk_admin::repository::ticket::DieselTicketRepository;
use helpdesk_admin::repository::{TicketReader, TicketWriter};

mod common;

fn new_ticket(subject: &str, name: &str, email: &str) -> NewTicket {
    NewTicket::new(
        subject.to_string(),
        name.to_string(),
        ClientEmail::new(email).unwrap(),
        Some("+91 98765 43210".to_string()),
        Some("details".to_string()),
        TicketPriority::Medium,
    )
    .unwrap()
}

#[test]
fn test_ticket_repository_crud() {
    let test_db = common::TestDb::new("test_ticket_repository_crud.db");
    let repo = DieselTicketRepository::new(test_db.pool().clone());

    let created = repo
        .create_tickets(&[
            new_ticket("Cannot login to portal", "Alice Johnson", "alice@example.com"),
            new_ticket("Invoice not generated", "Rahul Mehta", "rahul@example.com"),
        ])
        .unwrap();
    assert_eq!(created, 2);

    let mut tickets = repo.list_tickets().unwrap();
    assert_eq!(tickets.len(), 2);
    tickets.sort_by_key(|t| t.token);

    // Tokens are sequential display numbers starting above 1000.
    assert_eq!(tickets[0].token, 1001);
    assert_eq!(tickets[1].token, 1002);
    assert_eq!(tickets[0].status, TicketStatus::Open);

    let alice = tickets[0].clone();
    let fetched = repo.get_ticket_by_id(&alice.id).unwrap().unwrap();
    assert_eq!(fetched, alice);

    assert!(repo.get_ticket_by_id(&TicketId::new()).unwrap().is_none());
}

#[test]
fn test_set_status_replaces_only_the_status() {
    let test_db = common::TestDb::new("test_set_status.db");
    let repo = DieselTicketRepository::new(test_db.pool().clone());

    repo.create_tickets(&[new_ticket(
        "Cannot login to portal",
        "Alice Johnson",
        "alice@example.com",
    )])
    .unwrap();
    let before = repo.list_tickets().unwrap().remove(0);

    let after = repo
        .set_ticket_status(&before.id, TicketStatus::InProgress)
        .unwrap();
    assert_eq!(after.status, TicketStatus::InProgress);
    assert_eq!(after.subject, before.subject);
    assert_eq!(after.email, before.email);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.token, before.token);

    // Closed is not terminal; reopening is legal.
    repo.set_ticket_status(&before.id, TicketStatus::Closed)
        .unwrap();
    let reopened = repo
        .set_ticket_status(&before.id, TicketStatus::Open)
        .unwrap();
    assert_eq!(reopened.status, TicketStatus::Open);

    let err = repo
        .set_ticket_status(&TicketId::new(), TicketStatus::Closed)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_delete_ticket_is_not_idempotent() {
    let test_db = common::TestDb::new("test_delete_ticket.db");
    let repo = DieselTicketRepository::new(test_db.pool().clone());

    repo.create_tickets(&[new_ticket(
        "Cannot login to portal",
        "Alice Johnson",
        "alice@example.com",
    )])
    .unwrap();
    let ticket = repo.list_tickets().unwrap().remove(0);

    repo.delete_ticket(&ticket.id).unwrap();
    let err = repo.delete_ticket(&ticket.id).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_attachments_keep_append_order() {
    let test_db = common::TestDb::new("test_attachments.db");
    let repo = DieselTicketRepository::new(test_db.pool().clone());

    repo.create_tickets(&[new_ticket(
        "Cannot login to portal",
        "Alice Johnson",
        "alice@example.com",
    )])
    .unwrap();
    let ticket = repo.list_tickets().unwrap().remove(0);

    repo.append_attachment(
        &ticket.id,
        &NewAttachment::new("first.png".to_string(), 100, "uploads/first.png".to_string())
            .unwrap(),
    )
    .unwrap();
    let updated = repo
        .append_attachment(
            &ticket.id,
            &NewAttachment::new("second.png".to_string(), 200, "uploads/second.png".to_string())
                .unwrap(),
        )
        .unwrap();

    let filenames: Vec<&str> = updated
        .attachments
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    assert_eq!(filenames, vec!["first.png", "second.png"]);

    let err = repo
        .append_attachment(
            &TicketId::new(),
            &NewAttachment::new("x.png".to_string(), 1, "uploads/x.png".to_string()).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_cascading_delete_by_email() {
    let test_db = common::TestDb::new("test_cascading_delete.db");
    let repo = DieselTicketRepository::new(test_db.pool().clone());

    repo.create_tickets(&[
        new_ticket("Cannot login to portal", "Alice Johnson", "alice@example.com"),
        new_ticket("Password reset", "Alice Johnson", "alice@example.com"),
        new_ticket("Invoice not generated", "Rahul Mehta", "rahul@example.com"),
    ])
    .unwrap();

    let alice = ClientEmail::new("alice@example.com").unwrap();
    let alice_ticket = repo.list_tickets_by_email(&alice).unwrap().remove(0);
    repo.append_attachment(
        &alice_ticket.id,
        &NewAttachment::new("log.txt".to_string(), 64, "uploads/log.txt".to_string()).unwrap(),
    )
    .unwrap();

    let deleted = repo.delete_tickets_by_email(&alice).unwrap();
    assert_eq!(deleted, 2);

    assert!(repo.list_tickets_by_email(&alice).unwrap().is_empty());
    let remaining = repo.list_tickets().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email.as_str(), "rahul@example.com");

    // Client not found and client with no tickets are indistinguishable:
    // both succeed with count zero.
    assert_eq!(repo.delete_tickets_by_email(&alice).unwrap(), 0);
}
