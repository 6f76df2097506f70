use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, TicketId, TypeConstraintError};

/// Workflow state of a ticket.
///
/// The transition graph is deliberately unrestricted: any status may follow
/// any other, so closed tickets can be reopened.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Closed,
    ];
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "Open"),
            TicketStatus::InProgress => write!(f, "In Progress"),
            TicketStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(TicketStatus::Open),
            "In Progress" => Ok(TicketStatus::InProgress),
            "Closed" => Ok(TicketStatus::Closed),
            other => Err(TypeConstraintError::InvalidStatus(other.to_string())),
        }
    }
}

/// Urgency assigned by the submitter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl Display for TicketPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "Low"),
            TicketPriority::Medium => write!(f, "Medium"),
            TicketPriority::High => write!(f, "High"),
        }
    }
}

impl FromStr for TicketPriority {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(TicketPriority::Low),
            "Medium" => Ok(TicketPriority::Medium),
            "High" => Ok(TicketPriority::High),
            other => Err(TypeConstraintError::InvalidPriority(other.to_string())),
        }
    }
}

/// Status predicate applied by the ticket list views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TicketStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// File reference attached to a ticket.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub size: i64,
    pub reference: String,
}

/// A single support request record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    /// Human-facing sequential display number.
    pub token: i32,
    pub subject: String,
    pub name: String,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Assigned at creation, never mutated afterwards.
    pub created_at: NaiveDateTime,
    pub attachments: Vec<Attachment>,
}

/// Data accepted from the ticket-submission flow.
///
/// Identifier, token, initial status and creation timestamp are assigned by
/// the store, not by the submitter.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTicket {
    pub subject: String,
    pub name: String,
    pub email: ClientEmail,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub priority: TicketPriority,
}

impl NewTicket {
    pub fn new(
        subject: String,
        name: String,
        email: ClientEmail,
        phone: Option<String>,
        description: Option<String>,
        priority: TicketPriority,
    ) -> Result<Self, TypeConstraintError> {
        let subject = subject.trim().to_string();
        if subject.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        Ok(Self {
            subject,
            name: name.trim().to_string(),
            email,
            phone: phone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            priority,
        })
    }
}

/// Attachment data to append to an existing ticket.
#[derive(Clone, Debug, Deserialize)]
pub struct NewAttachment {
    pub filename: String,
    pub size: i64,
    pub reference: String,
}

impl NewAttachment {
    pub fn new(
        filename: String,
        size: i64,
        reference: String,
    ) -> Result<Self, TypeConstraintError> {
        let filename = filename.trim().to_string();
        if filename.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        Ok(Self {
            filename,
            size,
            reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_and_display_roundtrip() {
        for status in TicketStatus::ALL {
            assert_eq!(status.to_string().parse::<TicketStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "Resolved".parse::<TicketStatus>(),
            Err(TypeConstraintError::InvalidStatus("Resolved".to_string()))
        );
    }

    #[test]
    fn status_filter_accepts_all_and_single_status() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "In Progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(TicketStatus::InProgress)
        );
        assert!("Done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn status_filter_matches() {
        assert!(StatusFilter::All.matches(TicketStatus::Closed));
        assert!(StatusFilter::Only(TicketStatus::Open).matches(TicketStatus::Open));
        assert!(!StatusFilter::Only(TicketStatus::Open).matches(TicketStatus::Closed));
    }

    #[test]
    fn new_ticket_requires_subject() {
        let email = ClientEmail::new("alice@example.com").unwrap();
        let err = NewTicket::new(
            "   ".to_string(),
            "Alice".to_string(),
            email,
            None,
            None,
            TicketPriority::Low,
        );
        assert_eq!(err.unwrap_err(), TypeConstraintError::EmptyString);
    }

    #[test]
    fn new_ticket_drops_blank_optionals() {
        let email = ClientEmail::new("alice@example.com").unwrap();
        let ticket = NewTicket::new(
            "Cannot login".to_string(),
            "Alice".to_string(),
            email,
            Some("  ".to_string()),
            Some("details".to_string()),
            TicketPriority::High,
        )
        .unwrap();
        assert_eq!(ticket.phone, None);
        assert_eq!(ticket.description, Some("details".to_string()));
    }
}
