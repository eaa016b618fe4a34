//! Lecturer record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::LecturerId;

/// Editable details of a lecturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LecturerDetails {
    /// Full name
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Contact email address
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Optional phone number
    pub contact_number: Option<String>,
}

impl LecturerDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            contact_number: None,
        }
    }

    pub fn with_contact_number(mut self, contact_number: impl Into<String>) -> Self {
        self.contact_number = Some(contact_number.into());
        self
    }

    /// Trims whitespace, lower-cases the email and drops a blank contact number
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_ascii_lowercase(),
            contact_number: self
                .contact_number
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

/// A stored lecturer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lecturer {
    pub fn new(details: LecturerDetails) -> Self {
        let now = Utc::now();
        Self {
            id: LecturerId::new_v7(),
            name: details.name,
            email: details.email,
            contact_number: details.contact_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable details
    pub fn apply(&mut self, details: LecturerDetails) {
        self.name = details.name;
        self.email = details.email;
        self.contact_number = details.contact_number;
        self.updated_at = Utc::now();
    }

    pub fn details(&self) -> LecturerDetails {
        LecturerDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            contact_number: self.contact_number.clone(),
        }
    }
}
