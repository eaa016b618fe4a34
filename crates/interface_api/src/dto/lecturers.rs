//! Lecturer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::LecturerId;
use domain_lecturer::{Lecturer, LecturerDetails};

#[derive(Debug, Serialize, Deserialize)]
pub struct LecturerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl From<LecturerRequest> for LecturerDetails {
    fn from(request: LecturerRequest) -> Self {
        LecturerDetails {
            name: request.name,
            email: request.email,
            contact_number: request.contact_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LecturerResponse {
    pub id: LecturerId,
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lecturer> for LecturerResponse {
    fn from(lecturer: Lecturer) -> Self {
        Self {
            id: lecturer.id,
            name: lecturer.name,
            email: lecturer.email,
            contact_number: lecturer.contact_number,
            created_at: lecturer.created_at,
            updated_at: lecturer.updated_at,
        }
    }
}
