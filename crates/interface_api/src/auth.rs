//! Authentication and authorization
//!
//! Tokens carry role names; what a role may do is decided here, at the
//! request boundary, and never inside the claim engine.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Roles this crate recognises; unknown names are ignored
    pub fn known_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().filter_map(|r| r.parse().ok())
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.known_roles().any(|role| capability.granted_to(role))
    }

    /// Fails with `AuthError::MissingPermission` unless a role grants `capability`
    pub fn require(&self, capability: Capability) -> Result<(), AuthError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AuthError::MissingPermission(capability))
        }
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(Capability),
}

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Lecturer,
    Coordinator,
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Lecturer => "Lecturer",
            Role::Coordinator => "Coordinator",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Role::Lecturer, Role::Coordinator, Role::Manager, Role::Hr]
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(AuthError::InvalidToken)
    }
}

/// Operations guarded by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Submit a claim with a supporting document
    SubmitClaim,
    /// See the pending queue, approve, reject and delete claims
    ReviewClaims,
    /// See claims and their status
    TrackClaims,
    /// See approved claims and the payment report
    ViewApproved,
    /// Maintain lecturer records
    ManageLecturers,
}

impl Capability {
    pub fn granted_to(&self, role: Role) -> bool {
        match self {
            Capability::SubmitClaim => role == Role::Lecturer,
            Capability::ReviewClaims => matches!(role, Role::Coordinator | Role::Manager),
            Capability::TrackClaims => true,
            Capability::ViewApproved | Capability::ManageLecturers => role == Role::Hr,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::SubmitClaim => "claims:submit",
            Capability::ReviewClaims => "claims:review",
            Capability::TrackClaims => "claims:track",
            Capability::ViewApproved => "claims:approved",
            Capability::ManageLecturers => "lecturers:manage",
        };
        f.write_str(name)
    }
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}
