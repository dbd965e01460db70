//! Admin sessions: the role-based permission predicate and signed session
//! tokens. A session is an explicit value handed to callers; nothing here
//! reads ambient process state.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Recruiter,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Edit,
    Delete,
    View,
}

impl Role {
    /// Administrators do everything, recruiters everything but delete,
    /// viewers only look.
    pub fn allows(&self, action: Action) -> bool {
        match self {
            Role::Administrator => true,
            Role::Recruiter => action != Action::Delete,
            Role::Viewer => action == Action::View,
        }
    }
}

/// An authenticated back-office user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AdminSession {
    pub fn can(&self, action: Action) -> bool {
        self.role.allows(action)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    name: String,
    role: Role,
    exp: usize,
}

/// Signs a session token valid for `ttl_hours`.
pub fn issue_token(session: &AdminSession, secret: &str, ttl_hours: i64) -> Result<String> {
    let exp = (crate::utils::time::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: session.id,
        email: session.email.clone(),
        name: session.name.clone(),
        role: session.role,
        exp,
    };
    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies signature and expiry, returning the embedded session.
pub fn verify_token(token: &str, secret: &str) -> Result<AdminSession> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(AdminSession {
        id: data.claims.sub,
        email: data.claims.email,
        name: data.claims.name,
        role: data.claims.role,
    })
}
