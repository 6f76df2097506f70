//! Authenticated operator claims carried by the bearer token.

use serde::{Deserialize, Serialize};

/// Claims decoded from the bearer JWT presented on every request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

/// Returns `true` when the given role is present in the role list.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}
