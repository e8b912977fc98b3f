//! Data model for the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user identifier.
///
/// The backend is free to hand out numeric or string ids, so both decode
/// from the same wire field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single entry in the user directory.
///
/// Immutable once received. Identity key is `id`; collection order is
/// whatever the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
