/// User model for the booking engine.
/// `User` is the stored record; `UserProfile` is what callers get back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub identity_number: String,
    pub is_verified: bool,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl User {
    pub fn new(id: String, name: String, phone_number: String, password_hash: String) -> Self {
        User {
            id,
            name,
            phone_number,
            identity_number: String::new(),
            is_verified: false,
            password_hash,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            identity_number: self.identity_number.clone(),
            is_verified: self.is_verified,
        }
    }

    /// Apply a partial profile edit; absent fields are left untouched
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(identity_number) = update.identity_number {
            self.identity_number = identity_number;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub identity_number: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub identity_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.identity_number.is_none()
    }
}
