/// Session and identity service.
/// Handles registration, login, logout, session expiry, and profile edits.
///
/// Tokens are opaque session handles, not credentials: anyone with access to the
/// store can read them. Passwords are stored as Argon2 hashes.

use crate::config::SessionConfig;
use crate::error::{BookingError, Result};
use crate::models::{generate_id, ProfileUpdate, User, UserProfile};
use crate::storage::{keys, LocalStore};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

type UserMap = BTreeMap<String, User>;

const MIN_PHONE_LEN: usize = 11;
const MIN_PASSWORD_LEN: usize = 6;
const MIN_ACCOUNT_LEN: usize = 3;

/// Result of a successful register or login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

pub struct AuthService {
    storage: Arc<LocalStore>,
    config: SessionConfig,
}

impl AuthService {
    pub fn new(storage: Arc<LocalStore>, config: SessionConfig) -> Self {
        AuthService { storage, config }
    }

    fn read_users(&self) -> Result<UserMap> {
        self.storage.read_json(keys::USERS)
    }

    fn write_users(&self, users: &UserMap) -> Result<()> {
        self.storage.write_json(keys::USERS, users)
    }

    fn start_session(&self, user_id: &str, ttl: Duration) -> Result<String> {
        let token = format!("t_{}", Uuid::new_v4().simple());
        let expires_at = Utc::now() + ttl;

        self.storage.set_item(keys::TOKEN, &token)?;
        self.storage.set_item(keys::CURRENT_USER_ID, user_id)?;
        self.storage
            .set_item(keys::TOKEN_EXPIRES_AT, &expires_at.timestamp_millis().to_string())?;
        Ok(token)
    }

    /// Create an account and log it in
    pub fn register(&self, name: &str, phone_number: &str, password: &str) -> Result<AuthSession> {
        let name = name.trim();
        let phone_number = phone_number.trim();
        validate_name(name)?;
        validate_phone(phone_number)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BookingError::Validation(format!("密码至少{}位", MIN_PASSWORD_LEN)));
        }

        let mut users = self.read_users()?;
        if users.values().any(|u| u.phone_number == phone_number) {
            return Err(BookingError::PhoneAlreadyRegistered);
        }

        let user = User::new(
            generate_id("u"),
            name.to_string(),
            phone_number.to_string(),
            hash_password(password)?,
        );
        users.insert(user.id.clone(), user.clone());
        self.write_users(&users)?;

        let token = self.start_session(&user.id, self.config.register_ttl)?;
        log::info!("Registered user {} ({})", user.id, user.name);

        Ok(AuthSession {
            token,
            user: user.profile(),
        })
    }

    /// Log in by phone number or name
    pub fn login(&self, account: &str, password: &str) -> Result<AuthSession> {
        let account = account.trim();
        if account.chars().count() < MIN_ACCOUNT_LEN {
            return Err(BookingError::Validation(format!("账号至少{}位", MIN_ACCOUNT_LEN)));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BookingError::Validation(format!("密码至少{}位", MIN_PASSWORD_LEN)));
        }

        let users = self.read_users()?;
        let mut found = None;
        for user in users.values() {
            if user.phone_number != account && user.name != account {
                continue;
            }
            match verify_password(password, &user.password_hash) {
                Ok(true) => {
                    found = Some(user);
                    break;
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("Skipping user {} with unreadable password hash: {}", user.id, e);
                    continue;
                }
            }
        }
        let user = found.ok_or(BookingError::InvalidCredentials)?;

        let token = self.start_session(&user.id, self.config.login_ttl)?;
        log::info!("User {} logged in", user.id);

        Ok(AuthSession {
            token,
            user: user.profile(),
        })
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.remove_item(keys::TOKEN)?;
        self.storage.remove_item(keys::CURRENT_USER_ID)?;
        self.storage.remove_item(keys::TOKEN_EXPIRES_AT)?;
        log::debug!("Session cleared");
        Ok(())
    }

    /// True while a token and an unexpired expiry are both stored.
    /// An expired session is cleared; a missing or unreadable expiry counts as logged out.
    pub fn is_logged_in(&self) -> Result<bool> {
        let token = self.storage.get_item(keys::TOKEN)?;
        let expires_at = self
            .storage
            .get_item(keys::TOKEN_EXPIRES_AT)?
            .and_then(|raw| raw.parse::<i64>().ok());

        let (Some(_), Some(expires_at)) = (token, expires_at) else {
            return Ok(false);
        };

        if Utc::now().timestamp_millis() > expires_at {
            log::warn!("Session expired; logging out");
            self.logout()?;
            return Ok(false);
        }
        Ok(true)
    }

    fn current_user_id(&self) -> Result<Option<String>> {
        if !self.is_logged_in()? {
            return Ok(None);
        }
        self.storage.get_item(keys::CURRENT_USER_ID)
    }

    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        let Some(id) = self.current_user_id()? else {
            return Ok(None);
        };
        Ok(self.read_users()?.get(&id).map(User::profile))
    }

    /// Run `edit` against the logged-in user's record and persist the result
    fn update_current<F>(&self, edit: F) -> Result<UserProfile>
    where
        F: FnOnce(&UserMap, &mut User) -> Result<()>,
    {
        let id = self.current_user_id()?.ok_or(BookingError::NotLoggedIn)?;
        let mut users = self.read_users()?;
        let mut user = users.get(&id).cloned().ok_or(BookingError::UserNotFound)?;

        edit(&users, &mut user)?;

        let profile = user.profile();
        users.insert(id, user);
        self.write_users(&users)?;
        Ok(profile)
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let update = ProfileUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            phone_number: update.phone_number.map(|p| p.trim().to_string()),
            identity_number: update.identity_number.map(|i| i.trim().to_string()),
        };
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(phone_number) = &update.phone_number {
            validate_phone(phone_number)?;
        }

        let profile = self.update_current(|users, user| {
            if let Some(phone_number) = &update.phone_number {
                let taken = users
                    .values()
                    .any(|other| other.id != user.id && &other.phone_number == phone_number);
                if taken {
                    return Err(BookingError::PhoneAlreadyRegistered);
                }
            }
            user.apply(update);
            Ok(())
        })?;

        log::info!("Updated profile for {}", profile.id);
        Ok(profile)
    }

    /// Mark the logged-in user as identity-verified
    pub fn verify_identity(&self) -> Result<UserProfile> {
        let profile = self.update_current(|_, user| {
            user.is_verified = true;
            Ok(())
        })?;

        log::info!("Verified identity for {}", profile.id);
        Ok(profile)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BookingError::Validation("姓名不能为空".to_string()));
    }
    Ok(())
}

fn validate_phone(phone_number: &str) -> Result<()> {
    if phone_number.chars().count() < MIN_PHONE_LEN {
        return Err(BookingError::Validation(format!("手机号至少{}位", MIN_PHONE_LEN)));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BookingError::PasswordHash(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| BookingError::PasswordHash(format!("Invalid password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(BookingError::PasswordHash(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
