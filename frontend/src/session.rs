//! The locally stored credentials of a signed-in browser.

use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::storage::Storage;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_ID_KEY: &str = "user_id";
/// Where the old bundle kept a whole serialized user.
pub const LEGACY_USER_KEY: &str = "xbank_user";

pub const DEMO_TOKEN_PREFIX: &str = "demo-token-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn is_demo(&self) -> bool {
        self.token.starts_with(DEMO_TOKEN_PREFIX)
    }
}

#[derive(Deserialize)]
struct LegacyUser {
    id: serde_json::Value,
    #[serde(default)]
    token: String,
}

impl LegacyUser {
    fn into_session(self) -> Option<Session> {
        let user_id = match self.id {
            serde_json::Value::String(id) => id,
            serde_json::Value::Number(id) => id.to_string(),
            _ => return None,
        };
        (!self.token.is_empty() && !user_id.is_empty()).then_some(Session {
            token: self.token,
            user_id,
        })
    }
}

/// Reads and writes the [`Session`] in a [`Storage`].
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn Storage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn item(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|value| !value.is_empty())
    }

    fn legacy(&self) -> Option<Session> {
        let raw = self.item(LEGACY_USER_KEY)?;
        serde_json::from_str::<LegacyUser>(&raw)
            .ok()
            .and_then(LegacyUser::into_session)
    }

    /// The bearer token to send, if any.
    ///
    /// A token may exist without a user id while a login is half-way done.
    pub fn token(&self) -> Option<String> {
        self.item(TOKEN_KEY)
            .or_else(|| self.legacy().map(|session| session.token))
    }

    pub fn load(&self) -> Option<Session> {
        match (self.item(TOKEN_KEY), self.item(USER_ID_KEY)) {
            (Some(token), Some(user_id)) => Some(Session { token, user_id }),
            _ => self.legacy(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    pub fn save(&self, session: &Session) {
        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(USER_ID_KEY, &session.user_id);
    }

    pub fn save_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_ID_KEY);
        self.storage.remove(LEGACY_USER_KEY);
    }
}
