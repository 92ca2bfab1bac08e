//! Sign-in state of the browser and the operations that move it.

use std::{cell::RefCell, fmt, rc::Rc};

use tracing::{instrument, Level};

use crate::{
    error::Result,
    http::ApiClient,
    models::{Credentials, NewUser, UserProfile},
    session::{Session, DEMO_TOKEN_PREFIX},
};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(UserProfile),
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated(_) => "authenticated",
        }
    }
}

type Listener = Rc<dyn Fn(AuthState)>;

/// Drives [`AuthState`] through login, registration, refresh and logout,
/// keeping the stored session in step.
pub struct AuthController {
    client: ApiClient,
    demo_fallback: bool,
    state: RefCell<AuthState>,
    listener: RefCell<Option<Listener>>,
}

impl fmt::Debug for AuthController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthController")
            .field("demo_fallback", &self.demo_fallback)
            .field("state", &self.state.borrow())
            .finish()
    }
}

impl AuthController {
    pub fn new(client: ApiClient, demo_fallback: bool) -> Self {
        Self {
            client,
            demo_fallback,
            state: RefCell::new(AuthState::Anonymous),
            listener: RefCell::new(None),
        }
    }

    /// Called with the new state after every transition.
    pub fn on_change(&self, listener: impl Fn(AuthState) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    #[cfg(test)]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    fn transition(&self, next: AuthState) {
        tracing::event!(Level::DEBUG, state = next.name(), "auth state changed");
        *self.state.borrow_mut() = next.clone();
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(next);
        }
    }

    fn authenticated(&self, profile: UserProfile) -> UserProfile {
        self.transition(AuthState::Authenticated(profile.clone()));
        profile
    }

    /// Pick up a session stored by an earlier visit.
    ///
    /// A session whose profile can no longer be fetched is discarded.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<UserProfile> {
        let Some(session) = self.client.sessions().load() else {
            self.transition(AuthState::Anonymous);
            return None;
        };

        if session.is_demo() && self.demo_fallback {
            return Some(self.authenticated(demo_profile(&session, "", "")));
        }

        self.transition(AuthState::Authenticating);
        let fetched = self.client.auth().profile(&session.user_id).await;
        if !self.still_signed_in_as(&session) {
            return None;
        }
        match fetched {
            Ok(profile) => Some(self.authenticated(profile)),
            Err(error) => {
                tracing::event!(Level::WARN, %error, "failed to load stored user");
                self.client.sessions().clear();
                self.transition(AuthState::Anonymous);
                None
            }
        }
    }

    /// False once the session a request was made for has been replaced or
    /// cleared, e.g. by a logout while the request was in flight.
    fn still_signed_in_as(&self, session: &Session) -> bool {
        let current = self.client.sessions().load();
        if current.as_ref() == Some(session) {
            return true;
        }
        tracing::event!(Level::DEBUG, "session changed during request, dropping the response");
        false
    }

    /// # Errors
    ///
    /// Any [`ApiError`](crate::error::ApiError) from the login or profile calls. With demo mode on,
    /// network errors are replaced by a local demo user instead.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        self.transition(AuthState::Authenticating);

        match self.sign_in(credentials).await {
            Ok(profile) => Ok(self.authenticated(profile)),
            Err(error) if error.is_network() && self.demo_fallback => {
                tracing::event!(Level::WARN, %error, "backend unreachable, signing in as a demo user");
                Ok(self.demo_sign_in(&credentials.email, "Demo", "User"))
            }
            Err(error) => {
                self.client.sessions().clear();
                self.transition(AuthState::Anonymous);
                Err(error)
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<UserProfile> {
        let auth = self.client.auth();
        let session = auth.login(credentials).await?;
        self.client.sessions().save(&session);
        auth.profile(&session.user_id).await
    }

    /// Create the user, then log straight in with the same credentials.
    ///
    /// # Errors
    ///
    /// As [`AuthController::login`], plus rejections of the sign-up itself.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<UserProfile> {
        self.transition(AuthState::Authenticating);

        match self.client.auth().register(user).await {
            Ok(_) => self.login(&user.credentials()).await,
            Err(error) if error.is_network() && self.demo_fallback => {
                tracing::event!(Level::WARN, %error, "backend unreachable, registering a demo user");
                Ok(self.demo_sign_in(&user.email, &user.first_name, &user.last_name))
            }
            Err(error) => {
                self.transition(AuthState::Anonymous);
                Err(error)
            }
        }
    }

    fn demo_sign_in(&self, email: &str, first_name: &str, last_name: &str) -> UserProfile {
        let stamp = now_millis();
        let session = Session {
            token: format!("{DEMO_TOKEN_PREFIX}{stamp}"),
            user_id: format!("demo-{stamp}"),
        };
        self.client.sessions().save(&session);

        let mut profile = demo_profile(&session, first_name, last_name);
        if !email.is_empty() {
            profile.email = email.to_string();
        }
        self.authenticated(profile)
    }

    pub fn logout(&self) {
        self.client.sessions().clear();
        self.transition(AuthState::Anonymous);
        tracing::event!(Level::INFO, "logged out");
    }

    /// Re-read the profile of the stored user, e.g. after a balance changed.
    ///
    /// Returns `Ok(None)` when nobody is signed in, or nobody is any more by
    /// the time the profile arrives. A failed fetch leaves the current state
    /// alone.
    #[instrument(skip(self))]
    pub async fn refresh_user(&self) -> Result<Option<UserProfile>> {
        let Some(session) = self.client.sessions().load() else {
            return Ok(None);
        };
        if session.is_demo() {
            return Ok(self.current_user());
        }

        let profile = self.client.auth().profile(&session.user_id).await?;
        if !self.still_signed_in_as(&session) {
            return Ok(None);
        }
        Ok(Some(self.authenticated(profile)))
    }
}

fn demo_profile(session: &Session, first_name: &str, last_name: &str) -> UserProfile {
    let name = |value: &str, fallback: &str| {
        if value.trim().is_empty() {
            fallback.to_string()
        } else {
            value.trim().to_string()
        }
    };

    UserProfile {
        user_id: session.user_id.clone(),
        first_name: name(first_name, "Demo"),
        last_name: name(last_name, "User"),
        email: "demo@xbank.ru".to_string(),
        birthdate: String::new(),
        accounts: Vec::new(),
    }
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
