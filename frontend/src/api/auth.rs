use tracing::{instrument, Level};

use crate::{
    error::{ApiError, Result},
    http::ApiClient,
    models::{AuthToken, Credentials, NewUser, UserProfile},
    session::Session,
};

/// Users: sign-up, sign-in and profiles.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a [`Session`].
    ///
    /// The login answer only carries a token, so the user id is looked up
    /// through the profile-by-email endpoint, authenticated with that token.
    /// The token is written to the session store on the way; persisting the
    /// full session is left to the caller.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let endpoints = self.client.endpoints();
        let AuthToken { token } = self
            .client
            .post::<_, AuthToken>(endpoints.login, credentials)
            .await?;

        if token.is_empty() {
            return Err(ApiError::Protocol(
                "No token received from the server".to_string(),
            ));
        }
        self.client.sessions().save_token(&token);

        let profile = self.profile_by_email(&credentials.email).await?;
        if profile.user_id.is_empty() {
            return Err(ApiError::Protocol(
                "No user id received from the server".to_string(),
            ));
        }

        tracing::event!(Level::INFO, user_id = %profile.user_id, "logged in");

        Ok(Session {
            token,
            user_id: profile.user_id,
        })
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<UserProfile> {
        self.client
            .post(self.client.endpoints().register, user)
            .await
    }

    pub async fn profile(&self, user_id: &str) -> Result<UserProfile> {
        let path = format!("{}/{}", self.client.endpoints().profile, user_id);
        self.client.get(&path).await
    }

    pub async fn profile_by_email(&self, email: &str) -> Result<UserProfile> {
        let path = format!("{}/{}", self.client.endpoints().profile_by_email, email);
        self.client.get(&path).await
    }
}
