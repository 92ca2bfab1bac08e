//! What every page needs from the application shell.

use std::{fmt, rc::Rc};

use yew::prelude::*;

use crate::{
    auth::{AuthController, AuthState},
    config::Config,
    http::{ApiClient, Transport},
    models::UserProfile,
    notify::{NoticeAction, NoticeKind, NoticeQueue},
    storage::Storage,
};

/// Long-lived objects created once per page load.
pub struct Services {
    pub config: Config,
    pub client: ApiClient,
    pub auth: Rc<AuthController>,
}

impl Services {
    pub fn new(config: Config, transport: Rc<dyn Transport>, storage: Rc<dyn Storage>) -> Self {
        let client = ApiClient::new(&config, transport, storage);
        let auth = Rc::new(AuthController::new(client.clone(), config.demo_fallback));
        Self {
            config,
            client,
            auth,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("client", &self.client)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Pushes notices onto the shared queue.
#[derive(Clone, PartialEq)]
pub struct Notifier(UseReducerHandle<NoticeQueue>);

impl Notifier {
    pub fn new(queue: UseReducerHandle<NoticeQueue>) -> Self {
        Self(queue)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.0
            .dispatch(NoticeAction::Push(NoticeKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.0
            .dispatch(NoticeAction::Push(NoticeKind::Error, message.into()));
    }

    pub fn dismiss(&self, id: u32) {
        self.0.dispatch(NoticeAction::Dismiss(id));
    }

    pub fn clear(&self) {
        self.0.dispatch(NoticeAction::Clear);
    }

    pub fn queue(&self) -> &NoticeQueue {
        &self.0
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub services: Rc<Services>,
    pub auth_state: AuthState,
    pub notifier: Notifier,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.services, &other.services)
            && self.auth_state == other.auth_state
            && self.notifier == other.notifier
    }
}

impl AppContext {
    pub fn client(&self) -> &ApiClient {
        &self.services.client
    }

    pub fn auth(&self) -> Rc<AuthController> {
        self.services.auth.clone()
    }

    pub fn config(&self) -> &Config {
        &self.services.config
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.auth_state.user()
    }
}

/// # Panics
///
/// Outside the [`App`](crate::app::App) tree.
#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("component rendered outside of App")
}
