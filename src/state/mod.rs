use crate::api::{ApiClient, EnvConfig};
use crate::models::{AuthResponse, AuthUser};
use crate::storage::LocalTokenStore;
use crate::telegram::HostSession;
use leptos::prelude::*;
use std::sync::Arc;

pub(crate) mod detail;
pub(crate) mod diagnostics;
pub(crate) mod favorites;
pub(crate) mod home;

pub(crate) use favorites::FavoriteIds;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("session is already authenticated")]
    AlreadyAuthenticated,
}

/// Who the backend thinks we are. Written once per app lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated {
        user: Option<AuthUser>,
        token: String,
    },
}

impl AuthState {
    /// The only transition: unauthenticated -> authenticated.
    /// The handshake may not carry a user record; the token alone authenticates.
    pub fn sign_in(&mut self, user: Option<AuthUser>, token: String) -> Result<(), SessionError> {
        match self {
            Self::Unauthenticated => {
                *self = Self::Authenticated { user, token };
                Ok(())
            }
            Self::Authenticated { .. } => Err(SessionError::AlreadyAuthenticated),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token.as_str()),
            Self::Unauthenticated => None,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Authenticated { user, .. } => user.as_ref(),
            Self::Unauthenticated => None,
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub api_client: ApiClient,
    pub host: &'static HostSession,
    pub auth: RwSignal<AuthState>,

    /// Single source of truth for every rendered `is_favorite`.
    pub favorites: RwSignal<FavoriteIds>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        let host = HostSession::detect();
        let api_client = ApiClient::new(config.api_url.clone(), Arc::new(LocalTokenStore))
            .with_init_data(host.init_data.clone());

        Self {
            config,
            api_client,
            host,
            auth: RwSignal::new(AuthState::default()),
            favorites: RwSignal::new(FavoriteIds::default()),
        }
    }

    pub fn complete_handshake(&self, response: AuthResponse) {
        let result = self
            .auth
            .try_update(|auth| auth.sign_in(response.user, response.access_token));
        if let Some(Err(e)) = result {
            log::warn!("ignoring repeated handshake: {e}");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
