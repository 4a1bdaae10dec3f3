use crate::backend::{AuthBackend, TokenSupplier};
use crate::error::ClientError;
use crate::state::validators;
use fintrack_api::endpoints::user::UserDetails;
use fintrack_auth::{KeyValueStore, TOKEN_KEY};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const SIGNUP_SUCCESS: &str = "Signup successful!";
pub const PASSWORD_CHANGED: &str = "Password changed successfully";
pub const NAME_CHANGED: &str = "Name changed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Whether a login should survive a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RememberMe {
    Remember,
    Forget,
}

/// The signed-in user, if any. Authenticated exactly when a token is held.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    fn with_token(token: String) -> Self {
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Read-only view of the session handed to list controllers and views.
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Session>,
}

impl SessionHandle {
    pub fn session(&self) -> Session {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Wait for the next session transition. Returns `false` once the
    /// manager is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl TokenSupplier for SessionHandle {
    fn token(&self) -> Option<String> {
        self.rx.borrow().token.clone()
    }
}

/// Owns the authentication state and its durable copy.
///
/// Every transition persists first and publishes second, so a storage
/// failure leaves the in-memory session untouched.
pub struct SessionManager<A, S> {
    backend: Arc<A>,
    store: S,
    session: watch::Sender<Session>,
    started: AtomicBool,
}

impl<A: AuthBackend, S: KeyValueStore> SessionManager<A, S> {
    pub fn new(backend: Arc<A>, store: S) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            backend,
            store,
            session,
            started: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.session.subscribe(),
        }
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    /// Pick up a remembered token at startup. Only valid as the very first
    /// transition.
    pub async fn restore(&self) -> Result<SessionState, ClientError> {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::warn!("Ignoring session restore after startup");
            return Err(ClientError::validation("Session has already been started."));
        }

        match self.store.get(TOKEN_KEY).await? {
            Some(token) if !token.is_empty() => {
                tracing::info!("Restored saved session");
                self.publish(Session::with_token(token));
            }
            _ => tracing::info!("No saved session"),
        }
        Ok(self.state())
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: RememberMe,
    ) -> Result<String, ClientError> {
        validators::require_fields(&[email, password])?;

        tracing::info!("Logging in");
        let grant = self
            .backend
            .login(email.trim(), password)
            .await
            .inspect_err(|e| tracing::warn!("Login failed: {}", e))?;

        match remember {
            RememberMe::Remember => self.store.set(TOKEN_KEY, &grant.token).await?,
            RememberMe::Forget => self.store.remove(TOKEN_KEY).await?,
        }

        self.started.store(true, Ordering::Release);
        self.publish(Session::with_token(grant.token));
        tracing::info!("Logged in (remember={:?})", remember);
        Ok(message_or(grant.message, LOGIN_SUCCESS))
    }

    /// Register and sign in. New accounts are always remembered.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        validators::require_fields(&[name, email, password])?;

        tracing::info!("Signing up");
        let grant = self
            .backend
            .register(name.trim(), email.trim(), password)
            .await
            .inspect_err(|e| tracing::warn!("Signup failed: {}", e))?;

        self.store.set(TOKEN_KEY, &grant.token).await?;

        self.started.store(true, Ordering::Release);
        self.publish(Session::with_token(grant.token));
        tracing::info!("Signed up");
        Ok(message_or(grant.message, SIGNUP_SUCCESS))
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Err(e) = self.store.remove(TOKEN_KEY).await {
            tracing::error!("Failed to clear saved session: {}", e);
            return Err(e.into());
        }

        self.started.store(true, Ordering::Release);
        self.publish(Session::default());
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ClientError> {
        validators::password_change(old_password, new_password)?;
        let token = self.token()?;

        let message = self
            .backend
            .change_password(&token, old_password, new_password)
            .await
            .inspect_err(|e| tracing::warn!("Password change failed: {}", e))?;
        tracing::info!("Password changed");
        Ok(message_or(message, PASSWORD_CHANGED))
    }

    pub async fn change_name(&self, current: &str, new_name: &str) -> Result<String, ClientError> {
        validators::name_change(current, new_name)?;
        let token = self.token()?;

        let message = self
            .backend
            .edit_name(&token, new_name.trim())
            .await
            .inspect_err(|e| tracing::warn!("Name change failed: {}", e))?;
        tracing::info!("Name changed");
        Ok(message_or(message, NAME_CHANGED))
    }

    pub async fn user_details(&self) -> Result<UserDetails, ClientError> {
        let token = self.token()?;
        self.backend
            .user_details(&token)
            .await
            .inspect_err(|e| tracing::error!("Failed to load user details: {}", e))
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .borrow()
            .token
            .clone()
            .ok_or_else(ClientError::not_logged_in)
    }

    fn publish(&self, session: Session) {
        self.session.send_replace(session);
    }
}

fn message_or(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
