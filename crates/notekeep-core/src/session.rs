//! Session gate
//!
//! A two-state login machine. Any credentials are accepted: the gate only
//! decides whether the note operations are offered, it protects nothing.
//! Nothing here is persisted.

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn { email: String },
}

#[derive(Debug, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    /// Email of the current session, if logged in
    pub fn email(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { email } => Some(email),
            SessionState::LoggedOut => None,
        }
    }

    /// Always succeeds; the password is neither checked nor kept
    pub fn login(&mut self, email: &str, _password: &str) -> &SessionState {
        self.state = SessionState::LoggedIn {
            email: email.to_string(),
        };
        info!("Session started");
        &self.state
    }

    /// Always succeeds and forgets the session email
    pub fn logout(&mut self) -> &SessionState {
        self.state = SessionState::LoggedOut;
        info!("Session ended");
        &self.state
    }
}
