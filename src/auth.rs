use crate::envelope::Envelope;
use crate::error::MockError;
use crate::latency::after;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const MOCK_ACCESS_TOKEN: &str = "mock-token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: CompactString,
    pub email: CompactString,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: SessionUser,
    pub access_token: CompactString,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpData {
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInData {
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub session: Option<Session>,
}

/// Holder of the single simulated session. One store per client instance;
/// tests that need shared or inspectable auth state inject their own.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.current.lock().clone()
    }

    pub fn replace(&self, session: Session) {
        let mut current = self.current.lock();
        if current.is_some() {
            debug!("replacing existing mock session");
        }
        *current = Some(session);
    }

    pub fn clear(&self) {
        *self.current.lock() = None;
    }
}

/// The simulated authentication surface. Sign-in always succeeds and the
/// password is accepted but never stored or checked: this is a development
/// stand-in, not a security mechanism.
#[derive(Debug, Clone)]
pub struct AuthMock {
    sessions: Arc<SessionStore>,
    latency: Duration,
}

impl AuthMock {
    pub fn new(sessions: Arc<SessionStore>, latency: Duration) -> Self {
        Self { sessions, latency }
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn sign_up(
        &self,
        credentials: Credentials,
    ) -> Result<Envelope<SignUpData>, MockError> {
        let user = self.start_session(&credentials.email);
        Ok(after(Envelope::ok(SignUpData { user }), self.latency).await)
    }

    pub async fn sign_in_with_password(
        &self,
        credentials: Credentials,
    ) -> Result<Envelope<SignInData>, MockError> {
        self.start_session(&credentials.email);
        let session = self.sessions.current().expect("session was just created");
        Ok(after(Envelope::ok(SignInData { session }), self.latency).await)
    }

    pub async fn sign_out(&self) -> Result<Envelope<()>, MockError> {
        self.sessions.clear();
        Ok(after(Envelope::ok(()), self.latency).await)
    }

    pub async fn get_user(&self) -> Result<Envelope<UserData>, MockError> {
        let user = self.sessions.current().map(|session| session.user);
        Ok(after(Envelope::ok(UserData { user }), self.latency).await)
    }

    pub async fn get_session(&self) -> Result<Envelope<SessionData>, MockError> {
        let session = self.sessions.current();
        Ok(after(Envelope::ok(SessionData { session }), self.latency).await)
    }

    fn start_session(&self, email: &str) -> SessionUser {
        let now = Utc::now();
        let user = SessionUser {
            id: format!("mock_{}", now.timestamp_millis()).into(),
            email: email.into(),
            started_at: now,
        };
        self.sessions.replace(Session {
            user: user.clone(),
            access_token: MOCK_ACCESS_TOKEN.into(),
        });
        user
    }
}
