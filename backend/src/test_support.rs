//! Shared test doubles and fixtures for in-crate unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{IdentityService, SignupProfile, SignupRequest};
use crate::domain::{
    AccessToken, EmailAddress, IdentityServiceImpl, Password, Records, Role, UserId,
};
use crate::outbound::identity::MemoryIdentityProvider;
use crate::outbound::store::MemoryRecordStore;

/// Password used by every fixture account.
pub(crate) const TEST_PASSWORD: &str = "secret-pass";

/// Manually advanced clock so tests control record timestamps.
pub(crate) struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub(crate) fn advance_seconds(&self, seconds: i64) {
        let mut now = self.lock_clock();
        *now += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Deterministic starting instant shared by fixtures.
pub(crate) fn fixture_clock() -> Arc<MutableClock> {
    let start = DateTime::parse_from_rfc3339("2025-06-01T09:00:00Z")
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|error| panic!("fixture timestamp must parse: {error}"));
    Arc::new(MutableClock::new(start))
}

/// Full in-memory stack: provider, store, and the identity service used to
/// register fixture accounts.
pub(crate) struct Stack {
    pub(crate) provider: Arc<MemoryIdentityProvider>,
    pub(crate) store: Arc<MemoryRecordStore>,
    pub(crate) records: Records,
    pub(crate) clock: Arc<MutableClock>,
    pub(crate) identity: Arc<IdentityServiceImpl<MemoryIdentityProvider>>,
}

impl Stack {
    pub(crate) fn new() -> Self {
        let provider = Arc::new(MemoryIdentityProvider::new());
        let store = Arc::new(MemoryRecordStore::new());
        let records = Records::new(store.clone());
        let clock = fixture_clock();
        let identity = Arc::new(IdentityServiceImpl::new(
            provider.clone(),
            records.clone(),
            clock.clone(),
        ));
        Self {
            provider,
            store,
            records,
            clock,
            identity,
        }
    }

    /// Register an account and open a session for it.
    pub(crate) async fn signup(
        &self,
        email: &str,
        name: &str,
        role: Role,
    ) -> (UserId, AccessToken) {
        let request = SignupRequest {
            email: EmailAddress::new(email).expect("fixture email"),
            password: Password::new(TEST_PASSWORD).expect("fixture password"),
            name: name.to_owned(),
            role,
            profile: SignupProfile::default(),
        };
        let view = self.identity.signup(request).await.expect("fixture signup");
        let session = self
            .identity
            .signin(
                &EmailAddress::new(email).expect("fixture email"),
                &Password::new(TEST_PASSWORD).expect("fixture password"),
            )
            .await
            .expect("fixture signin");
        (view.account.id, session.access_token)
    }

    pub(crate) async fn signup_patient(&self, email: &str, name: &str) -> (UserId, AccessToken) {
        self.signup(email, name, Role::Patient).await
    }

    pub(crate) async fn signup_doctor(&self, email: &str, name: &str) -> (UserId, AccessToken) {
        self.signup(email, name, Role::Doctor).await
    }
}
