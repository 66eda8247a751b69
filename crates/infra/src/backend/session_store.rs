//! Keychain-backed session persistence
//!
//! The hosted platform's web SDK keeps its session in browser storage; the
//! desktop analog is the operating system keychain. Only the session JSON is
//! stored; the platform remains the authority on whether it is still valid.

use keyring::Entry;
use personadesk_domain::constants::{KEYCHAIN_SERVICE, KEYCHAIN_SESSION_ACCOUNT};
use personadesk_domain::{PersonaDeskError, Result, Session};

use crate::errors::InfraError;

/// Stores the current session in the OS keychain
pub struct SessionStore {
    service: String,
    account: String,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
            account: KEYCHAIN_SESSION_ACCOUNT.to_string(),
        }
    }

    /// Use a non-default service name (test isolation)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self { service: service.into(), account: KEYCHAIN_SESSION_ACCOUNT.to_string() }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account)
            .map_err(|err| PersonaDeskError::from(InfraError::from(err)))
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(json) => {
                let session: Session = serde_json::from_str(&json).map_err(|err| {
                    PersonaDeskError::Security(format!("stored session is not valid JSON: {err}"))
                })?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(PersonaDeskError::from(InfraError::from(err))),
        }
    }

    /// Persist the session, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session).map_err(|err| {
            PersonaDeskError::Internal(format!("failed to serialize session: {err}"))
        })?;
        self.entry()?
            .set_password(&json)
            .map_err(|err| PersonaDeskError::from(InfraError::from(err)))
    }

    /// Remove the persisted session; absent entries are not an error
    pub fn clear(&self) -> Result<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(PersonaDeskError::from(InfraError::from(err))),
        }
    }
}
