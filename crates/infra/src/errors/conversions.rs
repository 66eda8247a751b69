//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use personadesk_domain::PersonaDeskError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PersonaDeskError);

impl From<InfraError> for PersonaDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PersonaDeskError> for InfraError {
    fn from(value: PersonaDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPersonaDeskError {
    fn into_domain(self) -> PersonaDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PersonaDeskError */
/* -------------------------------------------------------------------------- */

impl IntoPersonaDeskError for HttpError {
    fn into_domain(self) -> PersonaDeskError {
        if self.is_timeout() {
            return PersonaDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PersonaDeskError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_to_error(status, self.to_string());
        }

        PersonaDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_domain())
    }
}

/// Map a non-success HTTP status (plus a context message, typically the
/// response body) into the domain taxonomy.
pub fn status_to_error(status: StatusCode, context: String) -> PersonaDeskError {
    let code = status.as_u16();
    let message = if context.is_empty() {
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"))
    } else {
        format!(
            "HTTP {} {}: {}",
            code,
            status.canonical_reason().unwrap_or("unknown status"),
            context
        )
    };

    match code {
        401 | 403 => PersonaDeskError::Auth(message),
        404 => PersonaDeskError::NotFound(message),
        409 => PersonaDeskError::Persist(message),
        429 => PersonaDeskError::Network(message),
        400..=499 => PersonaDeskError::InvalidInput(message),
        _ => PersonaDeskError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → PersonaDeskError */
/* -------------------------------------------------------------------------- */

impl IntoPersonaDeskError for KeyringError {
    fn into_domain(self) -> PersonaDeskError {
        let description = self.to_string();

        match self {
            KeyringError::NoEntry => {
                PersonaDeskError::NotFound("keychain entry not found".into())
            }
            KeyringError::BadEncoding(_) => {
                PersonaDeskError::Security("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => PersonaDeskError::Security(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            KeyringError::Invalid(attr, reason) => PersonaDeskError::Security(format!(
                "keychain attribute '{attr}' is invalid: {reason}"
            )),
            KeyringError::PlatformFailure(err) => {
                PersonaDeskError::Security(format!("keychain platform error: {err}"))
            }
            KeyringError::NoStorageAccess(err) => {
                PersonaDeskError::Security(format!("unable to access secure storage: {err}"))
            }
            _ => PersonaDeskError::Security(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
