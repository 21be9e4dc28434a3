//! Errors returned by the container and the named services.

use crate::service_type::ServiceKey;
use thiserror::Error;

/// An error returned by a constructor of a service.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to register a service with the container.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{key} is already registered")]
    AlreadyRegistered { key: ServiceKey },
}

/// Failure to resolve a service from the container.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{key} is not registered")]
    NotRegistered { key: ServiceKey },

    #[error("failed to construct {key}: {source}")]
    Construction {
        key: ServiceKey,
        #[source]
        source: BoxError,
    },

    #[error("the container returned an instance of another type for {key}")]
    UnexpectedInstance { key: ServiceKey },

    #[error("the container of {key} has been dropped")]
    ContainerDropped { key: ServiceKey },
}

/// Failure to register or resolve a named service.
#[derive(Debug, Error)]
pub enum NamedServiceError {
    #[error("provided implementation {implementation} does not implement {abstraction}")]
    InvalidImplementation {
        implementation: &'static str,
        abstraction: &'static str,
    },

    #[error("service name '{name}' is already registered for {abstraction}")]
    DuplicateName {
        name: String,
        abstraction: &'static str,
    },

    #[error("service name '{name}' is not registered")]
    UnregisteredName { name: String },

    #[error("service '{name}' resolved to an instance that is not a {expected}")]
    UnexpectedInstance {
        name: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl NamedServiceError {
    /// The offending name, if the error is about a name.
    pub fn name(&self) -> Option<&str> {
        match self {
            NamedServiceError::DuplicateName { name, .. }
            | NamedServiceError::UnregisteredName { name }
            | NamedServiceError::UnexpectedInstance { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_name_message() {
        let err = NamedServiceError::UnregisteredName {
            name: "triangle".into(),
        };
        assert_eq!(err.to_string(), "service name 'triangle' is not registered");
        assert_eq!(err.name(), Some("triangle"));
    }

    #[test]
    fn resolve_error_is_transparent() {
        let err: NamedServiceError = ResolveError::NotRegistered {
            key: ServiceKey::of::<u32>(),
        }
        .into();
        assert_eq!(err.to_string(), "u32 is not registered");
        assert!(err.name().is_none());
    }
}
