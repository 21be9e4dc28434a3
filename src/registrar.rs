//! Registration capability of the service container.

use crate::errors::{BoxError, RegistrationError};
use crate::resolver::SharedResolver;
use crate::service_type::{AnyService, ServiceKey};
use std::sync::Arc;

/// A type-erased constructor of a service.
///
/// Receives the resolver of the container the service is resolved from, so
/// it can resolve its dependencies or keep the resolver around.
pub type Constructor =
    Arc<dyn Fn(&SharedResolver) -> Result<AnyService, BoxError> + Send + Sync>;

/// How long an instance lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Constructed once, the container keeps and hands out the same instance.
    Shared,
    /// Constructed each time it is resolved.
    Local,
}

/// Used to register constructors with a container.
pub trait IRegistrar {
    /// Registers a constructor under `key`.
    ///
    /// Fails if `key` is already registered.
    fn register(
        &mut self,
        key: ServiceKey,
        lifetime: Lifetime,
        ctor: Constructor,
    ) -> Result<(), RegistrationError>;
}
