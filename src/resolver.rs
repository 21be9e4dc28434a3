//! Resolver capability of the service container.

use crate::errors::ResolveError;
use crate::named::{DynNamedServiceFactory, NamedServiceFactory};
use crate::service_type::{AnyService, ServiceKey, ServiceType};
use log::trace;
use std::sync::Arc;

/// Used to resolve services from a container.
///
/// This is the only thing the named factories need from a container, so any
/// container that implements it can back them.
pub trait IResolver: Send + Sync {
    /// Resolves the instance registered under `key`.
    ///
    /// For a key created from type `T`, the returned instance must be a `T`.
    fn resolve(&self, key: &ServiceKey) -> Result<AnyService, ResolveError>;
}

/// A resolver that can be stored, for example by a named factory.
pub type SharedResolver = Arc<dyn IResolver>;

impl<'a> dyn IResolver + 'a {
    /// Resolves a service by its type.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        let key = ServiceKey::of::<T>();
        self.resolve(&key)?
            .downcast::<T>()
            .map_err(|_| ResolveError::UnexpectedInstance { key })
    }

    /// Resolves the named factory of abstraction `S`.
    pub fn named<S>(&self) -> Result<NamedServiceFactory<S>, ResolveError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::named_factory::<S>();
        let factory = self.named_dyn(ServiceType::of::<S>())?;
        NamedServiceFactory::from_dyn(factory).ok_or(ResolveError::UnexpectedInstance { key })
    }

    /// Resolves the named factory of an abstraction that is only known at
    /// runtime.
    pub fn named_dyn(&self, abstraction: ServiceType) -> Result<DynNamedServiceFactory, ResolveError> {
        trace!("Resolving named factory of {}", abstraction);
        let key = ServiceKey::NamedFactory(abstraction);
        let factory = self
            .resolve(&key)?
            .downcast::<DynNamedServiceFactory>()
            .map_err(|_| ResolveError::UnexpectedInstance { key })?;
        Ok(DynNamedServiceFactory::clone(&factory))
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
