//! Factories that resolve services by name.

use super::registry::{NameRegistry, Registration};
use crate::errors::NamedServiceError;
use crate::resolver::SharedResolver;
use crate::service_type::{AnyService, ServiceKey, ServiceType};
use log::trace;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

///////////////////////////////////////////////////////////////////////////////
// Type-Erased Factory
///////////////////////////////////////////////////////////////////////////////

/// Resolves implementations of an abstraction by name, without knowing the
/// abstraction at compile time.
///
/// Every call resolves the implementation from the container again, so
/// whether the same instance is returned each time depends entirely on how
/// the implementation is registered with the container.
///
/// A factory resolved from a [`ServiceContainer`](crate::ServiceContainer)
/// does not keep the container alive. Once the container is dropped,
/// resolving fails with [`ResolveError::ContainerDropped`](crate::ResolveError::ContainerDropped).
#[derive(Clone)]
pub struct DynNamedServiceFactory {
    resolver: SharedResolver,
    registry: Arc<NameRegistry>,
}

impl DynNamedServiceFactory {
    pub(crate) fn new(resolver: SharedResolver, registry: Arc<NameRegistry>) -> Self {
        Self { resolver, registry }
    }

    /// The abstraction the names are registered for.
    pub fn abstraction(&self) -> ServiceType {
        self.registry.abstraction()
    }

    /// Resolves the implementation registered under `name`.
    ///
    /// Returns exactly what the container returns for the implementation
    /// type, which is an instance of the implementation itself.
    pub fn get_by_name(&self, name: &str) -> Result<AnyService, NamedServiceError> {
        self.lookup(name).map(|(_, instance)| instance)
    }

    /// Finds the registration of `name` and resolves its implementation.
    fn lookup(&self, name: &str) -> Result<(&Registration, AnyService), NamedServiceError> {
        trace!("Resolving '{}' for {}", name, self.registry.abstraction());
        let registration =
            self.registry
                .get(name)
                .ok_or_else(|| NamedServiceError::UnregisteredName {
                    name: name.to_owned(),
                })?;
        trace!("'{}' maps to {}", registration.name, registration.implementation);

        let instance = self
            .resolver
            .resolve(&ServiceKey::Service(registration.implementation))?;
        Ok((registration, instance))
    }
}

impl fmt::Debug for DynNamedServiceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynNamedServiceFactory")
            .field("registry", &self.registry)
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Strongly-Typed Factory
///////////////////////////////////////////////////////////////////////////////

/// Resolves implementations of the abstraction `S` by name.
pub struct NamedServiceFactory<S: ?Sized> {
    inner: DynNamedServiceFactory,
    _marker: PhantomData<fn() -> Arc<S>>,
}

impl<S: ?Sized + Send + Sync + 'static> NamedServiceFactory<S> {
    /// Wraps a type-erased factory if it resolves `S`.
    pub(crate) fn from_dyn(inner: DynNamedServiceFactory) -> Option<Self> {
        if inner.abstraction().is::<S>() {
            Some(Self {
                inner,
                _marker: PhantomData,
            })
        } else {
            None
        }
    }

    /// Resolves the implementation registered under `name`.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<S>, NamedServiceError> {
        let (registration, instance) = self.inner.lookup(name)?;
        let unexpected = || NamedServiceError::UnexpectedInstance {
            name: name.to_owned(),
            expected: type_name::<S>(),
        };

        let upcasted = (registration.upcast)(instance).ok_or_else(unexpected)?;
        let service = upcasted.downcast::<Arc<S>>().map_err(|_| unexpected())?;
        Ok(Arc::clone(&*service))
    }

    /// The type-erased form of this factory.
    pub fn as_dyn(&self) -> &DynNamedServiceFactory {
        &self.inner
    }

    /// Turns this factory into its type-erased form.
    pub fn into_dyn(self) -> DynNamedServiceFactory {
        self.inner
    }
}

impl<S: ?Sized> Clone for NamedServiceFactory<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S: ?Sized> fmt::Debug for NamedServiceFactory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedServiceFactory")
            .field("registry", &self.inner.registry)
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
