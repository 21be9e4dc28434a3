//! Fluent builders for named registrations of the same abstraction.

use super::factory::DynNamedServiceFactory;
use super::registry::{NameBuilderSettings, NameRegistry};
use crate::errors::{BoxError, NamedServiceError, RegistrationError};
use crate::implementation::{upcast_erased, IImplements, Implementation, ImplementationType};
use crate::registrar::{Constructor, IRegistrar, Lifetime};
use crate::resolver::SharedResolver;
use crate::service_type::{AnyService, ServiceKey, ServiceType};
use log::debug;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

///////////////////////////////////////////////////////////////////////////////
// Type-Erased Builder
///////////////////////////////////////////////////////////////////////////////

/// Builds named registrations for an abstraction that is only known at
/// runtime.
///
/// Every implementation is checked against the abstraction when it is added.
/// Use [`NamedServicesBuilder`] if the abstraction is known at compile time.
pub struct DynNamedServicesBuilder<'r, R: ?Sized> {
    registrar: &'r mut R,
    registry: NameRegistry,
}

impl<'r, R: ?Sized + IRegistrar> DynNamedServicesBuilder<'r, R> {
    /// Creates a builder that will install its factory into `registrar`.
    pub fn new(
        registrar: &'r mut R,
        abstraction: ServiceType,
        settings: NameBuilderSettings,
    ) -> Self {
        Self {
            registrar,
            registry: NameRegistry::new(abstraction, settings),
        }
    }

    /// The abstraction the names are registered for.
    pub fn abstraction(&self) -> ServiceType {
        self.registry.abstraction()
    }

    /// Maps `name` to an implementation of the abstraction.
    ///
    /// The implementation also has to be registered with the container, so
    /// the factory is able to resolve it. That is only checked when the name
    /// is resolved.
    pub fn add<T>(&mut self, name: &str, implementation: T) -> Result<&mut Self, NamedServiceError>
    where
        T: Into<ImplementationType>,
    {
        let implementation = implementation.into();
        let abstraction = self.registry.abstraction();
        let upcast = implementation.upcast_to(abstraction).ok_or(
            NamedServiceError::InvalidImplementation {
                implementation: implementation.service_type().name(),
                abstraction: abstraction.name(),
            },
        )?;

        self.registry
            .insert(name, implementation.service_type(), upcast)?;
        debug!(
            "Named '{}' -> {} for {}",
            name,
            implementation.service_type(),
            abstraction
        );
        Ok(self)
    }

    /// Installs the named factory of the abstraction into the registrar.
    ///
    /// The registrations are frozen from here on. The factory itself is only
    /// constructed when it is resolved from the container.
    pub fn build(self) -> Result<(), RegistrationError> {
        let registry = Arc::new(self.registry);
        let key = ServiceKey::NamedFactory(registry.abstraction());
        debug!("Installing {} with {} name(s)", key, registry.len());

        let ctor: Constructor = Arc::new(
            move |resolver: &SharedResolver| -> Result<AnyService, BoxError> {
                let factory = DynNamedServiceFactory::new(resolver.clone(), registry.clone());
                Ok(Arc::new(factory))
            },
        );
        self.registrar.register(key, Lifetime::Local, ctor)
    }
}

impl<R: ?Sized> fmt::Debug for DynNamedServicesBuilder<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynNamedServicesBuilder")
            .field("registry", &self.registry)
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Strongly-Typed Builder
///////////////////////////////////////////////////////////////////////////////

/// Builds named registrations for the abstraction `S`.
///
/// Implementations are checked at compile time through [`IImplements`].
pub struct NamedServicesBuilder<'r, S: ?Sized, R: ?Sized> {
    inner: DynNamedServicesBuilder<'r, R>,
    _marker: PhantomData<fn() -> Arc<S>>,
}

impl<'r, S, R> NamedServicesBuilder<'r, S, R>
where
    S: ?Sized + Send + Sync + 'static,
    R: ?Sized + IRegistrar,
{
    /// Creates a builder that will install its factory into `registrar`.
    pub fn new(registrar: &'r mut R, settings: NameBuilderSettings) -> Self {
        Self {
            inner: DynNamedServicesBuilder::new(registrar, ServiceType::of::<S>(), settings),
            _marker: PhantomData,
        }
    }

    /// Maps `name` to the implementation `I`.
    pub fn add<I: IImplements<S>>(&mut self, name: &str) -> Result<&mut Self, NamedServiceError> {
        self.insert::<I>(name)
    }

    /// Maps `name` to the implementation described by `implementation`.
    pub fn add_type<I: IImplements<S>>(
        &mut self,
        name: &str,
        _implementation: Implementation<I>,
    ) -> Result<&mut Self, NamedServiceError> {
        self.insert::<I>(name)
    }

    fn insert<I: IImplements<S>>(&mut self, name: &str) -> Result<&mut Self, NamedServiceError> {
        self.inner
            .registry
            .insert(name, ServiceType::of::<I>(), upcast_erased::<I, S>)?;
        debug!(
            "Named '{}' -> {} for {}",
            name,
            std::any::type_name::<I>(),
            std::any::type_name::<S>()
        );
        Ok(self)
    }

    /// Installs `NamedServiceFactory<S>` into the registrar.
    pub fn build(self) -> Result<(), RegistrationError> {
        self.inner.build()
    }
}

impl<S: ?Sized, R: ?Sized> fmt::Debug for NamedServicesBuilder<'_, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedServicesBuilder")
            .field("registry", &self.inner.registry)
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
