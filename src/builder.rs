//! Create a container with the builder pattern.

use crate::container::{ServiceContainer, ServiceEntry};
use crate::errors::{BoxError, RegistrationError};
use crate::named::{DynNamedServicesBuilder, NameBuilderSettings, NamedServicesBuilder};
use crate::registrar::{Constructor, IRegistrar, Lifetime};
use crate::resolver::SharedResolver;
use crate::service_type::{AnyService, ServiceKey, ServiceType};
use fnv::FnvHashMap;
use log::warn;
use std::sync::Arc;

/// Create a container with the builder pattern.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    /// The services in the container.
    services: FnvHashMap<ServiceKey, ServiceEntry>,
}

impl ContainerBuilder {
    /// Creates a new ContainerBuilder.
    pub fn new() -> Self {
        Self {
            services: FnvHashMap::default(),
        }
    }

    /// Creates a new ContainerBuilder with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        ContainerBuilder {
            services: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the inner hashmap for testing purposes.
    #[cfg(test)]
    #[allow(unused)]
    fn inner(&self) -> &FnvHashMap<ServiceKey, ServiceEntry> {
        &self.services
    }

    /// Sets the constructor of `key`, replacing an earlier one.
    fn replace(&mut self, key: ServiceKey, lifetime: Lifetime, ctor: Constructor) {
        if self
            .services
            .insert(key, ServiceEntry::new(lifetime, ctor))
            .is_some()
        {
            warn!("Replaced the registration of {}", key);
        }
    }

    /// Sets the constructor of a shared instance.
    ///
    /// The constructor is called the first time `T` is resolved, after that
    /// the same instance is returned.
    pub fn with_shared<T, F>(mut self, ctor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&SharedResolver) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.replace(ServiceKey::of::<T>(), Lifetime::Shared, erase(ctor));
        self
    }

    /// Sets the constructor of a local instance.
    ///
    /// The constructor is called each time `T` is resolved.
    pub fn with_local<T, F>(mut self, ctor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&SharedResolver) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.replace(ServiceKey::of::<T>(), Lifetime::Local, erase(ctor));
        self
    }

    /// Inserts an already constructed shared instance.
    pub fn with_instance<T: Send + Sync + 'static>(mut self, instance: Arc<T>) -> Self {
        let ctor: Constructor = Arc::new(
            move |_: &SharedResolver| -> Result<AnyService, BoxError> { Ok(instance.clone()) },
        );
        self.replace(ServiceKey::of::<T>(), Lifetime::Shared, ctor);
        self
    }

    /// Starts named registrations for the abstraction `S`, with case
    /// sensitive names.
    pub fn named<S>(&mut self) -> NamedServicesBuilder<'_, S, Self>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        NamedServicesBuilder::new(self, NameBuilderSettings::default())
    }

    /// Starts named registrations for the abstraction `S`.
    pub fn named_with<S>(&mut self, settings: NameBuilderSettings) -> NamedServicesBuilder<'_, S, Self>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        NamedServicesBuilder::new(self, settings)
    }

    /// Starts named registrations for an abstraction that is only known at
    /// runtime.
    pub fn named_dyn(
        &mut self,
        abstraction: ServiceType,
        settings: NameBuilderSettings,
    ) -> DynNamedServicesBuilder<'_, Self> {
        DynNamedServicesBuilder::new(self, abstraction, settings)
    }

    /// Builds the container.
    pub fn build(self) -> ServiceContainer {
        ServiceContainer::new_built(self.services)
    }
}

impl IRegistrar for ContainerBuilder {
    fn register(
        &mut self,
        key: ServiceKey,
        lifetime: Lifetime,
        ctor: Constructor,
    ) -> Result<(), RegistrationError> {
        if self.services.contains_key(&key) {
            return Err(RegistrationError::AlreadyRegistered { key });
        }
        self.services.insert(key, ServiceEntry::new(lifetime, ctor));
        Ok(())
    }
}

/// Erases the type of a constructor.
fn erase<T, F>(ctor: F) -> Constructor
where
    T: Send + Sync + 'static,
    F: Fn(&SharedResolver) -> Result<T, BoxError> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &SharedResolver| -> Result<AnyService, BoxError> {
        let instance = ctor(resolver)?;
        Ok(Arc::new(instance))
    })
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
