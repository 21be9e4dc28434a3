//! The service container.

use crate::errors::ResolveError;
use crate::named::{DynNamedServiceFactory, NamedServiceFactory};
use crate::registrar::{Constructor, Lifetime};
use crate::resolver::{IResolver, SharedResolver};
use crate::service_type::{AnyService, ServiceKey, ServiceType};
use crate::ContainerBuilder;
use fnv::FnvHashMap;
use log::trace;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Services = FnvHashMap<ServiceKey, ServiceEntry>;

///////////////////////////////////////////////////////////////////////////////
// Entry
///////////////////////////////////////////////////////////////////////////////

/// A registered service.
pub(crate) struct ServiceEntry {
    pub lifetime: Lifetime,
    ctor: Constructor,
    /// The shared instance, once it is constructed.
    instance: Mutex<Option<AnyService>>,
}

impl ServiceEntry {
    pub fn new(lifetime: Lifetime, ctor: Constructor) -> Self {
        Self {
            lifetime,
            ctor,
            instance: Mutex::new(None),
        }
    }

    fn cached(&self) -> Option<AnyService> {
        // The lock is never held while user code runs, so poisoning can't
        // leave the slot half written.
        let slot = self.instance.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }

    /// Stores the instance, unless another one was stored in the meantime.
    /// Returns the stored instance.
    fn store(&self, instance: AnyService) -> AnyService {
        let mut slot = self.instance.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(instance).clone()
    }
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("lifetime", &self.lifetime)
            .field("constructed", &self.cached().is_some())
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Container
///////////////////////////////////////////////////////////////////////////////

/// Container for all the services of an application.
///
/// Cloning the container is cheap: clones share the same services and
/// shared instances.
#[derive(Clone, Debug, Default)]
pub struct ServiceContainer {
    /// The services in the container.
    services: Arc<Services>,
}

impl ServiceContainer {
    /// Creates a new, empty service container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container that is already built by the ContainerBuilder.
    pub(crate) fn new_built(services: Services) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    /// Creates a ContainerBuilder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Creates a ContainerBuilder with the specified capacity.
    pub fn builder_with_capacity(capacity: usize) -> ContainerBuilder {
        ContainerBuilder::with_capacity(capacity)
    }

    /// Returns the number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Returns true if something is registered under `key`.
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.services.contains_key(key)
    }

    ///////////////////////////////////////////////////////////////////////////
    // Resolve Methods
    ///////////////////////////////////////////////////////////////////////////

    /// Resolves a service by its type.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        let resolver: &dyn IResolver = self;
        resolver.get::<T>()
    }

    /// Resolves the named factory of the abstraction `S`.
    pub fn named<S>(&self) -> Result<NamedServiceFactory<S>, ResolveError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let resolver: &dyn IResolver = self;
        resolver.named::<S>()
    }

    /// Resolves the named factory of an abstraction that is only known at
    /// runtime.
    pub fn named_dyn(&self, abstraction: ServiceType) -> Result<DynNamedServiceFactory, ResolveError> {
        let resolver: &dyn IResolver = self;
        resolver.named_dyn(abstraction)
    }

    /// Calls the constructor of an entry.
    ///
    /// Constructors get a resolver that does not keep the services alive,
    /// otherwise a shared instance holding it would never be dropped.
    fn construct(&self, key: &ServiceKey, entry: &ServiceEntry) -> Result<AnyService, ResolveError> {
        let resolver: SharedResolver = Arc::new(WeakResolver {
            services: Arc::downgrade(&self.services),
        });
        (entry.ctor)(&resolver).map_err(|source| ResolveError::Construction { key: *key, source })
    }
}

impl IResolver for ServiceContainer {
    fn resolve(&self, key: &ServiceKey) -> Result<AnyService, ResolveError> {
        trace!("Resolving {}", key);
        let entry = self
            .services
            .get(key)
            .ok_or(ResolveError::NotRegistered { key: *key })?;

        match entry.lifetime {
            Lifetime::Local => self.construct(key, entry),
            Lifetime::Shared => {
                if let Some(instance) = entry.cached() {
                    return Ok(instance);
                }
                // A failing constructor leaves the slot empty.
                let instance = self.construct(key, entry)?;
                Ok(entry.store(instance))
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// Weak Resolver
///////////////////////////////////////////////////////////////////////////////

/// Resolves from a container as long as the container is alive.
struct WeakResolver {
    services: Weak<Services>,
}

impl IResolver for WeakResolver {
    fn resolve(&self, key: &ServiceKey) -> Result<AnyService, ResolveError> {
        let services = self
            .services
            .upgrade()
            .ok_or(ResolveError::ContainerDropped { key: *key })?;
        ServiceContainer { services }.resolve(key)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
