//! Runtime descriptors of services and container keys.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type-erased instance as it is exchanged with the container.
///
/// For a service of type `T`, the concrete type behind the pointer is `T`
/// itself, so it can be recovered with `Arc::downcast::<T>()`.
pub type AnyService = Arc<dyn Any + Send + Sync>;

///////////////////////////////////////////////////////////////////////////////
// Service Type
///////////////////////////////////////////////////////////////////////////////

/// Describes a type at runtime.
///
/// Two descriptors are equal if they describe the same type. The name is only
/// kept for diagnostics.
#[derive(Clone, Copy)]
pub struct ServiceType {
    id: TypeId,
    name: &'static str,
}

impl ServiceType {
    /// Returns the descriptor of `T`.
    ///
    /// `T` may be unsized, which is the case for trait objects such as
    /// `dyn Shape`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full name of the described type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this descriptor describes `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ServiceType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceType {}

impl Hash for ServiceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Debug for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceType").field(&self.name).finish()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Service Key
///////////////////////////////////////////////////////////////////////////////

/// The key of an entry in the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    /// A plain service, resolved by its own type.
    Service(ServiceType),
    /// The named factory of an abstraction.
    ///
    /// This is a separate key instead of the type of the factory, because
    /// the type-erased builder only knows the abstraction at runtime and
    /// can't name `NamedServiceFactory<S>`.
    NamedFactory(ServiceType),
}

impl ServiceKey {
    /// The key of a plain service `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        ServiceKey::Service(ServiceType::of::<T>())
    }

    /// The key of the named factory of abstraction `S`.
    pub fn named_factory<S: ?Sized + 'static>() -> Self {
        ServiceKey::NamedFactory(ServiceType::of::<S>())
    }

    /// The type this key was created from.
    pub fn service_type(&self) -> ServiceType {
        match self {
            ServiceKey::Service(ty) | ServiceKey::NamedFactory(ty) => *ty,
        }
    }
}

impl From<ServiceType> for ServiceKey {
    fn from(ty: ServiceType) -> Self {
        ServiceKey::Service(ty)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Service(ty) => write!(f, "{}", ty),
            ServiceKey::NamedFactory(ty) => write!(f, "named factory of {}", ty),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;

    trait Marker {}

    #[test]
    fn equality_is_by_type() {
        assert_eq!(ServiceType::of::<u32>(), ServiceType::of::<u32>());
        assert_ne!(ServiceType::of::<u32>(), ServiceType::of::<u64>());
        assert!(ServiceType::of::<dyn Marker>().is::<dyn Marker>());
        assert!(!ServiceType::of::<dyn Marker>().is::<u32>());
    }

    #[test]
    fn display_uses_type_name() {
        assert_eq!(ServiceType::of::<u32>().to_string(), "u32");
        assert_eq!(ServiceKey::of::<u32>().to_string(), "u32");
        assert_eq!(
            ServiceKey::named_factory::<u32>().to_string(),
            "named factory of u32"
        );
    }

    #[test]
    fn named_factory_key_differs_from_service_key() {
        let mut keys = FnvHashSet::default();
        keys.insert(ServiceKey::of::<dyn Marker>());
        keys.insert(ServiceKey::named_factory::<dyn Marker>());
        keys.insert(ServiceKey::Service(ServiceType::of::<dyn Marker>()));
        assert_eq!(keys.len(), 2);
        assert_eq!(
            ServiceKey::named_factory::<dyn Marker>().service_type(),
            ServiceType::of::<dyn Marker>()
        );
    }
}
