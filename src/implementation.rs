//! The capability contract between implementations and abstractions.

use crate::service_type::{AnyService, ServiceType};
use fnv::FnvHashMap;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

///////////////////////////////////////////////////////////////////////////////
// Trait
///////////////////////////////////////////////////////////////////////////////

/// A type that satisfies the abstraction `S`.
///
/// `S` is usually a trait object. Implementing this trait for a concrete type
/// is all that is needed to register the type under a name for `S`:
///
/// ```
/// use rscontainer_named::IImplements;
/// use std::sync::Arc;
///
/// trait Shape: Send + Sync {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl IImplements<dyn Shape> for Square {
///     fn upcast(this: Arc<Self>) -> Arc<dyn Shape> {
///         this
///     }
/// }
/// ```
///
/// Every type satisfies itself.
pub trait IImplements<S: ?Sized>: Send + Sync + 'static {
    /// Converts a pointer to the implementation into a pointer to the
    /// abstraction.
    fn upcast(this: Arc<Self>) -> Arc<S>;
}

impl<T: Send + Sync + 'static> IImplements<T> for T {
    fn upcast(this: Arc<Self>) -> Arc<T> {
        this
    }
}

/// Converts an erased instance of an implementation into an erased
/// `Arc<S>`.
///
/// Returns `None` if the instance is not of the implementation type.
pub(crate) type Upcast = fn(AnyService) -> Option<AnyService>;

/// The `Upcast` for implementation `I` and abstraction `S`.
pub(crate) fn upcast_erased<I, S>(instance: AnyService) -> Option<AnyService>
where
    I: IImplements<S>,
    S: ?Sized + Send + Sync + 'static,
{
    let concrete = instance.downcast::<I>().ok()?;
    let upcasted: Arc<S> = I::upcast(concrete);
    Some(Arc::new(upcasted))
}

///////////////////////////////////////////////////////////////////////////////
// Erased Descriptor
///////////////////////////////////////////////////////////////////////////////

/// Describes an implementation type and the abstractions it satisfies.
///
/// This is what the type-erased named builder checks registrations against.
/// Use [`Implementation`] to declare the abstractions.
#[derive(Clone)]
pub struct ImplementationType {
    ty: ServiceType,
    upcasts: FnvHashMap<TypeId, Upcast>,
}

impl ImplementationType {
    /// Describes `I` as an implementation of itself only.
    pub fn of<I: Send + Sync + 'static>() -> Self {
        Implementation::<I>::new().erase()
    }

    /// The described implementation type.
    pub fn service_type(&self) -> ServiceType {
        self.ty
    }

    /// Returns true if the implementation satisfies `abstraction`.
    pub fn satisfies(&self, abstraction: ServiceType) -> bool {
        self.upcasts.contains_key(&abstraction.id())
    }

    /// Returns the conversion to `abstraction`, if the implementation
    /// satisfies it.
    pub(crate) fn upcast_to(&self, abstraction: ServiceType) -> Option<Upcast> {
        self.upcasts.get(&abstraction.id()).copied()
    }
}

impl fmt::Debug for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationType")
            .field("ty", &self.ty)
            .field("abstractions", &self.upcasts.len())
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
// Typed Descriptor
///////////////////////////////////////////////////////////////////////////////

/// Describes implementation `I` with compile-time checked abstractions.
pub struct Implementation<I> {
    erased: ImplementationType,
    _marker: PhantomData<fn() -> I>,
}

impl<I: Send + Sync + 'static> Implementation<I> {
    /// Describes `I` as an implementation of itself only.
    pub fn new() -> Self {
        let mut upcasts = FnvHashMap::default();
        upcasts.insert(TypeId::of::<I>(), upcast_erased::<I, I> as Upcast);
        Self {
            erased: ImplementationType {
                ty: ServiceType::of::<I>(),
                upcasts,
            },
            _marker: PhantomData,
        }
    }

    /// Declares that `I` satisfies the abstraction `S`.
    pub fn implements<S>(mut self) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: IImplements<S>,
    {
        self.erased
            .upcasts
            .insert(TypeId::of::<S>(), upcast_erased::<I, S>);
        self
    }

    /// Forgets the static type.
    pub fn erase(self) -> ImplementationType {
        self.erased
    }
}

impl<I: Send + Sync + 'static> Default for Implementation<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> From<Implementation<I>> for ImplementationType {
    fn from(implementation: Implementation<I>) -> Self {
        implementation.erased
    }
}

impl<I> fmt::Debug for Implementation<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.erased.fmt(f)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
