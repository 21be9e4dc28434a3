//! Named services for the rscontainer service container.
//!
//! Register multiple implementations of the same abstraction under distinct
//! names, and pick one by name at runtime.
//!
//! # Features
//!
//! * Multiple implementations of one trait object, each under its own name
//! * Case sensitive or case insensitive names
//! * Compile-time checked registrations when the abstraction is known
//! * Runtime checked registrations when it is only known as a [`ServiceType`]
//! * Any container can back the named factories through [`IResolver`] and
//!   [`IRegistrar`]
//!
//! # Registering named services
//!
//! Declare which abstractions an implementation satisfies with
//! [`IImplements`], register the implementations with the container and map
//! names to them with a [`NamedServicesBuilder`].
//!
//! ```rust
//! use rscontainer_named::{IImplements, ServiceContainer};
//! use std::sync::Arc;
//!
//! trait Shape: Send + Sync {
//!     fn kind(&self) -> &'static str;
//! }
//!
//! struct Circle;
//! struct Square;
//!
//! impl Shape for Circle {
//!     fn kind(&self) -> &'static str { "circle" }
//! }
//!
//! impl Shape for Square {
//!     fn kind(&self) -> &'static str { "square" }
//! }
//!
//! impl IImplements<dyn Shape> for Circle {
//!     fn upcast(this: Arc<Self>) -> Arc<dyn Shape> { this }
//! }
//!
//! impl IImplements<dyn Shape> for Square {
//!     fn upcast(this: Arc<Self>) -> Arc<dyn Shape> { this }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ServiceContainer::builder()
//!     .with_local(|_| Ok(Circle))
//!     .with_shared(|_| Ok(Square));
//!
//! let mut shapes = builder.named::<dyn Shape>();
//! shapes.add::<Circle>("circle")?.add::<Square>("square")?;
//! shapes.build()?;
//!
//! let container = builder.build();
//! let factory = container.named::<dyn Shape>()?;
//! assert_eq!(factory.get_by_name("circle")?.kind(), "circle");
//! assert!(factory.get_by_name("triangle").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Abstractions known at runtime
//!
//! When the abstraction is only known as a value, for example when
//! registering many abstractions in a loop, use [`DynNamedServicesBuilder`].
//! Implementations are then described by an [`ImplementationType`] and
//! checked when they are added. The matching [`DynNamedServiceFactory`]
//! returns the type-erased instance the container resolved.
//!
//! # Lifetimes
//!
//! The named factory never caches. Whether a name resolves to the same
//! instance each time depends on how the implementation is registered with
//! the container: shared implementations are the same every time, local ones
//! are new every time.

mod builder;
mod container;
mod errors;
mod implementation;
mod named;
mod registrar;
mod resolver;
mod service_type;


pub use crate::builder::ContainerBuilder;
pub use crate::container::ServiceContainer;
pub use crate::errors::{BoxError, NamedServiceError, RegistrationError, ResolveError};
pub use crate::implementation::{IImplements, Implementation, ImplementationType};
pub use crate::named::{
    DynNamedServiceFactory, DynNamedServicesBuilder, NameBuilderSettings, NamedServiceFactory,
    NamedServicesBuilder,
};
pub use crate::registrar::{Constructor, IRegistrar, Lifetime};
pub use crate::resolver::{IResolver, SharedResolver};
pub use crate::service_type::{AnyService, ServiceKey, ServiceType};
