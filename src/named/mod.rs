//! Multiple implementations of the same abstraction, resolved by name.

mod builder;
mod factory;
mod registry;

pub use self::builder::{DynNamedServicesBuilder, NamedServicesBuilder};
pub use self::factory::{DynNamedServiceFactory, NamedServiceFactory};
pub use self::registry::NameBuilderSettings;
