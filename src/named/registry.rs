//! The name to implementation mapping of one abstraction.

use crate::errors::NamedServiceError;
use crate::implementation::Upcast;
use crate::service_type::ServiceType;
use fnv::FnvHashMap;
use std::borrow::Cow;
use std::fmt;

/// Settings of a named services builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameBuilderSettings {
    /// Match names regardless of case, so `"Circle"` and `"circle"` are the
    /// same name.
    pub case_insensitive_names: bool,
}

impl NameBuilderSettings {
    /// Names are matched exactly. This is the default.
    pub const fn case_sensitive() -> Self {
        Self {
            case_insensitive_names: false,
        }
    }

    /// Names are matched regardless of case.
    pub const fn case_insensitive() -> Self {
        Self {
            case_insensitive_names: true,
        }
    }
}

/// A single named registration.
#[derive(Clone)]
pub(crate) struct Registration {
    /// The name as it was added.
    pub name: String,
    pub implementation: ServiceType,
    /// Converts an instance of `implementation` to the abstraction.
    pub upcast: Upcast,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("implementation", &self.implementation)
            .finish()
    }
}

/// Maps names to implementation types for one abstraction.
///
/// The comparison policy is fixed when the registry is created.
#[derive(Debug)]
pub(crate) struct NameRegistry {
    abstraction: ServiceType,
    case_insensitive: bool,
    entries: FnvHashMap<String, Registration>,
}

impl NameRegistry {
    pub fn new(abstraction: ServiceType, settings: NameBuilderSettings) -> Self {
        Self {
            abstraction,
            case_insensitive: settings.case_insensitive_names,
            entries: FnvHashMap::default(),
        }
    }

    pub fn abstraction(&self) -> ServiceType {
        self.abstraction
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The key under which `name` is stored.
    fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(name.chars().map(fold_case).collect())
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Adds a registration. An existing registration for the same name is
    /// left untouched.
    pub fn insert(
        &mut self,
        name: &str,
        implementation: ServiceType,
        upcast: Upcast,
    ) -> Result<(), NamedServiceError> {
        let key = self.key(name).into_owned();
        if self.entries.contains_key(&key) {
            return Err(NamedServiceError::DuplicateName {
                name: name.to_owned(),
                abstraction: self.abstraction.name(),
            });
        }

        self.entries.insert(
            key,
            Registration {
                name: name.to_owned(),
                implementation,
                upcast,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(self.key(name).as_ref())
    }
}

/// Maps a character to its simple uppercase form.
///
/// Each character is folded on its own, so a name folds the same way
/// wherever a character appears in it. Characters whose uppercase form is
/// longer than one character are kept as they are.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implementation::upcast_erased;

    fn registry(settings: NameBuilderSettings) -> NameRegistry {
        NameRegistry::new(ServiceType::of::<u32>(), settings)
    }

    #[test]
    fn default_is_case_sensitive() {
        assert_eq!(
            NameBuilderSettings::default(),
            NameBuilderSettings::case_sensitive()
        );
    }

    #[test]
    fn insert_and_get() {
        let mut reg = registry(NameBuilderSettings::default());
        reg.insert("one", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();

        let found = reg.get("one").unwrap();
        assert_eq!(found.name, "one");
        assert_eq!(found.implementation, ServiceType::of::<u32>());
        assert!(reg.get("two").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_keeps_first() {
        let mut reg = registry(NameBuilderSettings::default());
        reg.insert("one", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();
        let err = reg
            .insert("one", ServiceType::of::<u64>(), upcast_erased::<u32, u32>)
            .unwrap_err();

        assert!(matches!(err, NamedServiceError::DuplicateName { ref name, .. } if name == "one"));
        assert_eq!(reg.get("one").unwrap().implementation, ServiceType::of::<u32>());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn case_sensitive_lookup() {
        let mut reg = registry(NameBuilderSettings::case_sensitive());
        reg.insert("Foo", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();
        assert!(reg.get("Foo").is_some());
        assert!(reg.get("foo").is_none());

        // Different case means a different name.
        reg.insert("foo", ServiceType::of::<u64>(), upcast_erased::<u32, u32>)
            .unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn case_insensitive_lookup() {
        let mut reg = registry(NameBuilderSettings::case_insensitive());
        reg.insert("Foo", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();
        assert!(reg.get("foo").is_some());
        assert!(reg.get("FOO").is_some());
        assert_eq!(reg.get("fOo").unwrap().name, "Foo");

        let err = reg
            .insert("FOO", ServiceType::of::<u64>(), upcast_erased::<u32, u32>)
            .unwrap_err();
        assert!(matches!(err, NamedServiceError::DuplicateName { .. }));
    }

    #[test]
    fn case_insensitive_ignores_position_of_sigma() {
        let mut reg = registry(NameBuilderSettings::case_insensitive());
        reg.insert("ΑΣ", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();
        for name in &["ΑΣ", "ασ", "ας", "Ας"] {
            assert_eq!(reg.get(name).unwrap().name, "ΑΣ", "lookup of {}", name);
        }

        let err = reg
            .insert("ας", ServiceType::of::<u64>(), upcast_erased::<u32, u32>)
            .unwrap_err();
        assert!(matches!(err, NamedServiceError::DuplicateName { .. }));
    }

    #[test]
    fn case_insensitive_does_not_expand_characters() {
        let mut reg = registry(NameBuilderSettings::case_insensitive());
        reg.insert("straße", ServiceType::of::<u32>(), upcast_erased::<u32, u32>)
            .unwrap();
        assert!(reg.get("STRAßE").is_some());
        assert!(reg.get("STRASSE").is_none());
    }
}
