//! Element identifier generation
//!
//! Three namespaces of opaque identifiers, told apart by prefix. Only the
//! prefix is ever inspected; the suffix is a random v4 UUID.

use std::cell::Cell;
use uuid::Uuid;

/// Identifier namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdNamespace {
    /// `id` attributes
    ElementId,
    /// `name` attributes (form control grouping)
    ElementName,
    /// `value` attributes
    ElementValue,
}

impl IdNamespace {
    pub const ALL: [IdNamespace; 3] = [Self::ElementId, Self::ElementName, Self::ElementValue];

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::ElementId => "content-id-",
            Self::ElementName => "content-name-",
            Self::ElementValue => "content-value-",
        }
    }

    /// Fresh random identifier in this namespace
    pub fn generate(self) -> String {
        format!("{}{}", self.prefix(), Uuid::new_v4())
    }

    /// Whether `value` was minted in this namespace
    #[inline]
    pub fn owns(self, value: &str) -> bool {
        value.starts_with(self.prefix())
    }

    /// Namespace that owns `value`, if any
    pub fn of(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.owns(value))
    }
}

/// `content-id-<uuid>`
pub fn new_element_id() -> String {
    IdNamespace::ElementId.generate()
}

/// `content-name-<uuid>`
pub fn new_element_name() -> String {
    IdNamespace::ElementName.generate()
}

/// `content-value-<uuid>`
pub fn new_element_value() -> String {
    IdNamespace::ElementValue.generate()
}

/// Source of fresh identifiers.
///
/// The clipboard rewriter and element builders take a generator so tests
/// can substitute a predictable sequence.
pub trait IdGenerator {
    fn generate(&self, namespace: IdNamespace) -> String;

    fn element_id(&self) -> String {
        self.generate(IdNamespace::ElementId)
    }

    fn element_name(&self) -> String {
        self.generate(IdNamespace::ElementName)
    }

    fn element_value(&self) -> String {
        self.generate(IdNamespace::ElementValue)
    }
}

/// Random v4 UUID identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self, namespace: IdNamespace) -> String {
        namespace.generate()
    }
}

/// Deterministic identifiers: `<prefix>seq-<n>`, one counter shared by all
/// namespaces
#[derive(Debug, Default)]
pub struct SequentialGenerator {
    next: Cell<u64>,
}

impl SequentialGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialGenerator {
    fn generate(&self, namespace: IdNamespace) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("{}seq-{n}", namespace.prefix())
    }
}
