//! Type names and the ordered list they are emitted from

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names emitted when nothing else is configured, in emission order.
pub const BUILTIN_TYPES: &[&str] = &[
    "short",
    "int",
    "char",
    "wchar_t",
    "float",
    "double",
    "long",
    "std::string",
    "std::wstring",
    "long long",
];

/// A C++ type as written in source, e.g. `long long` or `std::wstring`.
///
/// Accepted verbatim. Nothing checks that it is a real type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Ordered, read-only list of type names.
///
/// Order is emission order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeList {
    names: Vec<TypeName>,
}

impl TypeList {
    pub fn new(names: Vec<TypeName>) -> Self {
        Self { names }
    }

    /// The list the generated header ships with
    pub fn builtin() -> Self {
        BUILTIN_TYPES.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeName> {
        self.names.iter()
    }
}

impl<T: Into<TypeName>> FromIterator<T> for TypeList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TypeList {
    type Item = &'a TypeName;
    type IntoIter = std::slice::Iter<'a, TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
