//! Values that carry a display name and a stable identifier.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value with a human-readable name and an identifier.
///
/// Identifiers are expected to be unique within whatever collection holds
/// the values, but nothing here enforces that.
pub trait Identifiable {
    fn name(&self) -> &str;

    fn id(&self) -> Uuid;
}

impl<T> Identifiable for &T
where
    T: Identifiable + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn id(&self) -> Uuid {
        (**self).id()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    name: String,
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
}

impl Category {
    /// Create a category with a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(name, Uuid::new_v4())
    }

    pub fn with_id(name: impl Into<String>, id: Uuid) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl Identifiable for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id: {} ~ Name: {}", self.id, self.name)
    }
}
