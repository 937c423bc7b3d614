//! Named, prioritized inline rules.

use super::InlineRule;

/// Error registering an inline rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A rule with this name is already registered.
    #[error("inline rule '{name}' is already registered")]
    Duplicate { name: String },
}

pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) priority: i32,
    pub(crate) rule: Box<dyn InlineRule>,
}

/// Inline rules ordered by descending priority, then registration order.
///
/// # Example
///
/// ```
/// use mdlit_renderer::{GlyphRule, InlineRegistry, RegistryError};
///
/// let mut registry = InlineRegistry::new();
/// registry.register("arrow", 1000, GlyphRule::arrow()).unwrap();
///
/// let err = registry.register("arrow", 10, GlyphRule::dash()).unwrap_err();
/// assert_eq!(err, RegistryError::Duplicate { name: "arrow".to_owned() });
/// ```
#[derive(Default)]
pub struct InlineRegistry {
    entries: Vec<Entry>,
}

impl InlineRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` under a unique `name`. Rules with higher `priority`
    /// run their pass first; equal priorities run in registration order.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        rule: impl InlineRule + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        // Insert after every entry of equal or higher priority.
        let position = self.entries.partition_point(|e| e.priority >= priority);
        tracing::debug!(name = %name, priority, "Registered inline rule");
        self.entries.insert(
            position,
            Entry {
                name,
                priority,
                rule: Box::new(rule),
            },
        );
        Ok(())
    }

    /// Check if a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }
}

impl std::fmt::Debug for InlineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.name, e.priority)))
            .finish()
    }
}
