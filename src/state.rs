//! Per-service completion tracking.

use std::collections::BTreeMap;
use std::fmt;

/// Tracks which requested services have become externally available.
///
/// The key set is fixed at construction. A service marked satisfied stays
/// satisfied for the rest of the wait.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionState {
    services: BTreeMap<String, bool>,
}

impl CompletionState {
    /// Creates a state with every name unsatisfied. Duplicate names collapse.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            services: names.into_iter().map(|n| (n.into(), false)).collect(),
        }
    }

    /// Returns whether `name` is satisfied, or `None` if it was never requested.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.services.get(name).copied()
    }

    /// Names that are still waiting, in stable order.
    #[must_use]
    pub fn unsatisfied(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|(_, done)| !**done)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Marks `name` satisfied. Returns `true` if this changed the state.
    ///
    /// Names outside the requested set are ignored.
    pub fn mark_satisfied(&mut self, name: &str) -> bool {
        match self.services.get_mut(name) {
            Some(done) if !*done => {
                *done = true;
                true
            }
            _ => false,
        }
    }

    /// True once every requested service is satisfied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.services.values().all(|done| *done)
    }

    /// Number of tracked services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True if no services are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Iterates over `(name, satisfied)` pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.services.iter().map(|(name, done)| (name.as_str(), *done))
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, done)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {done}")?;
        }
        f.write_str("}")
    }
}
