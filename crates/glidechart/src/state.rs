//! Identity stack and persisted per-widget values.
//!
//! Immediate-mode widgets are rebuilt every frame, so anything that must
//! outlive a frame (a pie slice's pop-out distance, a hover fade) is stored
//! here under the widget's [`WidgetPath`]: the scopes pushed with
//! [`IdStack::push`] followed by the widget's local id. The same widget code
//! running under different scopes therefore gets distinct state.

use std::borrow::Cow;
use std::fmt;

use glidechart_core::alloc::HashMap;

use crate::error::ChartError;

/// One component of a widget path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdPart {
    Name(Cow<'static, str>),
    Index(i64),
}

impl fmt::Display for IdPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPart::Name(name) => f.write_str(name),
            IdPart::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&'static str> for IdPart {
    fn from(name: &'static str) -> Self {
        IdPart::Name(Cow::Borrowed(name))
    }
}

impl From<String> for IdPart {
    fn from(name: String) -> Self {
        IdPart::Name(Cow::Owned(name))
    }
}

macro_rules! id_part_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IdPart {
                fn from(index: $ty) -> Self {
                    IdPart::Index(index as i64)
                }
            }
        )*
    };
}

id_part_from_int!(i32, i64, u32, usize);

/// Full identity of a widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WidgetPath(Vec<IdPart>);

impl WidgetPath {
    pub fn new(parts: Vec<IdPart>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[IdPart] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WidgetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Nested scopes under which widget ids are resolved.
#[derive(Debug, Clone, Default)]
pub struct IdStack {
    parts: Vec<IdPart>,
}

impl IdStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    pub fn push(&mut self, id: impl Into<IdPart>) {
        self.parts.push(id.into());
    }

    /// Pop `count` scopes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` scopes are present; unbalanced push/pop
    /// is a bug in the calling widget code.
    pub fn pop(&mut self, count: usize) {
        if let Err(err) = self.try_pop(count) {
            panic!("{}", err);
        }
    }

    /// Pop `count` scopes, failing without modifying the stack on underflow.
    pub fn try_pop(&mut self, count: usize) -> Result<(), ChartError> {
        let available = self.parts.len();
        if count > available {
            return Err(ChartError::IdStackUnderflow {
                requested: count,
                available,
            });
        }
        self.parts.truncate(available - count);
        Ok(())
    }

    /// Path of a widget with local id `id` under the current scopes.
    pub fn path(&self, id: impl Into<IdPart>) -> WidgetPath {
        let mut parts = Vec::with_capacity(self.parts.len() + 1);
        parts.extend(self.parts.iter().cloned());
        parts.push(id.into());
        WidgetPath(parts)
    }
}

/// Animated scalars persisted across frames, keyed by widget path.
///
/// Lives as long as the chart; nothing is cleared between frames.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    values: HashMap<WidgetPath, f64>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &WidgetPath) -> Option<f64> {
        self.values.get(path).copied()
    }

    /// Stored value or `default`. Never inserts.
    pub fn get_or(&self, path: &WidgetPath, default: f64) -> f64 {
        self.get(path).unwrap_or(default)
    }

    pub fn set(&mut self, path: WidgetPath, value: f64) {
        self.values.insert(path, value);
    }

    pub fn remove(&mut self, path: &WidgetPath) -> Option<f64> {
        self.values.remove(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display_joins_with_dots() {
        let mut ids = IdStack::new();
        ids.push("pie");
        ids.push(3usize);
        assert_eq!(ids.path("center_distance").to_string(), "pie.3.center_distance");
    }

    #[test]
    fn test_same_local_id_under_different_scopes_differs() {
        let mut ids = IdStack::new();
        ids.push(0usize);
        let first = ids.path("value");
        ids.pop(1);
        ids.push(1usize);
        let second = ids.path("value");
        assert_ne!(first, second);
    }

    #[test]
    fn test_name_and_index_parts_differ() {
        let ids = IdStack::new();
        assert_ne!(ids.path("1"), ids.path(1));
    }

    #[test]
    fn test_try_pop_underflow_leaves_stack_intact() {
        let mut ids = IdStack::new();
        ids.push("a");
        let err = ids.try_pop(2).unwrap_err();
        assert_eq!(
            err,
            ChartError::IdStackUnderflow {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(ids.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "identity stack of depth 0")]
    fn test_pop_empty_panics() {
        let mut ids = IdStack::new();
        ids.pop(1);
    }

    #[test]
    fn test_get_does_not_insert() {
        let state = WidgetState::new();
        let path = IdStack::new().path("x");
        assert_eq!(state.get_or(&path, 4.0), 4.0);
        assert!(state.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let mut state = WidgetState::new();
        let path = IdStack::new().path("x");
        state.set(path.clone(), 2.5);
        assert_eq!(state.get(&path), Some(2.5));
    }
}
