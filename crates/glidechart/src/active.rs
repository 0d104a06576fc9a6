//! Exclusive pointer capture.

use crate::state::WidgetPath;

/// The single widget currently holding pointer-drag focus.
///
/// Claims are last-wins. A release only succeeds for the exact path that
/// holds the claim, so a stale widget cannot clear another widget's drag.
#[derive(Debug, Clone, Default)]
pub struct ActiveWidget {
    token: Option<WidgetPath>,
}

impl ActiveWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, path: WidgetPath) {
        if self.token.as_ref() != Some(&path) {
            tracing::trace!(widget = %path, "active widget claimed");
        }
        self.token = Some(path);
    }

    /// Release the claim if `path` holds it. Returns whether it did.
    pub fn release(&mut self, path: &WidgetPath) -> bool {
        if self.token.as_ref() == Some(path) {
            tracing::trace!(widget = %path, "active widget released");
            self.token = None;
            true
        } else {
            false
        }
    }

    pub fn is(&self, path: &WidgetPath) -> bool {
        self.token.as_ref() == Some(path)
    }

    pub fn current(&self) -> Option<&WidgetPath> {
        self.token.as_ref()
    }

    pub fn is_any(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IdStack;

    #[test]
    fn test_last_claim_wins() {
        let ids = IdStack::new();
        let mut active = ActiveWidget::new();
        active.claim(ids.path("a"));
        active.claim(ids.path("b"));
        assert!(active.is(&ids.path("b")));
        assert!(!active.is(&ids.path("a")));
    }

    #[test]
    fn test_release_requires_exact_path() {
        let ids = IdStack::new();
        let mut active = ActiveWidget::new();
        active.claim(ids.path("a"));
        assert!(!active.release(&ids.path("b")));
        assert!(active.is_any());
        assert!(active.release(&ids.path("a")));
        assert!(!active.is_any());
    }
}
