//! Edge-triggered sentinel observer for infinite scroll.

/// Tracks the visibility of the sentinel at the bottom of a list and decides
/// when a "load more" should fire.
///
/// Fires at most once per hidden-to-visible transition and never while
/// `has_more` is false. A sentinel that stays visible does not fire again
/// until it has been hidden.
#[derive(Debug, Default, Clone)]
pub struct InfiniteScrollObserver {
    visible: bool,
}

impl InfiniteScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visibility report and return whether to load more.
    pub fn observe(&mut self, visible: bool, has_more: bool) -> bool {
        let entered = visible && !self.visible;
        self.visible = visible;
        entered && has_more
    }

    /// Forget the last visibility, e.g. after the list was replaced.
    pub fn reset(&mut self) {
        self.visible = false;
    }
}
