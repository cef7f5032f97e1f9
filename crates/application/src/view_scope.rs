//! Generation-based cancellation for view fetches.
//!
//! Every screen change advances the generation; a token minted before the
//! change observes it and resolves `cancelled()`.

use tokio::sync::watch;

/// Owner side of the view generation counter.
#[derive(Debug)]
pub struct ViewScope {
    generation: watch::Sender<u64>,
}

impl ViewScope {
    /// Creates a scope at generation zero.
    #[must_use]
    pub fn new() -> Self {
        let (generation, _receiver) = watch::channel(0);
        Self { generation }
    }

    /// Returns the current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Tears down the current view, invalidating outstanding tokens.
    pub fn advance(&self) -> u64 {
        self.generation
            .send_modify(|generation| *generation = generation.wrapping_add(1));
        self.generation()
    }

    /// Mints a token bound to the current view.
    #[must_use]
    pub fn token(&self) -> ViewToken {
        ViewToken {
            generation: self.generation(),
            receiver: self.generation.subscribe(),
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation token for one view's fetches.
#[derive(Debug, Clone)]
pub struct ViewToken {
    generation: u64,
    receiver: watch::Receiver<u64>,
}

impl ViewToken {
    /// Returns the generation this token was minted at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether the view has been torn down.
    ///
    /// A dropped scope counts as torn down.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.receiver.has_changed().is_err() || *self.receiver.borrow() != self.generation
    }

    /// Resolves once the view has been torn down.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            let current = *receiver.borrow_and_update();
            if current != self.generation {
                return;
            }
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ViewScope;

    #[test]
    fn advancing_invalidates_earlier_tokens() {
        let scope = ViewScope::new();
        let token = scope.token();
        assert!(!token.is_stale());

        scope.advance();
        assert!(token.is_stale());
        assert!(!scope.token().is_stale());
    }

    #[test]
    fn dropped_scope_makes_tokens_stale() {
        let scope = ViewScope::new();
        let token = scope.token();
        drop(scope);
        assert!(token.is_stale());
    }

    #[tokio::test]
    async fn cancelled_resolves_after_advance() {
        let scope = ViewScope::new();
        let token = scope.token();

        let waiter = tokio::spawn(async move { token.cancelled().await });
        tokio::task::yield_now().await;
        scope.advance();

        let joined = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }
}
