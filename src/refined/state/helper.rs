use super::QueryState;
use tracing::debug;

/// Owner of the live query state.
///
/// The refinement core only computes new states. A helper is where a new state
/// replaces the live one and where the next search gets triggered.
pub trait SearchHelper<S: QueryState> {
    /// The current state snapshot.
    fn state(&self) -> &S;

    /// Replace the live state.
    fn set_state(&mut self, state: S);

    /// Execute a search against the live state.
    fn search(&mut self);
}

/// A helper that keeps the state in memory and counts searches.
///
/// Used by the CLI, which only ever prints the resulting state, and by tests.
#[derive(Debug, Clone)]
pub struct LocalHelper<S> {
    state: S,
    searches: usize,
}

impl<S: QueryState> LocalHelper<S> {
    pub fn new(state: S) -> Self {
        Self { state, searches: 0 }
    }

    /// Number of searches triggered so far.
    pub fn searches(&self) -> usize {
        self.searches
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: QueryState> SearchHelper<S> for LocalHelper<S> {
    fn state(&self) -> &S {
        &self.state
    }

    fn set_state(&mut self, state: S) {
        self.state = state;
    }

    fn search(&mut self) {
        self.searches += 1;
        debug!(searches = self.searches, "search triggered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SearchState;

    #[test]
    fn counts_searches() {
        let mut helper = LocalHelper::new(SearchState::new());
        assert_eq!(helper.searches(), 0);
        helper.search();
        helper.search();
        assert_eq!(helper.searches(), 2);
    }

    #[test]
    fn set_state_replaces_snapshot() {
        let mut helper = LocalHelper::new(SearchState::new());
        let next = SearchState::new().add_tag_refinement("sale");
        helper.set_state(next.clone());
        assert_eq!(helper.state(), &next);
        assert_eq!(helper.into_state(), next);
    }
}
