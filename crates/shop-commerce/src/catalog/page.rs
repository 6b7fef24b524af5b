//! Load state for pages that fetch from the catalog.

use crate::error::CommerceError;

/// What a page shows for its fetched content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch succeeded.
    Ready(T),
    /// The fetch failed; holds the single message shown in place of content.
    Failed(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    /// The loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof of which load a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket(u64);

/// Tracks the latest load for a page and drops results from older ones.
///
/// A page calls [`PageLoader::begin`] whenever it starts a fetch and hands
/// the result back with the ticket it got. Results for any ticket but the
/// newest are ignored, so a slow response that settles after the user has
/// moved on cannot overwrite what is on screen.
#[derive(Debug, Default)]
pub struct PageLoader<T> {
    generation: u64,
    state: PageState<T>,
}

impl<T> PageLoader<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: PageState::Idle,
        }
    }

    /// Enter the loading state and return the ticket for this load.
    pub fn begin(&mut self) -> PageTicket {
        self.generation += 1;
        self.state = PageState::Loading;
        PageTicket(self.generation)
    }

    /// Apply a finished load. Returns `false` if the ticket is stale and
    /// the result was discarded.
    pub fn settle(&mut self, ticket: PageTicket, result: Result<T, CommerceError>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale page result"
            );
            return false;
        }

        self.state = match result {
            Ok(value) => PageState::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "page load failed");
                PageState::Failed(e.user_message().to_string())
            }
        };
        true
    }

    /// Current state.
    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// Take the current state, leaving the loader idle.
    pub fn into_state(self) -> PageState<T> {
        self.state
    }
}
