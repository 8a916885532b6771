//! Back/forward list for engines that do not expose their own history object.

use crate::types::navigation::HistoryState;

/// A traversal requested but not yet committed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Back,
    Forward,
    Reload,
}

/// What the last new entry replaced, kept so it can be undone when the engine
/// later reports that the navigation was a traversal of its own.
#[derive(Debug, Clone)]
struct Push {
    previous: usize,
    discarded: Vec<String>,
}

/// Linear session history with a cursor.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<String>,
    index: Option<usize>,
    pending: Option<Traversal>,
    last_push: Option<Push>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| self.entries[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        match self.index {
            Some(i) => HistoryState {
                can_go_back: i > 0,
                can_go_forward: i + 1 < self.entries.len(),
            },
            None => HistoryState::default(),
        }
    }

    /// Records the intent to traverse and returns the target URL, or `None`
    /// when there is nowhere to go.
    pub fn begin_traversal(&mut self, traversal: Traversal) -> Option<String> {
        let index = self.index?;
        let target = match traversal {
            Traversal::Back if index > 0 => index - 1,
            Traversal::Forward if index + 1 < self.entries.len() => index + 1,
            Traversal::Reload => index,
            _ => return None,
        };
        self.pending = Some(traversal);
        Some(self.entries[target].clone())
    }

    /// Drops a pending traversal, e.g. after the load was stopped.
    pub fn cancel_traversal(&mut self) {
        self.pending = None;
    }

    /// Commits a navigation to `url`. Pending traversals move the cursor;
    /// anything else is a new entry that discards the forward list.
    pub fn commit(&mut self, url: &str) {
        let Some(index) = self.index else {
            self.entries.push(url.to_string());
            self.index = Some(0);
            self.pending = None;
            self.last_push = None;
            return;
        };

        let index = match self.pending.take() {
            Some(Traversal::Back) => index.saturating_sub(1),
            Some(Traversal::Forward) => (index + 1).min(self.entries.len() - 1),
            Some(Traversal::Reload) => index,
            None => {
                if self.entries[index] == url {
                    return;
                }
                let discarded = self.entries.split_off(index + 1);
                self.entries.push(url.to_string());
                self.index = Some(index + 1);
                self.last_push = Some(Push {
                    previous: index,
                    discarded,
                });
                return;
            }
        };

        // Redirects during a traversal replace the entry in place.
        self.entries[index] = url.to_string();
        self.index = Some(index);
        self.last_push = None;
    }

    /// Replaces the current entry, e.g. after a redirect or `replaceState`.
    pub fn replace_current(&mut self, url: &str) {
        match self.index {
            Some(i) => self.entries[i] = url.to_string(),
            None => self.commit(url),
        }
    }

    /// Records that the engine arrived at `url` by traversing its own history
    /// (mouse back button, `history.back()` from the page, `popstate`).
    ///
    /// A traversal this history started is simply committed. Otherwise a new
    /// entry already committed for `url` is undone and the cursor moves to
    /// the neighbouring entry holding `url`. Without such a neighbour `url`
    /// becomes a new entry.
    pub fn traversed(&mut self, url: &str) {
        if self.pending.is_some() {
            self.commit(url);
            return;
        }

        let last_push = self.last_push.take();
        let Some(mut index) = self.index else {
            self.commit(url);
            return;
        };
        if self.entries[index] == url {
            let Some(push) = last_push else {
                return;
            };
            self.entries.truncate(index);
            self.entries.extend(push.discarded);
            index = push.previous;
            self.index = Some(index);
        }

        if index > 0 && self.entries[index - 1] == url {
            self.index = Some(index - 1);
        } else if self.entries.get(index + 1).is_some_and(|next| next == url) {
            self.index = Some(index + 1);
        } else {
            self.commit(url);
        }
    }
}
