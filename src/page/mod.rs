//! Page-view abstraction.
//!
//! A page view fetches, renders and keeps the history of one document. The
//! browser window never talks to a web engine directly: it issues commands
//! through [`PageView`] and receives [`PageEvent`] notifications that the
//! [`PageViewFactory`] wired up when the view was created.

pub mod headless;
pub mod session_history;

use crate::types::errors::BrowserError;
use crate::types::navigation::HistoryState;
use crate::types::tab::TabId;

/// Notifications emitted by a page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    UrlChanged(String),
    TitleChanged(String),
    LoadStarted,
    /// Percent, 0..=100.
    LoadProgress(u8),
    /// `true` when the engine reports success.
    LoadFinished(bool),
    IconChanged,
    /// Back/forward availability changed without a load, e.g. after a
    /// same-document navigation.
    HistoryChanged,
    /// Both fields are empty when the pointer leaves a link.
    LinkHovered { url: String, title: String },
    FindFinished { phrase: String, found: bool },
}

/// Commands the window can issue to a page view, plus accessors for its current state.
pub trait PageView {
    fn load(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    /// Advisory; the engine decides whether anything was actually cancelled.
    fn stop(&mut self);
    /// Starts a text search. The outcome arrives as [`PageEvent::FindFinished`].
    fn find(&mut self, phrase: &str, wrap_around: bool);
    /// Removes any search highlighting.
    fn clear_find(&mut self);
    fn history(&self) -> HistoryState;
    fn url(&self) -> String;
    fn title(&self) -> String;
    fn icon(&self) -> Option<String>;
    fn set_visible(&mut self, visible: bool);
}

/// Creates page views and routes their notifications back to the window.
///
/// Every event a created view emits must reach the window's
/// `handle_page_event` tagged with the `tab` passed here.
pub trait PageViewFactory {
    type View: PageView;

    fn create(&mut self, tab: TabId) -> Result<Self::View, BrowserError>;
}
