//! In-process page-view engine without rendering.
//!
//! Documents are looked up in a fixed [`HeadlessWeb`]; any other well-formed
//! http(s) URL loads as an empty page titled after its host, and anything else
//! finishes with `LoadFinished(false)`. Used by the console build and tests.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use url::Url;

use super::session_history::{SessionHistory, Traversal};
use super::{PageEvent, PageView, PageViewFactory};
use crate::types::errors::BrowserError;
use crate::types::navigation::HistoryState;
use crate::types::tab::TabId;

/// Channel end carrying tagged page events back to the window.
pub type EventSender = Sender<(TabId, PageEvent)>;

/// A document the headless engine can serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessDocument {
    pub title: String,
    pub text: String,
    pub icon: Option<String>,
}

impl HeadlessDocument {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// The set of documents reachable by URL.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWeb {
    documents: HashMap<String, HeadlessDocument>,
    redirects: HashMap<String, String>,
}

impl HeadlessWeb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, document: HeadlessDocument) -> Self {
        self.documents.insert(url.to_string(), document);
        self
    }

    /// Loads of `from` end up at `to`.
    pub fn with_redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    fn redirect(&self, url: &str) -> Option<&str> {
        self.redirects.get(url).map(String::as_str)
    }

    fn get(&self, url: &str) -> Option<&HeadlessDocument> {
        self.documents.get(url)
    }
}

/// A command received by a headless page view, recorded for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Load(String),
    Back,
    Forward,
    Reload,
    Stop,
    Find { phrase: String, wrap_around: bool },
    ClearFind,
}

/// Creates [`HeadlessPageView`]s that report through one shared channel.
pub struct HeadlessFactory {
    web: Arc<HeadlessWeb>,
    sender: EventSender,
    auto_complete: bool,
}

impl HeadlessFactory {
    /// Returns the factory and the receiving end of its event channel.
    pub fn new(web: HeadlessWeb) -> (Self, Receiver<(TabId, PageEvent)>) {
        let (sender, receiver) = mpsc::channel();
        let factory = Self {
            web: Arc::new(web),
            sender,
            auto_complete: true,
        };
        (factory, receiver)
    }

    /// Loads stay in progress until [`HeadlessPageView::finish_load`] is called.
    pub fn manual(mut self) -> Self {
        self.auto_complete = false;
        self
    }
}

impl PageViewFactory for HeadlessFactory {
    type View = HeadlessPageView;

    fn create(&mut self, tab: TabId) -> Result<HeadlessPageView, BrowserError> {
        Ok(HeadlessPageView {
            tab,
            web: Arc::clone(&self.web),
            sender: self.sender.clone(),
            auto_complete: self.auto_complete,
            history: SessionHistory::new(),
            url: String::new(),
            title: String::new(),
            icon: None,
            loading: false,
            visible: false,
            requests: Vec::new(),
            find_phrase: String::new(),
            find_cursor: 0,
        })
    }
}

pub struct HeadlessPageView {
    tab: TabId,
    web: Arc<HeadlessWeb>,
    sender: EventSender,
    auto_complete: bool,
    history: SessionHistory,
    url: String,
    title: String,
    icon: Option<String>,
    loading: bool,
    visible: bool,
    requests: Vec<PageRequest>,
    find_phrase: String,
    find_cursor: usize,
}

impl HeadlessPageView {
    /// Every command received so far, oldest first.
    pub fn requests(&self) -> &[PageRequest] {
        &self.requests
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Completes the load in progress, if any.
    pub fn finish_load(&mut self) {
        if !self.loading {
            return;
        }
        self.loading = false;

        if let Some(target) = self.web.redirect(&self.url).map(str::to_string) {
            self.history.replace_current(&target);
            self.url = target.clone();
            self.emit(PageEvent::UrlChanged(target));
        }

        let document = self.web.get(&self.url).cloned();
        let ok = document.is_some() || is_loadable(&self.url);
        let (title, icon) = match document {
            Some(doc) => (doc.title, doc.icon),
            None if ok => (host_of(&self.url), None),
            None => (String::new(), None),
        };

        self.emit(PageEvent::LoadProgress(100));
        if title != self.title {
            self.title = title.clone();
            self.emit(PageEvent::TitleChanged(title));
        }
        if icon != self.icon {
            self.icon = icon;
            self.emit(PageEvent::IconChanged);
        }
        self.emit(PageEvent::LoadFinished(ok));
    }

    /// A fragment link or `pushState` inside the current document: the URL
    /// and history change without a load.
    pub fn navigate_in_page(&mut self, url: &str) {
        self.history.commit(url);
        self.url = url.to_string();
        self.emit(PageEvent::UrlChanged(url.to_string()));
        self.emit(PageEvent::HistoryChanged);
    }

    fn navigate(&mut self, url: String) {
        self.loading = true;
        self.find_cursor = 0;
        self.history.commit(&url);
        self.url = url.clone();
        self.emit(PageEvent::UrlChanged(url));
        self.emit(PageEvent::LoadStarted);
        self.emit(PageEvent::LoadProgress(10));
        if self.auto_complete {
            self.finish_load();
        }
    }

    fn traverse(&mut self, traversal: Traversal) {
        if let Some(target) = self.history.begin_traversal(traversal) {
            self.navigate(target);
        }
    }

    fn emit(&self, event: PageEvent) {
        // The window may already be gone during shutdown.
        if self.sender.send((self.tab, event)).is_err() {
            log::debug!("headless tab {} has no listener", self.tab);
        }
    }

    /// Case-insensitive search from the last match, optionally wrapping to the top.
    fn search(&mut self, phrase: &str, wrap_around: bool) -> bool {
        if phrase != self.find_phrase {
            self.find_phrase = phrase.to_string();
            self.find_cursor = 0;
        }
        let haystack = self
            .web
            .get(&self.url)
            .map(|doc| doc.text.to_lowercase())
            .unwrap_or_default();
        let needle = phrase.to_lowercase();
        if needle.is_empty() {
            return false;
        }

        let start = self.find_cursor.min(haystack.len());
        let hit = haystack
            .get(start..)
            .and_then(|rest| rest.find(&needle))
            .map(|pos| start + pos)
            .or_else(|| {
                if wrap_around && start > 0 {
                    haystack.find(&needle)
                } else {
                    None
                }
            });

        match hit {
            Some(pos) => {
                self.find_cursor = pos + needle.len();
                true
            }
            None => false,
        }
    }
}

impl PageView for HeadlessPageView {
    fn load(&mut self, url: &str) {
        self.requests.push(PageRequest::Load(url.to_string()));
        self.navigate(url.to_string());
    }

    fn back(&mut self) {
        self.requests.push(PageRequest::Back);
        self.traverse(Traversal::Back);
    }

    fn forward(&mut self) {
        self.requests.push(PageRequest::Forward);
        self.traverse(Traversal::Forward);
    }

    fn reload(&mut self) {
        self.requests.push(PageRequest::Reload);
        self.traverse(Traversal::Reload);
    }

    fn stop(&mut self) {
        self.requests.push(PageRequest::Stop);
        if self.loading {
            self.loading = false;
            self.history.cancel_traversal();
            self.emit(PageEvent::LoadFinished(false));
        }
    }

    fn find(&mut self, phrase: &str, wrap_around: bool) {
        self.requests.push(PageRequest::Find {
            phrase: phrase.to_string(),
            wrap_around,
        });
        let found = self.search(phrase, wrap_around);
        self.emit(PageEvent::FindFinished {
            phrase: phrase.to_string(),
            found,
        });
    }

    fn clear_find(&mut self) {
        self.requests.push(PageRequest::ClearFind);
        self.find_cursor = 0;
    }

    fn history(&self) -> HistoryState {
        self.history.state()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn icon(&self) -> Option<String> {
        self.icon.clone()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn is_loadable(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
