//! Page views backed by `wry` child web views.
//!
//! wry reports load start/finish and title changes natively; hover, progress,
//! icon, key and same-document URL events come from a script injected into
//! every document. All
//! notifications are posted to the event loop tagged with the owning tab.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use wry::{NewWindowResponse, PageLoadEvent, WebView, WebViewBuilder};

use super::layout::Area;
use super::webview_app::UserEvent;
use crate::ipc_handler::{parse_page_message, resolve_icon_url, PageMessage, UrlChange};
use crate::page::session_history::{SessionHistory, Traversal};
use crate::page::{PageEvent, PageView, PageViewFactory};
use crate::types::errors::BrowserError;
use crate::types::navigation::HistoryState;
use crate::types::tab::TabId;

const PAGE_HOOKS_JS: &str = include_str!("../../resources/ui/page_hooks.js");

/// State written by the web view's callbacks and read by the window.
#[derive(Default)]
struct PageShared {
    history: SessionHistory,
    url: String,
    title: String,
    icon: Option<String>,
    loading: bool,
}

fn lock(shared: &Mutex<PageShared>) -> MutexGuard<'_, PageShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// The loop may already be gone during shutdown; nothing is listening then.
fn send_page(proxy: &EventLoopProxy<UserEvent>, tab: TabId, event: PageEvent) {
    let _ = proxy.send_event(UserEvent::Page(tab, event));
}

pub struct WryPageFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    content_area: Rc<Cell<Area>>,
}

impl WryPageFactory {
    /// `content_area` is read whenever a view is created, so it must track resizes.
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        content_area: Rc<Cell<Area>>,
    ) -> Self {
        Self {
            window,
            proxy,
            content_area,
        }
    }
}

impl PageViewFactory for WryPageFactory {
    type View = WryPageView;

    fn create(&mut self, tab: TabId) -> Result<WryPageView, BrowserError> {
        let shared = Arc::new(Mutex::new(PageShared::default()));

        let load_shared = Arc::clone(&shared);
        let load_proxy = self.proxy.clone();
        let title_shared = Arc::clone(&shared);
        let title_proxy = self.proxy.clone();
        let ipc_shared = Arc::clone(&shared);
        let ipc_proxy = self.proxy.clone();
        let nw_proxy = self.proxy.clone();

        let webview = WebViewBuilder::new()
            .with_initialization_script(PAGE_HOOKS_JS)
            .with_bounds(self.content_area.get().to_rect())
            .with_visible(false)
            .with_on_page_load_handler(move |event, url| match event {
                PageLoadEvent::Started => {
                    {
                        let mut s = lock(&load_shared);
                        s.history.commit(&url);
                        s.url = url.clone();
                        s.loading = true;
                    }
                    send_page(&load_proxy, tab, PageEvent::UrlChanged(url));
                    send_page(&load_proxy, tab, PageEvent::LoadStarted);
                }
                PageLoadEvent::Finished => {
                    let redirected = {
                        let mut s = lock(&load_shared);
                        s.loading = false;
                        // The engine reports the final URL here, after any redirects.
                        let redirected = !url.is_empty() && url != s.url;
                        if redirected {
                            s.history.replace_current(&url);
                            s.url = url.clone();
                        }
                        redirected
                    };
                    if redirected {
                        send_page(&load_proxy, tab, PageEvent::UrlChanged(url));
                    }
                    send_page(&load_proxy, tab, PageEvent::LoadProgress(100));
                    send_page(&load_proxy, tab, PageEvent::LoadFinished(true));
                }
            })
            .with_document_title_changed_handler(move |title| {
                lock(&title_shared).title = title.clone();
                send_page(&title_proxy, tab, PageEvent::TitleChanged(title));
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let body = request.body();
                let message = match parse_page_message(body) {
                    Ok(message) => message,
                    Err(e) => {
                        log::debug!("tab {}: {}", tab, e);
                        return;
                    }
                };
                let event = match message {
                    PageMessage::Hover { url, title } => {
                        UserEvent::Page(tab, PageEvent::LinkHovered { url, title })
                    }
                    PageMessage::Progress { value } => {
                        UserEvent::Page(tab, PageEvent::LoadProgress(value))
                    }
                    PageMessage::Icon { href } => {
                        let mut s = lock(&ipc_shared);
                        let icon = resolve_icon_url(&s.url, href.as_deref());
                        if icon == s.icon {
                            return;
                        }
                        s.icon = icon;
                        UserEvent::Page(tab, PageEvent::IconChanged)
                    }
                    PageMessage::Key { keys } => UserEvent::Key(keys),
                    PageMessage::Url { url, how } => {
                        let changed = {
                            let mut s = lock(&ipc_shared);
                            match how {
                                UrlChange::Push => s.history.commit(&url),
                                UrlChange::Replace => s.history.replace_current(&url),
                                UrlChange::Traverse => s.history.traversed(&url),
                            }
                            std::mem::replace(&mut s.url, url.clone()) != url
                        };
                        if changed {
                            send_page(&ipc_proxy, tab, PageEvent::UrlChanged(url));
                        }
                        UserEvent::Page(tab, PageEvent::HistoryChanged)
                    }
                };
                let _ = ipc_proxy.send_event(event);
            })
            .with_new_window_req_handler(move |url, _features| {
                log::debug!("tab {} asked for a new window: {}", tab, url);
                if url.starts_with("http://") || url.starts_with("https://") {
                    let _ = nw_proxy.send_event(UserEvent::OpenInNewTab(url));
                }
                NewWindowResponse::Deny
            })
            .with_devtools(cfg!(debug_assertions))
            .build_as_child(&*self.window)
            .map_err(|e| BrowserError::PageView(e.to_string()))?;

        Ok(WryPageView {
            webview,
            tab,
            proxy: self.proxy.clone(),
            shared,
        })
    }
}

pub struct WryPageView {
    webview: WebView,
    tab: TabId,
    proxy: EventLoopProxy<UserEvent>,
    shared: Arc<Mutex<PageShared>>,
}

impl WryPageView {
    pub fn set_bounds(&self, area: Area) {
        if let Err(e) = self.webview.set_bounds(area.to_rect()) {
            log::warn!("tab {}: could not resize page: {}", self.tab, e);
        }
    }

    pub fn focus(&self) {
        if let Err(e) = self.webview.focus() {
            log::debug!("tab {}: could not focus page: {}", self.tab, e);
        }
    }

    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.evaluate_script(script) {
            log::warn!("tab {}: script failed: {}", self.tab, e);
        }
    }

    fn traverse(&self, traversal: Traversal, script: &str) {
        if lock(&self.shared).history.begin_traversal(traversal).is_none() {
            log::debug!("tab {}: nothing to traverse to ({:?})", self.tab, traversal);
        }
        self.eval(script);
    }
}

impl PageView for WryPageView {
    fn load(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            // Reported like any other failed load.
            log::warn!("tab {}: could not load {}: {}", self.tab, url, e);
            let _ = self
                .proxy
                .send_event(UserEvent::Page(self.tab, PageEvent::LoadFinished(false)));
        }
    }

    fn back(&mut self) {
        self.traverse(Traversal::Back, "history.back()");
    }

    fn forward(&mut self) {
        self.traverse(Traversal::Forward, "history.forward()");
    }

    fn reload(&mut self) {
        self.traverse(Traversal::Reload, "location.reload()");
    }

    fn stop(&mut self) {
        self.eval("window.stop()");
        let was_loading = {
            let mut s = lock(&self.shared);
            s.history.cancel_traversal();
            std::mem::replace(&mut s.loading, false)
        };
        if was_loading {
            let _ = self
                .proxy
                .send_event(UserEvent::Page(self.tab, PageEvent::LoadFinished(false)));
        }
    }

    fn find(&mut self, phrase: &str, wrap_around: bool) {
        let literal = serde_json::Value::String(phrase.to_string()).to_string();
        let script = format!(
            "window.find({}, false, false, {}, false, true, false)",
            literal, wrap_around
        );
        let proxy = self.proxy.clone();
        let tab = self.tab;
        let phrase = phrase.to_string();
        let result = self.webview.evaluate_script_with_callback(&script, move |result| {
            let event = PageEvent::FindFinished {
                phrase: phrase.clone(),
                found: result.trim() == "true",
            };
            let _ = proxy.send_event(UserEvent::Page(tab, event));
        });
        if let Err(e) = result {
            log::warn!("tab {}: find failed: {}", self.tab, e);
        }
    }

    fn clear_find(&mut self) {
        self.eval("window.getSelection && window.getSelection().removeAllRanges()");
    }

    fn history(&self) -> HistoryState {
        lock(&self.shared).history.state()
    }

    fn url(&self) -> String {
        lock(&self.shared).url.clone()
    }

    fn title(&self) -> String {
        lock(&self.shared).title.clone()
    }

    fn icon(&self) -> Option<String> {
        lock(&self.shared).icon.clone()
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            log::warn!("tab {}: could not change visibility: {}", self.tab, e);
        }
    }
}
