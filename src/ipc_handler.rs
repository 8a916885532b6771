//! IPC message handling between the browser chrome scripts and Rust.
//!
//! Chrome pages (toolbar, footer) post `{"cmd": ...}` messages; scripts
//! injected into web pages post `{"kind": ...}` messages. Both are decoded
//! here so the window logic stays independent of the web view toolkit.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::BrowserWindow;
use crate::page::PageViewFactory;
use crate::types::action::{self, Action, Menu};
use crate::types::errors::{BrowserError, IpcError};
use crate::types::tab::TabStripEntry;
use crate::types::window_state::WindowState;

/// Messages posted by the chrome webviews.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeMessage {
    UiReady,
    Action { name: String },
    UrlInput { text: String },
    Navigate { text: String },
    FindInput { text: String },
    Find { text: String },
    Key { keys: String },
    SwitchTab { index: usize },
    CloseTab { index: usize },
}

/// Messages posted by the script injected into every web page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMessage {
    Hover {
        #[serde(default)]
        url: String,
        #[serde(default)]
        title: String,
    },
    Progress { value: u8 },
    Icon { href: Option<String> },
    Key { keys: String },
    /// The document's URL changed without a page load, or the document was
    /// reached by a back/forward traversal.
    Url { url: String, how: UrlChange },
}

/// How a page reported URL change relates to the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlChange {
    /// Fragment navigation or `pushState`.
    Push,
    /// `replaceState`.
    Replace,
    /// `popstate`, a back/forward load, or a restore from the page cache.
    Traverse,
}

pub fn parse_chrome_message(body: &str) -> Result<ChromeMessage, IpcError> {
    serde_json::from_str(body).map_err(|e| IpcError::Malformed(e.to_string()))
}

pub fn parse_page_message(body: &str) -> Result<PageMessage, IpcError> {
    serde_json::from_str(body).map_err(|e| IpcError::Malformed(e.to_string()))
}

/// Applies a chrome message to the window.
pub fn dispatch_chrome_message<F: PageViewFactory>(
    window: &mut BrowserWindow<F>,
    message: ChromeMessage,
) -> Result<(), BrowserError> {
    match message {
        ChromeMessage::UiReady => {}
        ChromeMessage::Action { name } => {
            let action = Action::from_name(&name).ok_or(IpcError::UnknownAction(name))?;
            window.trigger(action);
        }
        ChromeMessage::UrlInput { text } => window.set_url_text(&text),
        ChromeMessage::Navigate { text } => {
            window.set_url_text(&text);
            window.navigate();
        }
        ChromeMessage::FindInput { text } => window.set_find_text(&text),
        ChromeMessage::Find { text } => {
            window.set_find_text(&text);
            window.find();
        }
        ChromeMessage::Key { keys } => {
            window.handle_key(&keys);
        }
        ChromeMessage::SwitchTab { index } => window.switch_tab(index)?,
        ChromeMessage::CloseTab { index } => {
            window.close_tab(index);
        }
    }
    Ok(())
}

/// Resolves a page's icon: the declared `<link rel=icon>` href, or
/// `/favicon.ico` on the page's origin for http(s) pages.
pub fn resolve_icon_url(page_url: &str, href: Option<&str>) -> Option<String> {
    let base = Url::parse(page_url).ok()?;
    match href.map(str::trim).filter(|h| !h.is_empty()) {
        Some(href) => base.join(href).ok().map(String::from),
        None if matches!(base.scheme(), "http" | "https") => {
            base.join("/favicon.ico").ok().map(String::from)
        }
        None => None,
    }
}

#[derive(Debug, Serialize)]
pub struct ToolbarButton {
    pub action: Action,
    pub label: String,
    pub icon: Option<&'static str>,
    pub enabled: bool,
}

/// Everything the chrome scripts need to draw the window.
#[derive(Debug, Serialize)]
pub struct ChromeSnapshot<'a> {
    pub state: &'a WindowState,
    pub tabs: Vec<&'a TabStripEntry>,
    pub active_index: Option<usize>,
    pub menus: &'a [Menu],
    pub toolbar: Vec<ToolbarButton>,
}

pub fn build_snapshot<F: PageViewFactory>(window: &BrowserWindow<F>) -> ChromeSnapshot<'_> {
    let state = window.state();
    let toolbar = action::toolbar()
        .into_iter()
        .map(|entry| ToolbarButton {
            action: entry.action,
            label: entry.display_label(),
            icon: entry.icon,
            enabled: state.actions.is_enabled(entry.action),
        })
        .collect();

    ChromeSnapshot {
        state,
        tabs: window.tab_entries(),
        active_index: window.active_index(),
        menus: window.menus(),
        toolbar,
    }
}

/// Script that hands the current snapshot to the chrome's render function.
pub fn render_script<F: PageViewFactory>(window: &BrowserWindow<F>) -> Result<String, IpcError> {
    let json = serde_json::to_string(&build_snapshot(window))
        .map_err(|e| IpcError::Malformed(e.to_string()))?;
    Ok(format!("if(window.__mb_render)__mb_render({})", json))
}
