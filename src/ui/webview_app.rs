//! Desktop front end using `wry` + `tao`.
//!
//! Architecture:
//! - One tao window holds three kinds of child web views: the toolbar chrome
//!   (tab strip, menus, navigation buttons, URL field / progress bar), the
//!   footer chrome (find bar and status line), and one page view per tab.
//! - Only the active tab's page view is visible.
//! - Chrome pages post `{"cmd": ...}` IPC messages; page views post
//!   `{"kind": ...}` messages. Everything is funnelled through [`UserEvent`]
//!   into the event loop, which owns the [`BrowserWindow`].
//! - After each event the chrome is re-rendered from `WindowState`.
//!
//! On Linux, child web views require an X11 session.

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Icon, Window, WindowBuilder};
use wry::{WebView, WebViewBuilder};

use super::layout::{Area, Layout};
use super::wry_page::WryPageFactory;
use crate::app::BrowserWindow;
use crate::ipc_handler::{dispatch_chrome_message, parse_chrome_message, render_script};
use crate::page::PageEvent;
use crate::services::favicon::{FaviconImage, FaviconLoader};
use crate::types::settings::BrowserSettings;
use crate::types::tab::TabId;
use crate::types::window_state::Focus;

const CHROME_CSS: &str = include_str!("../../resources/ui/chrome.css");
const CHROME_JS: &str = include_str!("../../resources/ui/chrome.js");
const TOOLBAR_BODY: &str = include_str!("../../resources/ui/toolbar.html");
const FOOTER_BODY: &str = include_str!("../../resources/ui/footer.html");

#[derive(Debug)]
pub enum UserEvent {
    /// Raw IPC body from a chrome web view.
    Chrome(String),
    /// Notification from a tab's page view.
    Page(TabId, PageEvent),
    /// Key combination pressed inside a page.
    Key(String),
    /// A page asked to open a link in a new window.
    OpenInNewTab(String),
    FaviconLoaded { url: String, image: FaviconImage },
}

type Browser = BrowserWindow<WryPageFactory>;

fn chrome_page(body: &str) -> String {
    let mut html = String::with_capacity(body.len() + CHROME_CSS.len() + CHROME_JS.len() + 128);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(CHROME_CSS);
    html.push_str("</style></head><body>");
    html.push_str(body);
    html.push_str("<script>");
    html.push_str(CHROME_JS);
    html.push_str("</script></body></html>");
    html
}

fn build_chrome(
    window: &Window,
    proxy: &EventLoopProxy<UserEvent>,
    body: &str,
    area: Area,
) -> Result<WebView, wry::Error> {
    let ipc_proxy = proxy.clone();
    WebViewBuilder::new()
        .with_html(chrome_page(body))
        .with_bounds(area.to_rect())
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::Chrome(request.body().clone()));
        })
        .with_devtools(cfg!(debug_assertions))
        .build_as_child(window)
}

/// Everything the event loop draws besides the page views.
struct Frontend {
    window: Rc<Window>,
    toolbar: WebView,
    footer: WebView,
    content_area: Rc<Cell<Area>>,
    proxy: EventLoopProxy<UserEvent>,
    favicons: Option<FaviconLoader>,
    shown_title: String,
    shown_icon: Option<String>,
    find_bar_visible: bool,
}

impl Frontend {
    fn layout(&self) -> Layout {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        Layout::compute(size.width, size.height, self.find_bar_visible)
    }

    fn relayout(&self, browser: &mut Browser) {
        let layout = self.layout();
        self.content_area.set(layout.content);
        for (webview, area) in [(&self.toolbar, layout.toolbar), (&self.footer, layout.footer)] {
            if let Err(e) = webview.set_bounds(area.to_rect()) {
                log::warn!("could not resize chrome: {}", e);
            }
        }
        for view in browser.views_mut() {
            view.set_bounds(layout.content);
        }
    }

    /// Pushes the window state out to tao and the chrome web views.
    fn sync(&mut self, browser: &mut Browser) {
        let state = browser.state();

        if state.title != self.shown_title {
            self.shown_title = state.title.clone();
            self.window.set_title(&self.shown_title);
        }

        if state.icon != self.shown_icon {
            self.shown_icon = state.icon.clone();
            self.request_icon();
        }

        let find_bar_changed = state.find_bar_visible != self.find_bar_visible;
        self.find_bar_visible = state.find_bar_visible;

        match render_script(browser) {
            Ok(script) => {
                for webview in [&self.toolbar, &self.footer] {
                    if let Err(e) = webview.evaluate_script(&script) {
                        log::warn!("could not render chrome: {}", e);
                    }
                }
            }
            Err(e) => log::error!("could not build chrome snapshot: {}", e),
        }

        if find_bar_changed {
            self.relayout(browser);
        }

        if let Some(focus) = browser.take_focus_request() {
            self.apply_focus(browser, focus);
        }
    }

    fn request_icon(&self) {
        let Some(url) = self.shown_icon.clone() else {
            self.window.set_window_icon(None);
            return;
        };
        let Some(loader) = &self.favicons else {
            return;
        };
        let proxy = self.proxy.clone();
        loader.fetch(url, move |url, result| match result {
            Ok(image) => {
                let _ = proxy.send_event(UserEvent::FaviconLoaded { url, image });
            }
            Err(e) => log::debug!("no icon from {}: {}", url, e),
        });
    }

    fn apply_icon(&self, url: &str, image: FaviconImage) {
        // A newer page may have replaced the icon while this one loaded.
        if self.shown_icon.as_deref() != Some(url) {
            return;
        }
        match Icon::from_rgba(image.rgba, image.width, image.height) {
            Ok(icon) => self.window.set_window_icon(Some(icon)),
            Err(e) => log::debug!("bad icon from {}: {}", url, e),
        }
    }

    fn apply_focus(&self, browser: &Browser, focus: Focus) {
        let (webview, script) = match focus {
            Focus::UrlField => (&self.toolbar, "if(window.__mb_focus)__mb_focus('url')"),
            Focus::FindField => (&self.footer, "if(window.__mb_focus)__mb_focus('find')"),
            Focus::Page => {
                if let Some(view) = browser.active_view() {
                    view.focus();
                }
                return;
            }
        };
        if let Err(e) = webview.focus() {
            log::debug!("could not focus chrome: {}", e);
        }
        if let Err(e) = webview.evaluate_script(script) {
            log::debug!("could not focus field: {}", e);
        }
    }

    fn handle_user_event(&mut self, browser: &mut Browser, event: UserEvent) {
        match event {
            UserEvent::Chrome(body) => match parse_chrome_message(&body) {
                Ok(message) => {
                    log::trace!("chrome message {:?}", message);
                    if let Err(e) = dispatch_chrome_message(browser, message) {
                        log::warn!("chrome message rejected: {}", e);
                    }
                }
                Err(e) => log::warn!("{}", e),
            },
            UserEvent::Page(tab, event) => browser.handle_page_event(tab, event),
            UserEvent::Key(keys) => {
                browser.handle_key(&keys);
            }
            UserEvent::OpenInNewTab(url) => {
                if let Err(e) = browser.open_url_in_new_tab(&url) {
                    log::error!("could not open {} in a new tab: {}", url, e);
                }
            }
            UserEvent::FaviconLoaded { url, image } => self.apply_icon(&url, image),
        }
    }
}

/// Opens the browser window and runs the event loop until the window closes.
pub fn run(settings: BrowserSettings) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title(&settings.window.title_suffix)
            .with_inner_size(LogicalSize::new(
                settings.window.width as f64,
                settings.window.height as f64,
            ))
            .build(&event_loop)?,
    );

    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let layout = Layout::compute(size.width, size.height, false);
    let toolbar = build_chrome(&window, &proxy, TOOLBAR_BODY, layout.toolbar)?;
    let footer = build_chrome(&window, &proxy, FOOTER_BODY, layout.footer)?;

    let content_area = Rc::new(Cell::new(layout.content));
    let factory = WryPageFactory::new(Rc::clone(&window), proxy.clone(), Rc::clone(&content_area));
    let mut browser = BrowserWindow::new(factory, settings)?;

    let favicons = match FaviconLoader::new() {
        Ok(loader) => Some(loader),
        Err(e) => {
            log::warn!("favicons disabled: {}", e);
            None
        }
    };

    let mut frontend = Frontend {
        window,
        toolbar,
        footer,
        content_area,
        proxy,
        favicons,
        shown_title: String::new(),
        shown_icon: None,
        find_bar_visible: false,
    };
    frontend.sync(&mut browser);
    log::info!("browser window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                log::info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => frontend.relayout(&mut browser),

            Event::UserEvent(user_event) => {
                frontend.handle_user_event(&mut browser, user_event);
                frontend.sync(&mut browser);
                if browser.quit_requested() {
                    log::info!("quit requested");
                    *control_flow = ControlFlow::Exit;
                }
            }

            _ => {}
        }
    });
}
