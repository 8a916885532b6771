//! Desktop UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child web views need X11)
//! - macOS: WKWebView
//!
//! The chrome (menus, toolbar, tab strip, find bar, status line) is HTML in two
//! small web views above and below the page area. Every tab owns one child
//! web view stacked in the page area; only the active one is visible.

pub mod layout;
pub mod webview_app;
pub mod wry_page;
