//! MiniBrowser: a minimal tabbed web browser.
//!
//! Entry point: opens the browser window on a wry/tao event loop.
//! When built without the `gui` feature, walks a scripted session against the
//! headless page engine and prints what the window would show.

use minibrowser::services::settings_engine::SettingsEngine;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    let settings = SettingsEngine::new(None).load_or_default();
    if let Err(e) = minibrowser::ui::webview_app::run(settings) {
        log::error!("browser failed to start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    init_logging();
    let settings = SettingsEngine::new(None).load_or_default();

    println!();
    println!("MiniBrowser v{} (headless demo)", env!("CARGO_PKG_VERSION"));
    println!();

    if let Err(e) = demo::run(settings) {
        log::error!("demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
mod demo {
    use std::sync::mpsc::Receiver;

    use minibrowser::app::BrowserWindow;
    use minibrowser::page::headless::{HeadlessDocument, HeadlessFactory, HeadlessWeb};
    use minibrowser::page::PageEvent;
    use minibrowser::types::action::Action;
    use minibrowser::types::errors::BrowserError;
    use minibrowser::types::settings::BrowserSettings;
    use minibrowser::types::tab::TabId;

    type Window = BrowserWindow<HeadlessFactory>;

    fn pump(window: &mut Window, events: &Receiver<(TabId, PageEvent)>) {
        while let Ok((tab, event)) = events.try_recv() {
            window.handle_page_event(tab, event);
        }
    }

    fn show(step: &str, window: &Window) {
        let state = window.state();
        println!("── {}", step);
        println!("   title:    {}", state.title);
        println!("   url:      {}", state.url_field.text);
        println!("   status:   {}", state.status);
        println!(
            "   back/fwd: {}/{}   tabs: {}",
            state.actions.back,
            state.actions.forward,
            window.tab_count()
        );
    }

    pub fn run(settings: BrowserSettings) -> Result<(), BrowserError> {
        let start = settings.general.start_url.clone();
        let web = HeadlessWeb::new()
            .with_document(&start, HeadlessDocument::new("Start", "Welcome to the start page"))
            .with_document(
                "http://example.com",
                HeadlessDocument::new("Example Domain", "This domain is for use in examples")
                    .with_icon("http://example.com/favicon.ico"),
            );
        let (factory, events) = HeadlessFactory::new(web);
        let mut window = BrowserWindow::new(factory, settings)?;
        pump(&mut window, &events);
        show("start page", &window);

        window.set_url_text("example.com");
        window.navigate();
        pump(&mut window, &events);
        show("typed example.com", &window);

        window.trigger(Action::ShowFindBar);
        window.set_find_text("domain");
        window.find();
        pump(&mut window, &events);
        show("find \"domain\"", &window);
        window.trigger(Action::HideFindBar);

        window.trigger(Action::Back);
        pump(&mut window, &events);
        show("back", &window);

        window.trigger(Action::NewTab);
        pump(&mut window, &events);
        show("new tab", &window);

        window.switch_tab(0)?;
        show("switched to first tab", &window);

        window.close_tab(1);
        show("closed second tab", &window);

        Ok(())
    }
}
