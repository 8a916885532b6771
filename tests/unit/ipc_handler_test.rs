use std::sync::mpsc::Receiver;

use minibrowser::app::BrowserWindow;
use minibrowser::ipc_handler::*;
use minibrowser::page::headless::{HeadlessDocument, HeadlessFactory, HeadlessWeb, PageRequest};
use minibrowser::page::PageEvent;
use minibrowser::types::action::Action;
use minibrowser::types::errors::{BrowserError, IpcError, TabError};
use minibrowser::types::settings::BrowserSettings;
use minibrowser::types::tab::TabId;

type Window = BrowserWindow<HeadlessFactory>;

fn open() -> (Window, Receiver<(TabId, PageEvent)>) {
    let web = HeadlessWeb::new().with_document(
        "http://www.google.com",
        HeadlessDocument::new("Google", "Search the world's information"),
    );
    let (factory, events) = HeadlessFactory::new(web);
    let mut window = BrowserWindow::new(factory, BrowserSettings::default()).unwrap();
    pump(&mut window, &events);
    (window, events)
}

fn pump(window: &mut Window, events: &Receiver<(TabId, PageEvent)>) {
    while let Ok((tab, event)) = events.try_recv() {
        window.handle_page_event(tab, event);
    }
}

fn dispatch(window: &mut Window, body: &str) -> Result<(), BrowserError> {
    let message = parse_chrome_message(body)?;
    dispatch_chrome_message(window, message)
}

// === Parsing ===

#[test]
fn test_parse_chrome_messages() {
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"ui_ready"}"#).unwrap(),
        ChromeMessage::UiReady
    );
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"navigate","text":"example.com"}"#).unwrap(),
        ChromeMessage::Navigate {
            text: "example.com".into()
        }
    );
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"switch_tab","index":2}"#).unwrap(),
        ChromeMessage::SwitchTab { index: 2 }
    );
}

#[test]
fn test_parse_rejects_unknown_and_malformed() {
    assert!(matches!(
        parse_chrome_message(r#"{"cmd":"open_settings"}"#),
        Err(IpcError::Malformed(_))
    ));
    assert!(matches!(
        parse_chrome_message("not json"),
        Err(IpcError::Malformed(_))
    ));
    assert!(matches!(
        parse_chrome_message(r#"{"cmd":"switch_tab","index":-1}"#),
        Err(IpcError::Malformed(_))
    ));
}

#[test]
fn test_parse_page_messages() {
    assert_eq!(
        parse_page_message(r#"{"kind":"hover","url":"http://a/"}"#).unwrap(),
        PageMessage::Hover {
            url: "http://a/".into(),
            title: String::new()
        }
    );
    assert_eq!(
        parse_page_message(r#"{"kind":"progress","value":70}"#).unwrap(),
        PageMessage::Progress { value: 70 }
    );
    assert_eq!(
        parse_page_message(r#"{"kind":"icon","href":null}"#).unwrap(),
        PageMessage::Icon { href: None }
    );
    assert_eq!(
        parse_page_message(r#"{"kind":"url","url":"http://a/#b","how":"traverse"}"#).unwrap(),
        PageMessage::Url {
            url: "http://a/#b".into(),
            how: UrlChange::Traverse
        }
    );
    assert!(parse_page_message(r#"{"kind":"progress","value":700}"#).is_err());
    assert!(parse_page_message(r#"{"kind":"url","url":"http://a/","how":"jump"}"#).is_err());
}

// === Dispatch ===

#[test]
fn test_url_input_then_navigate() {
    let (mut window, _events) = open();
    dispatch(&mut window, r#"{"cmd":"url_input","text":"exa"}"#).unwrap();
    assert_eq!(window.state().url_field.text, "exa");
    assert_eq!(window.state().url_field.cursor, 3);

    dispatch(&mut window, r#"{"cmd":"navigate","text":"example.com"}"#).unwrap();
    assert_eq!(
        window.active_view().unwrap().requests().last(),
        Some(&PageRequest::Load("http://example.com".into()))
    );
}

#[test]
fn test_action_messages_trigger_actions() {
    let (mut window, _events) = open();
    dispatch(&mut window, r#"{"cmd":"action","name":"new_tab"}"#).unwrap();
    assert_eq!(window.tab_count(), 2);

    dispatch(&mut window, r#"{"cmd":"close_tab","index":0}"#).unwrap();
    assert_eq!(window.tab_count(), 1);

    dispatch(&mut window, r#"{"cmd":"action","name":"quit"}"#).unwrap();
    assert!(window.quit_requested());
}

#[test]
fn test_unknown_action_is_an_error() {
    let (mut window, _events) = open();
    assert!(matches!(
        dispatch(&mut window, r#"{"cmd":"action","name":"print"}"#),
        Err(BrowserError::Ipc(IpcError::UnknownAction(_)))
    ));
}

#[test]
fn test_switch_tab_out_of_range_is_an_error() {
    let (mut window, _events) = open();
    assert!(matches!(
        dispatch(&mut window, r#"{"cmd":"switch_tab","index":4}"#),
        Err(BrowserError::Tab(TabError::InvalidIndex(4)))
    ));
}

#[test]
fn test_find_messages() {
    let (mut window, events) = open();
    dispatch(&mut window, r#"{"cmd":"key","keys":"/"}"#).unwrap();
    assert!(window.state().find_bar_visible);

    dispatch(&mut window, r#"{"cmd":"find_input","text":"sea"}"#).unwrap();
    assert_eq!(window.state().find_field.text, "sea");

    dispatch(&mut window, r#"{"cmd":"find","text":"world"}"#).unwrap();
    pump(&mut window, &events);
    assert_eq!(window.state().status, "Found \"world\"");
}

// === Icons ===

#[test]
fn test_resolve_icon_url() {
    assert_eq!(
        resolve_icon_url("http://example.com/a/b.html", Some("img/icon.png")).as_deref(),
        Some("http://example.com/a/img/icon.png")
    );
    assert_eq!(
        resolve_icon_url("https://example.com/a/b.html", None).as_deref(),
        Some("https://example.com/favicon.ico")
    );
    assert_eq!(
        resolve_icon_url("https://example.com/", Some("  ")).as_deref(),
        Some("https://example.com/favicon.ico")
    );
    assert_eq!(
        resolve_icon_url("http://example.com/", Some("data:image/png;base64,AAAA")).as_deref(),
        Some("data:image/png;base64,AAAA")
    );
    assert_eq!(resolve_icon_url("about:blank", None), None);
    assert_eq!(resolve_icon_url("not a url", Some("x.png")), None);
}

// === Rendering ===

#[test]
fn test_snapshot_reflects_window() {
    let (mut window, _events) = open();
    window.open_new_tab().unwrap();
    let snapshot = build_snapshot(&window);

    assert_eq!(snapshot.tabs.len(), 2);
    assert_eq!(snapshot.active_index, Some(1));
    assert_eq!(snapshot.menus.len(), 2);
    let actions: Vec<Action> = snapshot.toolbar.iter().map(|b| b.action).collect();
    assert_eq!(
        actions,
        vec![Action::Back, Action::Forward, Action::Reload, Action::Stop]
    );
    assert!(!snapshot.toolbar[0].enabled);
    assert!(snapshot.toolbar[2].enabled);
    assert_eq!(snapshot.toolbar[0].label, "Prev");
}

#[test]
fn test_render_script_embeds_json_snapshot() {
    let (window, _events) = open();
    let script = render_script(&window).unwrap();
    assert!(script.starts_with("if(window.__mb_render)__mb_render({"));
    assert!(script.ends_with("})"));

    let json = &script["if(window.__mb_render)__mb_render(".len()..script.len() - 1];
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["state"]["title"], "Google - Browser");
    assert_eq!(value["state"]["address_stack"], "url_field");
    assert_eq!(value["tabs"][0]["label"], "Google");
    assert_eq!(value["menus"][0]["items"][4]["kind"], "separator");
    assert_eq!(value["toolbar"][3]["action"], "stop");
    assert!(value["state"].get("focus").is_none());
}
