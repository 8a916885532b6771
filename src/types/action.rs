use serde::{Deserialize, Serialize};

/// Every command the window can receive from menus, the toolbar, or shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NewTab,
    CloseTab,
    Bookmarks,
    History,
    Help,
    Quit,
    Back,
    Forward,
    Reload,
    Stop,
    FocusUrl,
    ShowFindBar,
    HideFindBar,
    FindNext,
}

impl Action {
    pub const ALL: [Action; 14] = [
        Action::NewTab,
        Action::CloseTab,
        Action::Bookmarks,
        Action::History,
        Action::Help,
        Action::Quit,
        Action::Back,
        Action::Forward,
        Action::Reload,
        Action::Stop,
        Action::FocusUrl,
        Action::ShowFindBar,
        Action::HideFindBar,
        Action::FindNext,
    ];

    /// The snake_case name used in settings files and IPC messages.
    pub fn name(self) -> &'static str {
        match self {
            Action::NewTab => "new_tab",
            Action::CloseTab => "close_tab",
            Action::Bookmarks => "bookmarks",
            Action::History => "history",
            Action::Help => "help",
            Action::Quit => "quit",
            Action::Back => "back",
            Action::Forward => "forward",
            Action::Reload => "reload",
            Action::Stop => "stop",
            Action::FocusUrl => "focus_url",
            Action::ShowFindBar => "show_find_bar",
            Action::HideFindBar => "hide_find_bar",
            Action::FindNext => "find_next",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// A menu or toolbar entry. `label` carries a `&` before the mnemonic letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub action: Action,
    pub label: &'static str,
    /// Freedesktop icon theme name.
    pub icon: Option<&'static str>,
}

impl MenuEntry {
    const fn new(action: Action, label: &'static str, icon: Option<&'static str>) -> Self {
        Self { action, label, icon }
    }

    /// Label with the mnemonic marker removed ("&Quit" -> "Quit").
    pub fn display_label(&self) -> String {
        self.label.replacen('&', "", 1)
    }

    /// The mnemonic letter, lowercased.
    pub fn mnemonic(&self) -> Option<char> {
        let (_, rest) = self.label.split_once('&')?;
        rest.chars().next().map(|c| c.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuItem {
    Entry(MenuEntry),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

const NEW_TAB: MenuEntry = MenuEntry::new(Action::NewTab, "&New Tab", Some("tab-new"));
const BOOKMARKS: MenuEntry = MenuEntry::new(Action::Bookmarks, "&Bookmarks", Some("user-bookmarks"));
const HISTORY: MenuEntry = MenuEntry::new(Action::History, "&History", None);
const HELP: MenuEntry = MenuEntry::new(Action::Help, "&Help", Some("help-about"));
const QUIT: MenuEntry = MenuEntry::new(Action::Quit, "&Quit", Some("window-close"));
const PREV: MenuEntry = MenuEntry::new(Action::Back, "&Prev", Some("go-previous"));
const NEXT: MenuEntry = MenuEntry::new(Action::Forward, "&Next", Some("go-next"));
const REFRESH: MenuEntry = MenuEntry::new(Action::Reload, "&Refresh", Some("view-refresh"));
const STOP: MenuEntry = MenuEntry::new(Action::Stop, "&Stop", Some("process-stop"));

/// The File and Page menus.
pub fn menu_bar() -> Vec<Menu> {
    vec![
        Menu {
            title: "File",
            items: vec![
                MenuItem::Entry(NEW_TAB),
                MenuItem::Entry(BOOKMARKS),
                MenuItem::Entry(HISTORY),
                MenuItem::Entry(HELP),
                MenuItem::Separator,
                MenuItem::Entry(QUIT),
            ],
        },
        Menu {
            title: "Page",
            items: page_entries().into_iter().map(MenuItem::Entry).collect(),
        },
    ]
}

/// Toolbar buttons; they duplicate the Page menu.
pub fn toolbar() -> Vec<MenuEntry> {
    page_entries()
}

fn page_entries() -> Vec<MenuEntry> {
    vec![PREV, NEXT, REFRESH, STOP]
}
