//! Browser window controller.
//!
//! Owns the tabs, the window-scoped UI state and the shortcut table. Front
//! ends feed it user input (`navigate`, `trigger`, `handle_key`, ...) and page
//! notifications (`handle_page_event`), then render [`WindowState`].

use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::page::{PageEvent, PageView, PageViewFactory};
use crate::types::action::{self, Action, Menu};
use crate::types::errors::{BrowserError, TabError};
use crate::types::settings::BrowserSettings;
use crate::types::tab::{TabId, TabStripEntry};
use crate::types::window_state::{AddressStack, Focus, WindowState};

/// Prepends `http://` unless the input already starts with `http://` or
/// `https://` (ASCII case-insensitive). Nothing else is validated.
pub fn with_default_scheme(input: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if has_scheme {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

/// "<title> - <suffix>", or just the suffix for untitled pages.
pub fn window_title(suffix: &str, page_title: &str) -> String {
    if page_title.is_empty() {
        suffix.to_string()
    } else {
        format!("{} - {}", page_title, suffix)
    }
}

pub struct BrowserWindow<F: PageViewFactory> {
    factory: F,
    settings: BrowserSettings,
    tabs: TabManager<F::View>,
    shortcuts: ShortcutManager,
    menus: Vec<Menu>,
    state: WindowState,
    quit_requested: bool,
}

impl<F: PageViewFactory> BrowserWindow<F> {
    /// Builds the window with one tab loading the configured start URL.
    pub fn new(factory: F, settings: BrowserSettings) -> Result<Self, BrowserError> {
        let mut shortcuts = ShortcutManager::new();
        if let Err(e) = shortcuts.apply_overrides(&settings.shortcuts) {
            log::warn!("ignoring shortcut overrides: {}", e);
        }

        let state = WindowState {
            title: settings.window.title_suffix.clone(),
            ..WindowState::default()
        };
        let mut window = Self {
            factory,
            settings,
            tabs: TabManager::new(),
            shortcuts,
            menus: action::menu_bar(),
            state,
            quit_requested: false,
        };

        window.open_new_tab()?;
        let start_url = window.settings.general.start_url.clone();
        if let Some(tab) = window.tabs.active_mut() {
            tab.view.load(&start_url);
        }
        Ok(window)
    }

    // ─── Tabs ───

    /// Appends a blank tab, makes it active and clears the URL field.
    pub fn open_new_tab(&mut self) -> Result<TabId, BrowserError> {
        let id = TabId::new();
        let view = self.factory.create(id)?;
        let index = self.tabs.push_tab(id, view);
        log::info!("opened tab {} at index {}", id, index);

        self.activate(index)?;
        self.state.url_field.clear();
        Ok(id)
    }

    /// Opens a tab for a link that asked for a new window and loads it there.
    pub fn open_url_in_new_tab(&mut self, url: &str) -> Result<TabId, BrowserError> {
        let id = self.open_new_tab()?;
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.load(url);
        }
        Ok(id)
    }

    /// Closes the tab at `index`. Returns `false` for the last remaining tab
    /// and for indices out of range.
    pub fn close_tab(&mut self, index: usize) -> bool {
        let was_active = self.tabs.active_index() == Some(index);
        match self.tabs.close_tab(index) {
            Ok(tab) => {
                log::info!("closed tab {} at index {}", tab.id, index);
                drop(tab);
                if was_active {
                    if let Some(active) = self.tabs.active_mut() {
                        active.view.set_visible(true);
                    }
                    self.sync_from_active();
                }
                true
            }
            Err(e) => {
                log::debug!("close request ignored: {}", e);
                false
            }
        }
    }

    pub fn close_active_tab(&mut self) -> bool {
        match self.tabs.active_index() {
            Some(index) => self.close_tab(index),
            None => false,
        }
    }

    /// Shows the tab at `index` and mirrors its navigation state into the window.
    pub fn switch_tab(&mut self, index: usize) -> Result<(), TabError> {
        self.activate(index)
    }

    fn activate(&mut self, index: usize) -> Result<(), TabError> {
        if index >= self.tabs.tab_count() {
            return Err(TabError::InvalidIndex(index));
        }
        if let Some(previous) = self.tabs.active_index().filter(|&p| p != index) {
            if let Some(tab) = self.tabs.get_mut(previous) {
                tab.view.set_visible(false);
            }
        }
        self.tabs.activate(index)?;
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.set_visible(true);
        }
        self.sync_from_active();
        Ok(())
    }

    /// Re-derives every mirrored field from the active tab in one step.
    fn sync_from_active(&mut self) {
        let Some(tab) = self.tabs.active() else {
            return;
        };
        let history = tab.view.history();
        let state = &mut self.state;

        state.title = window_title(&self.settings.window.title_suffix, &tab.view.title());
        state.url_field.set_text_at_start(&tab.view.url());
        state.icon = tab.view.icon();
        state.actions.back = history.can_go_back;
        state.actions.forward = history.can_go_forward;
        state.actions.stop = tab.nav.loading;
        state.address_stack = if tab.nav.loading {
            AddressStack::Progress
        } else {
            AddressStack::UrlField
        };
        state.progress = tab.nav.progress;
        state.status.clear();
    }

    // ─── Navigation ───

    pub fn set_url_text(&mut self, text: &str) {
        self.state.url_field.set_text(text);
    }

    /// Loads the URL field's text in the active tab.
    pub fn navigate(&mut self) {
        let url = with_default_scheme(&self.state.url_field.text);
        log::info!("navigating to {}", url);
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.load(&url);
        }
    }

    pub fn back(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.back();
        }
    }

    pub fn forward(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.forward();
        }
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.reload();
        }
    }

    pub fn stop(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.stop();
        }
    }

    // ─── Find bar ───

    pub fn set_find_text(&mut self, text: &str) {
        self.state.find_field.set_text(text);
    }

    /// Searches the active page for the find field's phrase.
    pub fn find(&mut self) {
        if self.state.find_field.text.is_empty() {
            return;
        }
        let wrap_around = self.settings.find.wrap_around;
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.find(&self.state.find_field.text, wrap_around);
        }
    }

    fn show_find_bar(&mut self) {
        self.state.find_bar_visible = true;
        self.state.focus = Some(Focus::FindField);
    }

    fn hide_find_bar(&mut self) {
        self.state.find_bar_visible = false;
        self.state.status.clear();
        self.state.focus = Some(Focus::Page);
        if let Some(tab) = self.tabs.active_mut() {
            tab.view.clear_find();
        }
    }

    // ─── Actions and keys ───

    /// Runs a menu, toolbar or shortcut action. No action checks its own
    /// enabled flag; the engine decides what back/forward/stop can do.
    pub fn trigger(&mut self, action: Action) {
        log::debug!("action {}", action.name());
        match action {
            Action::NewTab => {
                if let Err(e) = self.open_new_tab() {
                    log::error!("could not open a new tab: {}", e);
                }
            }
            Action::CloseTab => {
                self.close_active_tab();
            }
            Action::Bookmarks | Action::History | Action::Help => {
                log::info!("'{}' has no implementation", action.name());
            }
            Action::Quit => self.quit_requested = true,
            Action::Back => self.back(),
            Action::Forward => self.forward(),
            Action::Reload => self.reload(),
            Action::Stop => self.stop(),
            Action::FocusUrl => self.state.focus = Some(Focus::UrlField),
            Action::ShowFindBar => self.show_find_bar(),
            Action::HideFindBar => self.hide_find_bar(),
            Action::FindNext => {
                if self.state.find_bar_visible {
                    self.find();
                }
            }
        }
    }

    /// Dispatches a key combination such as `"/"`, `"Escape"` or `"Ctrl+T"`.
    /// Returns whether a binding consumed it.
    pub fn handle_key(&mut self, keys: &str) -> bool {
        match self.shortcuts.resolve(keys) {
            Some(action) => {
                self.trigger(action);
                true
            }
            None => false,
        }
    }

    // ─── Page notifications ───

    /// Applies a page-view notification. Background tabs only update their
    /// own cached state and tab-strip entry.
    pub fn handle_page_event(&mut self, tab_id: TabId, event: PageEvent) {
        let Some(index) = self.tabs.index_of(tab_id) else {
            log::debug!("dropping {:?} for closed tab {}", event, tab_id);
            return;
        };
        let is_active = self.tabs.active_index() == Some(index);
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        let state = &mut self.state;

        match event {
            PageEvent::UrlChanged(url) => {
                tab.entry.relabel(&tab.nav.title, &url);
                if is_active {
                    state.url_field.set_text_at_start(&url);
                }
                tab.nav.url = url;
            }
            PageEvent::TitleChanged(title) => {
                tab.entry.relabel(&title, &tab.nav.url);
                if is_active {
                    state.title = window_title(&self.settings.window.title_suffix, &title);
                }
                tab.nav.title = title;
            }
            PageEvent::LoadStarted => {
                tab.nav.begin_load();
                if is_active {
                    state.address_stack = AddressStack::Progress;
                    state.progress = 0;
                    state.actions.stop = true;
                    state.status = tab.view.url();
                }
            }
            PageEvent::LoadProgress(percent) => {
                tab.nav.set_progress(percent);
                if is_active {
                    state.progress = tab.nav.progress;
                }
            }
            PageEvent::LoadFinished(ok) => {
                let history = tab.view.history();
                tab.nav.finish_load(ok, history);
                if !ok {
                    log::warn!("load of {} did not succeed", tab.nav.url);
                }
                // Success and failure look the same; the engine renders its own error page.
                if is_active {
                    state.address_stack = AddressStack::UrlField;
                    state.actions.stop = false;
                    state.actions.back = history.can_go_back;
                    state.actions.forward = history.can_go_forward;
                    state.status.clear();
                }
            }
            PageEvent::IconChanged => {
                let icon = tab.view.icon();
                tab.entry.icon = icon.clone();
                if is_active {
                    state.icon = icon.clone();
                }
                tab.nav.icon = icon;
            }
            PageEvent::HistoryChanged => {
                let history = tab.view.history();
                tab.nav.history = history;
                if is_active {
                    state.actions.back = history.can_go_back;
                    state.actions.forward = history.can_go_forward;
                }
            }
            PageEvent::LinkHovered { url, title } => {
                if is_active {
                    state.status = if title.is_empty() { url } else { title };
                }
            }
            PageEvent::FindFinished { phrase, found } => {
                if is_active {
                    state.status = if found {
                        format!("Found \"{}\"", phrase)
                    } else {
                        format!("Not found \"{}\"", phrase)
                    };
                }
            }
        }
    }

    // ─── Accessors ───

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn shortcuts(&self) -> &ShortcutManager {
        &self.shortcuts
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.tab_count()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tabs.active_index()
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.tabs.active().map(|t| t.id)
    }

    pub fn tab_entries(&self) -> Vec<&TabStripEntry> {
        self.tabs.iter().map(|t| &t.entry).collect()
    }

    pub fn view(&self, index: usize) -> Option<&F::View> {
        self.tabs.get(index).map(|t| &t.view)
    }

    pub fn active_view(&self) -> Option<&F::View> {
        self.tabs.active().map(|t| &t.view)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut F::View> {
        self.tabs.active_mut().map(|t| &mut t.view)
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut F::View> + '_ {
        self.tabs.iter_mut().map(|t| &mut t.view)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Returns and clears the pending focus request.
    pub fn take_focus_request(&mut self) -> Option<Focus> {
        self.state.focus.take()
    }
}
