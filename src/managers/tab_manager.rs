use crate::types::errors::TabError;
use crate::types::navigation::NavigationState;
use crate::types::tab::{TabId, TabStripEntry};

/// One open tab: its strip entry, its page view and the cached navigation state.
pub struct Tab<V> {
    pub id: TabId,
    pub entry: TabStripEntry,
    pub view: V,
    pub nav: NavigationState,
}

/// Trait defining the tab management interface.
pub trait TabManagerTrait<V> {
    fn push_tab(&mut self, id: TabId, view: V) -> usize;
    fn close_tab(&mut self, index: usize) -> Result<Tab<V>, TabError>;
    fn activate(&mut self, index: usize) -> Result<(), TabError>;
    fn get(&self, index: usize) -> Option<&Tab<V>>;
    fn get_mut(&mut self, index: usize) -> Option<&mut Tab<V>>;
    fn index_of(&self, id: TabId) -> Option<usize>;
    fn active_index(&self) -> Option<usize>;
    fn active(&self) -> Option<&Tab<V>>;
    fn active_mut(&mut self) -> Option<&mut Tab<V>>;
    fn tab_count(&self) -> usize;
    fn iter(&self) -> std::slice::Iter<'_, Tab<V>>;
    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tab<V>>;
}

/// Ordered tab collection; tab-strip position is the index into `tabs`.
pub struct TabManager<V> {
    tabs: Vec<Tab<V>>,
    active: Option<usize>,
}

impl<V> TabManager<V> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), TabError> {
        if index < self.tabs.len() {
            Ok(())
        } else {
            Err(TabError::InvalidIndex(index))
        }
    }

    fn mark_active(&mut self, index: Option<usize>) {
        self.active = index;
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            tab.entry.active = Some(i) == index;
        }
    }
}

impl<V> Default for TabManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TabManagerTrait<V> for TabManager<V> {
    /// Appends a tab and returns its index. The first tab becomes active.
    fn push_tab(&mut self, id: TabId, view: V) -> usize {
        self.tabs.push(Tab {
            id,
            entry: TabStripEntry::new(),
            view,
            nav: NavigationState::default(),
        });
        let index = self.tabs.len() - 1;
        if self.active.is_none() {
            self.mark_active(Some(index));
        }
        index
    }

    /// Removes a tab and hands it back so the caller can drop its view.
    /// The last remaining tab is never removed. When the active tab closes,
    /// its right neighbour (or the new last tab) becomes active.
    fn close_tab(&mut self, index: usize) -> Result<Tab<V>, TabError> {
        self.check_index(index)?;
        if self.tabs.len() == 1 {
            return Err(TabError::LastTab);
        }

        let removed = self.tabs.remove(index);
        let active = match self.active {
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };
        self.mark_active(active);
        Ok(removed)
    }

    fn activate(&mut self, index: usize) -> Result<(), TabError> {
        self.check_index(index)?;
        self.mark_active(Some(index));
        Ok(())
    }

    fn get(&self, index: usize) -> Option<&Tab<V>> {
        self.tabs.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Tab<V>> {
        self.tabs.get_mut(index)
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn active_index(&self) -> Option<usize> {
        self.active
    }

    fn active(&self) -> Option<&Tab<V>> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    fn active_mut(&mut self) -> Option<&mut Tab<V>> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn iter(&self) -> std::slice::Iter<'_, Tab<V>> {
        self.tabs.iter()
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tab<V>> {
        self.tabs.iter_mut()
    }
}
