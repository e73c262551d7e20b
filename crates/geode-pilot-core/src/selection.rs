//! Selection abstractions for list-based views
//!
//! Unlike a plain cursor, the selection here may be empty: a choice control
//! starts with nothing chosen and falls back to nothing chosen when the
//! chosen item disappears.

/// A list with an optional selected item
///
/// # Examples
///
/// ```
/// use geode_pilot_core::selection::SelectableList;
///
/// let mut list = SelectableList::new(vec!["a", "b", "c"]);
/// assert_eq!(list.selected(), None);
///
/// list.select_next();
/// assert_eq!(list.selected(), Some(&"a"));
///
/// // Refresh the items, keeping "a" selected even though it moved
/// list.replace_preserving(vec!["z", "a"], |s| *s);
/// assert_eq!(list.selected(), Some(&"a"));
/// assert_eq!(list.selected_index(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    selected: Option<usize>,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
        }
    }
}

impl<T> SelectableList<T> {
    /// Create a list with nothing selected
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Select a specific index, clamped to the list bounds
    pub fn select(&mut self, index: usize) {
        self.selected = if self.items.is_empty() {
            None
        } else {
            Some(index.min(self.items.len() - 1))
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move to the next item, wrapping; from no selection go to the first
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        });
    }

    /// Move to the previous item, wrapping; from no selection go to the last
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Find and select an item matching a predicate
    ///
    /// Returns true if a matching item was found and selected. The selection
    /// is left untouched otherwise.
    pub fn select_where<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self.items.iter().position(predicate) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Replace all items, re-matching the selection by key rather than index
    ///
    /// Returns true if a previous selection was restored. When the selected
    /// key is gone the selection is cleared.
    pub fn replace_preserving<K, F>(&mut self, items: Vec<T>, key: F) -> bool
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let previous = self.selected().map(&key);
        self.items = items;
        self.selected = previous.and_then(|k| self.items.iter().position(|item| key(item) == k));
        self.selected.is_some()
    }

    /// Iterate over items with their selection state
    pub fn iter_with_selection(&self) -> impl Iterator<Item = (usize, &T, bool)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, item, Some(i) == self.selected))
    }
}

impl<T> From<Vec<T>> for SelectableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}
