use crate::models::{ItemKind, ReadingItem};
use crate::shelf::Shelf;

/// The main list: a snapshot of the shelf narrowed by the kind filter and the
/// title search.
pub(crate) struct ShelfScreen {
    pub(crate) visible: Vec<ReadingItem>,
    pub(crate) kind_filter: Option<ItemKind>,
    pub(crate) query: Option<String>,
    pub(crate) selected: usize,
}

impl ShelfScreen {
    pub(crate) fn new(shelf: &Shelf) -> Self {
        let mut screen = Self {
            visible: Vec::new(),
            kind_filter: None,
            query: None,
            selected: 0,
        };
        screen.refresh(shelf);
        screen
    }

    /// Recompute the visible rows from the shelf.
    pub(crate) fn refresh(&mut self, shelf: &Shelf) {
        let query = self.query.as_deref().filter(|q| !q.trim().is_empty());
        let matches: Vec<&ReadingItem> = match (self.kind_filter, query) {
            (None, None) => shelf.list_all().collect(),
            (Some(kind), None) => shelf.filter_by_kind(kind),
            (kind, Some(term)) => shelf
                .search_by_title(term)
                .into_iter()
                .filter(|item| kind.map_or(true, |k| item.kind() == k))
                .collect(),
        };
        self.visible = matches.into_iter().cloned().collect();
        self.ensure_in_bounds();
    }

    pub(crate) fn set_query(&mut self, shelf: &Shelf, query: Option<String>) {
        self.query = query;
        self.refresh(shelf);
    }

    /// Advance the kind filter: All → Book → Magazine → Comic → All.
    pub(crate) fn cycle_kind_filter(&mut self, shelf: &Shelf, forward: bool) -> Option<ItemKind> {
        let order = [
            None,
            Some(ItemKind::Book),
            Some(ItemKind::Magazine),
            Some(ItemKind::Comic),
        ];
        let position = order
            .iter()
            .position(|kind| *kind == self.kind_filter)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % order.len()
        } else {
            (position + order.len() - 1) % order.len()
        };
        self.kind_filter = order[next];
        self.refresh(shelf);
        self.kind_filter
    }

    pub(crate) fn current_item(&self) -> Option<&ReadingItem> {
        self.visible.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.selected = self.visible.len() - 1;
        }
    }

    /// Move the highlight onto the item with `id` if it is visible.
    pub(crate) fn focus(&mut self, id: &str) {
        if let Some(index) = self.visible.iter().position(|item| item.id() == id) {
            self.selected = index;
        }
    }

    pub(crate) fn has_filters(&self) -> bool {
        self.kind_filter.is_some()
            || self
                .query
                .as_ref()
                .map(|q| !q.trim().is_empty())
                .unwrap_or(false)
    }

    fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }
}
