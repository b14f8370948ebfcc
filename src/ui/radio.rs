//! A mutually exclusive choice group.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// One option in a [`RadioGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioButtonItem {
    pub id: usize,
    pub title: String,
}

impl RadioButtonItem {
    pub fn new(id: usize, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Render-ready view of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioRow {
    pub id: usize,
    /// Cursor marker, radio mark and title, padded to the widest row.
    pub label: String,
    pub selected: bool,
    pub focused: bool,
    /// Palette entry to draw the row with.
    pub style: &'static str,
}

/// A list of options of which exactly one is marked selected.
///
/// The group does not change its own selection when an item is clicked: it
/// reports the click, and the owner decides what becomes selected through
/// [`set_selected`](Self::set_selected).
#[derive(Debug, Clone)]
pub struct RadioGroup {
    items: Vec<RadioButtonItem>,
    selected: usize,
    cursor: usize,
}

impl RadioGroup {
    /// Creates a group over `items` with `selected` marked.
    ///
    /// The keyboard cursor starts on the selected item, or the first item if
    /// `selected` matches none.
    pub fn new(items: impl IntoIterator<Item = RadioButtonItem>, selected: usize) -> Self {
        let items: Vec<_> = items.into_iter().collect();
        let cursor = items.iter().position(|i| i.id == selected).unwrap_or(0);
        Self {
            items,
            selected,
            cursor,
        }
    }

    pub fn items(&self) -> &[RadioButtonItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Marks `id` as selected and moves the cursor onto it.
    pub fn set_selected(&mut self, id: usize) {
        self.selected = id;
        if let Some(pos) = self.items.iter().position(|i| i.id == id) {
            self.cursor = pos;
        }
    }

    /// Id of the item under the keyboard cursor.
    pub fn focused(&self) -> Option<usize> {
        self.items.get(self.cursor).map(|i| i.id)
    }

    /// Moves the cursor up one item, wrapping to the bottom.
    pub fn focus_previous(&mut self) {
        if !self.items.is_empty() {
            self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
        }
    }

    /// Moves the cursor down one item, wrapping to the top.
    pub fn focus_next(&mut self) {
        if !self.items.is_empty() {
            self.cursor = (self.cursor + 1) % self.items.len();
        }
    }

    /// Reports a click on `id` to `on_item_select`.
    ///
    /// Returns `false` and calls nothing if no item has that id.
    pub fn click(&self, id: usize, on_item_select: Option<&mut dyn FnMut(usize)>) -> bool {
        if !self.items.iter().any(|i| i.id == id) {
            return false;
        }
        if let Some(callback) = on_item_select {
            callback(id);
        }
        true
    }

    /// One row per item, labels padded to a common width so the group lines
    /// up as a column when centered.
    pub fn rows(&self) -> Vec<RadioRow> {
        let labels: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| {
                let cursor = if pos == self.cursor { '>' } else { ' ' };
                let mark = if item.id == self.selected { '•' } else { ' ' };
                format!("{} ({}) {}", cursor, mark, item.title)
            })
            .collect();
        let widest = labels.iter().map(|l| l.width()).max().unwrap_or(0);

        self.items
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(pos, (item, label))| {
                let selected = item.id == self.selected;
                let pad = widest - label.width();
                RadioRow {
                    id: item.id,
                    label: format!("{}{}", label, " ".repeat(pad)),
                    selected,
                    focused: pos == self.cursor,
                    style: if selected { "option_selected" } else { "option" },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<RadioButtonItem> {
        vec![
            RadioButtonItem::new(1, "Light Theme"),
            RadioButtonItem::new(2, "Dark Theme"),
            RadioButtonItem::new(3, "Auto Theme"),
        ]
    }

    #[test]
    fn test_cursor_starts_on_selected() {
        let group = RadioGroup::new(sample_items(), 2);
        assert_eq!(group.focused(), Some(2));
    }

    #[test]
    fn test_cursor_starts_on_first_when_selection_unknown() {
        let group = RadioGroup::new(sample_items(), 99);
        assert_eq!(group.focused(), Some(1));
    }

    #[test]
    fn test_focus_wraps() {
        let mut group = RadioGroup::new(sample_items(), 1);
        group.focus_previous();
        assert_eq!(group.focused(), Some(3));
        group.focus_next();
        assert_eq!(group.focused(), Some(1));
    }

    #[test]
    fn test_focus_on_empty_group() {
        let mut group = RadioGroup::new(Vec::new(), 0);
        group.focus_next();
        group.focus_previous();
        assert_eq!(group.focused(), None);
        assert!(group.rows().is_empty());
    }

    #[test]
    fn test_click_reports_without_selecting() {
        let group = RadioGroup::new(sample_items(), 1);
        let mut clicked = Vec::new();
        let mut record = |id: usize| clicked.push(id);

        assert!(group.click(3, Some(&mut record)));
        assert_eq!(group.selected(), 1);
        assert_eq!(clicked, vec![3]);
    }

    #[test]
    fn test_click_unknown_id() {
        let group = RadioGroup::new(sample_items(), 1);
        let mut called = false;
        let mut record = |_: usize| called = true;

        assert!(!group.click(42, Some(&mut record)));
        assert!(!called);
    }

    #[test]
    fn test_click_without_callback() {
        let group = RadioGroup::new(sample_items(), 1);
        assert!(group.click(2, None));
    }

    #[test]
    fn test_rows_mark_exactly_one_selected() {
        let group = RadioGroup::new(sample_items(), 2);
        let rows = group.rows();
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
        assert!(rows[1].selected);
        assert_eq!(rows[1].style, "option_selected");
        assert_eq!(rows[0].style, "option");
        assert!(rows[1].label.contains("(•) Dark Theme"));
        assert!(rows[0].label.contains("( ) Light Theme"));
    }

    #[test]
    fn test_rows_share_width() {
        let group = RadioGroup::new(sample_items(), 1);
        let widths: Vec<_> = group.rows().iter().map(|r| r.label.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_set_selected_moves_cursor() {
        let mut group = RadioGroup::new(sample_items(), 1);
        group.set_selected(3);
        assert_eq!(group.selected(), 3);
        assert_eq!(group.focused(), Some(3));
        assert!(group.rows()[2].label.starts_with('>'));
    }
}
