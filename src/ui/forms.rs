use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::ValidationError;
use crate::models::{parse_page_count, ItemDetails, ItemKind, ReadingItem};

/// Picker shown after pressing `+`, before the variant form opens.
#[derive(Default, Clone)]
pub(crate) struct KindChooser {
    pub(crate) selected: usize,
}

impl KindChooser {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = ItemKind::ALL.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
    }

    pub(crate) fn current(&self) -> ItemKind {
        ItemKind::ALL[self.selected]
    }

    /// Shortcut letters: `b`ook, `m`agazine, `c`omic.
    pub(crate) fn kind_for_key(ch: char) -> Option<ItemKind> {
        match ch.to_ascii_lowercase() {
            'b' => Some(ItemKind::Book),
            'm' => Some(ItemKind::Magazine),
            'c' => Some(ItemKind::Comic),
            _ => None,
        }
    }
}

/// Every input the add form can show. Which ones appear depends on the kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ItemField {
    Title,
    Author,
    Pages,
    Issue,
    Month,
    Illustrator,
}

impl ItemField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ItemField::Title => "Title",
            ItemField::Author => "Author",
            ItemField::Pages => "Pages",
            ItemField::Issue => "Issue",
            ItemField::Month => "Month",
            ItemField::Illustrator => "Illustrator",
        }
    }

    fn required(self) -> bool {
        matches!(self, ItemField::Title | ItemField::Pages)
    }
}

/// Form state for a new reading item.
#[derive(Clone)]
pub(crate) struct ItemForm {
    pub(crate) kind: ItemKind,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) pages: String,
    pub(crate) issue: String,
    pub(crate) month: String,
    pub(crate) illustrator: String,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl ItemForm {
    pub(crate) fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            title: String::new(),
            author: String::new(),
            pages: String::new(),
            issue: String::new(),
            month: String::new(),
            illustrator: String::new(),
            active: 0,
            error: None,
        }
    }

    /// Fields shown for this form's kind, in display order.
    pub(crate) fn fields(&self) -> &'static [ItemField] {
        match self.kind {
            ItemKind::Book => &[ItemField::Title, ItemField::Author, ItemField::Pages],
            ItemKind::Magazine => &[
                ItemField::Title,
                ItemField::Author,
                ItemField::Issue,
                ItemField::Month,
            ],
            ItemKind::Comic => &[ItemField::Title, ItemField::Author, ItemField::Illustrator],
        }
    }

    pub(crate) fn active_field(&self) -> ItemField {
        self.fields()[self.active]
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields().len();
    }

    pub(crate) fn previous_field(&mut self) {
        let len = self.fields().len();
        self.active = (self.active + len - 1) % len;
    }

    fn value(&self, field: ItemField) -> &String {
        match field {
            ItemField::Title => &self.title,
            ItemField::Author => &self.author,
            ItemField::Pages => &self.pages,
            ItemField::Issue => &self.issue,
            ItemField::Month => &self.month,
            ItemField::Illustrator => &self.illustrator,
        }
    }

    fn value_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::Title => &mut self.title,
            ItemField::Author => &mut self.author,
            ItemField::Pages => &mut self.pages,
            ItemField::Issue => &mut self.issue,
            ItemField::Month => &mut self.month,
            ItemField::Illustrator => &mut self.illustrator,
        }
    }

    /// Append a character to the active field. The page field only takes
    /// digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active_field();
        if field == ItemField::Pages && !ch.is_ascii_digit() {
            return false;
        }
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active_field();
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return trimmed values ready for the shelf.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, ItemDetails), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("Title"));
        }
        let details = match self.kind {
            ItemKind::Book => ItemDetails::book(parse_page_count(&self.pages)?),
            ItemKind::Magazine => ItemDetails::magazine(self.issue.trim(), self.month.trim()),
            ItemKind::Comic => ItemDetails::comic(self.illustrator.trim()),
        };
        Ok((title.to_string(), self.author.trim().to_string(), details))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: ItemField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active_field() == field;

        let display = if value.is_empty() {
            if field.required() {
                "<required>".to_string()
            } else {
                "<optional>".to_string()
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: ItemField) -> usize {
        self.value(field).chars().count()
    }
}

/// Prompt for the identity (or prefix) to remove.
#[derive(Default, Clone)]
pub(crate) struct RemoveForm {
    pub(crate) prefix: String,
    pub(crate) error: Option<String>,
}

impl RemoveForm {
    /// Prefill with the short identity of the highlighted item.
    pub(crate) fn for_item(item: Option<&ReadingItem>) -> Self {
        Self {
            prefix: item.map(|item| item.short_id().to_string()).unwrap_or_default(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || ch.is_whitespace() {
            return false;
        }
        self.prefix.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut ItemForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn book_form_parses_pages() {
        let mut form = ItemForm::new(ItemKind::Book);
        type_into(&mut form, "Dune");
        form.next_field();
        type_into(&mut form, "Frank Herbert");
        form.next_field();
        type_into(&mut form, "4x12");

        let (title, author, details) = form.parse_inputs().unwrap();
        assert_eq!(title, "Dune");
        assert_eq!(author, "Frank Herbert");
        assert_eq!(details, ItemDetails::book(412));
    }

    #[test]
    fn book_form_rejects_zero_pages() {
        let mut form = ItemForm::new(ItemKind::Book);
        type_into(&mut form, "Dune");
        form.active = 2;
        type_into(&mut form, "0");
        assert_eq!(
            form.parse_inputs().unwrap_err(),
            ValidationError::NonPositivePages(0)
        );
    }

    #[test]
    fn missing_title_is_reported() {
        let form = ItemForm::new(ItemKind::Comic);
        assert_eq!(
            form.parse_inputs().unwrap_err(),
            ValidationError::MissingField("Title")
        );
    }

    #[test]
    fn magazine_form_cycles_through_four_fields() {
        let mut form = ItemForm::new(ItemKind::Magazine);
        assert_eq!(form.fields().len(), 4);
        form.previous_field();
        assert_eq!(form.active_field(), ItemField::Month);
        form.next_field();
        assert_eq!(form.active_field(), ItemField::Title);
    }

    #[test]
    fn kind_chooser_wraps() {
        let mut chooser = KindChooser::default();
        chooser.move_selection(-1);
        assert_eq!(chooser.current(), ItemKind::Comic);
        chooser.move_selection(1);
        assert_eq!(chooser.current(), ItemKind::Book);
        assert_eq!(KindChooser::kind_for_key('M'), Some(ItemKind::Magazine));
    }

    #[test]
    fn remove_form_prefills_short_id() {
        let item = ReadingItem::with_id("abcdef123456", "Dune", "FH", ItemDetails::book(1));
        let form = RemoveForm::for_item(Some(&item));
        assert_eq!(form.prefix, "abcdef");
        assert!(RemoveForm::for_item(None).prefix.is_empty());
    }
}
