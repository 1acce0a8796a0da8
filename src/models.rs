//! Domain models for the reading shelf. A `ReadingItem` carries the fields every
//! variant shares, while `ItemDetails` holds the variant-specific payload. Each
//! concern (short line, detail text, persistence record) is a single match over
//! the closed set of variants so adding a variant fails to compile until every
//! concern handles it.

use std::fmt;

use uuid::Uuid;

use crate::error::{RecordError, ValidationError};

/// Number of identity characters shown to the user. The same prefix is
/// accepted back when removing items.
pub const SHORT_ID_LEN: usize = 6;

/// Variant tag shared by the in-memory model and the `kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Book,
    Magazine,
    Comic,
}

impl ItemKind {
    /// Every variant in menu order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Book, ItemKind::Magazine, ItemKind::Comic];

    /// Tag written to the `kind` column.
    pub fn as_tag(self) -> &'static str {
        match self {
            ItemKind::Book => "Book",
            ItemKind::Magazine => "Magazine",
            ItemKind::Comic => "Comic",
        }
    }

    /// Parse a stored tag. Unknown tags return `None` so the loader can skip
    /// the row.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Book" => Some(ItemKind::Book),
            "Magazine" => Some(ItemKind::Magazine),
            "Comic" => Some(ItemKind::Comic),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Variant-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetails {
    Book { pages: i64 },
    Magazine { issue: String, month: String },
    Comic { illustrator: String },
}

impl ItemDetails {
    pub fn book(pages: i64) -> Self {
        ItemDetails::Book { pages }
    }

    pub fn magazine(issue: impl Into<String>, month: impl Into<String>) -> Self {
        ItemDetails::Magazine {
            issue: issue.into(),
            month: month.into(),
        }
    }

    pub fn comic(illustrator: impl Into<String>) -> Self {
        ItemDetails::Comic {
            illustrator: illustrator.into(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetails::Book { .. } => ItemKind::Book,
            ItemDetails::Magazine { .. } => ItemKind::Magazine,
            ItemDetails::Comic { .. } => ItemKind::Comic,
        }
    }

    /// `(label, value)` pairs in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ItemDetails::Book { pages } => vec![("Pages", pages.to_string())],
            ItemDetails::Magazine { issue, month } => {
                vec![("Issue", issue.clone()), ("Month", month.clone())]
            }
            ItemDetails::Comic { illustrator } => vec![("Illustrator", illustrator.clone())],
        }
    }
}

/// Source of fresh identities. Injected so tests can use predictable ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Default generator: a v4 UUID rendered as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic generator producing `prefix-000001`, `prefix-000002`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{:06}", self.prefix, self.counter)
    }
}

/// One catalogued book, magazine or comic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingItem {
    /// Opaque identity. Never changes once assigned.
    id: String,
    pub title: String,
    pub author: String,
    pub details: ItemDetails,
}

impl ReadingItem {
    /// Build a fresh item, drawing its identity from `ids`. Title and author are
    /// stored as given; see [`ReadingItem::validate`].
    pub fn new(
        ids: &mut dyn IdGenerator,
        title: impl Into<String>,
        author: impl Into<String>,
        details: ItemDetails,
    ) -> Self {
        Self::with_id(ids.next_id(), title, author, details)
    }

    /// Rebuild an item whose identity already exists (for example a stored row).
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        details: ItemDetails,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    /// Leading characters of the identity used for display and removal.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// `ID: abc123... - Title: Dune - Author: Frank Herbert`
    pub fn short_line(&self) -> String {
        format!(
            "ID: {}... - Title: {} - Author: {}",
            self.short_id(),
            self.title,
            self.author
        )
    }

    /// Multi-line description: the variant tag, the short line, then one
    /// `Field: value` line per variant field.
    pub fn details(&self) -> String {
        let mut text = format!("Type: {}\n{}", self.kind(), self.short_line());
        for (label, value) in self.details.fields() {
            text.push('\n');
            text.push_str(label);
            text.push_str(": ");
            text.push_str(&value);
        }
        text
    }

    /// Checks applied before an item is written: a non-blank title and a
    /// positive page count for books.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if let ItemDetails::Book { pages } = self.details {
            if pages <= 0 {
                return Err(ValidationError::NonPositivePages(pages));
            }
        }
        Ok(())
    }

    /// Flatten into the row shape stored in the `items` table.
    pub fn to_record(&self) -> ItemRecord {
        let mut record = ItemRecord {
            id: self.id.clone(),
            kind: self.kind().as_tag().to_string(),
            title: self.title.clone(),
            author: Some(self.author.clone()),
            pages: None,
            issue: None,
            month: None,
            illustrator: None,
        };
        match &self.details {
            ItemDetails::Book { pages } => record.pages = Some(*pages),
            ItemDetails::Magazine { issue, month } => {
                record.issue = Some(issue.clone());
                record.month = Some(month.clone());
            }
            ItemDetails::Comic { illustrator } => record.illustrator = Some(illustrator.clone()),
        }
        record
    }
}

impl fmt::Display for ReadingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_line())
    }
}

/// Raw row from the `items` table. Variant columns are `None` when they do not
/// apply to the stored kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub author: Option<String>,
    pub pages: Option<i64>,
    pub issue: Option<String>,
    pub month: Option<String>,
    pub illustrator: Option<String>,
}

impl TryFrom<ItemRecord> for ReadingItem {
    type Error = RecordError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let kind = ItemKind::from_tag(&record.kind).ok_or_else(|| RecordError::UnknownKind {
            id: record.id.clone(),
            kind: record.kind.clone(),
        })?;

        let missing = |field: &'static str| RecordError::MissingField {
            id: record.id.clone(),
            field,
        };

        let details = match kind {
            ItemKind::Book => ItemDetails::Book {
                pages: record.pages.ok_or_else(|| missing("pages"))?,
            },
            ItemKind::Magazine => ItemDetails::Magazine {
                issue: record.issue.clone().ok_or_else(|| missing("issue"))?,
                month: record.month.clone().ok_or_else(|| missing("month"))?,
            },
            ItemKind::Comic => ItemDetails::Comic {
                illustrator: record
                    .illustrator
                    .clone()
                    .ok_or_else(|| missing("illustrator"))?,
            },
        };

        Ok(ReadingItem::with_id(
            record.id,
            record.title,
            record.author.unwrap_or_default(),
            details,
        ))
    }
}

/// Parse a page count typed by the user.
pub fn parse_page_count(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("pages"));
    }
    let pages = trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPages(trimmed.to_string()))?;
    if pages <= 0 {
        return Err(ValidationError::NonPositivePages(pages));
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> ReadingItem {
        ReadingItem::with_id(
            "a1b2c3d4e5",
            "Dune",
            "Frank Herbert",
            ItemDetails::book(412),
        )
    }

    #[test]
    fn short_line_truncates_identity() {
        assert_eq!(
            dune().short_line(),
            "ID: a1b2c3... - Title: Dune - Author: Frank Herbert"
        );
    }

    #[test]
    fn short_id_keeps_ids_shorter_than_the_prefix() {
        let item = ReadingItem::with_id("ab", "T", "A", ItemDetails::comic("I"));
        assert_eq!(item.short_id(), "ab");
    }

    #[test]
    fn details_list_fields_in_declaration_order() {
        let magazine = ReadingItem::with_id(
            "ffeeddccbb",
            "Python Magazine",
            "Staff",
            ItemDetails::magazine("150", "September"),
        );
        assert_eq!(
            magazine.details(),
            "Type: Magazine\n\
             ID: ffeedd... - Title: Python Magazine - Author: Staff\n\
             Issue: 150\n\
             Month: September"
        );
        assert!(dune().details().ends_with("\nPages: 412"));
    }

    #[test]
    fn validate_rejects_zero_pages_and_blank_title() {
        let zero = ReadingItem::with_id("x", "Dune", "Frank Herbert", ItemDetails::book(0));
        assert_eq!(zero.validate(), Err(ValidationError::NonPositivePages(0)));

        let blank = ReadingItem::with_id("y", "  ", "Someone", ItemDetails::comic("Artist"));
        assert_eq!(blank.validate(), Err(ValidationError::MissingField("title")));

        assert!(dune().validate().is_ok());
    }

    #[test]
    fn record_leaves_unused_columns_empty() {
        let record = dune().to_record();
        assert_eq!(record.kind, "Book");
        assert_eq!(record.pages, Some(412));
        assert_eq!(record.issue, None);
        assert_eq!(record.month, None);
        assert_eq!(record.illustrator, None);
    }

    #[test]
    fn record_with_unknown_kind_is_rejected() {
        let mut record = dune().to_record();
        record.kind = "Pamphlet".to_string();
        assert!(matches!(
            ReadingItem::try_from(record),
            Err(RecordError::UnknownKind { .. })
        ));
    }

    #[test]
    fn record_missing_variant_field_is_rejected() {
        let mut record = dune().to_record();
        record.pages = None;
        assert!(matches!(
            ReadingItem::try_from(record),
            Err(RecordError::MissingField { field: "pages", .. })
        ));
    }

    #[test]
    fn parse_page_count_reports_each_failure() {
        assert_eq!(parse_page_count(" 412 "), Ok(412));
        assert_eq!(
            parse_page_count("many"),
            Err(ValidationError::InvalidPages("many".to_string()))
        );
        assert_eq!(parse_page_count("0"), Err(ValidationError::NonPositivePages(0)));
        assert_eq!(parse_page_count(""), Err(ValidationError::MissingField("pages")));
    }

    #[test]
    fn sequential_ids_are_predictable() {
        let mut ids = SequentialIds::new("test");
        assert_eq!(ids.next_id(), "test-000001");
        assert_eq!(ids.next_id(), "test-000002");
    }

    #[test]
    fn uuid_ids_are_unique_hex() {
        let mut ids = UuidGenerator;
        let first = ids.next_id();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, ids.next_id());
    }
}
