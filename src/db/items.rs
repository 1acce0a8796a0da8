use anyhow::{anyhow, Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use crate::error::RecordError;
use crate::models::ItemRecord;

/// Read every stored row in insertion order. Columns are read as raw SQLite
/// values and each row is converted on its own, so one row holding the wrong
/// type in a column comes back as an `Err` entry without hiding the others.
pub fn fetch_item_records(conn: &Connection) -> Result<Vec<Result<ItemRecord, RecordError>>> {
    let mut stmt = conn
        .prepare(
            "SELECT rowid, id, kind, title, author, pages, issue, month, illustrator
             FROM items
             ORDER BY rowid",
        )
        .context("failed to prepare item query")?;

    let rows = stmt
        .query_map([], |row| {
            let rowid: i64 = row.get(0)?;
            let values = (1..=8)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((rowid, values))
        })
        .context("failed to load items")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect items")?;

    Ok(rows
        .into_iter()
        .map(|(rowid, values)| record_from_values(rowid, values))
        .collect())
}

fn record_from_values(rowid: i64, values: Vec<Value>) -> Result<ItemRecord, RecordError> {
    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or(Value::Null);

    let id = match next() {
        Value::Text(id) => id,
        _ => {
            return Err(RecordError::InvalidField {
                id: format!("rowid {rowid}"),
                field: "id",
            })
        }
    };
    let invalid = |field: &'static str| RecordError::InvalidField {
        id: id.clone(),
        field,
    };

    let kind = optional_text(next(), "kind")
        .map_err(invalid)?
        .ok_or_else(|| invalid("kind"))?;
    let title = optional_text(next(), "title")
        .map_err(invalid)?
        .ok_or_else(|| invalid("title"))?;
    let author = optional_text(next(), "author").map_err(invalid)?;
    let pages = match next() {
        Value::Null => None,
        Value::Integer(pages) => Some(pages),
        _ => return Err(invalid("pages")),
    };
    let issue = optional_text(next(), "issue").map_err(invalid)?;
    let month = optional_text(next(), "month").map_err(invalid)?;
    let illustrator = optional_text(next(), "illustrator").map_err(invalid)?;

    Ok(ItemRecord {
        id,
        kind,
        title,
        author,
        pages,
        issue,
        month,
        illustrator,
    })
}

/// `NULL` maps to `None`; anything other than text is rejected with the
/// column name.
fn optional_text(value: Value, field: &'static str) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        _ => Err(field),
    }
}

/// Insert one item row.
pub fn insert_item(conn: &Connection, record: &ItemRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, kind, title, author, pages, issue, month, illustrator)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id,
            record.kind,
            record.title,
            record.author,
            record.pages,
            record.issue,
            record.month,
            record.illustrator,
        ],
    )
    .map_err(|err| map_unique_constraint(err, &record.id))
    .context("failed to insert item")?;
    Ok(())
}

/// Delete every row whose id starts with `prefix` and return how many went.
/// The comparison is literal, so `%` and `_` in the prefix match themselves.
pub fn delete_items_with_prefix(conn: &Connection, prefix: &str) -> Result<usize> {
    let deleted = conn
        .execute(
            "DELETE FROM items WHERE substr(id, 1, length(?1)) = ?1",
            params![prefix],
        )
        .context("failed to delete items")?;
    Ok(deleted)
}

fn map_unique_constraint(err: SqlError, id: &str) -> anyhow::Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        anyhow!("An item with ID {id} already exists.")
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pages: Value) -> Vec<Value> {
        vec![
            Value::Text("abc".into()),
            Value::Text("Book".into()),
            Value::Text("Dune".into()),
            Value::Null,
            pages,
            Value::Null,
            Value::Null,
            Value::Null,
        ]
    }

    #[test]
    fn text_in_pages_names_the_column() {
        let err = record_from_values(1, row(Value::Text("lots".into()))).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                id: "abc".into(),
                field: "pages",
            }
        );
    }

    #[test]
    fn non_text_id_is_labelled_by_rowid() {
        let mut values = row(Value::Integer(412));
        values[0] = Value::Real(1.5);
        let err = record_from_values(7, values).unwrap_err();
        assert_eq!(err.to_string(), "item rowid 7 has an unreadable id value");
    }

    #[test]
    fn nulls_become_none() {
        let record = record_from_values(1, row(Value::Integer(412))).unwrap();
        assert_eq!(record.author, None);
        assert_eq!(record.pages, Some(412));
        assert_eq!(record.illustrator, None);
    }
}
