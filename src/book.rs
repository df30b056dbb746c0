// Book model and response parsing.
//
// The search endpoint returns loosely typed documents: any field may be
// missing or carry an unexpected type. Parsing never fails; absent or
// unusable fields are replaced by fixed placeholders.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

pub const NO_TITLE: &str = "No title available";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const UNKNOWN_YEAR: &str = "Unknown year";
pub const NO_ISBN: &str = "No ISBN available";

/// One normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    title: String,
    authors: Vec<String>,
    year: Option<i64>,
    isbn: String,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        authors: Vec<String>,
        year: Option<i64>,
        isbn: impl Into<String>,
    ) -> Self {
        BookRecord {
            title: title.into(),
            authors,
            year,
            isbn: isbn.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Authors joined with ", ".
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// Displayable year, or the unknown-year placeholder.
    pub fn year_label(&self) -> YearLabel {
        YearLabel(self.year)
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}

/// `Display` adapter for an optional publication year.
#[derive(Debug, Clone, Copy)]
pub struct YearLabel(Option<i64>);

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(year) => write!(f, "{}", year),
            None => f.write_str(UNKNOWN_YEAR),
        }
    }
}

/// Ordered records produced by a single query. A new search builds a new
/// set; nothing accumulates across queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    books: Vec<BookRecord>,
}

impl SearchResults {
    pub fn new(books: Vec<BookRecord>) -> Self {
        SearchResults { books }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 1-based lookup, matching the numbers shown to the user.
    pub fn get(&self, number: usize) -> Option<&BookRecord> {
        number.checked_sub(1).and_then(|idx| self.books.get(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.books.iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Raw shape of one entry in "docs". Fields stay untyped so that a wrong
/// type on one field only loses that field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDoc {
    title: Value,
    author_name: Value,
    first_publish_year: Value,
    isbn: Value,
}

impl RawDoc {
    fn into_record(self) -> BookRecord {
        let title = self.title.as_str().unwrap_or(NO_TITLE).to_string();

        let mut authors: Vec<String> = self
            .author_name
            .as_array()
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if authors.is_empty() {
            authors.push(UNKNOWN_AUTHOR.to_string());
        }

        let year = match &self.first_publish_year {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };

        let isbn = self
            .isbn
            .as_array()
            .and_then(|codes| codes.first())
            .and_then(Value::as_str)
            .unwrap_or(NO_ISBN)
            .to_string();

        BookRecord::new(title, authors, year, isbn)
    }
}

/// Turn a search response into records.
///
/// Returns `None` when the document is null, has no "docs" array, or its
/// "numFound" is missing or not positive. Record order follows "docs".
pub fn parse_response(data: &Value) -> Option<SearchResults> {
    let docs = data.get("docs")?.as_array()?;
    let num_found = data.get("numFound").and_then(Value::as_f64).unwrap_or(0.0);
    if num_found <= 0.0 {
        return None;
    }

    let books: Vec<BookRecord> = docs
        .iter()
        .map(|doc| {
            RawDoc::deserialize(doc)
                .unwrap_or_default()
                .into_record()
        })
        .collect();

    tracing::debug!(num_found, parsed = books.len(), "parsed search response");
    Some(SearchResults::new(books))
}
