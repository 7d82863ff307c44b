//! # Query descriptions
//!
//! A [`Select`] describes one read against the remote data service: the table,
//! the projected columns, an optional relational embed, equality / null / set
//! filters and an optional ordering. Deletes reuse the same [`Filter`] list.
//!
//! The description is transport-neutral. [`crate::MemoryStore`] evaluates it
//! directly against its rows with [`Filter::matches`]; the HTTP client in the
//! `api` crate renders it into PostgREST query parameters with
//! [`Select::query_pairs`].
//!
//! ```
//! use store::{Select, Table};
//!
//! let feed = Select::from(Table::Posts)
//!     .columns(&["id", "content", "created_at", "photos"])
//!     .embed(Table::Profiles, &["id", "avatar", "name"])
//!     .is_null("parent")
//!     .order_desc("created_at");
//!
//! assert_eq!(
//!     feed.select_param(),
//!     "id,content,created_at,photos,profiles(id,avatar,name)"
//! );
//! ```

use std::fmt;

use serde_json::Value;

/// The tables the application reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Posts,
    Likes,
    SavedPosts,
    Profiles,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Posts => "posts",
            Table::Likes => "likes",
            Table::SavedPosts => "saved_posts",
            Table::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(String, String),
    IsNull(String),
    In(String, Vec<String>),
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<String>) -> Self {
        Filter::Eq(column.to_string(), value.into())
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _) | Filter::IsNull(c) | Filter::In(c, _) => c,
        }
    }

    /// Whether a JSON row satisfies this predicate.
    ///
    /// Ids may be stored as strings or integers, so comparisons are done on
    /// the textual form of scalar values. `null` never equals anything.
    pub fn matches(&self, row: &Value) -> bool {
        let field = row.get(self.column());
        match self {
            Filter::Eq(_, want) => field.and_then(scalar_text).as_deref() == Some(want.as_str()),
            Filter::IsNull(_) => field.map_or(true, Value::is_null),
            Filter::In(_, wants) => field
                .and_then(scalar_text)
                .map_or(false, |have| wants.iter().any(|w| *w == have)),
        }
    }

    /// PostgREST `(column, operator.value)` pair.
    pub fn query_pair(&self) -> (String, String) {
        match self {
            Filter::Eq(c, v) => (c.clone(), format!("eq.{v}")),
            Filter::IsNull(c) => (c.clone(), "is.null".to_string()),
            Filter::In(c, vs) => {
                let list: Vec<String> = vs.iter().map(|v| quote_list_item(v)).collect();
                (c.clone(), format!("in.({})", list.join(",")))
            }
        }
    }
}

/// Textual form of a scalar JSON value, `None` for null/arrays/objects.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn quote_list_item(v: &str) -> String {
    if v.chars().any(|c| matches!(c, ',' | '(' | ')' | '"' | ':' | ' ')) {
        format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        v.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A related table fetched in the same call, keyed by its table name.
#[derive(Clone, Debug, PartialEq)]
pub struct Embed {
    pub table: Table,
    /// Empty means every column.
    pub columns: Vec<String>,
}

/// One read against a table.
#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    pub table: Table,
    /// Empty means every column.
    pub columns: Vec<String>,
    pub embed: Option<Embed>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Select {
    pub fn from(table: Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            embed: None,
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Embed a related table. Pass `&[]` for every column.
    pub fn embed(mut self, table: Table, columns: &[&str]) -> Self {
        self.embed = Some(Embed {
            table,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.filters.push(Filter::IsNull(column.to_string()));
        self
    }

    pub fn is_in(mut self, column: &str, values: Vec<String>) -> Self {
        self.filters.push(Filter::In(column.to_string(), values));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending: false,
        });
        self
    }

    /// The PostgREST `select=` value, e.g. `*,profiles(*)`.
    pub fn select_param(&self) -> String {
        let mut parts = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        if let Some(embed) = &self.embed {
            let inner = if embed.columns.is_empty() {
                "*".to_string()
            } else {
                embed.columns.join(",")
            };
            parts.push(format!("{}({inner})", embed.table));
        }
        parts.join(",")
    }

    /// Every query parameter for a PostgREST `GET`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select_param())];
        pairs.extend(self.filters.iter().map(Filter::query_pair));
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_query_pairs() {
        let q = Select::from(Table::Posts)
            .embed(Table::Profiles, &[])
            .eq("parent", "42");

        assert_eq!(
            q.query_pairs(),
            vec![
                ("select".to_string(), "*,profiles(*)".to_string()),
                ("parent".to_string(), "eq.42".to_string()),
            ]
        );
    }

    #[test]
    fn test_feed_query_pairs() {
        let q = Select::from(Table::Posts)
            .columns(&["id", "content"])
            .embed(Table::Profiles, &["id", "avatar", "name"])
            .is_null("parent")
            .order_desc("created_at");

        let pairs = q.query_pairs();
        assert_eq!(pairs[0].1, "id,content,profiles(id,avatar,name)");
        assert_eq!(pairs[1], ("parent".to_string(), "is.null".to_string()));
        assert_eq!(pairs[2], ("order".to_string(), "created_at.desc".to_string()));
    }

    #[test]
    fn test_in_filter_quotes_reserved_characters() {
        let f = Filter::In("id".to_string(), vec!["a".to_string(), "b,c".to_string()]);
        assert_eq!(f.query_pair().1, "in.(a,\"b,c\")");
    }

    #[test]
    fn test_filter_matching() {
        let row = json!({ "id": 5, "post_id": "p1", "parent": null });

        assert!(Filter::eq("id", "5").matches(&row));
        assert!(Filter::eq("post_id", "p1").matches(&row));
        assert!(!Filter::eq("post_id", "p2").matches(&row));
        assert!(Filter::IsNull("parent".to_string()).matches(&row));
        assert!(Filter::IsNull("missing".to_string()).matches(&row));
        assert!(!Filter::eq("parent", "null").matches(&row));
        assert!(Filter::In("id".to_string(), vec!["4".into(), "5".into()]).matches(&row));
    }
}
