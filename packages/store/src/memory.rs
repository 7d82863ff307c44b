use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::query::{scalar_text, Filter, Select, Table};
use crate::remote::RemoteStore;

/// In-memory RemoteStore for tests and the offline demo.
///
/// Plays the hosted service's part: it issues ids and `created_at`
/// timestamps, enforces the `(post_id, user_id)` unique key on `likes` and
/// `saved_posts`, and resolves the embeds the app asks for.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<Table, Vec<Value>>,
    /// Calls to let through before failing, per table.
    failing: HashMap<Table, usize>,
    last_created: Option<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call touching `table` fail with a service error.
    pub fn fail_next(&self, table: Table) {
        self.fail_after(table, 0);
    }

    /// Let `skip` calls touching `table` through, then fail the one after.
    pub fn fail_after(&self, table: Table, skip: usize) {
        self.tables().failing.insert(table, skip);
    }

    /// Load rows verbatim, bypassing id/timestamp assignment and constraints.
    pub fn seed(&self, table: Table, rows: impl IntoIterator<Item = Value>) {
        self.tables().rows.entry(table).or_default().extend(rows);
    }

    /// Snapshot of every stored row of `table`, in insertion order.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.tables().rows.get(&table).cloned().unwrap_or_default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Tables {
    fn check_failure(&mut self, table: Table) -> Result<(), StoreError> {
        let Some(remaining) = self.failing.get_mut(&table) else {
            return Ok(());
        };
        if *remaining > 0 {
            *remaining -= 1;
            return Ok(());
        }
        self.failing.remove(&table);
        tracing::debug!(%table, "memory store: injected failure");
        Err(StoreError::Service {
            status: 503,
            message: format!("injected failure on {table}"),
        })
    }

    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_created = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Columns that must be unique across a table, beyond `id`.
fn unique_key(table: Table) -> Option<&'static [&'static str]> {
    match table {
        Table::Likes | Table::SavedPosts => Some(&["post_id", "user_id"]),
        Table::Posts | Table::Profiles => None,
    }
}

/// Column on `from` that references the primary key of `to`.
fn foreign_key(from: Table, to: Table) -> Option<&'static str> {
    match (from, to) {
        (Table::Posts, Table::Profiles) => Some("author"),
        (Table::Likes | Table::SavedPosts, Table::Posts) => Some("post_id"),
        (Table::Likes | Table::SavedPosts, Table::Profiles) => Some("user_id"),
        _ => None,
    }
}

fn same_key(a: &Value, b: &Value, columns: &[&str]) -> bool {
    columns.iter().all(|c| {
        let left = a.get(*c).and_then(scalar_text);
        left.is_some() && left == b.get(*c).and_then(scalar_text)
    })
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(dx), Ok(dy)) => dx.cmp(&dy),
                _ => x.cmp(y),
            }
        }
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Value, columns: &[String]) -> Map<String, Value> {
    let Some(obj) = row.as_object() else {
        return Map::new();
    };
    if columns.is_empty() {
        return obj.clone();
    }
    columns
        .iter()
        .filter_map(|c| obj.get(c).map(|v| (c.clone(), v.clone())))
        .collect()
}

impl RemoteStore for MemoryStore {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables();
        tables.check_failure(query.table)?;

        let mut matched: Vec<&Value> = tables
            .rows
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        let embed = match &query.embed {
            Some(embed) => {
                let fk = foreign_key(query.table, embed.table).ok_or_else(|| {
                    StoreError::Service {
                        status: 400,
                        message: format!(
                            "no relationship between {} and {}",
                            query.table, embed.table
                        ),
                    }
                })?;
                Some((embed, fk))
            }
            None => None,
        };

        let result = matched
            .into_iter()
            .map(|row| {
                let mut out = project(row, &query.columns);
                if let Some((embed, fk)) = embed {
                    let target = row.get(fk).and_then(scalar_text);
                    let related = target
                        .and_then(|id| {
                            tables.rows.get(&embed.table).and_then(|rows| {
                                rows.iter()
                                    .find(|r| r.get("id").and_then(scalar_text).as_deref() == Some(id.as_str()))
                            })
                        })
                        .map(|r| Value::Object(project(r, &embed.columns)))
                        .unwrap_or(Value::Null);
                    out.insert(embed.table.as_str().to_string(), related);
                }
                Value::Object(out)
            })
            .collect();

        Ok(result)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
        let mut tables = self.tables();
        tables.check_failure(table)?;

        let Value::Object(mut obj) = row else {
            return Err(StoreError::Decode(format!("insert into {table} expects an object")));
        };

        if !obj.contains_key("id") {
            obj.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        }
        if table != Table::Profiles && !obj.contains_key("created_at") {
            let ts = tables.next_timestamp();
            obj.insert("created_at".to_string(), Value::String(ts));
        }
        if table == Table::Posts {
            obj.entry("parent").or_insert(Value::Null);
            obj.entry("photos").or_insert(Value::Null);
        }
        let row = Value::Object(obj);

        let existing = tables.rows.entry(table).or_default();
        let duplicate = existing.iter().any(|r| {
            same_key(r, &row, &["id"]) || unique_key(table).map_or(false, |key| same_key(r, &row, key))
        });
        if duplicate {
            return Err(StoreError::Conflict {
                table: table.to_string(),
            });
        }

        existing.push(row.clone());
        tracing::debug!(%table, "memory store: inserted row");
        Ok(row)
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<(), StoreError> {
        let mut tables = self.tables();
        tables.check_failure(table)?;

        if let Some(rows) = tables.rows.get_mut(&table) {
            let before = rows.len();
            rows.retain(|row| !filters.iter().all(|f| f.matches(row)));
            tracing::debug!(%table, removed = before - rows.len(), "memory store: deleted rows");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = MemoryStore::new();

        let row = store
            .insert(Table::Posts, json!({ "content": "hi", "author": "u1" }))
            .await
            .unwrap();

        assert!(row["id"].is_string());
        assert!(row["created_at"].is_string());
        assert!(row["parent"].is_null());
        assert_eq!(store.rows(Table::Posts).len(), 1);
    }

    #[tokio::test]
    async fn test_timestamps_strictly_increase() {
        let store = MemoryStore::new();
        let a = store.insert(Table::Posts, json!({ "author": "u" })).await.unwrap();
        let b = store.insert(Table::Posts, json!({ "author": "u" })).await.unwrap();

        let ta: DateTime<Utc> = a["created_at"].as_str().unwrap().parse().unwrap();
        let tb: DateTime<Utc> = b["created_at"].as_str().unwrap().parse().unwrap();
        assert!(tb > ta);
    }

    #[tokio::test]
    async fn test_duplicate_like_is_a_conflict() {
        let store = MemoryStore::new();
        let like = json!({ "post_id": "p1", "user_id": "u1" });

        store.insert(Table::Likes, like.clone()).await.unwrap();
        let err = store.insert(Table::Likes, like).await.unwrap_err();

        assert_eq!(err, StoreError::Conflict { table: "likes".to_string() });
        assert_eq!(store.rows(Table::Likes).len(), 1);
    }

    #[tokio::test]
    async fn test_select_filters_orders_and_embeds() {
        let store = MemoryStore::new();
        store
            .insert(Table::Profiles, json!({ "id": "u1", "name": "Ada", "avatar": "a.png" }))
            .await
            .unwrap();
        store
            .insert(
                Table::Posts,
                json!({ "id": "p1", "author": "u1", "content": "old", "created_at": "2024-01-01T00:00:00Z" }),
            )
            .await
            .unwrap();
        store
            .insert(
                Table::Posts,
                json!({ "id": "p2", "author": "u1", "content": "new", "created_at": "2024-02-01T00:00:00Z" }),
            )
            .await
            .unwrap();
        store
            .insert(Table::Posts, json!({ "id": "c1", "author": "u1", "parent": "p1" }))
            .await
            .unwrap();

        let q = Select::from(Table::Posts)
            .columns(&["id", "content"])
            .embed(Table::Profiles, &["name"])
            .is_null("parent")
            .order_desc("created_at");
        let rows = store.select(&q).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "p2");
        assert_eq!(rows[1]["id"], "p1");
        assert_eq!(rows[0]["profiles"], json!({ "name": "Ada" }));
        assert!(rows[0].get("author").is_none());
    }

    #[tokio::test]
    async fn test_delete_matches_all_filters() {
        let store = MemoryStore::new();
        store.insert(Table::Likes, json!({ "post_id": "p1", "user_id": "u1" })).await.unwrap();
        store.insert(Table::Likes, json!({ "post_id": "p1", "user_id": "u2" })).await.unwrap();

        store
            .delete(Table::Likes, &[Filter::eq("post_id", "p1"), Filter::eq("user_id", "u1")])
            .await
            .unwrap();

        let rows = store.rows(Table::Likes);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["user_id"], "u2");
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let store = MemoryStore::new();
        store.fail_next(Table::Likes);

        let q = Select::from(Table::Likes);
        assert!(matches!(
            store.select(&q).await,
            Err(StoreError::Service { status: 503, .. })
        ));
        assert!(store.select(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_after_skips_calls() {
        let store = MemoryStore::new();
        store.fail_after(Table::Posts, 1);

        assert!(store.insert(Table::Posts, json!({ "author": "u" })).await.is_ok());
        assert!(store.select(&Select::from(Table::Posts)).await.is_err());
        assert_eq!(store.select(&Select::from(Table::Posts)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_relationship_is_rejected() {
        let store = MemoryStore::new();
        let q = Select::from(Table::Profiles).embed(Table::Likes, &[]);
        assert!(store.select(&q).await.is_err());
    }
}
