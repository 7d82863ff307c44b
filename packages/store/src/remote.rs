//! The remote data service as seen by the application.

use serde_json::Value;

use crate::error::StoreError;
use crate::query::{Filter, Select, Table};

/// Async table-level CRUD against the hosted store.
///
/// Rows travel as JSON objects; callers decode them into [`crate::models`].
/// Implementations make no ordering promise between two calls in flight.
pub trait RemoteStore {
    fn select(
        &self,
        query: &Select,
    ) -> impl std::future::Future<Output = Result<Vec<Value>, StoreError>>;

    /// Insert one row and return it as stored (with remote-assigned columns).
    fn insert(
        &self,
        table: Table,
        row: Value,
    ) -> impl std::future::Future<Output = Result<Value, StoreError>>;

    /// Delete every row matching all `filters`.
    fn delete(
        &self,
        table: Table,
        filters: &[Filter],
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}
