//! Two-state cells for lazily fetched data.

use std::future::Future;

use serde::{Serialize, Serializer};

use crate::error::Result;

/// A cell holding data that is fetched from the API on first use.
///
/// The cell starts out unfetched; the first read through an accessor on the
/// owning model populates it, and it then answers every later read until a
/// refresh replaces the value whole. Both states are observable, so tests
/// can assert when the transition happens.
#[derive(Debug, Clone, Default)]
pub struct Lazy<T> {
    value: Option<T>,
}

impl<T> Lazy<T> {
    /// Create an unfetched cell.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// True once a value has been stored.
    pub fn is_fetched(&self) -> bool {
        self.value.is_some()
    }

    /// The cached value, if fetched. Never triggers a fetch.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access to the cached value, if fetched.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Store a value, replacing any previous one.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Drop the cached value, returning the cell to unfetched.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// The cached value, running `fetch` to populate the cell on first
    /// access.
    ///
    /// `fetch` is invoked only while the cell is unfetched; if it fails the
    /// cell stays unfetched and the error is returned.
    pub(crate) async fn get_or_fetch<F, Fut>(&mut self, fetch: F) -> Result<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = match self.value.take() {
            Some(value) => value,
            None => fetch().await?,
        };
        Ok(self.value.insert(value))
    }
}

impl<T: Serialize> Serialize for Lazy<T> {
    /// An unfetched cell serializes as `null`; a fetched one as its value.
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match &self.value {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdsmError;

    #[test]
    fn test_starts_unfetched() {
        let cell: Lazy<u32> = Lazy::new();
        assert!(!cell.is_fetched());
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn test_set_transitions_to_fetched() {
        let mut cell = Lazy::new();
        cell.set(7);
        assert!(cell.is_fetched());
        assert_eq!(cell.get(), Some(&7));
    }

    #[test]
    fn test_clear_returns_to_unfetched() {
        let mut cell = Lazy::new();
        cell.set("cached");
        cell.clear();
        assert!(!cell.is_fetched());
    }

    #[test]
    fn test_get_or_fetch_runs_once() {
        let mut cell = Lazy::new();
        let mut calls = 0;

        for _ in 0..3 {
            let value = tokio_test::block_on(cell.get_or_fetch(|| {
                calls += 1;
                async { Ok(42) }
            }))
            .unwrap();
            assert_eq!(*value, 42);
        }

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failed_fetch_leaves_cell_unfetched() {
        let mut cell: Lazy<u32> = Lazy::new();

        let result = tokio_test::block_on(cell.get_or_fetch(|| async {
            Err(EdsmError::NotFound {
                endpoint: "api-v1/system".to_string(),
            })
        }));

        assert!(result.is_err());
        assert!(!cell.is_fetched());
    }

    #[test]
    fn test_serializes_as_value_or_null() {
        let mut cell = Lazy::new();
        assert_eq!(serde_json::to_value(&cell).unwrap(), serde_json::Value::Null);

        cell.set(vec![1, 2, 3]);
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            serde_json::json!([1, 2, 3])
        );
    }
}
