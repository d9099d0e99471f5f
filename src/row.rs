use std::str::FromStr;

use indexmap::IndexMap;

/// A single result row of a query.
///
/// Every column value is carried as text, the way the wire sent it
/// back. Column order matches the order of the SELECT list.
#[derive(Debug, PartialEq)]
pub struct Row {
    value: IndexMap<String, Option<String>>,
}

impl Row {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { value: IndexMap::new() }
    }

    #[inline]
    pub(crate) fn insert(&mut self, key: String, value: Option<String>) {
        self.value.insert(key, value);
    }

    /// Get the value of a column of the result row.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.value.get(key)?.as_deref()
    }

    /// Transforms and gets the columns of the result row.
    #[inline]
    pub fn get_into<T: FromStr>(&self, key: &str) -> Result<T, <T as FromStr>::Err> {
        T::from_str(self.value.get(key).unwrap_or(&None).as_deref().unwrap_or(""))
    }

    /// Return the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.value.len()
    }

    /// Get all the column names, in result order.
    #[inline]
    pub fn column_names(&self) -> Vec<&str> {
        self.value.keys().map(|k| (*k).as_str()).collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row() {
        let mut row = Row::new();
        row.insert("key1".to_string(), Some("value".to_string()));
        row.insert("key2".to_string(), None);
        row.insert("key3".to_string(), Some("42".to_string()));
        assert_eq!(row.get("key1"), Some("value"));
        assert_eq!(row.get("key2"), None);
        assert_eq!(row.get("key3"), Some("42"));
        assert_eq!(row.get("nokey"), None);
        assert_eq!(row.get_into::<i32>("key3"), Ok(42));
        assert_eq!(row.get_into::<String>("key1"), Ok("value".to_string()));
        assert!(row.get_into::<i32>("key1").is_err());
        assert_eq!(row.column_count(), 3);
    }

    #[test]
    fn column_order_preserved() {
        let mut row = Row::new();
        row.insert("user_id".to_string(), Some("1".to_string()));
        row.insert("full_name".to_string(), None);
        row.insert("phone".to_string(), None);
        assert_eq!(row.column_names(), ["user_id", "full_name", "phone"]);
    }
}
