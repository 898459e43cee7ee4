use std::sync::Arc;

use crate::types::SqlValue;

/// One decoded result row. Column names are shared across all rows of the
/// producing result set.
#[derive(Debug, Clone)]
pub struct BridgeRow {
    column_names: Arc<Vec<String>>,
    values: Vec<SqlValue>,
}

impl BridgeRow {
    /// Look up a value by column name.
    #[must_use]
    pub fn get(&self, col_name: &str) -> Option<&SqlValue> {
        self.column_names
            .iter()
            .position(|name| name == col_name)
            .and_then(|index| self.values.get(index))
    }

    /// Look up a value by 0-based column index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// Decoded rows returned to the async caller.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    column_names: Arc<Vec<String>>,
    pub results: Vec<BridgeRow>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            column_names: Arc::new(Vec::new()),
            results: Vec::with_capacity(capacity),
        }
    }

    pub fn set_column_names(&mut self, names: Arc<Vec<String>>) {
        self.column_names = names;
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn add_row_values(&mut self, values: Vec<SqlValue>) {
        self.results.push(BridgeRow {
            column_names: Arc::clone(&self.column_names),
            values,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_resolve_columns_by_name() {
        let mut rs = ResultSet::with_capacity(1);
        rs.set_column_names(Arc::new(vec!["id".into(), "name".into()]));
        rs.add_row_values(vec![SqlValue::Int(1), SqlValue::Text("a".into())]);

        let row = &rs.results[0];
        assert_eq!(row.get("name"), Some(&SqlValue::Text("a".into())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_index(0), Some(&SqlValue::Int(1)));
    }
}
