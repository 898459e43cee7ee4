use std::collections::BTreeMap;

use crate::types::OutType;

/// Ordered mapping from 1-based parameter position to declared output type.
///
/// Built once during request normalization, consumed during one fill, and
/// discarded with the execution. A registered position is excluded from plain
/// input binding unless it also carries an input value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutParams {
    entries: BTreeMap<usize, OutType>,
}

impl OutParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pos` (1-based) with its declared output type. Replaces any
    /// previous registration at the same position.
    pub fn put(&mut self, pos: usize, ty: OutType) {
        self.entries.insert(pos, ty);
    }

    #[must_use]
    pub fn get(&self, pos: usize) -> Option<OutType> {
        self.entries.get(&pos).copied()
    }

    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.entries.contains_key(&pos)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Highest registered position, or 0 when empty.
    #[must_use]
    pub fn max_position(&self) -> usize {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, OutType)> + '_ {
        self.entries.iter().map(|(pos, ty)| (*pos, *ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SqlType;

    #[test]
    fn lookup_is_by_position_only() {
        let mut out = OutParams::new();
        out.put(3, OutType::Named(SqlType::Varchar));
        out.put(1, OutType::Vendor(-104));
        assert!(out.contains(1));
        assert!(!out.contains(2));
        assert_eq!(out.get(3), Some(OutType::Named(SqlType::Varchar)));
        assert_eq!(out.len(), 2);
        assert_eq!(out.max_position(), 3);
    }

    #[test]
    fn reregistration_replaces() {
        let mut out = OutParams::new();
        out.put(1, OutType::Named(SqlType::Integer));
        out.put(1, OutType::Named(SqlType::Varchar));
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(1), Some(OutType::Named(SqlType::Varchar)));
    }
}
