use crate::core::attributes::AttributeKind;
use serde::{Deserialize, Serialize};

/// Per-dimension schema of a feature vector.
///
/// Records whether each dimension is numeric or categorical and, for
/// categorical dimensions, how many distinct codes were observed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    names: Vec<String>,
    kinds: Vec<AttributeKind>,
}

impl DatasetInfo {
    pub fn new(kinds: Vec<AttributeKind>) -> Self {
        let names = (0..kinds.len()).map(|i| format!("attrib{}", i + 1)).collect();
        Self { names, kinds }
    }

    pub fn numeric(dimensionality: usize) -> Self {
        Self::new(vec![AttributeKind::Numeric; dimensionality])
    }

    pub fn with_names(names: Vec<String>, kinds: Vec<AttributeKind>) -> Self {
        debug_assert_eq!(names.len(), kinds.len(), "names/kinds length mismatch");
        Self { names, kinds }
    }

    pub fn dimensionality(&self) -> usize {
        self.kinds.len()
    }

    pub fn kind(&self, index: usize) -> Option<AttributeKind> {
        self.kinds.get(index).copied()
    }

    pub fn kinds(&self) -> &[AttributeKind] {
        &self.kinds
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of category codes mapped in `index`; zero for numeric dimensions.
    pub fn num_mappings(&self, index: usize) -> usize {
        self.kind(index).and_then(|k| k.arity()).unwrap_or(0)
    }

    pub fn set_kind(&mut self, index: usize, kind: AttributeKind) {
        if let Some(slot) = self.kinds.get_mut(index) {
            *slot = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_info_has_no_mappings() {
        let info = DatasetInfo::numeric(3);
        assert_eq!(info.dimensionality(), 3);
        assert_eq!(info.num_mappings(0), 0);
        assert_eq!(info.name(2), Some("attrib3"));
        assert_eq!(info.kind(3), None);
    }

    #[test]
    fn set_kind_updates_mappings() {
        let mut info = DatasetInfo::numeric(2);
        info.set_kind(1, AttributeKind::Categorical { arity: 5 });
        assert_eq!(info.num_mappings(1), 5);
        assert_eq!(info.kind(1), Some(AttributeKind::Categorical { arity: 5 }));

        info.set_kind(9, AttributeKind::Categorical { arity: 2 });
        assert_eq!(info.dimensionality(), 2);
    }
}
