use super::item::{AttributeValue, Item};

/// Server-side scan filter: a conjunction of attribute equalities.
///
/// An empty filter matches every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    conditions: Vec<(String, AttributeValue)>,
}

impl ScanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `attribute = value` to the conjunction.
    pub fn eq(mut self, attribute: impl Into<String>, value: AttributeValue) -> Self {
        self.conditions.push((attribute.into(), value));
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.conditions
            .iter()
            .all(|(attr, expected)| item.get(attr) == Some(expected))
    }

    /// Expression text with placeholders instead of values (safe to log).
    pub fn expression(&self) -> String {
        self.conditions
            .iter()
            .map(|(attr, _)| format!("{attr} = :{attr}"))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// The conditions as a partial item, for backends that match by containment.
    pub fn as_partial_item(&self) -> Item {
        self.conditions.iter().cloned().collect()
    }
}
