use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Numeric scene variables.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: FxHashMap<String, f64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn add(&mut self, name: impl Into<String>, delta: f64) {
        *self.values.entry(name.into()).or_insert(0.0) += delta;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name-ordered copy, for sync data.
    pub fn to_sorted(&self) -> BTreeMap<String, f64> {
        self.values.iter().map(|(name, value)| (name.clone(), *value)).collect()
    }

    pub fn replace_all(&mut self, values: &BTreeMap<String, f64>) {
        self.values = values.iter().map(|(name, value)| (name.clone(), *value)).collect();
    }
}
