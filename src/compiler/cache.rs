//! Build-wide class-name table.

use std::collections::HashMap;
use std::sync::RwLock;

use log::trace;

use super::hash::identifier;

/// Semantic identity of an atomic rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    /// Normalized selector context (`""`, `:hover`, `@media (...)`).
    pub context: String,
    /// Physical CSS property.
    pub property: String,
    /// Rendered CSS value.
    pub value: String,
    /// `""`, `ltr` or `rtl`.
    pub direction: &'static str,
}

impl RuleKey {
    /// Length-prefixed fields, so no two keys share an input.
    fn hash_input(&self) -> String {
        [self.context.as_str(), self.property.as_str(), self.value.as_str(), self.direction]
            .iter()
            .map(|field| format!("{}:{field}", field.len()))
            .collect()
    }
}

/// Append-only map from [`RuleKey`] to class name, shared by every module
/// of a build.
///
/// Class names are a pure function of the key, so concurrent writers that
/// race on the same key insert the same name.
#[derive(Debug)]
pub struct RuleCache {
    prefix: String,
    names: RwLock<HashMap<RuleKey, String>>,
}

impl Default for RuleCache {
    fn default() -> Self {
        Self::new("x")
    }
}

impl RuleCache {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            names: RwLock::new(HashMap::new()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Class name for `key`, computing and recording it on first use.
    pub fn class_name(&self, key: &RuleKey) -> String {
        if let Ok(names) = self.names.read()
            && let Some(name) = names.get(key)
        {
            return name.clone();
        }

        let name = identifier(&self.prefix, &key.hash_input());
        match self.names.write() {
            Ok(mut names) => names
                .entry(key.clone())
                .or_insert_with(|| {
                    trace!("new class {name} for {}:{}", key.property, key.value);
                    name.clone()
                })
                .clone(),
            // a poisoned table still yields the deterministic name
            Err(_) => name,
        }
    }

    pub fn len(&self) -> usize {
        self.names.read().map(|names| names.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> RuleKey {
        RuleKey {
            context: String::new(),
            property: "margin-left".into(),
            value: value.into(),
            direction: "ltr",
        }
    }

    #[test]
    fn test_same_key_same_name() {
        let cache = RuleCache::default();
        let a = cache.class_name(&key("5px"));
        let b = cache.class_name(&key("5px"));
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_ne!(a, cache.class_name(&key("6px")));
    }

    #[test]
    fn test_independent_caches_agree() {
        let a = RuleCache::default().class_name(&key("5px"));
        let b = RuleCache::default().class_name(&key("5px"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_separator_in_fields_is_unambiguous() {
        let a = RuleKey {
            context: "a|b".into(),
            property: "c".into(),
            value: "d".into(),
            direction: "",
        };
        let b = RuleKey {
            context: "a".into(),
            property: "b|c".into(),
            value: "d".into(),
            direction: "",
        };
        assert_ne!(a.hash_input(), b.hash_input());
        let cache = RuleCache::default();
        assert_ne!(cache.class_name(&a), cache.class_name(&b));
    }

    #[test]
    fn test_concurrent_inserts() {
        use rayon::prelude::*;
        let cache = RuleCache::default();
        let names: Vec<_> = (0..64)
            .into_par_iter()
            .map(|i| cache.class_name(&key(&format!("{}px", i % 4))))
            .collect();
        assert_eq!(cache.len(), 4);
        assert_eq!(names[0], names[4]);
    }
}
