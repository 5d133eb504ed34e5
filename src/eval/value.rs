//! Concrete values produced by static evaluation.

use crate::util::js_number_to_string;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Object(ObjectValue),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// String form used by template interpolation and key coercion.
    /// Objects have no static string form.
    pub fn to_js_string(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Num(n) => Some(js_number_to_string(*n)),
            Value::Object(_) => None,
        }
    }

    /// Short human-readable rendering for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("'{s}'"),
            Value::Num(n) => js_number_to_string(*n),
            Value::Object(_) => "[object]".to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<ObjectValue> for Value {
    fn from(o: ObjectValue) -> Self {
        Value::Object(o)
    }
}

/// Insertion-ordered object. Re-inserting a key replaces its value but
/// keeps its original position, as JavaScript object literals do.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Copy every entry of `other` in, later keys winning.
    pub fn extend_from(&mut self, other: &ObjectValue) {
        for (k, v) in &other.entries {
            self.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = ObjectValue::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut object = ObjectValue::new();
        object.insert("a", 1.into());
        object.insert("b", 2.into());
        object.insert("a", 3.into());
        let entries: Vec<_> = object.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![("a".to_string(), Value::Num(3.0)), ("b".to_string(), Value::Num(2.0))]
        );
    }

    #[test]
    fn test_to_js_string() {
        assert_eq!(Value::Num(2.0).to_js_string().as_deref(), Some("2"));
        assert_eq!(Value::from("px").to_js_string().as_deref(), Some("px"));
        assert_eq!(Value::Object(ObjectValue::new()).to_js_string(), None);
    }
}
