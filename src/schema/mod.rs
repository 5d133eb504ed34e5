//! Schema of recognized style keys.
//!
//! The registry answers one question for every key in a style definition:
//! what kind of key is it? See [`SchemaRegistry::classify`].
//!
//! ## Architecture
//!
//! 1. **PropertySpec** - a recognized property, its CSS name(s), value shape and unit
//! 2. **PseudoSpec** - an allow-listed pseudo-class or pseudo-element with its priority
//! 3. **AtRuleKind** - `@media` / `@supports`, recognized structurally
//! 4. **SchemaRegistry** - immutable lookup tables, built once and passed explicitly

mod presets;
mod properties;
mod selectors;
mod values;

use std::collections::HashMap;

pub use properties::{CssName, PropertySpec, Unit, standard_properties};
pub use selectors::{AtRuleKind, PseudoKind, PseudoSpec, SelectorContext, parse_at_rule};
pub use values::ValueSpec;

use crate::eval::ObjectValue;
use crate::order::Priority;

/// What a key inside a style definition is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyKind<'r> {
    Property(&'r PropertySpec),
    NestedSelector(&'r PseudoSpec),
    AtRule(AtRuleKind),
    /// Shaped like a selector or at-rule but not allowed.
    UnknownSelector,
    Unknown,
}

/// Read-only tables of properties, nested selectors and presets.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    properties: HashMap<String, PropertySpec>,
    pseudos: HashMap<String, PseudoSpec>,
    presets: HashMap<String, ObjectValue>,
}

impl SchemaRegistry {
    /// Start an empty registry.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The standard schema (cached).
    pub fn standard() -> &'static Self {
        use std::sync::LazyLock;
        static STANDARD: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::build_standard);
        &STANDARD
    }

    fn build_standard() -> Self {
        let mut builder = Self::builder();
        for property in standard_properties() {
            builder = builder.property(property);
        }
        for &(selector, sub) in selectors::INTERACTION_PSEUDO_CLASSES {
            builder = builder.pseudo(PseudoSpec::class(selector, Priority::pseudo_class(sub)));
        }
        for &selector in selectors::STATE_PSEUDO_CLASSES {
            builder = builder.pseudo(PseudoSpec::class(selector, Priority::PSEUDO_CLASS));
        }
        for &selector in selectors::PSEUDO_ELEMENTS {
            builder = builder.pseudo(PseudoSpec::element(selector));
        }
        for (name, preset) in presets::standard_presets() {
            builder = builder.preset(name, preset);
        }
        builder.build()
    }

    /// Classify a style key.
    pub fn classify(&self, key: &str) -> KeyKind<'_> {
        if let Some(property) = self.properties.get(key) {
            return KeyKind::Property(property);
        }
        if let Some(pseudo) = self.pseudos.get(key) {
            return KeyKind::NestedSelector(pseudo);
        }
        if let Some(kind) = parse_at_rule(key) {
            return KeyKind::AtRule(kind);
        }
        if key.starts_with(':') || key.starts_with('@') {
            return KeyKind::UnknownSelector;
        }
        KeyKind::Unknown
    }

    pub fn is_recognized_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property(&self, key: &str) -> Option<&PropertySpec> {
        self.properties.get(key)
    }

    pub fn value_spec_for(&self, key: &str) -> Option<&ValueSpec> {
        self.properties.get(key).map(|p| &p.value)
    }

    pub fn is_recognized_nested_selector(&self, key: &str) -> bool {
        self.pseudos.contains_key(key)
    }

    pub fn pseudo(&self, key: &str) -> Option<&PseudoSpec> {
        self.pseudos.get(key)
    }

    pub fn is_at_rule(&self, key: &str) -> bool {
        parse_at_rule(key).is_some()
    }

    pub fn preset(&self, name: &str) -> Option<&ObjectValue> {
        self.presets.get(name)
    }
}

/// Builder for alternate schemas.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    registry: SchemaRegistry,
}

impl SchemaBuilder {
    /// Register a property, replacing any with the same key.
    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.registry.properties.insert(spec.key.clone(), spec);
        self
    }

    pub fn pseudo(mut self, spec: PseudoSpec) -> Self {
        self.registry.pseudos.insert(spec.selector.clone(), spec);
        self
    }

    pub fn preset(mut self, name: &str, preset: ObjectValue) -> Self {
        self.registry.presets.insert(name.to_string(), preset);
        self
    }

    pub fn build(self) -> SchemaRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let schema = SchemaRegistry::standard();
        assert!(matches!(schema.classify("marginStart"), KeyKind::Property(_)));
        assert!(matches!(schema.classify(":hover"), KeyKind::NestedSelector(_)));
        assert!(matches!(
            schema.classify("@media (max-width: 600px)"),
            KeyKind::AtRule(AtRuleKind::Media)
        ));
        assert_eq!(schema.classify(":focs"), KeyKind::UnknownSelector);
        assert_eq!(schema.classify("@media (oops"), KeyKind::UnknownSelector);
        assert_eq!(schema.classify("textAlin"), KeyKind::Unknown);
        assert_eq!(schema.classify("transition"), KeyKind::Unknown);
    }

    #[test]
    fn test_search_pseudo_elements() {
        let schema = SchemaRegistry::standard();
        for key in [
            "::-webkit-search-decoration",
            "::-webkit-search-cancel-button",
            "::-webkit-search-results-button",
            "::-webkit-search-results-decoration",
        ] {
            assert!(schema.is_recognized_nested_selector(key), "{key}");
        }
    }

    #[test]
    fn test_pseudo_priorities_follow_cascade_order() {
        let schema = SchemaRegistry::standard();
        let order: Vec<_> = [":link", ":visited", ":focus-within", ":hover", ":focus", ":focus-visible", ":active"]
            .iter()
            .map(|k| schema.pseudo(k).unwrap().priority)
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(schema.pseudo(":hover").unwrap().priority.to_string(), "7.1");
        assert_eq!(schema.pseudo("::before").unwrap().priority, Priority::PSEUDO_ELEMENT);
    }

    #[test]
    fn test_alternate_schema() {
        let schema = SchemaRegistry::builder()
            .property(PropertySpec::new("color", ValueSpec::Color))
            .build();
        assert!(schema.is_recognized_property("color"));
        assert!(!schema.is_recognized_property("width"));
        assert!(!schema.is_recognized_nested_selector(":hover"));
    }

    #[test]
    fn test_every_preset_key_is_a_property() {
        let schema = SchemaRegistry::standard();
        for name in ["absoluteFill", "flexBase", "buttonBase", "linkBase"] {
            let preset = schema.preset(name).unwrap();
            for (key, value) in preset.iter() {
                let spec = schema.value_spec_for(key).unwrap_or_else(|| panic!("{name}.{key}"));
                assert!(spec.accepts(value), "{name}.{key}");
            }
        }
    }
}
