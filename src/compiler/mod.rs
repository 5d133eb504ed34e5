//! Atomic rule compilation.
//!
//! Every validated declaration becomes one [`AtomicRule`], or a
//! left-to-right / right-to-left pair of them for logical properties.
//! Class names come from the [`RuleCache`], which derives them from the
//! rule's semantic tuple alone, so identical declarations anywhere in a
//! build share one class.

mod cache;
mod hash;

pub use cache::{RuleCache, RuleKey};
pub use hash::{identifier, short_hash};

use crate::eval::Value;
use crate::order::{Prioritized, Priority};
use crate::schema::{CssName, SelectorContext, Unit};
use crate::util::{collapse_whitespace, js_number_to_string};
use crate::validate::{FlatNamespace, FlatRule};

/// Which document direction a rule applies under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Both,
    Ltr,
    Rtl,
}

impl Direction {
    fn tag(self) -> &'static str {
        match self {
            Direction::Both => "",
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    fn guard(self) -> &'static str {
        match self {
            Direction::Both => "",
            Direction::Ltr => "html:not([dir='rtl']) ",
            Direction::Rtl => "html[dir='rtl'] ",
        }
    }
}

/// One class, one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicRule {
    pub class_name: String,
    /// Physical CSS property.
    pub property: String,
    /// CSS value text, units applied.
    pub value: String,
    pub context: SelectorContext,
    pub direction: Direction,
    pub priority: Priority,
}

impl AtomicRule {
    /// Rule text without a direction guard.
    pub fn css(&self) -> String {
        self.render(false)
    }

    /// Rule text guarded by its direction, for extracted stylesheets.
    pub fn guarded_css(&self) -> String {
        self.render(true)
    }

    fn render(&self, guarded: bool) -> String {
        let guard = if guarded { self.direction.guard() } else { "" };
        let pseudo = match &self.context {
            SelectorContext::Pseudo { selector, .. } => selector.as_str(),
            _ => "",
        };
        let rule = format!(
            "{guard}.{}{pseudo}{{{}:{}}}",
            self.class_name, self.property, self.value
        );
        match &self.context {
            SelectorContext::AtRule { .. } => format!("{}{{{rule}}}", self.context.normalized()),
            _ => rule,
        }
    }
}

/// A unit of compiled output. Bidirectional pairs stay together so the
/// development runtime can register both texts at once.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRule {
    Atomic(AtomicRule),
    Bidi { ltr: AtomicRule, rtl: AtomicRule },
    /// Custom-property rule produced by theme variables.
    Theme {
        key: String,
        css: String,
        priority: Priority,
    },
}

impl StyleRule {
    /// Class names an element needs for this rule, space separated.
    pub fn class_names(&self) -> String {
        match self {
            StyleRule::Atomic(rule) => rule.class_name.clone(),
            StyleRule::Bidi { ltr, rtl } => format!("{} {}", ltr.class_name, rtl.class_name),
            StyleRule::Theme { key, .. } => key.clone(),
        }
    }

    pub fn atomic_rules(&self) -> Vec<&AtomicRule> {
        match self {
            StyleRule::Atomic(rule) => vec![rule],
            StyleRule::Bidi { ltr, rtl } => vec![ltr, rtl],
            StyleRule::Theme { .. } => Vec::new(),
        }
    }

    /// Lines this rule contributes to an extracted stylesheet.
    pub fn stylesheet_lines(&self) -> Vec<String> {
        match self {
            StyleRule::Atomic(rule) => vec![rule.guarded_css()],
            StyleRule::Bidi { ltr, rtl } => vec![ltr.guarded_css(), rtl.guarded_css()],
            StyleRule::Theme { css, .. } => vec![css.clone()],
        }
    }
}

impl Prioritized for StyleRule {
    fn dedup_key(&self) -> &str {
        match self {
            StyleRule::Atomic(rule) | StyleRule::Bidi { ltr: rule, .. } => &rule.class_name,
            StyleRule::Theme { key, .. } => key,
        }
    }

    fn priority(&self) -> Priority {
        match self {
            StyleRule::Atomic(rule) | StyleRule::Bidi { ltr: rule, .. } => rule.priority,
            StyleRule::Theme { priority, .. } => *priority,
        }
    }
}

impl Prioritized for AtomicRule {
    fn dedup_key(&self) -> &str {
        &self.class_name
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

/// Class names of one namespace, mirroring the definition's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledNamespace {
    pub name: String,
    pub entries: Vec<(String, ClassEntry)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassEntry {
    Classes(String),
    /// A pseudo-selector or at-rule block: property -> class names.
    Nested(Vec<(String, String)>),
}

impl CompiledNamespace {
    /// Class names for a top-level property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|(k, entry)| match entry {
            ClassEntry::Classes(classes) if k == key => Some(classes.as_str()),
            _ => None,
        })
    }

    /// Class names for a property inside a nested block.
    pub fn get_nested(&self, block: &str, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|(k, entry)| match entry {
            ClassEntry::Nested(props) if k == block => props
                .iter()
                .find(|(p, _)| p == key)
                .map(|(_, classes)| classes.as_str()),
            _ => None,
        })
    }

    fn insert(&mut self, block: Option<&str>, key: &str, classes: String) {
        let Some(block) = block else {
            upsert(&mut self.entries, key, ClassEntry::Classes(classes));
            return;
        };
        let nested = self
            .entries
            .iter_mut()
            .find_map(|(k, entry)| match entry {
                ClassEntry::Nested(props) if k == block => Some(props),
                _ => None,
            });
        match nested {
            Some(props) => upsert(props, key, classes),
            None => self
                .entries
                .push((block.to_string(), ClassEntry::Nested(vec![(key.to_string(), classes)]))),
        }
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: &str, value: V) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key.to_string(), value)),
    }
}

/// Output of compiling one `create()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStyles {
    pub namespaces: Vec<CompiledNamespace>,
    /// Rules in document order, not yet deduplicated.
    pub rules: Vec<StyleRule>,
}

/// Render a statically evaluated value as CSS text.
pub fn css_value(value: &Value, unit: Unit) -> String {
    match value {
        Value::Num(n) if *n == 0.0 && unit != Unit::None => "0".to_string(),
        Value::Num(n) => format!("{}{}", js_number_to_string(*n), unit.suffix()),
        Value::Str(s) => collapse_whitespace(s),
        Value::Object(_) => String::new(),
    }
}

/// `start`/`end` resolved for each direction.
fn flip_logical_value(value: &str) -> Option<(&'static str, &'static str)> {
    match value {
        "start" => Some(("left", "right")),
        "end" => Some(("right", "left")),
        _ => None,
    }
}

pub struct Compiler<'c> {
    cache: &'c RuleCache,
}

impl<'c> Compiler<'c> {
    pub fn new(cache: &'c RuleCache) -> Self {
        Self { cache }
    }

    fn atomic(
        &self,
        context: &SelectorContext,
        property: &str,
        value: &str,
        direction: Direction,
    ) -> AtomicRule {
        let key = RuleKey {
            context: context.normalized(),
            property: property.to_string(),
            value: value.to_string(),
            direction: direction.tag(),
        };
        AtomicRule {
            class_name: self.cache.class_name(&key),
            property: key.property,
            value: key.value,
            context: context.clone(),
            direction,
            priority: context.priority(),
        }
    }

    /// Compile one declaration.
    pub fn compile_rule(&self, rule: &FlatRule<'_>) -> StyleRule {
        let spec = rule.property;
        let value = css_value(&rule.value, spec.unit);
        let flipped = if spec.logical_values {
            flip_logical_value(&value)
        } else {
            None
        };

        let (ltr_property, rtl_property) = match &spec.css {
            CssName::Plain(name) if flipped.is_none() => {
                return StyleRule::Atomic(self.atomic(&rule.context, name, &value, Direction::Both));
            }
            CssName::Plain(name) => (name.as_str(), name.as_str()),
            CssName::Logical { ltr, rtl } => (ltr.as_str(), rtl.as_str()),
        };
        let (ltr_value, rtl_value) = match flipped {
            Some((ltr, rtl)) => (ltr, rtl),
            None => (value.as_str(), value.as_str()),
        };
        StyleRule::Bidi {
            ltr: self.atomic(&rule.context, ltr_property, ltr_value, Direction::Ltr),
            rtl: self.atomic(&rule.context, rtl_property, rtl_value, Direction::Rtl),
        }
    }

    /// Compile declarations in order.
    pub fn compile(&self, rules: &[FlatRule<'_>]) -> Vec<StyleRule> {
        rules.iter().map(|rule| self.compile_rule(rule)).collect()
    }

    /// Compile every namespace of a validated definition.
    pub fn compile_namespaces(&self, namespaces: &[FlatNamespace<'_>]) -> CompiledStyles {
        let mut compiled = Vec::with_capacity(namespaces.len());
        let mut rules = Vec::new();
        for namespace in namespaces {
            let mut entry = CompiledNamespace {
                name: namespace.name.clone(),
                entries: Vec::new(),
            };
            for flat in &namespace.rules {
                let rule = self.compile_rule(flat);
                entry.insert(flat.context.block_key(), &flat.property.key, rule.class_names());
                rules.push(rule);
            }
            compiled.push(entry);
        }
        CompiledStyles {
            namespaces: compiled,
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Scope;
    use crate::js::parse_expression;
    use crate::schema::SchemaRegistry;
    use crate::validate::{Mode, validate};

    fn compile(source: &str) -> CompiledStyles {
        let expr = parse_expression(source).unwrap();
        let namespaces =
            validate(&expr, &Scope::with_stylex(), SchemaRegistry::standard(), Mode::FailFast)
                .unwrap();
        let cache = RuleCache::default();
        Compiler::new(&cache).compile_namespaces(&namespaces)
    }

    #[test]
    fn test_bidi_expansion() {
        let styles = compile("{default: {marginStart: 5}}");
        assert_eq!(styles.rules.len(), 1);
        let StyleRule::Bidi { ltr, rtl } = &styles.rules[0] else {
            panic!("expected a bidi pair");
        };
        assert_ne!(ltr.class_name, rtl.class_name);
        assert_eq!(ltr.css(), format!(".{}{{margin-left:5px}}", ltr.class_name));
        assert_eq!(
            ltr.guarded_css(),
            format!("html:not([dir='rtl']) .{}{{margin-left:5px}}", ltr.class_name)
        );
        assert_eq!(
            rtl.guarded_css(),
            format!("html[dir='rtl'] .{}{{margin-right:5px}}", rtl.class_name)
        );
        assert_eq!(
            styles.namespaces[0].get("marginStart"),
            Some(format!("{} {}", ltr.class_name, rtl.class_name).as_str())
        );
    }

    #[test]
    fn test_logical_values_flip() {
        let styles = compile("{default: {textAlign: 'start'}}");
        let StyleRule::Bidi { ltr, rtl } = &styles.rules[0] else {
            panic!("expected a bidi pair");
        };
        assert_eq!((ltr.property.as_str(), ltr.value.as_str()), ("text-align", "left"));
        assert_eq!((rtl.property.as_str(), rtl.value.as_str()), ("text-align", "right"));

        let styles = compile("{default: {textAlign: 'center'}}");
        assert!(matches!(styles.rules[0], StyleRule::Atomic(_)));
    }

    #[test]
    fn test_units() {
        assert_eq!(css_value(&Value::Num(0.0), Unit::Px), "0");
        assert_eq!(css_value(&Value::Num(-5.0), Unit::Px), "-5px");
        assert_eq!(css_value(&Value::Num(0.5), Unit::None), "0.5");
        assert_eq!(css_value(&Value::Num(300.0), Unit::Ms), "300ms");
        assert_eq!(css_value(&Value::from("1px  solid blue"), Unit::Px), "1px solid blue");
    }

    #[test]
    fn test_contexts() {
        let styles = compile(
            "{default: {width: '50%', ':hover': {background: 'red'}, '@media (max-width: 600px)': {width: '100%'}}}",
        );
        let css: Vec<_> = styles
            .rules
            .iter()
            .flat_map(|r| r.stylesheet_lines())
            .collect();
        assert!(css[0].ends_with("{width:50%}"));
        assert!(css[1].ends_with(":hover{background:red}"));
        assert!(css[2].starts_with("@media (max-width: 600px){."));
        assert!(css[2].ends_with("{width:100%}}"));
        let ns = &styles.namespaces[0];
        assert!(ns.get_nested(":hover", "background").is_some());
        assert!(ns.get_nested("@media (max-width: 600px)", "width").is_some());
        assert_ne!(ns.get("width"), ns.get_nested("@media (max-width: 600px)", "width"));
    }

    #[test]
    fn test_identical_declarations_share_a_class() {
        let styles = compile("{a: {display: 'flex'}, b: {display: 'flex', width: 0}}");
        assert_eq!(styles.namespaces[0].get("display"), styles.namespaces[1].get("display"));
    }
}
