//! Development registrations and production stylesheets.
//!
//! - Development: one `inject` call per unique rule, in first-seen order,
//!   each tagged with its priority so the runtime can place it
//! - Production: every rule ordered by [`order`] and concatenated

pub mod js;

pub use js::{JsValue, namespaces_object};

use crate::compiler::StyleRule;
use crate::order::{Prioritized, dedup, order};
use crate::util::quote_js_string;

/// `<runtime>.inject("<css>", <priority>[, "<rtl css>"])`.
pub fn registration(rule: &StyleRule, runtime: &str) -> String {
    let priority = rule.priority();
    match rule {
        StyleRule::Atomic(rule) => {
            format!("{runtime}.inject({}, {priority})", quote_js_string(&rule.css()))
        }
        StyleRule::Bidi { ltr, rtl } => format!(
            "{runtime}.inject({}, {priority}, {})",
            quote_js_string(&ltr.css()),
            quote_js_string(&rtl.css())
        ),
        StyleRule::Theme { css, .. } => {
            format!("{runtime}.inject({}, {priority})", quote_js_string(css))
        }
    }
}

/// Registration statements for a compiled block, guarded so they only run
/// in development builds. Empty when there is nothing to register.
pub fn dev_block(rules: &[StyleRule], runtime: &str, indent: &str) -> String {
    let unique = dedup(rules.iter());
    if unique.is_empty() {
        return String::new();
    }
    let mut out = format!("{indent}if (__DEV__) {{\n");
    for rule in unique {
        out.push_str(indent);
        out.push_str("  ");
        out.push_str(&registration(rule, runtime));
        out.push_str(";\n");
    }
    out.push_str(indent);
    out.push_str("}\n");
    out
}

/// The extracted stylesheet: unique rules, priority ascending, one rule
/// per line.
pub fn stylesheet<'a>(rules: impl IntoIterator<Item = &'a StyleRule>) -> String {
    order(rules)
        .into_iter()
        .flat_map(|rule| rule.stylesheet_lines())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{AtomicRule, Direction};
    use crate::order::Priority;
    use crate::schema::SelectorContext;

    fn atomic(class: &str, property: &str, value: &str, context: SelectorContext) -> AtomicRule {
        AtomicRule {
            class_name: class.into(),
            property: property.into(),
            value: value.into(),
            priority: context.priority(),
            context,
            direction: Direction::Both,
        }
    }

    fn hover() -> SelectorContext {
        SelectorContext::Pseudo {
            selector: ":hover".into(),
            priority: Priority::pseudo_class(10),
        }
    }

    #[test]
    fn test_registrations() {
        let rule = StyleRule::Atomic(atomic("x1", "background", "red", hover()));
        assert_eq!(
            registration(&rule, "stylex"),
            "stylex.inject(\".x1:hover{background:red}\", 7.1)"
        );

        let mut ltr = atomic("x2", "margin-left", "10px", SelectorContext::Base);
        ltr.direction = Direction::Ltr;
        let mut rtl = atomic("x3", "margin-right", "10px", SelectorContext::Base);
        rtl.direction = Direction::Rtl;
        assert_eq!(
            registration(&StyleRule::Bidi { ltr, rtl }, "stylex"),
            "stylex.inject(\".x2{margin-left:10px}\", 1, \".x3{margin-right:10px}\")"
        );
    }

    #[test]
    fn test_dev_block_dedups_in_source_order() {
        let rules = vec![
            StyleRule::Atomic(atomic("x1", "background", "red", hover())),
            StyleRule::Atomic(atomic("x2", "display", "flex", SelectorContext::Base)),
            StyleRule::Atomic(atomic("x1", "background", "red", hover())),
        ];
        assert_eq!(
            dev_block(&rules, "stylex", ""),
            "if (__DEV__) {\n  stylex.inject(\".x1:hover{background:red}\", 7.1);\n  stylex.inject(\".x2{display:flex}\", 1);\n}\n"
        );
        assert_eq!(dev_block(&[], "stylex", ""), "");
    }

    #[test]
    fn test_stylesheet_orders_by_tier() {
        let media = SelectorContext::AtRule {
            kind: crate::schema::AtRuleKind::Media,
            key: "@media (max-width: 600px)".into(),
        };
        let rules = vec![
            StyleRule::Atomic(atomic("x3", "width", "100%", media)),
            StyleRule::Atomic(atomic("x2", "background", "red", hover())),
            StyleRule::Atomic(atomic("x1", "width", "50%", SelectorContext::Base)),
        ];
        assert_eq!(
            stylesheet(&rules),
            ".x1{width:50%}\n.x2:hover{background:red}\n@media (max-width: 600px){.x3{width:100%}}"
        );
    }
}
