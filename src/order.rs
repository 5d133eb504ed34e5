//! Rule priorities, deduplication and stable ordering.
//!
//! Concatenating atomic rules is only cascade-correct if rules that should
//! win come later. Every rule therefore carries a [`Priority`] derived from
//! its selector context alone, and [`order`] sorts by it while keeping
//! first-seen order inside a tier.

use std::collections::HashSet;
use std::fmt;

/// Fixed-point priority in hundredths: `Priority(710)` is `7.1`.
///
/// Only the relative order carries meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u32);

impl Priority {
    /// `:root` custom property declarations.
    pub const ROOT_VARS: Priority = Priority(0);
    /// Theme override classes, above `:root` and below every style rule.
    pub const THEME_OVERRIDE: Priority = Priority(50);
    /// Plain declarations with no selector context.
    pub const BASE: Priority = Priority(100);
    /// Floor of the pseudo-class tier.
    pub const PSEUDO_CLASS: Priority = Priority(700);
    /// Pseudo-elements, ordered after every pseudo-class.
    pub const PSEUDO_ELEMENT: Priority = Priority(800);
    /// `@media` / `@supports` wrapped rules.
    pub const AT_RULE: Priority = Priority(900);

    /// Pseudo-class priority with a sub-priority in hundredths.
    pub const fn pseudo_class(sub: u32) -> Priority {
        Priority(Self::PSEUDO_CLASS.0 + sub)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

/// Anything that can be placed in the final stylesheet.
pub trait Prioritized {
    /// Rules with equal keys are interchangeable.
    fn dedup_key(&self) -> &str;
    fn priority(&self) -> Priority;
}

impl<R: Prioritized> Prioritized for &R {
    fn dedup_key(&self) -> &str {
        (**self).dedup_key()
    }

    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

/// Drop repeated rules, keeping the first occurrence, without reordering.
pub fn dedup<R: Prioritized>(rules: impl IntoIterator<Item = R>) -> Vec<R> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for rule in rules {
        if seen.insert(rule.dedup_key().to_string()) {
            unique.push(rule);
        }
    }
    unique
}

/// Deduplicate and sort priority-ascending; ties keep first-seen order.
pub fn order<R: Prioritized>(rules: impl IntoIterator<Item = R>) -> Vec<R> {
    let mut unique = dedup(rules);
    // sort_by_key is stable
    unique.sort_by_key(|rule| rule.priority());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rule(&'static str, Priority);

    impl Prioritized for Rule {
        fn dedup_key(&self) -> &str {
            self.0
        }
        fn priority(&self) -> Priority {
            self.1
        }
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::BASE.to_string(), "1");
        assert_eq!(Priority::pseudo_class(10).to_string(), "7.1");
        assert_eq!(Priority::pseudo_class(5).to_string(), "7.05");
        assert_eq!(Priority::THEME_OVERRIDE.to_string(), "0.5");
    }

    #[test]
    fn test_order_by_tier_regardless_of_source_order() {
        let rules = vec![
            Rule("media", Priority::AT_RULE),
            Rule("hover", Priority::pseudo_class(10)),
            Rule("base", Priority::BASE),
        ];
        let ordered: Vec<_> = order(rules).into_iter().map(|r| r.0).collect();
        assert_eq!(ordered, vec!["base", "hover", "media"]);
    }

    #[test]
    fn test_order_is_stable_within_tier() {
        let rules = vec![
            Rule("b", Priority::BASE),
            Rule("a", Priority::BASE),
            Rule("c", Priority::BASE),
        ];
        let ordered: Vec<_> = order(rules).into_iter().map(|r| r.0).collect();
        assert_eq!(ordered, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let rules = vec![
            Rule("a", Priority::BASE),
            Rule("b", Priority::BASE),
            Rule("a", Priority::AT_RULE),
        ];
        let ordered = order(rules);
        assert_eq!(
            ordered,
            vec![Rule("a", Priority::BASE), Rule("b", Priority::BASE)]
        );
    }
}
