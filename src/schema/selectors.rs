//! Nested-selector and at-rule keys.

use cssparser::{Parser, ParserInput, Token};

use crate::order::Priority;
use crate::util::collapse_whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoKind {
    Class,
    Element,
}

/// An allow-listed pseudo-class or pseudo-element key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoSpec {
    pub selector: String,
    pub kind: PseudoKind,
    pub priority: Priority,
}

impl PseudoSpec {
    pub fn class(selector: &str, priority: Priority) -> Self {
        Self {
            selector: selector.to_string(),
            kind: PseudoKind::Class,
            priority,
        }
    }

    pub fn element(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            kind: PseudoKind::Element,
            priority: Priority::PSEUDO_ELEMENT,
        }
    }
}

/// Interaction pseudo-classes in cascade order (link, visited, focus-within,
/// hover, focus, focus-visible, active). Later entries override earlier ones.
pub(crate) const INTERACTION_PSEUDO_CLASSES: &[(&str, u32)] = &[
    (":link", 1),
    (":visited", 2),
    (":focus-within", 5),
    (":hover", 10),
    (":focus", 15),
    (":focus-visible", 20),
    (":active", 25),
];

/// Structural and form-state pseudo-classes; all share the tier floor.
pub(crate) const STATE_PSEUDO_CLASSES: &[&str] = &[
    ":first-child",
    ":last-child",
    ":only-child",
    ":first-of-type",
    ":last-of-type",
    ":only-of-type",
    ":empty",
    ":checked",
    ":default",
    ":disabled",
    ":enabled",
    ":indeterminate",
    ":invalid",
    ":valid",
    ":optional",
    ":required",
    ":placeholder-shown",
    ":read-only",
    ":read-write",
    ":target",
];

pub(crate) const PSEUDO_ELEMENTS: &[&str] = &[
    "::before",
    "::after",
    "::placeholder",
    "::selection",
    "::marker",
    "::backdrop",
    "::-moz-focus-inner",
    "::-webkit-scrollbar",
    "::-webkit-search-decoration",
    "::-webkit-search-cancel-button",
    "::-webkit-search-results-button",
    "::-webkit-search-results-decoration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtRuleKind {
    Media,
    Supports,
}

impl AtRuleKind {
    pub fn name(self) -> &'static str {
        match self {
            AtRuleKind::Media => "media",
            AtRuleKind::Supports => "supports",
        }
    }
}

/// Recognize `@media <prelude>` / `@supports <prelude>`.
///
/// The prelude is checked structurally only: it must be non-empty, its
/// parentheses must balance, and it must not contain blocks, semicolons or
/// bad strings/urls. Query semantics are not validated.
pub fn parse_at_rule(key: &str) -> Option<AtRuleKind> {
    let rest = key.strip_prefix('@')?;
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    let (name, prelude) = rest.split_at(name_len);
    let kind = match name {
        "media" => AtRuleKind::Media,
        "supports" => AtRuleKind::Supports,
        _ => return None,
    };
    prelude_is_well_formed(prelude).then_some(kind)
}

fn prelude_is_well_formed(prelude: &str) -> bool {
    let mut depth = 0i32;
    for c in prelude.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return false;
    }

    let mut input = ParserInput::new(prelude);
    let mut parser = Parser::new(&mut input);
    let mut saw_token = false;
    while let Ok(token) = parser.next() {
        match token {
            Token::BadUrl(_)
            | Token::BadString(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket
            | Token::CurlyBracketBlock
            | Token::Semicolon => return false,
            _ => saw_token = true,
        }
    }
    saw_token
}

/// Where a declaration applies: bare, under a pseudo selector, or inside
/// an at-rule block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorContext {
    Base,
    Pseudo {
        selector: String,
        priority: Priority,
    },
    AtRule {
        kind: AtRuleKind,
        /// Key as written, e.g. `@media (max-width: 600px)`.
        key: String,
    },
}

impl SelectorContext {
    pub fn pseudo(spec: &PseudoSpec) -> Self {
        SelectorContext::Pseudo {
            selector: spec.selector.clone(),
            priority: spec.priority,
        }
    }

    pub fn at_rule(kind: AtRuleKind, key: &str) -> Self {
        SelectorContext::AtRule {
            kind,
            key: key.to_string(),
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            SelectorContext::Base => Priority::BASE,
            SelectorContext::Pseudo { priority, .. } => *priority,
            SelectorContext::AtRule { .. } => Priority::AT_RULE,
        }
    }

    /// Nesting depth below the namespace's top-level property set.
    pub fn depth(&self) -> usize {
        match self {
            SelectorContext::Base => 0,
            _ => 1,
        }
    }

    /// Key of the nested block in the source definition.
    pub fn block_key(&self) -> Option<&str> {
        match self {
            SelectorContext::Base => None,
            SelectorContext::Pseudo { selector, .. } => Some(selector),
            SelectorContext::AtRule { key, .. } => Some(key),
        }
    }

    /// Canonical text of the context; equal for keys that differ only in
    /// whitespace.
    pub fn normalized(&self) -> String {
        match self {
            SelectorContext::Base => String::new(),
            SelectorContext::Pseudo { selector, .. } => selector.clone(),
            SelectorContext::AtRule { key, .. } => collapse_whitespace(key),
        }
    }
}
