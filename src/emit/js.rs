//! JavaScript object literals for rewritten call sites.

use crate::compiler::{ClassEntry, CompiledNamespace};
use crate::util::{js_object_key, quote_js_string};

const INDENT: &str = "  ";

/// A string-valued, possibly nested, object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Str(String),
    Object(Vec<(String, JsValue)>),
}

impl JsValue {
    /// Render with two-space indentation; continuation lines are prefixed
    /// with `base` so the literal lines up with the code around it.
    pub fn render(&self, base: &str) -> String {
        let mut out = String::new();
        self.write(&mut out, base, 0);
        out
    }

    fn write(&self, out: &mut String, base: &str, depth: usize) {
        match self {
            JsValue::Str(s) => out.push_str(&quote_js_string(s)),
            JsValue::Object(entries) if entries.is_empty() => out.push_str("{}"),
            JsValue::Object(entries) => {
                out.push_str("{\n");
                for (i, (key, value)) in entries.iter().enumerate() {
                    out.push_str(base);
                    out.push_str(&INDENT.repeat(depth + 1));
                    out.push_str(&js_object_key(key));
                    out.push_str(": ");
                    value.write(out, base, depth + 1);
                    if i + 1 < entries.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(base);
                out.push_str(&INDENT.repeat(depth));
                out.push('}');
            }
        }
    }
}

/// Object literal replacing a `create()` call. With `debug_prefix`, every
/// namespace and nested block carries a `<prefix>__<namespace>` key that
/// maps to itself.
pub fn namespaces_object(namespaces: &[CompiledNamespace], debug_prefix: Option<&str>) -> JsValue {
    let entries = namespaces
        .iter()
        .map(|namespace| {
            let debug = debug_prefix.map(|prefix| format!("{prefix}__{}", namespace.name));
            let with_debug = |mut props: Vec<(String, JsValue)>| {
                if let Some(debug) = &debug {
                    props.insert(0, (debug.clone(), JsValue::Str(debug.clone())));
                }
                JsValue::Object(props)
            };
            let props = namespace
                .entries
                .iter()
                .map(|(key, entry)| {
                    let value = match entry {
                        ClassEntry::Classes(classes) => JsValue::Str(classes.clone()),
                        ClassEntry::Nested(nested) => with_debug(
                            nested
                                .iter()
                                .map(|(k, classes)| (k.clone(), JsValue::Str(classes.clone())))
                                .collect(),
                        ),
                    };
                    (key.clone(), value)
                })
                .collect();
            (namespace.name.clone(), with_debug(props))
        })
        .collect();
    JsValue::Object(entries)
}
