//! Style presets available as `stylex.<name>`.

use crate::eval::{ObjectValue, Value};

fn preset<const N: usize>(entries: [(&str, Value); N]) -> ObjectValue {
    entries.into_iter().collect()
}

/// Declarations shared by the block-level presets.
fn reset() -> [(&'static str, Value); 6] {
    [
        ("borderStyle", "solid".into()),
        ("borderWidth", 0.into()),
        ("boxSizing", "border-box".into()),
        ("margin", 0.into()),
        ("padding", 0.into()),
        ("position", "relative".into()),
    ]
}

fn with_reset<const N: usize>(entries: [(&str, Value); N]) -> ObjectValue {
    let mut object = preset(reset());
    object.extend_from(&preset(entries));
    object
}

pub fn standard_presets() -> Vec<(&'static str, ObjectValue)> {
    vec![
        (
            "absoluteFill",
            preset([
                ("position", "absolute".into()),
                ("top", 0.into()),
                ("end", 0.into()),
                ("bottom", 0.into()),
                ("start", 0.into()),
                ("boxSizing", "border-box".into()),
            ]),
        ),
        (
            "absoluteCenter",
            preset([
                ("position", "absolute".into()),
                ("top", "50%".into()),
                ("start", "50%".into()),
                ("transform", "translate(-50%, -50%)".into()),
            ]),
        ),
        ("blockBase", with_reset([("display", "block".into())])),
        ("inlineBase", with_reset([("display", "inline".into())])),
        (
            "flexBase",
            with_reset([
                ("alignItems", "stretch".into()),
                ("display", "flex".into()),
                ("flexDirection", "column".into()),
                ("flexShrink", 0.into()),
                ("minHeight", 0.into()),
                ("minWidth", 0.into()),
            ]),
        ),
        (
            "flexInlineBase",
            with_reset([
                ("alignItems", "stretch".into()),
                ("display", "inline-flex".into()),
                ("flexDirection", "row".into()),
                ("flexShrink", 0.into()),
                ("minHeight", 0.into()),
                ("minWidth", 0.into()),
            ]),
        ),
        (
            "listBase",
            preset([
                ("boxSizing", "border-box".into()),
                ("listStyle", "none".into()),
                ("margin", 0.into()),
                ("padding", 0.into()),
            ]),
        ),
        (
            "buttonBase",
            preset([
                ("appearance", "none".into()),
                ("backgroundColor", "transparent".into()),
                ("borderStyle", "none".into()),
                ("boxSizing", "border-box".into()),
                ("color", "inherit".into()),
                ("cursor", "pointer".into()),
                ("fontFamily", "inherit".into()),
                ("margin", 0.into()),
                ("padding", 0.into()),
                ("textAlign", "inherit".into()),
            ]),
        ),
        (
            "linkBase",
            preset([
                ("backgroundColor", "transparent".into()),
                ("color", "inherit".into()),
                ("cursor", "pointer".into()),
                ("textDecoration", "none".into()),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flex_base_overrides_reset() {
        let presets = standard_presets();
        let (_, flex) = presets.iter().find(|(name, _)| *name == "flexBase").unwrap();
        assert_eq!(flex.get("display"), Some(&Value::from("flex")));
        assert_eq!(flex.get("margin"), Some(&Value::Num(0.0)));
    }
}
