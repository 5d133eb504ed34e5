//! Recognized style properties.
//!
//! Keys are the camelCase names authors write; the CSS name is derived with
//! [`kebab_case`] unless the property is logical, in which case it carries
//! an explicit left-to-right / right-to-left pair.

use super::values::ValueSpec;
use crate::util::kebab_case;

/// Unit appended to bare numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Ms,
    None,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Ms => "ms",
            Unit::None => "",
        }
    }
}

/// CSS property name(s) a style key compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssName {
    Plain(String),
    /// Direction-dependent property: `ltr` applies under left-to-right
    /// documents, `rtl` under `html[dir='rtl']`.
    Logical { ltr: String, rtl: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    /// camelCase key as written in style definitions.
    pub key: String,
    pub css: CssName,
    pub value: ValueSpec,
    pub unit: Unit,
    /// `start`/`end` values flip to `left`/`right` under direction.
    pub logical_values: bool,
}

impl PropertySpec {
    /// A physical property whose CSS name is the kebab-cased key.
    pub fn new(key: &str, value: ValueSpec) -> Self {
        let unit = match value {
            ValueSpec::Time => Unit::Ms,
            _ => Unit::Px,
        };
        Self {
            key: key.to_string(),
            css: CssName::Plain(kebab_case(key)),
            value,
            unit,
            logical_values: false,
        }
    }

    /// A logical property expanding to `ltr` / `rtl` physical names.
    pub fn logical(key: &str, ltr: &str, rtl: &str, value: ValueSpec) -> Self {
        Self {
            css: CssName::Logical {
                ltr: ltr.to_string(),
                rtl: rtl.to_string(),
            },
            ..Self::new(key, value)
        }
    }

    pub fn unitless(mut self) -> Self {
        self.unit = Unit::None;
        self
    }

    pub fn with_logical_values(mut self) -> Self {
        self.logical_values = true;
        self
    }
}

// ============================================================================
// Keyword lists
// ============================================================================

const DISPLAY: &[&str] = &[
    "none",
    "block",
    "inline",
    "inline-block",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "contents",
    "table",
    "table-row",
    "table-cell",
    "list-item",
    "flow-root",
];

const POSITION: &[&str] = &["static", "relative", "absolute", "fixed", "sticky"];

const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];

const BOX_SIZING: &[&str] = &["border-box", "content-box"];

const BORDER_STYLE: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

const TEXT_ALIGN: &[&str] = &[
    "left",
    "right",
    "center",
    "justify",
    "start",
    "end",
    "match-parent",
];

const FLOAT: &[&str] = &["left", "right", "none", "start", "end"];

const CLEAR: &[&str] = &["left", "right", "both", "none", "start", "end"];

const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "column", "column-reverse"];

const FLEX_WRAP: &[&str] = &["nowrap", "wrap", "wrap-reverse"];

const ALIGNMENT: &[&str] = &[
    "normal",
    "auto",
    "stretch",
    "center",
    "start",
    "end",
    "flex-start",
    "flex-end",
    "self-start",
    "self-end",
    "baseline",
    "space-between",
    "space-around",
    "space-evenly",
];

const FONT_STYLE: &[&str] = &["normal", "italic", "oblique"];

const FONT_WEIGHT: &[&str] = &["normal", "bold", "bolder", "lighter"];

const TEXT_TRANSFORM: &[&str] = &["none", "capitalize", "uppercase", "lowercase"];

const WHITE_SPACE: &[&str] = &["normal", "nowrap", "pre", "pre-wrap", "pre-line", "break-spaces"];

const WORD_BREAK: &[&str] = &["normal", "break-all", "keep-all", "break-word"];

const OVERFLOW_WRAP: &[&str] = &["normal", "break-word", "anywhere"];

const TEXT_OVERFLOW: &[&str] = &["clip", "ellipsis"];

const VISIBILITY: &[&str] = &["visible", "hidden", "collapse"];

const POINTER_EVENTS: &[&str] = &["auto", "none"];

const USER_SELECT: &[&str] = &["auto", "none", "text", "all", "contain"];

const OBJECT_FIT: &[&str] = &["fill", "contain", "cover", "none", "scale-down"];

const APPEARANCE: &[&str] = &[
    "none",
    "auto",
    "textfield",
    "searchfield",
    "button",
    "menulist",
    "menulist-button",
    "checkbox",
    "radio",
];

const MOZ_OSX_FONT_SMOOTHING: &[&str] = &["auto", "grayscale"];

const WEBKIT_FONT_SMOOTHING: &[&str] = &["auto", "none", "antialiased", "subpixel-antialiased"];

const LIST_STYLE_POSITION: &[&str] = &["inside", "outside"];

const VERTICAL_ALIGN: &[&str] = &[
    "baseline",
    "sub",
    "super",
    "text-top",
    "text-bottom",
    "middle",
    "top",
    "bottom",
];

const CURSOR: &[&str] = &[
    "auto",
    "default",
    "none",
    "pointer",
    "text",
    "move",
    "wait",
    "progress",
    "help",
    "not-allowed",
    "grab",
    "grabbing",
    "crosshair",
    "col-resize",
    "row-resize",
    "ew-resize",
    "ns-resize",
    "zoom-in",
    "zoom-out",
];

const RESIZE: &[&str] = &["none", "both", "horizontal", "vertical", "block", "inline"];

const BACKGROUND_REPEAT: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat", "space", "round"];

/// Properties that can be animated without triggering layout.
const ANIMATABLE: &[&str] = &[
    "opacity",
    "transform",
    "filter",
    "color",
    "background-color",
    "border-color",
    "box-shadow",
    "fill",
    "stroke",
    "none",
];

const TIMING_KEYWORDS: &[&str] = &[
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "linear",
    "step-start",
    "step-end",
];

const TIMING_FUNCTION: ValueSpec = ValueSpec::OneOf(&[
    ValueSpec::Keywords(TIMING_KEYWORDS),
    ValueSpec::Functions(&["cubic-bezier", "steps", "linear", "var"]),
]);

const FONT_WEIGHT_VALUE: ValueSpec = ValueSpec::OneOf(&[
    ValueSpec::Keywords(FONT_WEIGHT),
    ValueSpec::Number {
        min: Some(1.0),
        max: Some(1000.0),
    },
    ValueSpec::Functions(&["var"]),
]);

const PAINT: ValueSpec = ValueSpec::OneOf(&[
    ValueSpec::Keywords(&["none", "context-fill", "context-stroke"]),
    ValueSpec::Color,
    ValueSpec::Functions(&["url"]),
]);

const LINE_HEIGHT: ValueSpec = ValueSpec::OneOf(&[
    ValueSpec::Number {
        min: Some(0.0),
        max: None,
    },
    ValueSpec::Keywords(&["normal"]),
    ValueSpec::Length,
]);

const VERTICAL_ALIGN_VALUE: ValueSpec =
    ValueSpec::OneOf(&[ValueSpec::Keywords(VERTICAL_ALIGN), ValueSpec::Length]);

const NON_NEGATIVE: ValueSpec = ValueSpec::Number {
    min: Some(0.0),
    max: None,
};

const ITERATION_COUNT: ValueSpec = ValueSpec::OneOf(&[ValueSpec::Keywords(&["infinite"]), NON_NEGATIVE]);

// ============================================================================
// Table
// ============================================================================

fn each(keys: &[&str], value: ValueSpec) -> impl Iterator<Item = PropertySpec> {
    keys.iter().map(move |key| PropertySpec::new(key, value))
}

/// Every property of the standard schema.
pub fn standard_properties() -> Vec<PropertySpec> {
    let mut props = Vec::new();

    // ------------------------------------------------------------------
    // Box model and positioning
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("display", ValueSpec::Keywords(DISPLAY)));
    props.push(PropertySpec::new("position", ValueSpec::Keywords(POSITION)));
    props.push(PropertySpec::new("boxSizing", ValueSpec::Keywords(BOX_SIZING)));
    props.extend(each(
        &["overflow", "overflowX", "overflowY"],
        ValueSpec::Keywords(OVERFLOW),
    ));
    props.push(PropertySpec::new("visibility", ValueSpec::Keywords(VISIBILITY)));
    props.extend(each(
        &[
            "top", "right", "bottom", "left", "width", "height", "minWidth", "minHeight", "maxWidth",
            "maxHeight", "flexBasis",
        ],
        ValueSpec::Length,
    ));
    props.push(PropertySpec::logical("start", "left", "right", ValueSpec::Length));
    props.push(PropertySpec::logical("end", "right", "left", ValueSpec::Length));
    props.push(PropertySpec::new("inset", ValueSpec::LengthList));
    props.push(PropertySpec::new("zIndex", ValueSpec::Integer).unitless());
    props.push(PropertySpec::new("aspectRatio", ValueSpec::Any).unitless());
    props.push(PropertySpec::new("float", ValueSpec::Keywords(FLOAT)).with_logical_values());
    props.push(PropertySpec::new("clear", ValueSpec::Keywords(CLEAR)).with_logical_values());
    props.push(PropertySpec::new("verticalAlign", VERTICAL_ALIGN_VALUE));
    props.push(PropertySpec::new("objectFit", ValueSpec::Keywords(OBJECT_FIT)));
    props.push(PropertySpec::new("objectPosition", ValueSpec::AnyString));
    props.push(PropertySpec::new("content", ValueSpec::AnyString));

    // ------------------------------------------------------------------
    // Margin and padding
    // ------------------------------------------------------------------
    for side in ["margin", "padding"] {
        props.push(PropertySpec::new(side, ValueSpec::LengthList));
        for physical in [
            "Top",
            "Right",
            "Bottom",
            "Left",
            "BlockStart",
            "BlockEnd",
            "InlineStart",
            "InlineEnd",
        ] {
            props.push(PropertySpec::new(&format!("{side}{physical}"), ValueSpec::Length));
        }
        let css = kebab_case(side);
        props.push(PropertySpec::logical(
            &format!("{side}Start"),
            &format!("{css}-left"),
            &format!("{css}-right"),
            ValueSpec::Length,
        ));
        props.push(PropertySpec::logical(
            &format!("{side}End"),
            &format!("{css}-right"),
            &format!("{css}-left"),
            ValueSpec::Length,
        ));
    }

    // ------------------------------------------------------------------
    // Borders and outlines
    // ------------------------------------------------------------------
    let border_parts: [(&str, ValueSpec); 4] = [
        ("", ValueSpec::AnyString),
        ("Width", ValueSpec::Length),
        ("Style", ValueSpec::Keywords(BORDER_STYLE)),
        ("Color", ValueSpec::Color),
    ];
    for (suffix, value) in border_parts {
        let shorthand = match suffix {
            "Width" => ValueSpec::LengthList,
            "Style" | "Color" => ValueSpec::AnyString,
            _ => value,
        };
        props.push(PropertySpec::new(&format!("border{suffix}"), shorthand));
        for side in ["Top", "Right", "Bottom", "Left"] {
            props.push(PropertySpec::new(&format!("border{side}{suffix}"), value));
        }
        let css_suffix = kebab_case(suffix);
        props.push(PropertySpec::logical(
            &format!("borderStart{suffix}"),
            &format!("border-left{css_suffix}"),
            &format!("border-right{css_suffix}"),
            value,
        ));
        props.push(PropertySpec::logical(
            &format!("borderEnd{suffix}"),
            &format!("border-right{css_suffix}"),
            &format!("border-left{css_suffix}"),
            value,
        ));
    }
    props.push(PropertySpec::new("borderRadius", ValueSpec::LengthList));
    props.extend(each(
        &[
            "borderTopLeftRadius",
            "borderTopRightRadius",
            "borderBottomLeftRadius",
            "borderBottomRightRadius",
        ],
        ValueSpec::LengthList,
    ));
    for (key, ltr, rtl) in [
        ("borderTopStartRadius", "border-top-left-radius", "border-top-right-radius"),
        ("borderTopEndRadius", "border-top-right-radius", "border-top-left-radius"),
        ("borderBottomStartRadius", "border-bottom-left-radius", "border-bottom-right-radius"),
        ("borderBottomEndRadius", "border-bottom-right-radius", "border-bottom-left-radius"),
    ] {
        props.push(PropertySpec::logical(key, ltr, rtl, ValueSpec::LengthList));
    }
    props.push(PropertySpec::new("outline", ValueSpec::AnyString));
    props.push(PropertySpec::new("outlineColor", ValueSpec::Color));
    props.push(PropertySpec::new("outlineStyle", ValueSpec::Keywords(BORDER_STYLE)));
    props.extend(each(&["outlineWidth", "outlineOffset"], ValueSpec::Length));

    // ------------------------------------------------------------------
    // Flexbox and grid
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("flex", ValueSpec::Any).unitless());
    props.push(PropertySpec::new("flexDirection", ValueSpec::Keywords(FLEX_DIRECTION)));
    props.push(PropertySpec::new("flexWrap", ValueSpec::Keywords(FLEX_WRAP)));
    props.extend(each(&["flexGrow", "flexShrink"], NON_NEGATIVE).map(PropertySpec::unitless));
    props.push(PropertySpec::new("order", ValueSpec::Integer).unitless());
    props.extend(each(
        &[
            "alignItems",
            "alignContent",
            "alignSelf",
            "justifyContent",
            "justifyItems",
            "justifySelf",
        ],
        ValueSpec::Keywords(ALIGNMENT),
    ));
    props.extend(each(&["gap", "rowGap", "columnGap"], ValueSpec::LengthList));
    props.extend(each(
        &[
            "gridTemplateColumns",
            "gridTemplateRows",
            "gridTemplateAreas",
            "gridArea",
            "gridAutoFlow",
            "gridAutoColumns",
            "gridAutoRows",
        ],
        ValueSpec::AnyString,
    ));
    props.extend(each(&["gridColumn", "gridRow"], ValueSpec::Any).map(PropertySpec::unitless));

    // ------------------------------------------------------------------
    // Typography
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("color", ValueSpec::Color));
    props.push(PropertySpec::new("fontFamily", ValueSpec::AnyString));
    props.push(PropertySpec::new("fontSize", ValueSpec::Length));
    props.push(PropertySpec::new("fontStyle", ValueSpec::Keywords(FONT_STYLE)));
    props.push(PropertySpec::new("fontWeight", FONT_WEIGHT_VALUE).unitless());
    props.push(PropertySpec::new("fontVariant", ValueSpec::AnyString));
    props.push(PropertySpec::new("lineHeight", LINE_HEIGHT).unitless());
    props.push(PropertySpec::new("letterSpacing", ValueSpec::Length));
    props.push(PropertySpec::new("textAlign", ValueSpec::Keywords(TEXT_ALIGN)).with_logical_values());
    props.extend(each(
        &["textDecoration", "textDecorationLine", "textShadow", "textIndent"],
        ValueSpec::AnyString,
    ));
    props.push(PropertySpec::new("textDecorationColor", ValueSpec::Color));
    props.push(PropertySpec::new("textTransform", ValueSpec::Keywords(TEXT_TRANSFORM)));
    props.push(PropertySpec::new("textOverflow", ValueSpec::Keywords(TEXT_OVERFLOW)));
    props.push(PropertySpec::new("whiteSpace", ValueSpec::Keywords(WHITE_SPACE)));
    props.push(PropertySpec::new("wordBreak", ValueSpec::Keywords(WORD_BREAK)));
    props.push(PropertySpec::new("overflowWrap", ValueSpec::Keywords(OVERFLOW_WRAP)));
    props.push(PropertySpec::new("listStyle", ValueSpec::AnyString));
    props.push(PropertySpec::new("listStyleType", ValueSpec::AnyString));
    props.push(PropertySpec::new("listStylePosition", ValueSpec::Keywords(LIST_STYLE_POSITION)));
    props.push(PropertySpec::new("MozOsxFontSmoothing", ValueSpec::Keywords(MOZ_OSX_FONT_SMOOTHING)));
    props.push(PropertySpec::new("WebkitFontSmoothing", ValueSpec::Keywords(WEBKIT_FONT_SMOOTHING)));
    props.push(PropertySpec::new("WebkitLineClamp", ValueSpec::Integer).unitless());
    props.push(PropertySpec::new("WebkitTapHighlightColor", ValueSpec::Color));

    // ------------------------------------------------------------------
    // Backgrounds and effects
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("background", ValueSpec::AnyString));
    props.push(PropertySpec::new("backgroundColor", ValueSpec::Color));
    props.extend(each(
        &[
            "backgroundImage",
            "backgroundPosition",
            "backgroundSize",
            "backgroundClip",
            "backgroundAttachment",
        ],
        ValueSpec::AnyString,
    ));
    props.push(PropertySpec::new("backgroundRepeat", ValueSpec::Keywords(BACKGROUND_REPEAT)));
    props.push(
        PropertySpec::new(
            "opacity",
            ValueSpec::Number {
                min: Some(0.0),
                max: Some(1.0),
            },
        )
        .unitless(),
    );
    props.extend(each(
        &[
            "boxShadow",
            "filter",
            "backdropFilter",
            "transform",
            "transformOrigin",
            "mixBlendMode",
            "clipPath",
        ],
        ValueSpec::AnyString,
    ));
    props.push(PropertySpec::new("fill", PAINT));
    props.push(PropertySpec::new("stroke", PAINT));
    props.push(PropertySpec::new("strokeWidth", ValueSpec::Length).unitless());

    // ------------------------------------------------------------------
    // Transitions and animations
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("transitionProperty", ValueSpec::CommaList(ANIMATABLE)));
    props.extend(each(
        &["transitionDuration", "transitionDelay", "animationDuration", "animationDelay"],
        ValueSpec::Time,
    ));
    props.extend(each(
        &["transitionTimingFunction", "animationTimingFunction"],
        TIMING_FUNCTION,
    ));
    props.push(PropertySpec::new("animationName", ValueSpec::AnyString));
    props.push(PropertySpec::new("animationIterationCount", ITERATION_COUNT).unitless());
    props.extend(each(
        &[
            "animationFillMode",
            "animationDirection",
            "animationPlayState",
            "willChange",
        ],
        ValueSpec::AnyString,
    ));

    // ------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------
    props.push(PropertySpec::new("cursor", ValueSpec::Keywords(CURSOR)));
    props.push(PropertySpec::new("pointerEvents", ValueSpec::Keywords(POINTER_EVENTS)));
    props.push(PropertySpec::new("userSelect", ValueSpec::Keywords(USER_SELECT)));
    props.push(PropertySpec::new("resize", ValueSpec::Keywords(RESIZE)));
    props.extend(each(
        &["appearance", "WebkitAppearance", "MozAppearance"],
        ValueSpec::Keywords(APPEARANCE),
    ));
    props.extend(each(
        &["touchAction", "scrollBehavior", "overscrollBehavior", "contain", "isolation"],
        ValueSpec::AnyString,
    ));

    props
}
