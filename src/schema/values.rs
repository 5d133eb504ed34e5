//! Value shapes accepted per property.
//!
//! String values are tokenized with `cssparser` so that `'10px'`, `'50%'`,
//! `'calc(100% - 4px)'` and `'0.3s, 200ms'` are checked structurally rather
//! than by pattern matching.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::eval::Value;

/// CSS-wide keywords accepted by every property.
const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

/// Keywords a length-valued property may take instead of a dimension.
const LENGTH_KEYWORDS: &[&str] = &[
    "auto",
    "none",
    "fit-content",
    "max-content",
    "min-content",
    "thin",
    "medium",
    "thick",
];

/// Functions that compute lengths, colors or anything else at runtime.
const MATH_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp", "var", "env"];

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb",
    "rgba",
    "hsl",
    "hsla",
    "hwb",
    "lab",
    "lch",
    "oklab",
    "oklch",
    "color",
    "color-mix",
    "light-dark",
    "var",
];

/// CSS named colors.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
    "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Special and system color keywords.
const SYSTEM_COLORS: &[&str] = &[
    "transparent", "currentcolor", "AccentColor", "AccentColorText", "ActiveText", "ButtonBorder",
    "ButtonFace", "ButtonText", "Canvas", "CanvasText", "Field", "FieldText", "GrayText",
    "Highlight", "HighlightText", "LinkText", "Mark", "MarkText", "SelectedItem",
    "SelectedItemText", "VisitedText",
];

const TIME_UNITS: &[&str] = &["s", "ms"];

/// Predicate describing the literal shapes a property accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSpec {
    /// Any static string or number.
    Any,
    /// Any static string.
    AnyString,
    /// One keyword from the list.
    Keywords(&'static [&'static str]),
    /// A single length, percentage, length keyword, or math function.
    /// Numbers of any sign are accepted and receive the property's unit.
    Length,
    /// One to four length components (`margin: '0 auto'`).
    LengthList,
    /// A number in an inclusive range.
    Number { min: Option<f64>, max: Option<f64> },
    /// A whole number.
    Integer,
    /// Comma-separated durations (`'0.3s'`, `'200ms, 1s'`) or a number of
    /// milliseconds.
    Time,
    /// A color keyword, hex color or color function.
    Color,
    /// Comma-separated list of keywords from the list.
    CommaList(&'static [&'static str]),
    /// A single call to one of the named functions.
    Functions(&'static [&'static str]),
    /// Accepted if any alternative accepts.
    OneOf(&'static [ValueSpec]),
}

impl ValueSpec {
    /// Check a statically evaluated value against this spec.
    pub fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Object(_) => false,
            Value::Num(n) => self.accepts_number(*n),
            Value::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return false;
                }
                if !matches!(self, ValueSpec::Any | ValueSpec::AnyString)
                    && in_list(CSS_WIDE_KEYWORDS, s)
                {
                    return true;
                }
                self.accepts_string(s)
            }
        }
    }

    fn accepts_number(&self, n: f64) -> bool {
        if !n.is_finite() {
            return false;
        }
        match self {
            ValueSpec::Any | ValueSpec::Length | ValueSpec::LengthList => true,
            ValueSpec::Number { min, max } => {
                min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
            }
            ValueSpec::Integer => n.fract() == 0.0,
            ValueSpec::Time => n >= 0.0,
            ValueSpec::OneOf(specs) => specs.iter().any(|spec| spec.accepts_number(n)),
            ValueSpec::AnyString
            | ValueSpec::Keywords(_)
            | ValueSpec::Color
            | ValueSpec::CommaList(_)
            | ValueSpec::Functions(_) => false,
        }
    }

    fn accepts_string(&self, s: &str) -> bool {
        match self {
            ValueSpec::Any | ValueSpec::AnyString => true,
            ValueSpec::Keywords(list) => in_list(list, s),
            ValueSpec::Length => parses(s, length_component),
            ValueSpec::LengthList => parses(s, |input| {
                let mut count = 0;
                while !input.is_exhausted() {
                    length_component(input)?;
                    count += 1;
                }
                if (1..=4).contains(&count) {
                    Ok(())
                } else {
                    Err(input.new_custom_error(()))
                }
            }),
            ValueSpec::Number { min, max } => {
                let (min, max) = (*min, *max);
                parses(s, |input| {
                    let value = input.expect_number()? as f64;
                    if min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max) {
                        Ok(())
                    } else {
                        Err(input.new_custom_error(()))
                    }
                })
            }
            ValueSpec::Integer => parses(s, |input| {
                input.expect_integer()?;
                Ok(())
            }),
            ValueSpec::Time => parses(s, |input| {
                input.parse_comma_separated(time_component)?;
                Ok(())
            }),
            ValueSpec::Color => parses(s, color_component),
            ValueSpec::CommaList(list) => parses(s, |input| {
                input.parse_comma_separated(|item| {
                    let ident = item.expect_ident()?.clone();
                    if in_list(list, &ident) {
                        Ok(())
                    } else {
                        Err(item.new_custom_error::<_, ()>(()))
                    }
                })?;
                Ok(())
            }),
            ValueSpec::Functions(names) => parses(s, |input| {
                let name = input.expect_function()?.clone();
                if !in_list(names, &name) {
                    return Err(input.new_custom_error(()));
                }
                skip_block(input)
            }),
            ValueSpec::OneOf(specs) => specs.iter().any(|spec| spec.accepts_string(s)),
        }
    }
}

fn in_list(list: &[&str], s: &str) -> bool {
    list.iter().any(|k| k.eq_ignore_ascii_case(s))
}

/// Run `parse` over the whole of `value`; trailing tokens are a failure.
fn parses<F>(value: &str, parse: F) -> bool
where
    F: for<'i, 't> FnOnce(&mut Parser<'i, 't>) -> Result<(), ParseError<'i, ()>>,
{
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse).is_ok()
}

fn skip_block<'i>(input: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    input.parse_nested_block(|nested| {
        while nested.next().is_ok() {}
        Ok(())
    })
}

fn length_component<'i>(input: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    let token = input.next()?.clone();
    match token {
        Token::Dimension { .. } | Token::Percentage { .. } => Ok(()),
        Token::Number { value, .. } if value == 0.0 => Ok(()),
        Token::Ident(ref ident) if in_list(LENGTH_KEYWORDS, ident) => Ok(()),
        Token::Function(ref name) if in_list(MATH_FUNCTIONS, name) => skip_block(input),
        _ => Err(input.new_custom_error(())),
    }
}

fn time_component<'i>(input: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    let token = input.next()?.clone();
    match token {
        Token::Dimension { value, ref unit, .. } if value >= 0.0 && in_list(TIME_UNITS, unit) => {
            Ok(())
        }
        Token::Number { value, .. } if value == 0.0 => Ok(()),
        Token::Function(ref name) if in_list(MATH_FUNCTIONS, name) => skip_block(input),
        _ => Err(input.new_custom_error(())),
    }
}

fn color_component<'i>(input: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    let token = input.next()?.clone();
    match token {
        Token::Ident(ref ident) if in_list(NAMED_COLORS, ident) || in_list(SYSTEM_COLORS, ident) => {
            Ok(())
        }
        Token::Hash(ref hex) | Token::IDHash(ref hex)
            if matches!(hex.len(), 3 | 4 | 6 | 8)
                && hex.chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            Ok(())
        }
        Token::Function(ref name) if in_list(COLOR_FUNCTIONS, name) => skip_block(input),
        _ => Err(input.new_custom_error(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_ALIGN: ValueSpec = ValueSpec::Keywords(&["left", "right", "center", "start", "end"]);

    #[test]
    fn test_keywords() {
        assert!(TEXT_ALIGN.accepts(&"left".into()));
        assert!(TEXT_ALIGN.accepts(&"inherit".into()));
        assert!(!TEXT_ALIGN.accepts(&"lfet".into()));
        assert!(!TEXT_ALIGN.accepts(&Value::Num(1.0)));
    }

    #[test]
    fn test_length() {
        let spec = ValueSpec::Length;
        for ok in ["10px", "50%", "0", "auto", "calc(100% - 4px)", "var(--gap)", "-2em"] {
            assert!(spec.accepts(&ok.into()), "{ok}");
        }
        for bad in ["ten", "10px 10px", "", "5"] {
            assert!(!spec.accepts(&bad.into()), "{bad}");
        }
        assert!(spec.accepts(&Value::Num(-5.0)));
    }

    #[test]
    fn test_length_list() {
        let spec = ValueSpec::LengthList;
        assert!(spec.accepts(&"0 auto".into()));
        assert!(spec.accepts(&"1px 2px 3px 4px".into()));
        assert!(!spec.accepts(&"1px 2px 3px 4px 5px".into()));
    }

    #[test]
    fn test_number_range() {
        let spec = ValueSpec::Number {
            min: Some(0.0),
            max: Some(1.0),
        };
        assert!(spec.accepts(&Value::Num(0.5)));
        assert!(spec.accepts(&"0.5".into()));
        assert!(!spec.accepts(&Value::Num(2.0)));
        assert!(!spec.accepts(&"-1".into()));
    }

    #[test]
    fn test_time() {
        assert!(ValueSpec::Time.accepts(&"0.3s".into()));
        assert!(ValueSpec::Time.accepts(&"200ms, 1s".into()));
        assert!(ValueSpec::Time.accepts(&Value::Num(300.0)));
        assert!(!ValueSpec::Time.accepts(&"fast".into()));
        assert!(!ValueSpec::Time.accepts(&"10px".into()));
    }

    #[test]
    fn test_color() {
        for ok in ["red", "#fff", "#00ff00", "rgba(0, 0, 0, 0.5)", "var(--labelColor)"] {
            assert!(ValueSpec::Color.accepts(&ok.into()), "{ok}");
        }
        assert!(ValueSpec::Color.accepts(&"currentColor".into()));
        assert!(ValueSpec::Color.accepts(&"RebeccaPurple".into()));
        assert!(ValueSpec::Color.accepts(&"CanvasText".into()));
        assert!(!ValueSpec::Color.accepts(&"lfet".into()));
        assert!(!ValueSpec::Color.accepts(&"#ggg".into()));
        assert!(!ValueSpec::Color.accepts(&"red blue".into()));
        assert!(!ValueSpec::Color.accepts(&Value::Num(0.0)));
    }

    #[test]
    fn test_comma_list() {
        let spec = ValueSpec::CommaList(&["opacity", "transform"]);
        assert!(spec.accepts(&"opacity, transform".into()));
        assert!(spec.accepts(&"opacity".into()));
        assert!(!spec.accepts(&"all".into()));
        assert!(!spec.accepts(&"height".into()));
    }

    #[test]
    fn test_functions() {
        let spec = ValueSpec::OneOf(&[
            ValueSpec::Keywords(&["ease", "linear"]),
            ValueSpec::Functions(&["cubic-bezier", "steps"]),
        ]);
        assert!(spec.accepts(&"ease".into()));
        assert!(spec.accepts(&"cubic-bezier(0.4, 0, 0.2, 1)".into()));
        assert!(!spec.accepts(&"bounce(1)".into()));
    }

    #[test]
    fn test_objects_never_accepted() {
        assert!(!ValueSpec::Any.accepts(&Value::Object(Default::default())));
    }
}
