use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::model::{OptionValue, TypeTag};

/// The failure to turn raw tokens into an [`OptionValue`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CastError {
    /// No cast function is registered under the type name.
    #[error("Type '{0}' is undefined.")]
    UndefinedType(String),
    /// Several tokens were given to a single-token type.
    #[error("Multiple arguments '[{}]' were specified.", .0.join(", "))]
    MultipleArguments(Vec<String>),
    /// No token was given to a type which requires one.
    #[error("Nothing is assigned to the argument to convert.")]
    NothingAssigned,
    /// The token is not a valid value of the type.
    #[error("Cannot cast '{token}' to {type_name} type.")]
    InvalidConversion {
        /// The offending token.
        token: String,
        /// The name of the target type.
        type_name: &'static str,
    },
}

/// The tokens handed to a cast function, already checked against its [`Cardinality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arguments<'t> {
    /// No token (only for types accepting none).
    Empty,
    /// Precisely one token.
    Single(&'t str),
    /// Every token, for types that accept multiple (even when only one was given).
    Multiple(&'t [String]),
}

/// How many tokens a registered type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Accepts zero tokens.
    pub empty: bool,
    /// Accepts more than one token.
    pub multiple: bool,
}

impl Cardinality {
    /// Precisely one token.
    pub const SINGLE: Cardinality = Cardinality {
        empty: false,
        multiple: false,
    };
    /// Zero or one token.
    pub const TOGGLE: Cardinality = Cardinality {
        empty: true,
        multiple: false,
    };
    /// At least one token.
    pub const MANY: Cardinality = Cardinality {
        empty: false,
        multiple: true,
    };
}

/// A cast function: the tokens plus the option's default value (used by toggles).
pub type CastFn = fn(Arguments<'_>, &OptionValue) -> Result<OptionValue, CastError>;

struct CastRule {
    func: CastFn,
    cardinality: Cardinality,
}

/// Registry of type names to cast functions.
///
/// ### Example
/// ```
/// # use clopts_builder as clopts;
/// use clopts::{OptionValue, TypeCaster};
///
/// let caster = TypeCaster::standard();
/// let tokens = vec!["42".to_string()];
/// let value = caster.cast("number", &tokens, &OptionValue::from(0)).unwrap();
///
/// assert_eq!(value, OptionValue::from(42));
/// ```
#[derive(Default)]
pub struct TypeCaster {
    rules: HashMap<String, CastRule>,
}

impl std::fmt::Debug for TypeCaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();
        f.debug_struct("TypeCaster").field("types", &names).finish()
    }
}

impl TypeCaster {
    /// Create a caster with no registered types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a caster with the five option types registered under their [`TypeTag::name`].
    pub fn standard() -> Self {
        let mut caster = Self::new();
        caster
            .add(TypeTag::String.name(), cast_string, Cardinality::SINGLE)
            .add(TypeTag::Number.name(), cast_number, Cardinality::SINGLE)
            .add(TypeTag::Boolean.name(), cast_boolean, Cardinality::TOGGLE)
            .add(TypeTag::Array.name(), cast_array, Cardinality::MANY)
            .add(TypeTag::Object.name(), cast_object, Cardinality::MANY);
        caster
    }

    /// Register (or replace) the cast function for a type name.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        func: CastFn,
        cardinality: Cardinality,
    ) -> &mut Self {
        self.rules
            .insert(name.into(), CastRule { func, cardinality });
        self
    }

    /// Cast the `tokens` by the type registered under `name`.
    pub fn cast(
        &self,
        name: &str,
        tokens: &[String],
        default_value: &OptionValue,
    ) -> Result<OptionValue, CastError> {
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| CastError::UndefinedType(name.to_string()))?;

        let arguments = match tokens {
            [] if rule.cardinality.empty => Arguments::Empty,
            [] => return Err(CastError::NothingAssigned),
            _ if rule.cardinality.multiple => Arguments::Multiple(tokens),
            [token] => Arguments::Single(token),
            _ => return Err(CastError::MultipleArguments(tokens.to_vec())),
        };

        (rule.func)(arguments, default_value)
    }
}

fn single<'t>(arguments: Arguments<'t>) -> Result<&'t str, CastError> {
    match arguments {
        Arguments::Single(token) => Ok(token),
        Arguments::Empty => Err(CastError::NothingAssigned),
        Arguments::Multiple(tokens) => Err(CastError::MultipleArguments(tokens.to_vec())),
    }
}

fn multiple<'t>(arguments: Arguments<'t>) -> Vec<&'t str> {
    match arguments {
        Arguments::Multiple(tokens) => tokens.iter().map(String::as_str).collect(),
        Arguments::Single(token) => vec![token],
        Arguments::Empty => Vec::default(),
    }
}

fn cast_string(arguments: Arguments<'_>, _: &OptionValue) -> Result<OptionValue, CastError> {
    Ok(OptionValue::String(single(arguments)?.to_string()))
}

fn cast_number(arguments: Arguments<'_>, _: &OptionValue) -> Result<OptionValue, CastError> {
    let token = single(arguments)?;
    parse_number(token)
        .map(OptionValue::Number)
        .ok_or_else(|| CastError::InvalidConversion {
            token: token.to_string(),
            type_name: "number",
        })
}

fn cast_boolean(
    arguments: Arguments<'_>,
    default_value: &OptionValue,
) -> Result<OptionValue, CastError> {
    if arguments == Arguments::Empty {
        // Toggle away from the default.
        return Ok(OptionValue::Boolean(!default_value.is_truthy()));
    }

    let token = single(arguments)?;
    if token.eq_ignore_ascii_case("true") {
        Ok(OptionValue::Boolean(true))
    } else if token.eq_ignore_ascii_case("false") {
        Ok(OptionValue::Boolean(false))
    } else {
        Err(CastError::InvalidConversion {
            token: token.to_string(),
            type_name: "boolean",
        })
    }
}

fn cast_array(arguments: Arguments<'_>, _: &OptionValue) -> Result<OptionValue, CastError> {
    Ok(OptionValue::Array(
        multiple(arguments)
            .into_iter()
            .map(str::to_string)
            .collect(),
    ))
}

fn cast_object(arguments: Arguments<'_>, _: &OptionValue) -> Result<OptionValue, CastError> {
    let mut object = BTreeMap::default();

    for token in multiple(arguments) {
        let (key, value) = token.split_once(':').unwrap_or((token, ""));
        if key.is_empty() {
            return Err(CastError::InvalidConversion {
                token: token.to_string(),
                type_name: "object",
            });
        }

        object.insert(key.to_string(), value.to_string());
    }

    Ok(OptionValue::Object(object))
}

/// Parse a numeric token leniently: surrounding whitespace, `0x`/`0o`/`0b` prefixes and `Infinity` are accepted.
/// A blank token is zero.
fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // Reject the `inf`/`nan` spellings f64::from_str would otherwise let through.
        _ if trimmed
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            None
        }
        _ => trimmed.parse::<f64>().ok(),
    }
}

// Digits beyond `u64` keep accumulating (with rounding), rather than overflowing.
fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0, |total: f64, c| {
        c.to_digit(radix)
            .map(|digit| total * f64::from(radix) + f64::from(digit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    fn boolean_toggle(#[case] default_value: bool, #[case] expected: bool) {
        let caster = TypeCaster::standard();
        let value = caster
            .cast("boolean", &[], &OptionValue::from(default_value))
            .unwrap();
        assert_eq!(value, OptionValue::from(expected));
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("False", false)]
    #[case("false", false)]
    fn boolean_literal(#[case] token: &str, #[case] expected: bool) {
        let caster = TypeCaster::standard();
        let value = caster
            .cast("boolean", &tokens(&[token]), &OptionValue::from(true))
            .unwrap();
        assert_eq!(value, OptionValue::from(expected));
    }

    #[test]
    fn boolean_invalid() {
        let caster = TypeCaster::standard();
        let error = caster
            .cast("boolean", &tokens(&["yes"]), &OptionValue::from(false))
            .unwrap_err();
        assert_eq!(
            error,
            CastError::InvalidConversion {
                token: "yes".to_string(),
                type_name: "boolean",
            }
        );
        assert_eq!(error.to_string(), "Cannot cast 'yes' to boolean type.");
    }

    #[rstest]
    #[case("42", 42.0)]
    #[case(" 42 ", 42.0)]
    #[case("-1.5", -1.5)]
    #[case("1e3", 1000.0)]
    #[case("0x10", 16.0)]
    #[case("0o777", 511.0)]
    #[case("0x10000000000000000", 18446744073709551616.0)]
    #[case("0b101", 5.0)]
    #[case("", 0.0)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    fn number(#[case] token: &str, #[case] expected: f64) {
        let caster = TypeCaster::standard();
        let value = caster
            .cast("number", &tokens(&[token]), &OptionValue::from(0))
            .unwrap();
        assert_eq!(value, OptionValue::from(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    #[case("12px")]
    #[case("0xzz")]
    #[case("0x")]
    #[case("0b102")]
    fn number_invalid(#[case] token: &str) {
        let caster = TypeCaster::standard();
        assert_matches!(
            caster.cast("number", &tokens(&[token]), &OptionValue::from(0)),
            Err(CastError::InvalidConversion { type_name: "number", .. })
        );
    }

    #[test]
    fn string_identity() {
        let caster = TypeCaster::standard();
        let value = caster
            .cast("string", &tokens(&["a:b c"]), &OptionValue::from(""))
            .unwrap();
        assert_eq!(value, OptionValue::from("a:b c"));
    }

    #[rstest]
    #[case(vec!["x"])]
    #[case(vec!["x", "y", "z"])]
    fn array_identity(#[case] values: Vec<&str>) {
        let caster = TypeCaster::standard();
        let value = caster
            .cast("string[]", &tokens(&values), &OptionValue::from(vec!["d"]))
            .unwrap();
        assert_eq!(value, OptionValue::from(values));
    }

    #[test]
    fn object() {
        let caster = TypeCaster::standard();
        let value = caster
            .cast(
                "object",
                &tokens(&["a:1", "b:x:y", "c", "a:2"]),
                &OptionValue::Object(BTreeMap::default()),
            )
            .unwrap();
        assert_eq!(value, OptionValue::from([("a", "2"), ("b", "x:y"), ("c", "")]));
    }

    #[test]
    fn object_single() {
        let caster = TypeCaster::standard();
        let value = caster
            .cast(
                "object",
                &tokens(&["a:1"]),
                &OptionValue::Object(BTreeMap::default()),
            )
            .unwrap();
        assert_eq!(value, OptionValue::from([("a", "1")]));
    }

    #[test]
    fn object_empty_key() {
        let caster = TypeCaster::standard();
        let error = caster
            .cast(
                "object",
                &tokens(&["a:1", ":1"]),
                &OptionValue::Object(BTreeMap::default()),
            )
            .unwrap_err();
        assert_eq!(error.to_string(), "Cannot cast ':1' to object type.");
    }

    #[rstest]
    #[case("string")]
    #[case("number")]
    #[case("boolean")]
    fn multiple_arguments(#[case] name: &str) {
        let caster = TypeCaster::standard();
        let error = caster
            .cast(name, &tokens(&["1", "2"]), &OptionValue::from(false))
            .unwrap_err();
        assert_eq!(error, CastError::MultipleArguments(tokens(&["1", "2"])));
        assert_eq!(error.to_string(), "Multiple arguments '[1, 2]' were specified.");
    }

    #[rstest]
    #[case("string")]
    #[case("number")]
    #[case("string[]")]
    #[case("object")]
    fn nothing_assigned(#[case] name: &str) {
        let caster = TypeCaster::standard();
        assert_eq!(
            caster.cast(name, &[], &OptionValue::from("")),
            Err(CastError::NothingAssigned)
        );
    }

    #[test]
    fn undefined_type() {
        let caster = TypeCaster::new();
        assert_eq!(
            caster.cast("string", &tokens(&["x"]), &OptionValue::from("")),
            Err(CastError::UndefinedType("string".to_string()))
        );
    }

    #[test]
    fn custom_type() {
        fn upper(arguments: Arguments<'_>, _: &OptionValue) -> Result<OptionValue, CastError> {
            match arguments {
                Arguments::Single(token) => Ok(OptionValue::from(token.to_uppercase())),
                _ => Err(CastError::NothingAssigned),
            }
        }

        let mut caster = TypeCaster::standard();
        caster.add("upper", upper, Cardinality::SINGLE);
        let value = caster
            .cast("upper", &tokens(&["abc"]), &OptionValue::from(""))
            .unwrap();
        assert_eq!(value, OptionValue::from("ABC"));
    }
}
