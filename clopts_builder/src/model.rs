use serde::Deserialize;
use std::collections::BTreeMap;

/// The value of an option, at any tier (default, file, or command line).
///
/// The variant of an option's *default* value decides how command line tokens are cast for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A plain string, taken verbatim.
    String(String),
    /// A number (always stored as `f64`).
    Number(f64),
    /// A boolean, which acts as a toggle when specified without a value.
    Boolean(bool),
    /// A list of strings, taking every value token that follows the option.
    Array(Vec<String>),
    /// A flat `key: value` mapping, taking `key:value` tokens.
    Object(BTreeMap<String, String>),
}

/// The type tag inferred from an [`OptionValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// See [`OptionValue::String`].
    String,
    /// See [`OptionValue::Number`].
    Number,
    /// See [`OptionValue::Boolean`].
    Boolean,
    /// See [`OptionValue::Array`].
    Array,
    /// See [`OptionValue::Object`].
    Object,
}

impl TypeTag {
    /// The name under which the tag's cast rule is registered in a [`crate::TypeCaster`].
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "string[]",
            TypeTag::Object => "object",
        }
    }

    /// The label shown in the options listing.
    pub fn label(&self) -> &'static str {
        match self {
            TypeTag::Array => "array",
            _ => self.name(),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl OptionValue {
    /// The type tag of the variant.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            OptionValue::String(_) => TypeTag::String,
            OptionValue::Number(_) => TypeTag::Number,
            OptionValue::Boolean(_) => TypeTag::Boolean,
            OptionValue::Array(_) => TypeTag::Array,
            OptionValue::Object(_) => TypeTag::Object,
        }
    }

    /// Whether the value counts as "set": a non-empty string, a non-zero number, `true`, or any array/object.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::String(value) => !value.is_empty(),
            OptionValue::Number(value) => *value != 0.0 && !value.is_nan(),
            OptionValue::Boolean(value) => *value,
            OptionValue::Array(_) | OptionValue::Object(_) => true,
        }
    }

    /// The string, if this is a [`OptionValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// The number, if this is a [`OptionValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean, if this is a [`OptionValue::Boolean`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The strings, if this is a [`OptionValue::Array`].
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            OptionValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// The mapping, if this is a [`OptionValue::Object`].
    pub fn as_object(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            OptionValue::Object(values) => Some(values),
            _ => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        // Exponent notation, with an explicit sign on positive exponents (ex: `1e+21`, `1.5e-7`).
        let scientific = format!("{value:e}");
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        }
    } else {
        // f64's Display already drops the trailing `.0` of integral values.
        format!("{value}")
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::String(value) => write!(f, "{value}"),
            OptionValue::Number(value) => write!(f, "{}", format_number(*value)),
            OptionValue::Boolean(value) => write!(f, "{value}"),
            OptionValue::Array(values) => write!(f, "[{}]", values.join(", ")),
            OptionValue::Object(values) => {
                let items: Vec<String> = values
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();

                if items.len() > 1 {
                    write!(f, "{{ {} }}", items.join(", "))
                } else {
                    write!(f, "{{{}}}", items.join(", "))
                }
            }
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<u16> for OptionValue {
    fn from(value: u16) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        OptionValue::Array(values)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        OptionValue::Array(values.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for OptionValue {
    fn from(values: BTreeMap<String, String>) -> Self {
        OptionValue::Object(values)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for OptionValue {
    fn from(values: [(&str, &str); N]) -> Self {
        OptionValue::Object(
            values
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }
}

/// Which tiers a lookup consults, on top of the default value.
/// The command line tier always takes precedence over the file tier.
///
/// A `bool` converts to consulting both tiers (`true`) or neither (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiers {
    /// Consult the values loaded from configuration sources.
    pub file: bool,
    /// Consult the values bound from the command line.
    pub command: bool,
}

impl Tiers {
    /// Both tiers (the default).
    pub const fn all() -> Self {
        Self {
            file: true,
            command: true,
        }
    }

    /// Neither tier: only the default values.
    pub const fn defaults() -> Self {
        Self {
            file: false,
            command: false,
        }
    }

    /// The file tier only.
    pub const fn file_only() -> Self {
        Self {
            file: true,
            command: false,
        }
    }

    /// The command line tier only.
    pub const fn command_only() -> Self {
        Self {
            file: false,
            command: true,
        }
    }
}

impl Default for Tiers {
    fn default() -> Self {
        Self::all()
    }
}

impl From<bool> for Tiers {
    fn from(value: bool) -> Self {
        Self {
            file: value,
            command: value,
        }
    }
}

/// The short alias of an option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Short {
    /// Not yet decided; the registry will derive one from the option name.
    #[default]
    Unresolved,
    /// Explicitly without a short alias.
    Absent,
    /// The short alias, without its leading `-`.
    Assigned(String),
}

impl Short {
    /// The alias, if assigned.
    pub fn as_assigned(&self) -> Option<&str> {
        match self {
            Short::Assigned(short) => Some(short),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OptionValue::from("text"), TypeTag::String, "string", "string")]
    #[case(OptionValue::from(3000), TypeTag::Number, "number", "number")]
    #[case(OptionValue::from(false), TypeTag::Boolean, "boolean", "boolean")]
    #[case(OptionValue::from(vec!["a"]), TypeTag::Array, "string[]", "array")]
    #[case(OptionValue::from([("a", "1")]), TypeTag::Object, "object", "object")]
    fn type_tag(
        #[case] value: OptionValue,
        #[case] expected: TypeTag,
        #[case] name: &str,
        #[case] label: &str,
    ) {
        assert_eq!(value.type_tag(), expected);
        assert_eq!(expected.name(), name);
        assert_eq!(expected.label(), label);
    }

    #[rstest]
    #[case(OptionValue::from(""), false)]
    #[case(OptionValue::from("x"), true)]
    #[case(OptionValue::from(0), false)]
    #[case(OptionValue::from(f64::NAN), false)]
    #[case(OptionValue::from(-1), true)]
    #[case(OptionValue::from(false), false)]
    #[case(OptionValue::from(true), true)]
    #[case(OptionValue::Array(Vec::default()), true)]
    #[case(OptionValue::Object(BTreeMap::default()), true)]
    fn truthy(#[case] value: OptionValue, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case(OptionValue::from("text"), "text")]
    #[case(OptionValue::from(3000), "3000")]
    #[case(OptionValue::from(0.5), "0.5")]
    #[case(OptionValue::from(f64::INFINITY), "Infinity")]
    #[case(OptionValue::from(-0.0), "0")]
    #[case(OptionValue::from(1e21), "1e+21")]
    #[case(OptionValue::from(-2.5e30), "-2.5e+30")]
    #[case(OptionValue::from(1e-7), "1e-7")]
    #[case(OptionValue::from(0.000001), "0.000001")]
    #[case(OptionValue::from(123456789012345680000.0), "123456789012345680000")]
    #[case(OptionValue::from(true), "true")]
    #[case(OptionValue::from(vec!["a", "b"]), "[a, b]")]
    #[case(OptionValue::Array(Vec::default()), "[]")]
    #[case(OptionValue::from([("a", "1")]), "{a: 1}")]
    #[case(OptionValue::from([("a", "1"), ("b", "x:y")]), "{ a: 1, b: x:y }")]
    #[case(OptionValue::Object(BTreeMap::default()), "{}")]
    fn display(#[case] value: OptionValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn deserialize() {
        let values: BTreeMap<String, OptionValue> = serde_json::from_str(
            r#"{"s": "x", "n": 9090, "b": true, "a": ["x", "y"], "o": {"k": "v"}}"#,
        )
        .unwrap();

        assert_eq!(values["s"], OptionValue::from("x"));
        assert_eq!(values["n"], OptionValue::from(9090));
        assert_eq!(values["b"], OptionValue::from(true));
        assert_eq!(values["a"], OptionValue::from(vec!["x", "y"]));
        assert_eq!(values["o"], OptionValue::from([("k", "v")]));
    }

    #[test]
    fn deserialize_null() {
        let result: Result<BTreeMap<String, OptionValue>, _> =
            serde_json::from_str(r#"{"n": null}"#);
        assert!(result.is_err());
    }
}
