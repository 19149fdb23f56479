use crate::model::{OptionValue, Short};

/// The (partial) declaration of an option, as given to [`crate::CommandLineOptions::add`].
///
/// Any field left unset takes its default when the option is registered:
/// * `value` defaults to `false` (a boolean switch).
/// * `short` is derived from the option name.
/// * `required` defaults to `false`, unless an `entry` is set.
///
/// ### Example
/// ```
/// # use clopts_builder as clopts;
/// use clopts::Declaration;
///
/// let port = Declaration::new(3000)
///     .short("p")
///     .description("The port to listen on.");
/// let verbose = Declaration::from("Print more output.");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declaration {
    pub(crate) value: Option<OptionValue>,
    pub(crate) short: Short,
    pub(crate) required: Option<bool>,
    pub(crate) entry: Option<usize>,
    pub(crate) description: Option<String>,
}

impl Declaration {
    /// Declare an option with a default value.
    /// The variant of the value decides how the option is cast from the command line.
    pub fn new(value: impl Into<OptionValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Declare a boolean switch (default `false`) with a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self::default().description(description)
    }

    /// Set the default value.
    pub fn value(mut self, value: impl Into<OptionValue>) -> Self {
        self.value.replace(value.into());
        self
    }

    /// Set the short alias (without the leading `-`).
    /// An empty alias is the same as [`Declaration::no_short`].
    pub fn short(mut self, short: impl Into<String>) -> Self {
        let short = short.into();
        self.short = if short.is_empty() {
            Short::Absent
        } else {
            Short::Assigned(short)
        };
        self
    }

    /// Declare that the option has no short alias.
    pub fn no_short(mut self) -> Self {
        self.short = Short::Absent;
        self
    }

    /// Set whether the option must be specified on the command line.
    pub fn required(mut self, required: bool) -> Self {
        self.required.replace(required);
        self
    }

    /// Bind the option to the `entry`-th (1-based) positional token.
    /// Unless explicitly set otherwise, this also makes the option required.
    pub fn entry(mut self, entry: usize) -> Self {
        self.entry.replace(entry);
        self
    }

    /// Set the description shown in the options listing.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }
}

impl From<&str> for Declaration {
    fn from(description: &str) -> Self {
        Self::described(description)
    }
}

impl From<String> for Declaration {
    fn from(description: String) -> Self {
        Self::described(description)
    }
}
