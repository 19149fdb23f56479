use std::rc::Rc;

use crate::api::{Declaration, TypeCaster};
use crate::matcher::OptionRegistry;
use crate::parser::{ClOptsError, ConsoleInterface, Printer, Resolver, UserInterface};
use crate::tokens::RawInput;

/// The command line options builder.
///
/// ### Example
/// ```
/// # use clopts_builder as clopts;
/// use clopts::{CommandLineOptions, Declaration, RawInput};
///
/// let resolver = CommandLineOptions::new()
///     .add("port", Declaration::new(3000).description("The port."))
///     .add("verbose", "Print more output.")
///     .build_resolver(RawInput::from_tokens(["server", "-p", "8080", "--verbose"]))
///     .unwrap();
///
/// assert_eq!(resolver.get("port", true).unwrap().as_number(), Some(8080.0));
/// assert_eq!(resolver.get("verbose", true).unwrap().as_bool(), Some(true));
/// ```
pub struct CommandLineOptions {
    declarations: Vec<(String, Declaration)>,
    command: Option<String>,
    show_type: bool,
    show_default: bool,
    version: Option<String>,
    user_interface: Rc<dyn UserInterface>,
    width: Option<usize>,
}

impl Default for CommandLineOptions {
    fn default() -> Self {
        Self {
            declarations: Vec::default(),
            command: None,
            show_type: true,
            show_default: true,
            version: None,
            user_interface: Rc::new(ConsoleInterface::default()),
            width: None,
        }
    }
}

impl CommandLineOptions {
    /// Create an options builder, which already declares the `help` and `version` switches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the option `name`.
    /// If repeated, only the final declaration will apply.
    ///
    /// The `help` and `version` switches may be re-declared as well (ex: to change their description).
    ///
    /// ### Example
    /// ```
    /// # use clopts_builder as clopts;
    /// use clopts::{CommandLineOptions, Declaration, RawInput};
    ///
    /// let resolver = CommandLineOptions::new()
    ///     .add("source", Declaration::new("").entry(1))
    ///     .add("tags", Declaration::new(vec!["default"]))
    ///     .build_resolver(RawInput::from_tokens(["copy", "a.txt", "--tags", "x", "y"]))
    ///     .unwrap();
    ///
    /// assert_eq!(resolver.get("source", true).unwrap().as_str(), Some("a.txt"));
    /// assert_eq!(resolver.get("tags", true).unwrap().as_array().unwrap().len(), 2);
    /// ```
    pub fn add(mut self, name: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        let name = name.into();
        self.declarations.retain(|(existing, _)| existing != &name);
        self.declarations.push((name, declaration.into()));
        self
    }

    /// The program name, as shown in the usage.
    /// Defaults to the file stem of the invoked program.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command.replace(command.into());
        self
    }

    /// Whether to show the type column in the options listing (default `true`).
    pub fn show_type(mut self, show_type: bool) -> Self {
        self.show_type = show_type;
        self
    }

    /// Whether to show the default values of the non-required options (default `true`).
    pub fn show_default(mut self, show_default: bool) -> Self {
        self.show_default = show_default;
        self
    }

    /// The version string of the program (ex: `env!("CARGO_PKG_VERSION")`).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version.replace(version.into());
        self
    }

    /// The output channel for help, version, warning and error messages.
    pub fn interface(mut self, user_interface: Rc<dyn UserInterface>) -> Self {
        self.user_interface = user_interface;
        self
    }

    /// Wrap the options listing at `width` characters, rather than at the terminal width.
    pub fn width(mut self, width: usize) -> Self {
        self.width.replace(width);
        self
    }

    /// Build the resolver as a Result.
    /// This registers the declarations, binds the `input` and validates the required options.
    ///
    /// When help or version was explicitly requested, it is shown and [`Resolver::exit_requested`] is set
    /// (in which case the required options have not been validated).
    pub fn build_resolver(self, input: RawInput) -> Result<Resolver, ClOptsError> {
        let registry = OptionRegistry::new(self.declarations)?;
        let command = self.command.unwrap_or_else(|| input.command_name());
        let printer = match self.width {
            Some(width) => Printer::new(
                command,
                self.show_type,
                self.show_default,
                self.version,
                Some(width),
            ),
            None => Printer::terminal(command, self.show_type, self.show_default, self.version),
        };

        Resolver::initialize(
            registry,
            TypeCaster::standard(),
            input,
            printer,
            self.user_interface,
        )
    }

    /// Build the resolver from the process arguments.
    /// If an error is encountered, prints it and exits with error code `1` (via [`std::process::exit`]).
    /// If the help/version was explicitly requested, exits with code `0` after showing it.
    pub fn build(self) -> Resolver {
        let user_interface = self.user_interface.clone();

        match self.build_resolver(RawInput::from_env()) {
            Ok(resolver) if resolver.exit_requested() => std::process::exit(0),
            Ok(resolver) => resolver,
            Err(error) => {
                user_interface.print_error(error.to_string());
                std::process::exit(1);
            }
        }
    }
}
