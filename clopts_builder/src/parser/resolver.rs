use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::{fs, io};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::TypeCaster;
use crate::constant::*;
use crate::matcher::{NameResolutionError, OptionRegistry, OptionSpec, RegistrationError};
use crate::model::{OptionValue, Tiers};
use crate::parser::base::{BindingError, ClOptsError, ValidationError};
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::tokens::RawInput;

/// The resolved options.
/// Built via [`crate::CommandLineOptions::build`] or [`crate::CommandLineOptions::build_resolver`].
///
/// Each option has up to three values, one per tier:
/// * `options`: the declared default.
/// * `file_options`: loaded from configuration sources, see [`Resolver::load_config_files`].
/// * `command_options`: bound from the command line.
///
/// [`Resolver::get`] picks the highest tier available: command line, then file, then default.
pub struct Resolver {
    registry: OptionRegistry,
    caster: TypeCaster,
    input: RawInput,
    printer: Printer,
    user_interface: Rc<dyn UserInterface>,
    options: BTreeMap<String, OptionValue>,
    file_options: BTreeMap<String, OptionValue>,
    command_options: BTreeMap<String, OptionValue>,
    // The command line names in the order they were first bound.
    bound: Vec<String>,
    needs_help: bool,
    needs_version: bool,
    exit_requested: bool,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("options", &self.options)
            .field("file_options", &self.file_options)
            .field("command_options", &self.command_options)
            .finish()
    }
}

impl Resolver {
    pub(crate) fn initialize(
        registry: OptionRegistry,
        caster: TypeCaster,
        input: RawInput,
        printer: Printer,
        user_interface: Rc<dyn UserInterface>,
    ) -> Result<Self, ClOptsError> {
        let options = registry
            .specs()
            .map(|spec| (spec.name().to_string(), spec.value().clone()))
            .collect();
        let mut resolver = Self {
            registry,
            caster,
            input,
            printer,
            user_interface,
            options,
            file_options: BTreeMap::default(),
            command_options: BTreeMap::default(),
            bound: Vec::default(),
            needs_help: true,
            needs_version: true,
            exit_requested: false,
        };

        resolver.bind_entries()?;
        resolver.bind_flags()?;
        resolver.show_if_needed(Tiers::all())?;

        // An explicit help/version request skips the validation.
        if !resolver.exit_requested {
            resolver.check_required()?;
        }

        Ok(resolver)
    }

    fn bind_entries(&mut self) -> Result<(), ClOptsError> {
        let slots = self.registry.entry_slots();
        let entries = self.input.entries();

        if slots < entries.len() {
            return Err(BindingError::TooManyArguments(entries[slots..].to_vec()).into());
        }

        // The tokens fill the declared entries in ascending order, skipping the gaps.
        for ((_entry, name), token) in self.registry.entries().iter().zip(entries) {
            let spec = self.registry.get(name)?;
            let value = self.caster.cast(
                spec.type_tag().name(),
                std::slice::from_ref(token),
                spec.value(),
            )?;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Entry {_entry} bound '{token}' to '{name}'.");
            }

            if self.command_options.insert(name.clone(), value).is_none() {
                self.bound.push(name.clone());
            }
        }

        Ok(())
    }

    fn bind_flags(&mut self) -> Result<(), ClOptsError> {
        let mut unknown = Vec::default();

        for (token, values) in self.input.options() {
            // Unknown flags are reported together, after every flag has been seen.
            let spec = match self
                .registry
                .resolve_token(token)
                .and_then(|name| self.registry.get(name))
            {
                Ok(spec) => spec,
                Err(_) => {
                    unknown.push(token.clone());
                    continue;
                }
            };

            let value = self
                .caster
                .cast(spec.type_tag().name(), values, spec.value())?;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Flag '{token}' bound {values:?} to '{}'.", spec.name());
            }

            if self
                .command_options
                .insert(spec.name().to_string(), value)
                .is_none()
            {
                self.bound.push(spec.name().to_string());
            }
        }

        if !unknown.is_empty() {
            return Err(BindingError::UnknownOptions(unknown).into());
        }

        Ok(())
    }

    fn check_required(&self) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .registry
            .specs()
            .filter(|spec| spec.required() && !self.command_options.contains_key(spec.name()))
            .map(|spec| spec.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired(missing));
        }

        Ok(())
    }

    /// Show the help/version if switched on in the `tiers`, at most once each.
    fn show_if_needed(&mut self, tiers: Tiers) -> Result<(), NameResolutionError> {
        if self.needs_help && self.get(HELP_NAME, tiers)?.is_truthy() {
            self.needs_help = false;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Showing help ({tiers:?}).");
            }

            self.show_console_help();

            if self.requested(HELP_NAME) {
                self.exit_requested = true;
                return Ok(());
            }
        }

        if self.needs_version && self.get(VERSION_NAME, tiers)?.is_truthy() {
            self.needs_version = false;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Showing version ({tiers:?}).");
            }

            self.show_version();

            if self.requested(VERSION_NAME) {
                self.exit_requested = true;
            }
        }

        Ok(())
    }

    // Switched on explicitly from the command line.
    fn requested(&self, name: &str) -> bool {
        self.command_options
            .get(name)
            .is_some_and(OptionValue::is_truthy)
    }

    fn show_console_help(&self) {
        let mut names: Vec<String> = self
            .bound
            .iter()
            .filter(|name| name.as_str() != HELP_NAME)
            .cloned()
            .collect();

        // The values following any flag are searched for as keywords.
        for (_, keywords) in self.input.options() {
            if keywords.is_empty() {
                continue;
            }

            let hits = self.registry.search(keywords);
            if hits.is_empty() {
                self.user_interface.print_warning(format!(
                    "Options unknown. The searched keyword is '{}'",
                    keywords.join(" ")
                ));
            }

            for hit in hits {
                if !names.contains(&hit) {
                    names.push(hit);
                }
            }
        }

        self.show_usage();
        self.user_interface.print(String::default());

        if let Err(error) = self.show_options(&names) {
            self.user_interface.print_error(error.to_string());
        }
    }

    /// Get the value of the option `name`, consulting the `tiers` on top of its default.
    ///
    /// ### Example
    /// ```
    /// # use clopts_builder as clopts;
    /// use clopts::{CommandLineOptions, Declaration, OptionValue, RawInput, Tiers};
    ///
    /// let resolver = CommandLineOptions::new()
    ///     .add("port", Declaration::new(3000))
    ///     .build_resolver(RawInput::from_tokens(["server", "--port", "8080"]))
    ///     .unwrap();
    ///
    /// assert_eq!(resolver.get("port", true).unwrap(), &OptionValue::from(8080));
    /// assert_eq!(resolver.get("port", Tiers::defaults()).unwrap(), &OptionValue::from(3000));
    /// ```
    pub fn get(
        &self,
        name: &str,
        tiers: impl Into<Tiers>,
    ) -> Result<&OptionValue, NameResolutionError> {
        let spec = self.registry.get(name)?;
        Ok(self.tiered(spec, tiers.into()))
    }

    fn tiered<'a>(&'a self, spec: &'a OptionSpec, tiers: Tiers) -> &'a OptionValue {
        let mut value = spec.value();

        if tiers.file {
            if let Some(file_value) = self.file_options.get(spec.name()) {
                value = file_value;
            }
        }

        if tiers.command {
            if let Some(command_value) = self.command_options.get(spec.name()) {
                value = command_value;
            }
        }

        value
    }

    /// Get the value of every option (including `help` and `version`), see [`Resolver::get`].
    pub fn get_all(&self, tiers: impl Into<Tiers>) -> BTreeMap<String, OptionValue> {
        let tiers = tiers.into();
        self.registry
            .specs()
            .map(|spec| (spec.name().to_string(), self.tiered(spec, tiers).clone()))
            .collect()
    }

    /// Get the registered option `name`.
    pub fn get_options(&self, name: &str) -> Result<&OptionSpec, NameResolutionError> {
        self.registry.get(name)
    }

    /// The registered options.
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// See [`OptionRegistry::search`].
    pub fn search(&self, keywords: &[impl AsRef<str>]) -> Vec<String> {
        self.registry.search(keywords)
    }

    /// See [`OptionRegistry::resolve_token`].
    pub fn string_to_option_name(&self, token: &str) -> Result<&str, NameResolutionError> {
        self.registry.resolve_token(token)
    }

    /// The default tier.
    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    /// The file tier.
    pub fn file_options(&self) -> &BTreeMap<String, OptionValue> {
        &self.file_options
    }

    /// The command line tier.
    pub fn command_options(&self) -> &BTreeMap<String, OptionValue> {
        &self.command_options
    }

    /// Whether help or version was explicitly requested on the command line (and has been shown).
    /// The program is expected to exit successfully.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Load the JSON configuration `files` into the file tier, in order (later files overwrite earlier keys).
    ///
    /// Files which don't exist are skipped.
    /// Every key must name a declared option.
    /// Afterwards, the help/version are shown if switched on by the file tier (and not yet shown).
    pub fn load_config_files(
        &mut self,
        files: &[impl AsRef<Path>],
    ) -> Result<&mut Self, ClOptsError> {
        for file in files {
            let path = file.as_ref();
            let source_name = path.display().to_string();

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(error) if error.kind() == io::ErrorKind::NotFound => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping missing configuration '{source_name}'.");
                    }

                    continue;
                }
                Err(error) => {
                    return Err(RegistrationError::UnreadableSource { source_name, error }.into())
                }
            };

            let values = serde_json::from_str(&content).map_err(|error| {
                RegistrationError::MalformedSource {
                    source_name: source_name.clone(),
                    error,
                }
            })?;
            self.merge_file_options(&source_name, values)?;
        }

        self.show_if_needed(Tiers::file_only())?;
        Ok(self)
    }

    /// Load the configuration `values` into the file tier, see [`Resolver::load_config_files`].
    pub fn load_config_values(
        &mut self,
        source_name: &str,
        values: BTreeMap<String, OptionValue>,
    ) -> Result<&mut Self, ClOptsError> {
        self.merge_file_options(source_name, values)?;
        self.show_if_needed(Tiers::file_only())?;
        Ok(self)
    }

    fn merge_file_options(
        &mut self,
        source_name: &str,
        values: BTreeMap<String, OptionValue>,
    ) -> Result<(), RegistrationError> {
        if let Some(key) = values.keys().find(|key| self.registry.get(key).is_err()) {
            return Err(RegistrationError::InvalidSourceKey {
                source_name: source_name.to_string(),
                key: key.clone(),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Loaded {} option(s) from '{source_name}'.", values.len());
        }

        self.file_options.extend(values);
        Ok(())
    }

    /// Load the configuration `files`, see [`Resolver::load_config_files`].
    /// If an error is encountered, prints it and exits with error code `1` (via [`std::process::exit`]).
    /// If the help/version was explicitly requested, exits with code `0`.
    pub fn config_files(mut self, files: &[impl AsRef<Path>]) -> Self {
        let result = self.load_config_files(files).map(|_| ());

        if let Err(error) = result {
            self.user_interface.print_error(error.to_string());
            std::process::exit(1);
        }

        if self.exit_requested {
            std::process::exit(0);
        }

        self
    }

    /// Print the usage line.
    pub fn show_usage(&self) {
        self.printer
            .print_usage(&self.registry, &*self.user_interface);
    }

    /// Print the options listing for `names` (option names or command line tokens), or for every option when empty.
    pub fn show_options(&self, names: &[impl AsRef<str>]) -> Result<(), NameResolutionError> {
        self.printer
            .print_options(&self.registry, names, &*self.user_interface)
    }

    /// Print the version.
    pub fn show_version(&self) {
        self.printer.print_version(&*self.user_interface);
    }
}
