use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::Declaration;
use crate::constant::*;
use crate::model::{OptionValue, Short, TypeTag};

/// A failure in the declared options, or in the keys of a configuration source.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Two options declare the same entry number.
    #[error("The entry number '{0}' has already been created.")]
    DuplicateEntry(usize),
    /// The option declares entry number `0`.
    #[error("The option '{0}' has entry number '0'; entries start from '1'.")]
    InvalidEntry(String),
    /// Several options declare the same short alias.
    #[error("Duplicate value '{}' for short option.", .0.join(", "))]
    DuplicateShort(Vec<String>),
    /// A short alias is the name of another option.
    #[error("Short option value '{}' duplicates option name.", .0.join(", "))]
    ShortCollidesWithName(Vec<String>),
    /// A configuration source holds a key which is not a declared option.
    #[error("The '{key}' option in the '{source_name}' file is an invalid option name.")]
    InvalidSourceKey {
        /// The configuration source.
        source_name: String,
        /// The undeclared key.
        key: String,
    },
    /// A configuration source exists, but cannot be read.
    #[error("Cannot read the '{source_name}' file: {error}")]
    UnreadableSource {
        /// The configuration source.
        source_name: String,
        /// The read failure.
        #[source]
        error: std::io::Error,
    },
    /// A configuration source is not a flat JSON object of option values.
    #[error("Cannot load the '{source_name}' file: {error}")]
    MalformedSource {
        /// The configuration source.
        source_name: String,
        /// The parse failure.
        #[source]
        error: serde_json::Error,
    },
}

/// A token or name which matches none of the declared options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameResolutionError {
    /// The command line token matches no option name or short alias.
    #[error("Unknown command options '{0}'.")]
    UnknownToken(String),
    /// The name is not a declared option.
    #[error("'{0}' is an invalid option name.")]
    InvalidName(String),
}

/// A registered option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    name: String,
    value: OptionValue,
    short: Short,
    required: bool,
    entry: Option<usize>,
    description: Option<String>,
}

impl OptionSpec {
    fn from_declaration(name: String, declaration: Declaration) -> Self {
        let Declaration {
            value,
            short,
            required,
            entry,
            description,
        } = declaration;

        Self {
            name,
            value: value.unwrap_or(OptionValue::Boolean(false)),
            short,
            // An entry implies required, unless stated otherwise.
            required: required.unwrap_or(entry.is_some()),
            entry,
            description,
        }
    }

    /// The option name (without the leading `--`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default value.
    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// The resolved short alias.
    pub fn short(&self) -> &Short {
        &self.short
    }

    /// Whether the option must be given on the command line.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The (1-based) positional token bound to the option.
    pub fn entry(&self) -> Option<usize> {
        self.entry
    }

    /// The description shown in the options listing.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The type tag inferred from the default value.
    pub fn type_tag(&self) -> TypeTag {
        self.value.type_tag()
    }
}

/// The validated set of declared options, ordered by name.
#[derive(Debug)]
pub struct OptionRegistry {
    specs: BTreeMap<String, OptionSpec>,
    // Entry number to option name; gaps are allowed.
    entries: BTreeMap<usize, String>,
}

impl OptionRegistry {
    /// Register the `declarations`, alongside the `help` and `version` switches (unless re-declared).
    pub fn new(
        declarations: impl IntoIterator<Item = (String, Declaration)>,
    ) -> Result<Self, RegistrationError> {
        let mut all = BTreeMap::from([
            (
                HELP_NAME.to_string(),
                Declaration::described(HELP_MESSAGE).short(HELP_SHORT),
            ),
            (
                VERSION_NAME.to_string(),
                Declaration::described(VERSION_MESSAGE).short(VERSION_SHORT),
            ),
        ]);
        all.extend(declarations);

        let mut specs = BTreeMap::default();
        let mut entries: BTreeMap<usize, String> = BTreeMap::default();

        for (name, declaration) in all {
            let spec = OptionSpec::from_declaration(name.clone(), declaration);

            if let Some(entry) = spec.entry {
                if entry == 0 {
                    return Err(RegistrationError::InvalidEntry(name));
                }

                if entries.insert(entry, name.clone()).is_some() {
                    return Err(RegistrationError::DuplicateEntry(entry));
                }
            }

            specs.insert(name, spec);
        }

        let mut registry = Self { specs, entries };
        registry.assign_shorts()?;
        Ok(registry)
    }

    fn assign_shorts(&mut self) -> Result<(), RegistrationError> {
        let mut used: HashSet<String> = HashSet::default();
        let mut duplicates: Vec<String> = Vec::default();
        let mut collisions: Vec<String> = Vec::default();

        for spec in self.specs.values() {
            if let Some(short) = spec.short.as_assigned() {
                if !used.insert(short.to_string()) && !duplicates.iter().any(|d| d == short) {
                    duplicates.push(short.to_string());
                }

                if short != spec.name
                    && self.specs.contains_key(short)
                    && !collisions.iter().any(|c| c == short)
                {
                    collisions.push(short.to_string());
                }
            }
        }

        if !duplicates.is_empty() {
            return Err(RegistrationError::DuplicateShort(duplicates));
        }

        if !collisions.is_empty() {
            return Err(RegistrationError::ShortCollidesWithName(collisions));
        }

        let names: HashSet<String> = self.specs.keys().cloned().collect();

        for spec in self.specs.values_mut() {
            if spec.short != Short::Unresolved {
                continue;
            }

            // Take the shortest free proper prefix of the name.
            let mut candidate = String::default();
            let mut short = Short::Absent;

            for c in spec.name.chars() {
                candidate.push(c);
                if candidate == spec.name {
                    break;
                }

                if !used.contains(&candidate) && !names.contains(&candidate) {
                    used.insert(candidate.clone());
                    short = Short::Assigned(candidate);
                    break;
                }
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Option '{}' resolved short alias {:?}.", spec.name, short);
            }

            spec.short = short;
        }

        Ok(())
    }

    /// Get the option registered as `name`.
    pub fn get(&self, name: &str) -> Result<&OptionSpec, NameResolutionError> {
        self.specs
            .get(name)
            .ok_or_else(|| NameResolutionError::InvalidName(name.to_string()))
    }

    /// Iterate the options, ordered by name.
    pub fn specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.values()
    }

    /// The option names by entry number, in ascending order.
    pub fn entries(&self) -> &BTreeMap<usize, String> {
        &self.entries
    }

    /// The number of entry slots, counting the gaps: the highest declared entry number.
    pub fn entry_slots(&self) -> usize {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    /// Resolve a command line token (`-s`, `--name`, or `name`) to its option name.
    ///
    /// ### Example
    /// ```
    /// # use clopts_builder as clopts;
    /// use clopts::{Declaration, OptionRegistry};
    ///
    /// let registry = OptionRegistry::new([("port".to_string(), Declaration::new(3000))]).unwrap();
    ///
    /// assert_eq!(registry.resolve_token("-p").unwrap(), "port");
    /// assert_eq!(registry.resolve_token("--port").unwrap(), "port");
    /// assert_eq!(registry.resolve_token("-h").unwrap(), "help");
    /// ```
    pub fn resolve_token(&self, token: &str) -> Result<&str, NameResolutionError> {
        let is_short = token.starts_with('-') && token.chars().nth(1).is_some_and(|c| c != '-');

        if is_short {
            let short = &token[1..];
            if let Some(spec) = self
                .specs
                .values()
                .find(|spec| spec.short.as_assigned() == Some(short))
            {
                return Ok(spec.name.as_str());
            }
        } else {
            let name = token.strip_prefix("--").unwrap_or(token);
            if let Some((name, _)) = self.specs.get_key_value(name) {
                return Ok(name.as_str());
            }
        }

        Err(NameResolutionError::UnknownToken(token.to_string()))
    }

    /// Find the options for which every keyword appears in the name, short alias, or description.
    pub fn search(&self, keywords: &[impl AsRef<str>]) -> Vec<String> {
        self.specs
            .values()
            .filter(|spec| {
                keywords.iter().all(|keyword| {
                    let keyword = keyword.as_ref();
                    spec.name.contains(keyword)
                        || spec
                            .short
                            .as_assigned()
                            .is_some_and(|short| short.contains(keyword))
                        || spec
                            .description
                            .as_ref()
                            .is_some_and(|description| description.contains(keyword))
                })
            })
            .map(|spec| spec.name.clone())
            .collect()
    }
}
