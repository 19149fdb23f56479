use thiserror::Error;

use crate::api::CastError;
use crate::matcher::{NameResolutionError, RegistrationError};

/// A failure to bind the command line tokens to the declared options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// More positional tokens were given than there are entry slots; holds the surplus tokens.
    #[error("The '{}' arguments exceed the declared entries; too many arguments.", .0.join(", "))]
    TooManyArguments(Vec<String>),
    /// Flag tokens which resolve to no option.
    #[error("'{}' is an invalid option name.", .0.join(", "))]
    UnknownOptions(Vec<String>),
}

/// A failure of the bound options to satisfy their declarations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required options missing from the command line.
    #[error("'{}' must be declared from the command line.", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Any failure while resolving the options.
#[derive(Debug, Error)]
pub enum ClOptsError {
    /// See [`RegistrationError`].
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    /// See [`CastError`].
    #[error(transparent)]
    Cast(#[from] CastError),
    /// See [`BindingError`].
    #[error(transparent)]
    Binding(#[from] BindingError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// See [`NameResolutionError`].
    #[error(transparent)]
    NameResolution(#[from] NameResolutionError),
}
