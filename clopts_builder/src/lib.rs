//! Builder module for `clopts`.
//! See [documentation root](https://docs.rs/clopts/latest/clopts/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;
mod tokens;

pub use api::*;
pub use matcher::*;
pub use model::*;
pub use parser::{
    BindingError, ClOptsError, ConsoleInterface, Resolver, UserInterface, ValidationError,
};
pub use tokens::RawInput;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
