//! Traits which, typically, may be imported without concern: `use clopts::prelude::*`.

// Needs to be imported in order to implement a custom output channel.
pub use crate::parser::UserInterface;
