mod base;
mod interface;
mod printer;
mod resolver;

pub use base::*;
pub use interface::{ConsoleInterface, UserInterface};
pub(crate) use printer::Printer;
pub use resolver::*;

#[cfg(test)]
pub(crate) use interface::util;
