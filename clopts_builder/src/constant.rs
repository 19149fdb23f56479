pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const HELP_MESSAGE: &str = "Print this message.";
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_SHORT: &str = "v";
pub(crate) const VERSION_MESSAGE: &str = "Print the project version.";
