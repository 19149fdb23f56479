//! `clopts` declares the options of a command line program once, and resolves each of them from three tiers:
//! * the declared *default* value,
//! * the values loaded from JSON *configuration files*,
//! * the values given on the *command line*.
//!
//! The command line takes precedence over the configuration files, which take precedence over the defaults.
//! Every lookup may choose which tiers to consult (see [`Tiers`]).
//!
//! The type of an option is inferred from its default value: `string`, `number`, `boolean`, `array` (of strings), or `object` (of string values).
//! Command line tokens are cast to that type; a `boolean` option given without a value toggles its default.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/sample_server.rs")]
//! ```
//!
//! ```console
//! $ sample_server -h
//! Usage:
//!   sample_server [root] <options>
//!
//! Options:
//!   --headers -he object  The extra response headers. (default: {cache: none})
//!   --help    -h  boolean Print this message. (default: false)
//!   --host    -ho string  The host to bind. (default: localhost)
//!   --port    -p  number  The port to listen on. (default: 3000)
//!   --root    -r  string  The directory to serve.
//!   --verbose -ve boolean Log every request. (default: false)
//!   --version -v  boolean Print the project version. (default: false)
//!
//! $ sample_server public --port 9000 --verbose
//! headers: { cache: max-age=60, server: sample }
//! help: false
//! host: localhost
//! port: 9000
//! root: public
//! verbose: true
//! version: false
//!
//! $ sample_server
//! 'root' must be declared from the command line.
//! ```
//!
//! # Declarations
//! Configure `clopts` by starting with a [`CommandLineOptions`] and `add`ing options.
//! Each option is given by a [`Declaration`], or simply by its description (a `boolean` switch defaulting to `false`):
//! * `value`: the default value, which decides the option type.
//! * `short`: the short alias (ex: `p` for `-p`).
//! When left unset, the shortest free prefix of the option name is assigned.
//! * `entry`: binds the option to a positional token (1-based), which also makes it required by default.
//! * `required`: whether the option must be given on the command line.
//! * `description`: shown in the options listing.
//!
//! The `help` (`-h`) and `version` (`-v`) switches are always declared.
//! When switched on from the command line they are shown, and [`CommandLineOptions::build`] exits successfully.
//! When switched on by a configuration file (or by their default) they are shown once, and the program continues.
//!
//! The values given to the other flags are searched for as keywords (see [`Resolver::search`]), narrowing the options listing:
//! ```console
//! $ sample_server --host listen -h
//! Usage:
//!   sample_server [root] <options>
//!
//! Options:
//!   --host -ho string The host to bind. (default: localhost)
//!   --port -p  number The port to listen on. (default: 3000)
//! ```
//!
//! # Configuration files
//! [`Resolver::config_files`] (or [`Resolver::load_config_files`]) loads flat JSON objects into the file tier.
//! Files which don't exist are skipped, and later files overwrite the keys of earlier ones.
//! Every key must name a declared option.
//!
//! # Errors
//! [`CommandLineOptions::build`] prints any error and exits with code `1`.
//! Use [`CommandLineOptions::build_resolver`] to handle the [`ClOptsError`] yourself.
//!
//! # Features
//! * `tracing_debug`: emits [`tracing`](https://docs.rs/tracing) debug events for the resolution steps.
pub use clopts_builder::*;
