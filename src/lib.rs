//! Flag defaults for clap applications, read from HCL-style configuration
//! documents.
//!
//! claphcl maps a CLI's flag namespace (flags nested under subcommands, help
//! headings and literal prefixes) onto paths in a hierarchical configuration
//! document, validates that every key in the document belongs to some flag,
//! and hands the resolved values to clap as default values.
//!
//! ```ignore
//! let resolver = HclConfig::builder()
//!     .file("~/.myapp.hcl")
//!     .load()?;
//! let matches = resolver.apply(Cli::command())?.get_matches();
//! let cli = Cli::from_arg_matches(&matches)?;
//! ```
//!
//! Values given on the command line still win: configuration only ever
//! supplies defaults.
//!
//! # The document format
//!
//! A small declarative language, a superset of JSON in spirit:
//!
//! ```text
//! # comments use #, // or /* */
//! flag-name = "hello world"
//! int-flag = 10
//! slice-flag = [1, 2, 3]
//! log-level = info              // bare identifiers are values too
//!
//! group {
//!   grouped-flag = "grouped flag"
//! }
//!
//! server "web" {                // labels nest like blocks
//!   port = 8080
//! }
//! ```
//!
//! A block key may repeat (`item { } item { }`); each occurrence is kept as a
//! separate sibling. A document whose first non-blank character is `{` is read
//! as JSON instead.
//!
//! # Flag keys
//!
//! Each flag's key is the dash-joined chain of its subcommands, its group
//! (the clap help heading), and its long name with any literal prefix
//! prepended:
//!
//! ```text
//! app serve --tls-cert        (heading "Net", prefix "tls-")
//!        ->  serve-net-tls-cert
//! ```
//!
//! Because keys are dash-joined, the document may spell the same key flat or
//! nested. `serve-net-tls-cert = "x"`, `serve { net { tls-cert = "x" } }` and
//! `serve-net { tls { cert = "x" } }` are all equivalent. Resolution prefers
//! an exact key, then tries the longest block prefix first and backtracks.
//! Lookups that pass through a repeated block are ambiguous and resolve to
//! nothing.
//!
//! # Strict mode
//!
//! Strict mode is **on by default**. A document key that matches no flag
//! fails [`HclResolver::apply`] with [`HclError::UnknownKey`]:
//!
//! ```text
//! unknown configuration key "invalid-flag"
//! ```
//!
//! Turn it off with [`.strict(false)`](HclConfigBuilder::strict) to share a
//! document between tools.
//!
//! # Raw fragments
//!
//! A flag marked with [`raw_flag()`](HclConfigBuilder::raw_flag) takes a
//! whole block instead of a scalar. Declare it as [`RawConfig`] and decode it
//! into any `serde::Deserialize` type once arguments are parsed. On the
//! command line the same flag accepts a file path, an inline fragment, or
//! inline JSON. Keys below a raw flag are never validated.
//!
//! # Core library without clap
//!
//! The clap adapter sits behind the `clap` Cargo feature (on by default).
//! Without it, build a [`FlagModel`] by hand and use
//! [`HclResolver::defaults`] and [`HclResolver::validate`] directly.

pub mod error;

mod ast;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod flatten;
mod lexer;
pub(crate) mod merge;
mod parser;
mod raw;
mod resolve;
mod resolver;
mod schema;
mod tree;
mod validate;
mod value;

#[cfg(test)]
mod fixtures;

pub use ast::{Block, Document, Entry, EntryBody};
pub use builder::{HclConfig, HclConfigBuilder};
pub use error::HclError;
pub use file::expand_path;
pub use flatten::{flatten, key_string};
pub use merge::merge_tables;
pub use parser::{Parser, parse};
pub use raw::{RawConfig, decode_fragment};
pub use resolve::find;
pub use resolver::HclResolver;
pub use schema::{FlagHints, FlagModel, FlagSpec, Schema};
pub use tree::{Node, Table};
pub use validate::validate;
pub use value::Value;
