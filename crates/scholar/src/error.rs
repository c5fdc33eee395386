//! Error types for the scholar library.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! [`ScholarError`] covers:
//! - Invalid feed requests
//! - Malformed paper identifiers
//! - Network and feed parsing failures
//! - Tag store persistence
//! - Configuration loading
//!
//! # Examples
//!
//! ```
//! use scholar::{error::ScholarError, identifier::parse_url};
//!
//! match parse_url("http://arxiv.org/abs/15120875") {
//!   Err(ScholarError::MalformedIdentifier(id)) => println!("Bad identifier: {id}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => println!("Success!"),
//! }
//! ```
//!
//! A non-200 response from the remote API is deliberately absent from this
//! list: it is logged and the body is handed back to the caller.

use thiserror::Error;

/// Error type alias used for the [`scholar`](crate) crate.
pub type Result<T> = core::result::Result<T, ScholarError>;

/// Errors that can occur when fetching, normalizing or tagging papers.
#[derive(Error, Debug)]
pub enum ScholarError {
  /// A feed request was built with neither or both of a search query and an id list.
  #[error("Invalid request: {0}")]
  InvalidRequest(String),

  /// A paper identifier could not be split into a base identifier and an integer version.
  ///
  /// The string parameter carries the offending identifier (or URL).
  #[error("Malformed identifier: {0}")]
  MalformedIdentifier(String),

  /// A network request failed before a response body was received.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The response body could not be read as a feed document, or an entry lacks a required
  /// field.
  #[error("Feed error: {0}")]
  Feed(String),

  /// An entry's time field is missing or does not describe a valid instant.
  #[error("Invalid timestamp: {0}")]
  InvalidTimestamp(String),

  /// A SQLite operation failed.
  ///
  /// This wraps errors from the `rusqlite` crate raised by the persistent tag store.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// A stored value could not be serialized or deserialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file is not valid TOML for a [`Config`](crate::configuration::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be written back out as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// The configuration file holds values that cannot be used.
  #[error("Configuration error: {0}")]
  Config(String),
}
