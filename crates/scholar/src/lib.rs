//! arXiv record retrieval, normalization and personal tagging.
//!
//! `scholar` is a library for pulling paper metadata from the arXiv API and keeping
//! personal tag collections over it, providing:
//!
//! - Feed retrieval by explicit identifier list or by full-text search
//! - Atom feed parsing into plain, library-agnostic records
//! - Versioned identifier parsing (`1512.08756v2` → `1512.08756`, version `2`)
//! - Deduplication of identifier lists down to the latest version of each paper
//! - Per-user tag collections over a pluggable key-value store
//!
//! # Getting Started
//!
//! ```no_run
//! use scholar::{prelude::*, retriever::FeedRequest, version::keep_latest, Retriever};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let retriever = Retriever::new();
//!
//!   // Pull the two most recent revisions of a paper
//!   let request = FeedRequest::new().with_ids(["1512.08756v1", "1512.08756v2"]);
//!   let records = retriever.fetch_records(&request).await?;
//!
//!   let idvs: Vec<&str> = records.iter().filter_map(|r| r.idv()).collect();
//!   println!("latest: {:?}", keep_latest(idvs)?);
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`identifier`]: Versioned identifier parsing
//! - [`retriever`]: Request construction and HTTP retrieval
//! - [`feed`]: Atom document parsing into feed entries
//! - [`record`]: Normalization of feed entries into [`Record`]s
//! - [`version`]: Latest-version deduplication
//! - [`store`]: The key-value interface and its backings
//! - [`tags`]: Per-user tag collections
//! - [`configuration`]: On-disk configuration

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, BTreeSet, HashMap},
  fmt::Display,
  marker::PhantomData,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod configuration;
pub mod error;
pub mod feed;
pub mod identifier;
pub mod record;
pub mod retriever;
pub mod store;
pub mod tags;
pub mod version;

pub use crate::{
  configuration::Config,
  record::{normalize, Record},
  retriever::Retriever,
};
use crate::{
  error::*,
  feed::{FeedDict, FeedValue},
  identifier::VersionedIdentifier,
  store::KeyValueStore,
};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use scholar::{prelude::*, store::MemoryStore, tags::TagStore};
///
/// fn example() -> Result<(), ScholarError> {
///   let mut tags = TagStore::new(MemoryStore::new());
///   tags.add_paper("alice", "reading", "2505.11111")?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::ScholarError, record::Structured, store::KeyValueStore};
}
