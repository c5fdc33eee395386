//! Normalized paper records.
//!
//! A [`Record`] is the plain form of one feed entry: every parser-specific wrapper
//! is stripped down to JSON mappings, sequences and scalars, the two verbose
//! `title_detail`/`summary_detail` structures are dropped, and five derived fields
//! are attached:
//!
//! - `_idv`: versioned identifier, e.g. `1512.08756v2`
//! - `_id`: base identifier, e.g. `1512.08756`
//! - `_version`: integer version
//! - `_time`: Unix timestamp of the entry's last update
//! - `_time_str`: the same instant formatted as `Dec 29 2015`
//!
//! # Examples
//!
//! ```no_run
//! # fn example(response: &[u8]) -> Result<(), scholar::error::ScholarError> {
//! for record in scholar::normalize(response)? {
//!   println!("{} ({})", record.idv().unwrap_or_default(), record.time_str().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// Key of the derived versioned identifier.
pub const IDV_KEY: &str = "_idv";
/// Key of the derived base identifier.
pub const ID_KEY: &str = "_id";
/// Key of the derived version number.
pub const VERSION_KEY: &str = "_version";
/// Key of the derived Unix timestamp.
pub const TIME_KEY: &str = "_time";
/// Key of the derived human-readable date.
pub const TIME_STR_KEY: &str = "_time_str";

/// Redundant sub-structures removed from every record.
const DROPPED_KEYS: [&str; 2] = ["summary_detail", "title_detail"];

/// Format of [`TIME_STR_KEY`], e.g. `Jan 15 2024`.
const TIME_STR_FORMAT: &str = "%b %d %Y";

/// The structural view of a node: a mapping, a sequence or a scalar leaf.
pub enum Shape<'a, C> {
  /// Keyed children in iteration order
  Mapping(Vec<(&'a str, &'a C)>),
  /// Positional children
  Sequence(Vec<&'a C>),
  /// A leaf, already in its plain form
  Scalar(Value),
}

/// Anything that can describe itself as a tree of mappings, sequences and scalars.
///
/// [`to_plain`] only relies on this capability, so any tree-shaped type can be
/// flattened into a [`Value`] without the converter knowing its concrete type.
pub trait Structured {
  /// The type of this node's children.
  type Child: Structured;

  /// Reports which of the three shapes this node has.
  fn shape(&self) -> Shape<'_, Self::Child>;
}

/// Deep-converts a structured node into a plain JSON value.
///
/// Mappings and sequences are rebuilt recursively; scalar leaves are taken as-is.
pub fn to_plain<T: Structured + ?Sized>(node: &T) -> Value {
  match node.shape() {
    Shape::Mapping(items) => Value::Object(
      items.into_iter().map(|(key, child)| (key.to_string(), to_plain(child))).collect(),
    ),
    Shape::Sequence(items) => Value::Array(items.into_iter().map(to_plain).collect()),
    Shape::Scalar(value) => value,
  }
}

impl Structured for FeedValue {
  type Child = FeedValue;

  fn shape(&self) -> Shape<'_, FeedValue> {
    match self {
      FeedValue::Map(dict) => Shape::Mapping(dict.iter().collect()),
      FeedValue::List(items) => Shape::Sequence(items.iter().collect()),
      FeedValue::Text(text) => Shape::Scalar(Value::String(text.clone())),
      FeedValue::Int(int) => Shape::Scalar(Value::from(*int)),
      FeedValue::Null => Shape::Scalar(Value::Null),
    }
  }
}

impl Structured for FeedDict {
  type Child = FeedValue;

  fn shape(&self) -> Shape<'_, FeedValue> { Shape::Mapping(self.iter().collect()) }
}

impl Structured for Value {
  type Child = Value;

  fn shape(&self) -> Shape<'_, Value> {
    match self {
      Value::Object(map) => Shape::Mapping(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
      Value::Array(items) => Shape::Sequence(items.iter().collect()),
      scalar => Shape::Scalar(scalar.clone()),
    }
  }
}

impl Structured for String {
  type Child = Value;

  fn shape(&self) -> Shape<'_, Value> { Shape::Scalar(Value::String(self.clone())) }
}

impl<T: Structured> Structured for Vec<T> {
  type Child = T;

  fn shape(&self) -> Shape<'_, T> { Shape::Sequence(self.iter().collect()) }
}

impl<T: Structured> Structured for BTreeSet<T> {
  type Child = T;

  fn shape(&self) -> Shape<'_, T> { Shape::Sequence(self.iter().collect()) }
}

impl<V: Structured> Structured for BTreeMap<String, V> {
  type Child = V;

  fn shape(&self) -> Shape<'_, V> {
    Shape::Mapping(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
  }
}

/// One normalized feed entry.
///
/// Serializes transparently as its underlying JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
  /// Normalizes a single parsed feed entry.
  ///
  /// # Errors
  ///
  /// - [`ScholarError::Feed`] if the entry has no `id`
  /// - [`ScholarError::MalformedIdentifier`] if the `id` URL does not end in a versioned
  ///   identifier
  /// - [`ScholarError::InvalidTimestamp`] if `updated_parsed` is missing or invalid
  pub fn from_entry(entry: &FeedDict) -> Result<Self> {
    let Value::Object(mut fields) = to_plain(entry) else {
      return Err(ScholarError::Feed("entry is not a mapping".to_string()));
    };

    let url = fields
      .get("id")
      .and_then(Value::as_str)
      .ok_or_else(|| ScholarError::Feed("entry has no id".to_string()))?;
    let identifier = VersionedIdentifier::from_url(url)?;

    let updated = fields.get("updated_parsed").ok_or_else(|| {
      ScholarError::InvalidTimestamp(format!("entry {identifier} has no parsed update time"))
    })?;
    let updated = time_from_struct(updated)?;

    for key in DROPPED_KEYS {
      fields.remove(key);
    }

    fields.insert(IDV_KEY.to_string(), Value::from(identifier.to_string()));
    fields.insert(ID_KEY.to_string(), Value::from(identifier.base()));
    fields.insert(VERSION_KEY.to_string(), Value::from(identifier.version()));
    fields.insert(TIME_KEY.to_string(), Value::from(updated.timestamp() as f64));
    fields
      .insert(TIME_STR_KEY.to_string(), Value::from(updated.format(TIME_STR_FORMAT).to_string()));

    Ok(Self(fields))
  }

  /// Versioned identifier, e.g. `1512.08756v2`.
  pub fn idv(&self) -> Option<&str> { self.0.get(IDV_KEY).and_then(Value::as_str) }

  /// Base identifier, e.g. `1512.08756`.
  pub fn id(&self) -> Option<&str> { self.0.get(ID_KEY).and_then(Value::as_str) }

  /// Version number.
  pub fn version(&self) -> Option<u32> {
    self.0.get(VERSION_KEY).and_then(Value::as_u64).and_then(|v| u32::try_from(v).ok())
  }

  /// Unix timestamp of the last update.
  pub fn time(&self) -> Option<f64> { self.0.get(TIME_KEY).and_then(Value::as_f64) }

  /// Last update formatted as `Jan 15 2024`.
  pub fn time_str(&self) -> Option<&str> { self.0.get(TIME_STR_KEY).and_then(Value::as_str) }

  /// Entry title.
  pub fn title(&self) -> Option<&str> { self.0.get("title").and_then(Value::as_str) }

  /// Any field by key.
  pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

  /// The underlying mapping.
  pub fn as_map(&self) -> &Map<String, Value> { &self.0 }

  /// Consumes the record, returning the underlying mapping.
  pub fn into_map(self) -> Map<String, Value> { self.0 }
}

/// Parses a raw response body into normalized records, in feed order.
///
/// # Errors
///
/// Fails if the body is not a feed document or if any single entry cannot be
/// normalized; one bad entry aborts the whole batch.
pub fn normalize(data: &[u8]) -> Result<Vec<Record>> {
  let entries = feed::parse(data)?;
  debug!("Normalizing {} feed entries", entries.len());
  entries.iter().map(Record::from_entry).collect()
}

/// Reads a `[year, month, day, hour, minute, second, ..]` time structure as a UTC instant.
fn time_from_struct(value: &Value) -> Result<DateTime<Utc>> {
  let invalid = || ScholarError::InvalidTimestamp(value.to_string());

  let parts = value
    .as_array()
    .ok_or_else(invalid)?
    .iter()
    .map(|part| part.as_i64().ok_or_else(invalid))
    .collect::<Result<Vec<i64>>>()?;
  let [year, month, day, hour, minute, second, ..] = parts.as_slice() else {
    return Err(invalid());
  };

  let field = |v: i64| u32::try_from(v).map_err(|_| invalid());
  let year = i32::try_from(*year).map_err(|_| invalid())?;
  let naive = NaiveDate::from_ymd_opt(year, field(*month)?, field(*day)?)
    .and_then(|date| date.and_hms_opt(field(*hour).ok()?, field(*minute).ok()?, field(*second).ok()?))
    .ok_or_else(invalid)?;
  Ok(Utc.from_utc_datetime(&naive))
}
