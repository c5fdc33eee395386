//! Atom feed parsing.
//!
//! The arXiv API answers every query with an Atom document. This module reads that
//! document with `quick-xml` and turns each `<entry>` into a [`FeedDict`], an
//! ordered mapping shaped the way feed readers conventionally expose entries:
//!
//! | key                        | value                                               |
//! |----------------------------|-----------------------------------------------------|
//! | `id`, `title`, `summary`   | element text                                        |
//! | `title_detail`, `summary_detail` | `{type, language, base, value}`               |
//! | `updated`, `published`     | raw timestamp text                                  |
//! | `updated_parsed`, `published_parsed` | 9-item UTC time structure             |
//! | `authors`                  | list of `{name}` (plus `arxiv_affiliation`)        |
//! | `author`, `author_detail`  | the last author                                     |
//! | `links`, `link`            | list of link attributes, and the alternate href     |
//! | `tags`                     | list of `{term, scheme, label}` from `<category>`   |
//! | `<prefix>_<name>`          | any other namespaced child, e.g. `arxiv_comment`    |
//!
//! These wrapper types are internal to parsing; [`crate::record`] converts them
//! into plain JSON values.

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;

/// A value inside a feed entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedValue {
  /// Nested mapping, e.g. `title_detail`
  Map(FeedDict),
  /// Repeated elements, e.g. `authors`
  List(Vec<FeedValue>),
  /// Element text or attribute value
  Text(String),
  /// Integer component, only produced inside parsed time structures
  Int(i64),
  /// Declared but absent, e.g. a detail's `language` without `xml:lang`
  Null,
}

/// An insertion-ordered mapping of feed fields.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDict {
  /// Key/value pairs in insertion order
  entries: Vec<(String, FeedValue)>,
}

impl FeedDict {
  /// Creates an empty mapping.
  pub fn new() -> Self { Self::default() }

  /// Inserts a value, replacing any previous value under the same key.
  pub fn insert(&mut self, key: impl Into<String>, value: FeedValue) {
    let key = key.into();
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some((_, slot)) => *slot = value,
      None => self.entries.push((key, value)),
    }
  }

  /// Looks up a value by key.
  pub fn get(&self, key: &str) -> Option<&FeedValue> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  /// Whether `key` is present.
  pub fn contains_key(&self, key: &str) -> bool { self.get(key).is_some() }

  /// Iterates over keys in insertion order.
  pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|(k, _)| k.as_str()) }

  /// Iterates over key/value pairs in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &FeedValue)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Number of keys.
  pub fn len(&self) -> usize { self.entries.len() }

  /// Whether the mapping has no keys.
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Appends to the list stored under `key`, creating it if absent.
  fn push(&mut self, key: &str, value: FeedValue) {
    match self.entries.iter_mut().find(|(k, _)| k == key) {
      Some((_, FeedValue::List(items))) => items.push(value),
      Some((_, slot)) => *slot = FeedValue::List(vec![value]),
      None => self.entries.push((key.to_string(), FeedValue::List(vec![value]))),
    }
  }

  /// Text stored under `key`, if it is text.
  pub fn text(&self, key: &str) -> Option<&str> {
    match self.get(key) {
      Some(FeedValue::Text(text)) => Some(text.as_str()),
      _ => None,
    }
  }
}

impl FeedValue {
  /// Shorthand for a text value.
  fn text(value: impl Into<String>) -> Self { Self::Text(value.into()) }
}

/// A parsed XML element with its attributes, text and children.
#[derive(Debug, Default)]
struct Element {
  /// Qualified element name, including any namespace prefix
  name:       String,
  /// Attributes in document order
  attributes: Vec<(String, String)>,
  /// Concatenated text content
  text:       String,
  /// Child elements in document order
  children:   Vec<Element>,
}

impl Element {
  /// Builds an element from its start tag.
  fn from_start(start: &BytesStart<'_>) -> Result<Self> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
      let attr = attr.map_err(|e| ScholarError::Feed(e.to_string()))?;
      let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
      let value = attr.unescape_value().map_err(|e| ScholarError::Feed(e.to_string()))?;
      attributes.push((key, value.into_owned()));
    }
    Ok(Self { name, attributes, ..Default::default() })
  }

  /// Name without its namespace prefix.
  fn local_name(&self) -> &str {
    self.name.rsplit_once(':').map_or(self.name.as_str(), |(_, local)| local)
  }

  /// Name with a namespace prefix rewritten as `prefix_local`.
  fn key(&self) -> String { self.name.replace(':', "_") }

  /// Looks up an attribute value.
  fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Trimmed text content.
  fn trimmed_text(&self) -> &str { self.text.trim() }

  /// Attributes as a mapping.
  fn attribute_dict(&self) -> FeedDict {
    let mut dict = FeedDict::new();
    for (key, value) in &self.attributes {
      dict.insert(key.replace(':', "_"), FeedValue::text(value));
    }
    dict
  }

  /// Generic conversion used for elements without dedicated handling.
  ///
  /// Elements with children become mappings, text-only elements become text and
  /// empty elements become a mapping of their attributes.
  fn to_value(&self) -> FeedValue {
    if !self.children.is_empty() {
      let mut dict = self.attribute_dict();
      for child in &self.children {
        dict.insert(child.key(), child.to_value());
      }
      FeedValue::Map(dict)
    } else if !self.trimmed_text().is_empty() || self.attributes.is_empty() {
      FeedValue::text(self.trimmed_text())
    } else {
      FeedValue::Map(self.attribute_dict())
    }
  }
}

/// Parses an Atom document into its entries, in document order.
///
/// # Errors
///
/// Returns [`ScholarError::Feed`] if the bytes are not a well-formed XML document.
/// A well-formed document without entries yields an empty list.
pub fn parse(data: &[u8]) -> Result<Vec<FeedDict>> {
  let xml = String::from_utf8_lossy(data);
  let root = read_tree(&xml)?;
  trace!("Parsed feed root <{}> with {} children", root.name, root.children.len());

  let base = root.attribute("xml:base").unwrap_or_default().to_string();
  root
    .children
    .iter()
    .filter(|child| child.local_name() == "entry")
    .map(|entry| parse_entry(entry, &base))
    .collect()
}

/// Reads the document into an element tree, returning the root element.
fn read_tree(xml: &str) -> Result<Element> {
  let mut reader = Reader::from_str(xml);
  let mut stack: Vec<Element> = Vec::new();
  let mut root = None;

  loop {
    let event = reader.read_event().map_err(|e| {
      ScholarError::Feed(format!("{e} at position {}", reader.error_position()))
    })?;
    match event {
      Event::Start(start) => stack.push(Element::from_start(&start)?),
      Event::Empty(start) => {
        let element = Element::from_start(&start)?;
        attach(&mut stack, &mut root, element)?;
      },
      Event::Text(text) =>
        if let Some(current) = stack.last_mut() {
          let text = text.unescape().map_err(|e| ScholarError::Feed(e.to_string()))?;
          current.text.push_str(&text);
        },
      Event::CData(data) =>
        if let Some(current) = stack.last_mut() {
          current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
        },
      Event::End(_) => {
        let element =
          stack.pop().ok_or_else(|| ScholarError::Feed("unbalanced closing tag".to_string()))?;
        attach(&mut stack, &mut root, element)?;
      },
      Event::Eof => break,
      _ => (),
    }
  }

  if let Some(open) = stack.last() {
    return Err(ScholarError::Feed(format!("unexpected end of document inside <{}>", open.name)));
  }
  root.ok_or_else(|| ScholarError::Feed("document has no root element".to_string()))
}

/// Attaches a finished element to its parent, or makes it the document root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
  match stack.last_mut() {
    Some(parent) => parent.children.push(element),
    None if root.is_none() => *root = Some(element),
    None => return Err(ScholarError::Feed("document has multiple root elements".to_string())),
  }
  Ok(())
}

/// Converts one `<entry>` element into its feed mapping.
fn parse_entry(entry: &Element, feed_base: &str) -> Result<FeedDict> {
  let mut dict = FeedDict::new();
  let base = entry.attribute("xml:base").unwrap_or(feed_base);

  for child in &entry.children {
    let is_atom = !child.name.contains(':');
    match (is_atom, child.local_name()) {
      (true, "id") => dict.insert("id", FeedValue::text(child.trimmed_text())),
      (true, key @ ("title" | "summary")) => {
        dict.insert(key, FeedValue::text(child.trimmed_text()));
        dict.insert(format!("{key}_detail"), FeedValue::Map(text_detail(child, base)));
      },
      (true, key @ ("updated" | "published")) => {
        let raw = child.trimmed_text();
        dict.insert(key, FeedValue::text(raw));
        match DateTime::parse_from_rfc3339(raw) {
          Ok(time) => dict.insert(format!("{key}_parsed"), time_struct(time.with_timezone(&Utc))),
          Err(e) => warn!("Could not parse <{key}> timestamp {raw:?}: {e}"),
        }
      },
      (true, "author") => {
        let mut author = FeedDict::new();
        for field in &child.children {
          author.insert(field.key(), FeedValue::text(field.trimmed_text()));
        }
        if let Some(name) = author.text("name").map(str::to_string) {
          let mut detail = FeedDict::new();
          detail.insert("name", FeedValue::text(&name));
          dict.insert("author_detail", FeedValue::Map(detail));
          dict.insert("author", FeedValue::text(name));
        }
        dict.push("authors", FeedValue::Map(author));
      },
      (true, "link") => {
        let link = child.attribute_dict();
        if matches!(child.attribute("rel"), None | Some("alternate")) {
          if let Some(href) = child.attribute("href") {
            dict.insert("link", FeedValue::text(href));
          }
        }
        dict.push("links", FeedValue::Map(link));
      },
      (true, "category") => {
        let mut tag = FeedDict::new();
        for key in ["term", "scheme", "label"] {
          tag.insert(key, child.attribute(key).map_or(FeedValue::Null, FeedValue::text));
        }
        dict.push("tags", FeedValue::Map(tag));
      },
      _ => dict.insert(child.key(), child.to_value()),
    }
  }

  Ok(dict)
}

/// Builds the `{type, language, base, value}` detail mapping for a text construct.
fn text_detail(element: &Element, base: &str) -> FeedDict {
  let content_type = match element.attribute("type") {
    None | Some("text") => "text/plain",
    Some("html") => "text/html",
    Some("xhtml") => "application/xhtml+xml",
    Some(other) => other,
  };
  let mut detail = FeedDict::new();
  detail.insert("type", FeedValue::text(content_type));
  detail.insert("language", element.attribute("xml:lang").map_or(FeedValue::Null, FeedValue::text));
  detail.insert("base", FeedValue::text(element.attribute("xml:base").unwrap_or(base)));
  detail.insert("value", FeedValue::text(element.trimmed_text()));
  detail
}

/// Encodes an instant as `[year, month, day, hour, minute, second, weekday, yearday, dst]`.
///
/// Weekday counts from Monday as 0, yearday from January 1st as 1, and the dst flag
/// is always 0 since the instant is in UTC.
pub fn time_struct(time: DateTime<Utc>) -> FeedValue {
  let fields = [
    i64::from(time.year()),
    i64::from(time.month()),
    i64::from(time.day()),
    i64::from(time.hour()),
    i64::from(time.minute()),
    i64::from(time.second()),
    i64::from(time.weekday().num_days_from_monday()),
    i64::from(time.ordinal()),
    0,
  ];
  FeedValue::List(fields.into_iter().map(FeedValue::Int).collect())
}
