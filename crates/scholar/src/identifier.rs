//! Versioned arXiv identifiers.
//!
//! Every arXiv entry carries a canonical URL whose last path segment is the
//! versioned identifier, e.g. `http://arxiv.org/abs/1512.08756v2`. That segment is
//! the base identifier (`1512.08756`) and an integer version (`2`) joined by a
//! single `v`.
//!
//! # Examples
//!
//! ```
//! use scholar::identifier::{parse_url, VersionedIdentifier};
//!
//! let (idv, id, version) = parse_url("http://arxiv.org/abs/1512.08756v2").unwrap();
//! assert_eq!((idv.as_str(), id.as_str(), version), ("1512.08756v2", "1512.08756", 2));
//!
//! let bare: VersionedIdentifier = "2505.11111v1".parse().unwrap();
//! assert_eq!(bare.base(), "2505.11111");
//! ```

use super::*;

/// Separator between the base identifier and its version.
const VERSION_MARKER: char = 'v';

/// A base identifier paired with an integer version.
///
/// Displays as `<base>v<version>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionedIdentifier {
  /// The version-independent identifier
  base:    String,
  /// Revision number of the paper
  version: u32,
}

impl VersionedIdentifier {
  /// Pairs a base identifier with a version.
  pub fn new(base: impl Into<String>, version: u32) -> Self {
    Self { base: base.into(), version }
  }

  /// Parses the identifier out of a canonical arXiv URL.
  ///
  /// Everything after the last `/` is taken as the versioned identifier.
  ///
  /// # Errors
  ///
  /// Returns [`ScholarError::MalformedIdentifier`] if the URL contains no `/`, or if
  /// the final segment does not split into exactly a base and a numeric version.
  pub fn from_url(url: &str) -> Result<Self> {
    let (_, idv) = url
      .rsplit_once('/')
      .ok_or_else(|| ScholarError::MalformedIdentifier(format!("bad url: {url}")))?;
    idv.parse()
  }

  /// The version-independent identifier, e.g. `1512.08756`.
  pub fn base(&self) -> &str { &self.base }

  /// The revision number.
  pub fn version(&self) -> u32 { self.version }
}

impl FromStr for VersionedIdentifier {
  type Err = ScholarError;

  /// Parses a bare identifier such as `1512.08756v2`.
  ///
  /// Identifiers carrying zero or several `v` markers are rejected rather than
  /// guessed at, as is an empty base.
  fn from_str(idv: &str) -> Result<Self> {
    let malformed = || ScholarError::MalformedIdentifier(idv.to_string());

    let parts: Vec<&str> = idv.split(VERSION_MARKER).collect();
    let [base, version] = parts.as_slice() else {
      return Err(malformed());
    };
    if base.is_empty() {
      return Err(malformed());
    }
    let version = version.parse::<u32>().map_err(|_| malformed())?;
    Ok(Self::new(*base, version))
  }
}

impl Display for VersionedIdentifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}{}{}", self.base, VERSION_MARKER, self.version)
  }
}

/// Splits a canonical URL into `(versioned_id, base_id, version)`.
///
/// # Errors
///
/// See [`VersionedIdentifier::from_url`].
pub fn parse_url(url: &str) -> Result<(String, String, u32)> {
  let identifier = VersionedIdentifier::from_url(url)?;
  Ok((identifier.to_string(), identifier.base, identifier.version))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_parse_canonical_url() {
    let (idv, id, version) = parse_url("http://arxiv.org/abs/1512.08756v2").unwrap();
    assert_eq!(idv, "1512.08756v2");
    assert_eq!(id, "1512.08756");
    assert_eq!(version, 2);
  }

  #[traced_test]
  #[test]
  fn test_parse_multidigit_version() {
    let identifier = VersionedIdentifier::from_url("https://arxiv.org/abs/2301.07041v12").unwrap();
    assert_eq!(identifier.base(), "2301.07041");
    assert_eq!(identifier.version(), 12);
    assert_eq!(identifier.to_string(), "2301.07041v12");
  }

  #[traced_test]
  #[test]
  fn test_two_version_markers_rejected() {
    assert!(matches!(
      parse_url("http://arxiv.org/abs/1512v08756v2"),
      Err(ScholarError::MalformedIdentifier(_))
    ));
  }

  #[traced_test]
  #[test]
  fn test_missing_version_marker_rejected() {
    assert!(matches!(
      parse_url("http://arxiv.org/abs/15120875"),
      Err(ScholarError::MalformedIdentifier(_))
    ));
  }

  #[traced_test]
  #[test]
  fn test_url_without_separator_rejected() {
    let err = parse_url("1512.08756v2").unwrap_err();
    assert!(matches!(err, ScholarError::MalformedIdentifier(ref msg) if msg.contains("bad url")));
  }

  #[traced_test]
  #[test]
  fn test_non_numeric_version_rejected() {
    assert!("1512.08756vX".parse::<VersionedIdentifier>().is_err());
    assert!("1512.08756v".parse::<VersionedIdentifier>().is_err());
    assert!("1512.08756v-1".parse::<VersionedIdentifier>().is_err());
  }

  #[traced_test]
  #[test]
  fn test_empty_base_rejected() {
    assert!("v3".parse::<VersionedIdentifier>().is_err());
  }

  #[traced_test]
  #[test]
  fn test_legacy_identifier_keeps_only_last_segment() {
    // Old-style ids contain a slash, so only the numeric tail survives the split.
    let (idv, id, version) = parse_url("http://arxiv.org/abs/hep-th/9901001v1").unwrap();
    assert_eq!(idv, "9901001v1");
    assert_eq!(id, "9901001");
    assert_eq!(version, 1);
  }
}
