//! Latest-version filtering over versioned identifiers.

use super::*;

/// Reduces a list of versioned identifiers to the latest version of each paper.
///
/// Base identifiers come out in the order they were first seen, each carrying the
/// highest version encountered for it anywhere in the input.
///
/// # Errors
///
/// The whole call fails with [`ScholarError::MalformedIdentifier`] if any entry does
/// not contain exactly one `v` marker followed by an integer. Partial results are
/// never returned, so one bad entry cannot skew the others.
///
/// # Examples
///
/// ```
/// use scholar::version::keep_latest;
///
/// let latest = keep_latest(["1v1", "1v3", "2v1", "1v2"]).unwrap();
/// assert_eq!(latest, vec!["1v3", "2v1"]);
/// ```
pub fn keep_latest<I, S>(identifiers: I) -> Result<Vec<String>>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>, {
  let mut latest: Vec<VersionedIdentifier> = Vec::new();
  let mut position: HashMap<String, usize> = HashMap::new();

  for idv in identifiers {
    let identifier: VersionedIdentifier = idv.as_ref().parse()?;
    match position.get(identifier.base()) {
      Some(&index) =>
        if identifier.version() > latest[index].version() {
          latest[index] = identifier;
        },
      None => {
        position.insert(identifier.base().to_string(), latest.len());
        latest.push(identifier);
      },
    }
  }

  trace!("Kept {} latest identifiers", latest.len());
  Ok(latest.iter().map(ToString::to_string).collect())
}
