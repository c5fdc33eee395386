//! Prompting the user and rendering replies.
//!
//! Commands talk to the user only through [`UserInteraction`], so the same command
//! code drives a real terminal and the scripted sessions used in tests.

use std::{
  fmt,
  io::{BufRead, IsTerminal, Write},
};

use dialoguer::Input;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";

/// Something a command wants shown to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// An operation completed and changed something
  Success(&'a str),
  /// Neutral status
  Info(&'a str),
  /// A request that could not be carried out, such as an unknown user
  Warning(&'a str),
  /// A failed command
  Error(&'a ScholardError),
  /// Unadorned text such as menus and headings
  Text(&'a str),
  /// Numbered list of usernames
  Users(&'a [String]),
  /// A user's tags with their papers
  Tags {
    /// Owner of the tags
    user: &'a str,
    /// Tag name to paper identifiers
    tags: &'a Tags,
  },
  /// Records as a pretty-printed JSON array
  Records(&'a [Record]),
  /// One line per record: identifier, date and title
  Summary(&'a [Record]),
}

impl fmt::Display for ResponseContent<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Success(text) | Self::Info(text) | Self::Warning(text) | Self::Text(text) =>
        write!(f, "{text}"),
      Self::Error(error) => write!(f, "{error}"),
      Self::Users(users) => {
        write!(f, "Users in tags DB:")?;
        for (i, user) in users.iter().enumerate() {
          write!(f, "\n{}. {user}", i + 1)?;
        }
        Ok(())
      },
      Self::Tags { user, tags } => {
        write!(f, "Tags for user '{user}':")?;
        for (tag, papers) in tags.iter() {
          let papers: Vec<&String> = papers.iter().collect();
          write!(f, "\n  {tag} ({} papers): {papers:?}", papers.len())?;
        }
        Ok(())
      },
      Self::Records(records) => {
        let json = serde_json::to_string_pretty(records).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
      },
      Self::Summary(records) => {
        for (i, record) in records.iter().enumerate() {
          if i > 0 {
            writeln!(f)?;
          }
          let title = record.title().unwrap_or_default().split_whitespace().collect::<Vec<_>>();
          write!(
            f,
            "{}  {}  {}",
            record.idv().unwrap_or_default(),
            record.time_str().unwrap_or_default(),
            title.join(" ")
          )?;
        }
        Ok(())
      },
    }
  }
}

/// The channel between commands and the person running them.
pub trait UserInteraction {
  /// Asks for one line of input, trimmed of surrounding whitespace.
  ///
  /// Returns `None` once input is exhausted.
  fn prompt(&mut self, message: &str) -> Result<Option<String>>;

  /// Shows `content` to the user.
  fn reply(&mut self, content: ResponseContent) -> Result<()>;
}

/// The process's own terminal.
///
/// Prompts go through `dialoguer` when stdin is a terminal and fall back to plain
/// line reads otherwise, so piped input works the same as typed input.
#[derive(Debug, Default)]
pub struct Terminal;

impl UserInteraction for Terminal {
  fn prompt(&mut self, message: &str) -> Result<Option<String>> {
    if std::io::stdin().is_terminal() {
      let input: String = Input::new().with_prompt(message).allow_empty(true).interact_text()?;
      return Ok(Some(input.trim().to_string()));
    }

    print!("{}{message}: ", style(PROMPT_PREFIX).cyan());
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
      println!();
      return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
  }

  fn reply(&mut self, content: ResponseContent) -> Result<()> {
    match &content {
      ResponseContent::Success(_) => println!("{}{content}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(_) => println!("{}{content}", style(INFO_PREFIX).blue()),
      ResponseContent::Warning(_) => println!("{}{content}", style(WARNING_PREFIX).yellow()),
      ResponseContent::Error(_) => eprintln!("{}{content}", style(ERROR_PREFIX).red()),
      ResponseContent::Users(users) if users.is_empty() =>
        println!("{}No users in tags DB.", style(INFO_PREFIX).blue()),
      _ => println!("{content}"),
    }
    Ok(())
  }
}

/// A scripted session for exercising commands without a terminal.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Scripted {
  /// Remaining answers, handed out in order
  inputs:      std::collections::VecDeque<String>,
  /// Every prompt message seen
  pub prompts: Vec<String>,
  /// Every reply, rendered as plain text
  pub output:  Vec<String>,
}

#[cfg(test)]
impl Scripted {
  /// A session that answers prompts with `inputs`, then reports end of input.
  pub fn new<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Self {
    Self { inputs: inputs.into_iter().map(str::to_string).collect(), ..Self::default() }
  }

  /// Whether any reply contains `needle`.
  pub fn said(&self, needle: &str) -> bool { self.output.iter().any(|line| line.contains(needle)) }
}

#[cfg(test)]
impl UserInteraction for Scripted {
  fn prompt(&mut self, message: &str) -> Result<Option<String>> {
    self.prompts.push(message.to_string());
    Ok(self.inputs.pop_front().map(|input| input.trim().to_string()))
  }

  fn reply(&mut self, content: ResponseContent) -> Result<()> {
    self.output.push(content.to_string());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_tags_render_sorted_papers() {
    let tags = Tags::from([
      ("reading".to_string(), ["2505.11111", "1234.5678"].map(String::from).into()),
      ("later".to_string(), Default::default()),
    ]);
    let rendered = ResponseContent::Tags { user: "alice", tags: &tags }.to_string();
    assert_eq!(
      rendered,
      "Tags for user 'alice':\n  later (0 papers): []\n  reading (2 papers): [\"1234.5678\", \
       \"2505.11111\"]"
    );
  }

  #[traced_test]
  #[test]
  fn test_users_are_numbered_from_one() {
    let users = vec!["bob".to_string(), "alice".to_string()];
    assert_eq!(ResponseContent::Users(&users).to_string(), "Users in tags DB:\n1. bob\n2. alice");
  }

  #[traced_test]
  #[test]
  fn test_scripted_prompts_are_trimmed() {
    let mut session = Scripted::new(["  alice \n"]);
    assert_eq!(session.prompt("Enter username").unwrap().as_deref(), Some("alice"));
    assert_eq!(session.prompt("Enter username").unwrap(), None);
    assert_eq!(session.prompts.len(), 2);
  }
}
