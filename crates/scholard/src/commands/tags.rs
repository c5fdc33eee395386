//! The interactive tag manager.

use super::*;

/// Options shown before every menu prompt.
const MENU: &str = "\nOptions:
 1. List users
 2. View a user's tags
 3. Add a new tag to a user
 4. Add a paper to a tag
 5. Remove a paper from a tag
 6. Quit";

/// Function for the [`Commands::Tags`] in the CLI.
///
/// Opens the tag database named by `config` and runs the menu until the user quits
/// or input ends. Pending writes are flushed before returning.
pub fn tags<I: UserInteraction>(interaction: &mut I, config: &Config) -> Result<()> {
  debug!("Opening tag database at {}", config.tags_path.display());
  let mut store = TagStore::new(SqliteStore::<Tags>::open(&config.tags_path, config.autocommit)?);
  menu(interaction, &mut store)?;
  store.flush()?;
  Ok(())
}

/// Runs the numbered menu over any tag store.
pub fn menu<I, S>(interaction: &mut I, store: &mut TagStore<S>) -> Result<()>
where
  I: UserInteraction,
  S: KeyValueStore<Tags>, {
  interaction.reply(ResponseContent::Text("=== Interactive Tag Manager ==="))?;

  loop {
    interaction.reply(ResponseContent::Text(MENU))?;
    let Some(choice) = interaction.prompt("Enter option number")? else { break };

    match choice.as_str() {
      "1" => list_users(interaction, store)?,
      "2" => {
        let Some(user) = interaction.prompt("Enter username")? else { break };
        view_user_tags(interaction, store, &user)?;
      },
      "3" => {
        let Some(user) = interaction.prompt("Enter username")? else { break };
        let Some(tag) = interaction.prompt("Enter new tag name")? else { break };
        add_tag(interaction, store, &user, &tag)?;
      },
      "4" => {
        let Some(user) = interaction.prompt("Enter username")? else { break };
        let Some(tag) = interaction.prompt("Enter tag name")? else { break };
        let Some(pid) = interaction.prompt("Enter paper ID (e.g., 2505.11111)")? else { break };
        add_paper(interaction, store, &user, &tag, &pid)?;
      },
      "5" => {
        let Some(user) = interaction.prompt("Enter username")? else { break };
        let Some(tag) = interaction.prompt("Enter tag name")? else { break };
        let Some(pid) = interaction.prompt("Enter paper ID to remove")? else { break };
        remove_paper(interaction, store, &user, &tag, &pid)?;
      },
      "6" => break,
      _ => interaction.reply(ResponseContent::Warning("Invalid option, try again."))?,
    }
  }

  interaction.reply(ResponseContent::Info("Exiting."))
}

/// Menu option 1.
fn list_users<I: UserInteraction, S: KeyValueStore<Tags>>(
  interaction: &mut I,
  store: &TagStore<S>,
) -> Result<()> {
  let users = store.users()?;
  interaction.reply(ResponseContent::Users(&users))
}

/// Menu option 2.
fn view_user_tags<I: UserInteraction, S: KeyValueStore<Tags>>(
  interaction: &mut I,
  store: &TagStore<S>,
  user: &str,
) -> Result<()> {
  match store.user_tags(user)? {
    None => interaction.reply(ResponseContent::Warning(&format!("User '{user}' not found."))),
    Some(tags) if tags.is_empty() =>
      interaction.reply(ResponseContent::Info(&format!("No tags for user '{user}'."))),
    Some(tags) => interaction.reply(ResponseContent::Tags { user, tags: &tags }),
  }
}

/// Menu option 3.
fn add_tag<I: UserInteraction, S: KeyValueStore<Tags>>(
  interaction: &mut I,
  store: &mut TagStore<S>,
  user: &str,
  tag: &str,
) -> Result<()> {
  match store.add_tag(user, tag)? {
    TagOutcome::Added =>
      interaction.reply(ResponseContent::Success(&format!("Added tag '{tag}' for user '{user}'."))),
    TagOutcome::AlreadyExists => interaction
      .reply(ResponseContent::Info(&format!("Tag '{tag}' already exists for user '{user}'."))),
  }
}

/// Menu option 4.
fn add_paper<I: UserInteraction, S: KeyValueStore<Tags>>(
  interaction: &mut I,
  store: &mut TagStore<S>,
  user: &str,
  tag: &str,
  pid: &str,
) -> Result<()> {
  match store.add_paper(user, tag, pid)? {
    PaperOutcome::Added { created_tag } => {
      if created_tag {
        interaction.reply(ResponseContent::Info(&format!(
          "Tag '{tag}' does not exist for user '{user}'. Creating it."
        )))?;
      }
      interaction.reply(ResponseContent::Success(&format!(
        "Added paper '{pid}' to tag '{tag}' for user '{user}'."
      )))
    },
    _ => interaction.reply(ResponseContent::Info(&format!(
      "Paper '{pid}' is already in tag '{tag}' for user '{user}'."
    ))),
  }
}

/// Menu option 5.
fn remove_paper<I: UserInteraction, S: KeyValueStore<Tags>>(
  interaction: &mut I,
  store: &mut TagStore<S>,
  user: &str,
  tag: &str,
  pid: &str,
) -> Result<()> {
  match store.remove_paper(user, tag, pid)? {
    PaperOutcome::Removed => interaction.reply(ResponseContent::Success(&format!(
      "Removed paper '{pid}' from tag '{tag}' for user '{user}'."
    ))),
    _ => interaction.reply(ResponseContent::Warning(&format!(
      "Paper '{pid}' not found in tag '{tag}' for user '{user}'."
    ))),
  }
}

#[cfg(test)]
mod tests {
  use scholar::store::MemoryStore;

  use super::*;

  fn run(inputs: &[&str]) -> (Scripted, TagStore<MemoryStore<Tags>>) {
    let mut session = Scripted::new(inputs.iter().copied());
    let mut store = TagStore::new(MemoryStore::new());
    menu(&mut session, &mut store).unwrap();
    (session, store)
  }

  #[traced_test]
  #[test]
  fn test_quit_immediately() {
    let (session, store) = run(&["6"]);
    assert!(session.said("=== Interactive Tag Manager ==="));
    assert_eq!(session.output.last().unwrap(), "Exiting.");
    assert!(store.users().unwrap().is_empty());
  }

  #[traced_test]
  #[test]
  fn test_end_of_input_exits() {
    let (session, _) = run(&["4", "alice"]);
    assert_eq!(session.output.last().unwrap(), "Exiting.");
    assert!(!session.said("Added paper"));
  }

  #[traced_test]
  #[test]
  fn test_invalid_option() {
    let (session, _) = run(&["7", "", "6"]);
    assert_eq!(session.output.iter().filter(|l| *l == "Invalid option, try again.").count(), 2);
  }

  #[traced_test]
  #[test]
  fn test_add_paper_creates_tag_once() {
    let (session, store) =
      run(&["4", "alice", "reading", "1234.5678", "4", "alice", "reading", "1234.5678", "6"]);
    assert_eq!(session.output.iter().filter(|l| l.contains("Creating it.")).count(), 1);
    assert!(session.said("Added paper '1234.5678' to tag 'reading' for user 'alice'."));
    assert!(session.said("Paper '1234.5678' is already in tag 'reading' for user 'alice'."));
    assert_eq!(store.user_tags("alice").unwrap().unwrap()["reading"].len(), 1);
  }

  #[traced_test]
  #[test]
  fn test_remove_paper_twice() {
    let (session, store) = run(&[
      "4", "alice", "reading", "1234.5678", "5", "alice", "reading", "1234.5678", "5", "alice",
      "reading", "1234.5678", "6",
    ]);
    assert!(session.said("Removed paper '1234.5678' from tag 'reading' for user 'alice'."));
    assert!(session.said("Paper '1234.5678' not found in tag 'reading' for user 'alice'."));
    assert!(store.user_tags("alice").unwrap().unwrap()["reading"].is_empty());
  }

  #[traced_test]
  #[test]
  fn test_view_and_list() {
    let (session, _) = run(&[
      "2", "nobody", "3", "alice", "later", "3", "alice", "later", "4", "bob", "reading", "2", "2",
      "bob", "1", "6",
    ]);
    assert!(session.said("User 'nobody' not found."));
    assert!(session.said("Added tag 'later' for user 'alice'."));
    assert!(session.said("Tag 'later' already exists for user 'alice'."));
    assert!(session.said("Tags for user 'bob':\n  reading (1 papers): [\"2\"]"));
    assert!(session.said("Users in tags DB:\n1. alice\n2. bob"));
  }

  #[traced_test]
  #[test]
  fn test_prompts_follow_menu_choice() {
    let (session, _) = run(&["3", "alice", "later", "6"]);
    assert_eq!(session.prompts, vec![
      "Enter option number",
      "Enter username",
      "Enter new tag name",
      "Enter option number"
    ]);
  }
}
