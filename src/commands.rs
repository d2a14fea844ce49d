/// Available commands and autocomplete logic

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
  Campaigns,
  Contacts,
  Quit,
}

#[derive(Debug, Clone)]
pub struct Command {
  pub kind: CommandKind,
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    kind: CommandKind::Campaigns,
    name: "campaigns",
    aliases: &["c", "campaign"],
    description: "Email campaigns and delivery rates",
  },
  Command {
    kind: CommandKind::Contacts,
    name: "contacts",
    aliases: &["ct", "contact"],
    description: "Contacts and blacklist counts",
  },
  Command {
    kind: CommandKind::Quit,
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit brevo-dash",
  },
];

/// Get autocomplete suggestions for a given input, best match first
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = COMMANDS
    .iter()
    .filter_map(|cmd| match_priority(cmd, &input_lower).map(|p| (cmd, p)))
    .collect();

  // Stable sort keeps declaration order within a priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

/// Lower is better; `None` if the command doesn't match at all.
fn match_priority(cmd: &Command, input: &str) -> Option<u32> {
  if cmd.name == input {
    Some(0)
  } else if cmd.aliases.contains(&input) {
    Some(1)
  } else if cmd.name.starts_with(input) {
    Some(2)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(3)
  } else if cmd.name.contains(input) {
    Some(4)
  } else {
    None
  }
}

/// Resolve typed input to a command, preferring the highlighted suggestion
pub fn resolve(input: &str, selected: usize) -> Option<CommandKind> {
  let suggestions = get_suggestions(input);
  suggestions
    .get(selected)
    .or_else(|| suggestions.first())
    .map(|cmd| cmd.kind)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    assert_eq!(get_suggestions("").len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    assert_eq!(get_suggestions("contacts")[0].kind, CommandKind::Contacts);
  }

  #[test]
  fn test_alias_match() {
    assert_eq!(get_suggestions("c")[0].kind, CommandKind::Campaigns);
    assert_eq!(get_suggestions("ct")[0].kind, CommandKind::Contacts);
  }

  #[test]
  fn test_prefix_match() {
    assert_eq!(get_suggestions("cont")[0].kind, CommandKind::Contacts);
    assert_eq!(get_suggestions("camp")[0].kind, CommandKind::Campaigns);
  }

  #[test]
  fn test_fuzzy_match() {
    assert_eq!(get_suggestions("aign")[0].kind, CommandKind::Campaigns);
  }

  #[test]
  fn test_every_command_has_a_description() {
    assert!(COMMANDS.iter().all(|cmd| !cmd.description.is_empty()));
  }

  #[test]
  fn test_no_match() {
    assert!(get_suggestions("zzz").is_empty());
    assert_eq!(resolve("zzz", 0), None);
  }

  #[test]
  fn test_resolve_uses_selection() {
    // "co" is a prefix of "contacts" only; "c" prefixes all three names
    assert_eq!(resolve("co", 0), Some(CommandKind::Contacts));
    assert_eq!(resolve("", 2), Some(CommandKind::Quit));
    assert_eq!(resolve("quit", 5), Some(CommandKind::Quit));
  }
}
