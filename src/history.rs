/// Submitted commands plus a recall cursor in `0..=len`, where `len` means
/// "fresh input, nothing recalled".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn push(&mut self, command: impl Into<String>) {
        let command = command.into();
        if command.trim().is_empty() {
            return;
        }
        self.entries.push(command);
        self.cursor = self.entries.len();
    }

    pub fn previous(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries[self.cursor].clone()
    }

    pub fn next(&mut self) -> String {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            return self.entries[self.cursor].clone();
        }
        self.cursor = self.entries.len();
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history(commands: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new();
        for command in commands {
            history.push(*command);
        }
        history
    }

    #[test]
    fn previous_walks_back_and_sticks_at_oldest() {
        let mut history = history(&["help", "ls", "date"]);
        assert_eq!(history.previous(), "date");
        assert_eq!(history.previous(), "ls");
        assert_eq!(history.previous(), "help");
        assert_eq!(history.previous(), "help");
        assert_eq!(history.previous(), "help");
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn next_past_newest_is_always_empty() {
        let mut history = history(&["help", "ls"]);
        history.previous();
        history.previous();
        assert_eq!(history.next(), "ls");
        assert_eq!(history.next(), "");
        assert_eq!(history.next(), "");
        assert_eq!(history.cursor(), history.len());
    }

    #[test]
    fn recall_never_mutates_entries() {
        let mut history = history(&["whoami", "matrix"]);
        history.previous();
        history.next();
        history.previous();
        assert_eq!(history.entries(), ["whoami".to_string(), "matrix".to_string()]);
    }

    #[test]
    fn push_resets_cursor_to_fresh() {
        let mut history = history(&["a", "b", "c"]);
        history.previous();
        history.previous();
        history.push("d");
        assert_eq!(history.cursor(), 4);
        assert_eq!(history.previous(), "d");
    }

    #[test]
    fn empty_history_recalls_nothing() {
        let mut history = CommandHistory::new();
        assert_eq!(history.previous(), "");
        assert_eq!(history.next(), "");
        assert!(history.is_empty());
    }

    #[test]
    fn blank_submissions_are_ignored() {
        let mut history = history(&["   "]);
        assert_eq!(history.len(), 0);
        assert_eq!(history.previous(), "");
    }
}
