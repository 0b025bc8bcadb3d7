pub const MAX_PASTE_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Echo,
    Success,
    Info,
    Error,
    Code,
    Loading,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Plain => "terminal-line",
            Tone::Echo => "terminal-line command",
            Tone::Success => "terminal-line success",
            Tone::Info => "terminal-line info",
            Tone::Error => "terminal-line error",
            Tone::Code => "terminal-line code",
            Tone::Loading => "terminal-line loading",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub tone: Tone,
}

impl OutputLine {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Tone::Success, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Tone::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Tone::Error, text)
    }
}

pub type LineId = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptEntry {
    pub id: LineId,
    pub line: OutputLine,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: LineId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: OutputLine) -> LineId {
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id: self.next_id,
            line,
        });
        self.next_id
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = OutputLine>) {
        for line in lines {
            self.push(line);
        }
    }

    pub fn remove(&mut self, id: LineId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn last_id(&self) -> Option<LineId> {
        self.entries.last().map(|entry| entry.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteRejected {
    pub length: usize,
}

impl PasteRejected {
    pub fn line(&self) -> OutputLine {
        OutputLine::error(format!(
            "Pasted text too long. Maximum {MAX_PASTE_CHARS} characters allowed."
        ))
    }
}

pub fn check_paste(text: &str) -> Result<(), PasteRejected> {
    let length = text.chars().count();
    if length > MAX_PASTE_CHARS {
        return Err(PasteRejected { length });
    }
    Ok(())
}

pub fn welcome_lines(owner: &str) -> Vec<OutputLine> {
    vec![
        OutputLine::info(format!("Welcome to {owner}'s Portfolio Terminal!")),
        OutputLine::plain("Type \"help\" to see available commands."),
        OutputLine::plain("Tip: Try typing \"whoami\" to unlock the cyber theme."),
        OutputLine::plain(" "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_keep_increasing_across_clear() {
        let mut transcript = Transcript::new();
        let first = transcript.push(OutputLine::plain("one"));
        transcript.clear();
        let second = transcript.push(OutputLine::plain("two"));
        assert!(second > first);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last_id(), Some(second));
    }

    #[test]
    fn loading_lines_can_be_removed() {
        let mut transcript = Transcript::new();
        transcript.push(OutputLine::plain("Switching..."));
        let loading = transcript.push(OutputLine::new(Tone::Loading, "[...]"));
        assert!(transcript.remove(loading));
        assert!(!transcript.remove(loading));
        assert_eq!(transcript.entries()[0].line.text, "Switching...");
    }

    #[test]
    fn paste_guard_counts_characters() {
        assert!(check_paste(&"x".repeat(100)).is_ok());
        assert_eq!(
            check_paste(&"x".repeat(101)).unwrap_err(),
            PasteRejected { length: 101 }
        );
        assert!(check_paste(&"ア".repeat(100)).is_ok());
    }

    #[test]
    fn rejected_paste_renders_an_error() {
        let line = PasteRejected { length: 250 }.line();
        assert_eq!(line.tone, Tone::Error);
        assert_eq!(line.text, "Pasted text too long. Maximum 100 characters allowed.");
    }

    #[test]
    fn welcome_names_the_owner() {
        let lines = welcome_lines("Ranjit Pandey");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "Welcome to Ranjit Pandey's Portfolio Terminal!");
    }
}
