use crate::transcript::OutputLine;

pub const KONAMI_SEQUENCE: [&str; 11] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
    "Enter",
];

pub const KONAMI_DELAY_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KonamiTracker {
    progress: usize,
}

impl KonamiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Returns `true` when `key` completes the sequence. An extra `ArrowUp`
    /// keeps the opening pair; any other wrong key starts over.
    pub fn feed(&mut self, key: &str) -> bool {
        if KONAMI_SEQUENCE[self.progress] == key {
            self.progress += 1;
        } else if KONAMI_SEQUENCE[0] == key {
            self.progress = if self.progress == 2 { 2 } else { 1 };
        } else {
            self.progress = 0;
        }
        if self.progress == KONAMI_SEQUENCE.len() {
            self.progress = 0;
            return true;
        }
        false
    }
}

pub fn unlock_lines() -> Vec<OutputLine> {
    vec![
        OutputLine::success("🎮 Konami code activated! Secret mode unlocked!"),
        OutputLine::plain("Initializing advanced features..."),
    ]
}

pub fn unlocked_line() -> OutputLine {
    OutputLine::plain("Cyber theme activated with enhanced effects!")
}

pub fn is_terminal_chord(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key == "`"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed_all(tracker: &mut KonamiTracker, keys: &[&str]) -> Vec<bool> {
        keys.iter().map(|key| tracker.feed(key)).collect()
    }

    #[test]
    fn full_sequence_fires_once_and_resets() {
        let mut tracker = KonamiTracker::new();
        let fired = feed_all(&mut tracker, &KONAMI_SEQUENCE);
        assert_eq!(fired.iter().filter(|hit| **hit).count(), 1);
        assert_eq!(fired.last(), Some(&true));
        assert_eq!(tracker.progress(), 0);
    }

    #[test]
    fn wrong_key_drops_progress() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowDown"]);
        assert!(!tracker.feed("x"));
        assert_eq!(tracker.progress(), 0);
    }

    #[test]
    fn three_ups_then_the_rest_still_fire() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowUp"]);
        assert_eq!(tracker.progress(), 2);
        let rest = &KONAMI_SEQUENCE[2..];
        assert_eq!(feed_all(&mut tracker, rest).last(), Some(&true));
    }

    #[test]
    fn up_after_deeper_progress_restarts_from_one() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &["ArrowUp", "ArrowUp", "ArrowDown"]);
        assert!(!tracker.feed("ArrowUp"));
        assert_eq!(tracker.progress(), 1);
        assert_eq!(feed_all(&mut tracker, &KONAMI_SEQUENCE[1..]).last(), Some(&true));
    }

    #[test]
    fn letters_are_case_sensitive() {
        let mut tracker = KonamiTracker::new();
        feed_all(&mut tracker, &KONAMI_SEQUENCE[..8]);
        assert!(!tracker.feed("B"));
        assert_eq!(tracker.progress(), 0);
    }

    #[test]
    fn chord_needs_a_modifier() {
        assert!(is_terminal_chord("`", true, false));
        assert!(is_terminal_chord("`", false, true));
        assert!(!is_terminal_chord("`", false, false));
        assert!(!is_terminal_chord("~", true, false));
    }
}
