use std::sync::LazyLock;

use regex::Regex;

static PYTHON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<comment>#[^\n]*)|(?P<string>"[^"\n]*"|'[^'\n]*')|(?P<keyword>\b(?:def|class|import|from|as|if|else|elif|for|while|try|except|return|yield|async|await)\b)|(?P<constant>\b(?:self|True|False|None)\b)"#,
    )
    .expect("python highlight regex should compile")
});

static BASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<comment>#[^\n]*)|(?P<command>\b(?:sudo|apt|pip|git|python|bash)\b)|(?P<option>\B--?\w[\w-]*)")
        .expect("bash highlight regex should compile")
});

const GROUPS: [(&str, &str); 6] = [
    ("comment", "code-comment"),
    ("string", "code-string"),
    ("keyword", "code-keyword"),
    ("constant", "code-constant"),
    ("command", "code-command"),
    ("option", "code-option"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Python,
    Bash,
    Plain,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim_start_matches("language-") {
            "python" | "py" => Language::Python,
            "bash" | "sh" | "shell" => Language::Bash,
            _ => Language::Plain,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Language::Python => "language-python",
            Language::Bash => "language-bash",
            Language::Plain => "language-plain",
        }
    }

    fn pattern(self) -> Option<&'static Regex> {
        match self {
            Language::Python => Some(&*PYTHON),
            Language::Bash => Some(&*BASH),
            Language::Plain => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub class: Option<&'static str>,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            class: None,
        }
    }
}

pub fn highlight(code: &str, language: Language) -> Vec<Span> {
    let Some(pattern) = language.pattern() else {
        return vec![Span::plain(code)];
    };
    let mut spans = Vec::new();
    let mut cursor = 0;
    for captures in pattern.captures_iter(code) {
        let Some((text, class)) = GROUPS
            .iter()
            .find_map(|(group, class)| captures.name(group).map(|found| (found, *class)))
        else {
            continue;
        };
        if text.start() > cursor {
            spans.push(Span::plain(&code[cursor..text.start()]));
        }
        spans.push(Span {
            text: text.as_str().to_string(),
            class: Some(class),
        });
        cursor = text.end();
    }
    if cursor < code.len() {
        spans.push(Span::plain(&code[cursor..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classes(spans: &[Span]) -> Vec<(&str, &str)> {
        spans
            .iter()
            .filter_map(|span| span.class.map(|class| (span.text.as_str(), class)))
            .collect()
    }

    #[test]
    fn python_tokens() {
        let spans = highlight("def scan(self):\n    return \"open\"  # done", Language::Python);
        assert_eq!(
            classes(&spans),
            vec![
                ("def", "code-keyword"),
                ("self", "code-constant"),
                ("return", "code-keyword"),
                ("\"open\"", "code-string"),
                ("# done", "code-comment"),
            ]
        );
    }

    #[test]
    fn keywords_inside_words_are_left_alone() {
        let spans = highlight("classify = format_ifs", Language::Python);
        assert!(classes(&spans).is_empty());
    }

    #[test]
    fn strings_hide_their_contents() {
        let spans = highlight("print(\"import None\")", Language::Python);
        assert_eq!(classes(&spans), vec![("\"import None\"", "code-string")]);
    }

    #[test]
    fn bash_commands_and_options() {
        let spans = highlight("sudo apt-get install -y nmap --no-install", Language::Bash);
        assert_eq!(
            classes(&spans),
            vec![
                ("sudo", "code-command"),
                ("apt", "code-command"),
                ("-y", "code-option"),
                ("--no-install", "code-option"),
            ]
        );
    }

    #[test]
    fn spans_reassemble_the_source() {
        let source = "git clone repo && bash run.sh --fast # go";
        let joined: String = highlight(source, Language::Bash)
            .into_iter()
            .map(|span| span.text)
            .collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn plain_is_untouched() {
        assert_eq!(highlight("x = 1", Language::Plain), vec![Span::plain("x = 1")]);
        assert_eq!(Language::from_tag("language-sh"), Language::Bash);
    }
}
