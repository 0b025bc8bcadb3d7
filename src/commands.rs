use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::history::CommandHistory;
use crate::rain::RainState;
use crate::theme::Theme;
use crate::transcript::{OutputLine, Tone};

pub const WHOAMI_DELAY_MS: u32 = 800;
pub const DEFAULT_DELAY_MS: u32 = 500;

#[derive(Clone, Debug)]
pub struct CommandContext<'a> {
    pub theme: Theme,
    pub saved_theme: Option<String>,
    pub rain: RainState,
    pub now: String,
    pub config: &'a SiteConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub theme: Theme,
    pub delay_ms: u32,
    pub then: Vec<OutputLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Print(OutputLine),
    Clear,
    Close,
    StartRain,
    StopRain,
    Transition(Transition),
}

impl Step {
    fn plain(text: impl Into<String>) -> Self {
        Step::Print(OutputLine::plain(text))
    }
}

type Handler = fn(&CommandContext<'_>) -> Result<Vec<Step>, SiteError>;

pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: Handler,
}

pub static COMMANDS: &[CommandEntry] = &[
    CommandEntry { name: "whoami", summary: "Switch to cybersecurity theme", run: whoami },
    CommandEntry { name: "default", summary: "Return to normal theme", run: default_theme },
    CommandEntry { name: "help", summary: "Show this help message", run: help },
    CommandEntry { name: "clear", summary: "Clear terminal", run: clear },
    CommandEntry { name: "exit", summary: "Close terminal", run: exit },
    CommandEntry { name: "ls", summary: "List directory contents", run: ls },
    CommandEntry { name: "pwd", summary: "Print working directory", run: pwd },
    CommandEntry { name: "date", summary: "Show current date and time", run: date },
    CommandEntry { name: "neofetch", summary: "Show system information", run: neofetch },
    CommandEntry { name: "matrix", summary: "Toggle matrix rain effect", run: matrix },
    CommandEntry { name: "theme", summary: "Show current theme info", run: theme_info },
    CommandEntry { name: "about", summary: "About this portfolio", run: about },
    CommandEntry { name: "contact", summary: "Contact information", run: contact },
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatcher {
    history: CommandHistory,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    /// Returns `None` for blank input, which records and prints nothing.
    pub fn process(&mut self, raw: &str, context: &CommandContext<'_>) -> Option<Vec<Step>> {
        self.process_with(COMMANDS, raw, context)
    }

    pub fn process_with(
        &mut self,
        table: &[CommandEntry],
        raw: &str,
        context: &CommandContext<'_>,
    ) -> Option<Vec<Step>> {
        let command = raw.trim().to_lowercase();
        if command.is_empty() {
            return None;
        }
        self.history.push(command.clone());

        let mut steps = vec![Step::Print(OutputLine::new(Tone::Echo, command.clone()))];
        match resolve(table, &command, context) {
            Ok(resolved) => steps.extend(resolved),
            Err(err) => {
                tracing::warn!("terminal: {command} failed: {err}");
                steps.push(Step::Print(OutputLine::error(format!(
                    "Error executing command: {err}"
                ))));
            }
        }
        Some(steps)
    }
}

fn resolve(
    table: &[CommandEntry],
    command: &str,
    context: &CommandContext<'_>,
) -> Result<Vec<Step>, SiteError> {
    if let Some(entry) = table.iter().find(|entry| entry.name == command) {
        return (entry.run)(context);
    }
    if let Some(message) = command.strip_prefix("echo ") {
        return Ok(vec![Step::plain(message)]);
    }
    Ok(vec![Step::Print(OutputLine::error(format!(
        "Command not found: {command}. Type \"help\" for available commands."
    )))])
}

fn whoami(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![
        Step::plain("Switching to cybersecurity theme..."),
        Step::Transition(Transition {
            theme: Theme::Cyber,
            delay_ms: WHOAMI_DELAY_MS,
            then: vec![
                OutputLine::success("✓ Theme activated successfully!"),
                OutputLine::plain("Matrix effect initialized."),
                OutputLine::plain("Type \"default\" to return to normal theme."),
                OutputLine::plain("Type \"matrix\" to toggle matrix effect."),
            ],
        }),
    ])
}

fn default_theme(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![
        Step::plain("Returning to default theme..."),
        Step::Transition(Transition {
            theme: Theme::Light,
            delay_ms: DEFAULT_DELAY_MS,
            then: vec![OutputLine::success("✓ Theme restored successfully!")],
        }),
    ])
}

pub fn help_lines(table: &[CommandEntry]) -> Vec<OutputLine> {
    let mut lines = vec![OutputLine::plain("Available commands:")];
    lines.extend(
        table
            .iter()
            .map(|entry| OutputLine::new(Tone::Code, format!("{} - {}", entry.name, entry.summary))),
    );
    lines
}

fn help(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(help_lines(COMMANDS).into_iter().map(Step::Print).collect())
}

fn clear(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![
        Step::Clear,
        Step::Print(OutputLine::info("Terminal cleared.")),
    ])
}

fn exit(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![Step::Close])
}

fn ls(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    const LISTING: [&str; 15] = [
        "Portfolio Directory Structure:",
        "/                   - Home page",
        "about/              - About me page",
        "projects/           - Projects showcase",
        "blog/               - Security write-ups",
        "contact/            - Contact form",
        "assets/             - Stylesheets & site config",
        "├── main.css        - Main styles",
        "├── cyber-theme.css - Cyber theme styles",
        "└── site.json       - Owner & contact details",
        "src/                - Rust sources",
        "├── commands.rs     - Terminal commands",
        "├── theme.rs        - Theme controller",
        "└── rain.rs         - Matrix rain effect",
        "target/             - Build output",
    ];
    Ok(LISTING.iter().map(|line| Step::plain(*line)).collect())
}

fn pwd(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![Step::plain(context.config.working_directory.clone())])
}

fn date(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    Ok(vec![Step::plain(context.now.clone())])
}

fn neofetch(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    const CARD: [&str; 10] = [
        "┌──────────────────────────────────────┐",
        "│ Lykos's Cybersecurity Portfolio      │",
        "├──────────────────────────────────────┤",
        "│ OS: Kali Linux 2025.4                │",
        "│ Shell: zsh 5.9                       │",
        "│ Theme: Professional / Cyber          │",
        "│ Terminal: Web Terminal v1.0          │",
        "│ Uptime: Always learning              │",
        "│ Packages: Updating security projects │",
        "└──────────────────────────────────────┘",
    ];
    Ok(CARD.iter().map(|line| Step::plain(*line)).collect())
}

fn matrix(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    if context.theme != Theme::Cyber {
        return Ok(vec![
            Step::Print(OutputLine::error("Matrix effect only available in cyber theme.")),
            Step::plain("Type \"whoami\" to switch to cyber theme first."),
        ]);
    }
    Ok(match context.rain {
        RainState::Running => vec![Step::StopRain, Step::plain("Matrix effect stopped.")],
        RainState::Idle => vec![Step::StartRain, Step::plain("Matrix effect started.")],
        RainState::Unavailable => {
            vec![Step::Print(OutputLine::error("Matrix effect not available."))]
        }
    })
}

fn theme_info(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    let saved = context
        .saved_theme
        .clone()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "default (light)".to_string());
    let mut steps = vec![
        Step::plain(format!("Current theme: {}", context.theme)),
        Step::plain(format!("Theme saved: {saved}")),
        Step::plain("Features:"),
    ];
    steps.extend(
        context
            .theme
            .features()
            .iter()
            .map(|feature| Step::plain(format!("  • {feature}"))),
    );
    Ok(steps)
}

fn about(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    let lines = [
        format!("About {}:", context.config.owner),
        "Cybersecurity enthusiast, aspiring ethical hacker and Software Developer.".to_string(),
        "Currently learning penetration testing and security tools.".to_string(),
        "Currently learning react native".to_string(),
        String::new(),
        "Skills:".to_string(),
        "  • Network Security".to_string(),
        "  • Python Scripting".to_string(),
        "  • Web Application Security".to_string(),
        "  • Security Tools (Nmap, Wireshark, Metasploit)".to_string(),
        String::new(),
        "Visit about page for more information.".to_string(),
    ];
    Ok(lines.into_iter().map(Step::plain).collect())
}

fn contact(context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
    let config = context.config;
    let lines = [
        "Contact Information:".to_string(),
        format!("  • Email: {}", config.contact_email),
        format!("  • Security: {}", config.security_email),
        format!("  • GitHub: {}", config.github),
        format!("  • LinkedIn: {}", config.linkedin),
        String::new(),
        "PGP Key available on contact page.".to_string(),
        "Type \"exit\" to close terminal and visit contact page".to_string(),
    ];
    Ok(lines.into_iter().map(Step::plain).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(config: &SiteConfig) -> CommandContext<'_> {
        CommandContext {
            theme: Theme::Light,
            saved_theme: None,
            rain: RainState::Idle,
            now: "Friday, October 16, 2026 at 10:00:00 AM UTC".to_string(),
            config,
        }
    }

    fn printed(steps: &[Step]) -> Vec<String> {
        steps
            .iter()
            .filter_map(|step| match step {
                Step::Print(line) => Some(line.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn input_is_trimmed_and_case_folded() {
        let config = SiteConfig::default();
        let mut loud = Dispatcher::new();
        let mut quiet = Dispatcher::new();
        let shouted = loud.process("  HELP  ", &context(&config)).unwrap();
        let plain = quiet.process("help", &context(&config)).unwrap();
        assert_eq!(shouted, plain);
        assert_eq!(loud.history().entries(), ["help".to_string()]);
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let config = SiteConfig::default();
        let mut dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.process("   ", &context(&config)), None);
        assert!(dispatcher.history().is_empty());
    }

    #[test]
    fn unknown_command_prints_one_line_and_records_history() {
        let config = SiteConfig::default();
        let mut dispatcher = Dispatcher::new();
        let steps = dispatcher.process("foobar", &context(&config)).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Print(OutputLine::new(Tone::Echo, "foobar")),
                Step::Print(OutputLine::error(
                    "Command not found: foobar. Type \"help\" for available commands."
                )),
            ]
        );
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[test]
    fn echo_prints_the_remainder_verbatim() {
        let config = SiteConfig::default();
        let mut dispatcher = Dispatcher::new();
        let steps = dispatcher.process("echo <b>Hi</b>", &context(&config)).unwrap();
        assert_eq!(printed(&steps), vec!["echo <b>hi</b>", "<b>hi</b>"]);
    }

    #[test]
    fn handler_errors_become_error_lines() {
        fn broken(_context: &CommandContext<'_>) -> Result<Vec<Step>, SiteError> {
            Err(SiteError::MissingElement("disk"))
        }
        let table = [CommandEntry { name: "broken", summary: "", run: broken }];
        let config = SiteConfig::default();
        let mut dispatcher = Dispatcher::new();

        let steps = dispatcher.process_with(&table, "broken", &context(&config)).unwrap();
        assert_eq!(
            steps.last(),
            Some(&Step::Print(OutputLine::error("Error executing command: disk is not available")))
        );
        assert!(dispatcher.process_with(&table, "broken", &context(&config)).is_some());
        assert_eq!(dispatcher.history().len(), 2);
    }

    #[test]
    fn whoami_schedules_cyber_with_confirmation() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("whoami", &context(&config)).unwrap();
        let Some(Step::Transition(transition)) = steps.last() else {
            panic!("expected a transition, got {steps:?}");
        };
        assert_eq!(transition.theme, Theme::Cyber);
        assert_eq!(transition.delay_ms, WHOAMI_DELAY_MS);
        assert_eq!(transition.then[0].text, "✓ Theme activated successfully!");
        assert_eq!(transition.then[0].tone, Tone::Success);
    }

    #[test]
    fn default_schedules_light() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("default", &context(&config)).unwrap();
        assert_eq!(printed(&steps), vec!["default", "Returning to default theme..."]);
        assert_eq!(
            steps.last(),
            Some(&Step::Transition(Transition {
                theme: Theme::Light,
                delay_ms: DEFAULT_DELAY_MS,
                then: vec![OutputLine::success("✓ Theme restored successfully!")],
            }))
        );
    }

    #[test]
    fn matrix_needs_the_cyber_theme() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("matrix", &context(&config)).unwrap();
        assert!(!steps.contains(&Step::StartRain));
        assert_eq!(
            printed(&steps)[1..].to_vec(),
            vec![
                "Matrix effect only available in cyber theme.".to_string(),
                "Type \"whoami\" to switch to cyber theme first.".to_string(),
            ]
        );
    }

    #[test]
    fn matrix_toggles_rain_in_cyber() {
        let config = SiteConfig::default();
        let mut cyber = context(&config);
        cyber.theme = Theme::Cyber;

        cyber.rain = RainState::Running;
        let steps = Dispatcher::new().process("matrix", &cyber).unwrap();
        assert_eq!(steps[1], Step::StopRain);

        cyber.rain = RainState::Idle;
        let steps = Dispatcher::new().process("matrix", &cyber).unwrap();
        assert_eq!(steps[1], Step::StartRain);

        cyber.rain = RainState::Unavailable;
        let steps = Dispatcher::new().process("matrix", &cyber).unwrap();
        assert_eq!(printed(&steps)[1], "Matrix effect not available.");
    }

    #[test]
    fn theme_reports_saved_value_or_default() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("theme", &context(&config)).unwrap();
        let lines = printed(&steps);
        assert_eq!(lines[1], "Current theme: light");
        assert_eq!(lines[2], "Theme saved: default (light)");
        assert_eq!(lines[4], "  • Clean professional design");

        let mut saved = context(&config);
        saved.theme = Theme::Cyber;
        saved.saved_theme = Some("cyber".to_string());
        let lines = printed(&Dispatcher::new().process("theme", &saved).unwrap());
        assert_eq!(lines[2], "Theme saved: cyber");
        assert_eq!(lines[4], "  • Matrix rain effect");
    }

    #[test]
    fn clear_then_confirms() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("clear", &context(&config)).unwrap();
        assert_eq!(steps[1], Step::Clear);
        assert_eq!(steps[2], Step::Print(OutputLine::info("Terminal cleared.")));
    }

    #[test]
    fn help_lists_every_command() {
        let lines = help_lines(COMMANDS);
        assert_eq!(lines.len(), COMMANDS.len() + 1);
        assert_eq!(lines[1].text, "whoami - Switch to cybersecurity theme");
        assert!(lines[1..].iter().all(|line| line.tone == Tone::Code));
    }

    #[test]
    fn config_feeds_pwd_and_contact() {
        let config = SiteConfig {
            working_directory: "/srv/site".to_string(),
            github: "github.com/example".to_string(),
            ..SiteConfig::default()
        };
        let mut dispatcher = Dispatcher::new();
        assert_eq!(printed(&dispatcher.process("pwd", &context(&config)).unwrap())[1], "/srv/site");
        let contact = printed(&dispatcher.process("contact", &context(&config)).unwrap());
        assert!(contact.contains(&"  • GitHub: github.com/example".to_string()));
    }

    #[test]
    fn exit_closes_the_terminal() {
        let config = SiteConfig::default();
        let steps = Dispatcher::new().process("EXIT", &context(&config)).unwrap();
        assert_eq!(steps[1], Step::Close);
    }
}
