use crate::filter::Categorized;

pub const PROJECT_CATEGORIES: &[&str] = &["all", "security", "web", "tools", "automation"];

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub categories: &'static [&'static str],
    pub stack: &'static [&'static str],
    pub repository: Option<&'static str>,
    pub screenshot: Option<&'static str>,
}

impl Categorized for Project {
    fn categories(&self) -> &[&'static str] {
        self.categories
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "port-scanner",
        title: "Threaded Port Scanner",
        summary: "TCP connect scanner with banner grabbing, service guesses and JSON reports.",
        categories: &["security", "tools"],
        stack: &["Python", "socket", "concurrent.futures"],
        repository: Some("https://github.com/lykos/port-scanner"),
        screenshot: Some("/projects/port-scanner.svg"),
    },
    Project {
        id: "phish-triage",
        title: "Phishing Triage Bot",
        summary: "Parses reported emails, extracts indicators and checks them against threat feeds.",
        categories: &["security", "automation"],
        stack: &["Python", "IMAP", "VirusTotal API"],
        repository: Some("https://github.com/lykos/phish-triage"),
        screenshot: None,
    },
    Project {
        id: "portfolio",
        title: "This Portfolio",
        summary: "Static site with a theme switcher, a command terminal and a canvas rain effect.",
        categories: &["web"],
        stack: &["Rust", "Dioxus", "WebAssembly"],
        repository: Some("https://github.com/lykos/portfolio"),
        screenshot: Some("/projects/portfolio.svg"),
    },
    Project {
        id: "header-audit",
        title: "Security Header Auditor",
        summary: "Browser extension that grades a page's security headers and explains each miss.",
        categories: &["security", "web", "tools"],
        stack: &["JavaScript", "WebExtensions"],
        repository: None,
        screenshot: Some("/projects/header-audit.svg"),
    },
    Project {
        id: "backup-rotator",
        title: "Backup Rotator",
        summary: "Cron-driven snapshot rotation with integrity checks and failure alerts.",
        categories: &["automation", "tools"],
        stack: &["Bash", "rsync", "systemd timers"],
        repository: Some("https://github.com/lykos/backup-rotator"),
        screenshot: None,
    },
];

pub fn project_by_id(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;
    use pretty_assertions::assert_eq;

    #[test]
    fn membership_is_exact() {
        let mut filter = CategoryFilter::new(PROJECT_CATEGORIES);
        filter.select("web");
        let ids: Vec<_> = PROJECTS
            .iter()
            .filter(|project| filter.shows(*project))
            .map(|project| project.id)
            .collect();
        assert_eq!(ids, vec!["portfolio", "header-audit"]);
    }

    #[test]
    fn every_project_counts_under_all() {
        let filter = CategoryFilter::new(PROJECT_CATEGORIES);
        assert_eq!(filter.visible_count(PROJECTS), PROJECTS.len());
    }

    #[test]
    fn ids_are_unique_and_resolvable() {
        for project in PROJECTS {
            assert_eq!(project_by_id(project.id).map(|found| found.title), Some(project.title));
        }
        assert!(project_by_id("missing").is_none());
    }
}
