use std::cmp::Ordering;

use crate::filter::Categorized;

pub const BLOG_CATEGORIES: &[&str] = &["all", "analysis", "tutorial", "tools", "career"];

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(&'static str),
    Heading(&'static str),
    Code {
        language: &'static str,
        code: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub title: &'static str,
    pub date: &'static str,
    pub slug: &'static str,
    pub excerpt: &'static str,
    pub reading_time: &'static str,
    pub category: [&'static str; 1],
    /// Placeholder card; listed but not counted or linked.
    pub coming_soon: bool,
    pub blocks: &'static [Block],
}

impl Categorized for Post {
    fn categories(&self) -> &[&'static str] {
        &self.category
    }

    fn counts(&self) -> bool {
        !self.coming_soon
    }
}

const POSTS: &[Post] = &[
    Post {
        title: "Reading a Phishing Kit Line by Line",
        date: "2025-09-14",
        slug: "reading-a-phishing-kit",
        excerpt: "Pulling apart a credential harvesting kit found on a compromised WordPress host: what it collects, where it sends it, and how it hides.",
        reading_time: "9 min",
        category: ["analysis"],
        coming_soon: false,
        blocks: &[
            Block::Paragraph("The archive showed up in an abandoned uploads directory. Two PHP files, a cloned login page, and a config file with a Telegram bot token."),
            Block::Heading("Where the credentials go"),
            Block::Paragraph("The submit handler posts to a local script that forwards everything to the bot, then redirects the victim to the real site so nothing looks wrong."),
            Block::Code {
                language: "python",
                code: "import re\n\ndef find_tokens(source):\n    # bot tokens are digits, a colon, then 35 url-safe chars\n    return re.findall(r\"\\d{8,10}:[\\w-]{35}\", source)",
            },
            Block::Paragraph("Reporting the token to the platform killed the exfiltration channel within the hour."),
        ],
    },
    Post {
        title: "Getting Started with Nmap",
        date: "2025-07-02",
        slug: "getting-started-with-nmap",
        excerpt: "A practical first tour of host discovery, port scanning and service detection, with the flags I actually use.",
        reading_time: "6 min",
        category: ["tutorial"],
        coming_soon: false,
        blocks: &[
            Block::Paragraph("Only scan networks you own or have written permission to test. Everything below runs against a lab VM."),
            Block::Heading("Install"),
            Block::Code {
                language: "bash",
                code: "sudo apt update\nsudo apt install -y nmap",
            },
            Block::Heading("A first scan"),
            Block::Code {
                language: "bash",
                code: "nmap -sV --top-ports 100 192.168.56.101",
            },
            Block::Paragraph("The -sV flag asks for service versions, which is usually where the interesting findings start."),
        ],
    },
    Post {
        title: "Writing a Port Scanner in Python",
        date: "2025-05-20",
        slug: "python-port-scanner",
        excerpt: "Sockets, timeouts and a thread pool: building a small TCP connect scanner to understand what the real tools do.",
        reading_time: "8 min",
        category: ["tutorial"],
        coming_soon: false,
        blocks: &[
            Block::Paragraph("A connect scan is just a loop that tries to open a TCP connection and notes which attempts succeed."),
            Block::Code {
                language: "python",
                code: "import socket\n\ndef is_open(host, port):\n    with socket.socket() as sock:\n        sock.settimeout(0.5)\n        return sock.connect_ex((host, port)) == 0\n\nif __name__ == \"__main__\":\n    print([p for p in range(20, 1025) if is_open(\"127.0.0.1\", p)])",
            },
            Block::Paragraph("Swap the list comprehension for a ThreadPoolExecutor once the single-threaded version works."),
        ],
    },
    Post {
        title: "My Recon Toolkit",
        date: "2025-03-11",
        slug: "my-recon-toolkit",
        excerpt: "The handful of tools that cover most of my reconnaissance work, and the git repos I keep them in.",
        reading_time: "4 min",
        category: ["tools"],
        coming_soon: false,
        blocks: &[
            Block::Paragraph("Most engagements start with the same three steps: enumerate subdomains, probe what answers, and screenshot everything."),
            Block::Code {
                language: "bash",
                code: "git clone https://github.com/projectdiscovery/subfinder\npip install --user httpx",
            },
            Block::Paragraph("Keeping the setup in a script means a fresh VM is ready in minutes."),
        ],
    },
    Post {
        title: "Breaking into Security from Development",
        date: "2025-01-08",
        slug: "breaking-into-security",
        excerpt: "What carried over from writing software, what did not, and the study plan that kept me going.",
        reading_time: "5 min",
        category: ["career"],
        coming_soon: false,
        blocks: &[
            Block::Paragraph("Reading code for a living turns out to be the best preparation for reading other people's mistakes."),
            Block::Heading("What I would do again"),
            Block::Paragraph("Pick one lab platform, finish its beginner path, and write up every box, even the embarrassing ones."),
        ],
    },
    Post {
        title: "Hardening SSH on a Fresh VPS",
        date: "2026-01-15",
        slug: "hardening-ssh",
        excerpt: "Keys only, no root, rate limits and a short audit checklist.",
        reading_time: "",
        category: ["tutorial"],
        coming_soon: true,
        blocks: &[],
    },
    Post {
        title: "Wireshark Filters Worth Memorising",
        date: "2026-02-01",
        slug: "wireshark-filters",
        excerpt: "Display filters that turn a noisy capture into an answer.",
        reading_time: "",
        category: ["tools"],
        coming_soon: true,
        blocks: &[],
    },
];

pub fn all_posts() -> Vec<Post> {
    let mut posts = POSTS.to_vec();
    posts.sort_by(|a, b| compare_dates(a.date, b.date));
    posts
}

pub fn get_post(slug: &str) -> Option<Post> {
    POSTS
        .iter()
        .find(|post| post.slug == slug && !post.coming_soon)
        .cloned()
}

fn compare_dates(left: &str, right: &str) -> Ordering {
    parse_date(right).cmp(&parse_date(left))
}

fn parse_date(date: &str) -> (i32, u32, u32) {
    let mut parts = date.split('-');
    let year = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    let month = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    let day = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    (year, month, day)
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn format_date(date: &str) -> String {
    let (year, month, day) = parse_date(date);
    let label = month
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index as usize))
        .copied()
        .unwrap_or("December");
    format!("{label} {day}, {year}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;
    use pretty_assertions::assert_eq;

    #[test]
    fn posts_are_sorted_newest_first() {
        let dates: Vec<_> = all_posts().iter().map(|post| parse_date(post.date)).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn tutorial_count_skips_placeholders() {
        let posts = all_posts();
        let mut filter = CategoryFilter::new(BLOG_CATEGORIES);
        filter.select("tutorial");
        let expected = posts
            .iter()
            .filter(|post| post.category[0] == "tutorial" && !post.coming_soon)
            .count();
        assert_eq!(filter.visible_count(&posts), expected);
        assert_eq!(expected, 2);
    }

    #[test]
    fn every_post_uses_a_known_category() {
        for post in all_posts() {
            assert!(BLOG_CATEGORIES[1..].contains(&post.category[0]), "{}", post.slug);
        }
    }

    #[test]
    fn placeholders_have_no_page() {
        assert!(get_post("hardening-ssh").is_none());
        assert_eq!(get_post("python-port-scanner").map(|post| post.title), Some("Writing a Port Scanner in Python"));
    }

    #[test]
    fn dates_render_long_form() {
        assert_eq!(format_date("2025-07-02"), "July 2, 2025");
        assert_eq!(format_date("garbage"), "December 0, 0");
    }
}
