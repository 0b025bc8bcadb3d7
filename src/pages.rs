use dioxus::prelude::*;
use dioxus_router::Link;

use crate::announce::{use_announcer, Announcer};
use crate::clock::sleep_ms;
use crate::config::use_site_config;
use crate::dom::{current_hash, current_href, replace_url, use_document_listener};
use crate::filter::{
    category_from_hash, category_from_query, category_label, project_announcement,
    project_location, CategoryFilter, ALL,
};
use crate::lazy_image::LazyImage;
use crate::nav::{AnchorLink, TryTerminalButton};
use crate::projects::{project_by_id, PROJECTS, PROJECT_CATEGORIES};
use crate::routes::Route;

const DEEP_LINK_DELAY_MS: u32 = 100;
const HIGHLIGHT_MS: u32 = 2000;

#[component]
pub fn FilterButtons(
    categories: &'static [&'static str],
    active: &'static str,
    class: &'static str,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "filter-controls", role: "tablist", aria_label: "Filter by category",
            for category in categories.iter().copied() {
                button {
                    key: "{category}",
                    r#type: "button",
                    role: "tab",
                    class: "{class}",
                    class: if category == active { "active" },
                    aria_selected: "{category == active}",
                    "data-category": category,
                    onclick: move |_| on_select.call(category.to_string()),
                    "{category_label(category)}"
                }
            }
        }
    }
}

#[component]
pub fn HomePage() -> Element {
    let config = use_site_config();
    rsx! {
        document::Title { "{config.site_title}" }
        document::Meta { name: "description", content: "Cybersecurity portfolio, projects and write-ups." }
        section { class: "hero",
            p { class: "hero-kicker", "Hi, I'm" }
            h1 { class: "hero-title", "{config.owner}" }
            p { class: "hero-subtitle", "Aspiring ethical hacker and software developer." }
            div { class: "hero-actions",
                Link { to: Route::Projects {}, class: "btn btn-primary", "View projects" }
                AnchorLink { href: "#skills".to_string(), class: Some("btn btn-outline".to_string()), "Skills" }
                TryTerminalButton {}
            }
        }
        section { id: "skills", class: "skills",
            h2 { "Skills" }
            ul { class: "skills-list",
                li { "Network security" }
                li { "Python scripting" }
                li { "Web application security" }
                li { "Nmap, Wireshark, Metasploit" }
                li { "Rust and WebAssembly" }
            }
        }
    }
}

#[component]
pub fn AboutPage() -> Element {
    let config = use_site_config();
    rsx! {
        document::Title { "About | {config.site_title}" }
        section { class: "page-header",
            h1 { "About" }
        }
        section { class: "about",
            p {
                "{config.owner} is a cybersecurity enthusiast and software developer, currently "
                "learning penetration testing and the tools of the trade."
            }
            p {
                "Open the terminal with Ctrl + ` and type "
                code { "whoami" }
                " for a different view of this site."
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        section { class: "page-header",
            h1 { "404" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, class: "btn btn-outline", "Go home" }
        }
    }
}

fn initial_project_filter() -> CategoryFilter {
    let mut filter = CategoryFilter::new(PROJECT_CATEGORIES);
    if let Some(category) = current_href().as_deref().and_then(category_from_query) {
        filter.select(&category);
    }
    filter
}

fn apply_project_filter(mut filter: Signal<CategoryFilter>, mut announcer: Announcer, raw: &str) {
    let selected = filter.with_mut(|filter| filter.select(raw));
    let count = filter.peek().visible_count(PROJECTS);
    announcer.say(project_announcement(count, selected));
    let Some(href) = current_href() else {
        return;
    };
    match project_location(&href, selected).and_then(|next| replace_url(&next)) {
        Ok(()) => tracing::debug!("projects: filter {selected}"),
        Err(err) => tracing::warn!("projects: {err}"),
    }
}

#[component]
pub fn ProjectsPage() -> Element {
    let config = use_site_config();
    let announcer = use_announcer();
    let filter = use_signal(initial_project_filter);
    let mut highlighted = use_signal(|| None::<&'static str>);

    use_document_listener("keydown", move |_event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let Ok(event) = _event.dyn_into::<web_sys::KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" && filter.peek().active() != ALL {
                apply_project_filter(filter, announcer, ALL);
            }
        }
    });

    use_hook(move || {
        let Some(project) = category_from_hash(&current_hash()).and_then(project_by_id) else {
            return;
        };
        spawn(async move {
            sleep_ms(DEEP_LINK_DELAY_MS).await;
            highlighted.set(Some(project.id));
            crate::dom::scroll_into_view(project.id);
            crate::dom::focus_by_id(project.id);
            sleep_ms(HIGHLIGHT_MS).await;
            highlighted.set(None);
        });
    });

    let active = filter();
    let focused = highlighted();

    rsx! {
        document::Title { "Projects | {config.site_title}" }
        document::Meta { name: "description", content: "Security tools, automation and web projects." }
        section { class: "page-header",
            h1 { "Projects" }
            p { class: "page-subtitle", "Things I have built while learning." }
        }
        FilterButtons {
            categories: PROJECT_CATEGORIES,
            active: active.active(),
            class: "category-btn",
            on_select: move |category: String| apply_project_filter(filter, announcer, &category),
        }
        div { id: "all-projects", class: "projects-list",
            for project in PROJECTS.iter() {
                article {
                    key: "{project.id}",
                    id: project.id,
                    class: "project-detail",
                    class: if !active.shows(project) { "hidden" },
                    class: if focused == Some(project.id) { "highlight" },
                    tabindex: "-1",
                    aria_hidden: (!active.shows(project)).then_some("true"),
                    "data-categories": project.categories.join(" "),
                    if let Some(screenshot) = project.screenshot {
                        div { class: "project-screenshot",
                            LazyImage {
                                src: screenshot.to_string(),
                                alt: format!("Screenshot of {}", project.title),
                                class: None,
                            }
                        }
                    }
                    h2 { "{project.title}" }
                    p { "{project.summary}" }
                    ul { class: "project-stack",
                        for item in project.stack.iter() {
                            li { key: "{item}", "{item}" }
                        }
                    }
                    ul { class: "project-tags",
                        for category in project.categories.iter() {
                            li { key: "{category}", "{category_label(category)}" }
                        }
                    }
                    if let Some(repository) = project.repository {
                        a { href: repository, target: "_blank", rel: "noopener noreferrer", "Source" }
                    }
                }
            }
        }
    }
}
