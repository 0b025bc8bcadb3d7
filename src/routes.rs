use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, Router};

use crate::announce::{use_announcer_provider, LiveRegion};
use crate::blog::{BlogPage, BlogPostPage};
use crate::config::load_site_config;
use crate::contact::ContactPage;
use crate::nav::{SiteFooter, SiteHeader};
use crate::pages::{AboutPage, HomePage, NotFound, ProjectsPage};
use crate::rain::{use_rain_provider, RainLayer};
use crate::terminal::{use_terminal_provider, TerminalOverlay};
use crate::theme::{use_theme_provider, Theme};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CYBER_CSS: Asset = asset!("/assets/cyber-theme.css");

#[component]
pub fn App() -> Element {
    use_context_provider(load_site_config);
    let announcer = use_announcer_provider();
    let theme = use_theme_provider(announcer);
    use_rain_provider(crate::dom::prefers_reduced_motion());
    use_terminal_provider();

    let cyber = theme.current() == Theme::Cyber;
    let theme_color = if cyber { "#00ff41" } else { "#2563eb" };

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        if cyber {
            document::Link { rel: "stylesheet", href: CYBER_CSS }
        }
        document::Meta { name: "theme-color", content: theme_color }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Home {},
    #[route("/about")]
    About {},
    #[route("/projects")]
    Projects {},
    #[route("/blog")]
    Blog {},
    #[route("/blog/:slug")]
    BlogPost { slug: String },
    #[route("/contact")]
    Contact {},
    #[route("/:..segments")]
    Missing { segments: Vec<String> },
}

#[component]
fn SiteLayout() -> Element {
    rsx! {
        a { class: "skip-link", href: "#main", "Skip to content" }
        RainLayer {}
        SiteHeader {}
        main { id: "main", class: "main-content",
            Outlet::<Route> {}
        }
        SiteFooter {}
        TerminalOverlay {}
        LiveRegion {}
    }
}

#[component]
fn Home() -> Element {
    rsx! { HomePage {} }
}

#[component]
fn About() -> Element {
    rsx! { AboutPage {} }
}

#[component]
fn Projects() -> Element {
    rsx! { ProjectsPage {} }
}

#[component]
fn Blog() -> Element {
    rsx! { BlogPage {} }
}

#[component]
fn BlogPost(slug: String) -> Element {
    rsx! { BlogPostPage { slug } }
}

#[component]
fn Contact() -> Element {
    rsx! { ContactPage {} }
}

#[component]
fn Missing(segments: Vec<String>) -> Element {
    rsx! { NotFound { segments } }
}
