use dioxus::prelude::*;
use dioxus_router::{use_route, Link};

use crate::dom::use_document_listener;
use crate::routes::Route;
use crate::terminal::{use_terminal, TerminalToggleButton};
use crate::theme::ThemeToggleButton;

pub const MENU_TOGGLE_ID: &str = "menuToggle";
pub const NAV_LINKS_ID: &str = "navLinks";
pub const ANCHOR_FOCUS_MS: u32 = 1000;

pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

pub fn is_active(link: &str, current: &str) -> bool {
    normalize_path(link) == normalize_path(current)
}

pub fn scroll_offset(rect_top: f64, page_y: f64, header_height: f64) -> f64 {
    rect_top + page_y - header_height
}

pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() || id == "!" {
        return None;
    }
    Some(id)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn icon(self) -> &'static str {
        if self.open {
            "✕"
        } else {
            "☰"
        }
    }
}

const NAV_ITEMS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/projects", "Projects"),
    ("/blog", "Blog"),
    ("/contact", "Contact"),
];

fn link_class(active: bool) -> &'static str {
    if active {
        "nav-link active"
    } else {
        "nav-link"
    }
}

fn nav_route(path: &str) -> Route {
    match path {
        "/about" => Route::About {},
        "/projects" => Route::Projects {},
        "/blog" => Route::Blog {},
        "/contact" => Route::Contact {},
        _ => Route::Home {},
    }
}

#[component]
pub fn SiteHeader() -> Element {
    let current = use_route::<Route>().to_string();
    let mut menu = use_signal(MenuState::default);
    let config = crate::config::use_site_config();

    use_document_listener("click", move |_event| {
        if !menu.peek().is_open() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let inside = _event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .and_then(|element| element.closest(".nav-links, .menu-toggle").ok().flatten())
                .is_some();
            if inside {
                return;
            }
        }
        menu.set(MenuState::closed());
    });

    use_document_listener("keydown", move |_event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let Ok(event) = _event.dyn_into::<web_sys::KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" && menu.peek().is_open() {
                menu.set(MenuState::closed());
                crate::dom::focus_by_id(MENU_TOGGLE_ID);
            }
        }
    });

    let state = menu();
    let links: Vec<(&str, &str, bool)> = NAV_ITEMS
        .iter()
        .map(|(path, label)| (*path, *label, is_active(path, &current)))
        .collect();
    let links_class = if state.is_open() {
        "nav-links active"
    } else {
        "nav-links"
    };

    rsx! {
        header { class: "header",
            nav { class: "navbar", aria_label: "Primary",
                Link { to: Route::Home {}, class: "logo", "{config.site_title}" }
                button {
                    id: MENU_TOGGLE_ID,
                    r#type: "button",
                    class: "menu-toggle",
                    aria_label: "Toggle navigation",
                    aria_controls: NAV_LINKS_ID,
                    aria_expanded: "{state.is_open()}",
                    onclick: move |_| {
                        let next = menu.peek().toggled();
                        menu.set(next);
                    },
                    span { aria_hidden: "true", "{state.icon()}" }
                }
                ul { id: NAV_LINKS_ID, class: links_class,
                    for (path, label, active) in links {
                        li { key: "{path}",
                            Link {
                                to: nav_route(path),
                                class: link_class(active),
                                aria_current: active.then_some("page"),
                                onclick: move |_| menu.set(MenuState::closed()),
                                "{label}"
                            }
                        }
                    }
                    li { ThemeToggleButton {} }
                    li { TerminalToggleButton {} }
                }
            }
        }
    }
}

#[component]
pub fn SiteFooter() -> Element {
    let config = crate::config::use_site_config();
    let year = crate::clock::current_year();
    rsx! {
        footer { class: "footer",
            p {
                "© "
                span { id: "currentYear", "{year}" }
                " {config.owner}. Built with Rust and Dioxus."
            }
            p { class: "footer-hint", "Press Ctrl + ` to open the terminal." }
        }
    }
}

#[component]
pub fn AnchorLink(href: String, class: Option<String>, children: Element) -> Element {
    let class = class.unwrap_or_default();
    rsx! {
        a {
            href: "{href}",
            class: "{class}",
            onclick: move |event| {
                let Some(id) = anchor_target(&href) else {
                    return;
                };
                event.prevent_default();
                if let Err(err) = crate::dom::scroll_below_header(id) {
                    tracing::debug!("nav: {err}");
                    return;
                }
                let _ = crate::dom::push_hash(&href);
                focus_briefly(id.to_string());
            },
            {children}
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn focus_briefly(id: String) {
    let Some(target) = crate::dom::element_by_id(&id) else {
        return;
    };
    let _ = target.set_attribute("tabindex", "-1");
    let _ = target.focus();
    spawn(async move {
        crate::clock::sleep_ms(ANCHOR_FOCUS_MS).await;
        let _ = target.remove_attribute("tabindex");
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn focus_briefly(_id: String) {}

#[component]
pub fn TryTerminalButton() -> Element {
    let terminal = use_terminal();
    rsx! {
        button {
            id: "tryTerminalBtn",
            r#type: "button",
            class: "btn btn-outline",
            onclick: move |_| terminal.open(),
            "Try the terminal"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trailing_slash_is_ignored_except_for_root() {
        assert_eq!(normalize_path("/blog/"), "/blog");
        assert_eq!(normalize_path("/"), "/");
        assert!(is_active("/projects/", "/projects"));
        assert!(!is_active("/", "/projects"));
    }

    #[test]
    fn anchors_skip_placeholders() {
        assert_eq!(anchor_target("#skills"), Some("skills"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("#!"), None);
        assert_eq!(anchor_target("/about"), None);
    }

    #[test]
    fn scroll_offset_leaves_room_for_header() {
        assert_eq!(scroll_offset(300.0, 1200.0, 80.0), 1420.0);
    }

    #[test]
    fn menu_toggle_flips_icon() {
        let open = MenuState::default().toggled();
        assert!(open.is_open());
        assert_eq!(open.icon(), "✕");
        assert_eq!(open.toggled(), MenuState::closed());
    }

    #[test]
    fn every_nav_item_maps_to_its_route() {
        for (path, _) in NAV_ITEMS {
            assert_eq!(nav_route(path).to_string(), path);
        }
    }
}
