use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use dioxus::prelude::*;

use crate::announce::Announcer;
use crate::error::SiteError;
use crate::storage::{BrowserStorage, KeyValueStore};

pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Cyber,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Cyber => "cyber",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Cyber,
            Theme::Cyber => Theme::Light,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Cyber => "Light Mode",
        }
    }

    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "☾",
            Theme::Cyber => "☀",
        }
    }

    pub fn terminal_hint(self) -> &'static str {
        match self {
            Theme::Light => "$ whoami",
            Theme::Cyber => "$ default",
        }
    }

    pub fn features(self) -> &'static [&'static str] {
        match self {
            Theme::Cyber => &[
                "Matrix rain effect",
                "Green/black color scheme",
                "Terminal-style interface",
                "Glowing elements",
            ],
            Theme::Light => &[
                "Clean professional design",
                "Blue/white color scheme",
                "Responsive layout",
                "Accessible interface",
            ],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "cyber" => Ok(Theme::Cyber),
            other => Err(SiteError::UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    pub previous: Theme,
    pub theme: Theme,
}

impl ThemeChange {
    pub fn announcement(&self) -> String {
        format!("Theme changed to {} mode", self.theme)
    }
}

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&ThemeChange)>;

pub struct ThemeController<S> {
    store: S,
    current: Theme,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn load(store: S) -> Self {
        let current = store
            .read(THEME_STORAGE_KEY)
            .and_then(|value| value.parse::<Theme>().ok())
            .unwrap_or_default();
        Self {
            store,
            current,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn persisted(&self) -> Option<String> {
        self.store.read(THEME_STORAGE_KEY)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ThemeChange) + 'static) -> SubscriptionId {
        self.next_id += 1;
        self.listeners.push((self.next_id, Box::new(listener)));
        self.next_id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Re-selecting the current theme still notifies.
    pub fn set_theme(&mut self, theme: Theme) -> ThemeChange {
        let change = ThemeChange {
            previous: self.current,
            theme,
        };
        self.current = theme;
        if let Err(err) = self.store.write(THEME_STORAGE_KEY, theme.as_str()) {
            tracing::warn!("theme: could not persist {theme}: {err}");
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        change
    }

    pub fn toggle(&mut self) -> ThemeChange {
        self.set_theme(self.current.toggled())
    }
}

#[derive(Clone)]
pub struct ThemeHandle {
    controller: Rc<RefCell<ThemeController<BrowserStorage>>>,
    theme: Signal<Theme>,
}

impl ThemeHandle {
    pub fn current(&self) -> Theme {
        (self.theme)()
    }

    pub fn peek(&self) -> Theme {
        *self.theme.peek()
    }

    pub fn persisted(&self) -> Option<String> {
        self.controller.borrow().persisted()
    }

    pub fn set(&self, theme: Theme) {
        let change = self.controller.borrow_mut().set_theme(theme);
        tracing::info!("theme: {} -> {}", change.previous, change.theme);
    }

    pub fn toggle(&self) {
        self.set(self.peek().toggled());
    }
}

pub fn use_theme_provider(announcer: Announcer) -> ThemeHandle {
    let controller = use_hook(|| Rc::new(RefCell::new(ThemeController::load(BrowserStorage))));
    let theme = use_signal({
        let controller = controller.clone();
        move || controller.borrow().current()
    });

    let subscription = use_hook({
        let controller = controller.clone();
        move || {
            apply_to_document(*theme.peek());
            let mut theme_signal = theme;
            let mut announcer = announcer;
            controller.borrow_mut().subscribe(move |change| {
                theme_signal.set(change.theme);
                apply_to_document(change.theme);
                announcer.say(change.announcement());
            })
        }
    });
    use_drop({
        let controller = controller.clone();
        move || {
            controller.borrow_mut().unsubscribe(subscription);
        }
    });

    use_context_provider(|| ThemeHandle { controller, theme })
}

pub fn use_theme() -> ThemeHandle {
    use_context::<ThemeHandle>()
}

#[cfg(target_arch = "wasm32")]
fn apply_to_document(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("data-theme", theme.as_str());
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_to_document(_theme: Theme) {}

#[component]
pub fn ThemeToggleButton() -> Element {
    let theme = use_theme();
    let current = theme.current();
    let on_click = theme.clone();
    let on_key = theme;

    rsx! {
        button {
            id: "navThemeToggle",
            r#type: "button",
            class: "theme-toggle",
            aria_label: "Switch to {current.toggle_label()}",
            onclick: move |_| on_click.toggle(),
            onkeydown: move |event| {
                let activates = match event.key() {
                    Key::Enter => true,
                    Key::Character(value) => value == " ",
                    _ => false,
                };
                if activates {
                    event.prevent_default();
                    on_key.toggle();
                }
            },
            span { class: "theme-icon", aria_hidden: "true", "{current.toggle_icon()}" }
            span { class: "theme-label", "{current.toggle_label()}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_light_when_unset_or_garbage() {
        assert_eq!(ThemeController::load(MemoryStorage::new()).current(), Theme::Light);
        let store = MemoryStorage::with_value(THEME_STORAGE_KEY, "solarized");
        assert_eq!(ThemeController::load(store).current(), Theme::Light);
    }

    #[test]
    fn loads_persisted_cyber() {
        let store = MemoryStorage::with_value(THEME_STORAGE_KEY, "cyber");
        let controller = ThemeController::load(store);
        assert_eq!(controller.current(), Theme::Cyber);
        assert_eq!(controller.persisted().as_deref(), Some("cyber"));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" CYBER ".parse::<Theme>().unwrap(), Theme::Cyber);
        assert_eq!(
            "dark".parse::<Theme>().unwrap_err(),
            SiteError::UnknownTheme("dark".to_string())
        );
    }

    #[test]
    fn toggling_twice_round_trips_storage_and_attribute() {
        let attribute = Rc::new(RefCell::new(String::from("light")));
        let mut controller = ThemeController::load(MemoryStorage::with_value(THEME_STORAGE_KEY, "light"));
        let sink = attribute.clone();
        controller.subscribe(move |change| *sink.borrow_mut() = change.theme.to_string());

        controller.toggle();
        assert_eq!(attribute.borrow().as_str(), "cyber");
        assert_eq!(controller.persisted().as_deref(), Some("cyber"));

        controller.toggle();
        assert_eq!(attribute.borrow().as_str(), "light");
        assert_eq!(controller.persisted().as_deref(), Some("light"));
    }

    #[test]
    fn subscribers_receive_previous_and_next() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut controller = ThemeController::load(MemoryStorage::new());
        let sink = seen.clone();
        controller.subscribe(move |change| sink.borrow_mut().push(*change));

        controller.set_theme(Theme::Cyber);
        controller.set_theme(Theme::Cyber);

        assert_eq!(
            *seen.borrow(),
            vec![
                ThemeChange { previous: Theme::Light, theme: Theme::Cyber },
                ThemeChange { previous: Theme::Cyber, theme: Theme::Cyber },
            ]
        );
    }

    #[test]
    fn unsubscribed_listeners_stay_quiet() {
        let hits = Rc::new(RefCell::new(0));
        let mut controller = ThemeController::load(MemoryStorage::new());
        let sink = hits.clone();
        let id = controller.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.toggle();
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn storage_failure_still_switches_theme() {
        let mut controller = ThemeController::load(MemoryStorage::read_only());
        let change = controller.set_theme(Theme::Cyber);
        assert_eq!(change.theme, Theme::Cyber);
        assert_eq!(controller.current(), Theme::Cyber);
        assert_eq!(controller.persisted(), None);
    }

    #[test]
    fn affordance_labels_name_the_other_mode() {
        assert_eq!(Theme::Light.toggle_label(), "Dark Mode");
        assert_eq!(Theme::Cyber.terminal_hint(), "$ default");
        assert_eq!(
            ThemeChange { previous: Theme::Light, theme: Theme::Cyber }.announcement(),
            "Theme changed to cyber mode"
        );
    }
}
