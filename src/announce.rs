use dioxus::prelude::*;

use crate::clock::sleep_ms;

const ANNOUNCEMENT_TTL_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq)]
struct Announcement {
    id: u64,
    text: String,
}

/// Only writes signals, so raw DOM callbacks may call it.
#[derive(Clone, Copy, PartialEq)]
pub struct Announcer {
    current: Signal<Option<Announcement>>,
    counter: Signal<u64>,
}

impl Announcer {
    pub fn say(&mut self, text: impl Into<String>) {
        let id = *self.counter.peek() + 1;
        self.counter.set(id);
        self.current.set(Some(Announcement {
            id,
            text: text.into(),
        }));
    }
}

pub fn use_announcer_provider() -> Announcer {
    let current = use_signal(|| None::<Announcement>);
    let counter = use_signal(|| 0u64);
    use_context_provider(|| Announcer { current, counter })
}

pub fn use_announcer() -> Announcer {
    use_context::<Announcer>()
}

#[component]
pub fn LiveRegion() -> Element {
    let announcer = use_announcer();
    let mut current = announcer.current;

    use_effect(move || {
        let Some(id) = current.read().as_ref().map(|announcement| announcement.id) else {
            return;
        };
        spawn(async move {
            sleep_ms(ANNOUNCEMENT_TTL_MS).await;
            let expired = current
                .peek()
                .as_ref()
                .is_some_and(|announcement| announcement.id == id);
            if expired {
                current.set(None);
            }
        });
    });

    let text = current
        .read()
        .as_ref()
        .map(|announcement| announcement.text.clone())
        .unwrap_or_default();
    rsx! {
        div { class: "visually-hidden", role: "status", aria_live: "polite", "{text}" }
    }
}
