use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::clock::{now_label, sleep_ms};
use crate::commands::{CommandContext, Dispatcher, Step};
use crate::config::{use_site_config, SiteConfig};
use crate::dom::use_document_listener;
use crate::konami::{unlock_lines, unlocked_line, KONAMI_DELAY_MS};
use crate::rain::{use_rain, RainState};
use crate::storage::{flag_is_set, BrowserStorage, KeyValueStore};
use crate::theme::{use_theme, Theme, ThemeHandle};
use crate::transcript::{welcome_lines, LineId, OutputLine, Tone, Transcript};

pub const TERMINAL_VISITED_KEY: &str = "terminalVisited";
pub const WELCOME_DELAY_MS: u32 = 500;
pub const FOCUS_DELAY_MS: u32 = 100;

const INPUT_ID: &str = "terminalInput";
const TOGGLE_ID: &str = "themeToggle";
const LOADING_TEXT: &str = "[...]";

/// Every method only touches signals, so raw DOM listeners may call it.
#[derive(Clone, Copy, PartialEq)]
pub struct TerminalHandle {
    open: Signal<bool>,
    minimized: Signal<bool>,
    transcript: Signal<Transcript>,
    dispatcher: Signal<Dispatcher>,
    unlocks: Signal<u64>,
}

impl TerminalHandle {
    pub fn is_open(&self) -> bool {
        (self.open)()
    }

    pub fn open(mut self) {
        if !*self.open.peek() {
            self.open.set(true);
        }
        if *self.minimized.peek() {
            self.minimized.set(false);
        }
    }

    pub fn close(mut self) {
        if *self.open.peek() {
            self.open.set(false);
        }
    }

    pub fn toggle(self) {
        if *self.open.peek() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn print(mut self, line: OutputLine) -> LineId {
        self.transcript.with_mut(|transcript| transcript.push(line))
    }

    pub fn print_all(mut self, lines: Vec<OutputLine>) {
        self.transcript.with_mut(|transcript| transcript.extend(lines));
    }

    fn remove(mut self, id: LineId) {
        self.transcript.with_mut(|transcript| transcript.remove(id));
    }

    fn clear(mut self) {
        self.transcript.with_mut(Transcript::clear);
    }

    fn toggle_minimized(mut self) {
        let minimized = !*self.minimized.peek();
        self.minimized.set(minimized);
        if minimized {
            self.print(OutputLine::info(
                "Terminal minimized. Click restore button to reopen.",
            ));
        }
    }

    fn record_unlock(mut self) {
        let next = *self.unlocks.peek() + 1;
        self.unlocks.set(next);
    }
}

pub fn use_terminal_provider() -> TerminalHandle {
    let open = use_signal(|| false);
    let minimized = use_signal(|| false);
    let transcript = use_signal(Transcript::new);
    let dispatcher = use_signal(Dispatcher::new);
    let unlocks = use_signal(|| 0u64);
    use_context_provider(|| TerminalHandle {
        open,
        minimized,
        transcript,
        dispatcher,
        unlocks,
    })
}

pub fn use_terminal() -> TerminalHandle {
    use_context::<TerminalHandle>()
}

#[component]
pub fn TerminalWindow(children: Element, minimized: bool, open: bool) -> Element {
    let mut class = "terminal-container".to_string();
    if open {
        class.push_str(" active");
    }
    if minimized {
        class.push_str(" minimized");
    }
    rsx! {
        div {
            id: "themeTerminal",
            class: "{class}",
            role: "dialog",
            aria_modal: "true",
            aria_label: "Portfolio terminal",
            aria_hidden: "{!open}",
            {children}
        }
    }
}

#[component]
pub fn TerminalHeader(title: String, on_close: EventHandler<()>, on_minimize: EventHandler<()>) -> Element {
    rsx! {
        div { class: "terminal-header",
            div { class: "terminal-controls",
                button {
                    r#type: "button",
                    class: "terminal-close",
                    aria_label: "Close terminal",
                    onclick: move |_| on_close.call(()),
                }
                button {
                    r#type: "button",
                    class: "terminal-minimize",
                    aria_label: "Minimize terminal",
                    onclick: move |_| on_minimize.call(()),
                }
                span { class: "terminal-maximize", aria_hidden: "true" }
            }
            span { class: "terminal-title", "{title}" }
        }
    }
}

#[component]
pub fn TerminalPrompt(prompt: String, command: Option<String>, children: Element) -> Element {
    rsx! {
        div { class: "terminal-line command",
            span { class: "terminal-prompt", "{prompt} " }
            if let Some(command) = command {
                span { class: "terminal-command", "{command}" }
            }
            {children}
        }
    }
}

#[component]
pub fn TerminalToggleButton() -> Element {
    let terminal = use_terminal();
    let theme = use_theme();
    let hint = theme.current().terminal_hint();
    rsx! {
        button {
            id: TOGGLE_ID,
            r#type: "button",
            class: "terminal-toggle",
            aria_label: "Open terminal",
            aria_expanded: "{terminal.is_open()}",
            onclick: move |_| terminal.open(),
            span { class: "terminal-hint", "{hint}" }
        }
    }
}

pub trait Console {
    fn print(&mut self, line: OutputLine) -> LineId;
    fn remove(&mut self, id: LineId);
    fn clear(&mut self);
    fn close(&mut self);
    fn update_rain(&mut self, update: fn(RainState) -> RainState);
    fn set_theme(&mut self, theme: Theme);

    fn print_all(&mut self, lines: Vec<OutputLine>) {
        for line in lines {
            self.print(line);
        }
    }
}

struct ShellConsole {
    terminal: TerminalHandle,
    theme: ThemeHandle,
    rain: Signal<RainState>,
}

impl Console for ShellConsole {
    fn print(&mut self, line: OutputLine) -> LineId {
        self.terminal.print(line)
    }

    fn remove(&mut self, id: LineId) {
        self.terminal.remove(id);
    }

    fn clear(&mut self) {
        self.terminal.clear();
    }

    fn close(&mut self) {
        self.terminal.close();
    }

    fn update_rain(&mut self, update: fn(RainState) -> RainState) {
        let next = update(*self.rain.peek());
        self.rain.set(next);
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme.set(theme);
    }

    fn print_all(&mut self, lines: Vec<OutputLine>) {
        self.terminal.print_all(lines);
    }
}

pub async fn play<C: Console>(console: &mut C, steps: Vec<Step>) {
    for step in steps {
        match step {
            Step::Print(line) => {
                console.print(line);
            }
            Step::Clear => console.clear(),
            Step::Close => console.close(),
            Step::StartRain => console.update_rain(RainState::start),
            Step::StopRain => console.update_rain(RainState::stop),
            Step::Transition(transition) => {
                let loading = console.print(OutputLine::new(Tone::Loading, LOADING_TEXT));
                sleep_ms(transition.delay_ms).await;
                console.remove(loading);
                console.set_theme(transition.theme);
                console.print_all(transition.then);
            }
        }
    }
}

fn submit(
    terminal: TerminalHandle,
    theme: &ThemeHandle,
    rain: Signal<RainState>,
    config: &SiteConfig,
    raw: &str,
) {
    let context = CommandContext {
        theme: theme.peek(),
        saved_theme: theme.persisted(),
        rain: *rain.peek(),
        now: now_label(),
        config,
    };
    let mut dispatcher = terminal.dispatcher;
    let Some(steps) = dispatcher.with_mut(|dispatcher| dispatcher.process(raw, &context)) else {
        return;
    };
    let mut console = ShellConsole {
        terminal,
        theme: theme.clone(),
        rain,
    };
    spawn(async move { play(&mut console, steps).await });
}

pub fn take_welcome<S: KeyValueStore>(store: &mut S, owner: &str) -> Option<Vec<OutputLine>> {
    if flag_is_set(&*store, TERMINAL_VISITED_KEY) {
        return None;
    }
    if let Err(err) = store.write(TERMINAL_VISITED_KEY, "true") {
        tracing::warn!("terminal: {err}");
    }
    Some(welcome_lines(owner))
}

#[component]
pub fn TerminalOverlay() -> Element {
    let terminal = use_terminal();
    let theme = use_theme();
    let rain = use_rain();
    let config = use_site_config();
    let mut input = use_signal(String::new);
    #[cfg(target_arch = "wasm32")]
    let mut output_handle = use_signal(|| None::<web_sys::HtmlElement>);
    #[cfg(target_arch = "wasm32")]
    let mut window_handle = use_signal(|| None::<web_sys::HtmlElement>);

    use_hook({
        let owner = config.owner.clone();
        move || {
            let Some(lines) = take_welcome(&mut BrowserStorage, &owner) else {
                return;
            };
            spawn(async move {
                sleep_ms(WELCOME_DELAY_MS).await;
                terminal.print_all(lines);
            });
        }
    });

    use_document_listener("keydown", {
        let mut tracker = crate::konami::KonamiTracker::new();
        move |_event| {
            #[cfg(target_arch = "wasm32")]
            {
                let Ok(event) = _event.dyn_into::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if crate::konami::is_terminal_chord(&key, event.ctrl_key(), event.meta_key()) {
                    event.prevent_default();
                    terminal.toggle();
                } else if key == "Escape" {
                    terminal.close();
                }
                if tracker.feed(&key) {
                    terminal.record_unlock();
                }
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = &mut tracker;
        }
    });

    use_effect({
        let theme = theme.clone();
        move || {
            if (terminal.unlocks)() == 0 {
                return;
            }
            tracing::debug!("terminal: konami unlock");
            let theme = theme.clone();
            spawn(async move {
                terminal.open();
                terminal.print_all(unlock_lines());
                sleep_ms(KONAMI_DELAY_MS).await;
                theme.set(Theme::Cyber);
                terminal.print(unlocked_line());
            });
        }
    });

    let was_open = use_hook(|| Rc::new(Cell::new(false)));
    use_effect(move || {
        let open = terminal.is_open();
        if was_open.replace(open) == open {
            return;
        }
        crate::dom::lock_body_scroll(open);
        if open {
            tracing::debug!("terminal: open");
            spawn(async move {
                sleep_ms(FOCUS_DELAY_MS).await;
                crate::dom::focus_by_id(INPUT_ID);
            });
        } else {
            tracing::debug!("terminal: close");
            crate::dom::focus_by_id(TOGGLE_ID);
        }
    });

    use_effect(move || {
        let _newest = terminal.transcript.read().last_id();
        #[cfg(target_arch = "wasm32")]
        if let Some(element) = output_handle.read().as_ref().cloned() {
            element.set_scroll_top(element.scroll_height());
        }
    });

    let open = terminal.is_open();
    let minimized = (terminal.minimized)();
    let entries = terminal.transcript.read().entries().to_vec();
    let prompt = config.prompt();
    let title = format!("{}@{}: ~", config.prompt_user, config.prompt_host);
    let overlay_class = if open {
        "terminal-overlay active"
    } else {
        "terminal-overlay"
    };
    let submit_theme = theme.clone();
    let submit_config = config.clone();

    rsx! {
        div { class: overlay_class, onclick: move |_| terminal.close() }
        TerminalWindow { open, minimized,
            div {
                class: "terminal-frame",
                onmounted: move |_event| {
                    #[cfg(target_arch = "wasm32")]
                    {
                        let element = _event.data.as_ref().as_web_event();
                        if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                            window_handle.set(Some(node));
                        }
                    }
                },
                onkeydown: move |_event| {
                    #[cfg(target_arch = "wasm32")]
                    if _event.key() == Key::Tab {
                        if let Some(container) = window_handle.peek().as_ref() {
                            if trap_focus(container, _event.modifiers().contains(Modifiers::SHIFT)) {
                                _event.prevent_default();
                            }
                        }
                    }
                },
                TerminalHeader {
                    title,
                    on_close: move |_| terminal.close(),
                    on_minimize: move |_| terminal.toggle_minimized(),
                }
                div {
                    class: "terminal-body",
                    onmounted: move |_event| {
                        #[cfg(target_arch = "wasm32")]
                        {
                            let element = _event.data.as_ref().as_web_event();
                            if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                                output_handle.set(Some(node));
                            }
                        }
                    },
                    onclick: move |_| crate::dom::focus_by_id(INPUT_ID),
                    div { class: "terminal-content", role: "log", aria_live: "polite",
                        for entry in entries {
                            if entry.line.tone == Tone::Echo {
                                TerminalPrompt {
                                    key: "{entry.id}",
                                    prompt: prompt.clone(),
                                    command: Some(entry.line.text.clone()),
                                    children: rsx! {}
                                }
                            } else {
                                div { key: "{entry.id}", class: entry.line.tone.class(), "{entry.line.text}" }
                            }
                        }
                    }
                    TerminalPrompt { prompt: prompt.clone(), command: None,
                        input {
                            id: INPUT_ID,
                            r#type: "text",
                            class: "terminal-input",
                            value: "{input}",
                            autocomplete: "off",
                            spellcheck: "false",
                            aria_label: "Terminal command",
                            oninput: move |event| input.set(event.value()),
                            onpaste: move |_event| {
                                #[cfg(target_arch = "wasm32")]
                                {
                                    let pasted = _event
                                        .data
                                        .as_ref()
                                        .as_web_event()
                                        .dyn_into::<web_sys::ClipboardEvent>()
                                        .ok()
                                        .and_then(|clipboard| clipboard.clipboard_data())
                                        .and_then(|data| data.get_data("text").ok());
                                    if let Some(Err(rejected)) = pasted.as_deref().map(crate::transcript::check_paste) {
                                        _event.prevent_default();
                                        tracing::debug!("terminal: rejected paste of {} chars", rejected.length);
                                        terminal.print(rejected.line());
                                    }
                                }
                            },
                            onkeydown: move |event| {
                                match event.key() {
                                    Key::Enter => {
                                        event.prevent_default();
                                        let raw = input.peek().clone();
                                        input.set(String::new());
                                        submit(terminal, &submit_theme, rain, &submit_config, &raw);
                                    }
                                    Key::ArrowUp => {
                                        event.prevent_default();
                                        let mut dispatcher = terminal.dispatcher;
                                        if dispatcher.peek().history().is_empty() {
                                            return;
                                        }
                                        let recalled = dispatcher.with_mut(|dispatcher| dispatcher.history_mut().previous());
                                        input.set(recalled);
                                    }
                                    Key::ArrowDown => {
                                        event.prevent_default();
                                        let mut dispatcher = terminal.dispatcher;
                                        let recalled = dispatcher.with_mut(|dispatcher| dispatcher.history_mut().next());
                                        input.set(recalled);
                                    }
                                    Key::Escape => terminal.close(),
                                    _ => {}
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn trap_focus(container: &web_sys::HtmlElement, backwards: bool) -> bool {
    const FOCUSABLE: &str = "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";
    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return false;
    };
    let length = nodes.length();
    if length == 0 {
        return false;
    }
    let element = |index: u32| {
        nodes
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
    };
    let (Some(first), Some(last)) = (element(0), element(length - 1)) else {
        return false;
    };
    let active = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element());
    let Some(active) = active else {
        return false;
    };
    let is_active = |candidate: &web_sys::HtmlElement| {
        let candidate: &web_sys::Element = candidate;
        *candidate == active
    };
    if backwards && is_active(&first) {
        return last.focus().is_ok();
    }
    if !backwards && is_active(&last) {
        return first.focus().is_ok();
    }
    false
}
