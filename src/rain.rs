use dioxus::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::theme::Theme;

#[cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::dom::{use_window_listener, TimeoutHandle};
#[cfg(target_arch = "wasm32")]
use crate::error::{js_error, SiteError};
#[cfg(target_arch = "wasm32")]
use crate::theme::use_theme;

pub const GLYPHS: &str = "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";
pub const FONT_SIZE: f64 = 16.0;
pub const RESIZE_DEBOUNCE_MS: i32 = 100;
const MOBILE_DENSITY: f64 = 0.5;
const BRIGHT_HEAD_CHANCE: f64 = 0.97;
const RESET_CHANCE: f64 = 0.975;
const START_SPREAD: f64 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RainState {
    #[default]
    Idle,
    Running,
    /// Reduced motion requested; never leaves this state.
    Unavailable,
}

impl RainState {
    pub fn initial(reduced_motion: bool) -> Self {
        if reduced_motion {
            RainState::Unavailable
        } else {
            RainState::Idle
        }
    }

    pub fn is_running(self) -> bool {
        self == RainState::Running
    }

    pub fn start(self) -> Self {
        match self {
            RainState::Unavailable => RainState::Unavailable,
            _ => RainState::Running,
        }
    }

    pub fn stop(self) -> Self {
        match self {
            RainState::Unavailable => RainState::Unavailable,
            _ => RainState::Idle,
        }
    }

    pub fn follow_theme(self, theme: Theme) -> Self {
        match theme {
            Theme::Cyber => self.start(),
            Theme::Light => self.stop(),
        }
    }
}

pub fn is_mobile_agent(user_agent: &str) -> bool {
    const MARKERS: [&str; 8] = [
        "android",
        "webos",
        "iphone",
        "ipad",
        "ipod",
        "blackberry",
        "iemobile",
        "opera mini",
    ];
    let agent = user_agent.to_ascii_lowercase();
    MARKERS.iter().any(|marker| agent.contains(marker))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x: f64,
    pub y: f64,
    pub bright: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainField {
    width: f64,
    height: f64,
    density: f64,
    drops: Vec<f64>,
}

impl RainField {
    pub fn new(width: f64, height: f64, density: f64, rng: &mut SmallRng) -> Self {
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            density: density.clamp(0.1, 1.0),
            drops: Vec::new(),
        };
        field.resize(width, height, rng);
        field
    }

    pub fn for_agent(width: f64, height: f64, user_agent: &str, rng: &mut SmallRng) -> Self {
        let density = if is_mobile_agent(user_agent) {
            MOBILE_DENSITY
        } else {
            1.0
        };
        Self::new(width, height, density, rng)
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    #[cfg(test)]
    pub fn drops(&self) -> &[f64] {
        &self.drops
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn column_spacing(&self) -> f64 {
        FONT_SIZE / self.density
    }

    fn speed(&self) -> f64 {
        FONT_SIZE * self.density
    }

    pub fn resize(&mut self, width: f64, height: f64, rng: &mut SmallRng) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let columns = (self.width / FONT_SIZE * self.density).floor() as usize;
        self.drops = (0..columns).map(|_| start_offset(rng)).collect();
    }

    pub fn step(&mut self, rng: &mut SmallRng) -> Vec<Glyph> {
        let glyphs: Vec<char> = GLYPHS.chars().collect();
        let spacing = self.column_spacing();
        let speed = self.speed();
        let mut frame = Vec::with_capacity(self.drops.len());

        for (index, drop) in self.drops.iter_mut().enumerate() {
            let y = *drop;
            if y > 0.0 && y < self.height + FONT_SIZE {
                frame.push(Glyph {
                    ch: glyphs[rng.random_range(0..glyphs.len())],
                    x: index as f64 * spacing,
                    y,
                    bright: rng.random::<f64>() > BRIGHT_HEAD_CHANCE,
                });
            }
            *drop += speed;
            if *drop > self.height && rng.random::<f64>() > RESET_CHANCE {
                *drop = start_offset(rng);
            }
        }
        frame
    }
}

fn start_offset(rng: &mut SmallRng) -> f64 {
    rng.random::<f64>() * -START_SPREAD
}

pub fn use_rain_provider(reduced_motion: bool) -> Signal<RainState> {
    let state = use_signal(|| RainState::initial(reduced_motion));
    use_context_provider(|| state)
}

pub fn use_rain() -> Signal<RainState> {
    use_context::<Signal<RainState>>()
}

#[cfg(target_arch = "wasm32")]
struct FrameLoop {
    canvas: web_sys::HtmlCanvasElement,
    context: web_sys::CanvasRenderingContext2d,
    field: RefCell<RainField>,
    rng: RefCell<SmallRng>,
    running: Cell<bool>,
    frame_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

#[cfg(target_arch = "wasm32")]
impl FrameLoop {
    fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Rc<Self>, SiteError> {
        use rand::SeedableRng;

        let context = canvas
            .get_context("2d")
            .map_err(|err| SiteError::Canvas(js_error(err)))?
            .ok_or(SiteError::Canvas("2d context unavailable".to_string()))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| SiteError::Canvas("unexpected context type".to_string()))?;
        let mut rng = SmallRng::seed_from_u64(crate::clock::now_millis());
        let (width, height) = viewport_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let field = RainField::for_agent(width, height, &crate::dom::user_agent(), &mut rng);
        tracing::debug!("rain: {} columns", field.columns());

        let frame_loop = Rc::new(Self {
            canvas,
            context,
            field: RefCell::new(field),
            rng: RefCell::new(rng),
            running: Cell::new(false),
            frame_id: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&frame_loop);
        *frame_loop.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(frame_loop) = weak.upgrade() {
                frame_loop.tick();
            }
        }) as Box<dyn FnMut()>));
        Ok(frame_loop)
    }

    fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        tracing::debug!("rain: start");
        self.request_frame();
    }

    fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        tracing::debug!("rain: stop");
        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        let (width, height) = self.field.borrow().size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn resize(&self) {
        let (width, height) = viewport_size();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field
            .borrow_mut()
            .resize(width, height, &mut self.rng.borrow_mut());
        tracing::debug!("rain: resize to {width}x{height}");
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            self.frame_id.set(Some(id));
        }
    }

    fn tick(&self) {
        if !self.running.get() {
            return;
        }
        let glyphs = self
            .field
            .borrow_mut()
            .step(&mut self.rng.borrow_mut());
        self.paint(&glyphs);
        self.request_frame();
    }

    fn paint(&self, glyphs: &[Glyph]) {
        let context = &self.context;
        let (width, height) = self.field.borrow().size();
        context.set_fill_style_str("rgba(5, 5, 15, 0.05)");
        context.fill_rect(0.0, 0.0, width, height);
        context.set_font(&format!("{FONT_SIZE}px \"JetBrains Mono\", monospace"));
        context.set_text_align("center");

        let mut buffer = [0u8; 4];
        for glyph in glyphs {
            let text = glyph.ch.encode_utf8(&mut buffer);
            context.set_fill_style_str("#00ff41");
            context.set_shadow_blur(8.0);
            context.set_shadow_color("#00ff41");
            let _ = context.fill_text(text, glyph.x, glyph.y);
            context.set_shadow_blur(0.0);
            if glyph.bright {
                context.set_fill_style_str("#ffffff");
                let _ = context.fill_text(text, glyph.x, glyph.y - FONT_SIZE);
            }
        }
    }

    fn release(&self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}

#[cfg(target_arch = "wasm32")]
fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

#[component]
pub fn RainLayer() -> Element {
    #[cfg(target_arch = "wasm32")]
    let theme = use_theme();
    #[cfg(target_arch = "wasm32")]
    let mut rain = use_rain();
    #[cfg(target_arch = "wasm32")]
    let mut canvas_handle = use_signal(|| None::<web_sys::HtmlCanvasElement>);
    #[cfg(target_arch = "wasm32")]
    let mut frame_loop = use_signal(|| None::<Rc<FrameLoop>>);
    #[cfg(target_arch = "wasm32")]
    let resize_trigger = use_signal(|| 0u64);
    #[cfg(target_arch = "wasm32")]
    let mut debounce_handle = use_signal(|| None::<TimeoutHandle>);

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let next = theme.current();
        let current = *rain.peek();
        let followed = current.follow_theme(next);
        if followed != current {
            rain.set(followed);
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let state = rain();
        let Some(canvas) = canvas_handle.read().as_ref().cloned() else {
            return;
        };
        if !state.is_running() {
            if let Some(active) = frame_loop.peek().as_ref() {
                active.stop();
            }
            return;
        }
        if frame_loop.peek().is_none() {
            match FrameLoop::new(canvas) {
                Ok(created) => frame_loop.set(Some(created)),
                Err(err) => {
                    tracing::warn!("rain: {err}");
                    return;
                }
            }
        }
        if let Some(active) = frame_loop.peek().as_ref() {
            active.start();
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_window_listener("resize", move |_event| {
        if let Some(pending) = debounce_handle.peek().as_ref() {
            pending.clear();
        }
        let mut trigger = resize_trigger;
        let scheduled = TimeoutHandle::schedule(RESIZE_DEBOUNCE_MS, move || {
            let next = *trigger.peek() + 1;
            trigger.set(next);
        });
        debounce_handle.set(scheduled);
    });

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if resize_trigger() == 0 {
            return;
        }
        if let Some(active) = frame_loop.peek().as_ref() {
            active.resize();
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(pending) = debounce_handle.peek().as_ref() {
            pending.clear();
        }
        if let Some(active) = frame_loop.peek().as_ref() {
            active.release();
        }
    });

    rsx! {
        canvas {
            id: "matrixCanvas",
            class: "rain-canvas",
            aria_hidden: "true",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    use dioxus::web::WebEventExt;
                    let element = _event.data.as_ref().as_web_event();
                    if let Ok(node) = element.dyn_into::<web_sys::HtmlCanvasElement>() {
                        canvas_handle.set(Some(node));
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn state_follows_theme() {
        assert_eq!(RainState::Idle.follow_theme(Theme::Cyber), RainState::Running);
        assert_eq!(RainState::Running.follow_theme(Theme::Light), RainState::Idle);
        assert_eq!(RainState::Idle.follow_theme(Theme::Light), RainState::Idle);
    }

    #[test]
    fn reduced_motion_is_permanent() {
        let state = RainState::initial(true);
        assert_eq!(state.start(), RainState::Unavailable);
        assert_eq!(state.stop(), RainState::Unavailable);
        assert_eq!(state.follow_theme(Theme::Cyber), RainState::Unavailable);
    }

    #[test]
    fn start_and_stop_move_between_idle_and_running() {
        assert_eq!(RainState::Idle.start(), RainState::Running);
        assert_eq!(RainState::Running.stop(), RainState::Idle);
    }

    #[test]
    fn columns_follow_width_and_density() {
        let mut rng = rng();
        assert_eq!(RainField::new(800.0, 600.0, 1.0, &mut rng).columns(), 50);
        assert_eq!(RainField::new(800.0, 600.0, 0.5, &mut rng).columns(), 25);
        let mobile = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(RainField::for_agent(800.0, 600.0, mobile, &mut rng).columns(), 25);
    }

    #[test]
    fn drops_start_above_the_screen() {
        let field = RainField::new(320.0, 480.0, 1.0, &mut rng());
        assert!(field.drops().iter().all(|drop| *drop <= 0.0 && *drop > -START_SPREAD));
    }

    #[test]
    fn nothing_is_painted_until_drops_enter_the_screen() {
        let mut rng = rng();
        let mut field = RainField::new(160.0, 480.0, 1.0, &mut rng);
        assert!(field.step(&mut rng).is_empty());
        let mut painted = 0;
        for _ in 0..10 {
            painted += field.step(&mut rng).len();
        }
        assert!(painted > 0);
    }

    #[test]
    fn glyphs_come_from_the_glyph_set_and_sit_on_columns() {
        let mut rng = rng();
        let mut field = RainField::new(160.0, 480.0, 1.0, &mut rng);
        for _ in 0..40 {
            for glyph in field.step(&mut rng) {
                assert!(GLYPHS.contains(glyph.ch));
                assert_eq!(glyph.x % FONT_SIZE, 0.0);
                assert!(glyph.y > 0.0 && glyph.y < 480.0 + FONT_SIZE);
            }
        }
    }

    #[test]
    fn drops_eventually_wrap_back_to_the_top() {
        let mut rng = rng();
        let mut field = RainField::new(64.0, 64.0, 1.0, &mut rng);
        for _ in 0..2000 {
            field.step(&mut rng);
        }
        assert!(field.drops().iter().all(|drop| *drop < 64.0 + FONT_SIZE * 400.0));
    }

    #[test]
    fn resize_recomputes_columns() {
        let mut rng = rng();
        let mut field = RainField::new(800.0, 600.0, 1.0, &mut rng);
        field.resize(400.0, 300.0, &mut rng);
        assert_eq!(field.columns(), 25);
        assert_eq!(field.size(), (400.0, 300.0));
    }

    #[test]
    fn mobile_detection_is_case_insensitive() {
        assert!(is_mobile_agent("Mozilla/5.0 (Linux; ANDROID 14)"));
        assert!(!is_mobile_agent("Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0"));
    }
}
