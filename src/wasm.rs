//! Browser entry point and DOM adapters for the title animation.

use title_jitter::{
    AnimationConfig, Duration, Jitter, RandomSource, ScheduleError, Scheduler, TaskCallback,
    TaskHandle, Title, TitleAnimator,
};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::config::AppConfig;
use crate::constants::APP_NAME;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Logger first so config problems are reported
    crate::logging::init();
    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    crate::logging::set_level(config.log_level);
    log::info!("{} starting", APP_NAME);

    start_title_animation(&config.animation);
}

/// Animate the element with id `element_id`, for pages that render their
/// title after the module has loaded.
#[wasm_bindgen(js_name = animateTitle)]
pub fn animate_title(element_id: &str) {
    let stored = AppConfig::load_from_local_storage().unwrap_or_default();
    let config = AnimationConfig {
        title_id: element_id.to_string(),
        ..stored.animation
    };
    start_title_animation(&config);
}

/// Look up the configured title element and start jittering it. A missing
/// element or an unusable configuration is logged and otherwise ignored.
pub fn start_title_animation(config: &AnimationConfig) {
    let animator = match TitleAnimator::new(config.clone(), IntervalScheduler) {
        Ok(animator) => animator,
        Err(e) => {
            log::warn!("Title animation disabled: {}", e);
            return;
        }
    };
    animator.start(DomTitle::find(&config.title_id), MathRandom);
}

/// A title element whose child nodes are the glyphs.
pub struct DomTitle {
    element: Element,
}

impl DomTitle {
    pub fn find(id: &str) -> Option<Self> {
        let element = web_sys::window()?.document()?.get_element_by_id(id)?;
        Some(Self { element })
    }
}

impl Title for DomTitle {
    fn glyph_count(&self) -> usize {
        self.element.children().length() as usize
    }

    fn apply(&mut self, index: usize, jitter: Jitter) {
        let Some(child) = self.element.children().item(index as u32) else {
            return;
        };
        let Ok(child) = child.dyn_into::<HtmlElement>() else {
            return;
        };

        let style = child.style();
        let result = style
            .set_property("top", &jitter.css_top())
            .and_then(|()| style.set_property("left", &jitter.css_left()))
            .and_then(|()| style.set_property("transform", &jitter.css_transform()));
        if let Err(e) = result {
            log::debug!("Failed to style title glyph {}: {:?}", index, e);
        }
    }
}

/// Schedules through `window.setInterval`.
pub struct IntervalScheduler;

/// A registered interval plus the JS closure it calls.
pub struct IntervalHandle {
    id: i32,
    closure: Closure<dyn FnMut()>,
}

impl TaskHandle for IntervalHandle {
    fn cancel(self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
        // Usually called from inside the closure itself; free it once the
        // current invocation has returned.
        let closure = self.closure;
        wasm_bindgen_futures::spawn_local(async move {
            drop(closure);
        });
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn schedule_repeating(
        &self,
        interval: Duration,
        mut callback: TaskCallback,
    ) -> Result<IntervalHandle, ScheduleError> {
        let window = web_sys::window()
            .ok_or_else(|| ScheduleError::Rejected("No window object available".to_string()))?;

        let closure = Closure::<dyn FnMut()>::new(move || callback());
        let timeout = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| ScheduleError::Rejected(format!("setInterval failed: {:?}", e)))?;

        Ok(IntervalHandle { id, closure })
    }
}

/// Uniform draws from `Math.random()`.
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
