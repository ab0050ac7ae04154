#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the SiteRunner.
//!
//! This module wraps [`super::site_core::SiteCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use std::time::Duration;

use js_sys::{Array, Float32Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::site_core::{FrameSummary, SiteCore, command_json};
use folio_core::event::{ReadyState, ScrollEvent};
use folio_core::geometry::{ClientRect, Point};
use folio_web::SiteConfig;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

/// Milliseconds from `performance.now()` to a clock reading. Non-finite and
/// negative values read as zero.
fn duration_from_ms(t_ms: f64) -> Duration {
    if !t_ms.is_finite() || t_ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((t_ms * 1000.0).round() as u64)
}

fn frame_summary_to_js(summary: &FrameSummary) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "frame", JsValue::from_f64(summary.frame_idx as f64));
    set_js(&obj, "dtMs", JsValue::from_f64(summary.dt.as_secs_f64() * 1000.0));
    set_js(&obj, "active", JsValue::from_str(summary.active.as_str()));
    set_js(&obj, "activeChanged", JsValue::from_bool(summary.active_changed));
    set_js(&obj, "animating", JsValue::from_bool(summary.animating));
    obj.into()
}

/// WASM runner for the portfolio page.
///
/// Host-driven: JavaScript forwards DOM events, calls `frame` from
/// `requestAnimationFrame`, then drains `takeCommands` and renders
/// `snapshotJson`.
#[wasm_bindgen]
pub struct SiteRunner {
    inner: SiteCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl SiteRunner {
    /// Create a runner. `config_json` overrides tuning; an invalid config is
    /// reported on the console and the defaults are used instead.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        install_panic_hook();
        let config = match config_json.as_deref() {
            None => SiteConfig::default(),
            Some(json) => match SiteConfig::from_json_str(json).and_then(SiteConfig::validated) {
                Ok(config) => config,
                Err(err) => {
                    console_error(&format!("folio: {err}; using default config"));
                    SiteConfig::default()
                }
            },
        };
        Self {
            inner: SiteCore::new(config),
        }
    }

    /// Register listeners. Call once after the page's elements exist.
    pub fn mount(&mut self) {
        self.inner.mount();
    }

    /// Mirror `document.readyState`. Returns `false` for unknown values.
    #[wasm_bindgen(js_name = setReadyState)]
    pub fn set_ready_state(&mut self, state: &str) -> bool {
        match ReadyState::from_dom(state) {
            Some(state) => {
                self.inner.set_ready_state(state);
                true
            }
            None => false,
        }
    }

    /// Record an element's `offsetTop` / `offsetHeight`.
    #[wasm_bindgen(js_name = setElementLayout)]
    pub fn set_element_layout(&mut self, id: &str, offset_top: f64, offset_height: f64) {
        self.inner.set_element_layout(id, offset_top, offset_height);
    }

    /// Record an element's `getBoundingClientRect()`.
    #[wasm_bindgen(js_name = setElementRect)]
    pub fn set_element_rect(&mut self, id: &str, left: f64, top: f64, width: f64, height: f64) {
        self.inner
            .set_element_rect(id, ClientRect::new(left, top, width, height));
    }

    /// `DOMContentLoaded` fired.
    #[wasm_bindgen(js_name = layoutReady)]
    pub fn layout_ready(&mut self) {
        self.inner.layout_ready();
    }

    pub fn scroll(&mut self, y: f64, scroll_height: f64, viewport_height: f64) {
        self.inner.scroll(ScrollEvent {
            offset_y: y,
            scroll_height,
            viewport_height,
        });
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.inner.resize(width, height);
    }

    /// Parse a JSON-encoded DOM notification and apply it.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Pointer entered card `card`. Returns `false` for an unknown index.
    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self, card: usize) -> bool {
        self.inner.pointer_enter(card).is_ok()
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, card: usize, x: f64, y: f64) -> bool {
        self.inner.pointer_move(card, Point::new(x, y)).is_ok()
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, card: usize) -> bool {
        self.inner.pointer_leave(card).is_ok()
    }

    /// Smooth-scroll to section `id`.
    pub fn navigate(&mut self, id: &str) -> bool {
        self.inner.navigate(id)
    }

    #[wasm_bindgen(js_name = scrollToProjects)]
    pub fn scroll_to_projects(&mut self) -> bool {
        self.inner.scroll_to_projects()
    }

    /// Run one frame at `t_ms` (the `requestAnimationFrame` timestamp).
    ///
    /// Returns `{ frame, dtMs, active, activeChanged, animating }`.
    pub fn frame(&mut self, t_ms: f64) -> JsValue {
        let summary = self.inner.frame(duration_from_ms(t_ms));
        frame_summary_to_js(&summary)
    }

    /// Drain queued host commands as an array of plain objects.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> Array {
        let out = Array::new();
        for command in self.inner.take_commands() {
            if let Ok(value) = js_sys::JSON::parse(&command_json(&command).to_string()) {
                out.push(&value);
            }
        }
        out
    }

    /// View state as a JSON string.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.inner.snapshot_json()
    }

    /// Breathing plane vertex positions (xyz interleaved).
    #[wasm_bindgen(js_name = planePositions)]
    pub fn plane_positions(&self) -> Float32Array {
        Float32Array::from(self.inner.plane_positions())
    }

    /// Remove listeners and cancel pending work.
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}
