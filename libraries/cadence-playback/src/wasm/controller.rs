//! WASM-compatible PlaybackController wrapper

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use cadence_core::TrackId;
use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::resource::HtmlAudioResource;
use crate::{PlaybackConfig, PlaybackController, PlaybackError, PlaybackEvent};

type Controller = PlaybackController<HtmlAudioResource>;

#[derive(Default)]
struct Callbacks {
    on_state_change: RefCell<Option<Function>>,
    on_track_change: RefCell<Option<Function>>,
    on_ended: RefCell<Option<Function>>,
    on_error: RefCell<Option<Function>>,
}

struct Inner {
    controller: RefCell<Controller>,
    callbacks: Callbacks,
}

impl Inner {
    /// Apply queued media events and notify JavaScript
    ///
    /// Callbacks run after the controller borrow is released, so they may
    /// call back into the wrapper (e.g. load the next track from `onEnded`).
    fn pump(&self) {
        let events = match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.process_events();
                controller.drain_events()
            }
            // Re-entrant wake; the outer call drains the queue
            Err(_) => return,
        };

        for event in events {
            self.dispatch(event);
        }
    }

    fn dispatch(&self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::StateChanged { state } => {
                if let Ok(js_state) = serde_wasm_bindgen::to_value(&state) {
                    call(&self.callbacks.on_state_change, &js_state);
                }
            }
            PlaybackEvent::TrackChanged { track_id, .. } => {
                call(&self.callbacks.on_track_change, &JsValue::from_str(track_id.as_str()));
            }
            PlaybackEvent::TrackEnded { track_id } => {
                call(&self.callbacks.on_ended, &JsValue::from_str(track_id.as_str()));
            }
            PlaybackEvent::LoadFailed { message, .. } => {
                call(&self.callbacks.on_error, &JsValue::from_str(&message));
            }
            PlaybackEvent::AutoplayBlocked { .. } | PlaybackEvent::VolumeChanged { .. } => {}
        }
    }
}

fn call(slot: &RefCell<Option<Function>>, arg: &JsValue) {
    let callback = slot.borrow().clone();
    if let Some(callback) = callback {
        callback.call1(&JsValue::NULL, arg).ok();
    }
}

/// WASM-compatible playback controller
///
/// Wraps `PlaybackController` over a browser `<audio>` element with a
/// JavaScript-friendly API. Resource events are applied as they arrive.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Create a controller with its own `<audio>` element
    #[wasm_bindgen(constructor)]
    pub fn new(initial_volume: Option<f64>) -> Result<WasmPlaybackController, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let resource = HtmlAudioResource::new()?;
        let config = PlaybackConfig {
            initial_volume: initial_volume.unwrap_or(PlaybackConfig::default().initial_volume),
        };

        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            resource.set_wake(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.pump();
                }
            });

            Inner {
                controller: RefCell::new(PlaybackController::new(resource, config)),
                callbacks: Callbacks::default(),
            }
        });

        Ok(Self { inner })
    }

    // ===== Playback Control =====

    /// Load a track and start playing it
    #[wasm_bindgen(js_name = loadTrack)]
    pub fn load_track(&self, track_id: String, source_url: &str) -> Result<(), JsValue> {
        self.with_controller(|c| c.load_track(TrackId::new(track_id), source_url))?
            .map_err(|e| self.handle_error(e))
    }

    /// Start or resume playback
    pub fn play(&self) -> Result<(), JsValue> {
        self.with_controller(|c| c.play())?
            .map_err(|e| self.handle_error(e))
    }

    /// Pause playback
    pub fn pause(&self) -> Result<(), JsValue> {
        self.with_controller(|c| c.pause())
    }

    /// Seek to position in seconds
    pub fn seek(&self, position_secs: f64) -> Result<(), JsValue> {
        self.with_controller(|c| c.seek(position_secs))?
            .map_err(|e| self.handle_error(e))
    }

    /// Re-read position and duration from the element
    #[wasm_bindgen(js_name = syncFromElement)]
    pub fn sync_from_element(&self) -> Result<(), JsValue> {
        self.with_controller(|c| c.sync_from_resource())
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) -> Result<(), JsValue> {
        self.with_controller(|c| c.set_volume(level))
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.with_controller(|c| c.toggle_mute())
    }

    // ===== State Queries =====

    /// Current state as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        self.inner
            .controller
            .try_borrow()
            .ok()
            .and_then(|c| serde_wasm_bindgen::to_value(c.state()).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Progress through the current track (0-100)
    #[wasm_bindgen(js_name = getProgressPercent)]
    pub fn get_progress_percent(&self) -> f64 {
        self.inner
            .controller
            .try_borrow()
            .map(|c| c.state().progress_percent())
            .unwrap_or(0.0)
    }

    // ===== Event Listeners =====

    /// Register state change callback
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        *self.inner.callbacks.on_state_change.borrow_mut() = Some(callback);
    }

    /// Register track change callback
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&self, callback: Function) {
        *self.inner.callbacks.on_track_change.borrow_mut() = Some(callback);
    }

    /// Register end-of-track callback (receives the finished track ID)
    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&self, callback: Function) {
        *self.inner.callbacks.on_ended.borrow_mut() = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        *self.inner.callbacks.on_error.borrow_mut() = Some(callback);
    }
}

impl WasmPlaybackController {
    fn with_controller<T>(&self, f: impl FnOnce(&mut Controller) -> T) -> Result<T, JsValue> {
        let result = {
            let mut controller = self
                .inner
                .controller
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Playback controller is busy"))?;
            f(&mut controller)
        };
        self.inner.pump();
        Ok(result)
    }

    fn handle_error(&self, error: PlaybackError) -> JsValue {
        let err_msg = error.to_string();
        call(&self.inner.callbacks.on_error, &JsValue::from_str(&err_msg));
        JsValue::from_str(&err_msg)
    }
}
