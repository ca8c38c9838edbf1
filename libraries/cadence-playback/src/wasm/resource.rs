//! `MediaResource` backed by an `HtmlAudioElement`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAudioElement;

use crate::resource::{EventSink, LoadGeneration, MediaEvent, MediaResource, Subscription};

type PlayCallbacks = (Closure<dyn FnMut(JsValue)>, Closure<dyn FnMut(JsValue)>);

/// Values held until a flag they were registered with is raised
///
/// Settled entries are released on the next `keep`.
struct PendingPlays<T> {
    entries: RefCell<Vec<(Rc<Cell<bool>>, T)>>,
}

impl<T> Default for PendingPlays<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<T> PendingPlays<T> {
    fn keep(&self, settled: Rc<Cell<bool>>, value: T) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(done, _)| !done.get());
        entries.push((settled, value));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// State shared between the resource and its DOM listeners
#[derive(Default)]
struct Shared {
    generation: Cell<LoadGeneration>,
    sink: RefCell<Option<EventSink>>,
    wake: RefCell<Option<Rc<dyn Fn()>>>,
    plays: PendingPlays<PlayCallbacks>,
}

impl Shared {
    fn emit(&self, event: MediaEvent) {
        self.emit_for(self.generation.get(), event);
    }

    fn emit_for(&self, generation: LoadGeneration, event: MediaEvent) {
        let delivered = self
            .sink
            .borrow()
            .as_ref()
            .is_some_and(|sink| sink.emit(generation, event));

        if delivered {
            let wake = self.wake.borrow().clone();
            if let Some(wake) = wake {
                wake();
            }
        }
    }
}

/// Browser audio element adapter
pub struct HtmlAudioResource {
    audio: HtmlAudioElement,
    shared: Rc<Shared>,
}

impl HtmlAudioResource {
    /// Create a detached `<audio>` element
    pub fn new() -> Result<Self, JsValue> {
        let audio = HtmlAudioElement::new()?;
        audio.set_cross_origin(Some("anonymous"));
        audio.set_preload("metadata");
        Ok(Self::from_element(audio))
    }

    /// Wrap an existing element
    pub fn from_element(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            shared: Rc::new(Shared::default()),
        }
    }

    /// Called after each event is queued, so the owner can pump the controller
    pub fn set_wake(&self, wake: impl Fn() + 'static) {
        *self.shared.wake.borrow_mut() = Some(Rc::new(wake));
    }

    /// The wrapped element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn listener(&self, event: &'static str) -> Closure<dyn FnMut()> {
        let audio = self.audio.clone();
        let shared = Rc::clone(&self.shared);

        Closure::wrap(Box::new(move || {
            let media_event = match event {
                "play" => MediaEvent::Started,
                "pause" => MediaEvent::Paused,
                "loadedmetadata" | "durationchange" => MediaEvent::DurationKnown(audio.duration()),
                "timeupdate" => MediaEvent::PositionAdvanced(audio.current_time()),
                "seeked" => MediaEvent::Seeked,
                "canplay" => MediaEvent::ReadyToPlay,
                "ended" => MediaEvent::Ended,
                _ => MediaEvent::LoadFailed(describe_media_error(&audio)),
            };
            shared.emit(media_event);
        }) as Box<dyn FnMut()>)
    }
}

const LISTENED_EVENTS: [&str; 9] = [
    "play",
    "pause",
    "loadedmetadata",
    "durationchange",
    "timeupdate",
    "seeked",
    "canplay",
    "ended",
    "error",
];

fn describe_media_error(audio: &HtmlAudioElement) -> String {
    match audio.error() {
        Some(error) if !error.message().is_empty() => {
            format!("Media error {}: {}", error.code(), error.message())
        }
        Some(error) => format!("Media error {}", error.code()),
        None => "Unknown media error".to_string(),
    }
}

fn describe_rejection(reason: &JsValue) -> String {
    if let Some(text) = reason.as_string() {
        return text;
    }
    if let Some(error) = reason.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    js_sys::Reflect::get(reason, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| "play() rejected".to_string())
}

impl MediaResource for HtmlAudioResource {
    fn set_source(&mut self, url: &str, generation: LoadGeneration) {
        self.shared.generation.set(generation);
        self.audio.set_src(url);
    }

    fn play(&mut self) {
        let generation = self.shared.generation.get();

        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(reason) => {
                self.shared
                    .emit_for(generation, MediaEvent::PlayRejected(describe_rejection(&reason)));
                return;
            }
        };

        let settled = Rc::new(Cell::new(false));

        let resolved = Rc::clone(&self.shared);
        let resolve_flag = Rc::clone(&settled);
        let on_resolve = Closure::once(move |_: JsValue| {
            resolve_flag.set(true);
            resolved.emit_for(generation, MediaEvent::PlayResolved);
        });
        let rejected = Rc::clone(&self.shared);
        let reject_flag = Rc::clone(&settled);
        let on_reject = Closure::once(move |reason: JsValue| {
            reject_flag.set(true);
            rejected.emit_for(generation, MediaEvent::PlayRejected(describe_rejection(&reason)));
        });

        let _ = promise.then2(&on_resolve, &on_reject);
        self.shared.plays.keep(settled, (on_resolve, on_reject));
    }

    fn pause(&mut self) {
        // Result only signals a detached element
        let _ = self.audio.pause();
    }

    fn set_position(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, level: f64) {
        self.audio.set_volume(level);
    }

    fn subscribe(&mut self, sink: EventSink) -> Subscription {
        *self.shared.sink.borrow_mut() = Some(sink);

        let listeners: Vec<(&'static str, Closure<dyn FnMut()>)> = LISTENED_EVENTS
            .iter()
            .map(|&name| (name, self.listener(name)))
            .filter(|(name, listener)| {
                self.audio
                    .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                    .is_ok()
            })
            .collect();

        let audio = self.audio.clone();
        let shared = Rc::clone(&self.shared);
        Subscription::new(move || {
            for (name, listener) in &listeners {
                let _ = audio
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
            shared.sink.borrow_mut().take();
        })
    }

    fn current_position(&self) -> f64 {
        self.audio.current_time()
    }

    fn current_duration(&self) -> f64 {
        let duration = self.audio.duration();
        if duration.is_finite() {
            duration
        } else {
            0.0
        }
    }
}
