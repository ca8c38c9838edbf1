//! WASM bindings for cadence-playback
//!
//! `HtmlAudioResource` drives a browser `<audio>` element;
//! `WasmPlaybackController` exposes the controller to JavaScript.

mod controller;
mod resource;

pub use controller::WasmPlaybackController;
pub use resource::HtmlAudioResource;
