//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time
//! - Touch capability detection
//!
//! The simulation never reads the clock itself; callers sample it once per
//! frame or event and pass the timestamp in.

/// Milliseconds on a monotonic clock (`performance.now()` in the browser)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call in this process
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Whether the device has a coarse pointer or touch points
#[cfg(target_arch = "wasm32")]
pub fn has_touch() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    coarse || window.navigator().max_touch_points() > 0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn has_touch() -> bool {
    false
}
