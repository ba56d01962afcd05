//! Platform glue: device probing, logging setup, URL query access, canvas
//! capture and future spawning. Everything browser-specific is behind
//! `cfg(target_arch = "wasm32")`; native builds get inert fallbacks so the
//! session logic runs under `cargo test`.

use serde::{Deserialize, Serialize};

/// Width (CSS px) below which a viewport counts as a phone.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
/// Width (CSS px) below which a viewport counts as a tablet.
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[serde(rename = "PC")]
    Pc,
    Tablet,
    Mobile,
    Unknown,
}

impl DeviceKind {
    pub fn from_viewport_width(width: Option<f64>) -> Self {
        match width {
            Some(w) if !w.is_finite() || w <= 0.0 => Self::Unknown,
            Some(w) if w < MOBILE_MAX_WIDTH => Self::Mobile,
            Some(w) if w < TABLET_MAX_WIDTH => Self::Tablet,
            Some(_) => Self::Pc,
            None => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
            Self::Unknown => "unknown",
        }
    }
}

/// Raw environment values as read from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentReading {
    pub viewport_width: Option<f64>,
    pub viewport_height: Option<f64>,
    pub device_pixel_ratio: Option<f64>,
    pub user_agent: Option<String>,
    pub max_touch_points: Option<i32>,
}

/// Snapshot of the participant's device, taken at session start and on
/// every task restart. Never re-derived after capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub os: String,
    pub browser: String,
    pub screen_width: f64,
    pub screen_height: f64,
    pub device_pixel_ratio: f64,
    pub touch_capable: bool,
    pub user_agent: String,
}

impl DeviceInfo {
    pub fn from_reading(reading: &EnvironmentReading) -> Self {
        let user_agent = reading.user_agent.clone().unwrap_or_default();
        let lowered = user_agent.to_lowercase();
        Self {
            kind: DeviceKind::from_viewport_width(reading.viewport_width),
            os: detect_os(&lowered).to_string(),
            browser: detect_browser(&lowered).to_string(),
            screen_width: reading.viewport_width.unwrap_or(0.0),
            screen_height: reading.viewport_height.unwrap_or(0.0),
            device_pixel_ratio: reading.device_pixel_ratio.unwrap_or(1.0),
            touch_capable: reading.max_touch_points.unwrap_or(0) > 0,
            user_agent,
        }
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::from_reading(&EnvironmentReading::default())
    }
}

/// Fresh, independent device snapshot from the current host.
pub fn collect_device_info() -> DeviceInfo {
    DeviceInfo::from_reading(&read_environment())
}

// Order matters: iPadOS and Android both advertise a second platform token.
fn detect_os(ua: &str) -> &'static str {
    if ua.contains("windows") {
        "Windows"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        "iOS"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("cros") {
        "ChromeOS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        "unknown"
    }
}

fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("edg") {
        "Edge"
    } else if ua.contains("opr") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("firefox") || ua.contains("fxios") {
        "Firefox"
    } else if ua.contains("chrome") || ua.contains("crios") {
        "Chrome"
    } else if ua.contains("safari") {
        "Safari"
    } else {
        "unknown"
    }
}

#[cfg(target_arch = "wasm32")]
fn read_environment() -> EnvironmentReading {
    let Some(window) = web_sys::window() else {
        return EnvironmentReading::default();
    };
    let navigator = window.navigator();
    EnvironmentReading {
        viewport_width: window.inner_width().ok().and_then(|v| v.as_f64()),
        viewport_height: window.inner_height().ok().and_then(|v| v.as_f64()),
        device_pixel_ratio: Some(window.device_pixel_ratio()),
        user_agent: navigator.user_agent().ok(),
        max_touch_points: Some(navigator.max_touch_points()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_environment() -> EnvironmentReading {
    EnvironmentReading {
        user_agent: Some(format!(
            "chromalab-native ({}; {})",
            std::env::consts::OS,
            std::env::consts::ARCH
        )),
        ..EnvironmentReading::default()
    }
}

/// Install the `log` backend once. Later calls are ignored.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .try_init();
    }
}

/// Value of `key` in the page's query string, if any.
pub fn query_param(key: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = web_sys::window()?.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get(key)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        None
    }
}

/// PNG data URL of the `<canvas>` with the given element id.
pub fn capture_canvas(element_id: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(element_id)?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .ok()?;
        canvas.to_data_url_with_type("image/png").ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = element_id;
        None
    }
}

/// Run a future to completion in the background of the UI thread.
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        futures::executor::block_on(future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPAD_SAFARI: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const WINDOWS_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

    fn reading(width: f64, ua: &str) -> EnvironmentReading {
        EnvironmentReading {
            viewport_width: Some(width),
            viewport_height: Some(700.0),
            device_pixel_ratio: Some(2.0),
            user_agent: Some(ua.to_string()),
            max_touch_points: Some(5),
        }
    }

    #[test]
    fn width_thresholds_classify_devices() {
        assert_eq!(DeviceKind::from_viewport_width(Some(767.9)), DeviceKind::Mobile);
        assert_eq!(DeviceKind::from_viewport_width(Some(768.0)), DeviceKind::Tablet);
        assert_eq!(DeviceKind::from_viewport_width(Some(1023.0)), DeviceKind::Tablet);
        assert_eq!(DeviceKind::from_viewport_width(Some(1024.0)), DeviceKind::Pc);
        assert_eq!(DeviceKind::from_viewport_width(None), DeviceKind::Unknown);
    }

    #[test]
    fn user_agent_families() {
        let ipad = DeviceInfo::from_reading(&reading(820.0, IPAD_SAFARI));
        assert_eq!(ipad.os, "iOS");
        assert_eq!(ipad.browser, "Safari");
        assert_eq!(ipad.kind, DeviceKind::Tablet);
        assert!(ipad.touch_capable);

        let edge = DeviceInfo::from_reading(&reading(1440.0, WINDOWS_EDGE));
        assert_eq!(edge.os, "Windows");
        assert_eq!(edge.browser, "Edge");
        assert_eq!(edge.kind, DeviceKind::Pc);

        let android = DeviceInfo::from_reading(&reading(412.0, ANDROID_CHROME));
        assert_eq!(android.os, "Android");
        assert_eq!(android.browser, "Chrome");
    }

    #[test]
    fn unmatched_agent_is_unknown() {
        let info = DeviceInfo::from_reading(&reading(1200.0, "curl/8.0"));
        assert_eq!(info.os, "unknown");
        assert_eq!(info.browser, "unknown");
    }

    #[test]
    fn device_kind_serialises_like_the_log_schema() {
        assert_eq!(serde_json::to_string(&DeviceKind::Pc).unwrap(), "\"PC\"");
        assert_eq!(serde_json::to_string(&DeviceKind::Mobile).unwrap(), "\"mobile\"");
    }

    #[test]
    fn collecting_twice_gives_independent_snapshots() {
        let mut first = collect_device_info();
        let second = collect_device_info();
        assert_eq!(first, second);
        assert!(!first.user_agent.is_empty());
        assert_ne!(first.user_agent.as_ptr(), second.user_agent.as_ptr());

        first.user_agent.clear();
        assert_eq!(second, collect_device_info());
    }
}
