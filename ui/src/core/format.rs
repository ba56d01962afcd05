//! Formatting helpers for presenting session state.

pub fn format_seconds(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let total = value.max(0.0).round() as u64;
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

pub fn format_optional_seconds(value: Option<f64>) -> String {
    value.map(format_seconds).unwrap_or_else(|| "—".to_string())
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_render_compactly() {
        assert_eq!(format_seconds(4.4), "4s");
        assert_eq!(format_seconds(125.0), "2m 05s");
        assert_eq!(format_optional_seconds(None), "—");
        assert_eq!(format_percent(0.256), "26%");
    }
}
