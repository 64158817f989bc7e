//! Human-readable rate and percentage formatting helpers.

/// Format a rate in Mbps (e.g., "12.5 Mbps", "1.20 Gbps").
pub fn fmt_mbps(mbps: f64) -> String {
    if mbps >= 1000.0 {
        format!("{:.2} Gbps", mbps / 1000.0)
    } else if mbps >= 10.0 {
        format!("{mbps:.1} Mbps")
    } else {
        format!("{mbps:.2} Mbps")
    }
}

/// Compact rate for chart Y-axis labels: "50M", "1.2G".
pub fn fmt_mbps_axis(mbps: f64) -> String {
    if mbps >= 1000.0 {
        format!("{:.1}G", mbps / 1000.0)
    } else if mbps >= 10.0 {
        format!("{mbps:.0}M")
    } else {
        format!("{mbps:.1}M")
    }
}

/// Format an interface rate reported in KB/s (e.g., "850 KB/s", "2.4 MB/s").
pub fn fmt_kbps(kbps: f64) -> String {
    if kbps >= 1000.0 {
        format!("{:.1} MB/s", kbps / 1000.0)
    } else {
        format!("{kbps:.0} KB/s")
    }
}

/// Usage percentage label; the raw value is printed even above 100%.
pub fn fmt_percent(percent: f64) -> String {
    format!("{percent:.0}%")
}

/// Render a percentage bar split into filled and empty portions.
///
/// Returns `(filled, empty)` strings of `█` and `░` characters that
/// together span `width` character positions. The fill is clamped to
/// [0, 100] even when the raw percentage overshoots; callers print
/// the raw label next to the bar.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_pct_bar(pct: f64, width: u16) -> (String, String) {
    let clamped = pct.clamp(0.0, 100.0);
    let filled_count = ((clamped / 100.0) * f64::from(width)).round() as u16;
    let empty_count = width.saturating_sub(filled_count);
    (
        "█".repeat(usize::from(filled_count)),
        "░".repeat(usize::from(empty_count)),
    )
}
