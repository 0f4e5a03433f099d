//! Formatting utilities for sizes, durations, and the build summary.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

use super::{colors_enabled, is_quiet};

/// Format file size in human-readable format.
///
/// ```
/// use knit_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use knit_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the build summary to stderr.
pub fn print_build_summary(file: &str, modules: usize, size: u64, duration: Duration) {
    if is_quiet() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);
    let modules = format!(
        "{} {}",
        modules,
        if modules == 1 { "module" } else { "modules" }
    );

    if colors_enabled() {
        eprintln!("\n{}", "Build Summary".bold().underline());
        eprintln!("{}", rule);
        eprintln!(
            "  {} {} {} {}",
            "▸".blue(),
            file.bright_white().bold(),
            format_size(size).dimmed(),
            format!("({})", modules).dimmed()
        );
        eprintln!("{}", rule);
        eprintln!(
            "  {} {} in {}",
            "Total:".bold(),
            format_size(size).green(),
            format_duration(duration).green()
        );
    } else {
        eprintln!("\nBuild Summary");
        eprintln!("{}", rule);
        eprintln!("  ▸ {} {} ({})", file, format_size(size), modules);
        eprintln!("{}", rule);
        eprintln!(
            "  Total: {} in {}",
            format_size(size),
            format_duration(duration)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(10_485_760), "10.00 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_print_build_summary() {
        print_build_summary("dist/bundle.js", 3, 2048, Duration::from_millis(12));
    }
}
