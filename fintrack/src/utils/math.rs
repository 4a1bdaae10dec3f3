/// Number of page links shown by the pagination control
pub const PAGE_WINDOW: u32 = 5;

/// Page numbers to show around `page`.
///
/// The window keeps `page` centered where possible and slides against either
/// end of the range, so it never holds more than [`PAGE_WINDOW`] numbers.
///
/// Examples with 10 pages:
/// - page 1 -> [1, 2, 3, 4, 5]
/// - page 7 -> [5, 6, 7, 8, 9]
/// - page 10 -> [6, 7, 8, 9, 10]
pub fn page_window(page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }

    let start = page.saturating_sub(2).max(1);
    let end = start.saturating_add(PAGE_WINDOW - 1).min(total_pages);
    let start = end.saturating_sub(PAGE_WINDOW - 1).max(1);

    (start..=end).collect()
}

/// Fraction of `target` covered by `saved`, capped at 1.
///
/// A zero target counts as 1 so a fresh goal doesn't divide by zero.
pub fn goal_progress(saved: f64, target: f64) -> f64 {
    let target = if target == 0.0 { 1.0 } else { target };
    (saved / target).clamp(0.0, 1.0)
}
