//! Bounds-checked page stepping. Pages are 1-indexed.

/// Clamps `target` into `[1, total_pages]`. With no pages loaded the result
/// is page 1.
pub fn go_to_page(target: i64, total_pages: u32) -> u32 {
    let last = i64::from(total_pages.max(1));
    target.clamp(1, last) as u32
}

pub fn next_page(current: u32, total_pages: u32) -> u32 {
    go_to_page(i64::from(current) + 1, total_pages)
}

pub fn previous_page(current: u32, total_pages: u32) -> u32 {
    go_to_page(i64::from(current) - 1, total_pages)
}
