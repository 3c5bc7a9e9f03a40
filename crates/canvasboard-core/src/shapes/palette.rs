//! Fixed recolor palette.

/// Colors a shape cycles through when clicked, in order.
pub const PALETTE: [&str; 7] = [
    "#ff0000", // red
    "#00ff00", // green
    "#0000ff", // blue
    "#ffff00", // yellow
    "#ff00ff", // magenta
    "#00ffff", // cyan
    "#ff8800", // orange
];

/// Position of `color` in the palette. Matching is exact.
pub fn palette_index(color: &str) -> Option<usize> {
    PALETTE.iter().position(|&c| c == color)
}

/// The palette entry after `color`, wrapping around.
///
/// Colors outside the palette advance to the first entry.
pub fn next_color(color: &str) -> &'static str {
    let next = palette_index(color).map_or(0, |i| (i + 1) % PALETTE.len());
    PALETTE[next]
}
