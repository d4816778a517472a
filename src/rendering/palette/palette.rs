use bevy::prelude::*;

/// Label color on light chips.
pub const DARK_TEXT: Color = Color::srgb(11.0 / 255.0, 30.0 / 255.0, 46.0 / 255.0);

/// Parses `#rrggbb`; anything unparsable renders white.
pub fn hex_color(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::WHITE)
}

#[inline]
pub fn with_alpha(hex: &str, alpha: f32) -> Color {
    hex_color(hex).with_alpha(alpha)
}

/// Weighted sRGB luminance (Rec. 709 weights on gamma-encoded channels).
pub fn relative_luminance(color: Srgba) -> f32 {
    0.2126 * color.red + 0.7152 * color.green + 0.0722 * color.blue
}

/// White on dark faces, near-black on light ones. Unparsable colors get dark text.
pub fn readable_text_color(hex: &str) -> Color {
    match Srgba::hex(hex) {
        Ok(c) if relative_luminance(c) < 0.55 => Color::WHITE,
        _ => DARK_TEXT,
    }
}
