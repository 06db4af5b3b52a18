use crossterm::style::Color;
use std::time::Duration;

/// Period of the caret's pulse
pub(crate) const PULSE_PERIOD: Duration = Duration::from_millis(2000);

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let s = s / 100.0;
    let l = l / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::Rgb {
        r: ((r + m) * 255.0) as u8,
        g: ((g + m) * 255.0) as u8,
        b: ((b + m) * 255.0) as u8,
    }
}

/// Caret color at a point in time: teal, fading between half and full brightness
pub(crate) fn pulse_color(elapsed: Duration) -> Color {
    let phase = (elapsed.as_millis() % PULSE_PERIOD.as_millis()) as f32 / PULSE_PERIOD.as_millis() as f32;
    // 1 at the start of the period, 0.5 at its middle
    let intensity = 0.75 + 0.25 * (phase * std::f32::consts::TAU).cos();
    hsl_to_rgb(174.0, 72.0, 56.0 * intensity)
}
