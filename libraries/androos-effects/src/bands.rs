//! Equalizer band table and display formatting
//!
//! The equalizer exposes five fixed bands. Levels are normalized to
//! [-1.0, 1.0] at the API and sent to the engine in millibels (x1000).

/// Number of equalizer bands
pub const EQ_BAND_COUNT: usize = 5;

/// Center frequency of each band (Hz)
pub const EQ_CENTER_FREQUENCIES_HZ: [u32; EQ_BAND_COUNT] = [60, 230, 910, 3_600, 14_000];

/// Millibels per unit of normalized band level
pub const MILLIBELS_PER_LEVEL: f32 = 1000.0;

/// Display label for a band ("60 Hz", "3.6 kHz", ...)
///
/// Returns `None` for an index outside the band table.
pub fn band_label(index: usize) -> Option<String> {
    EQ_CENTER_FREQUENCIES_HZ
        .get(index)
        .map(|&hz| format_frequency(hz))
}

/// Format a frequency for display, switching to kHz at 1000 Hz
pub fn format_frequency(hz: u32) -> String {
    if hz < 1000 {
        format!("{} Hz", hz)
    } else if hz % 1000 == 0 {
        format!("{} kHz", hz / 1000)
    } else {
        format!("{:.1} kHz", hz as f32 / 1000.0)
    }
}

/// Convert a normalized band level to engine millibels
///
/// The level is clamped to [-1.0, 1.0] first; NaN maps to 0.
pub fn level_to_millibels(level: f32) -> i16 {
    if level.is_nan() {
        return 0;
    }
    (level.clamp(-1.0, 1.0) * MILLIBELS_PER_LEVEL).round() as i16
}

/// Readout for a gain value ("1000 mB")
pub fn format_millibels(millibels: i32) -> String {
    format!("{} mB", millibels)
}

/// Readout for a band level, in engine millibels
pub fn format_band_level(level: f32) -> String {
    format_millibels(i32::from(level_to_millibels(level)))
}

/// Readout for bass boost strength ("250/1000")
pub fn format_bass_boost(strength: i32) -> String {
    format!("{}/1000", strength)
}
