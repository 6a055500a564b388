use crate::error::{Result, SceneError};
use glam::Vec3;

/// Mid grey used when preset data carries an unparsable color.
pub const FALLBACK_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Parses `#RRGGBB`, `RRGGBB` or the short `#RGB` form into linear-ish 0..1 RGB.
pub fn parse_hex(hex: &str) -> Result<Vec3> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || SceneError::InvalidColor(hex.to_string());
    // from_str_radix alone would accept a leading '+'
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let (r, g, b) = match digits.len() {
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        3 => {
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            (r * 17, g * 17, b * 17)
        }
        _ => return Err(invalid()),
    };
    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Lenient variant for preset data: logs and falls back to grey.
pub fn parse_hex_or_default(hex: &str) -> Vec3 {
    match parse_hex(hex) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[color] {e}; using fallback grey");
            FALLBACK_COLOR
        }
    }
}

pub fn to_hex(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02X}{:02X}{:02X}", c.x as u8, c.y as u8, c.z as u8)
}

/// Approximate RGB of a black-body source at `kelvin` (1000 K to 40000 K).
pub fn from_temperature(kelvin: f32) -> Vec3 {
    let t = kelvin.clamp(1000.0, 40000.0) / 100.0;
    let r = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };
    let g = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_16 * (t - 60.0).powf(-0.075_514_85)
    };
    let b = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };
    Vec3::new(r, g, b).clamp(Vec3::ZERO, Vec3::splat(255.0)) / 255.0
}
