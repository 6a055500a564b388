use glam::Vec3;
use std::borrow::Cow;

use crate::engine::{LightKind, SpotCone};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightingCategory {
    Bright,
    Neutral,
    Warm,
    Dramatic,
}

impl LightingCategory {
    pub const ALL: [LightingCategory; 4] = [
        LightingCategory::Bright,
        LightingCategory::Neutral,
        LightingCategory::Warm,
        LightingCategory::Dramatic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LightingCategory::Bright => "bright",
            LightingCategory::Neutral => "neutral",
            LightingCategory::Warm => "warm",
            LightingCategory::Dramatic => "dramatic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowConfig {
    pub enabled: bool,
    pub map_size: u32,
    pub bias: f32,
    pub normal_bias: f32,
}

impl ShadowConfig {
    pub const fn new(map_size: u32, bias: f32, normal_bias: f32) -> Self {
        Self {
            enabled: true,
            map_size,
            bias,
            normal_bias,
        }
    }
}

/// One light in a rig. Spot lights must carry `spot`; other kinds ignore it.
#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Option<Vec3>,
    pub intensity: f32,
    pub range: f32,
    pub color: Cow<'static, str>,
    pub spot: Option<SpotCone>,
    pub shadows: Option<ShadowConfig>,
}

impl LightConfig {
    pub const fn point(
        id: &'static str,
        name: &'static str,
        position: Vec3,
        intensity: f32,
        range: f32,
        color: &'static str,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            name: Cow::Borrowed(name),
            kind: LightKind::Point,
            position,
            direction: None,
            intensity,
            range,
            color: Cow::Borrowed(color),
            spot: None,
            shadows: None,
        }
    }

    pub const fn directional(
        id: &'static str,
        name: &'static str,
        position: Vec3,
        direction: Vec3,
        intensity: f32,
        color: &'static str,
        shadows: Option<ShadowConfig>,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            name: Cow::Borrowed(name),
            kind: LightKind::Directional,
            position,
            direction: Some(direction),
            intensity,
            range: 100.0,
            color: Cow::Borrowed(color),
            spot: None,
            shadows,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub const fn spot(
        id: &'static str,
        name: &'static str,
        position: Vec3,
        direction: Vec3,
        cone: SpotCone,
        intensity: f32,
        range: f32,
        color: &'static str,
        shadows: Option<ShadowConfig>,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            name: Cow::Borrowed(name),
            kind: LightKind::Spot,
            position,
            direction: Some(direction),
            intensity,
            range,
            color: Cow::Borrowed(color),
            spot: Some(cone),
            shadows,
        }
    }

    pub fn wants_shadows(&self) -> bool {
        self.shadows.map_or(false, |s| s.enabled)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomConfig {
    pub enabled: bool,
    pub intensity: f32,
    pub threshold: f32,
}

impl BloomConfig {
    pub const OFF: BloomConfig = BloomConfig {
        enabled: false,
        intensity: 0.0,
        threshold: 1.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightingPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: LightingCategory,
    /// Multiplier applied to the engine's base ambient color.
    pub ambient_intensity: f32,
    pub lights: &'static [LightConfig],
    pub bloom: BloomConfig,
    pub color_grade_intensity: f32,
}

const WINDOW_SHADOWS: ShadowConfig = ShadowConfig::new(2048, 0.0001, 0.02);

static NATURAL_LIGHTS: [LightConfig; 3] = [
    LightConfig::directional(
        "window_light",
        "Window light",
        Vec3::new(-5.0, 6.0, 4.0),
        Vec3::new(0.7, -0.8, -0.5),
        1.5,
        "#FFFFFF",
        Some(WINDOW_SHADOWS),
    ),
    LightConfig::directional(
        "fill_light",
        "Fill light",
        Vec3::new(3.0, 5.0, -3.0),
        Vec3::new(-0.5, -0.7, 0.5),
        0.8,
        "#F5F5F5",
        None,
    ),
    LightConfig::point(
        "ceiling_ambient",
        "Ceiling light",
        Vec3::new(0.0, 2.8, 0.0),
        1.0,
        12.0,
        "#FFFFFF",
    ),
];

static NEUTRAL_LIGHTS: [LightConfig; 2] = [
    LightConfig::directional(
        "key_light",
        "Key light",
        Vec3::new(4.0, 6.0, 3.0),
        Vec3::new(-0.5, -0.8, -0.4),
        1.2,
        "#FFFFFF",
        Some(ShadowConfig::new(1024, 0.0001, 0.02)),
    ),
    LightConfig::point(
        "ceiling_light",
        "Ceiling light",
        Vec3::new(0.0, 2.6, 0.0),
        0.8,
        10.0,
        "#F2F2F2",
    ),
];

static WARM_LIGHTS: [LightConfig; 2] = [
    LightConfig::directional(
        "sunset_key",
        "Sunset key light",
        Vec3::new(-4.0, 5.0, 3.0),
        Vec3::new(0.6, -0.7, -0.4),
        1.3,
        "#FFD7A8",
        Some(WINDOW_SHADOWS),
    ),
    LightConfig::point(
        "warm_fill",
        "Warm fill",
        Vec3::new(0.0, 2.5, 0.0),
        0.7,
        10.0,
        "#FFB870",
    ),
];

static DRAMATIC_LIGHTS: [LightConfig; 3] = [
    LightConfig::spot(
        "spot_main",
        "Main spot",
        Vec3::new(0.0, 2.7, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        SpotCone {
            angle: 0.9,
            exponent: 2.0,
            decay: 1.0,
        },
        2.5,
        8.0,
        "#FFF1DC",
        Some(WINDOW_SHADOWS),
    ),
    LightConfig::spot(
        "accent_spot",
        "Accent spot",
        Vec3::new(-2.5, 2.7, 2.0),
        Vec3::new(0.6, -1.0, -0.5),
        SpotCone {
            angle: 0.6,
            exponent: 4.0,
            decay: 1.0,
        },
        1.8,
        7.0,
        "#FFD2A0",
        None,
    ),
    LightConfig::point(
        "rim_light",
        "Cool rim",
        Vec3::new(2.5, 1.5, -2.0),
        0.4,
        5.0,
        "#8FA8FF",
    ),
];

pub static LIGHTING_PRESETS: [LightingPreset; 4] = [
    LightingPreset {
        id: "natural",
        name: "Natural light",
        description: "Soft diffuse daylight from a side window",
        category: LightingCategory::Bright,
        ambient_intensity: 0.6,
        lights: &NATURAL_LIGHTS,
        bloom: BloomConfig::OFF,
        color_grade_intensity: 0.0,
    },
    LightingPreset {
        id: "neutral",
        name: "Neutral studio",
        description: "Balanced white key light with a ceiling fill",
        category: LightingCategory::Neutral,
        ambient_intensity: 0.5,
        lights: &NEUTRAL_LIGHTS,
        bloom: BloomConfig::OFF,
        color_grade_intensity: 0.0,
    },
    LightingPreset {
        id: "warm",
        name: "Warm evening",
        description: "Low golden key light with a warm ambient fill",
        category: LightingCategory::Warm,
        ambient_intensity: 0.45,
        lights: &WARM_LIGHTS,
        bloom: BloomConfig::OFF,
        color_grade_intensity: 0.0,
    },
    LightingPreset {
        id: "dramatic",
        name: "Dramatic spots",
        description: "Focused spotlights over a dark room with glow",
        category: LightingCategory::Dramatic,
        ambient_intensity: 0.2,
        lights: &DRAMATIC_LIGHTS,
        bloom: BloomConfig {
            enabled: true,
            intensity: 0.6,
            threshold: 0.75,
        },
        color_grade_intensity: 0.3,
    },
];
