use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomCategory {
    LivingRoom,
    Bathroom,
    Bedroom,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 3] = [
        RoomCategory::LivingRoom,
        RoomCategory::Bathroom,
        RoomCategory::Bedroom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomCategory::LivingRoom => "living-room",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::Bedroom => "bedroom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Four walls enclosing `width` x `depth`, `height` tall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub material: &'static str,
    pub color: &'static str,
}

/// Floor or ceiling plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneConfig {
    pub width: f32,
    pub depth: f32,
    pub material: &'static str,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentObject {
    pub id: &'static str,
    /// Furniture type tag, e.g. `"sofa"`.
    pub kind: &'static str,
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation about +Y in radians.
    pub yaw: f32,
    pub material: &'static str,
    pub color: &'static str,
}

impl EnvironmentObject {
    pub const fn new(
        id: &'static str,
        kind: &'static str,
        position: Vec3,
        material: &'static str,
        color: &'static str,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            scale: Vec3::ONE,
            yaw: 0.0,
            material,
            color,
        }
    }

    pub const fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub const fn turned(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentGeometry {
    pub walls: WallConfig,
    pub floor: PlaneConfig,
    pub ceiling: PlaneConfig,
    pub objects: &'static [EnvironmentObject],
}

/// Named viewpoint bundled with an environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraShot {
    pub name: &'static str,
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: RoomCategory,
    pub geometry: EnvironmentGeometry,
    pub lighting_recommendation: &'static str,
    pub camera_shots: &'static [CameraShot],
}

static LIVING_ROOM_OBJECTS: [EnvironmentObject; 4] = [
    EnvironmentObject::new("sofa", "sofa", Vec3::new(0.0, 0.0, -1.6), "fabric", "#3C3F47"),
    EnvironmentObject::new("coffee_table", "table", Vec3::new(0.0, 0.0, 0.1), "wood", "#8B6F47"),
    EnvironmentObject::new("tv", "tv", Vec3::new(0.0, 0.45, 2.2), "plastic", "#1A1A1A").turned(PI),
    EnvironmentObject::new("plant", "plant", Vec3::new(2.4, 0.0, -2.0), "foliage", "#4A7C3C")
        .scaled(Vec3::new(1.5, 2.0, 1.5)),
];

static LIVING_ROOM_SHOTS: [CameraShot; 2] = [
    CameraShot {
        name: "Sofa view",
        position: Vec3::new(3.5, 2.2, 3.5),
        target: Vec3::new(0.0, 0.8, 0.0),
    },
    CameraShot {
        name: "Wide view",
        position: Vec3::new(-2.6, 2.4, 2.0),
        target: Vec3::new(0.5, 0.6, -0.5),
    },
];

static MODERN_LIVING_OBJECTS: [EnvironmentObject; 8] = [
    EnvironmentObject::new("sofa", "sofa", Vec3::new(1.5, 0.0, 0.0), "fabric", "#1A1A1A")
        .turned(-FRAC_PI_2),
    EnvironmentObject::new("rug", "decoration", Vec3::new(0.0, 0.01, 0.0), "fabric", "#8B7355")
        .scaled(Vec3::new(2.5, 0.01, 1.8)),
    EnvironmentObject::new("plant_main", "plant", Vec3::new(-0.5, 0.0, -2.4), "foliage", "#4A7C59")
        .scaled(Vec3::new(1.2, 1.6, 1.2)),
    EnvironmentObject::new("shelf_left", "shelf", Vec3::new(-3.7, 0.0, -1.5), "wood", "#F0F0F0")
        .turned(FRAC_PI_2),
    EnvironmentObject::new("frame_1", "decoration", Vec3::new(3.95, 1.8, 0.5), "wood_frame", "#2C2C2C")
        .scaled(Vec3::new(0.02, 0.6, 0.4)),
    EnvironmentObject::new("frame_2", "decoration", Vec3::new(3.95, 1.8, -0.3), "wood_frame", "#654321")
        .scaled(Vec3::new(0.02, 0.5, 0.3)),
    EnvironmentObject::new("frame_3", "decoration", Vec3::new(3.95, 1.5, -1.0), "wood_frame", "#C89858")
        .scaled(Vec3::new(0.02, 0.7, 0.5)),
    EnvironmentObject::new("tv_wall", "tv", Vec3::new(-3.8, 0.9, 0.0), "plastic", "#1A1A1A")
        .scaled(Vec3::new(1.6, 1.6, 1.6))
        .turned(FRAC_PI_2),
];

static MODERN_LIVING_SHOTS: [CameraShot; 1] = [CameraShot {
    name: "Fixed view",
    position: Vec3::new(-2.5, 2.0, 4.0),
    target: Vec3::new(1.0, 0.5, 0.0),
}];

static BATHROOM_OBJECTS: [EnvironmentObject; 4] = [
    EnvironmentObject::new("vanity_sink", "sink", Vec3::new(0.0, 0.0, -1.2), "wood", "#8B7355"),
    EnvironmentObject::new("mirror", "mirror", Vec3::new(0.0, 1.45, -1.44), "chrome", "#C0C0C0"),
    EnvironmentObject::new("storage", "cabinet", Vec3::new(-1.25, 0.0, -1.25), "wood", "#9B7F57"),
    EnvironmentObject::new("plant", "plant", Vec3::new(1.35, 0.0, -1.2), "foliage", "#4A7C3C"),
];

static BATHROOM_SHOTS: [CameraShot; 1] = [CameraShot {
    name: "Vanity view",
    position: Vec3::new(1.2, 1.7, 1.3),
    target: Vec3::new(0.0, 0.9, -1.2),
}];

static BEDROOM_OBJECTS: [EnvironmentObject; 5] = [
    EnvironmentObject::new("bed", "bed", Vec3::new(0.0, 0.0, -1.1), "wood", "#8B6F47").turned(PI),
    EnvironmentObject::new("nightstand", "small_table", Vec3::new(1.2, 0.0, -1.8), "wood", "#7A5C3A"),
    EnvironmentObject::new("dresser", "dresser", Vec3::new(-2.25, 0.0, 0.8), "wood", "#9B7F57")
        .turned(FRAC_PI_2),
    EnvironmentObject::new("reading_chair", "chair", Vec3::new(1.7, 0.0, 1.2), "fabric", "#6B6B6B")
        .turned(-2.4),
    EnvironmentObject::new("plant", "plant", Vec3::new(-2.1, 0.0, -1.9), "foliage", "#4A7C3C")
        .scaled(Vec3::new(1.3, 1.8, 1.3)),
];

static BEDROOM_SHOTS: [CameraShot; 2] = [
    CameraShot {
        name: "Doorway",
        position: Vec3::new(2.0, 1.9, 2.0),
        target: Vec3::new(-0.2, 0.6, -0.8),
    },
    CameraShot {
        name: "Bedside",
        position: Vec3::new(-1.6, 1.6, 1.6),
        target: Vec3::new(0.3, 0.5, -1.0),
    },
];

pub static ENVIRONMENT_PRESETS: [EnvironmentPreset; 4] = [
    EnvironmentPreset {
        id: "living-room",
        name: "Living room",
        description: "Compact living room with sofa, coffee table, TV and a plant",
        category: RoomCategory::LivingRoom,
        geometry: EnvironmentGeometry {
            walls: WallConfig {
                width: 6.0,
                height: 2.8,
                depth: 5.0,
                material: "wall",
                color: "#E8E4DC",
            },
            floor: PlaneConfig {
                width: 6.0,
                depth: 5.0,
                material: "wood_floor",
                color: "#B08D6A",
            },
            ceiling: PlaneConfig {
                width: 6.0,
                depth: 5.0,
                material: "plaster",
                color: "#F5F5F5",
            },
            objects: &LIVING_ROOM_OBJECTS,
        },
        lighting_recommendation: "Warm evening light",
        camera_shots: &LIVING_ROOM_SHOTS,
    },
    EnvironmentPreset {
        id: "modern-living-room",
        name: "Modern living room",
        description: "Contemporary living room with sofa, rug, shelf and wall frames",
        category: RoomCategory::LivingRoom,
        geometry: EnvironmentGeometry {
            walls: WallConfig {
                width: 8.0,
                height: 3.0,
                depth: 6.0,
                material: "wall",
                color: "#E8E8E8",
            },
            floor: PlaneConfig {
                width: 8.0,
                depth: 6.0,
                material: "wood_floor",
                color: "#D4D4D4",
            },
            ceiling: PlaneConfig {
                width: 8.0,
                depth: 6.0,
                material: "plaster",
                color: "#F5F5F5",
            },
            objects: &MODERN_LIVING_OBJECTS,
        },
        lighting_recommendation: "Soft natural light",
        camera_shots: &MODERN_LIVING_SHOTS,
    },
    EnvironmentPreset {
        id: "bathroom",
        name: "Bathroom",
        description: "Tiled bathroom with vanity, mirror and storage cabinet",
        category: RoomCategory::Bathroom,
        geometry: EnvironmentGeometry {
            walls: WallConfig {
                width: 3.5,
                height: 2.6,
                depth: 3.0,
                material: "ceramic_tile",
                color: "#E6EEF2",
            },
            floor: PlaneConfig {
                width: 3.5,
                depth: 3.0,
                material: "stone",
                color: "#9A9A94",
            },
            ceiling: PlaneConfig {
                width: 3.5,
                depth: 3.0,
                material: "false_ceiling",
                color: "#FAFAFA",
            },
            objects: &BATHROOM_OBJECTS,
        },
        lighting_recommendation: "Bright neutral light",
        camera_shots: &BATHROOM_SHOTS,
    },
    EnvironmentPreset {
        id: "bedroom",
        name: "Bedroom",
        description: "Bedroom with double bed, nightstand, dresser and reading chair",
        category: RoomCategory::Bedroom,
        geometry: EnvironmentGeometry {
            walls: WallConfig {
                width: 5.0,
                height: 2.7,
                depth: 4.5,
                material: "wall",
                color: "#EDE6DA",
            },
            floor: PlaneConfig {
                width: 5.0,
                depth: 4.5,
                material: "wooden_floor",
                color: "#9C7A54",
            },
            ceiling: PlaneConfig {
                width: 5.0,
                depth: 4.5,
                material: "plaster",
                color: "#F5F5F5",
            },
            objects: &BEDROOM_OBJECTS,
        },
        lighting_recommendation: "Warm evening light",
        camera_shots: &BEDROOM_SHOTS,
    },
];
