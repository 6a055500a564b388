use glam::Vec3;

use super::environment::RoomCategory;

/// Camera viewpoint. `fov_degrees` is the vertical field of view; zoom values
/// are orbit radii around `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Explicit orbit radius; `None` keeps the distance implied by position/target.
    pub current_zoom: Option<f32>,
    pub auto_rotate: bool,
    /// Radians per second.
    pub auto_rotate_speed: f32,
}

impl CameraSettings {
    const fn room(position: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            target,
            fov_degrees,
            min_zoom: 2.0,
            max_zoom: 12.0,
            current_zoom: None,
            auto_rotate: false,
            auto_rotate_speed: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Room the viewpoint is tuned for; `None` for general views.
    pub category: Option<RoomCategory>,
    pub settings: CameraSettings,
}

pub static CAMERA_PRESETS: [CameraPreset; 12] = [
    CameraPreset {
        id: "default",
        name: "Default view",
        description: "Cinematic diagonal view of the whole room",
        category: None,
        settings: CameraSettings::room(Vec3::new(4.0, 3.0, 4.0), Vec3::new(0.0, 0.5, 0.0), 52.0),
    },
    CameraPreset {
        id: "living-standard",
        name: "Living room",
        description: "Diagonal angle over sofa and table",
        category: Some(RoomCategory::LivingRoom),
        settings: CameraSettings::room(Vec3::new(4.5, 2.8, 4.5), Vec3::new(-0.5, 1.0, -0.5), 65.0),
    },
    CameraPreset {
        id: "living-commercial",
        name: "Commercial room",
        description: "Professional overview of the space",
        category: Some(RoomCategory::LivingRoom),
        settings: CameraSettings::room(Vec3::new(5.2, 3.2, 3.8), Vec3::new(0.0, 1.2, 0.0), 68.0),
    },
    CameraPreset {
        id: "living-gourmet",
        name: "Gourmet area",
        description: "Focus on the social area",
        category: Some(RoomCategory::LivingRoom),
        settings: CameraSettings::room(Vec3::new(4.8, 3.0, 4.2), Vec3::new(0.2, 1.0, 0.2), 70.0),
    },
    CameraPreset {
        id: "bathroom-modern",
        name: "Modern bathroom",
        description: "Clean view of vanity and fixtures",
        category: Some(RoomCategory::Bathroom),
        settings: CameraSettings::room(Vec3::new(3.5, 2.5, 3.5), Vec3::new(0.3, 1.0, 0.3), 72.0),
    },
    CameraPreset {
        id: "bathroom-rustic",
        name: "Rustic bathroom",
        description: "Lower angle showing materials",
        category: Some(RoomCategory::Bathroom),
        settings: CameraSettings::room(Vec3::new(3.8, 2.8, 3.2), Vec3::new(-0.2, 0.9, 0.2), 74.0),
    },
    CameraPreset {
        id: "bathroom-spa",
        name: "Spa bathroom",
        description: "Relaxed wide framing",
        category: Some(RoomCategory::Bathroom),
        settings: CameraSettings::room(Vec3::new(4.0, 3.0, 3.8), Vec3::new(0.0, 1.1, 0.0), 70.0),
    },
    CameraPreset {
        id: "bedroom-suite",
        name: "Suite",
        description: "Elevated view over the bed",
        category: Some(RoomCategory::Bedroom),
        settings: CameraSettings::room(Vec3::new(4.8, 3.2, 4.8), Vec3::new(0.0, 0.7, 0.0), 75.0),
    },
    CameraPreset {
        id: "bedroom-kids",
        name: "Kids room",
        description: "Playful high angle",
        category: Some(RoomCategory::Bedroom),
        settings: CameraSettings::room(Vec3::new(4.5, 3.0, 4.5), Vec3::new(0.0, 0.6, 0.0), 75.0),
    },
    CameraPreset {
        id: "bedroom-guest",
        name: "Guest room",
        description: "Neutral framing of the guest bed",
        category: Some(RoomCategory::Bedroom),
        settings: CameraSettings::room(Vec3::new(4.5, 3.0, 4.5), Vec3::new(0.0, 0.6, 0.0), 75.0),
    },
    CameraPreset {
        id: "showcase-orbit",
        name: "Showcase orbit",
        description: "Slow turntable around the room center",
        category: None,
        settings: CameraSettings {
            position: Vec3::new(5.0, 2.5, 0.0),
            target: Vec3::new(0.0, 0.8, 0.0),
            fov_degrees: 60.0,
            min_zoom: 3.0,
            max_zoom: 10.0,
            current_zoom: None,
            auto_rotate: true,
            auto_rotate_speed: 0.25,
        },
    },
    CameraPreset {
        id: "overhead",
        name: "Floor plan",
        description: "Top-down view of the layout",
        category: None,
        settings: CameraSettings {
            position: Vec3::new(0.0, 7.0, 0.0),
            target: Vec3::new(0.0, 0.0, 0.0),
            fov_degrees: 60.0,
            min_zoom: 3.0,
            max_zoom: 12.0,
            current_zoom: None,
            auto_rotate: false,
            auto_rotate_speed: 0.0,
        },
    },
];
