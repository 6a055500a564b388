use std::fmt;

/// Which preset table a lookup failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetKind {
    Lighting,
    Environment,
    Camera,
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PresetKind::Lighting => "lighting",
            PresetKind::Environment => "environment",
            PresetKind::Camera => "camera",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("render engine used before initialize()")]
    NotInitialized,
    #[error("render engine has been disposed")]
    Disposed,
    #[error("{kind} preset not found: {id}")]
    PresetNotFound { kind: PresetKind, id: String },
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    #[error("spot light {0} has no cone configuration")]
    MissingSpotCone(String),
    #[error("camera position coincides with its target")]
    DegenerateOrbit,
    #[error("unknown scene handle {0}")]
    UnknownHandle(String),
    #[error("shadow maps need a directional or spot light")]
    ShadowUnsupported,
}

impl SceneError {
    pub fn not_found(kind: PresetKind, id: &str) -> Self {
        SceneError::PresetNotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SceneError>;
