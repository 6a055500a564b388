//! Procedural furniture as plain data: every builder returns a [`Composite`]
//! (root placement plus primitive parts) without touching the scene.

use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;

use super::primitives::Shape;

/// Material a part asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartMaterial {
    /// The material and color configured on the environment object.
    Primary,
    Fixed {
        kind: &'static str,
        color: &'static str,
    },
}

const fn fixed(kind: &'static str, color: &'static str) -> PartMaterial {
    PartMaterial::Fixed { kind, color }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub shape: Shape,
    /// Offset from the composite root, in the root's local space.
    pub offset: Vec3,
    pub rotation: Quat,
    pub material: PartMaterial,
}

impl Part {
    fn new(name: &'static str, shape: Shape, offset: Vec3, material: PartMaterial) -> Self {
        Self {
            name,
            shape,
            offset,
            rotation: Quat::IDENTITY,
            material,
        }
    }

    fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

pub type Parts = SmallVec<[Part; 12]>;

/// Root transform plus child primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    pub kind: Option<FurnitureKind>,
    pub position: Vec3,
    pub parts: Parts,
}

impl Composite {
    pub fn triangle_count(&self) -> u64 {
        self.parts.iter().map(|p| p.shape.triangle_count()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FurnitureKind {
    Sofa,
    Bed,
    MinimalBed,
    Table { width: f32, depth: f32 },
    Chair,
    Mirror,
    Sink,
    Dresser,
    Shelf,
    Tv,
    Plant,
    /// Flat decorative slab (rugs, wall frames) shaped entirely by the object scale.
    Decoration,
}

impl FurnitureKind {
    /// Resolves a preset type tag, including the legacy aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim().to_ascii_lowercase().as_str() {
            "sofa" => FurnitureKind::Sofa,
            "bed" => FurnitureKind::Bed,
            "minimal_bed" => FurnitureKind::MinimalBed,
            "table" | "dining_table" | "nightstand" => FurnitureKind::Table {
                width: 1.2,
                depth: 0.8,
            },
            "small_table" => FurnitureKind::Table {
                width: 0.6,
                depth: 0.4,
            },
            "chair" => FurnitureKind::Chair,
            "mirror" | "vanity" => FurnitureKind::Mirror,
            "sink" | "counter" | "bathtub" => FurnitureKind::Sink,
            "dresser" | "cabinet" => FurnitureKind::Dresser,
            "shelf" => FurnitureKind::Shelf,
            "tv" => FurnitureKind::Tv,
            "plant" => FurnitureKind::Plant,
            "decoration" => FurnitureKind::Decoration,
            _ => return None,
        };
        Some(kind)
    }

    pub fn build(self, position: Vec3) -> Composite {
        match self {
            FurnitureKind::Sofa => sofa(position),
            FurnitureKind::Bed => bed(position),
            FurnitureKind::MinimalBed => minimal_bed(position),
            FurnitureKind::Table { width, depth } => table(position, width, depth),
            FurnitureKind::Chair => chair(position),
            FurnitureKind::Mirror => mirror(position),
            FurnitureKind::Sink => sink(position),
            FurnitureKind::Dresser => dresser(position),
            FurnitureKind::Shelf => shelf(position),
            FurnitureKind::Tv => tv(position),
            FurnitureKind::Plant => plant(position),
            FurnitureKind::Decoration => decoration(position),
        }
    }
}

fn composite(kind: FurnitureKind, position: Vec3, parts: Parts) -> Composite {
    Composite {
        kind: Some(kind),
        position,
        parts,
    }
}

/// Unit cube stand-in for unrecognized type tags.
pub fn placeholder(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "placeholder",
        Shape::cube(1.0),
        Vec3::ZERO,
        PartMaterial::Primary,
    ));
    Composite {
        kind: None,
        position,
        parts,
    }
}

fn corners(x: f32, z: f32) -> [Vec3; 4] {
    [
        Vec3::new(-x, 0.0, -z),
        Vec3::new(x, 0.0, -z),
        Vec3::new(-x, 0.0, z),
        Vec3::new(x, 0.0, z),
    ]
}

const LEG_NAMES: [&str; 4] = ["leg-0", "leg-1", "leg-2", "leg-3"];

pub fn sofa(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "sofa-base",
        Shape::cuboid(2.4, 0.4, 0.9),
        Vec3::new(0.0, 0.2, 0.0),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "sofa-backrest",
        Shape::cuboid(2.4, 0.8, 0.15),
        Vec3::new(0.0, 0.6, -0.375),
        PartMaterial::Primary,
    ));
    for (name, side) in [("sofa-arm-l", -1.0), ("sofa-arm-r", 1.0)] {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.2, 0.6, 0.9),
            Vec3::new(side * 1.1, 0.4, 0.0),
            PartMaterial::Primary,
        ));
    }
    for (i, name) in ["cushion-0", "cushion-1", "cushion-2"].into_iter().enumerate() {
        parts.push(Part::new(
            name,
            Shape::ellipsoid(0.7, 0.2, 0.7),
            Vec3::new(-0.8 + i as f32 * 0.8, 0.5, 0.0),
            fixed("fabric", "#4D4D59"),
        ));
    }
    for (name, corner) in LEG_NAMES.into_iter().zip(corners(1.0, 0.3)) {
        parts.push(Part::new(
            name,
            Shape::cylinder(0.06, 0.15),
            corner + Vec3::Y * 0.075,
            fixed("polished_metal", "#B3B3B3"),
        ));
    }
    composite(FurnitureKind::Sofa, position, parts)
}

pub fn bed(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    for (name, corner) in LEG_NAMES.into_iter().zip(corners(0.65, 0.95)) {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.1, 0.3, 0.1),
            corner + Vec3::Y * 0.15,
            fixed("wood", "#654321"),
        ));
    }
    parts.push(Part::new(
        "bed-frame",
        Shape::cuboid(1.4, 0.1, 2.0),
        Vec3::new(0.0, 0.3, 0.0),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "bed-mattress",
        Shape::cuboid(1.35, 0.25, 1.95),
        Vec3::new(0.0, 0.525, 0.0),
        fixed("fabric", "#C0C0C0"),
    ));
    parts.push(Part::new(
        "bed-sheet",
        Shape::cuboid(1.3, 0.05, 1.4),
        Vec3::new(0.0, 0.8, -0.3),
        fixed("fabric", "#E8E8E8"),
    ));
    parts.push(Part::new(
        "bed-headboard",
        Shape::cuboid(1.45, 0.8, 0.1),
        Vec3::new(0.0, 0.6, 1.0),
        PartMaterial::Primary,
    ));
    for (i, name) in ["bed-pillow-0", "bed-pillow-1"].into_iter().enumerate() {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.5, 0.2, 0.4),
            Vec3::new(-0.35 + i as f32 * 0.7, 0.8, 0.55),
            fixed("fabric", "#F5F5F5"),
        ));
    }
    composite(FurnitureKind::Bed, position, parts)
}

pub fn minimal_bed(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "bed-mattress-minimal",
        Shape::cuboid(1.4, 0.15, 2.0),
        Vec3::new(0.0, 0.075, 0.0),
        PartMaterial::Primary,
    ));
    for (name, corner) in LEG_NAMES.into_iter().zip(corners(0.65, 0.9)) {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.06, 0.05, 0.06),
            corner + Vec3::Y * 0.025,
            fixed("wood", "#4A4A4A"),
        ));
    }
    parts.push(Part::new(
        "minimal-pillow",
        Shape::cuboid(0.35, 0.1, 0.4),
        Vec3::new(0.0, 0.2, 0.7),
        fixed("fabric", "#E0E0E0"),
    ));
    composite(FurnitureKind::MinimalBed, position, parts)
}

/// Round pedestal table; the top spans the larger footprint side plus 10%.
pub fn table(position: Vec3, width: f32, depth: f32) -> Composite {
    let top_diameter = width.max(depth) * 1.1;
    let mut parts = Parts::new();
    parts.push(Part::new(
        "table-top",
        Shape::tapered(top_diameter, top_diameter, 0.05, 32),
        Vec3::new(0.0, 0.4, 0.0),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "table-base",
        Shape::tapered(0.3, 0.5, 0.35, 16),
        Vec3::new(0.0, 0.175, 0.0),
        fixed("metal", "#262626"),
    ));
    parts.push(Part::new(
        "table-detail",
        Shape::tapered(0.1, 0.1, 0.01, 16),
        Vec3::new(0.0, 0.43, 0.0),
        fixed("copper", "#998050"),
    ));
    composite(FurnitureKind::Table { width, depth }, position, parts)
}

pub fn chair(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "chair-seat",
        Shape::cuboid(0.5, 0.05, 0.5),
        Vec3::new(0.0, 0.35, 0.0),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "chair-back",
        Shape::cuboid(0.5, 0.5, 0.1),
        Vec3::new(0.0, 0.5, -0.2),
        PartMaterial::Primary,
    ));
    for (name, corner) in LEG_NAMES.into_iter().zip(corners(0.2, 0.2)) {
        parts.push(Part::new(
            name,
            Shape::cylinder(0.04, 0.35),
            corner + Vec3::Y * 0.175,
            fixed("metal", "#4A4A4A"),
        ));
    }
    composite(FurnitureKind::Chair, position, parts)
}

pub fn mirror(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "mirror-frame",
        Shape::cuboid(0.8, 1.0, 0.05),
        Vec3::ZERO,
        fixed("chrome", "#C0C0C0"),
    ));
    parts.push(Part::new(
        "mirror-glass",
        Shape::cuboid(0.7, 0.9, 0.02),
        Vec3::new(0.0, 0.0, 0.02),
        fixed("mirror", "#E0E8F0"),
    ));
    composite(FurnitureKind::Mirror, position, parts)
}

pub fn sink(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "sink-cabinet",
        Shape::cuboid(0.6, 0.6, 0.5),
        Vec3::new(0.0, 0.3, 0.0),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "sink-counter",
        Shape::cuboid(0.7, 0.05, 0.6),
        Vec3::new(0.0, 0.65, 0.0),
        fixed("marble", "#A0A8B0"),
    ));
    parts.push(Part::new(
        "sink-basin",
        Shape::cuboid(0.3, 0.08, 0.25),
        Vec3::new(0.0, 0.59, 0.0),
        fixed("ceramic", "#C0C8D0"),
    ));
    parts.push(Part::new(
        "sink-faucet",
        Shape::cylinder(0.04, 0.25),
        Vec3::new(0.0, 0.75, 0.0),
        fixed("chrome", "#D4D4D4"),
    ));
    composite(FurnitureKind::Sink, position, parts)
}

pub fn dresser(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    for (name, corner) in LEG_NAMES.into_iter().zip(corners(0.35, 0.15)) {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.08, 0.35, 0.08),
            corner + Vec3::Y * 0.175,
            fixed("wood", "#654321"),
        ));
    }
    parts.push(Part::new(
        "dresser-body",
        Shape::cuboid(0.85, 0.7, 0.4),
        Vec3::new(0.0, 0.35, 0.0),
        PartMaterial::Primary,
    ));
    let drawers = [
        ("dresser-drawer-0", "dresser-handle-0"),
        ("dresser-drawer-1", "dresser-handle-1"),
        ("dresser-drawer-2", "dresser-handle-2"),
    ];
    for (i, (drawer, handle)) in drawers.into_iter().enumerate() {
        let y = 0.15 + i as f32 * 0.22;
        parts.push(Part::new(
            drawer,
            Shape::cuboid(0.75, 0.18, 0.35),
            Vec3::new(0.0, y, -0.02),
            fixed("wood", "#A89070"),
        ));
        parts.push(
            Part::new(
                handle,
                Shape::cylinder(0.04, 0.15),
                Vec3::new(0.0, y, -0.15),
                fixed("chrome", "#C0C0C0"),
            )
            .rotated(Quat::from_rotation_z(FRAC_PI_2)),
        );
    }
    composite(FurnitureKind::Dresser, position, parts)
}

pub fn shelf(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    for (name, side) in [("shelf-support-l", -1.0), ("shelf-support-r", 1.0)] {
        parts.push(Part::new(
            name,
            Shape::cuboid(0.08, 1.3, 0.15),
            Vec3::new(side * 0.6, 0.65, 0.0),
            PartMaterial::Primary,
        ));
    }
    for (i, name) in ["shelf-board-0", "shelf-board-1", "shelf-board-2"]
        .into_iter()
        .enumerate()
    {
        parts.push(Part::new(
            name,
            Shape::cuboid(1.25, 0.03, 0.3),
            Vec3::new(0.0, 0.15 + i as f32 * 0.45, 0.0),
            fixed("wood", "#8B7B6B"),
        ));
    }
    composite(FurnitureKind::Shelf, position, parts)
}

pub fn tv(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "tv-stand",
        Shape::cuboid(0.15, 0.35, 0.15),
        Vec3::new(0.0, 0.175, 0.0),
        fixed("plastic", "#3A3A3A"),
    ));
    parts.push(Part::new(
        "tv-stand-base",
        Shape::cuboid(0.5, 0.05, 0.2),
        Vec3::new(0.0, 0.025, 0.0),
        fixed("plastic", "#2A2A2A"),
    ));
    parts.push(Part::new(
        "tv-frame",
        Shape::cuboid(0.78, 0.48, 0.04),
        Vec3::new(0.0, 0.3, 0.01),
        PartMaterial::Primary,
    ));
    parts.push(Part::new(
        "tv-screen",
        Shape::cuboid(0.68, 0.38, 0.02),
        Vec3::new(0.0, 0.3, 0.015),
        fixed("screen", "#2A2A3A"),
    ));
    composite(FurnitureKind::Tv, position, parts)
}

pub fn plant(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "plant-pot",
        Shape::cylinder(0.2, 0.25),
        Vec3::new(0.0, 0.125, 0.0),
        fixed("terracotta", "#C8956C"),
    ));
    parts.push(Part::new(
        "plant-foliage",
        Shape::sphere(0.4, 8),
        Vec3::new(0.0, 0.35, 0.0),
        PartMaterial::Primary,
    ));
    composite(FurnitureKind::Plant, position, parts)
}

pub fn decoration(position: Vec3) -> Composite {
    let mut parts = Parts::new();
    parts.push(Part::new(
        "decoration",
        Shape::cube(1.0),
        Vec3::ZERO,
        PartMaterial::Primary,
    ));
    composite(FurnitureKind::Decoration, position, parts)
}
