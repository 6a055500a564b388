// Procedural furniture and primitive tessellation.

use glam::Vec3;
use showroom_core::geometry::{furniture_for_tag, FurnitureKind, PartMaterial, Shape, UnitMesh};

#[test]
fn known_tags_build_expected_part_counts() {
    let cases = [
        ("sofa", 11),
        ("bed", 10),
        ("table", 3),
        ("chair", 6),
        ("mirror", 2),
        ("sink", 4),
        ("dresser", 11),
        ("minimal_bed", 6),
        ("shelf", 5),
        ("tv", 4),
        ("plant", 2),
        ("decoration", 1),
    ];
    for (tag, parts) in cases {
        let c = furniture_for_tag(tag, Vec3::ZERO);
        assert!(c.kind.is_some(), "{tag}");
        assert_eq!(c.parts.len(), parts, "{tag}");
    }
}

#[test]
fn aliases_resolve_to_base_kinds() {
    assert_eq!(FurnitureKind::from_tag("vanity"), Some(FurnitureKind::Mirror));
    assert_eq!(FurnitureKind::from_tag("bathtub"), Some(FurnitureKind::Sink));
    assert_eq!(FurnitureKind::from_tag("cabinet"), Some(FurnitureKind::Dresser));
    assert!(matches!(
        FurnitureKind::from_tag("Nightstand"),
        Some(FurnitureKind::Table { .. })
    ));
    match FurnitureKind::from_tag("small_table") {
        Some(FurnitureKind::Table { width, depth }) => assert!(width < 1.0 && depth < 1.0),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_tag_is_a_primary_cube() {
    let c = furniture_for_tag("teleporter", Vec3::new(1.0, 2.0, 3.0));
    assert!(c.kind.is_none());
    assert_eq!(c.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(c.parts.len(), 1);
    assert_eq!(c.parts[0].shape, Shape::cube(1.0));
    assert_eq!(c.parts[0].material, PartMaterial::Primary);
}

#[test]
fn furniture_sits_on_the_floor() {
    for tag in ["sofa", "bed", "table", "chair", "dresser", "plant"] {
        let c = furniture_for_tag(tag, Vec3::ZERO);
        for part in &c.parts {
            let (_, scale) = part.shape.unit_mesh();
            let bottom = part.offset.y - scale.y / 2.0;
            assert!(bottom > -1e-3, "{tag}/{} dips below the floor", part.name);
        }
    }
}

#[test]
fn tessellation_matches_triangle_counts() {
    let shapes = [
        Shape::cube(2.0),
        Shape::cylinder(0.5, 1.0),
        Shape::tapered(0.2, 0.6, 1.0, 7),
        Shape::sphere(1.0, 8),
        Shape::ground(6.0, 5.0, 10),
    ];
    for shape in shapes {
        let (unit, _) = shape.unit_mesh();
        let mesh = unit.tessellate();
        assert_eq!(mesh.triangle_count() as u64, unit.triangle_count(), "{shape:?}");
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|i| *i < max));
    }
}

#[test]
fn unit_meshes_share_keys_across_sizes() {
    let (a, sa) = Shape::cuboid(1.0, 2.0, 3.0).unit_mesh();
    let (b, sb) = Shape::cube(5.0).unit_mesh();
    assert_eq!(a, b);
    assert_eq!(sa, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(sb, Vec3::splat(5.0));

    let (t1, _) = Shape::tapered(0.3, 0.5, 0.35, 16).unit_mesh();
    let (t2, _) = Shape::tapered(0.6, 1.0, 2.0, 16).unit_mesh();
    assert_eq!(t1, t2);
    assert!(matches!(t1, UnitMesh::Cylinder { top_permille: 600, bottom_permille: 1000, .. }));
}

#[test]
fn ground_faces_up() {
    let mesh = UnitMesh::Ground { subdivisions: 2 }.tessellate();
    for tri in mesh.indices.chunks(3) {
        let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
        let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
        assert!(n.y > 0.0);
    }
}
