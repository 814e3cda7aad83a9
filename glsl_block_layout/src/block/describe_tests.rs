use super::*;
use crate::interface::{StructDef, StructRegistry, Variable};
use crate::layout::{BlockLayout, MatrixOrder};
use crate::types::ScalarKind;

fn empty_registry() -> StructRegistry {
    StructRegistry::new()
}

fn registry_with_light() -> StructRegistry {
    let mut registry = StructRegistry::new();
    registry
        .register(
            StructDef::new(
                "Light",
                vec![
                    Variable::parse("color", "vec3").unwrap(),
                    Variable::parse("intensity", "float").unwrap(),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    registry
}

fn camera_block() -> Block {
    let desc = BlockDesc::new("Camera")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("view_projection", "mat4").unwrap())
        .with_member(Variable::parse("eye", "vec3").unwrap());
    Block::describe(desc, &empty_registry()).unwrap()
}

// ============================================================================
// Description
// ============================================================================

#[test]
fn test_describe_computes_total_size() {
    let block = camera_block();
    assert_eq!(block.name(), "Camera");
    assert_eq!(block.layout(), BlockLayout::Std140);
    assert_eq!(block.kind(), BlockKind::Uniform);
    // mat4 occupies [0, 64), vec3 [64, 76), struct padded to 16
    assert_eq!(block.total_size(), 80);
}

#[test]
fn test_default_layout_is_shared_and_rejected() {
    let desc = BlockDesc::new("Anon").with_member(Variable::parse("x", "float").unwrap());
    let err = Block::describe(desc, &empty_registry()).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedLayout {
            block: "Anon".to_string(),
            layout: BlockLayout::Shared,
        }
    );
}

#[test]
fn test_std430_uniform_block_rejected() {
    let desc = BlockDesc::new("Bad")
        .with_layout(BlockLayout::Std430)
        .with_member(Variable::parse("x", "float").unwrap());
    let err = Block::describe(desc, &empty_registry()).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedLayout {
            block: "Bad".to_string(),
            layout: BlockLayout::Std430,
        }
    );
}

#[test]
fn test_std430_storage_block_allowed() {
    let desc = BlockDesc::new("Particles")
        .with_kind(BlockKind::ShaderStorage)
        .with_layout(BlockLayout::Std430)
        .with_member(Variable::parse("positions", "vec3").unwrap().array(8));
    let block = Block::describe(desc, &empty_registry()).unwrap();
    // std430 keeps the vec3 alignment but not the 16-byte array rounding:
    // stride is still 16 here because the element itself rounds to its align
    assert_eq!(block.total_size(), 128);
}

#[test]
fn test_empty_block_rejected() {
    let desc = BlockDesc::new("Empty").with_layout(BlockLayout::Std140);
    assert!(matches!(
        Block::describe(desc, &empty_registry()),
        Err(Error::EmptyStruct(_))
    ));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_top_level_members() {
    let block = camera_block();

    let m = block.resolve("view_projection").unwrap();
    assert_eq!(m.offset, 0);
    assert_eq!(m.size, 64);
    assert_eq!(m.stride, 16);
    assert_eq!(m.element_count, 4);
    assert_eq!(m.components, 4);
    assert_eq!(m.scalar_kind, Some(ScalarKind::Float));
    assert_eq!(m.matrix_order, Some(MatrixOrder::ColumnMajor));

    let eye = block.resolve("eye").unwrap();
    assert_eq!(eye.offset, 64);
    assert_eq!(eye.size, 12);
    assert_eq!(eye.element_count, 1);
    assert_eq!(eye.components, 3);
    assert_eq!(eye.scalar_size(), 4);
}

#[test]
fn test_resolve_through_struct_array() {
    let registry = registry_with_light();
    let key = registry.lookup("Light").unwrap();
    let desc = BlockDesc::new("Lighting")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::of_struct("lights", key).array(4));
    let block = Block::describe(desc, &registry).unwrap();

    // Light is {vec3 color; float intensity}: size 16, so stride 16
    let lights = block.resolve("lights").unwrap();
    assert_eq!(lights.stride, 16);
    assert_eq!(lights.element_count, 4);
    assert_eq!(lights.scalar_kind, None);

    assert_eq!(block.resolve("lights[2].color").unwrap().offset, 32);
    assert_eq!(block.resolve("lights[2].intensity").unwrap().offset, 44);
    assert_eq!(block.resolve("lights[0]").unwrap().size, 16);
}

#[test]
fn test_resolve_nested_struct_path() {
    let mut registry = StructRegistry::new();
    let inner = registry
        .register(
            StructDef::new("Inner", vec![Variable::parse("v", "vec3").unwrap().array(2)])
                .unwrap(),
        )
        .unwrap();
    let outer = registry
        .register(
            StructDef::new(
                "Outer",
                vec![
                    Variable::parse("head", "float").unwrap(),
                    Variable::of_struct("inner", inner),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    let desc = BlockDesc::new("S")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::of_struct("s", outer));
    let block = Block::describe(desc, &registry).unwrap();

    // head [0,4), inner aligned to 16, v stride 16
    assert_eq!(block.resolve("s.head").unwrap().offset, 0);
    assert_eq!(block.resolve("s.inner").unwrap().offset, 16);
    assert_eq!(block.resolve("s.inner.v[1]").unwrap().offset, 32);
    assert_eq!(block.total_size(), 48);
}

#[test]
fn test_resolve_matrix_vector_and_component() {
    let block = camera_block();

    // One column of the mat4
    let column = block.resolve("view_projection[1]").unwrap();
    assert_eq!(column.offset, 16);
    assert_eq!(column.size, 16);
    assert_eq!(column.components, 4);
    assert_eq!(column.scalar_kind, Some(ScalarKind::Float));

    // One scalar of that column
    let cell = block.resolve("view_projection[1][2]").unwrap();
    assert_eq!(cell.offset, 24);
    assert_eq!(cell.size, 4);

    // One component of a vector
    assert_eq!(block.resolve("eye[1]").unwrap().offset, 68);
}

#[test]
fn test_resolve_row_major_matrix_vector() {
    let desc = BlockDesc::new("M")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("m", "mat3").unwrap().row_major());
    let block = Block::describe(desc, &empty_registry()).unwrap();

    let row = block.resolve("m[2]").unwrap();
    assert_eq!(row.offset, 32);
    assert_eq!(row.components, 3);
}

#[test]
fn test_resolve_index_out_of_range() {
    let registry = registry_with_light();
    let key = registry.lookup("Light").unwrap();
    let desc = BlockDesc::new("Lighting")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::of_struct("lights", key).array(4))
        .with_member(Variable::parse("m", "mat4").unwrap())
        .with_member(Variable::parse("v", "vec3").unwrap());
    let block = Block::describe(desc, &registry).unwrap();

    assert_eq!(
        block.resolve("lights[4]").unwrap_err(),
        Error::IndexOutOfRange {
            path: "lights[4]".to_string(),
            index: 4,
            len: 4,
        }
    );
    assert!(matches!(
        block.resolve("m[4][0]").unwrap_err(),
        Error::IndexOutOfRange { len: 4, .. }
    ));
    assert!(matches!(
        block.resolve("v[3]").unwrap_err(),
        Error::IndexOutOfRange { len: 3, .. }
    ));
}

#[test]
fn test_resolve_unknown_and_malformed_paths() {
    let registry = registry_with_light();
    let key = registry.lookup("Light").unwrap();
    let desc = BlockDesc::new("Lighting")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::of_struct("lights", key).array(4));
    let block = Block::describe(desc, &registry).unwrap();

    for bad in [
        "missing",
        "lights.color",        // array indexed by name
        "lights[0].radius",    // no such member
        "lights[0].color.x",   // vectors have no named members
        "lights[0][1]",        // struct indexed numerically
        "lights[0].intensity[0][0]",
        "lights[",
        "",
    ] {
        assert!(
            matches!(
                block.resolve(bad),
                Err(Error::UnknownMember { .. } | Error::IndexOutOfRange { .. })
            ),
            "expected `{bad}` to fail"
        );
    }

    assert_eq!(
        block.resolve("missing").unwrap_err(),
        Error::UnknownMember {
            block: "Lighting".to_string(),
            path: "missing".to_string(),
        }
    );
}

// ============================================================================
// Resources and naming
// ============================================================================

#[test]
fn test_resources_enumeration() {
    let registry = registry_with_light();
    let key = registry.lookup("Light").unwrap();
    let desc = BlockDesc::new("Scene")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("exposure", "float").unwrap())
        .with_member(Variable::parse("weights", "float").unwrap().array(4))
        .with_member(Variable::of_struct("sun", key))
        .with_member(Variable::of_struct("points", key).array(2));
    let block = Block::describe(desc, &registry).unwrap();

    assert_eq!(
        block.resources(),
        [
            "exposure",
            "weights[0]",
            "sun.color",
            "sun.intensity",
            "points[0].color",
            "points[0].intensity",
            "points[1].color",
            "points[1].intensity",
        ]
    );
}

#[test]
fn test_member_naming_without_instance_name() {
    let block = camera_block();
    assert_eq!(block.instance_name(), None);
    assert_eq!(block.api_name("eye"), "eye");
    assert_eq!(block.glsl_name("eye"), "eye");
}

#[test]
fn test_member_naming_with_instance_name() {
    let desc = BlockDesc::new("Camera")
        .with_layout(BlockLayout::Std140)
        .with_instance_name("cam")
        .with_member(Variable::parse("eye", "vec3").unwrap());
    let block = Block::describe(desc, &empty_registry()).unwrap();

    assert_eq!(block.instance_name(), Some("cam"));
    assert_eq!(block.api_name("eye"), "Camera.eye");
    assert_eq!(block.glsl_name("eye"), "cam.eye");
}
