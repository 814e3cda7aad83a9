use std::sync::Arc;

use glam::{Mat2, Vec2, Vec3};

use super::*;
use crate::block::{BlockDesc, BlockKind};
use crate::interface::{StructDef, StructRegistry, Variable};
use crate::layout::BlockLayout;

fn scene_buffer() -> BlockBuffer {
    // std140: exposure [0,4), tint [16,28), weights stride 16 [32,96),
    // warp (mat2, stride 16) [96,128)
    let desc = BlockDesc::new("Scene")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("exposure", "float").unwrap())
        .with_member(Variable::parse("tint", "vec3").unwrap())
        .with_member(Variable::parse("weights", "float").unwrap().array(4))
        .with_member(Variable::parse("warp", "mat2").unwrap());
    let block = Block::describe(desc, &StructRegistry::new()).unwrap();
    BlockBuffer::new(Arc::new(block))
}

fn read_f32(buffer: &BlockBuffer, offset: usize) -> f32 {
    f32::from_ne_bytes(buffer.as_bytes()[offset..offset + 4].try_into().unwrap())
}

fn read_u32(buffer: &BlockBuffer, offset: usize) -> u32 {
    u32::from_ne_bytes(buffer.as_bytes()[offset..offset + 4].try_into().unwrap())
}

#[test]
fn test_new_buffer_is_zeroed_to_total_size() {
    let buffer = scene_buffer();
    assert_eq!(buffer.len(), 128);
    assert!(!buffer.is_empty());
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_set_scalar_at_resolved_offset() {
    let mut buffer = scene_buffer();
    buffer.set_f32("exposure", 2.5).unwrap();
    assert_eq!(read_f32(&buffer, 0), 2.5);
    // Neighbouring bytes untouched
    assert!(buffer.as_bytes()[4..].iter().all(|&b| b == 0));
}

#[test]
fn test_set_vector() {
    let mut buffer = scene_buffer();
    buffer.set_vec3("tint", Vec3::new(1.0, 0.5, 0.25)).unwrap();
    assert_eq!(read_f32(&buffer, 16), 1.0);
    assert_eq!(read_f32(&buffer, 20), 0.5);
    assert_eq!(read_f32(&buffer, 24), 0.25);
}

#[test]
fn test_set_float_slice_honours_stride() {
    let mut buffer = scene_buffer();
    buffer.set_f32_slice("weights", &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(read_f32(&buffer, 32), 1.0);
    assert_eq!(read_f32(&buffer, 48), 2.0);
    assert_eq!(read_f32(&buffer, 64), 3.0);
    // Padding between strided elements stays zero
    assert_eq!(read_f32(&buffer, 36), 0.0);
    // Unwritten fourth element stays zero
    assert_eq!(read_f32(&buffer, 80), 0.0);
}

#[test]
fn test_set_float_slice_too_long_rejected() {
    let mut buffer = scene_buffer();
    let err = buffer
        .set_f32_slice("weights", &[0.0; 5])
        .unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { len: 4, .. }));
}

#[test]
fn test_set_matrix_column_major() {
    let mut buffer = scene_buffer();
    let m = Mat2::from_cols(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
    buffer.set_mat2("warp", m).unwrap();
    // Columns land at consecutive 16-byte strides
    assert_eq!(read_f32(&buffer, 96), 1.0);
    assert_eq!(read_f32(&buffer, 100), 2.0);
    assert_eq!(read_f32(&buffer, 112), 3.0);
    assert_eq!(read_f32(&buffer, 116), 4.0);
}

#[test]
fn test_set_matrix_row_major() {
    let desc = BlockDesc::new("M")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("warp", "mat2").unwrap().row_major());
    let block = Block::describe(desc, &StructRegistry::new()).unwrap();
    let mut buffer = BlockBuffer::new(Arc::new(block));

    let m = Mat2::from_cols(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
    buffer.set_mat2("warp", m).unwrap();
    // Rows land at the strides instead
    assert_eq!(read_f32(&buffer, 0), 1.0);
    assert_eq!(read_f32(&buffer, 4), 3.0);
    assert_eq!(read_f32(&buffer, 16), 2.0);
    assert_eq!(read_f32(&buffer, 20), 4.0);
}

#[test]
fn test_set_single_matrix_vector() {
    let mut buffer = scene_buffer();
    buffer.set_vec2("warp[1]", Vec2::new(7.0, 8.0)).unwrap();
    assert_eq!(read_f32(&buffer, 112), 7.0);
    assert_eq!(read_f32(&buffer, 116), 8.0);
}

#[test]
fn test_set_bool_stores_uint() {
    let desc = BlockDesc::new("Flags")
        .with_layout(BlockLayout::Std140)
        .with_member(Variable::parse("enabled", "bool").unwrap())
        .with_member(Variable::parse("count", "uint").unwrap());
    let block = Block::describe(desc, &StructRegistry::new()).unwrap();
    let mut buffer = BlockBuffer::new(Arc::new(block));

    buffer.set_bool("enabled", true).unwrap();
    buffer.set_u32("count", 9).unwrap();
    assert_eq!(read_u32(&buffer, 0), 1);
    assert_eq!(read_u32(&buffer, 4), 9);

    buffer.set_bool("enabled", false).unwrap();
    assert_eq!(read_u32(&buffer, 0), 0);
}

#[test]
fn test_set_through_struct_array_path() {
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
    let key = registry.lookup("Light").unwrap();

    let desc = BlockDesc::new("Lighting")
        .with_kind(BlockKind::ShaderStorage)
        .with_layout(BlockLayout::Std430)
        .with_member(Variable::of_struct("lights", key).array(4));
    let block = Block::describe(desc, &registry).unwrap();
    let mut buffer = BlockBuffer::new(Arc::new(block));

    // Light is 16 bytes, so lights[1] starts at 16
    buffer
        .set_vec3("lights[1].color", Vec3::new(1.0, 1.0, 0.5))
        .unwrap();
    buffer.set_f32("lights[1].intensity", 40.0).unwrap();
    assert_eq!(read_f32(&buffer, 16), 1.0);
    assert_eq!(read_f32(&buffer, 24), 0.5);
    assert_eq!(read_f32(&buffer, 28), 40.0);
}

#[test]
fn test_type_mismatch_rejected() {
    let mut buffer = scene_buffer();
    assert!(matches!(
        buffer.set_f32("tint", 1.0),
        Err(Error::UnknownType(_))
    ));
    assert!(matches!(
        buffer.set_vec2("tint", Vec2::ZERO),
        Err(Error::UnknownType(_))
    ));
    assert!(matches!(
        buffer.set_mat2("exposure", Mat2::IDENTITY),
        Err(Error::UnknownType(_))
    ));
    assert!(matches!(
        buffer.set_f32_slice("exposure", &[1.0]),
        Err(Error::UnknownType(_))
    ));
}

#[test]
fn test_unknown_path_propagates() {
    let mut buffer = scene_buffer();
    assert!(matches!(
        buffer.set_f32("missing", 1.0),
        Err(Error::UnknownMember { .. })
    ));
    assert!(matches!(
        buffer.set_f32("weights[9]", 1.0),
        Err(Error::IndexOutOfRange { .. })
    ));
}
