//! GLSL basic-type registry
//!
//! Defines the closed set of GLSL scalar, vector, and matrix types that may
//! appear inside an interface block, with their machine sizes and component
//! shapes. Opaque types (samplers) are recognized by name but rejected: they
//! have no storage in a block.

mod base_type;

pub use base_type::{BaseType, ScalarKind};
