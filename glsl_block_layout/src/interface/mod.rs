//! Shader interface descriptors
//!
//! Provides the immutable descriptions of declared shader variables:
//! [`Variable`] (name + type + optional array length + optional matrix-order
//! override), [`StructDef`] (an ordered aggregate of variables), and
//! [`StructRegistry`] (the arena of struct definitions, referenced by
//! [`StructKey`] so the type graph stays acyclic by construction).

mod variable;
mod struct_registry;

pub use variable::{VarType, Variable};
pub use struct_registry::{StructDef, StructKey, StructRegistry};
