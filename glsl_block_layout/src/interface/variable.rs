/// Variable descriptor — a single declared shader variable
///
/// A Variable is created once when a shader interface is described and is
/// immutable thereafter. Struct-typed variables reference their definition
/// through a [`StructKey`] rather than owning it, so one struct definition
/// can back many variables (each with its own array length or matrix-order
/// override).

use std::fmt;

use crate::error::Result;
use crate::interface::StructKey;
use crate::layout::MatrixOrder;
use crate::types::BaseType;

/// The type of a declared variable: a basic type or a struct reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// Scalar, vector, or matrix
    Basic(BaseType),
    /// Reference into the [`StructRegistry`](crate::interface::StructRegistry)
    Struct(StructKey),
}

/// A named shader variable, optionally an array, optionally with an explicit
/// matrix storage order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    ty: VarType,
    array_len: Option<u32>,
    matrix_order: Option<MatrixOrder>,
}

impl Variable {
    /// Create a variable of a basic type
    pub fn new(name: impl Into<String>, ty: BaseType) -> Self {
        Self {
            name: name.into(),
            ty: VarType::Basic(ty),
            array_len: None,
            matrix_order: None,
        }
    }

    /// Create a variable from a GLSL type name (e.g. `Variable::parse("eye", "vec3")`)
    ///
    /// Fails with [`Error::UnknownType`](crate::Error::UnknownType) for names
    /// outside the basic-type enumeration, including opaque types.
    pub fn parse(name: impl Into<String>, type_name: &str) -> Result<Self> {
        Ok(Self::new(name, BaseType::parse(type_name)?))
    }

    /// Create a variable of a registered struct type
    pub fn of_struct(name: impl Into<String>, key: StructKey) -> Self {
        Self {
            name: name.into(),
            ty: VarType::Struct(key),
            array_len: None,
            matrix_order: None,
        }
    }

    /// Declare this variable as an array of `len` elements
    ///
    /// `len` must be at least 1 (GLSL has no zero-length declared arrays).
    pub fn array(mut self, len: u32) -> Self {
        assert!(len >= 1, "array length must be at least 1");
        self.array_len = Some(len);
        self
    }

    /// Override matrix storage to row-major for this variable
    ///
    /// For struct-typed variables the override applies to every matrix
    /// reached through the struct, as a `layout(row_major)` qualifier would.
    pub fn row_major(mut self) -> Self {
        self.matrix_order = Some(MatrixOrder::RowMajor);
        self
    }

    /// Override matrix storage to column-major for this variable
    pub fn column_major(mut self) -> Self {
        self.matrix_order = Some(MatrixOrder::ColumnMajor);
        self
    }

    /// The declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type
    pub fn ty(&self) -> &VarType {
        &self.ty
    }

    /// Declared array length, or `None` for a non-array variable
    pub fn array_len(&self) -> Option<u32> {
        self.array_len
    }

    /// Explicit matrix-order override, or `None` to inherit the block default
    pub fn matrix_order(&self) -> Option<MatrixOrder> {
        self.matrix_order
    }
}

impl fmt::Display for Variable {
    /// Formats roughly as declared, e.g. `vec3 eye` or `float weights[4]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            VarType::Basic(ty) => write!(f, "{} {}", ty, self.name)?,
            VarType::Struct(_) => write!(f, "struct {}", self.name)?,
        }
        if let Some(len) = self.array_len {
            write!(f, "[{}]", len)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "variable_tests.rs"]
mod tests;
