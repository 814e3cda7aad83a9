/// GLSL basic types — scalars, vectors, and matrices
///
/// Sizes and shapes are pure functions of the type tag. `bool` occupies a
/// 4-byte unsigned integer in buffer memory, matching what the GL expects
/// for interface-block storage.

use std::fmt;

use crate::error::{Error, Result};

/// The GLSL scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool` — stored as a 4-byte unsigned integer
    Bool,
    /// `int` — 32-bit signed integer
    Int,
    /// `uint` — 32-bit unsigned integer
    UInt,
    /// `float` — 32-bit IEEE float
    Float,
    /// `double` — 64-bit IEEE float
    Double,
}

impl ScalarKind {
    /// Size of one scalar in buffer memory, in bytes
    pub fn machine_size(&self) -> u32 {
        match self {
            ScalarKind::Double => 8,
            _ => 4,
        }
    }

    /// The prefix used for derived type names (e.g. `b` for `bvec3`)
    pub fn prefix(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "b",
            ScalarKind::Int => "i",
            ScalarKind::UInt => "u",
            ScalarKind::Float => "",
            ScalarKind::Double => "d",
        }
    }

    /// The GLSL name of the scalar type
    pub fn glsl_name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::UInt => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }
}

/// A GLSL basic type usable inside an interface block
///
/// The enumeration is closed: scalars, 2- to 4-component vectors of any
/// scalar kind, and 2x2 to 4x4 matrices of `float` or `double`. Anything
/// else (samplers, images, unknown names) is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// A single scalar
    Scalar(ScalarKind),
    /// A vector of 2 to 4 components
    Vector {
        /// Component scalar kind
        scalar: ScalarKind,
        /// Number of components (2..=4)
        components: u32,
    },
    /// A matrix of 2..=4 columns by 2..=4 rows (floating-point only)
    Matrix {
        /// Component scalar kind (`Float` or `Double`)
        scalar: ScalarKind,
        /// Number of columns (2..=4)
        columns: u32,
        /// Number of rows (2..=4)
        rows: u32,
    },
}

impl BaseType {
    /// Construct a vector type, validating the component count
    pub fn vector(scalar: ScalarKind, components: u32) -> Result<Self> {
        if !(2..=4).contains(&components) {
            return Err(Error::UnknownType(format!(
                "no {}-component vector type",
                components
            )));
        }
        Ok(BaseType::Vector { scalar, components })
    }

    /// Construct a matrix type, validating shape and scalar kind
    ///
    /// `columns` x `rows` follows GLSL `matCxR` naming. Only floating-point
    /// matrices exist in GLSL.
    pub fn matrix(scalar: ScalarKind, columns: u32, rows: u32) -> Result<Self> {
        if !matches!(scalar, ScalarKind::Float | ScalarKind::Double) {
            return Err(Error::UnknownType(format!(
                "no matrix type with '{}' components",
                scalar.glsl_name()
            )));
        }
        if !(2..=4).contains(&columns) || !(2..=4).contains(&rows) {
            return Err(Error::UnknownType(format!(
                "no mat{}x{} type",
                columns, rows
            )));
        }
        Ok(BaseType::Matrix {
            scalar,
            columns,
            rows,
        })
    }

    /// Resolve a GLSL type name (`"vec3"`, `"dmat3x2"`, `"uint"`, ...)
    ///
    /// Fails with [`Error::UnknownType`] for names outside the enumeration.
    /// Opaque types (`sampler2D` etc.) are recognized but rejected explicitly:
    /// they have no storage in an interface block.
    pub fn parse(name: &str) -> Result<Self> {
        if name.contains("sampler") || name.contains("image") {
            return Err(Error::UnknownType(format!(
                "opaque type '{}' has no storage in an interface block",
                name
            )));
        }

        match name {
            "bool" => return Ok(BaseType::Scalar(ScalarKind::Bool)),
            "int" => return Ok(BaseType::Scalar(ScalarKind::Int)),
            "uint" => return Ok(BaseType::Scalar(ScalarKind::UInt)),
            "float" => return Ok(BaseType::Scalar(ScalarKind::Float)),
            "double" => return Ok(BaseType::Scalar(ScalarKind::Double)),
            _ => {}
        }

        let unknown = || Error::UnknownType(format!("no such GLSL type '{}'", name));

        // Optional scalar prefix, then "vec" or "mat"
        let (scalar, rest) = match name.as_bytes().first() {
            Some(b'b') => (ScalarKind::Bool, &name[1..]),
            Some(b'i') => (ScalarKind::Int, &name[1..]),
            Some(b'u') => (ScalarKind::UInt, &name[1..]),
            Some(b'd') => (ScalarKind::Double, &name[1..]),
            _ => (ScalarKind::Float, name),
        };

        if let Some(dims) = rest.strip_prefix("vec") {
            let components: u32 = dims.parse().map_err(|_| unknown())?;
            return BaseType::vector(scalar, components);
        }

        if let Some(dims) = rest.strip_prefix("mat") {
            // "matC" is square; "matCxR" is C columns by R rows
            let (columns, rows) = match dims.split_once('x') {
                Some((c, r)) => (
                    c.parse().map_err(|_| unknown())?,
                    r.parse().map_err(|_| unknown())?,
                ),
                None => {
                    let n: u32 = dims.parse().map_err(|_| unknown())?;
                    (n, n)
                }
            };
            return BaseType::matrix(scalar, columns, rows);
        }

        Err(unknown())
    }

    /// The scalar kind of this type's components
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            BaseType::Scalar(s) => *s,
            BaseType::Vector { scalar, .. } => *scalar,
            BaseType::Matrix { scalar, .. } => *scalar,
        }
    }

    /// Total number of scalar components
    pub fn component_count(&self) -> u32 {
        match self {
            BaseType::Scalar(_) => 1,
            BaseType::Vector { components, .. } => *components,
            BaseType::Matrix { columns, rows, .. } => columns * rows,
        }
    }

    /// Unpadded size in bytes (components x scalar size)
    pub fn machine_size(&self) -> u32 {
        self.component_count() * self.scalar_kind().machine_size()
    }

    /// `(columns, rows)` for matrices, `None` otherwise
    pub fn matrix_shape(&self) -> Option<(u32, u32)> {
        match self {
            BaseType::Matrix { columns, rows, .. } => Some((*columns, *rows)),
            _ => None,
        }
    }

    /// True for matrix types
    pub fn is_matrix(&self) -> bool {
        matches!(self, BaseType::Matrix { .. })
    }
}

impl fmt::Display for BaseType {
    /// Formats as the canonical GLSL name (`vec3`, `dmat4`, `mat2x3`, ...)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Scalar(s) => write!(f, "{}", s.glsl_name()),
            BaseType::Vector { scalar, components } => {
                write!(f, "{}vec{}", scalar.prefix(), components)
            }
            BaseType::Matrix {
                scalar,
                columns,
                rows,
            } => {
                if columns == rows {
                    write!(f, "{}mat{}", scalar.prefix(), columns)
                } else {
                    write!(f, "{}mat{}x{}", scalar.prefix(), columns, rows)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "base_type_tests.rs"]
mod tests;
