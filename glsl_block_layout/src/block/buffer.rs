/// CPU staging buffer for a computed block
///
/// A [`BlockBuffer`] owns a byte vector of the block's total size and writes
/// member values at their resolved offsets, honoring strides and matrix
/// order. Upload to the GPU is the caller's business; [`BlockBuffer::as_bytes`]
/// hands over the finished bytes.

use std::sync::Arc;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::block::describe::{Block, Target};
use crate::error::{Error, Result};
use crate::layout::{LayoutKind, MatrixOrder};
use crate::types::ScalarKind;

/// Byte staging area sized and addressed by a [`Block`]
#[derive(Debug, Clone)]
pub struct BlockBuffer {
    block: Arc<Block>,
    bytes: Vec<u8>,
}

impl BlockBuffer {
    /// Allocate a zeroed staging buffer for the block
    pub fn new(block: Arc<Block>) -> Self {
        let bytes = vec![0u8; block.total_size() as usize];
        Self { block, bytes }
    }

    /// The block this buffer is addressed by
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// The staged bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer size in bytes (the block's total size)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-sized buffer (never the case for a computed block)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    /// Write a `float` member
    pub fn set_f32(&mut self, path: &str, value: f32) -> Result<()> {
        self.set_scalar(path, ScalarKind::Float, "float", bytemuck::bytes_of(&value))
    }

    /// Write a `double` member
    pub fn set_f64(&mut self, path: &str, value: f64) -> Result<()> {
        self.set_scalar(path, ScalarKind::Double, "double", bytemuck::bytes_of(&value))
    }

    /// Write an `int` member
    pub fn set_i32(&mut self, path: &str, value: i32) -> Result<()> {
        self.set_scalar(path, ScalarKind::Int, "int", bytemuck::bytes_of(&value))
    }

    /// Write a `uint` member
    pub fn set_u32(&mut self, path: &str, value: u32) -> Result<()> {
        self.set_scalar(path, ScalarKind::UInt, "uint", bytemuck::bytes_of(&value))
    }

    /// Write a `bool` member (stored as a 4-byte unsigned integer, 1 or 0)
    pub fn set_bool(&mut self, path: &str, value: bool) -> Result<()> {
        let raw: u32 = value.into();
        self.set_scalar(path, ScalarKind::Bool, "bool", bytemuck::bytes_of(&raw))
    }

    // ========================================================================
    // Vectors
    // ========================================================================

    /// Write a `vec2` member
    pub fn set_vec2(&mut self, path: &str, value: Vec2) -> Result<()> {
        self.set_vector(path, 2, "vec2", bytemuck::bytes_of(&value))
    }

    /// Write a `vec3` member
    pub fn set_vec3(&mut self, path: &str, value: Vec3) -> Result<()> {
        self.set_vector(path, 3, "vec3", bytemuck::bytes_of(&value))
    }

    /// Write a `vec4` member
    pub fn set_vec4(&mut self, path: &str, value: Vec4) -> Result<()> {
        self.set_vector(path, 4, "vec4", bytemuck::bytes_of(&value))
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// Write a `mat2` member, one strided vector at a time
    pub fn set_mat2(&mut self, path: &str, value: Mat2) -> Result<()> {
        let (offset, order, stride) = self.matrix_target(path, 2, "mat2")?;
        for i in 0..2 {
            let v = match order {
                MatrixOrder::ColumnMajor => value.col(i),
                MatrixOrder::RowMajor => value.row(i),
            };
            self.write(offset + i as u32 * stride, bytemuck::bytes_of(&v));
        }
        Ok(())
    }

    /// Write a `mat3` member, one strided vector at a time
    pub fn set_mat3(&mut self, path: &str, value: Mat3) -> Result<()> {
        let (offset, order, stride) = self.matrix_target(path, 3, "mat3")?;
        for i in 0..3 {
            let v = match order {
                MatrixOrder::ColumnMajor => value.col(i),
                MatrixOrder::RowMajor => value.row(i),
            };
            self.write(offset + i as u32 * stride, bytemuck::bytes_of(&v));
        }
        Ok(())
    }

    /// Write a `mat4` member, one strided vector at a time
    pub fn set_mat4(&mut self, path: &str, value: Mat4) -> Result<()> {
        let (offset, order, stride) = self.matrix_target(path, 4, "mat4")?;
        for i in 0..4 {
            let v = match order {
                MatrixOrder::ColumnMajor => value.col(i),
                MatrixOrder::RowMajor => value.row(i),
            };
            self.write(offset + i as u32 * stride, bytemuck::bytes_of(&v));
        }
        Ok(())
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    /// Write consecutive elements of a `float[]` member, starting at index 0
    ///
    /// Fewer values than declared elements is fine; more is
    /// [`Error::IndexOutOfRange`].
    pub fn set_f32_slice(&mut self, path: &str, values: &[f32]) -> Result<()> {
        let block = Arc::clone(&self.block);
        let (offset, target) = block.locate(path)?;
        let (stride, len) = match target {
            Target::Node(node) => match &node.kind {
                LayoutKind::Array {
                    stride,
                    len,
                    element,
                } if matches!(
                    element.kind,
                    LayoutKind::Scalar {
                        scalar: ScalarKind::Float
                    }
                ) =>
                {
                    (*stride, *len)
                }
                _ => return Err(self.mismatch(path, "float array")),
            },
            _ => return Err(self.mismatch(path, "float array")),
        };
        if values.len() as u32 > len {
            return Err(Error::IndexOutOfRange {
                path: path.to_string(),
                index: values.len() as u32 - 1,
                len,
            });
        }
        for (i, value) in values.iter().enumerate() {
            self.write(offset + i as u32 * stride, bytemuck::bytes_of(value));
        }
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn set_scalar(
        &mut self,
        path: &str,
        kind: ScalarKind,
        expected: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let block = Arc::clone(&self.block);
        let (offset, target) = block.locate(path)?;
        let matched = match target {
            Target::Node(node) => {
                matches!(node.kind, LayoutKind::Scalar { scalar } if scalar == kind)
            }
            Target::Scalar { scalar } => scalar == kind,
            Target::Vector { .. } => false,
        };
        if !matched {
            return Err(self.mismatch(path, expected));
        }
        self.write(offset, bytes);
        Ok(())
    }

    fn set_vector(
        &mut self,
        path: &str,
        components: u32,
        expected: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let block = Arc::clone(&self.block);
        let (offset, target) = block.locate(path)?;
        let matched = match target {
            Target::Node(node) => matches!(
                node.kind,
                LayoutKind::Vector {
                    scalar: ScalarKind::Float,
                    components: c,
                } if c == components
            ),
            Target::Vector {
                scalar: ScalarKind::Float,
                components: c,
            } => c == components,
            _ => false,
        };
        if !matched {
            return Err(self.mismatch(path, expected));
        }
        self.write(offset, bytes);
        Ok(())
    }

    /// Locate a square float matrix member, returning its offset, resolved
    /// order, and vector stride
    fn matrix_target(
        &self,
        path: &str,
        n: u32,
        expected: &str,
    ) -> Result<(u32, MatrixOrder, u32)> {
        let (offset, target) = self.block.locate(path)?;
        if let Target::Node(node) = target {
            if let LayoutKind::Matrix {
                scalar: ScalarKind::Float,
                order,
                vectors,
                components,
                vector_stride,
            } = node.kind
            {
                if vectors == n && components == n {
                    return Ok((offset, order, vector_stride));
                }
            }
        }
        Err(self.mismatch(path, expected))
    }

    fn mismatch(&self, path: &str, expected: &str) -> Error {
        Error::UnknownType(format!(
            "member '{}' of block '{}' is not a {}",
            path,
            self.block.name(),
            expected
        ))
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) {
        let start = offset as usize;
        self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
