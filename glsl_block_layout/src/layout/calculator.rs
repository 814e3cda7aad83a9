/// Recursive layout calculator
///
/// Walks an ordered member list with a running byte cursor, aligning each
/// member to its base alignment and recording offsets, strides, and sizes.
/// Nested structs are laid out recursively with the same policy and then
/// treated as leaves of known size and alignment by their parent.
///
/// std140 follows OpenGL 4.5 §7.6.2.2 rules 1-10. std430 is identical except
/// array strides and struct alignments are not rounded up to the vec4
/// boundary. packed aligns everything to the scalar machine size.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::interface::{StructKey, StructRegistry, VarType, Variable};
use crate::layout::{BlockLayout, LayoutKind, LayoutNode, MatrixOrder};
use crate::types::{BaseType, ScalarKind};

/// Round `value` up to the next multiple of `alignment`
fn round_up(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

/// Computes member offsets for one block under one layout policy
pub(crate) struct LayoutCalculator<'a> {
    registry: &'a StructRegistry,
    layout: BlockLayout,
    default_order: MatrixOrder,
}

impl<'a> LayoutCalculator<'a> {
    pub(crate) fn new(
        registry: &'a StructRegistry,
        layout: BlockLayout,
        default_order: MatrixOrder,
    ) -> Self {
        Self {
            registry,
            layout,
            default_order,
        }
    }

    /// Lay out a block's member list, treating the block as a struct with
    /// base offset zero
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedLayout`] for `shared` blocks (driver-reported only)
    /// - [`Error::EmptyStruct`] / [`Error::NameCollision`] for invalid member lists
    /// - [`Error::CyclicStructDefinition`] if a struct reaches itself
    pub(crate) fn layout_block(
        &self,
        block_name: &str,
        members: &[Variable],
    ) -> Result<LayoutNode> {
        if !self.layout.is_computable() {
            return Err(Error::UnsupportedLayout {
                block: block_name.to_string(),
                layout: self.layout,
            });
        }
        let mut visited = Vec::new();
        self.layout_members(block_name, members, self.default_order, &mut visited)
    }

    /// Lay out an ordered member list as a struct body (offset 0)
    fn layout_members(
        &self,
        scope: &str,
        members: &[Variable],
        inherited_order: MatrixOrder,
        visited: &mut Vec<StructKey>,
    ) -> Result<LayoutNode> {
        if members.is_empty() {
            return Err(Error::EmptyStruct(scope.to_string()));
        }

        let mut laid: Vec<(String, LayoutNode)> = Vec::with_capacity(members.len());
        let mut index = FxHashMap::default();
        let mut cursor = 0u32;
        let mut max_align = 1u32;

        for member in members {
            let mut node = self.layout_variable(member, inherited_order, visited)?;
            cursor = round_up(cursor, node.align);
            node.offset = cursor;
            cursor += node.size;
            max_align = max_align.max(node.align);

            if index
                .insert(member.name().to_string(), laid.len())
                .is_some()
            {
                return Err(Error::NameCollision {
                    scope: scope.to_string(),
                    name: member.name().to_string(),
                });
            }
            laid.push((member.name().to_string(), node));
        }

        // Rule 9: a struct's alignment is its largest member alignment,
        // rounded up to the vec4 boundary under std140; its size is padded
        // to that alignment.
        let align = self.round_aggregate(max_align);
        let size = round_up(cursor, align);

        Ok(LayoutNode {
            offset: 0,
            size,
            align,
            kind: LayoutKind::Struct {
                name: scope.to_string(),
                members: laid,
                index,
            },
        })
    }

    /// Lay out one declared variable (offset assigned by the caller)
    fn layout_variable(
        &self,
        var: &Variable,
        inherited_order: MatrixOrder,
        visited: &mut Vec<StructKey>,
    ) -> Result<LayoutNode> {
        let order = var.matrix_order().unwrap_or(inherited_order);
        let element = match var.ty() {
            VarType::Basic(ty) => self.layout_basic(*ty, order),
            VarType::Struct(key) => self.layout_struct(*key, order, visited)?,
        };
        Ok(match var.array_len() {
            None => element,
            Some(len) => self.layout_array(element, len),
        })
    }

    /// Lay out a referenced struct definition, guarding against cycles
    fn layout_struct(
        &self,
        key: StructKey,
        inherited_order: MatrixOrder,
        visited: &mut Vec<StructKey>,
    ) -> Result<LayoutNode> {
        let def = self
            .registry
            .get(key)
            .ok_or_else(|| Error::UnknownType("unregistered struct reference".to_string()))?;
        if visited.contains(&key) {
            return Err(Error::CyclicStructDefinition(def.name().to_string()));
        }
        visited.push(key);
        let node = self.layout_members(def.name(), def.members(), inherited_order, visited);
        visited.pop();
        node
    }

    /// Rules 1-3 and 5/7: scalars, vectors, matrices
    fn layout_basic(&self, ty: BaseType, order: MatrixOrder) -> LayoutNode {
        match ty {
            BaseType::Scalar(scalar) => {
                let size = scalar.machine_size();
                LayoutNode {
                    offset: 0,
                    size,
                    align: size,
                    kind: LayoutKind::Scalar { scalar },
                }
            }
            BaseType::Vector { scalar, components } => LayoutNode {
                offset: 0,
                size: components * scalar.machine_size(),
                align: self.vector_alignment(scalar, components),
                kind: LayoutKind::Vector { scalar, components },
            },
            BaseType::Matrix {
                scalar,
                columns,
                rows,
            } => {
                // Rules 5/7: a matrix is stored as an array of column (or
                // row) vectors, each padded to the array stride.
                let (vectors, components) = match order {
                    MatrixOrder::ColumnMajor => (columns, rows),
                    MatrixOrder::RowMajor => (rows, columns),
                };
                let vector_size = components * scalar.machine_size();
                let vector_align = self.vector_alignment(scalar, components);
                let vector_stride = self.round_array(round_up(vector_size, vector_align));
                LayoutNode {
                    offset: 0,
                    size: vectors * vector_stride,
                    align: self.round_array(vector_align),
                    kind: LayoutKind::Matrix {
                        scalar,
                        order,
                        vectors,
                        components,
                        vector_stride,
                    },
                }
            }
        }
    }

    /// Rules 4/6/10: the array stride is the element size rounded up to the
    /// element alignment (and to the vec4 boundary under std140)
    fn layout_array(&self, mut element: LayoutNode, len: u32) -> LayoutNode {
        let stride = self.round_array(round_up(element.size, element.align));
        let align = self.round_array(element.align);
        element.offset = 0;
        LayoutNode {
            offset: 0,
            size: stride * len,
            align,
            kind: LayoutKind::Array {
                stride,
                len,
                element: Box::new(element),
            },
        }
    }

    /// Rules 1-3: vec2 aligns to 2N, vec3 and vec4 to 4N; packed uses the
    /// natural scalar alignment throughout
    fn vector_alignment(&self, scalar: ScalarKind, components: u32) -> u32 {
        let n = scalar.machine_size();
        match self.layout {
            BlockLayout::Packed => n,
            _ => match components {
                2 => 2 * n,
                _ => 4 * n,
            },
        }
    }

    /// std140 rounds array strides and element alignments up to 16 bytes
    fn round_array(&self, alignment: u32) -> u32 {
        match self.layout {
            BlockLayout::Std140 => round_up(alignment, 16),
            _ => alignment,
        }
    }

    /// std140 rounds struct alignments up to 16 bytes
    fn round_aggregate(&self, alignment: u32) -> u32 {
        match self.layout {
            BlockLayout::Std140 => round_up(alignment, 16),
            _ => alignment,
        }
    }
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
