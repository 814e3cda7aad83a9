/// Block description and member resolution
///
/// [`BlockDesc`] collects what a block declaration states — name, kind,
/// layout qualifier, matrix order, instance name, members — and
/// [`Block::describe`] turns it into an immutable computed block whose
/// members can be resolved to byte addresses by dotted path.

use crate::block::path::{parse_path, PathSegment};
use crate::error::{Error, Result};
use crate::interface::{StructRegistry, Variable};
use crate::layout::{BlockLayout, LayoutCalculator, LayoutKind, LayoutNode, MatrixOrder};
use crate::layout_debug;
use crate::types::ScalarKind;

// ============================================================================
// Descriptor
// ============================================================================

/// What a block is backed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// A uniform block (`uniform Camera { ... }`)
    #[default]
    Uniform,
    /// A shader storage block (`buffer Particles { ... }`)
    ShaderStorage,
}

/// Declaration-order description of an interface block
///
/// Defaults mirror GLSL's: kind `uniform`, layout `shared`, matrices
/// column-major, no instance name. A `shared` block can be described but not
/// computed, so most callers set an explicit layout.
#[derive(Debug, Clone)]
pub struct BlockDesc {
    name: String,
    kind: BlockKind,
    layout: BlockLayout,
    matrix_order: MatrixOrder,
    instance_name: Option<String>,
    members: Vec<Variable>,
}

impl BlockDesc {
    /// Start a description for the named block
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BlockKind::default(),
            layout: BlockLayout::default(),
            matrix_order: MatrixOrder::default(),
            instance_name: None,
            members: Vec::new(),
        }
    }

    /// Set the block kind (uniform or shader storage)
    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the layout qualifier
    pub fn with_layout(mut self, layout: BlockLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the block-level matrix order, inherited by members without an
    /// explicit override
    pub fn with_matrix_order(mut self, order: MatrixOrder) -> Self {
        self.matrix_order = order;
        self
    }

    /// Give the block an instance name, scoping its members in GLSL
    pub fn with_instance_name(mut self, instance: impl Into<String>) -> Self {
        self.instance_name = Some(instance.into());
        self
    }

    /// Append one member
    pub fn with_member(mut self, member: Variable) -> Self {
        self.members.push(member);
        self
    }

    /// Append several members in order
    pub fn with_members(mut self, members: impl IntoIterator<Item = Variable>) -> Self {
        self.members.extend(members);
        self
    }
}

// ============================================================================
// Computed block
// ============================================================================

/// A described interface block with a fully computed layout
///
/// Construction is all-or-nothing: a [`Block`] always has every member
/// offset, stride, and size resolved. It is immutable afterwards and safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    instance_name: Option<String>,
    kind: BlockKind,
    layout: BlockLayout,
    matrix_order: MatrixOrder,
    total_size: u32,
    root: LayoutNode,
}

/// Byte-address answer for one resolved member path
///
/// The address of scalar component `c` of element `e` is
/// `offset + e * stride + c * scalar_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// The queried path
    pub path: String,
    /// Byte offset from the start of the block
    pub offset: u32,
    /// Occupied bytes, including internal padding
    pub size: u32,
    /// Byte distance between consecutive elements (array elements, matrix
    /// vectors); equals `size` for single-element members
    pub stride: u32,
    /// Number of strided elements
    pub element_count: u32,
    /// Contiguous scalar components per element (0 for structs)
    pub components: u32,
    /// Component kind, if the member is not a struct
    pub scalar_kind: Option<ScalarKind>,
    /// Resolved storage order, for matrices
    pub matrix_order: Option<MatrixOrder>,
}

impl ResolvedMember {
    /// Machine size of one scalar component, 0 for structs
    pub fn scalar_size(&self) -> u32 {
        self.scalar_kind.map_or(0, |s| s.machine_size())
    }

    fn from_node(path: &str, offset: u32, node: &LayoutNode) -> Self {
        Self {
            path: path.to_string(),
            offset,
            size: node.size,
            stride: node.stride(),
            element_count: node.element_count(),
            components: node.components(),
            scalar_kind: node.scalar_kind(),
            matrix_order: node.matrix_order(),
        }
    }

    fn vector(path: &str, offset: u32, scalar: ScalarKind, components: u32) -> Self {
        let size = components * scalar.machine_size();
        Self {
            path: path.to_string(),
            offset,
            size,
            stride: size,
            element_count: 1,
            components,
            scalar_kind: Some(scalar),
            matrix_order: None,
        }
    }

    fn scalar(path: &str, offset: u32, scalar: ScalarKind) -> Self {
        Self::vector(path, offset, scalar, 1)
    }
}

/// Where a path walk landed: a layout node, or a slice synthesized by
/// indexing into a matrix (one vector) or a vector (one component)
#[derive(Clone, Copy)]
pub(crate) enum Target<'a> {
    Node(&'a LayoutNode),
    Vector { scalar: ScalarKind, components: u32 },
    Scalar { scalar: ScalarKind },
}

impl Block {
    /// Compute the block's layout from its description
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedLayout`] for `shared` blocks, and for `std430`
    ///   uniform blocks (GLSL permits `std430` only on storage blocks)
    /// - the layout calculator's errors: [`Error::EmptyStruct`],
    ///   [`Error::NameCollision`], [`Error::UnknownType`],
    ///   [`Error::CyclicStructDefinition`]
    pub fn describe(desc: BlockDesc, registry: &StructRegistry) -> Result<Self> {
        let BlockDesc {
            name,
            kind,
            layout,
            matrix_order,
            instance_name,
            members,
        } = desc;

        if kind == BlockKind::Uniform && layout == BlockLayout::Std430 {
            return Err(Error::UnsupportedLayout {
                block: name,
                layout,
            });
        }

        let calculator = LayoutCalculator::new(registry, layout, matrix_order);
        let root = calculator.layout_block(&name, &members)?;
        let total_size = root.size;

        layout_debug!(
            "glsl::Block",
            "described block '{}' ({}, {} members, {} bytes)",
            name,
            layout,
            members.len(),
            total_size
        );

        Ok(Self {
            name,
            instance_name,
            kind,
            layout,
            matrix_order,
            total_size,
            root,
        })
    }

    /// The block's declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The block's instance name, if declared with one
    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    /// Whether this is a uniform or shader storage block
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// The layout policy the offsets were computed under
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// The block-level matrix order
    pub fn matrix_order(&self) -> MatrixOrder {
        self.matrix_order
    }

    /// Total backing-buffer size in bytes, trailing padding included
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// The computed layout tree (the block body as a struct at offset 0)
    pub fn layout_tree(&self) -> &LayoutNode {
        &self.root
    }

    /// How the host API names a member of this block
    ///
    /// With an instance name the block name scopes its members
    /// (`Camera.eye`); without one members live in the global namespace.
    pub fn api_name(&self, member: &str) -> String {
        match self.instance_name {
            Some(_) => format!("{}.{}", self.name, member),
            None => member.to_string(),
        }
    }

    /// How shader code names a member of this block
    pub fn glsl_name(&self, member: &str) -> String {
        match &self.instance_name {
            Some(instance) => format!("{instance}.{member}"),
            None => member.to_string(),
        }
    }

    /// Resolve a dotted member path to its byte address
    ///
    /// Paths follow GLSL selection syntax: `eye`, `lights[2].color`,
    /// `m[1]` (one matrix vector), `m[1][0]` or `eye[2]` (one scalar
    /// component).
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownMember`] for malformed paths and segments that do
    ///   not match the layout tree
    /// - [`Error::IndexOutOfRange`] if a subscript exceeds the declared
    ///   element count
    pub fn resolve(&self, path: &str) -> Result<ResolvedMember> {
        let (offset, target) = self.locate(path)?;
        Ok(match target {
            Target::Node(node) => ResolvedMember::from_node(path, offset, node),
            Target::Vector { scalar, components } => {
                ResolvedMember::vector(path, offset, scalar, components)
            }
            Target::Scalar { scalar } => ResolvedMember::scalar(path, offset, scalar),
        })
    }

    /// All member paths the block exposes as active resources
    ///
    /// Matches how the GL API enumerates block members: leaf members by
    /// path, arrays of basic types as a single `name[0]` resource, arrays of
    /// structs expanded per index.
    pub fn resources(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let LayoutKind::Struct { members, .. } = &self.root.kind {
            for (name, node) in members {
                collect_resources(name.clone(), node, &mut out);
            }
        }
        out
    }

    /// Walk a parsed path through the layout tree, accumulating the absolute
    /// byte offset
    pub(crate) fn locate(&self, path: &str) -> Result<(u32, Target<'_>)> {
        let segments = parse_path(path).ok_or_else(|| self.unknown_member(path))?;
        let mut offset = 0u32;
        let mut target = Target::Node(&self.root);

        for segment in segments {
            target = match (target, segment) {
                (Target::Node(node), PathSegment::Member(name)) => match &node.kind {
                    LayoutKind::Struct { members, index, .. } => {
                        let i = *index.get(&name).ok_or_else(|| self.unknown_member(path))?;
                        let child = &members[i].1;
                        offset += child.offset;
                        Target::Node(child)
                    }
                    _ => return Err(self.unknown_member(path)),
                },
                (Target::Node(node), PathSegment::Index(i)) => match &node.kind {
                    LayoutKind::Array {
                        stride,
                        len,
                        element,
                    } => {
                        self.check_index(path, i, *len)?;
                        offset += i * stride;
                        Target::Node(element)
                    }
                    LayoutKind::Matrix {
                        scalar,
                        vectors,
                        components,
                        vector_stride,
                        ..
                    } => {
                        self.check_index(path, i, *vectors)?;
                        offset += i * vector_stride;
                        Target::Vector {
                            scalar: *scalar,
                            components: *components,
                        }
                    }
                    LayoutKind::Vector { scalar, components } => {
                        self.check_index(path, i, *components)?;
                        offset += i * scalar.machine_size();
                        Target::Scalar { scalar: *scalar }
                    }
                    _ => return Err(self.unknown_member(path)),
                },
                (Target::Vector { scalar, components }, PathSegment::Index(i)) => {
                    self.check_index(path, i, components)?;
                    offset += i * scalar.machine_size();
                    Target::Scalar { scalar }
                }
                _ => return Err(self.unknown_member(path)),
            };
        }
        Ok((offset, target))
    }

    fn unknown_member(&self, path: &str) -> Error {
        Error::UnknownMember {
            block: self.name.clone(),
            path: path.to_string(),
        }
    }

    fn check_index(&self, path: &str, index: u32, len: u32) -> Result<()> {
        if index >= len {
            return Err(Error::IndexOutOfRange {
                path: path.to_string(),
                index,
                len,
            });
        }
        Ok(())
    }
}

fn collect_resources(prefix: String, node: &LayoutNode, out: &mut Vec<String>) {
    match &node.kind {
        LayoutKind::Scalar { .. } | LayoutKind::Vector { .. } | LayoutKind::Matrix { .. } => {
            out.push(prefix);
        }
        LayoutKind::Struct { members, .. } => {
            for (name, child) in members {
                collect_resources(format!("{prefix}.{name}"), child, out);
            }
        }
        LayoutKind::Array { len, element, .. } => match &element.kind {
            LayoutKind::Struct { .. } => {
                for i in 0..*len {
                    collect_resources(format!("{prefix}[{i}]"), element, out);
                }
            }
            _ => out.push(format!("{prefix}[0]")),
        },
    }
}

#[cfg(test)]
#[path = "describe_tests.rs"]
mod tests;
