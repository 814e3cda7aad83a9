/// Resolved layout tree
///
/// The calculator produces one [`LayoutNode`] per declared member, nested the
/// way the declarations nest. Offsets are relative to the enclosing
/// aggregate: top-level members are relative to the block start, struct
/// members to their struct start, array elements to their own slot (an
/// element node always carries offset 0 and the array records the stride).
///
/// The address of any scalar component is therefore always
/// `offset + element_index * stride + component_index * scalar_size`.

use rustc_hash::FxHashMap;

use crate::layout::MatrixOrder;
use crate::types::ScalarKind;

/// Shape-specific layout data for one member
#[derive(Debug, Clone)]
pub enum LayoutKind {
    /// A single scalar
    Scalar {
        /// Component kind
        scalar: ScalarKind,
    },
    /// A vector of contiguous components
    Vector {
        /// Component kind
        scalar: ScalarKind,
        /// Number of components
        components: u32,
    },
    /// A matrix stored as `vectors` strided column or row vectors
    Matrix {
        /// Component kind
        scalar: ScalarKind,
        /// Resolved storage order
        order: MatrixOrder,
        /// Number of strided vectors (columns if column-major, rows if row-major)
        vectors: u32,
        /// Components per vector
        components: u32,
        /// Byte distance between consecutive vectors
        vector_stride: u32,
    },
    /// An array of identically laid out elements
    Array {
        /// Byte distance between consecutive elements
        stride: u32,
        /// Declared element count
        len: u32,
        /// Layout of one element (offset 0)
        element: Box<LayoutNode>,
    },
    /// A struct with per-member offsets relative to the struct start
    Struct {
        /// The struct type name
        name: String,
        /// Members in declaration order
        members: Vec<(String, LayoutNode)>,
        /// Name -> index into `members`
        index: FxHashMap<String, usize>,
    },
}

/// One node of the resolved layout tree
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Byte offset relative to the enclosing aggregate
    pub offset: u32,
    /// Occupied bytes, including internal padding (array: stride x len;
    /// struct: padded to its own alignment; vector: unpadded component bytes)
    pub size: u32,
    /// Base alignment under the block's layout policy
    pub align: u32,
    /// Shape-specific data
    pub kind: LayoutKind,
}

impl LayoutNode {
    /// Byte stride between repeated elements of this member
    ///
    /// Array element stride, matrix vector stride; for scalars, vectors, and
    /// structs there is a single element and the stride equals the size.
    pub fn stride(&self) -> u32 {
        match &self.kind {
            LayoutKind::Matrix { vector_stride, .. } => *vector_stride,
            LayoutKind::Array { stride, .. } => *stride,
            _ => self.size,
        }
    }

    /// Number of strided elements (array length, matrix vector count,
    /// 1 otherwise)
    pub fn element_count(&self) -> u32 {
        match &self.kind {
            LayoutKind::Matrix { vectors, .. } => *vectors,
            LayoutKind::Array { len, .. } => *len,
            _ => 1,
        }
    }

    /// Contiguous scalar components within one strided element
    ///
    /// Vector component count, matrix per-vector component count, 1 for
    /// scalars; for arrays, the components of one element (0 if the element
    /// is a struct, as for structs themselves).
    pub fn components(&self) -> u32 {
        match &self.kind {
            LayoutKind::Scalar { .. } => 1,
            LayoutKind::Vector { components, .. } => *components,
            LayoutKind::Matrix { components, .. } => *components,
            LayoutKind::Array { element, .. } => element.components(),
            LayoutKind::Struct { .. } => 0,
        }
    }

    /// The scalar kind of this member's components, if it has one
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match &self.kind {
            LayoutKind::Scalar { scalar } => Some(*scalar),
            LayoutKind::Vector { scalar, .. } => Some(*scalar),
            LayoutKind::Matrix { scalar, .. } => Some(*scalar),
            LayoutKind::Array { element, .. } => element.scalar_kind(),
            LayoutKind::Struct { .. } => None,
        }
    }

    /// The resolved matrix storage order, for matrices and arrays of them
    pub fn matrix_order(&self) -> Option<MatrixOrder> {
        match &self.kind {
            LayoutKind::Matrix { order, .. } => Some(*order),
            LayoutKind::Array { element, .. } => element.matrix_order(),
            _ => None,
        }
    }
}
