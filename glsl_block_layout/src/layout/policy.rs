/// Layout policies and matrix storage order

use std::fmt;

/// The memory layout qualifier of an interface block
///
/// `Shared` and `Packed` are the GLSL defaults whose true offsets are
/// driver-defined; this crate computes `Packed` deterministically as tight
/// natural-alignment packing (see [`LayoutCalculator`](crate::layout)) and
/// refuses to guess `Shared` offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockLayout {
    /// Driver-defined layout (the GLSL default). Offsets must be queried
    /// from the compiled program; static computation is refused.
    Shared,
    /// Tight packing at natural scalar alignment
    Packed,
    /// The portable std140 rules (uniform blocks)
    Std140,
    /// The std430 rules (shader storage blocks only)
    Std430,
}

impl Default for BlockLayout {
    /// GLSL blocks without an explicit qualifier are `shared`
    fn default() -> Self {
        BlockLayout::Shared
    }
}

impl BlockLayout {
    /// True for the layouts whose offsets this crate can compute
    pub fn is_computable(&self) -> bool {
        !matches!(self, BlockLayout::Shared)
    }

    /// The GLSL qualifier spelling
    pub fn qualifier(&self) -> &'static str {
        match self {
            BlockLayout::Shared => "shared",
            BlockLayout::Packed => "packed",
            BlockLayout::Std140 => "std140",
            BlockLayout::Std430 => "std430",
        }
    }
}

impl fmt::Display for BlockLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}

/// Matrix storage order
///
/// Column-major (the GLSL default) stores each column contiguously; row-major
/// stores each row contiguously. Either way a matrix is laid out as an array
/// of vectors, and the stride advances between those vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixOrder {
    /// Columns are contiguous (GLSL default)
    ColumnMajor,
    /// Rows are contiguous
    RowMajor,
}

impl Default for MatrixOrder {
    fn default() -> Self {
        MatrixOrder::ColumnMajor
    }
}

impl MatrixOrder {
    /// The GLSL qualifier spelling
    pub fn qualifier(&self) -> &'static str {
        match self {
            MatrixOrder::ColumnMajor => "column_major",
            MatrixOrder::RowMajor => "row_major",
        }
    }
}

impl fmt::Display for MatrixOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}
