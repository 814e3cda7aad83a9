//! Interface-block layout computation
//!
//! Implements the deterministic layout rules for interface blocks: `std140`
//! (OpenGL 4.5 §7.6.2.2 rules 1-10), `std430` (same, without the 16-byte
//! rounding of array strides and struct alignments), and `packed` (tight
//! packing at natural scalar alignment). `shared` layouts are never computed
//! here — only the driver can report them.

mod policy;
mod node;
mod calculator;

pub use policy::{BlockLayout, MatrixOrder};
pub use node::{LayoutKind, LayoutNode};
pub(crate) use calculator::LayoutCalculator;
