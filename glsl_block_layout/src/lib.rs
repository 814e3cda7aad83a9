/*!
# GLSL Block Layout

Deterministic memory layouts for GLSL interface blocks (uniform blocks and
shader storage blocks).

Given a declaration-order description of a block's members — scalars, vectors,
matrices, arrays, nested structs — this crate computes the byte-exact offsets,
strides, and total size the GPU expects under the `std140`, `std430`, and
`packed` layout rules, with `row_major`/`column_major` matrix storage. Blocks
declared `shared` are represented but never computed: only the driver can
report their offsets.

## Architecture

- **[`types`]**: the closed set of GLSL basic types and their machine sizes
- **[`interface`]**: `Variable` / `StructDef` descriptors and the struct
  definition registry
- **[`layout`]**: the recursive layout calculator and the resolved layout tree
- **[`block`]**: the `Block` descriptor — byte-addressed member lookup by
  dotted path, plus a CPU staging buffer for writing member values

The crate is purely computational: no GPU calls, no I/O. A computed [`Block`]
is immutable and safe to share across threads. Buffer allocation and upload
belong to the caller; the block tells it *where* every member lives.

## Example

```no_run
use glsl_block_layout::{Block, BlockDesc, BlockLayout, StructRegistry, Variable};

let registry = StructRegistry::new();
let desc = BlockDesc::new("Camera")
    .with_layout(BlockLayout::Std140)
    .with_member(Variable::parse("view_projection", "mat4")?)
    .with_member(Variable::parse("eye", "vec3")?);
let block = Block::describe(desc, &registry)?;

let eye = block.resolve("eye")?;
assert_eq!(eye.offset, 64);
# Ok::<(), glsl_block_layout::Error>(())
```
*/

mod error;
pub mod log;
pub mod types;
pub mod interface;
pub mod layout;
pub mod block;

// Re-export primary types at crate root for convenience.
pub use error::{Error, Result};
pub use types::{BaseType, ScalarKind};
pub use interface::{StructDef, StructKey, StructRegistry, VarType, Variable};
pub use layout::{BlockLayout, LayoutKind, LayoutNode, MatrixOrder};
pub use block::{Block, BlockBuffer, BlockDesc, BlockKind, ResolvedMember};

// Re-export math library at crate root
pub use glam;
