//! Interface-block description and member addressing
//!
//! A [`Block`] binds a member list to a layout policy and exposes the
//! computed byte addresses: [`Block::resolve`] answers dotted-path queries
//! (`"lights[2].color"`), [`Block::resources`] enumerates the block's active
//! resources the way the GL API reports them, and [`BlockBuffer`] is a CPU
//! staging buffer that writes member values at their resolved offsets.

mod path;
mod describe;
mod buffer;

pub use describe::{Block, BlockDesc, BlockKind, ResolvedMember};
pub use buffer::BlockBuffer;
