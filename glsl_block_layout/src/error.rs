//! Error types for block layout computation
//!
//! All errors are local validation failures detected while describing a block
//! or resolving a member path. None are retryable: the inputs are
//! deterministic shader-interface descriptions, so retrying without changing
//! the input cannot succeed.

use std::fmt;

use crate::layout::BlockLayout;

/// Result type for block layout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Block layout errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type tag outside the GLSL basic-type enumeration (including opaque
    /// types such as samplers, which have no storage in an interface block)
    UnknownType(String),

    /// The block's layout cannot be computed statically (`shared`, whose
    /// offsets only the driver can report) or is not permitted for the
    /// block's kind (`std430` on a uniform block)
    UnsupportedLayout {
        /// Name of the offending block
        block: String,
        /// The declared layout
        layout: BlockLayout,
    },

    /// Two members of the same struct or block share a name
    NameCollision {
        /// The struct or block in which the collision occurred
        scope: String,
        /// The duplicated member name
        name: String,
    },

    /// A struct or block declared zero members
    EmptyStruct(String),

    /// A resolve path named a member that does not exist (or was malformed)
    UnknownMember {
        /// Name of the block being resolved against
        block: String,
        /// The offending path
        path: String,
    },

    /// An array index in a resolve path exceeded the declared length
    IndexOutOfRange {
        /// The offending path
        path: String,
        /// The requested index
        index: u32,
        /// The declared element count
        len: u32,
    },

    /// A struct definition reaches itself through its own members
    CyclicStructDefinition(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownType(msg) => write!(f, "Unknown type: {}", msg),
            Error::UnsupportedLayout { block, layout } => {
                write!(
                    f,
                    "Unsupported layout: block '{}' cannot be computed under '{}'",
                    block, layout
                )
            }
            Error::NameCollision { scope, name } => {
                write!(f, "Name collision: '{}' declared more than once in '{}'", name, scope)
            }
            Error::EmptyStruct(name) => write!(f, "Empty struct: '{}' has no members", name),
            Error::UnknownMember { block, path } => {
                write!(f, "Unknown member: '{}' in block '{}'", path, block)
            }
            Error::IndexOutOfRange { path, index, len } => {
                write!(f, "Index out of range: '{}' index {} exceeds length {}", path, index, len)
            }
            Error::CyclicStructDefinition(name) => {
                write!(f, "Cyclic struct definition: '{}' contains itself", name)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
