/// Dotted member path parsing
///
/// Member queries use GLSL-style paths: identifiers separated by `.`, each
/// optionally followed by one or more `[index]` subscripts, e.g.
/// `lights[2].color` or `m[1][0]`. Parsing is purely syntactic — whether the
/// segments match the block's layout tree is decided during resolution.

/// One step of a parsed member path
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathSegment {
    /// Select a named struct member
    Member(String),
    /// Select an array element, matrix vector, or vector component
    Index(u32),
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Parse a dotted path into segments, or `None` if it is malformed
///
/// A well-formed path starts with an identifier; subscripts are unsigned
/// decimal integers. Empty segments (`a..b`), trailing dots, unbalanced
/// brackets, and non-numeric subscripts are all malformed.
pub(crate) fn parse_path(path: &str) -> Option<Vec<PathSegment>> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut i = 0;

    loop {
        // Identifier segment
        let start = i;
        if i >= bytes.len() || !is_ident_start(bytes[i]) {
            return None;
        }
        while i < bytes.len() && is_ident_continue(bytes[i]) {
            i += 1;
        }
        segments.push(PathSegment::Member(path[start..i].to_string()));

        // Any number of `[index]` subscripts
        while i < bytes.len() && bytes[i] == b'[' {
            i += 1;
            let digits_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == digits_start || i >= bytes.len() || bytes[i] != b']' {
                return None;
            }
            let index: u32 = path[digits_start..i].parse().ok()?;
            segments.push(PathSegment::Index(index));
            i += 1;
        }

        if i == bytes.len() {
            return Some(segments);
        }
        if bytes[i] != b'.' {
            return None;
        }
        i += 1;
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
