//! Child sub-range selection.

use mdhtml_ast::Node;

/// Half-open range of child indices.
///
/// Negative offsets count from the end of the child list, so
/// `ChildRange::new(1, -1)` drops the first and last child. An open end
/// runs through the last child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildRange {
    start: isize,
    end: Option<isize>,
}

impl ChildRange {
    /// Every child.
    pub const ALL: Self = Self {
        start: 0,
        end: None,
    };

    /// Range from `start` up to (excluding) `end`.
    #[must_use]
    pub const fn new(start: isize, end: isize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Concrete `(start, end)` indices for a list of `len` children.
    ///
    /// Offsets are clamped into `0..=len` and an inverted range collapses to
    /// an empty one, so a malformed node selects nothing instead of failing.
    #[must_use]
    pub fn bounds(self, len: usize) -> (usize, usize) {
        let start = resolve(self.start, len);
        let end = self.end.map_or(len, |end| resolve(end, len));
        (start, end.max(start))
    }

    /// Selected children of `node`.
    pub fn select<'t>(self, node: Node<'t>) -> impl Iterator<Item = Node<'t>> + use<'t> {
        let (start, end) = self.bounds(node.child_count());
        node.children().skip(start).take(end - start)
    }
}

/// Normalize a possibly negative offset against a list length.
#[must_use]
pub fn resolve(offset: isize, len: usize) -> usize {
    if offset >= 0 {
        offset.unsigned_abs().min(len)
    } else {
        len.saturating_sub(offset.unsigned_abs())
    }
}
