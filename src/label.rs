use std::fmt;
use std::sync::Arc;

use crate::CharType;

/// The string slice an edge spells out, as a `[start, end)` window over a
/// shared symbol buffer. Many edges of the same document point into one
/// buffer, so cloning a label never copies symbols.
#[derive(Clone)]
pub struct Label {
    data: Arc<[CharType]>,
    start: usize,
    end: usize,
}

impl Label {
    /// The window `start..end` of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a valid range of `data`.
    pub fn new(data: Arc<[CharType]>, start: usize, end: usize) -> Self {
        assert!(start <= end && end <= data.len(), "label window out of bounds");
        Self { data, start, end }
    }

    /// A label owning a private copy of `symbols`.
    pub fn from_slice(symbols: &[CharType]) -> Self {
        let data: Arc<[CharType]> = Arc::from(symbols);
        let end = data.len();
        Self { data, start: 0, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn as_slice(&self) -> &[CharType] {
        &self.data[self.start..self.end]
    }

    /// The leading character, which keys the edge in its parent's bag.
    pub fn first(&self) -> Option<CharType> {
        self.as_slice().first().copied()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// The whole buffer this label is a window of.
    pub fn source(&self) -> &Arc<[CharType]> {
        &self.data
    }

    /// Moves the start of the window forward, as done on the lower half of a
    /// split edge.
    ///
    /// # Panics
    ///
    /// Panics if `start` lies past the end of the window.
    pub fn set_start(&mut self, start: usize) {
        assert!(start <= self.end, "label start past its end");
        self.start = start;
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Label {}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_slice())
    }
}
