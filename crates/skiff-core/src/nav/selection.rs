//! Highlighted-row tracking.

/// Index of the highlighted entry, or nothing.
///
/// A selection only ever holds an index that is valid for the listing it
/// was last checked against; every transition takes the listing length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    pub fn none() -> Self {
        Self { index: None }
    }

    /// Selects `index` if it is within `len`, otherwise clears.
    pub fn select(index: usize, len: usize) -> Self {
        Self {
            index: (index < len).then_some(index),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Re-validates against a rebuilt listing of `len` entries.
    ///
    /// The index survives only while it is still in range.
    pub fn revalidate(self, len: usize) -> Self {
        match self.index {
            Some(i) => Self::select(i, len),
            None => self,
        }
    }

    /// Moves down one row. Selects the first row when nothing is selected.
    pub fn next(self, len: usize) -> Self {
        match self.index {
            Some(i) if i + 1 < len => Self::select(i + 1, len),
            Some(_) => self.revalidate(len),
            None => Self::select(0, len),
        }
    }

    /// Moves up one row. Selects the first row when nothing is selected.
    pub fn previous(self, len: usize) -> Self {
        match self.index {
            Some(i) if i > 0 => Self::select(i - 1, len),
            Some(_) | None => Self::select(0, len),
        }
    }

    pub fn first(len: usize) -> Self {
        Self::select(0, len)
    }

    pub fn last(len: usize) -> Self {
        match len {
            0 => Self::none(),
            n => Self::select(n - 1, len),
        }
    }
}
