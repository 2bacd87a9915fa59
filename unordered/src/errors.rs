use thiserror::Error;

/// Errors raised by [`UnorderedArray`](crate::UnorderedArray) when a call
/// violates its contract.
///
/// Every check runs before any mutation, so a call that returns an error has
/// left the container untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("index can't be >= size: {index} >= {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("index can't be > size: {index} > {size}")]
    InsertOutOfBounds { index: usize, size: usize },

    #[error("array is empty")]
    Empty,

    /// A sub-range of a foreign slice reaches past its end.
    #[error("start + count must be <= source length: {start} + {count} <= {len}")]
    SourceOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },

    /// A sub-range of another container reaches past its logical size.
    #[error("start + count must be <= array.size: {start} + {count} <= {size}")]
    InvalidRange {
        start: usize,
        count: usize,
        size: usize,
    },

    #[error("capacity overflow: cannot allocate {requested} slots")]
    CapacityOverflow { requested: usize },
}

impl Error {
    /// An index or sub-range fell outside the valid bounds.
    #[must_use]
    pub const fn is_bounds(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. }
                | Self::InsertOutOfBounds { .. }
                | Self::Empty
                | Self::SourceOutOfBounds { .. }
        )
    }

    /// A `start`/`count` pair did not describe a range of the source container.
    #[must_use]
    pub const fn is_argument(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }

    #[must_use]
    pub const fn is_capacity(&self) -> bool {
        matches!(self, Self::CapacityOverflow { .. })
    }
}

pub type Result<Success, Failure = Error> = core::result::Result<Success, Failure>;
