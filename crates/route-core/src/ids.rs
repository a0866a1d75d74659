//! Identifier newtypes for levels, size classes and jobs.
//!
//! | Type        | Inner | Displayed as |
//! |-------------|-------|--------------|
//! | `LevelId`   | `u32` | `level#2`    |
//! | `SizeClass` | `u8`  | `size#3`     |
//! | `JobId`     | `u64` | `job#17`     |
//!
//! All are `Copy + Ord + Hash` so they key the graph cache and the job queue
//! directly.

use std::fmt;

macro_rules! id_newtype {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Position of this id in a dense table.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<Self, Self::Error> {
                <$inner>::try_from(n).map(Self)
            }
        }
    };
}

id_newtype! {
    /// Zero-based index of a vertical level, i.e. the gap between two adjacent
    /// elevation bands of the level index.
    pub struct LevelId(u32) => "level";
}

id_newtype! {
    /// Footprint size class.  Movers that share a size class share one cached
    /// adjacency graph per level.
    ///
    /// On square grids this is the snap-point parity `w % 2 | (h % 2) << 1`;
    /// on hex and gridless maps every mover is class 0.
    pub struct SizeClass(u8) => "size";
}

id_newtype! {
    /// Identity of a submitted search job; doubles as the identity of its
    /// completion ticket for cancellation.
    pub struct JobId(u64) => "job";
}

impl JobId {
    /// The id following `self`.  Job ids are handed out monotonically.
    #[inline]
    pub fn next(self) -> JobId {
        JobId(self.0.wrapping_add(1))
    }
}
