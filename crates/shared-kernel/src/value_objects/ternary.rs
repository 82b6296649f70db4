// crates/shared-kernel/src/value_objects/ternary.rs
use serde::{Deserialize, Serialize};

/// Three-state filter toggle.
///
/// `Unset` means "no constraint", which is distinct from `False`
/// ("explicitly excluded").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TernaryBoolean {
    #[default]
    Unset,
    True,
    False,
}

impl TernaryBoolean {
    /// Unset → True → False → Unset.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Unset => Self::True,
            Self::True => Self::False,
            Self::False => Self::Unset,
        }
    }

    /// Unset → False → True → Unset.
    #[inline]
    pub const fn prev(self) -> Self {
        match self {
            Self::Unset => Self::False,
            Self::False => Self::True,
            Self::True => Self::Unset,
        }
    }

    #[inline]
    pub const fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }

    #[inline]
    pub const fn is_not_unset(self) -> bool {
        !self.is_unset()
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::True)
    }

    #[inline]
    pub const fn is_not_positive(self) -> bool {
        !self.is_positive()
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::False)
    }

    #[inline]
    pub const fn is_not_negative(self) -> bool {
        !self.is_negative()
    }
}

/// Free-function form of [`TernaryBoolean::next`].
#[inline]
pub const fn next(value: TernaryBoolean) -> TernaryBoolean {
    value.next()
}

/// Free-function form of [`TernaryBoolean::prev`].
#[inline]
pub const fn prev(value: TernaryBoolean) -> TernaryBoolean {
    value.prev()
}
