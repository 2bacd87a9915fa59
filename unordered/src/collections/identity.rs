use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    ffi::{CString, OsString},
    path::PathBuf,
    rc::Rc,
    sync::Arc,
};

/// Reference identity, the second equivalence notion next to [`PartialEq`].
///
/// Two values are *the same* when they denote one instance: the same
/// allocation for pointer-like types. Value-equal but distinct instances are
/// never the same.
///
/// A type may also designate an *absent-value marker* (`None` for
/// [`Option`]). Value-based searches look markers up by identity, because a
/// marker carries no content to compare.
///
/// The default identity is the address of the value itself, which suits any
/// owned type: opting in is an empty impl.
///
/// ```
/// use unordered::{Identity, unordered};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
/// }
///
/// impl Identity for Point {}
///
/// let points = unordered![Point { x: 1 }];
/// assert_eq!(points.index_of(&Point { x: 1 }), Some(0));
/// assert_eq!(points.index_of_identity(&Point { x: 1 }), None);
/// ```
pub trait Identity {
    /// Returns `true` if `self` and `other` are the same instance.
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }

    /// Returns `true` if `self` is the absent-value marker.
    fn is_absent(&self) -> bool {
        false
    }
}

/// Compares by value, except that an absent `needle` is matched by identity.
#[inline]
pub(crate) fn value_matches<T>(needle: &T, stored: &T) -> bool
where
    T: PartialEq + Identity,
{
    if needle.is_absent() {
        needle.is_same(stored)
    } else {
        needle == stored
    }
}

impl<T: ?Sized> Identity for &T {
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

// Zero-sized boxes share a dangling address and so are all the same.
impl<T: ?Sized> Identity for Box<T> {
    fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(&**self, &**other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(this), Some(that)) => this.is_same(that),
            _ => false,
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

// Owned values are the same only when they are the same place in memory.
impl Identity for String {}
impl Identity for OsString {}
impl Identity for CString {}
impl Identity for PathBuf {}
impl<T> Identity for Vec<T> {}
impl<T> Identity for VecDeque<T> {}
impl<T> Identity for BTreeSet<T> {}
impl<K, V> Identity for BTreeMap<K, V> {}
impl<T, S> Identity for HashSet<T, S> {}
impl<K, V, S> Identity for HashMap<K, V, S> {}

// Scalars own no allocation; identical bits are the same value.
macro_rules! bitwise_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

bitwise_identity!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

impl Identity for f32 {
    fn is_same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Identity for f64 {
    fn is_same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}
