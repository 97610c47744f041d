//! Reference-equality keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Key that compares and hashes by address instead of by value.
///
/// Two structurally equal but separately allocated values are distinct keys.
/// That is what a reference-equality memo needs: looking a key up never runs
/// the value's own (possibly expensive, possibly re-entrant) `Hash` impl.
pub struct ByAddress<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> ByAddress<'_, T> {
    #[inline]
    fn addr(&self) -> *const () {
        ptr::from_ref(self.0).cast::<()>()
    }
}

impl<T: ?Sized> Clone for ByAddress<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ByAddress<'_, T> {}

impl<T: ?Sized> PartialEq for ByAddress<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized> Eq for ByAddress<'_, T> {}

impl<T: ?Sized> Hash for ByAddress<'_, T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ByAddress<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByAddress({:p}: {:?})", self.addr(), self.0)
    }
}
