//! Opaque engine handle newtypes
//!
//! The engine names every resource it owns with an integer handle. These
//! newtypes keep the four handle spaces from mixing and keep raw values from
//! leaking into application code: only engine binding implementations should
//! ever call `from_raw`/`raw`.

use std::fmt;

/// Handle to an open document inside the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle(u64);

/// Handle to a loaded page, scoped to one document.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle(u64);

/// Handle to an outline (bookmark) node. Only valid during a traversal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookmarkHandle(u64);

/// Handle to a link annotation. Only valid during link enumeration.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHandle(u64);

macro_rules! handle_impls {
    ($name:ident) => {
        impl $name {
            /// Wraps a raw engine value. For engine binding implementations.
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw engine value. For engine binding implementations.
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:#x})"), self.0)
            }
        }
    };
}

handle_impls!(DocumentHandle);
handle_impls!(PageHandle);
handle_impls!(BookmarkHandle);
handle_impls!(LinkHandle);
