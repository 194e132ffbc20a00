//! Index types for mesh elements.
//!
//! Vertices, half-edges and faces live in flat arenas inside
//! [`HalfEdgeMesh`](super::HalfEdgeMesh); links between them are typed
//! handles into those arenas. Each handle reserves the maximum value of its
//! integer type as the "no link" sentinel.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as the storage of a mesh handle.
///
/// Implemented for `u16`, `u32` and `u64`; pick the smallest one that fits the
/// mesh, since it also bounds the largest index written to the index buffer.
pub trait MeshIndex:
    Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static
{
    /// Sentinel meaning "no element".
    const INVALID: Self;

    /// Convert from `usize`.
    ///
    /// # Panics
    /// In debug builds, panics if the value does not fit below [`Self::INVALID`].
    fn from_usize(v: usize) -> Self;

    /// Convert to `usize`.
    fn to_usize(self) -> usize;

    /// Number of elements addressable with this type.
    fn capacity() -> usize;
}

macro_rules! impl_mesh_index {
    ($($t:ty),*) => {
        $(
            impl MeshIndex for $t {
                const INVALID: Self = <$t>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v < <$t>::MAX as usize,
                        "index {} too large for {}",
                        v,
                        stringify!($t)
                    );
                    v as $t
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn capacity() -> usize {
                    usize::try_from(<$t>::MAX).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// Handle of a vertex. Its index is the vertex `vid`, i.e. its input order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// Handle of a half-edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// Handle of a face. Its index is the position of the triangle in the input.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_handle {
    ($name:ident, $tag:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a handle from a raw arena index.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The "no link" handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Arena index of this handle.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// `false` for the "no link" handle.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != I::INVALID
            }

            /// `None` for the "no link" handle, `Some(self)` otherwise.
            #[inline]
            pub fn valid(self) -> Option<Self> {
                if self.is_valid() {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $tag, self.index())
                } else {
                    write!(f, "{}(none)", $tag)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_handle!(VertexId, "V");
impl_handle!(HalfEdgeId, "HE");
impl_handle!(FaceId, "F");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert!(v.is_valid());
        assert_eq!(v.valid(), Some(v));

        let none: VertexId = VertexId::invalid();
        assert!(!none.is_valid());
        assert_eq!(none.valid(), None);
    }

    #[test]
    fn test_default_is_invalid() {
        let he: HalfEdgeId = HalfEdgeId::default();
        assert!(!he.is_valid());
        let f: FaceId<u16> = FaceId::default();
        assert!(!f.is_valid());
        assert_eq!(FaceId::<u16>::new(3).valid(), Some(FaceId::new(3)));
    }

    #[test]
    fn test_capacity() {
        assert_eq!(<u16 as MeshIndex>::capacity(), 65535);
        assert_eq!(<u32 as MeshIndex>::capacity(), u32::MAX as usize);
    }

    #[test]
    fn test_debug_format() {
        let v: VertexId = VertexId::new(7);
        assert_eq!(format!("{:?}", v), "V(7)");
        let he: HalfEdgeId = HalfEdgeId::invalid();
        assert_eq!(format!("{:?}", he), "HE(none)");
    }
}
