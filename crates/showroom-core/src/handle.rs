use std::fmt;

/// Declares a typed, copyable id issued by the render engine.
///
/// Ids come from a single monotonic counter and are never reused, so a stale
/// id held by a manager simply fails lookup after its entity is disposed.
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub(crate) fn new(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_handle!(
    /// Transform node or mesh in the scene graph.
    NodeId,
    "node"
);
define_handle!(LightId, "light");
define_handle!(ShadowId, "shadow");
define_handle!(MaterialId, "material");
