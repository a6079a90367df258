use bitflags::bitflags;

// -----------------------------------------------------------------------------
// TypeFlags

bitflags! {
    /// Capabilities a type declares.
    ///
    /// A type may declare several; [`classify`](crate::info::classify)
    /// picks the one that wins.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        /// Scalar with its own special-cased text form, e.g. `address:port`.
        const CUSTOM_SCALAR   = 1 << 0;
        /// Always decompose into fields.
        const FORCE_COMPLEX   = 1 << 1;
        /// Writes and reads its own markup.
        const SELF_DESCRIBING = 1 << 2;
        /// Fieldless enum, encoded as its integer discriminant.
        const ENUM            = 1 << 3;
        /// Built-in scalar kind.
        const SCALAR          = 1 << 4;
        /// Fixed-length array.
        const ARRAY           = 1 << 5;
        /// Key/value pair.
        const PAIR            = 1 << 6;
        /// Dictionary-like.
        const MAP             = 1 << 7;
        /// Supports ordered append.
        const LIST            = 1 << 8;
        /// `Option<T>`.
        const NULLABLE        = 1 << 9;
        /// A reference type with identity: `Rc<T>`, `Arc<T>`, `Rc<RefCell<T>>`.
        const SHARED          = 1 << 10;
        /// A type-erased slot, see [`Dynamic`](crate::ops::Dynamic).
        const DYNAMIC         = 1 << 11;
    }
}

// -----------------------------------------------------------------------------
// TypeOptions

/// Per-type serialization options, set with `#[reflect(graph = false)]`.
///
/// `use_graph_serialization` enables the identity cache for shared
/// instances of the type. Defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeOptions {
    pub use_graph_serialization: bool,
}

impl TypeOptions {
    pub const DEFAULT: Self = Self {
        use_graph_serialization: true,
    };

    /// Options with graph mode off.
    pub const TREE: Self = Self {
        use_graph_serialization: false,
    };
}

impl Default for TypeOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
