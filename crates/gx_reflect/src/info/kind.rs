use crate::info::TypeFlags;

// -----------------------------------------------------------------------------
// Kind

/// The encode/decode strategy for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `Option<T>`: either `value="null"` or the inner value in place.
    Nullable,
    /// A reference type tracked by the identity cache.
    Shared,
    /// A slot whose concrete type is written in the `type` attribute.
    Dynamic,
    /// `value` attribute holding text.
    Scalar,
    /// Opaque markup written by the type itself.
    SelfDescribing,
    /// `value` attribute holding the discriminant.
    Enum,
    /// Positional children, fixed length.
    Array,
    /// `key` and `value` children.
    Pair,
    /// One pair element per entry.
    Map,
    /// Positional children, appended in order.
    List,
    /// One child per field, by name.
    Complex,
}

impl Kind {
    /// Returns `true` for kinds encoded as a single `value` attribute.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Kind::Scalar | Kind::Enum)
    }
}

/// Picks the [`Kind`] for a set of flags. First match wins:
///
/// 0. the Rust wrappers (nullable, shared, dynamic), which are transparent
///    slots rather than types of their own;
/// 1. custom scalar;
/// 2. force complex, which bypasses every check below;
/// 3. self-describing;
/// 4. enum;
/// 5. built-in scalar;
/// 6. array;
/// 7. key/value pair;
/// 8. dictionary-like;
/// 9. list-like;
/// 10. complex.
///
/// ```
/// use gx_reflect::info::{Kind, TypeFlags, classify};
///
/// assert_eq!(classify(TypeFlags::LIST | TypeFlags::FORCE_COMPLEX), Kind::Complex);
/// assert_eq!(classify(TypeFlags::LIST | TypeFlags::SELF_DESCRIBING), Kind::SelfDescribing);
/// assert_eq!(classify(TypeFlags::empty()), Kind::Complex);
/// ```
pub const fn classify(flags: TypeFlags) -> Kind {
    if flags.contains(TypeFlags::NULLABLE) {
        Kind::Nullable
    } else if flags.contains(TypeFlags::SHARED) {
        Kind::Shared
    } else if flags.contains(TypeFlags::DYNAMIC) {
        Kind::Dynamic
    } else if flags.contains(TypeFlags::CUSTOM_SCALAR) {
        Kind::Scalar
    } else if flags.contains(TypeFlags::FORCE_COMPLEX) {
        Kind::Complex
    } else if flags.contains(TypeFlags::SELF_DESCRIBING) {
        Kind::SelfDescribing
    } else if flags.contains(TypeFlags::ENUM) {
        Kind::Enum
    } else if flags.contains(TypeFlags::SCALAR) {
        Kind::Scalar
    } else if flags.contains(TypeFlags::ARRAY) {
        Kind::Array
    } else if flags.contains(TypeFlags::PAIR) {
        Kind::Pair
    } else if flags.contains(TypeFlags::MAP) {
        Kind::Map
    } else if flags.contains(TypeFlags::LIST) {
        Kind::List
    } else {
        Kind::Complex
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, classify};
    use crate::info::TypeFlags as F;

    #[test]
    fn decision_order() {
        assert_eq!(classify(F::CUSTOM_SCALAR | F::FORCE_COMPLEX), Kind::Scalar);
        assert_eq!(classify(F::FORCE_COMPLEX | F::SELF_DESCRIBING | F::MAP), Kind::Complex);
        assert_eq!(classify(F::SELF_DESCRIBING | F::ENUM), Kind::SelfDescribing);
        assert_eq!(classify(F::ENUM | F::SCALAR), Kind::Enum);
        assert_eq!(classify(F::SCALAR | F::LIST), Kind::Scalar);
        assert_eq!(classify(F::ARRAY | F::LIST), Kind::Array);
        assert_eq!(classify(F::PAIR | F::MAP), Kind::Pair);
        assert_eq!(classify(F::MAP | F::LIST), Kind::Map);
        assert_eq!(classify(F::LIST), Kind::List);
        assert_eq!(classify(F::NULLABLE | F::SCALAR), Kind::Nullable);
        assert_eq!(classify(F::SHARED | F::DYNAMIC), Kind::Shared);
    }

    #[test]
    fn leaves() {
        assert!(Kind::Scalar.is_leaf());
        assert!(Kind::Enum.is_leaf());
        assert!(!Kind::Complex.is_leaf());
    }
}
