use crate::Reflect;

/// A fieldless enum, serialized by discriminant.
///
/// Renaming a variant keeps old documents readable; renumbering does not.
///
/// ```
/// use gx_reflect::{derive::Reflect, ops::Enum};
///
/// #[derive(Reflect, Default, Clone, Copy, PartialEq, Debug)]
/// enum Level {
///     #[default]
///     Low,
///     High = 10,
/// }
///
/// let mut level = Level::Low;
/// assert_eq!(level.discriminant(), 0);
/// assert!(level.set_discriminant(10));
/// assert_eq!(level, Level::High);
/// assert_eq!(level.variant_name(), "High");
/// assert!(!level.set_discriminant(3));
/// ```
pub trait Enum: Reflect {
    /// The discriminant of the current variant.
    fn discriminant(&self) -> i64;

    /// Switches to the variant with `discriminant`. Returns `false`,
    /// leaving the value unchanged, if no variant has it.
    fn set_discriminant(&mut self, discriminant: i64) -> bool;

    /// Name of the current variant.
    fn variant_name(&self) -> &'static str;
}
