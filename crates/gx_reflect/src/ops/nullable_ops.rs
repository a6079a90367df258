use crate::Reflect;

/// `Option<T>`: a slot that may hold the null value.
pub trait Nullable: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn set_null(&mut self);

    /// Replaces the content with a default value and returns it.
    fn insert_default(&mut self) -> &mut dyn Reflect;
}
