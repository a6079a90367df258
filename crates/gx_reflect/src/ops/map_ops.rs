use alloc::boxed::Box;

use crate::Reflect;

/// A dictionary-like container.
///
/// Only insertion is required; there is no pair-typed accessor.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    /// Iterates in the container's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// A default key and value, ready to be filled and inserted.
    fn new_entry(&self) -> (Box<dyn Reflect>, Box<dyn Reflect>);

    /// Inserts an entry. A wrongly typed entry is given back.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;

    fn clear(&mut self);
}
