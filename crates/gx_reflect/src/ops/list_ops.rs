use alloc::boxed::Box;

use crate::Reflect;

/// A container supporting ordered append.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Iterates in append order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// A default item, ready to be filled and [`push`](List::push)ed.
    fn new_item(&self) -> Box<dyn Reflect>;

    /// Appends an item, giving it back if it has the wrong type.
    fn push(&mut self, item: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn clear(&mut self);
}
