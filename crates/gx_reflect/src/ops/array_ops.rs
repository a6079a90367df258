use alloc::boxed::Box;

use crate::Reflect;

/// A positional container whose length is set once before filling.
pub trait Array: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Makes room for exactly `len` default items.
    ///
    /// Fixed-size arrays return `false` when `len` is not their size.
    fn resize_default(&mut self, len: usize) -> bool;

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}
