use crate::Reflect;

/// A key/value pair, `(K, V)`.
pub trait Pair: Reflect {
    fn key(&self) -> &dyn Reflect;

    fn value(&self) -> &dyn Reflect;

    fn key_mut(&mut self) -> &mut dyn Reflect;

    fn value_mut(&mut self) -> &mut dyn Reflect;
}
