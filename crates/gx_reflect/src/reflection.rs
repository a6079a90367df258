use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::{DynamicTypePath, DynamicTyped};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The root trait of the reflection model.
///
/// A `Reflect` value can name its type ([`DynamicTypePath`]), describe it
/// ([`DynamicTyped`]) and expose itself through exactly one capability view
/// ([`reflect_ref`](Reflect::reflect_ref) / [`reflect_mut`](Reflect::reflect_mut)),
/// the one matching the classified [`Kind`](crate::info::Kind) of its type.
/// The codec only talks to values through these views.
///
/// Use [`#[derive(Reflect)]`](crate::derive::Reflect) for your own types.
///
/// # Type identification
///
/// `Box<dyn Reflect>` is itself `'static`, so [`Any::type_id`] on the box
/// gives the box's id. Use [`ty_id`](Reflect::ty_id):
///
/// ```
/// use core::any::TypeId;
/// use gx_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = Box::new(1_i32);
/// assert_eq!(x.ty_id(), TypeId::of::<i32>());
/// assert_eq!(x.downcast_ref::<i32>(), Some(&1));
/// ```
pub trait Reflect: DynamicTypePath + DynamicTyped + Any {
    /// Casts to a `&dyn Reflect`.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts to a `&mut dyn Reflect`.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes the value as a `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        self.reflect_type_info().type_id()
    }

    /// Returns the capability view for this value's kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns the mutable capability view for this value's kind.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Downcasts a box, giving it back unchanged if the type differs.
    pub fn downcast<T: Any>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Moves the value out of a box, giving it back unchanged if the type differs.
    ///
    /// ```
    /// use gx_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = Box::new(String::from("a"));
    /// let x = x.take::<i32>().unwrap_err();
    /// assert_eq!(x.take::<String>().unwrap(), "a");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<Self>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "dyn Reflect<{}>", self.reflect_type_path())
    }
}
