use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::Any;
use core::cell::RefCell;

use gx_utils::AddrKey;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeFlags, TypeInfo, Typed};
use crate::ops::{Nullable, ReflectMut, ReflectRef, Shared};
use crate::registry::GetTypeMeta;

impl_generic_type_path!("core::option", Option<T>);
impl_generic_type_path!("alloc::rc", Rc<T>);
impl_generic_type_path!("alloc::sync", Arc<T>);
impl_generic_type_path!("core::cell", RefCell<T>);

// -----------------------------------------------------------------------------
// Option

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::NULLABLE).with_pointee::<T>())
    }
}

impl<T: Reflect + Typed + Default> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Nullable(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Nullable(self)
    }
}

impl<T: Reflect + Typed + Default> Nullable for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn set_null(&mut self) {
        *self = None;
    }

    #[inline]
    fn insert_default(&mut self) -> &mut dyn Reflect {
        Option::<T>::insert(self, T::default())
    }
}

impl_get_type_meta!(impl<T> for Option<T> where T: Reflect + Typed + Default + GetTypeMeta);

// -----------------------------------------------------------------------------
// Rc / Arc

// Mutation through a plain `Rc` or `Arc` needs the only handle, so a
// pointee is registered for reuse only after its body is decoded.
macro_rules! impl_shared_handle {
    ($handle:ident) => {
        impl<T: Typed> Typed for $handle<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::new::<Self>(TypeFlags::SHARED).with_pointee::<T>()
                })
            }
        }

        impl<T: Reflect + Typed + Default> Reflect for $handle<T> {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Shared(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Shared(self)
            }
        }

        impl<T: Reflect + Typed + Default> Shared for $handle<T> {
            #[inline]
            fn addr_key(&self) -> AddrKey {
                AddrKey::of::<T>($handle::as_ptr(self))
            }

            #[inline]
            fn pointee_info(&self) -> &'static TypeInfo {
                T::type_info()
            }

            fn with_pointee(&self, f: &mut dyn FnMut(&dyn Reflect)) -> bool {
                f(&**self);
                true
            }

            fn with_pointee_mut(&mut self, f: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
                match $handle::get_mut(self) {
                    Some(pointee) => {
                        f(pointee);
                        true
                    }
                    None => false,
                }
            }

            #[inline]
            fn renew(&mut self) {
                *self = $handle::new(T::default());
            }

            #[inline]
            fn share_handle(&self) -> Box<dyn Any> {
                Box::new($handle::clone(self))
            }

            fn adopt(&mut self, handle: &dyn Any) -> bool {
                match handle.downcast_ref::<$handle<T>>() {
                    Some(handle) => {
                        *self = $handle::clone(handle);
                        true
                    }
                    None => false,
                }
            }

            #[inline]
            fn interior_mutable(&self) -> bool {
                false
            }
        }

        impl_get_type_meta!(
            impl<T> for $handle<T> where T: Reflect + Typed + Default + GetTypeMeta
        );
    };
}

impl_shared_handle!(Rc);
impl_shared_handle!(Arc);

// -----------------------------------------------------------------------------
// Rc<RefCell>

// `RefCell<T>` is not `Typed` itself, so this never overlaps `Rc<T>`.
impl<T: Typed> Typed for Rc<RefCell<T>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::SHARED).with_pointee::<T>())
    }
}

impl<T: Reflect + Typed + Default> Reflect for Rc<RefCell<T>> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Shared(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Shared(self)
    }
}

impl<T: Reflect + Typed + Default> Shared for Rc<RefCell<T>> {
    #[inline]
    fn addr_key(&self) -> AddrKey {
        AddrKey::of::<RefCell<T>>(Rc::as_ptr(self))
    }

    #[inline]
    fn pointee_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    fn with_pointee(&self, f: &mut dyn FnMut(&dyn Reflect)) -> bool {
        match self.try_borrow() {
            Ok(pointee) => {
                f(&*pointee);
                true
            }
            Err(_) => false,
        }
    }

    fn with_pointee_mut(&mut self, f: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
        match self.try_borrow_mut() {
            Ok(mut pointee) => {
                f(&mut *pointee);
                true
            }
            Err(_) => false,
        }
    }

    #[inline]
    fn renew(&mut self) {
        *self = Rc::new(RefCell::new(T::default()));
    }

    #[inline]
    fn share_handle(&self) -> Box<dyn Any> {
        Box::new(Rc::clone(self))
    }

    fn adopt(&mut self, handle: &dyn Any) -> bool {
        match handle.downcast_ref::<Rc<RefCell<T>>>() {
            Some(handle) => {
                *self = Rc::clone(handle);
                true
            }
            None => false,
        }
    }

    #[inline]
    fn interior_mutable(&self) -> bool {
        true
    }
}

impl_get_type_meta!(impl<T> for Rc<RefCell<T>> where T: Reflect + Typed + Default + GetTypeMeta);

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use core::cell::RefCell;

    use crate::info::{Kind, TypePath, Typed};
    use crate::ops::{Nullable, Shared};

    #[test]
    fn paths_and_kinds() {
        assert_eq!(<Option<i32>>::type_path(), "core::option::Option<i32>");
        assert_eq!(
            <Rc<RefCell<String>>>::type_path(),
            "alloc::rc::Rc<core::cell::RefCell<alloc::string::String>>"
        );
        assert_eq!(<Arc<u8>>::type_name(), "Arc<u8>");

        let info = <Rc<RefCell<u8>>>::type_info();
        assert_eq!(info.kind(), Kind::Shared);
        assert!(info.pointee().unwrap().is::<u8>());
    }

    #[test]
    fn nullable() {
        let mut x: Option<i32> = None;
        assert!(Nullable::value(&x).is_none());
        *x.insert_default().downcast_mut::<i32>().unwrap() = 3;
        assert_eq!(x, Some(3));
        x.set_null();
        assert_eq!(x, None);
    }

    #[test]
    fn identity() {
        let a = Rc::new(1_u8);
        let b = Rc::clone(&a);
        let c = Rc::new(1_u8);
        assert_eq!(a.addr_key(), b.addr_key());
        assert_ne!(a.addr_key(), c.addr_key());

        let mut d = Rc::new(0_u8);
        assert!(d.adopt(&*a.share_handle()));
        assert!(Rc::ptr_eq(&d, &a));
        assert!(!d.adopt(&5_u8));
    }

    #[test]
    fn plain_handles_mutate_only_when_unique() {
        let mut a = Arc::new(1_u32);
        assert!(a.with_pointee_mut(&mut |v| *v.downcast_mut::<u32>().unwrap() = 2));
        assert_eq!(*a, 2);

        let b = Arc::clone(&a);
        assert!(!a.with_pointee_mut(&mut |_| {}));
        assert!(!a.interior_mutable());
        drop(b);
    }

    #[test]
    fn ref_cells_report_borrows() {
        let mut a = Rc::new(RefCell::new(1_i64));
        let b = Rc::clone(&a);
        assert!(a.interior_mutable());
        assert!(a.with_pointee_mut(&mut |v| *v.downcast_mut::<i64>().unwrap() = 5));
        assert_eq!(*b.borrow(), 5);

        let guard = b.borrow_mut();
        assert!(!a.with_pointee(&mut |_| {}));
        drop(guard);

        let mut seen = 0;
        assert!(a.with_pointee(&mut |v| seen = *v.downcast_ref::<i64>().unwrap()));
        assert_eq!(seen, 5);
    }
}
