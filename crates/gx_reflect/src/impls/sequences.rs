use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{TypeFlags, TypeInfo, TypePath, Typed};
use crate::ops::{Array, List, ReflectMut, ReflectRef};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

// -----------------------------------------------------------------------------
// Lists

macro_rules! impl_list {
    ($module:literal, $ident:ident, $push:ident) => {
        impl_generic_type_path!($module, $ident<T>);

        impl<T: Typed> Typed for $ident<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::new::<Self>(TypeFlags::LIST).with_pointee::<T>()
                })
            }
        }

        impl<T: Reflect + Typed + Default> Reflect for $ident<T> {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::List(self)
            }
        }

        impl<T: Reflect + Typed + Default> List for $ident<T> {
            #[inline]
            fn len(&self) -> usize {
                $ident::len(self)
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                (index < $ident::len(self)).then(|| &self[index] as &dyn Reflect)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<&$ident<T>>::into_iter(self).map(|item| item as &dyn Reflect))
            }

            #[inline]
            fn new_item(&self) -> Box<dyn Reflect> {
                Box::new(T::default())
            }

            fn push(&mut self, item: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                $ident::$push(self, item.take::<T>()?);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                $ident::clear(self);
            }
        }

        impl_get_type_meta!(
            impl<T> for $ident<T> where T: Reflect + Typed + Default + GetTypeMeta
        );
    };
}

impl_list!("alloc::vec", Vec, push);
impl_list!("alloc::collections::vec_deque", VecDeque, push_back);

// -----------------------------------------------------------------------------
// Fixed-size arrays

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }

    fn type_ident() -> &'static str {
        "array"
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::ARRAY).with_pointee::<T>())
    }
}

impl<T: Reflect + Typed + Default, const N: usize> Reflect for [T; N] {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }
}

impl<T: Reflect + Typed + Default, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn resize_default(&mut self, len: usize) -> bool {
        if len != N {
            return false;
        }
        self.fill_with(T::default);
        true
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn Reflect))
    }
}

// `[T; N]: Default` only exists for small `N`.
impl<T: Reflect + Typed + Default + GetTypeMeta, const N: usize> GetTypeMeta for [T; N] {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::with_capacity::<Self>(1);
        meta.insert_trait(TypeTraitDefault::new(|| {
            Box::new(core::array::from_fn::<T, N, _>(|_| T::default()))
        }));
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Boxed slices

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<[", T::type_name(), "]>"]))
    }

    fn type_ident() -> &'static str {
        "Box"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<T: Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::ARRAY).with_pointee::<T>())
    }
}

impl<T: Reflect + Typed + Default> Reflect for Box<[T]> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }
}

impl<T: Reflect + Typed + Default> Array for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn resize_default(&mut self, len: usize) -> bool {
        *self = (0..len).map(|_| T::default()).collect();
        true
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn Reflect))
    }
}

impl_get_type_meta!(impl<T> for Box<[T]> where T: Reflect + Typed + Default + GetTypeMeta);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{Kind, TypePath, Typed};
    use crate::ops::{Array, List, ReflectMut};

    #[test]
    fn paths() {
        assert_eq!(<Vec<i32>>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(<VecDeque<String>>::type_name(), "VecDeque<String>");
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<Box<[bool]>>::type_path(), "alloc::boxed::Box<[bool]>");
        assert_eq!(<Vec<Vec<u8>>>::type_info().pointee().unwrap().kind(), Kind::List);
    }

    #[test]
    fn push_checks_item_type() {
        let mut list: Vec<i32> = Vec::new();
        List::push(&mut list, Box::new(7_i32)).unwrap();
        let back = List::push(&mut list, Box::new(7_u8)).unwrap_err();
        assert!(back.is::<u8>());
        assert_eq!(list, [7]);

        let item = List::new_item(&list);
        assert_eq!(item.downcast_ref::<i32>(), Some(&0));
    }

    #[test]
    fn fixed_arrays_refuse_other_lengths() {
        let mut arr = [1_u8, 2, 3];
        assert!(!arr.resize_default(2));
        assert_eq!(arr, [1, 2, 3]);
        assert!(arr.resize_default(3));
        assert_eq!(arr, [0, 0, 0]);

        let mut boxed: Box<[u8]> = vec![9].into_boxed_slice();
        assert!(boxed.resize_default(2));
        assert_eq!(&*boxed, &[0, 0]);
    }

    #[test]
    fn views() {
        let mut deque = VecDeque::from([1_i64, 2]);
        let ReflectMut::List(list) = deque.reflect_mut() else {
            panic!("expected a list view");
        };
        let items: Vec<i64> = list
            .iter()
            .map(|item| *item.downcast_ref::<i64>().unwrap())
            .collect();
        assert_eq!(items, [1, 2]);
    }
}
