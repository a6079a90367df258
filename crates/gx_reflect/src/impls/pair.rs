use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{TypeFlags, TypeInfo, TypePath, Typed};
use crate::ops::{Pair, ReflectMut, ReflectRef};

impl<K: TypePath, V: TypePath> TypePath for (K, V) {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["(", K::type_path(), ", ", V::type_path(), ")"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["(", K::type_name(), ", ", V::type_name(), ")"]))
    }

    fn type_ident() -> &'static str {
        "tuple"
    }
}

impl<K: Typed, V: Typed> Typed for (K, V) {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::PAIR))
    }
}

impl<K: Reflect + Typed, V: Reflect + Typed> Reflect for (K, V) {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pair(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pair(self)
    }
}

impl<K: Reflect + Typed, V: Reflect + Typed> Pair for (K, V) {
    #[inline]
    fn key(&self) -> &dyn Reflect {
        &self.0
    }

    #[inline]
    fn value(&self) -> &dyn Reflect {
        &self.1
    }

    #[inline]
    fn key_mut(&mut self) -> &mut dyn Reflect {
        &mut self.0
    }

    #[inline]
    fn value_mut(&mut self) -> &mut dyn Reflect {
        &mut self.1
    }
}

impl_get_type_meta!(
    impl<K, V> for (K, V)
    where
        K: Reflect + Typed + Default + crate::registry::GetTypeMeta,
        V: Reflect + Typed + Default + crate::registry::GetTypeMeta
);

#[cfg(test)]
mod tests {
    use crate::info::{Kind, TypePath, Typed};
    use crate::ops::Pair;

    #[test]
    fn pair_view() {
        assert_eq!(<(i32, String)>::type_path(), "(i32, alloc::string::String)");
        assert_eq!(<(i32, String)>::type_info().kind(), Kind::Pair);

        let mut pair = (1_i32, String::from("x"));
        *pair.value_mut().downcast_mut::<String>().unwrap() = String::from("y");
        assert_eq!(pair.key().downcast_ref::<i32>(), Some(&1));
        assert_eq!(pair.1, "y");
    }
}
