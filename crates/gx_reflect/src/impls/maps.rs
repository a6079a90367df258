use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::Hash;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, generic_name};
use crate::info::{TypeFlags, TypeInfo, TypePath, Typed};
use crate::ops::{Map, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// impl_map

// `$path` is the path written to documents. Maps of the same short name
// (the two `HashMap`s) share a `type_name`, so the registry only resolves
// them by full path.
macro_rules! impl_map {
    ($path:literal, $name:literal, $map:ty, $($key_bound:tt)+) => {
        impl<K: TypePath, V: TypePath> TypePath for $map {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    generic_name($path, &[K::type_path(), V::type_path()])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    generic_name($name, &[K::type_name(), V::type_name()])
                })
            }

            fn type_ident() -> &'static str {
                $name
            }

            fn module_path() -> Option<&'static str> {
                $path.rsplit_once("::").map(|(module, _)| module)
            }
        }

        impl<K: Typed, V: Typed> Typed for $map {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeFlags::MAP))
            }
        }

        impl<K, V> Reflect for $map
        where
            K: Reflect + Typed + Default + $($key_bound)+,
            V: Reflect + Typed + Default,
        {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }
        }

        impl<K, V> Map for $map
        where
            K: Reflect + Typed + Default + $($key_bound)+,
            V: Reflect + Typed + Default,
        {
            #[inline]
            fn len(&self) -> usize {
                <$map>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    <$map>::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
                )
            }

            #[inline]
            fn new_entry(&self) -> (Box<dyn Reflect>, Box<dyn Reflect>) {
                (Box::new(K::default()), Box::new(V::default()))
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                let key = match key.take::<K>() {
                    Ok(key) => key,
                    Err(key) => return Err((key, value)),
                };
                let value = match value.take::<V>() {
                    Ok(value) => value,
                    Err(value) => return Err((Box::new(key), value)),
                };
                <$map>::insert(self, key, value);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                <$map>::clear(self);
            }
        }

        impl_get_type_meta!(
            impl<K, V> for $map
            where
                K: Reflect + Typed + Default + $($key_bound)+ + $crate::registry::GetTypeMeta,
                V: Reflect + Typed + Default + $crate::registry::GetTypeMeta
        );
    };
}

impl_map!(
    "std::collections::HashMap",
    "HashMap",
    std::collections::HashMap<K, V>,
    Eq + Hash
);

impl_map!(
    "gx_utils::hash::HashMap",
    "HashMap",
    gx_utils::hash::HashMap<K, V>,
    Eq + Hash
);

impl_map!(
    "alloc::collections::BTreeMap",
    "BTreeMap",
    BTreeMap<K, V>,
    Ord
);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::info::{Kind, TypePath, Typed};
    use crate::ops::Map;

    #[test]
    fn paths() {
        assert_eq!(
            <BTreeMap<String, i32>>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, i32>"
        );
        assert_eq!(
            <std::collections::HashMap<u8, u8>>::type_name(),
            <gx_utils::hash::HashMap<u8, u8>>::type_name(),
        );
        assert_ne!(
            <std::collections::HashMap<u8, u8>>::type_path(),
            <gx_utils::hash::HashMap<u8, u8>>::type_path(),
        );
        assert_eq!(
            <BTreeMap<u8, u8>>::module_path(),
            Some("alloc::collections")
        );
        assert_eq!(<BTreeMap<u8, u8>>::type_info().kind(), Kind::Map);
    }

    #[test]
    fn insert_boxed() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let (mut key, mut value) = map.new_entry();
        *key.downcast_mut::<String>().unwrap() = String::from("a");
        *value.downcast_mut::<i32>().unwrap() = 1;
        map.insert_boxed(key, value).unwrap();
        assert_eq!(map.get("a"), Some(&1));

        let (key, value) = map
            .insert_boxed(Box::new(String::from("b")), Box::new(1_u64))
            .unwrap_err();
        assert!(key.is::<String>());
        assert!(value.is::<u64>());
        assert_eq!(Map::len(&map), 1);
    }
}
