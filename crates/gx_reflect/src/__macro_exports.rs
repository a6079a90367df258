//! Items generated code refers to. Not public API.

/// Formats const generic arguments in derived type paths.
pub use alloc::string::ToString;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeRegistry};

    /// A registration function collected at link time.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Runs every collected registration function.
    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }

    /// Gives every registrable type a plain `fn` to submit.
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered through `inventory` itself. Its presence after
    /// [`__register_types`] shows that link-time collection works.
    pub struct __AvailFlag;

    impl crate::info::TypePath for __AvailFlag {
        fn type_path() -> &'static str {
            "gx_reflect::__macro_exports::auto_register::__AvailFlag"
        }

        fn type_name() -> &'static str {
            "__AvailFlag"
        }

        fn type_ident() -> &'static str {
            "__AvailFlag"
        }
    }

    impl crate::info::Typed for __AvailFlag {
        fn type_info() -> &'static crate::info::TypeInfo {
            static CELL: crate::impls::NonGenericTypeInfoCell =
                crate::impls::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| crate::info::TypeInfo::new::<Self>(crate::info::TypeFlags::empty()))
        }
    }

    impl GetTypeMeta for __AvailFlag {
        fn get_type_meta() -> crate::registry::TypeMeta {
            crate::registry::TypeMeta::of::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }
}
