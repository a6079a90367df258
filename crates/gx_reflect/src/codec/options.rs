use crate::info::{Kind, TypeInfo, TypeOptions};

/// Options of one encode call.
///
/// By default they come from the root type's `#[reflect(graph = ...)]`
/// marker; [`Encoder::with_options`](super::Encoder::with_options)
/// overrides that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Collapse repeated shared instances into one encoding plus
    /// back-references.
    pub use_graph_serialization: bool,
}

impl SerializeOptions {
    /// Options declared by the type behind `info`.
    ///
    /// `Option` and shared handles are looked through, so the marker on
    /// `Node` also governs a root of type `Rc<RefCell<Node>>`.
    pub fn of(mut info: &'static TypeInfo) -> Self {
        while matches!(info.kind(), Kind::Nullable | Kind::Shared) {
            match info.pointee() {
                Some(pointee) => info = pointee,
                None => break,
            }
        }
        info.options().into()
    }
}

impl Default for SerializeOptions {
    #[inline]
    fn default() -> Self {
        Self {
            use_graph_serialization: true,
        }
    }
}

impl From<TypeOptions> for SerializeOptions {
    #[inline]
    fn from(options: TypeOptions) -> Self {
        Self {
            use_graph_serialization: options.use_graph_serialization,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::SerializeOptions;
    use crate::info::Typed;

    #[derive(gx_reflect::derive::Reflect, Default)]
    #[reflect(graph = false)]
    struct Leaf {
        n: i32,
    }

    #[test]
    fn looks_through_wrappers() {
        assert!(SerializeOptions::default().use_graph_serialization);
        assert!(SerializeOptions::of(<Vec<Leaf>>::type_info()).use_graph_serialization);
        assert!(!SerializeOptions::of(Leaf::type_info()).use_graph_serialization);
        assert!(
            !SerializeOptions::of(<Option<Rc<RefCell<Leaf>>>>::type_info())
                .use_graph_serialization
        );
    }
}
