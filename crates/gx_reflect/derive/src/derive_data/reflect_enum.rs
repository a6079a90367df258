use syn::Variant;

use super::ReflectMeta;

pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    /// Unit variants only.
    pub variants: Vec<&'a Variant>,
}
