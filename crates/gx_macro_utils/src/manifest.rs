use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Resolves the path under which a graphxml crate is reachable from the
/// crate that invokes a derive.
///
/// # Resolution rules
///
/// 1. A direct dependency called `name` resolves to `::name`.
/// 2. A `gx_*` crate reached through the umbrella `graphxml` package
///    resolves to `::graphxml::*` (`gx_reflect` -> `::graphxml::reflect`).
/// 3. Rules 1-2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::name`.
///
/// A crate that derives on its own types must declare
/// `extern crate self as gx_reflect;` so that `::gx_reflect` also works
/// from inside it.
///
/// ```rust
/// # use gx_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("gx_reflect"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: Option<SystemTime>,
}

const ENGINE_NAME: &str = "graphxml";
const ENGINE_PREFIX: &str = "gx_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    // An unreadable manifest resolves every crate to its absolute path.
    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(name: &str) -> syn::Path {
        let mut path = syn::Path::from(syn::Ident::new(name, Span::call_site()));
        path.leading_colon = Some(Default::default());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let module = name.strip_prefix(ENGINE_PREFIX)?;
        if deps.contains_key(ENGINE_NAME) {
            let mut path = Self::absolute(ENGINE_NAME);
            path.segments
                .push(syn::Ident::new(module, Span::call_site()).into());
            return Some(path);
        }
        None
    }

    /// Returns the path of the crate `name` as seen from the caller.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(name);
        };

        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::absolute(name)
    }

    /// Runs `func` against the caller's parsed `Cargo.toml`.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    /// Resolve paths once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
