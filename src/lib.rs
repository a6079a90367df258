#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use gx_reflect as reflect;
pub use gx_utils as utils;
pub use gx_xml as xml;
