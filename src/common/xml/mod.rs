//! XML helpers shared by the package and presentation layers.
pub mod escape;
pub mod fragment;

pub use escape::{escape_run_text, escape_xml, unescape_run_text, unescape_xml};
pub use fragment::{ElementSpan, FragmentError};
