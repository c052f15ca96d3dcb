//! Loading schema/params documents and saving the pruned params.

mod format;
pub mod input;
pub mod output;

pub use format::{DocumentFormat, ExtensionFormat};
pub use input::{parse_document_any, parse_document_str};
pub use output::{ParamsSink, SaveOptions, render_document, save_params};
