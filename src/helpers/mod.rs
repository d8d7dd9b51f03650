//! Helper functions shared by the exporters and the metadata injector

mod html;
mod url;

pub use html::*;
pub use url::*;
