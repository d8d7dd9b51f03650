//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a single path segment
///
/// # Examples
/// ```ignore
/// encode_component("c++ & rust") // -> "c%2B%2B%20%26%20rust"
/// ```
pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// Normalize a site path to start with a single `/`
///
/// # Examples
/// ```ignore
/// site_path("blog/hello") // -> "/blog/hello"
/// site_path("") // -> "/"
/// ```
pub fn site_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Site path of a tag page
pub fn tag_path(tag: &str) -> String {
    format!("/tags/{}", encode_component(&tag.to_lowercase()))
}
