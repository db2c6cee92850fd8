//! Path and query string helpers for Resource Manager URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{ArmError, ArmResult};

/// Characters left as-is in path segments and query values (RFC 3986 unreserved).
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single path segment or query value.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Validate and encode a required path parameter.
///
/// `param` is the service's parameter name, used in the error message.
pub fn segment(param: &str, value: &str) -> ArmResult<String> {
    if value.is_empty() {
        return Err(ArmError::empty_parameter(param));
    }
    Ok(encode(value))
}

/// Append `key=value` to a path that already carries a query string.
pub fn append_query(path: &mut String, key: &str, value: &str) {
    path.push(if path.contains('?') { '&' } else { '?' });
    path.push_str(key);
    path.push('=');
    path.push_str(&encode(value));
}

/// Append `key=value` only when `value` is present.
pub fn append_optional<V: ToString>(path: &mut String, key: &str, value: Option<V>) {
    if let Some(value) = value {
        append_query(path, key, &value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode("my rg"), "my%20rg");
        assert_eq!(encode("a/b"), "a%2Fb");
        assert_eq!(encode("name-1_x.y~z"), "name-1_x.y~z");
    }

    #[test]
    fn empty_segment_is_rejected() {
        let err = segment("cacheName", "").unwrap_err();
        assert!(err.to_string().contains("parameter cacheName cannot be empty"));
    }

    #[test]
    fn append_query_picks_separator() {
        let mut path = String::from("/resourcegroups");
        append_query(&mut path, "api-version", "2021-04-01");
        append_query(&mut path, "$filter", "tagName eq 'env'");
        assert_eq!(
            path,
            "/resourcegroups?api-version=2021-04-01&$filter=tagName%20eq%20%27env%27"
        );
    }

    #[test]
    fn append_optional_skips_none() {
        let mut path = String::from("/x?api-version=1");
        append_optional::<u32>(&mut path, "$top", None);
        append_optional(&mut path, "$top", Some(10));
        assert_eq!(path, "/x?api-version=1&$top=10");
    }
}
