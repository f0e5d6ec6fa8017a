use crate::{pct_enc::table::WORD, query::QueryStr};
use alloc::vec::Vec;

/// The joined fragments split into prefix, path and query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Parts<'a> {
    /// Scheme and authority (`http://host`), or `//host` in protocol-relative mode.
    pub prefix: &'a str,
    /// Non-empty path segments.
    pub segments: Vec<&'a str>,
    pub has_leading_slash: bool,
    pub has_trailing_slash: bool,
    /// Raw query text including the leading `?`, or empty.
    pub query: &'a QueryStr,
}

/// Returns the length of the authority starting at `i`, i.e., the longest
/// run of bytes other than `/` and `?`.
fn authority_len(s: &[u8], i: usize) -> usize {
    s[i..].iter().take_while(|&&x| x != b'/' && x != b'?').count()
}

/// Matches `\w+://[^/?]+` at the start of the string.
fn scheme_prefix_len(s: &[u8]) -> usize {
    let scheme_len = s.iter().take_while(|&&x| WORD.allows_ascii(x)).count();
    if scheme_len == 0 || !s[scheme_len..].starts_with(b"://") {
        return 0;
    }
    match authority_len(s, scheme_len + 3) {
        0 => 0,
        len => scheme_len + 3 + len,
    }
}

/// Matches `//[^/?]+` at the start of the string.
fn protocol_relative_prefix_len(s: &[u8]) -> usize {
    if !s.starts_with(b"//") {
        return 0;
    }
    match authority_len(s, 2) {
        0 => 0,
        len => 2 + len,
    }
}

/// Finds the start of the query, that is, the first `'?'` which is
/// followed by at least one byte.
fn query_start(s: &[u8], from: usize) -> usize {
    s[from..]
        .iter()
        .position(|&x| x == b'?')
        .map(|i| from + i)
        .filter(|&i| i + 1 < s.len())
        .unwrap_or(s.len())
}

/// Parses the joined fragments.
///
/// The string is split as by the pattern `^(\w+://[^/?]+)?(.*?)(\?.+)?$`,
/// or `^(//[^/?]+)?(.*?)(\?.+)?$` in protocol-relative mode.
pub(crate) fn parse(s: &str, protocol_relative: bool) -> Parts<'_> {
    let bytes = s.as_bytes();

    let prefix_len = if protocol_relative {
        protocol_relative_prefix_len(bytes)
    } else {
        scheme_prefix_len(bytes)
    };
    let query_i = query_start(bytes, prefix_len);

    // All boundaries are at ASCII bytes.
    let prefix = &s[..prefix_len];
    let pathname = &s[prefix_len..query_i];
    let query = QueryStr::new(&s[query_i..]);

    // Before a query, only a run of two or more slashes counts.
    let slash = if query.is_empty() { "/" } else { "//" };

    Parts {
        prefix,
        segments: pathname.split('/').filter(|seg| !seg.is_empty()).collect(),
        has_leading_slash: pathname.starts_with(slash),
        has_trailing_slash: pathname.ends_with(slash),
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(
        prefix: &'a str,
        segments: &[&'a str],
        leading: bool,
        trailing: bool,
        query: &'a str,
    ) -> Parts<'a> {
        Parts {
            prefix,
            segments: segments.to_vec(),
            has_leading_slash: leading,
            has_trailing_slash: trailing,
            query: QueryStr::new(query),
        }
    }

    #[test]
    fn parse_default() {
        let cases = [
            ("", parts("", &[], false, false, "")),
            ("foo", parts("", &["foo"], false, false, "")),
            ("/foo//bar/", parts("", &["foo", "bar"], true, true, "")),
            ("//", parts("", &[], true, true, "")),
            (
                "http://google.com//foo",
                parts("http://google.com", &["foo"], true, false, ""),
            ),
            (
                "http://google.com?q=1",
                parts("http://google.com", &[], false, false, "?q=1"),
            ),
            (
                "http://google.com/foo//?q",
                parts("http://google.com", &["foo"], false, true, "?q"),
            ),
            // Not an authority: nothing after `://`.
            ("http:///foo", parts("", &["http:", "foo"], false, false, "")),
            // Not an authority: the scheme is not at the start.
            ("/http://host", parts("", &["http:", "host"], true, false, "")),
            ("a-b://host", parts("", &["a-b:", "host"], false, false, "")),
            // `//host` is a path without protocol-relative mode.
            ("//google.com/foo", parts("", &["google.com", "foo"], true, false, "")),
            ("/?q", parts("", &[], false, false, "?q")),
            ("//?q", parts("", &[], true, true, "?q")),
            ("//foo/?q", parts("", &["foo"], true, false, "?q")),
            ("/foo/", parts("", &["foo"], true, true, "")),
            // A trailing `?` is part of the path.
            ("foo?", parts("", &["foo?"], false, false, "")),
            ("foo??", parts("", &["foo"], false, false, "??")),
            ("foo?a?b", parts("", &["foo"], false, false, "?a?b")),
            ("foo\nbar?x", parts("", &["foo\nbar"], false, false, "?x")),
        ];

        for (s, expected) in cases {
            assert_eq!(parse(s, false), expected, "{:?}", s);
        }
    }

    #[test]
    fn parse_protocol_relative() {
        let cases = [
            ("", parts("", &[], false, false, "")),
            ("//google.com", parts("//google.com", &[], false, false, "")),
            (
                "//google.com/foo//",
                parts("//google.com", &["foo"], true, true, ""),
            ),
            (
                "//google.com?a=b",
                parts("//google.com", &[], false, false, "?a=b"),
            ),
            ("//", parts("", &[], true, true, "")),
            ("///foo", parts("", &["foo"], true, false, "")),
            ("foo/bar", parts("", &["foo", "bar"], false, false, "")),
            // Schemes are not recognized in this mode.
            (
                "http://google.com",
                parts("", &["http:", "google.com"], false, false, ""),
            ),
        ];

        for (s, expected) in cases {
            assert_eq!(parse(s, true), expected, "{:?}", s);
        }
    }
}
