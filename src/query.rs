//! Query strings and their merging.

use crate::{
    pct_enc::{self, table::COMPONENT},
    QueryValue,
};
use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::{cmp::Ordering, fmt, hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A raw query string slice, possibly starting with `'?'`.
///
/// Any string slice is a valid `QueryStr`. Keys and values are split
/// on `'&'` and the first `'='`, then percent-decoded leniently.
///
/// # Examples
///
/// ```
/// use url_merge::QueryStr;
///
/// let query = QueryStr::new("?id=3&&flag&name=%E5%BC%A0%E4%B8%89");
/// let pairs: Vec<_> = query.pairs().collect();
/// assert_eq!(
///     pairs,
///     [("id", Some("3")), ("flag", None), ("name", Some("%E5%BC%A0%E4%B8%89"))]
/// );
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct QueryStr {
    inner: str,
}

impl QueryStr {
    /// Converts a string slice to a `QueryStr` slice.
    #[ref_cast_custom]
    pub const fn new(s: &str) -> &Self;

    /// An empty `QueryStr` slice.
    pub const EMPTY: &'static Self = Self::new("");

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Checks whether the `QueryStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes one leading `'?'`, if any.
    #[must_use]
    pub fn strip_marker(&self) -> &Self {
        Self::new(self.inner.strip_prefix('?').unwrap_or(&self.inner))
    }

    /// Returns an iterator over the raw key-value pairs of the query.
    ///
    /// A leading `'?'` is stripped first. Empty segments are skipped.
    /// A segment without `'='` yields a valueless key.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            inner: self.strip_marker().inner.split('&'),
        }
    }
}

impl Default for &QueryStr {
    /// Creates an empty `QueryStr` slice.
    fn default() -> Self {
        QueryStr::EMPTY
    }
}

impl AsRef<str> for QueryStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for QueryStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for QueryStr {}

impl hash::Hash for QueryStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialEq<str> for QueryStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<QueryStr> for str {
    fn eq(&self, other: &QueryStr) -> bool {
        self == &other.inner
    }
}

impl fmt::Debug for QueryStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for QueryStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// An iterator over the raw key-value pairs of a [`QueryStr`].
///
/// This struct is created by [`QueryStr::pairs`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pairs<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let seg = self.inner.next()?;
            if seg.is_empty() {
                log::trace!("skipping empty query segment");
                continue;
            }
            return Some(match seg.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (seg, None),
            });
        }
    }
}

impl FusedIterator for Pairs<'_> {}

/// Compares strings by their UTF-16 code units, as ECMAScript's default sort does.
fn cmp_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// The decoded entries of a query, grouped by key.
///
/// Groups keep the order in which their keys first appeared.
/// Each occurrence is either valueless (`None`) or has a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct QueryMap<'a> {
    groups: Vec<(Cow<'a, str>, Vec<Option<Cow<'a, str>>>)>,
}

impl<'a> QueryMap<'a> {
    /// Decodes the key-value pairs of a query string.
    pub(crate) fn decode(query: &'a QueryStr) -> Self {
        let mut map = Self::default();
        for (k, v) in query.pairs() {
            map.push(pct_enc::decode(k), v.map(pct_enc::decode));
        }
        map
    }

    fn push(&mut self, key: Cow<'a, str>, value: Option<Cow<'a, str>>) {
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((key, Vec::from([value]))),
        }
    }

    /// Replaces every occurrence of each key in `query` with the new value(s).
    ///
    /// A key mapped to an empty list disappears from the query.
    pub(crate) fn merge(&mut self, query: &'a BTreeMap<String, QueryValue>) {
        for (key, value) in query {
            let values: Vec<_> = value
                .values()
                .iter()
                .map(|v| Some(Cow::Borrowed(v.as_str())))
                .collect();

            match self.groups.iter().position(|(k, _)| k == key) {
                Some(i) if values.is_empty() => {
                    self.groups.remove(i);
                }
                Some(i) => self.groups[i].1 = values,
                None if values.is_empty() => {}
                None => self.groups.push((Cow::Borrowed(key), values)),
            }
        }
    }

    /// Returns `true` if there are no entries.
    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Writes the entries, sorted by key, to a buffer.
    pub(crate) fn write_to(&self, buf: &mut String) {
        let mut groups: Vec<_> = self.groups.iter().collect();
        groups.sort_by(|a, b| cmp_utf16(&a.0, &b.0));

        let mut first = true;
        for (key, values) in groups {
            for value in values {
                if !first {
                    buf.push('&');
                }
                first = false;

                pct_enc::encode_to(key, COMPONENT, buf);
                if let Some(value) = value {
                    buf.push('=');
                    pct_enc::encode_to(value, COMPONENT, buf);
                }
            }
        }
    }
}

impl fmt::Display for QueryMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.write_to(&mut buf);
        f.write_str(&buf)
    }
}

/// Merges query parameters into a query string.
///
/// The existing entries are decoded from `query` (which may start with `'?'`),
/// then every key of `params` replaces all existing entries under it.
/// The result is sorted by key and percent-encoded as by ECMAScript's
/// `encodeURIComponent`, without a leading `'?'`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use url_merge::{merge_query, QueryStr, QueryValue};
///
/// let mut params = BTreeMap::new();
/// params.insert("tag".to_string(), QueryValue::from(["a b", "c"]));
///
/// let query = QueryStr::new("?z=1&tag=old&flag");
/// assert_eq!(merge_query(query, Some(&params)), "flag&tag=a%20b&tag=c&z=1");
/// ```
#[must_use]
pub fn merge_query(query: &QueryStr, params: Option<&BTreeMap<String, QueryValue>>) -> String {
    let mut map = QueryMap::decode(query);
    if let Some(params) = params {
        map.merge(params);
    }
    map.to_string()
}
