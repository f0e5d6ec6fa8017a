#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Join URL fragments into a single URL with consistent slashes and merged query parameters.
//!
//! Fragments are joined with `'/'`, then the result is split into a prefix
//! (`scheme://authority`, or `//authority` in protocol-relative mode), path
//! segments, and a query. Runs of slashes in the path collapse into one,
//! the leading and trailing slashes follow the configured [`Slash`] policies,
//! and the query is merged with the configured parameters and sorted by key.
//!
//! No validation is performed: any input produces some output.
//!
//! # Examples
//!
//! ```
//! use url_merge::{merge, url_merge, Options, Slash};
//!
//! assert_eq!(url_merge!("foo", "bar"), "/foo/bar");
//! assert_eq!(url_merge!("http://example.com/", "/api", 2, "users"), "http://example.com/api/2/users");
//!
//! let options = Options::new().trailing_slash(Slash::Always).query("page", 1);
//! assert_eq!(url_merge!("/search//", "?q=rust", options), "/search/?page=1&q=rust");
//!
//! let options = Options::new().protocol_relative(true);
//! assert_eq!(merge(["//cdn.example.com", "assets"], &options), "//cdn.example.com/assets");
//! ```
//!
//! # Feature flags
//!
//! All features except `std` are disabled by default.
//!
//! - `std`: Enables `std` support. The crate is `no_std` (with `alloc`) otherwise.
//!
//! - `serde`: Enables [`serde`] support for [`Options`], [`Slash`], and [`QueryValue`],
//!   in the camelCase form `{"leadingSlash": "keep", "query": {"tag": ["a", "b"]}}`.
//!
//! [`serde`]: https://docs.rs/serde

extern crate alloc;

mod arg;
mod build;
mod options;
mod parser;
mod query;

pub mod pct_enc;

pub use arg::{Arg, Number};
pub use options::{Options, QueryValue, Slash, ToQueryScalar};
pub use query::{merge_query, Pairs, QueryStr};

use alloc::{borrow::Cow, string::String, vec::Vec};

/// Merges URL fragments with the given options.
///
/// String and numeric fragments are joined; any other [`Arg`],
/// including [`Arg::Options`], is ignored. Empty strings are ignored too.
///
/// # Examples
///
/// ```
/// use url_merge::{merge, Arg, Options, Slash};
///
/// assert_eq!(merge(["http://google.com//", "/foo"], &Options::new()), "http://google.com/foo");
/// assert_eq!(merge([Arg::from(1), Arg::from(None::<&str>), Arg::from(2)], &Options::new()), "/1/2");
///
/// let options = Options::new().leading_slash(Slash::Never).query("biz", "buz");
/// assert_eq!(merge(["google.com", "qux?tux=baz"], &options), "google.com/qux?biz=buz&tux=baz");
/// ```
#[must_use]
pub fn merge<'a, I>(fragments: I, options: &Options) -> String
where
    I: IntoIterator,
    I::Item: Into<Arg<'a>>,
{
    merge_normalized(arg::normalize(fragments.into_iter().map(Into::into)), options)
}

/// Merges URL fragments, taking the options from the last argument.
///
/// If the last argument is an [`Arg::Options`], it configures the merge;
/// otherwise the [default options](Options::default) apply. A list in
/// last position is not taken as options. See also the [`url_merge!`] macro.
///
/// # Examples
///
/// ```
/// use url_merge::{merge_args, Arg, Options};
///
/// let args = [Arg::from("foo"), Arg::from(Options::new().trailing_slash(true))];
/// assert_eq!(merge_args(args), "/foo/");
///
/// let args = [Arg::from("foo"), Arg::List(vec![Arg::from("bar")])];
/// assert_eq!(merge_args(args), "/foo");
///
/// assert_eq!(merge_args(Vec::new()), "/");
/// ```
#[must_use]
pub fn merge_args<'a, I>(args: I) -> String
where
    I: IntoIterator<Item = Arg<'a>>,
{
    let (args, options) = Options::split_from(args.into_iter().collect());
    merge_normalized(arg::normalize(args), &options)
}

fn merge_normalized(fragments: Vec<Cow<'_, str>>, options: &Options) -> String {
    let joined = fragments.join("/");
    let parts = parser::parse(&joined, options.protocol_relative);
    let url = build::build(&parts, options);
    log::trace!("merged {} fragment(s) into {:?}", fragments.len(), url);
    url
}

/// Merges any number of fragments, taking the options from the last argument.
///
/// Each argument is converted with [`Arg::from`], so strings, numbers,
/// `Option`s, booleans, and [`Options`] are all accepted.
/// This is a shorthand for [`merge_args`].
///
/// # Examples
///
/// ```
/// use url_merge::{url_merge, Options, Slash};
///
/// assert_eq!(url_merge!(), "/");
/// assert_eq!(url_merge!(None::<&str>, "foo", (), "bar"), "/foo/bar");
/// assert_eq!(url_merge!("/foo", Options::new().leading_slash(Slash::Keep)), "/foo");
/// assert_eq!(url_merge!("foo", Options::new().leading_slash(Slash::Keep)), "foo");
/// assert_eq!(url_merge!("/google.com", Options::new().query("foo", [1, 2, 3])), "/google.com?foo=1&foo=2&foo=3");
/// ```
#[macro_export]
macro_rules! url_merge {
    () => {
        $crate::merge_args(::core::iter::empty())
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::merge_args([$($crate::Arg::from($arg)),+])
    };
}
