//! Configuration of a merge.

use crate::{arg::Number, Arg};
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// Policy for a leading or trailing slash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slash {
    /// Always emit the slash.
    Always,
    /// Never emit the slash.
    Never,
    /// Emit the slash only if the joined fragments had one.
    Keep,
}

impl From<bool> for Slash {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Slash::Always
        } else {
            Slash::Never
        }
    }
}

impl Slash {
    /// Decides whether to emit the slash, given whether the input had one.
    #[inline]
    #[must_use]
    pub fn resolve(self, present: bool) -> bool {
        match self {
            Slash::Always => true,
            Slash::Never => false,
            Slash::Keep => present,
        }
    }
}

impl fmt::Display for Slash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slash::Always => "true",
            Slash::Never => "false",
            Slash::Keep => "keep",
        })
    }
}

/// A value to put in the query under some key.
///
/// Scalars and list elements are kept in their textual form.
/// A list expands to one `key=value` pair per element, in order.
///
/// # Examples
///
/// ```
/// use url_merge::QueryValue;
///
/// assert_eq!(QueryValue::from(1), QueryValue::Scalar("1".into()));
/// assert_eq!(QueryValue::from(true), QueryValue::Scalar("true".into()));
/// assert_eq!(
///     QueryValue::from([1, 2]),
///     QueryValue::List(vec!["1".into(), "2".into()])
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// A single value.
    Scalar(String),
    /// A list of values sharing the same key.
    List(Vec<String>),
}

impl QueryValue {
    /// Returns the values in order.
    pub fn values(&self) -> &[String] {
        match self {
            QueryValue::Scalar(s) => core::slice::from_ref(s),
            QueryValue::List(v) => v,
        }
    }
}

/// Conversion of a scalar into its textual form for a [`QueryValue`].
pub trait ToQueryScalar {
    /// Returns the textual form of the scalar.
    fn to_query_scalar(&self) -> String;
}

impl ToQueryScalar for str {
    fn to_query_scalar(&self) -> String {
        self.to_string()
    }
}

impl ToQueryScalar for String {
    fn to_query_scalar(&self) -> String {
        self.clone()
    }
}

impl ToQueryScalar for bool {
    fn to_query_scalar(&self) -> String {
        self.to_string()
    }
}

impl ToQueryScalar for char {
    fn to_query_scalar(&self) -> String {
        self.to_string()
    }
}

impl ToQueryScalar for Number {
    fn to_query_scalar(&self) -> String {
        self.to_string()
    }
}

impl<T: ToQueryScalar + ?Sized> ToQueryScalar for &T {
    fn to_query_scalar(&self) -> String {
        (**self).to_query_scalar()
    }
}

macro_rules! impl_number_scalar {
    ($($ty:ty),+) => {
        $(
            impl ToQueryScalar for $ty {
                fn to_query_scalar(&self) -> String {
                    Number::from(*self).to_string()
                }
            }
        )+
    };
}

impl_number_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: ToQueryScalar> From<T> for QueryValue {
    #[inline]
    fn from(value: T) -> Self {
        QueryValue::Scalar(value.to_query_scalar())
    }
}

impl<T: ToQueryScalar> From<Vec<T>> for QueryValue {
    fn from(value: Vec<T>) -> Self {
        QueryValue::List(value.iter().map(ToQueryScalar::to_query_scalar).collect())
    }
}

impl<T: ToQueryScalar> From<&[T]> for QueryValue {
    fn from(value: &[T]) -> Self {
        QueryValue::List(value.iter().map(ToQueryScalar::to_query_scalar).collect())
    }
}

impl<T: ToQueryScalar, const N: usize> From<[T; N]> for QueryValue {
    fn from(value: [T; N]) -> Self {
        QueryValue::List(value.iter().map(ToQueryScalar::to_query_scalar).collect())
    }
}

/// Options of a merge.
///
/// With the `serde` feature, options (de)serialize as a camelCase map:
/// `leadingSlash` and `trailingSlash` take `true`, `false`, or `"keep"`,
/// `protocolRelative` takes a boolean, and `query` takes a map of scalars
/// or sequences of scalars. Missing fields take their defaults and
/// unknown fields are ignored.
///
/// Use [`Options::new`] (or [`Default`]) to get the defaults, then
/// chain the setters to override them.
///
/// # Examples
///
/// ```
/// use url_merge::{merge, Options, Slash};
///
/// let options = Options::new()
///     .leading_slash(Slash::Keep)
///     .trailing_slash(true)
///     .query("page", 2);
///
/// assert_eq!(merge(["foo", "bar"], &options), "foo/bar/?page=2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Controls the leading slash. Defaults to [`Slash::Always`].
    pub leading_slash: Slash,
    /// Controls the trailing slash. Defaults to [`Slash::Never`].
    pub trailing_slash: Slash,
    /// When `true`, a leading `//host` is an authority rather than a path.
    /// Defaults to `false`.
    pub protocol_relative: bool,
    /// Query parameters merged over the query of the joined fragments.
    ///
    /// A key present here replaces every existing value under it.
    pub query: Option<BTreeMap<String, QueryValue>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            leading_slash: Slash::Always,
            trailing_slash: Slash::Never,
            protocol_relative: false,
            query: None,
        }
    }
}

impl Options {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the leading slash policy.
    #[must_use]
    pub fn leading_slash(mut self, slash: impl Into<Slash>) -> Self {
        self.leading_slash = slash.into();
        self
    }

    /// Sets the trailing slash policy.
    #[must_use]
    pub fn trailing_slash(mut self, slash: impl Into<Slash>) -> Self {
        self.trailing_slash = slash.into();
        self
    }

    /// Sets whether a leading `//host` is treated as a protocol-relative authority.
    #[must_use]
    pub fn protocol_relative(mut self, value: bool) -> Self {
        self.protocol_relative = value;
        self
    }

    /// Inserts a query parameter, replacing any previous value under the key.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Takes the options out of the last argument, if it is an [`Arg::Options`].
    ///
    /// Returns the remaining arguments along with the options,
    /// which are the defaults if the last argument is anything else.
    pub fn split_from(mut args: Vec<Arg<'_>>) -> (Vec<Arg<'_>>, Options) {
        match args.pop() {
            Some(Arg::Options(options)) => (args, options),
            Some(arg) => {
                args.push(arg);
                (args, Options::default())
            }
            None => (args, Options::default()),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Slash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Slash::Always => serializer.serialize_bool(true),
            Slash::Never => serializer.serialize_bool(false),
            Slash::Keep => serializer.serialize_str("keep"),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Slash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SlashVisitor;

        impl de::Visitor<'_> for SlashVisitor {
            type Value = Slash;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("true, false, or \"keep\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Slash, E> {
                Ok(Slash::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Slash, E> {
                match v {
                    "keep" => Ok(Slash::Keep),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(SlashVisitor)
    }
}

#[cfg(feature = "serde")]
impl Serialize for QueryValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            QueryValue::Scalar(s) => serializer.serialize_str(s),
            QueryValue::List(v) => v.serialize(serializer),
        }
    }
}

#[cfg(feature = "serde")]
struct ScalarVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number, or a boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_query_scalar())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_query_scalar())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_query_scalar())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_query_scalar())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }
}

#[cfg(feature = "serde")]
struct Scalar(String);

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for QueryValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QueryValueVisitor;

        impl<'de> de::Visitor<'de> for QueryValueVisitor {
            type Value = QueryValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, a number, a boolean, or a sequence of them")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v.to_query_scalar()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v.to_query_scalar()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v.to_query_scalar()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v.to_query_scalar()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<QueryValue, E> {
                Ok(QueryValue::Scalar(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<QueryValue, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
                while let Some(Scalar(s)) = seq.next_element()? {
                    values.push(s);
                }
                Ok(QueryValue::List(values))
            }
        }

        deserializer.deserialize_any(QueryValueVisitor)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Options {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.query.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("leadingSlash", &self.leading_slash)?;
        map.serialize_entry("trailingSlash", &self.trailing_slash)?;
        map.serialize_entry("protocolRelative", &self.protocol_relative)?;
        if let Some(query) = &self.query {
            map.serialize_entry("query", query)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Options {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionsVisitor;

        impl<'de> de::Visitor<'de> for OptionsVisitor {
            type Value = Options;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of merge options")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Options, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut options = Options::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "leadingSlash" => options.leading_slash = map.next_value()?,
                        "trailingSlash" => options.trailing_slash = map.next_value()?,
                        "protocolRelative" => options.protocol_relative = map.next_value()?,
                        "query" => options.query = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}
