//! Arguments accepted by [`merge_args`](crate::merge_args) and their normalization.

use crate::Options;
use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write};

/// A numeric fragment.
///
/// The textual form of a number matches ECMAScript's `Number.prototype.toString`,
/// so that `2.0` renders as `2` and `1e21` as `1e+21`.
///
/// # Examples
///
/// ```
/// use url_merge::Number;
///
/// assert_eq!(Number::from(42u8).to_string(), "42");
/// assert_eq!(Number::from(2.0).to_string(), "2");
/// assert_eq!(Number::from(-0.0).to_string(), "0");
/// assert_eq!(Number::from(1e21).to_string(), "1e+21");
/// assert_eq!(Number::from(f64::NAN).to_string(), "NaN");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(x) => fmt::Display::fmt(&x, f),
            Number::UInt(x) => fmt::Display::fmt(&x, f),
            Number::Float(x) => fmt_float(x, f),
        }
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        // Covers negative zero.
        return f.write_str("0");
    }

    let abs = x.abs();
    if !(1e-6..1e21).contains(&abs) {
        // `{:e}` yields the same shortest digits, but without the sign of a
        // non-negative exponent.
        let mut buf = String::new();
        write!(buf, "{:e}", x)?;
        return match buf.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
            _ => f.write_str(&buf),
        };
    }
    write!(f, "{}", x)
}

macro_rules! impl_from_number {
    ($variant:ident as $as:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(value: $ty) -> Self {
                    Number::$variant(value as $as)
                }
            }

            impl From<$ty> for Arg<'_> {
                #[inline]
                fn from(value: $ty) -> Self {
                    Arg::Number(Number::from(value))
                }
            }
        )+
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64, isize);
impl_from_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f64);

impl From<f32> for Number {
    /// Widens through the shortest decimal form, so that `0.1f32` stays `0.1`.
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse().unwrap_or(f64::from(value));
        Number::Float(widened)
    }
}

impl From<f32> for Arg<'_> {
    #[inline]
    fn from(value: f32) -> Self {
        Arg::Number(Number::from(value))
    }
}

/// A positional argument to [`merge_args`](crate::merge_args).
///
/// Only [`Str`](Self::Str) and [`Number`](Self::Number) arguments become URL
/// fragments. An [`Options`](Self::Options) argument in last position configures
/// the merge. Everything else is silently dropped.
///
/// Conversions exist from string types, numeric primitives, [`Options`],
/// `bool` (always dropped), `Option<T>` (`None` is dropped), and `Vec<Arg>`
/// (always dropped, even in last position).
#[derive(Clone, Debug, PartialEq)]
pub enum Arg<'a> {
    /// A string fragment.
    Str(Cow<'a, str>),
    /// A numeric fragment.
    Number(Number),
    /// A configuration object.
    Options(Options),
    /// A list of arguments.
    List(Vec<Arg<'a>>),
    /// Any other value, such as a boolean or a missing value.
    Other,
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Arg::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Arg::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Arg<'_> {
    #[inline]
    fn from(value: String) -> Self {
        Arg::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    #[inline]
    fn from(value: Cow<'a, str>) -> Self {
        Arg::Str(value)
    }
}

impl From<char> for Arg<'_> {
    #[inline]
    fn from(value: char) -> Self {
        Arg::Str(Cow::Owned(value.to_string()))
    }
}

impl From<Number> for Arg<'_> {
    #[inline]
    fn from(value: Number) -> Self {
        Arg::Number(value)
    }
}

impl From<Options> for Arg<'_> {
    #[inline]
    fn from(value: Options) -> Self {
        Arg::Options(value)
    }
}

impl From<&Options> for Arg<'_> {
    #[inline]
    fn from(value: &Options) -> Self {
        Arg::Options(value.clone())
    }
}

impl From<bool> for Arg<'_> {
    #[inline]
    fn from(_: bool) -> Self {
        Arg::Other
    }
}

impl From<()> for Arg<'_> {
    #[inline]
    fn from(_: ()) -> Self {
        Arg::Other
    }
}

impl<'a> From<Vec<Arg<'a>>> for Arg<'a> {
    #[inline]
    fn from(value: Vec<Arg<'a>>) -> Self {
        Arg::List(value)
    }
}

impl<'a, T: Into<Arg<'a>>> From<Option<T>> for Arg<'a> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Other, Into::into)
    }
}

impl Arg<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Number(_) => "number",
            Arg::Options(_) => "options",
            Arg::List(_) => "list",
            Arg::Other => "non-scalar",
        }
    }
}

/// Keeps the string and numeric arguments, stringified, dropping empty strings.
pub(crate) fn normalize<'a, I>(args: I) -> Vec<Cow<'a, str>>
where
    I: IntoIterator<Item = Arg<'a>>,
{
    args.into_iter()
        .enumerate()
        .filter_map(|(i, arg)| {
            let s = match arg {
                Arg::Str(s) => s,
                Arg::Number(x) => Cow::Owned(x.to_string()),
                ref other => {
                    log::trace!("dropping {} argument at position {}", other.kind(), i);
                    return None;
                }
            };
            if s.is_empty() {
                log::trace!("dropping empty string argument at position {}", i);
                return None;
            }
            Some(s)
        })
        .collect()
}
