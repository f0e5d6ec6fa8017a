//! Percent-encoding utilities.
//!
//! Encoding follows ECMAScript's `encodeURIComponent` when used with
//! [`table::COMPONENT`]. Decoding is lenient: it never fails, keeps
//! malformed octets as they are, and replaces invalid UTF-8 with
//! [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
//!
//! [U+FFFD]: char::REPLACEMENT_CHARACTER

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{iter::FusedIterator, str};

/// Percent-encodes a string with the given table.
///
/// A character is preserved if `table` [allows] it; every UTF-8 byte of it
/// is percent-encoded with uppercase hexadecimal digits otherwise.
///
/// Note that this function will **not** encode `U+0020` (space) as `U+002B` (+).
///
/// [allows]: Table::allows
///
/// # Examples
///
/// ```
/// use url_merge::pct_enc::{encode, table::COMPONENT};
///
/// assert_eq!(encode("a b&c", COMPONENT), "a%20b%26c");
/// assert_eq!(encode("¡Olé!", COMPONENT), "%C2%A1Ol%C3%A9!");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table) -> Cow<'_, str> {
    if s.bytes().all(|x| table.allows_ascii(x)) {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len() * 3);
    encode_to(s, table, &mut buf);
    Cow::Owned(buf)
}

/// Percent-encodes a string with the given table and appends the result onto a buffer.
pub fn encode_to(s: &str, table: Table, buf: &mut String) {
    for chunk in Encode::new(table, s) {
        buf.push_str(chunk.as_str());
    }
}

/// Decodes a percent-encoded string.
///
/// A `%` that is not followed by two hexadecimal digits is kept as it is.
/// Invalid UTF-8 sequences in the decoded bytes are replaced with
/// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
///
/// This function allocates only when the string contains any percent-encoded octet.
///
/// Note that `U+002B` (+) is **not** decoded as `0x20` (space).
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
///
/// # Examples
///
/// ```
/// use url_merge::pct_enc::decode;
///
/// assert_eq!(decode("%E5%BC%A0%E4%B8%89"), "张三");
/// assert_eq!(decode("100%"), "100%");
/// assert_eq!(decode("a+b%zz"), "a+b%zz");
/// ```
#[must_use]
pub fn decode(s: &str) -> Cow<'_, str> {
    let mut iter = Decode::new(s);
    let first = match iter.next() {
        None => return Cow::Borrowed(""),
        Some(DecodedChunk::Unencoded(x)) if x.len() == s.len() => return Cow::Borrowed(s),
        Some(chunk) => chunk,
    };

    let mut buf = Vec::with_capacity(s.len());
    for chunk in core::iter::once(first).chain(iter) {
        match chunk {
            DecodedChunk::Unencoded(x) => buf.extend_from_slice(x.as_bytes()),
            DecodedChunk::PctDecoded(x) => buf.push(x),
        }
    }

    match String::from_utf8(buf) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, returning `None` if either byte
/// is not a hexadecimal digit.
fn decode_octet(hi: u8, lo: u8) -> Option<u8> {
    if table::HEXDIG.allows_ascii(hi) && table::HEXDIG.allows_ascii(lo) {
        Some(OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize])
    } else {
        None
    }
}

/// An iterator used to decode a percent-encoded string slice.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct Decode<'a> {
    source: &'a str,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecodedChunk<'a> {
    /// An unencoded subslice, possibly containing malformed octets.
    Unencoded(&'a str),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn octet_at(&self, i: usize) -> Option<u8> {
        match self.source.as_bytes()[i..] {
            [b'%', hi, lo, ..] => decode_octet(hi, lo),
            _ => None,
        }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }

        if let Some(x) = self.octet_at(0) {
            self.source = &self.source[3..];
            return Some(DecodedChunk::PctDecoded(x));
        }

        // Skip over malformed octets so that they stay in the unencoded chunk.
        let mut i = 1;
        while i < self.source.len() {
            if self.source.as_bytes()[i] == b'%' && self.octet_at(i).is_some() {
                break;
            }
            i += 1;
        }

        let s;
        (s, self.source) = self.source.split_at(i);
        Some(DecodedChunk::Unencoded(s))
    }
}

impl FusedIterator for Decode<'_> {}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// An iterator used to percent-encode a string slice.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct Encode<'s> {
    table: Table,
    source: &'s str,
    to_enc: &'s [u8],
}

impl<'s> Encode<'s> {
    pub(crate) fn new(table: Table, source: &'s str) -> Self {
        Self {
            table,
            source,
            to_enc: &[],
        }
    }
}

/// An item returned by the [`Encode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EncodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A byte, percent-encoded (for example, `0x20` encoded as `"%20"`).
    PctEncoded(&'static str),
}

impl<'a> EncodedChunk<'a> {
    /// Returns the chunk as a string slice.
    pub(crate) fn as_str(self) -> &'a str {
        match self {
            Self::Unencoded(s) | Self::PctEncoded(s) => s,
        }
    }
}

impl<'a> Iterator for Encode<'a> {
    type Item = EncodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let [x, rem @ ..] = self.to_enc {
            self.to_enc = rem;
            return Some(EncodedChunk::PctEncoded(encode_byte(*x)));
        }

        if self.source.is_empty() {
            return None;
        }

        let mut iter = self.source.char_indices();

        let first_unallowed_i = iter
            .find_map(|(i, ch)| (!self.table.allows(ch)).then_some(i))
            .unwrap_or(self.source.len());

        let next_allowed_i = iter
            .find_map(|(i, ch)| self.table.allows(ch).then_some(i))
            .unwrap_or(self.source.len());

        if first_unallowed_i == 0 {
            let (unallowed, rem) = self.source.split_at(next_allowed_i);
            self.source = rem;

            // The unallowed run is non-empty, so it has a first byte.
            let (x, rem) = match unallowed.as_bytes() {
                [x, rem @ ..] => (x, rem),
                [] => return None,
            };
            self.to_enc = rem;

            Some(EncodedChunk::PctEncoded(encode_byte(*x)))
        } else {
            let allowed = &self.source[..first_unallowed_i];
            self.to_enc = &self.source.as_bytes()[first_unallowed_i..next_allowed_i];
            self.source = &self.source[next_allowed_i..];

            Some(EncodedChunk::Unencoded(allowed))
        }
    }
}

impl FusedIterator for Encode<'_> {}
