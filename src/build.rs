use crate::{parser::Parts, query::QueryMap, Options};
use alloc::string::String;

/// Assembles the output from the parsed parts, applying the slash
/// policies and merging the query.
pub(crate) fn build(parts: &Parts<'_>, options: &Options) -> String {
    let add_leading = options.leading_slash.resolve(parts.has_leading_slash);
    let add_trailing = options.trailing_slash.resolve(parts.has_trailing_slash);

    let mut buf = String::with_capacity(parts.prefix.len() + parts.query.as_str().len() + 16);
    buf.push_str(parts.prefix);

    if let [first, rest @ ..] = &parts.segments[..] {
        if !buf.is_empty() || add_leading {
            buf.push('/');
        }
        buf.push_str(first);
        for seg in rest {
            buf.push('/');
            buf.push_str(seg);
        }
    }

    if add_trailing {
        buf.push('/');
    }

    if buf.is_empty() && add_leading {
        buf.push('/');
    }

    let mut query = QueryMap::decode(parts.query);
    if let Some(params) = &options.query {
        query.merge(params);
    }
    if !query.is_empty() {
        buf.push('?');
        query.write_to(&mut buf);
    }

    buf
}
