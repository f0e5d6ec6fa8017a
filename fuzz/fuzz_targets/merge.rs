#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use url_merge::{merge, Options, Slash};

#[derive(Arbitrary, Debug)]
enum SlashInput {
    Always,
    Never,
    Keep,
}

impl From<SlashInput> for Slash {
    fn from(value: SlashInput) -> Self {
        match value {
            SlashInput::Always => Slash::Always,
            SlashInput::Never => Slash::Never,
            SlashInput::Keep => Slash::Keep,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    fragments: Vec<&'a str>,
    leading_slash: SlashInput,
    trailing_slash: SlashInput,
    protocol_relative: bool,
    query: Vec<(&'a str, Vec<&'a str>)>,
}

fuzz_target!(|input: Input<'_>| {
    let mut options = Options::new()
        .leading_slash(input.leading_slash)
        .trailing_slash(input.trailing_slash)
        .protocol_relative(input.protocol_relative);
    for (key, values) in input.query {
        options = options.query(key, values);
    }

    let once = merge(input.fragments.iter().copied(), &options);
    // Before a query a single slash is not detected, and a `?` inside a
    // segment may become a query marker once a slash follows it.
    if !once.contains('?') {
        assert_eq!(merge([once.as_str()], &options), once);
    }
});
