//! Tokenizing of `key=value` entry bodies.
//!
//! RouterOS quotes values containing spaces, but hand-edited or older exports
//! sometimes leave them bare. The combiner tolerates both: a key with an empty
//! value absorbs the bare tokens that follow it until the next key token.

use crate::record::Record;

const QUOTE: char = '"';

/// Split on whitespace, keeping whitespace inside double-quoted spans.
///
/// Quote characters stay in the token; [`trim_quotes`] removes them later.
pub fn split_fields(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;

    for c in input.chars() {
        if c == QUOTE {
            quoted = !quoted;
            cur.push(c);
        } else if c.is_whitespace() && !quoted {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        } else {
            cur.push(c);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Whether `token` starts a new field.
///
/// A key token does not start with a quote and has an `=` at index 1 or later
/// with only ASCII alphanumerics and `-` before it.
pub fn is_key_token(token: &str) -> bool {
    if token.starts_with(QUOTE) {
        return false;
    }
    match token.find('=') {
        Some(eq) if eq > 0 => token[..eq]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-'),
        _ => false,
    }
}

enum State {
    SeekingKey,
    AbsorbingValue { key: String, value: String },
}

/// Combine tokens into raw `(key, value)` pairs in input order.
///
/// Values are returned as written (quotes intact). Bare tokens seen before
/// any key are dropped. A key token directly followed by another key token
/// keeps its empty value.
pub fn combine_fields<S: AsRef<str>>(tokens: &[S]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut state = State::SeekingKey;

    for token in tokens {
        let token = token.as_ref();
        let key_token = is_key_token(token);

        state = match state {
            State::AbsorbingValue { key, mut value } if !key_token => {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(token.trim());
                State::AbsorbingValue { key, value }
            }
            State::AbsorbingValue { key, value } => {
                pairs.push((key, value));
                start_field(token, &mut pairs)
            }
            State::SeekingKey if key_token => start_field(token, &mut pairs),
            State::SeekingKey => State::SeekingKey,
        };
    }

    if let State::AbsorbingValue { key, value } = state {
        pairs.push((key, value));
    }
    pairs
}

fn start_field(token: &str, pairs: &mut Vec<(String, String)>) -> State {
    let (key, value) = token.split_once('=').unwrap_or((token, ""));
    if value.is_empty() {
        State::AbsorbingValue {
            key: key.to_string(),
            value: String::new(),
        }
    } else {
        pairs.push((key.to_string(), value.to_string()));
        State::SeekingKey
    }
}

/// Trim whitespace and strip one layer of surrounding double quotes.
pub fn trim_quotes(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 {
        if let Some(inner) = value
            .strip_prefix(QUOTE)
            .and_then(|rest| rest.strip_suffix(QUOTE))
        {
            return inner;
        }
    }
    value
}

/// Parse an entry body (the text after the entry keyword) into a [`Record`].
///
/// Keys are lower-cased; values are unquoted and trimmed; the last
/// occurrence of a key wins.
pub fn parse_record(body: &str) -> Record {
    let tokens = split_fields(body.trim());
    combine_fields(&tokens)
        .into_iter()
        .map(|(key, value)| (key, trim_quotes(&value).trim().to_string()))
        .collect()
}
