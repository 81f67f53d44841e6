// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The blacklist oracle (`spec.md` §4.1): the single predicate every
//! strategy candidate is checked against.

use crate::errors::ConfigError;
use regex::Regex;

/// The active forbidden-pattern configuration.
///
/// `forbidden_regex` alone decides acceptance. `allowed_tokens` is purely
/// informational metadata — recorded for telemetry, never consulted by
/// [`Blacklist::accept`] (`spec.md` §3, §9 "open question — empty
/// test-inputs list behavior": a `by_builtins`-style strategy that ignores
/// `allowed_tokens` entirely is well-defined and exactly what this type
/// does).
#[derive(Debug, Clone)]
pub struct Blacklist {
    forbidden_regex_source: String,
    /// Informational only; see the type-level doc comment.
    pub allowed_tokens: Vec<String>,
    compiled: Regex,
}

impl Blacklist {
    /// Compile a new oracle from a forbidden-pattern source and a
    /// (purely informational) allowed-token list.
    ///
    /// Unicode matching is mandatory: the whole point of the confusable
    /// strategies (`by_unicode` on `Int`, `String`, `Name`) is that a
    /// blacklist written against ASCII does not match the confusable
    /// codepoints they introduce, so the regex engine must not silently
    /// case/width-fold them (`regex`'s default behavior already does not).
    pub fn new(
        forbidden_regex: impl Into<String>,
        allowed_tokens: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let forbidden_regex_source = forbidden_regex.into();
        let compiled =
            Regex::new(&forbidden_regex_source).map_err(|source| ConfigError::InvalidRegex {
                source,
                pattern: forbidden_regex_source.clone(),
                span: None,
            })?;
        Ok(Self {
            forbidden_regex_source,
            allowed_tokens,
            compiled,
        })
    }

    /// The pattern this oracle was built from.
    pub fn pattern(&self) -> &str {
        &self.forbidden_regex_source
    }

    /// `true` iff `fragment` contains no match of the forbidden regex.
    /// Case-sensitive, no unicode-confusable normalization (`spec.md`
    /// §4.1: "this is critical").
    pub fn accept(&self, fragment: &str) -> bool {
        !self.compiled.is_match(fragment)
    }

    /// The characters a `by_cal`-style synthesizer (`spec.md` §4.7) may
    /// freely use: every ASCII printable character that, in isolation,
    /// does not itself match the forbidden regex.
    pub fn allowed_alphabet(&self) -> Vec<char> {
        (0x20u8..0x7f)
            .map(char::from)
            .filter(|c| self.accept(&c.to_string()))
            .collect()
    }

    /// Non-overlapping matches of the forbidden pattern in `text`, as
    /// `(char_start, char_end)` pairs — used by the Name/Keyword
    /// `by_unicode` substitution algorithm (`spec.md` §4.3), which needs to
    /// know exactly which character positions are implicated.
    pub(crate) fn pattern_matches_in(&self, text: &str) -> Vec<(usize, usize)> {
        let mut byte_to_char = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            byte_to_char[byte_idx] = char_idx;
            char_idx += 1;
        }
        byte_to_char[text.len()] = char_idx;
        self.compiled
            .find_iter(text)
            .map(|m| (byte_to_char[m.start()], byte_to_char[m.end()]))
            .collect()
    }
}

/// Plain-data mirror of [`Blacklist`] used only for `serde` round-tripping
/// (a config-file loader, out of scope for this crate, might deserialize
/// one of these out of JSON/TOML and hand it to [`Blacklist::new`]).
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlacklistSpec {
    pub forbidden_regex: String,
    #[serde(default)]
    pub allowed_tokens: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<BlacklistSpec> for Blacklist {
    type Error = ConfigError;

    fn try_from(spec: BlacklistSpec) -> Result<Self, Self::Error> {
        Blacklist::new(spec.forbidden_regex, spec.allowed_tokens)
    }
}

#[cfg(feature = "serde")]
impl From<&Blacklist> for BlacklistSpec {
    fn from(bl: &Blacklist) -> Self {
        BlacklistSpec {
            forbidden_regex: bl.forbidden_regex_source.clone(),
            allowed_tokens: bl.allowed_tokens.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_when_regex_does_not_match() {
        let bl = Blacklist::new("[0-8]", vec![]).unwrap();
        assert!(bl.accept("9**(9-9)"));
        assert!(!bl.accept("9**0")); // '0' itself is forbidden by `[0-8]`.
        assert!(!bl.accept("1"));
    }

    #[test]
    fn invalid_regex_is_rejected_up_front() {
        assert!(Blacklist::new("(unclosed", vec![]).is_err());
    }

    #[test]
    fn allowed_alphabet_excludes_forbidden_chars() {
        let bl = Blacklist::new("[0-8]", vec![]).unwrap();
        assert!(bl.allowed_alphabet().contains(&'9'));
        assert!(!bl.allowed_alphabet().contains(&'5'));
    }
}
