// Copyright (c) The payload-forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration surface (`spec.md` §4.6): which strategies are
//! enabled per category, and the traversal depth budget.

use crate::ast::Category;
use crate::blacklist::Blacklist;
use std::collections::HashMap;

/// Rewrite configuration: a whitelist of enabled strategies per category,
/// a blacklist of strategy names disabled regardless of the whitelist, a
/// depth budget, and the blacklist oracle itself.
///
/// Unknown category or strategy names anywhere in `white`/`black` are
/// silently ignored (`spec.md` §4.6) rather than rejected — only a
/// malformed `forbidden_regex` (see [`crate::blacklist::Blacklist::new`])
/// is a hard configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    white: HashMap<Category, Vec<String>>,
    black: Vec<String>,
    depth: u32,
    blacklist: Blacklist,
}

impl Config {
    pub fn new(
        white: HashMap<Category, Vec<String>>,
        black: Vec<String>,
        depth: u32,
        blacklist: Blacklist,
    ) -> Self {
        Self {
            white,
            black,
            depth,
            blacklist,
        }
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Strategy names enabled for `category`, in the order they were
    /// configured, with anything also present in `black` removed
    /// (`spec.md` §4.6: "a blacklist of strategy names... always wins").
    pub(crate) fn enabled_strategies(&self, category: Category) -> Vec<&str> {
        self.white
            .get(&category)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|name| !self.black.iter().any(|b| b.as_str() == *name))
            .collect()
    }
}

/// Plain-data mirror of [`Config`] for `serde` round-tripping. Category
/// names are the `Bypass_*` strings from `spec.md` §4.6; anything that
/// doesn't resolve via [`Category::from_config_name`] is dropped silently
/// when converting to [`Config`], matching the "unknown names ignored" rule
/// above.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConfigSpec {
    #[serde(default)]
    pub white: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub black: Vec<String>,
    pub depth: u32,
    pub blacklist: crate::blacklist::BlacklistSpec,
}

#[cfg(feature = "serde")]
impl TryFrom<ConfigSpec> for Config {
    type Error = crate::errors::ConfigError;

    fn try_from(spec: ConfigSpec) -> Result<Self, Self::Error> {
        let white = spec
            .white
            .into_iter()
            .filter_map(|(name, strategies)| Category::from_config_name(&name).map(|c| (c, strategies)))
            .collect();
        let blacklist = Blacklist::try_from(spec.blacklist)?;
        Ok(Config::new(white, spec.black, spec.depth, blacklist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_overrides_white() {
        let bl = Blacklist::new("x", vec![]).unwrap();
        let mut white = HashMap::new();
        white.insert(Category::Int, vec!["by_cal".to_string(), "by_hex".to_string()]);
        let config = Config::new(white, vec!["by_cal".to_string()], 3, bl);
        assert_eq!(config.enabled_strategies(Category::Int), vec!["by_hex"]);
    }

    #[test]
    fn unknown_category_has_no_enabled_strategies() {
        let bl = Blacklist::new("x", vec![]).unwrap();
        let config = Config::new(HashMap::new(), vec![], 3, bl);
        assert!(config.enabled_strategies(Category::String).is_empty());
    }
}
