//! Exported-name resolution: schema keys → declaration identifiers.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

/// Optional override table consulted before the casing transform.
/// Read-only after load.
#[derive(Clone, Debug, Default)]
pub struct NameMap {
    overrides: HashMap<String, String>,
}

impl NameMap {
    /// Line-oriented override format: `<raw> <replacement>`, whitespace
    /// separated. Extra tokens are ignored, short lines are skipped, the
    /// last duplicate wins.
    pub fn parse(src: &str) -> Self {
        let mut overrides = HashMap::new();
        for line in src.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(raw), Some(replacement)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            overrides.insert(raw.to_string(), replacement.to_string());
        }
        Self { overrides }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read name map {}", path.display()))?;
        Ok(Self::parse(&src))
    }

    /// `site_id` → `SiteID`, `bid_floor` → `BidFloor`. An override
    /// substitutes the raw key before the transform, so overridden keys get
    /// the same casing treatment as everything else.
    pub fn resolve(&self, raw: &str) -> String {
        let raw = self.overrides.get(raw).map(String::as_str).unwrap_or(raw);
        let name = snake_to_camel(raw);
        // Two-letter `Id` suffix reads as a word; the initialism form wins.
        match name.strip_suffix("Id") {
            Some(stem) => format!("{stem}ID"),
            None => name,
        }
    }
}

fn snake_to_camel(s: &str) -> String {
    s.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
