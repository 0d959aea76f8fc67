use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupRule {
    pub pattern: String,
    pub replacement: String,
}

impl CleanupRule {
    fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<(Regex, String)>,
}

impl RuleSet {
    pub fn compile(rules: &[CleanupRule]) -> Result<Self> {
        let compiled = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                Regex::new(&rule.pattern)
                    .with_context(|| {
                        format!("failed to compile cleanup rule {}: {}", index + 1, rule.pattern)
                    })
                    .map(|regex| (regex, rule.replacement.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules: compiled })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let rules: Vec<CleanupRule> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Self::compile(&rules)
    }

    pub fn builtin() -> Result<Self> {
        Self::compile(&[
            CleanupRule::new(r"\[[a-z]{1,2}\]", ""),
            CleanupRule::new(r"\([A-Z]{1,2}\)", ""),
            CleanupRule::new(r"(?i)read full chapter", ""),
            CleanupRule::new(r"(?im)^.*copyright\s*©.*$", ""),
        ])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for (pattern, replacement) in &self.rules {
            current = pattern
                .replace_all(&current, replacement.as_str())
                .into_owned();
        }
        current
    }
}
