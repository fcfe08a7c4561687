use anyhow::{bail, Context, Result};
use std::ops::Range;

/// Lengths of the consecutive factors (subscales) spanning the item columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorLengths(Vec<usize>);

impl FactorLengths {
    pub fn new(lengths: Vec<usize>) -> Self {
        Self(lengths)
    }

    /// Parse a comma separated list such as "5,5" or "4, 6, 3".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Factor list is empty");
        }

        let mut lengths = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let len: usize = part
                .parse()
                .with_context(|| format!("Invalid factor length '{}'", part))?;
            if len == 0 {
                bail!("Factor length must be at least 1: {}", s);
            }
            lengths.push(len);
        }
        Ok(Self(lengths))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of item columns covered.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Column range of each factor, left to right.
    pub fn blocks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.0.iter().scan(0usize, |offset, &len| {
            let start = *offset;
            *offset += len;
            Some(start..*offset)
        })
    }

    /// Zero-based indices of factors with a single item. These can never
    /// form an even/odd pair.
    pub fn degenerate_factors(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &len)| len == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<usize>> for FactorLengths {
    fn from(lengths: Vec<usize>) -> Self {
        Self(lengths)
    }
}
