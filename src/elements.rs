//! Element table: rank -> display label and color
//!
//! Loaded once per process and never mutated afterwards.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Built-in table, one row per element in rank order
const BUILTIN_CSV: &str = include_str!("../assets/elements.csv");

/// A single element row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub label: String,
    pub color: String,
}

/// Ordered element table; rank `n` is row `n - 1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTable {
    elements: Vec<Element>,
}

impl ElementTable {
    /// Parse CSV-like rows. `#` lines and blank lines are skipped; the second
    /// field is the label and the fourth is the color.
    pub fn parse(text: &str) -> GameResult<Self> {
        let mut elements = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            if fields.len() < 4 {
                return Err(GameError::TableParse {
                    line: idx + 1,
                    reason: format!("expected 4 fields, found {}", fields.len()),
                });
            }
            if fields[1].is_empty() {
                return Err(GameError::TableParse {
                    line: idx + 1,
                    reason: "empty label".to_string(),
                });
            }
            elements.push(Element {
                label: fields[1].to_string(),
                color: fields[3].to_string(),
            });
        }
        if elements.is_empty() {
            return Err(GameError::TableParse {
                line: 0,
                reason: "table has no rows".to_string(),
            });
        }
        Ok(Self { elements })
    }

    /// Process-wide built-in table
    pub fn builtin() -> Arc<ElementTable> {
        static TABLE: OnceLock<Arc<ElementTable>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                let table = ElementTable::parse(BUILTIN_CSV)
                    .expect("built-in element table is well-formed");
                log::debug!("Loaded {} elements", table.len());
                Arc::new(table)
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Highest valid rank
    pub fn max_rank(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Check that `rank` is in `1..=len`
    pub fn validate(&self, rank: u32) -> GameResult<u32> {
        if rank == 0 || rank as usize > self.elements.len() {
            return Err(GameError::InvalidRank {
                rank,
                table_len: self.elements.len(),
            });
        }
        Ok(rank)
    }

    pub fn get(&self, rank: u32) -> Option<&Element> {
        rank.checked_sub(1)
            .and_then(|i| self.elements.get(i as usize))
    }

    pub fn label(&self, rank: u32) -> Option<&str> {
        self.get(rank).map(|e| e.label.as_str())
    }

    pub fn color(&self, rank: u32) -> Option<&str> {
        self.get(rank).map(|e| e.color.as_str())
    }
}
