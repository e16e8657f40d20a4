//! Batch classification behind a swappable `Categorizer` capability.

use anyhow::Result;
use spendscope_core::{Category, RawTransaction, Transaction};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::category_rules;

/// Anything that can assign a category to a single statement row.
pub trait Categorizer {
    /// One-time setup before the first categorization (e.g. loading a model file).
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    fn categorize(&self, description: &str, amount: f64) -> Category;

    fn name(&self) -> &'static str;
}

/// The keyword rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCategorizer;

impl Categorizer for KeywordCategorizer {
    fn categorize(&self, description: &str, amount: f64) -> Category {
        category_rules::categorize(description, amount)
    }

    fn name(&self) -> &'static str {
        "keyword-rules"
    }
}

/// Preset answers by exact description, with a default for everything else.
#[derive(Debug, Clone)]
pub struct PresetCategorizer {
    presets: HashMap<String, Category>,
    default: Category,
    prepared: bool,
}

impl PresetCategorizer {
    pub fn new(default: Category) -> Self {
        Self {
            presets: HashMap::new(),
            default,
            prepared: false,
        }
    }

    pub fn with(mut self, description: impl Into<String>, category: Category) -> Self {
        self.presets.insert(description.into(), category);
        self
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

impl Categorizer for PresetCategorizer {
    fn prepare(&mut self) -> Result<()> {
        self.prepared = true;
        Ok(())
    }

    fn categorize(&self, description: &str, _amount: f64) -> Category {
        self.presets.get(description).copied().unwrap_or(self.default)
    }

    fn name(&self) -> &'static str {
        "preset"
    }
}

/// Owns a categorizer and makes sure it is prepared exactly once.
#[derive(Debug)]
pub struct Classifier<C> {
    categorizer: C,
    ready: bool,
}

impl Default for Classifier<KeywordCategorizer> {
    fn default() -> Self {
        Self::new(KeywordCategorizer)
    }
}

impl<C: Categorizer> Classifier<C> {
    pub fn new(categorizer: C) -> Self {
        Self {
            categorizer,
            ready: false,
        }
    }

    /// Run the categorizer's setup hook. Later calls are no-ops.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.ready {
            self.categorizer.prepare()?;
            self.ready = true;
            info!(categorizer = self.categorizer.name(), "classifier initialized");
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn categorizer(&self) -> &C {
        &self.categorizer
    }

    /// Categorize a batch, assigning 1-based ids in input order.
    pub fn categorize_all(&mut self, raw: &[RawTransaction]) -> Result<Vec<Transaction>> {
        self.initialize()?;

        let txns: Vec<Transaction> = raw
            .iter()
            .zip(1u32..)
            .map(|(r, id)| {
                let category = self.categorizer.categorize(&r.description, r.amount);
                debug!(id, description = %r.description, %category, "categorized");
                Transaction::from_raw(id, r, category)
            })
            .collect();

        Ok(txns)
    }
}
