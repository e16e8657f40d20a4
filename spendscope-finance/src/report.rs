//! Statement report: categorized transactions plus everything derived from them.

use anyhow::Result;
use serde::Serialize;
use spendscope_core::{CurrencyDisplay, RawTransaction, Transaction};

use crate::analysis::AnalysisResult;
use crate::classifier::{Categorizer, Classifier};
use crate::insights::{InsightSummary, derive_insights_with};
use crate::spending::SpendingBreakdown;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementReport {
    pub transactions: Vec<Transaction>,
    pub breakdown: SpendingBreakdown,
    pub summary: InsightSummary,
    /// Model-generated analysis, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

impl StatementReport {
    /// Categorize raw rows and derive the breakdown and insights.
    pub fn build<C: Categorizer>(
        raw: &[RawTransaction],
        classifier: &mut Classifier<C>,
        money: &CurrencyDisplay,
    ) -> Result<Self> {
        let transactions = classifier.categorize_all(raw)?;
        Ok(Self::from_transactions(transactions, money))
    }

    pub fn from_transactions(transactions: Vec<Transaction>, money: &CurrencyDisplay) -> Self {
        let breakdown = SpendingBreakdown::from_transactions(&transactions);
        let summary = derive_insights_with(&transactions, money);
        Self {
            transactions,
            breakdown,
            summary,
            analysis: None,
        }
    }

    pub fn with_analysis(mut self, analysis: AnalysisResult) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Model insights replace the templated ones when present and non-empty.
    pub fn insights(&self) -> &[String] {
        match &self.analysis {
            Some(a) if !a.insights.is_empty() => &a.insights,
            _ => &self.summary.insights,
        }
    }
}
