//! spendscope-finance: category rules, classifier, insights, spending breakdown and LLM analysis

pub mod analysis;
pub mod category_rules;
pub mod classifier;
pub mod filter;
pub mod insights;
pub mod report;
pub mod spending;

pub use analysis::{Analysis, AnalysisClient, AnalysisConfig, AnalysisError, AnalysisResult};
pub use category_rules::categorize;
pub use classifier::{Categorizer, Classifier, KeywordCategorizer, PresetCategorizer};
pub use filter::{TransactionFilter, View, categories_present};
pub use insights::{InsightSummary, derive_insights, derive_insights_with};
pub use report::StatementReport;
pub use spending::{CategorySlice, SpendingBreakdown};
