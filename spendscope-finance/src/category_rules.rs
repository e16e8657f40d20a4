//! Deterministic keyword rules mapping a description and amount to a Category.
//!
//! Groups are checked in table order and are not mutually exclusive, so the
//! order is the precedence ("Grocery Store Target" is Groceries, not Shopping).

use spendscope_core::Category;

/// Ordered keyword groups. Keywords are lower-case substrings.
pub const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (Category::Groceries, &["grocery", "market", "supermarket"]),
    (
        Category::FoodAndDining,
        &["restaurant", "cafe", "coffee", "food", "pizza", "burger"],
    ),
    (
        Category::Transportation,
        &["gas", "uber", "lyft", "train", "transit", "parking"],
    ),
    (
        Category::Shopping,
        &["amazon", "walmart", "target", "shop", "store"],
    ),
    (
        Category::Health,
        &["doctor", "pharmacy", "medical", "hospital", "health"],
    ),
    (Category::HealthAndFitness, &["gym", "fitness", "workout"]),
    (
        Category::Entertainment,
        &["netflix", "spotify", "cinema", "movie", "entertainment"],
    ),
    (
        Category::BillsAndUtilities,
        &["electric", "water", "gas bill", "internet", "phone", "utility"],
    ),
];

/// Where unmatched expenses land
pub const FALLBACK_CATEGORY: Category = Category::Shopping;

/// Categorize a transaction.
/// Positive amounts are always Income; everything else goes through the keyword table.
pub fn categorize(description: &str, amount: f64) -> Category {
    if amount > 0.0 {
        return Category::Income;
    }

    let desc = description.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}
