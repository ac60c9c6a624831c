use std::{fmt, str::FromStr};
use thiserror::Error;

/// Budget band a couple picks for their date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    #[default]
    Inexpensive,
    Moderate,
    Pricey,
    UltraHigh,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unrecognized budget symbol '{0}'")]
pub struct UnknownBudget(pub String);

impl FromStr for Budget {
    type Err = UnknownBudget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(Budget::Inexpensive),
            "$$" => Ok(Budget::Moderate),
            "$$$" => Ok(Budget::Pricey),
            "$$$$" => Ok(Budget::UltraHigh),
            other => Err(UnknownBudget(other.to_string())),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Budget {
    pub fn symbol(&self) -> &'static str {
        match self {
            Budget::Inexpensive => "$",
            Budget::Moderate => "$$",
            Budget::Pricey => "$$$",
            Budget::UltraHigh => "$$$$",
        }
    }

    /// Highest acceptable price tier
    pub fn max_tier(&self) -> u8 {
        self.symbol().len() as u8
    }

    /// Budgets are cumulative: `$$` accepts both `$` and `$$` places
    pub fn price_tiers(&self) -> PriceTiers {
        PriceTiers((1..=self.max_tier()).collect())
    }
}

/// Ordered, non-empty set of price tiers. Always `1..=n` for some n in 1..=4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTiers(Vec<u8>);

impl PriceTiers {
    /// Provider query form, e.g. `"1,2"`
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|tier| tier.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Outcome of resolving a caller's budget symbol
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBudget {
    pub budget: Budget,
    pub tiers: PriceTiers,
    /// Set when the symbol was not recognized and `$` was used instead
    pub unrecognized: Option<UnknownBudget>,
}

pub struct BudgetResolver;

impl BudgetResolver {
    /// Map a budget symbol to its acceptable price tiers. Never fails: an
    /// unrecognized symbol resolves to `$` and is reported in `unrecognized`.
    pub fn resolve(symbol: &str) -> ResolvedBudget {
        let (budget, unrecognized) = match symbol.parse::<Budget>() {
            Ok(budget) => (budget, None),
            Err(err) => (Budget::default(), Some(err)),
        };

        ResolvedBudget {
            budget,
            tiers: budget.price_tiers(),
            unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tiers_are_cumulative() {
        assert_eq!(BudgetResolver::resolve("$").tiers.joined(), "1");
        assert_eq!(BudgetResolver::resolve("$$").tiers.joined(), "1,2");
        assert_eq!(BudgetResolver::resolve("$$$").tiers.joined(), "1,2,3");
        assert_eq!(BudgetResolver::resolve("$$$$").tiers.joined(), "1,2,3,4");
    }

    #[test]
    fn test_known_budget_is_not_flagged() {
        let resolved = BudgetResolver::resolve("$$");
        assert_eq!(resolved.budget, Budget::Moderate);
        assert_eq!(resolved.unrecognized, None);
    }

    #[test]
    fn test_unknown_budget_defaults_to_cheapest_and_is_flagged() {
        let resolved = BudgetResolver::resolve("€€");
        assert_eq!(resolved.budget, Budget::Inexpensive);
        assert_eq!(resolved.tiers.joined(), "1");
        assert_eq!(
            resolved.unrecognized,
            Some(UnknownBudget("€€".to_string()))
        );

        for symbol in ["", "$$$$$", "cheap"] {
            let resolved = BudgetResolver::resolve(symbol);
            assert_eq!(resolved.tiers.joined(), "1");
            assert!(resolved.unrecognized.is_some());
        }
    }

    #[test]
    fn test_budget_ignores_whitespace() {
        let resolved = BudgetResolver::resolve(" $$ ");
        assert_eq!(resolved.budget, Budget::Moderate);
        assert_eq!(resolved.unrecognized, None);
    }

    #[test]
    fn test_budget_display_uses_symbol() {
        assert_eq!(Budget::UltraHigh.to_string(), "$$$$");
        assert_eq!(Budget::Pricey.max_tier(), 3);
    }
}
