//! Pluggable expense-category classification.
//!
//! The default classifier buckets by case-insensitive keyword substrings,
//! carrying both the Portuguese terms of the original ledgers and their
//! English equivalents. Swapping the keyword table for a rules engine only
//! requires another [`CategoryClassifier`] implementation; the reporter
//! never sees the keywords.

/// Expense bucket in the DRE rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseBucket {
    /// Cost of goods/services sold.
    DirectCost,
    /// Selling expenses (commissions, advertising).
    Selling,
    /// Administrative expenses (payroll, rent, utilities).
    Administrative,
    /// Everything that matches no other bucket.
    Other,
}

/// Capability for bucketing an expense category by its name.
pub trait CategoryClassifier {
    /// Buckets a category name. Rules are evaluated in the fixed order
    /// cost -> selling -> admin -> other; the first match wins.
    fn classify(&self, category_name: &str) -> ExpenseBucket;
}

const COST_KEYWORDS: &[&str] = &[
    "custo",
    "compra",
    "fornecedor",
    "mercadoria",
    "cmv",
    "cogs",
    "cost",
    "purchase",
    "supplier",
    "merchandise",
];

const SELLING_KEYWORDS: &[&str] = &[
    "venda",
    "comiss",
    "publicidade",
    "marketing",
    "sale",
    "commission",
    "advertising",
];

const ADMIN_KEYWORDS: &[&str] = &[
    "admin",
    "salario",
    "folha",
    "aluguel",
    "telefone",
    "internet",
    "energia",
    "agua",
    "salary",
    "payroll",
    "rent",
    "phone",
    "utilities",
];

/// Default keyword-substring classifier.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Creates the default classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CategoryClassifier for KeywordClassifier {
    fn classify(&self, category_name: &str) -> ExpenseBucket {
        let lowered = category_name.to_lowercase();

        if COST_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
            return ExpenseBucket::DirectCost;
        }
        if SELLING_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            return ExpenseBucket::Selling;
        }
        if ADMIN_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            return ExpenseBucket::Administrative;
        }
        ExpenseBucket::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Custo de Mercadoria", ExpenseBucket::DirectCost)]
    #[case("Raw Material Cost", ExpenseBucket::DirectCost)]
    #[case("Fornecedores", ExpenseBucket::DirectCost)]
    #[case("Comissao de Vendas", ExpenseBucket::Selling)]
    #[case("Marketing Digital", ExpenseBucket::Selling)]
    #[case("Folha de Pagamento", ExpenseBucket::Administrative)]
    #[case("Aluguel do Escritorio", ExpenseBucket::Administrative)]
    #[case("Office Rent", ExpenseBucket::Administrative)]
    #[case("Despesas Diversas", ExpenseBucket::Other)]
    fn test_keyword_buckets(#[case] name: &str, #[case] expected: ExpenseBucket) {
        assert_eq!(KeywordClassifier::new().classify(name), expected);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "Custo de Venda" matches both cost and selling keywords; the cost
        // rule is evaluated first.
        assert_eq!(
            KeywordClassifier::new().classify("Custo de Venda"),
            ExpenseBucket::DirectCost
        );
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            KeywordClassifier::new().classify("ALUGUEL"),
            ExpenseBucket::Administrative
        );
    }
}
