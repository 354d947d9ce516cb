use std::collections::HashMap;

use crate::config::SALES_COLUMN_NEEDLE;

/// Semantic columns the pipeline reads from a search term report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SearchTerm,
    Sku,
    Spend,
    Sales,
    Clicks,
    Impressions,
    Orders,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::SearchTerm => "search_term",
            Field::Sku => "sku",
            Field::Spend => "spend",
            Field::Sales => "sales",
            Field::Clicks => "clicks",
            Field::Impressions => "impressions",
            Field::Orders => "orders",
        }
    }
}

/// How a rule recognises its physical column among normalized headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl ColumnMatch {
    fn matches(self, header: &str) -> bool {
        match self {
            ColumnMatch::Exact(name) => header == name,
            ColumnMatch::Contains(needle) => header.contains(needle),
        }
    }

    /// Human-readable description, used when the column is reported missing.
    pub fn describe(self) -> &'static str {
        match self {
            ColumnMatch::Exact(name) | ColumnMatch::Contains(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub field: Field,
    pub matcher: ColumnMatch,
}

/// Ordered column-resolution table. Each rule picks the first header, in
/// the file's column order, that it matches.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    rules: Vec<ColumnRule>,
}

impl ColumnResolver {
    pub fn new(rules: Vec<ColumnRule>) -> Self {
        Self { rules }
    }

    /// Rules for an advertising search term report. Sales is the only column
    /// found by substring because its exact name varies between exports.
    pub fn search_term_report() -> Self {
        Self::new(vec![
            ColumnRule { field: Field::Sales, matcher: ColumnMatch::Contains(SALES_COLUMN_NEEDLE) },
            ColumnRule { field: Field::SearchTerm, matcher: ColumnMatch::Exact("customer search term") },
            ColumnRule { field: Field::Sku, matcher: ColumnMatch::Exact("advertised sku") },
            ColumnRule { field: Field::Spend, matcher: ColumnMatch::Exact("spend") },
            ColumnRule { field: Field::Clicks, matcher: ColumnMatch::Exact("clicks") },
            ColumnRule { field: Field::Impressions, matcher: ColumnMatch::Exact("impressions") },
            ColumnRule { field: Field::Orders, matcher: ColumnMatch::Exact("7 day total orders (#)") },
        ])
    }

    pub fn rule(&self, field: Field) -> Option<&ColumnRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// `headers` must already be normalized.
    pub fn resolve(&self, headers: &[String]) -> ResolvedColumns {
        let mut indices = HashMap::new();
        for rule in &self.rules {
            if indices.contains_key(&rule.field) {
                continue;
            }
            if let Some(idx) = headers.iter().position(|h| rule.matcher.matches(h)) {
                indices.insert(rule.field, idx);
            }
        }
        ResolvedColumns { indices }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    indices: HashMap<Field, usize>,
}

impl ResolvedColumns {
    pub fn index(&self, field: Field) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn has(&self, field: Field) -> bool {
        self.indices.contains_key(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sales_resolves_by_substring_first_match_wins() {
        let cols = headers(&[
            "customer search term",
            "7 day total sales (₹)",
            "14 day total sales (₹)",
        ]);
        let resolved = ColumnResolver::search_term_report().resolve(&cols);
        assert_eq!(resolved.index(Field::Sales), Some(1));
        assert_eq!(resolved.index(Field::SearchTerm), Some(0));
    }

    #[test]
    fn exact_rules_do_not_match_substrings() {
        let cols = headers(&["total spend", "clicks (all)", "impressions"]);
        let resolved = ColumnResolver::search_term_report().resolve(&cols);
        assert!(!resolved.has(Field::Spend));
        assert!(!resolved.has(Field::Clicks));
        assert_eq!(resolved.index(Field::Impressions), Some(2));
    }

    #[test]
    fn orders_and_sku_resolve() {
        let cols = headers(&["advertised sku", "7 day total orders (#)", "7 day total sales"]);
        let resolved = ColumnResolver::search_term_report().resolve(&cols);
        assert_eq!(resolved.index(Field::Sku), Some(0));
        assert_eq!(resolved.index(Field::Orders), Some(1));
        assert_eq!(resolved.index(Field::Sales), Some(2));
    }

    #[test]
    fn missing_sales_leaves_field_unresolved() {
        let cols = headers(&["spend", "clicks"]);
        let resolver = ColumnResolver::search_term_report();
        let resolved = resolver.resolve(&cols);
        assert!(!resolved.has(Field::Sales));
        assert_eq!(
            resolver.rule(Field::Sales).map(|r| r.matcher.describe()),
            Some("total sales")
        );
    }
}
