//! Translation pass metrics.
//!
//! Each applicator pass counts what it wrote and what it skipped, and hands
//! back a `PassReport` for logging or inspection.

use crate::dom::BindingKind;
use crate::i18n::{Language, Lookup};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters collected during one applicator pass.
#[derive(Debug, Default)]
pub struct PassMetrics {
    /// Bound nodes whose surface was written
    written: usize,

    /// Nodes written using fallback-language text
    fallbacks: usize,

    /// Nodes skipped because their key is not in the table
    missing_keys: usize,

    /// Nodes skipped because no language had text for their key
    untranslated: usize,

    /// Nodes skipped because the marker held no key
    unkeyed: usize,

    /// Writes per binding kind
    per_kind: BTreeMap<&'static str, usize>,

    title_updated: bool,
    description_updated: bool,
    toggle_label_updated: bool,
}

impl PassMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the lookup outcome for a node bound with `kind`.
    pub fn record_lookup(&mut self, kind: BindingKind, lookup: &Lookup<'_>) {
        match lookup {
            Lookup::Exact(_) => self.record_write(kind),
            Lookup::Fallback(_) => {
                self.fallbacks += 1;
                self.record_write(kind);
            }
            Lookup::MissingKey => self.missing_keys += 1,
            Lookup::Untranslated => self.untranslated += 1,
        }
    }

    /// Record a bound node whose marker carried no key.
    pub fn record_unkeyed(&mut self) {
        self.unkeyed += 1;
    }

    fn record_write(&mut self, kind: BindingKind) {
        self.written += 1;
        *self.per_kind.entry(kind.name()).or_insert(0) += 1;
        match kind {
            BindingKind::TitleMeta => self.title_updated = true,
            BindingKind::DescriptionMeta => self.description_updated = true,
            _ => {}
        }
    }

    /// Record that the toggle control's label was rewritten.
    pub fn record_toggle_label(&mut self) {
        self.toggle_label_updated = true;
    }

    /// Generate the report for a finished pass.
    pub fn report(&self, language: Language) -> PassReport {
        let skipped = self.missing_keys + self.untranslated + self.unkeyed;
        let total = self.written + skipped;
        let coverage_rate = if total > 0 {
            (self.written as f64 / total as f64) * 100.0
        } else {
            100.0
        };

        PassReport {
            language,
            written: self.written,
            fallbacks: self.fallbacks,
            missing_keys: self.missing_keys,
            untranslated: self.untranslated,
            unkeyed: self.unkeyed,
            per_kind: self.per_kind.clone(),
            title_updated: self.title_updated,
            description_updated: self.description_updated,
            toggle_label_updated: self.toggle_label_updated,
            coverage_rate,
        }
    }
}

/// Summary of one applicator pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    pub language: Language,
    pub written: usize,
    pub fallbacks: usize,
    pub missing_keys: usize,
    pub untranslated: usize,
    pub unkeyed: usize,
    pub per_kind: BTreeMap<&'static str, usize>,
    pub title_updated: bool,
    pub description_updated: bool,
    pub toggle_label_updated: bool,
    /// Percentage of bound nodes that received text
    pub coverage_rate: f64,
}

impl PassReport {
    /// Nodes left unchanged because nothing could be resolved for them.
    pub fn skipped(&self) -> usize {
        self.missing_keys + self.untranslated + self.unkeyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pass_has_full_coverage() {
        let report = PassMetrics::new().report(Language::HEBREW);
        assert_eq!(report.written, 0);
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.coverage_rate, 100.0);
    }

    #[test]
    fn test_counts_by_outcome() {
        let mut metrics = PassMetrics::new();
        metrics.record_lookup(BindingKind::Content, &Lookup::Exact("a"));
        metrics.record_lookup(BindingKind::Content, &Lookup::Fallback("b"));
        metrics.record_lookup(BindingKind::Placeholder, &Lookup::MissingKey);
        metrics.record_lookup(BindingKind::Markup, &Lookup::Untranslated);

        let report = metrics.report(Language::ENGLISH);
        assert_eq!(report.written, 2);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.missing_keys, 1);
        assert_eq!(report.untranslated, 1);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.per_kind.get("content"), Some(&2));
        assert_eq!(report.per_kind.get("placeholder"), None);
        assert_eq!(report.coverage_rate, 50.0);
    }

    #[test]
    fn test_meta_kinds_flag_updates() {
        let mut metrics = PassMetrics::new();
        metrics.record_lookup(BindingKind::TitleMeta, &Lookup::Exact("Title"));
        metrics.record_toggle_label();

        let report = metrics.report(Language::HEBREW);
        assert!(report.title_updated);
        assert!(!report.description_updated);
        assert!(report.toggle_label_updated);
    }

    #[test]
    fn test_report_serializes() {
        let mut metrics = PassMetrics::new();
        metrics.record_unkeyed();
        let json = serde_json::to_value(metrics.report(Language::HEBREW)).unwrap();
        assert_eq!(json["language"], "he");
        assert_eq!(json["unkeyed"], 1);
    }
}
