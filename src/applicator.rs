//! Translation pass: make every bound node in a document reflect a language.
//!
//! A pass is idempotent and never fails. Bindings whose key, translation or
//! target is missing are skipped individually; the rest of the pass continues.

use crate::dom::{BindingKind, DomPort, READY_CLASS, TOGGLE_CONTROL_ID, TOGGLE_LABEL_TAG};
use crate::i18n::{Language, PassMetrics, PassReport, TranslationTable};
use tracing::{debug, info};

/// Applies a translation table to documents.
#[derive(Debug, Clone, Copy)]
pub struct Applicator<'t> {
    table: &'t TranslationTable,
}

impl<'t> Applicator<'t> {
    pub fn new(table: &'t TranslationTable) -> Self {
        Self { table }
    }

    /// Run one full pass over `dom` for `language`.
    ///
    /// Order: root `lang`/`dir`, every binding kind, the toggle label, and
    /// finally the ready class, so content is never revealed untranslated.
    pub fn apply<D: DomPort>(&self, dom: &mut D, language: Language) -> PassReport {
        let mut metrics = PassMetrics::new();

        dom.set_document_language(language.code());
        dom.set_document_direction(language.direction());

        for kind in BindingKind::ALL {
            self.apply_kind(dom, kind, language, &mut metrics);
        }

        if update_toggle_label(dom, language) {
            metrics.record_toggle_label();
        }

        dom.add_document_class(READY_CLASS);

        let report = metrics.report(language);
        info!(
            "Applied {} translations for '{}' ({} skipped, {} fallbacks)",
            report.written,
            language,
            report.skipped(),
            report.fallbacks
        );
        report
    }

    fn apply_kind<D: DomPort>(
        &self,
        dom: &mut D,
        kind: BindingKind,
        language: Language,
        metrics: &mut PassMetrics,
    ) {
        for node in kind.targets(&*dom) {
            // An earlier write in this pass may have replaced an ancestor's content.
            if !dom.contains(&node) {
                debug!("{} binding detached during the pass, skipping", kind.name());
                continue;
            }
            let Some(key) = kind.read_key(&*dom, &node) else {
                debug!("{} binding without a key, skipping", kind.name());
                metrics.record_unkeyed();
                continue;
            };

            let lookup = self.table.lookup(&key, language);
            match lookup.text() {
                Some(text) => {
                    if kind.write(dom, &node, text) {
                        metrics.record_lookup(kind, &lookup);
                    } else {
                        debug!("No target for {} binding '{}', skipping", kind.name(), key);
                    }
                }
                None => {
                    debug!(
                        "No translation for {} key '{}' in '{}' ({:?})",
                        kind.name(),
                        key,
                        language,
                        lookup
                    );
                    metrics.record_lookup(kind, &lookup);
                }
            }
        }
    }
}

/// Label the toggle control with the name of the language it switches to.
///
/// Returns `false` when the control or its label element is absent.
fn update_toggle_label<D: DomPort>(dom: &mut D, language: Language) -> bool {
    let Some(control) = dom.element_by_id(TOGGLE_CONTROL_ID) else {
        return false;
    };
    let Some(label) = dom.find_descendant(&control, TOGGLE_LABEL_TAG) else {
        debug!("Toggle control has no label element");
        return false;
    };
    dom.set_text_content(&label, language.other().native_name());
    true
}
