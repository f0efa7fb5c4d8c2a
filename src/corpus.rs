//! Corpus assembly: run the source loaders and concatenate their output.

use crate::config::Config;
use crate::connector_calendar;
use crate::connector_gmail;
use crate::connector_notion;
use crate::models::TextItem;

/// Concatenate the three loader outputs in the fixed provider order:
/// mail, then notes, then calendar. No transformation, filtering, or
/// deduplication.
pub fn aggregate(
    mail: Vec<TextItem>,
    notes: Vec<TextItem>,
    calendar: Vec<TextItem>,
) -> Vec<TextItem> {
    let mut corpus = Vec::with_capacity(mail.len() + notes.len() + calendar.len());
    corpus.extend(mail);
    corpus.extend(notes);
    corpus.extend(calendar);
    corpus
}

/// Run all loaders sequentially and aggregate.
///
/// Loaders fail soft: an unavailable provider contributes an empty list
/// and a warning, never an error. The corpus is complete once this
/// returns — nothing is indexed before every loader has reported.
pub async fn load_corpus(config: &Config) -> Vec<TextItem> {
    let mail = connector_gmail::load_gmail(config).await;
    let notes = connector_notion::load_notion(config).await;
    let calendar = connector_calendar::load_calendar(config).await;

    let counts = (mail.len(), notes.len(), calendar.len());
    let corpus = aggregate(mail, notes, calendar);
    println!(
        "corpus: {} items (mail {}, notes {}, calendar {})",
        corpus.len(),
        counts.0,
        counts.1,
        counts.2
    );
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(texts: &[&str]) -> Vec<TextItem> {
        texts.iter().map(|t| TextItem::from(*t)).collect()
    }

    #[test]
    fn test_aggregate_preserves_fixed_order() {
        let corpus = aggregate(items(&["E1", "E2"]), items(&["P1"]), items(&["Ev1"]));
        assert_eq!(corpus, items(&["E1", "E2", "P1", "Ev1"]));
    }

    #[test]
    fn test_aggregate_all_empty() {
        let corpus = aggregate(vec![], vec![], vec![]);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_aggregate_keeps_duplicates() {
        let corpus = aggregate(items(&["same"]), items(&["same"]), vec![]);
        assert_eq!(corpus.len(), 2);
    }
}
