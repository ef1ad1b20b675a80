// src/labeling/metrics.rs

use std::collections::HashMap;

use crate::labeling::classifier::LabelCategory;
use crate::labeling::LabeledRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelMetrics {
    pub total: usize,
    /// Every category, in `LabelCategory::ALL` order, including zero counts.
    pub by_category: Vec<(LabelCategory, usize)>,
    /// Confirmed final labels, most common first (ties by name).
    pub final_labels: Vec<(String, usize)>,
    pub votes_per_annotator: [usize; 3],
    /// Share of records with a confirmed label, percent with two decimals.
    pub confirmed_pct: f64,
}

impl LabelMetrics {
    /// `count` as a percentage of all records, for chart bars.
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn aggregate(records: &[LabeledRecord]) -> LabelMetrics {
    let mut categories: HashMap<LabelCategory, usize> = HashMap::new();
    let mut finals: HashMap<&str, usize> = HashMap::new();
    let mut votes_per_annotator = [0usize; 3];

    for r in records {
        *categories.entry(r.consensus.category).or_insert(0) += 1;
        if let Some(label) = r.consensus.final_label.as_deref() {
            *finals.entry(label).or_insert(0) += 1;
        }
        for (slot, n) in votes_per_annotator.iter_mut().enumerate() {
            if r.vote(slot).is_some() {
                *n += 1;
            }
        }
    }

    let by_category: Vec<(LabelCategory, usize)> = LabelCategory::ALL
        .iter()
        .map(|c| (*c, categories.get(c).copied().unwrap_or(0)))
        .collect();

    let mut final_labels: Vec<(String, usize)> =
        finals.into_iter().map(|(l, n)| (l.to_string(), n)).collect();
    final_labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let confirmed = categories
        .get(&LabelCategory::ConfirmedLabel)
        .copied()
        .unwrap_or(0);
    let confirmed_pct = if records.is_empty() {
        0.0
    } else {
        (confirmed as f64 / records.len() as f64 * 10_000.0).round() / 100.0
    };

    LabelMetrics {
        total: records.len(),
        by_category,
        final_labels,
        votes_per_annotator,
        confirmed_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, votes: [&str; 3]) -> LabeledRecord {
        LabeledRecord::new(
            2,
            id.to_string(),
            String::new(),
            false,
            votes.map(|v| (!v.is_empty()).then(|| v.to_string())),
        )
    }

    #[test]
    fn aggregates_categories_labels_and_annotators() {
        let records = vec![
            record("a", ["", "", ""]),
            record("b", ["updated", "", ""]),
            record("c", ["updated", "updated", ""]),
            record("d", ["distressed", "distressed", "updated"]),
            record("e", ["updated", "", "updated"]),
            record("f", ["distressed", "updated", ""]),
        ];

        let m = aggregate(&records);
        assert_eq!(m.total, 6);
        assert_eq!(
            m.by_category,
            vec![
                (LabelCategory::NotLabeled, 1),
                (LabelCategory::SingleLabel, 1),
                (LabelCategory::ConfirmedLabel, 3),
                (LabelCategory::Discrepancy, 1),
            ]
        );
        assert_eq!(
            m.final_labels,
            vec![("updated".to_string(), 2), ("distressed".to_string(), 1)]
        );
        assert_eq!(m.votes_per_annotator, [5, 3, 2]);
        assert_eq!(m.confirmed_pct, 50.0);
        assert_eq!(m.share(3), 50.0);
    }

    #[test]
    fn empty_sheet() {
        let m = aggregate(&[]);
        assert_eq!(m.total, 0);
        assert_eq!(m.by_category.len(), 4);
        assert_eq!(m.confirmed_pct, 0.0);
        assert_eq!(m.share(0), 0.0);
    }
}
