// src/labeling/classifier.rs

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelCategory {
    NotLabeled,
    SingleLabel,
    ConfirmedLabel,
    Discrepancy,
}

impl LabelCategory {
    pub const ALL: [LabelCategory; 4] = [
        LabelCategory::NotLabeled,
        LabelCategory::SingleLabel,
        LabelCategory::ConfirmedLabel,
        LabelCategory::Discrepancy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelCategory::NotLabeled => "not_labeled",
            LabelCategory::SingleLabel => "single_label",
            LabelCategory::ConfirmedLabel => "confirmed_label",
            LabelCategory::Discrepancy => "discrepancy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consensus {
    pub num_user_labels: usize,
    pub category: LabelCategory,
    /// Set only for `ConfirmedLabel`.
    pub final_label: Option<String>,
}

/// Consensus over the three annotator votes. Blank votes do not count.
///
/// | votes | distinct | category        |
/// |-------|----------|-----------------|
/// | 0     | -        | not_labeled     |
/// | 1     | 1        | single_label    |
/// | 2     | 1        | confirmed_label |
/// | 2     | 2        | discrepancy     |
/// | 3     | 1 or 2   | confirmed_label |
/// | 3     | 3        | discrepancy     |
pub fn classify(votes: &[Option<String>; 3]) -> Consensus {
    let cast: Vec<&str> = votes
        .iter()
        .filter_map(|v| v.as_deref().map(str::trim))
        .filter(|v| !v.is_empty())
        .collect();

    // Count per value; the first value to reach the top count wins.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for &v in &cast {
        let c = counts.entry(v).or_insert(0);
        if *c == 0 {
            order.push(v);
        }
        *c += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for v in order {
        let c = counts[v];
        if top.map_or(true, |(_, best)| c > best) {
            top = Some((v, c));
        }
    }

    let n = cast.len();
    let category = match (n, top) {
        (0, _) | (_, None) => LabelCategory::NotLabeled,
        (1, _) => LabelCategory::SingleLabel,
        (_, Some((_, count))) if count * 2 > n => LabelCategory::ConfirmedLabel,
        _ => LabelCategory::Discrepancy,
    };

    Consensus {
        num_user_labels: n,
        final_label: match category {
            LabelCategory::ConfirmedLabel => top.map(|(v, _)| v.to_string()),
            _ => None,
        },
        category,
    }
}
