// src/labeling/priority.rs

use crate::labeling::classifier::LabelCategory;
use crate::labeling::session::SessionContext;
use crate::labeling::LabeledRecord;

/// Discrepancy waiting on this annotator's vote.
pub const PRIORITY_DISCREPANCY: u8 = 4;
/// Single vote waiting on this annotator's vote.
pub const PRIORITY_SINGLE: u8 = 3;
/// Nobody has voted, but the upstream model flags a fixer-upper.
pub const PRIORITY_FLAGGED: u8 = 2;
pub const PRIORITY_UNLABELED: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    HighestPriorityFirst,
    LowestPriorityFirst,
}

/// Rotates exposure order by how many records this session has labeled:
/// two labels highest-first, then one lowest-first, repeating.
pub fn strategy_for(session: &SessionContext) -> SortStrategy {
    match session.labeled_ids.len() % 3 {
        2 => SortStrategy::LowestPriorityFirst,
        _ => SortStrategy::HighestPriorityFirst,
    }
}

/// Tier for a record from this annotator's point of view, or `None` when
/// there is nothing for them to do (already voted, or already confirmed).
pub fn priority(record: &LabeledRecord, session: &SessionContext) -> Option<u8> {
    if record.vote(session.annotator.slot).is_some() || session.has_labeled(&record.property_id) {
        return None;
    }

    match record.consensus.category {
        LabelCategory::Discrepancy => Some(PRIORITY_DISCREPANCY),
        LabelCategory::SingleLabel => Some(PRIORITY_SINGLE),
        LabelCategory::NotLabeled if record.fixer_upper_flag => Some(PRIORITY_FLAGGED),
        LabelCategory::NotLabeled => Some(PRIORITY_UNLABELED),
        LabelCategory::ConfirmedLabel => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Prioritized<'a> {
    pub record: &'a LabeledRecord,
    pub priority: u8,
}

/// Records this annotator should see, in presentation order. Deterministic
/// for a given sheet and session; ties keep sheet order.
pub fn labeling_queue<'a>(
    records: &'a [LabeledRecord],
    session: &SessionContext,
) -> Vec<Prioritized<'a>> {
    let mut queue: Vec<Prioritized<'a>> = records
        .iter()
        .filter_map(|record| {
            priority(record, session).map(|priority| Prioritized { record, priority })
        })
        .collect();

    match strategy_for(session) {
        SortStrategy::HighestPriorityFirst => queue.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortStrategy::LowestPriorityFirst => queue.sort_by(|a, b| a.priority.cmp(&b.priority)),
    }
    queue
}
