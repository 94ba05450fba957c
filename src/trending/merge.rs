use crate::github::models::RawRepository;
use crate::trending::record::TrendReason;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Items from one strategy, tagged with that strategy's reason
pub type TaggedBatch = (Vec<RawRepository>, TrendReason);

/// Concatenate batches in order and keep the first occurrence of each name
///
/// Priority between strategies comes only from the order of `batches`.
pub fn merge_unique(batches: Vec<TaggedBatch>) -> Vec<(RawRepository, TrendReason)> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for (items, reason) in batches {
        for item in items {
            let Some(key) = item.key().map(str::to_string) else {
                warn!("Skipping search item without full_name ({})", reason);
                continue;
            };

            if seen.insert(key) {
                merged.push((item, reason));
            } else {
                debug!(
                    "Skipping duplicate {} from {}",
                    item.full_name.as_deref().unwrap_or_default(),
                    reason
                );
            }
        }
    }

    merged
}
