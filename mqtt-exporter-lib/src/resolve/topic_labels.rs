use crate::catalog::LabelSpecs;
use core::cmp::Ordering;

/// Return the topic segment at `idx`, or an empty string when `idx` is out of range.
///
/// Segments come from splitting on `/`, so a leading slash yields an empty first segment:
/// `/a/b` splits into `["", "a", "b"]`. Positive indices address `segments[idx]` and negative
/// indices count from the end. Index 0 always yields an empty string.
#[must_use]
pub fn topic_part(topic: &str, idx: i32) -> &str {
    let count = topic.split('/').count();
    let position = match idx.cmp(&0) {
        Ordering::Greater => usize::try_from(idx).ok().filter(|&i| i < count),
        Ordering::Less => usize::try_from(idx.unsigned_abs()).ok().and_then(|back| count.checked_sub(back)),
        Ordering::Equal => None,
    };

    position.and_then(|i| topic.split('/').nth(i)).unwrap_or("")
}

/// Label values for each spec, in declaration order.
#[must_use]
pub fn extract(topic: &str, specs: &LabelSpecs) -> Vec<String> {
    specs.indices().map(|idx| topic_part(topic, idx).to_string()).collect()
}

/// Full label values for an observation: the raw topic followed by [`extract`].
#[must_use]
pub fn label_values(topic: &str, specs: &LabelSpecs) -> Vec<String> {
    let mut values = vec![topic.to_string()];
    values.extend(extract(topic, specs));
    values
}
