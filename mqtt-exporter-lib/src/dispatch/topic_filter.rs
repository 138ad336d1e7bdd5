//! MQTT topic filter matching.
//!
//! Filters are `/`-separated levels where `+` matches exactly one level and a trailing `#`
//! matches any number of remaining levels, including none. Topics starting with `$` are only
//! matched by filters whose first level is literal.

use crate::Result;
use ohno::app_err;

const SINGLE_LEVEL: &str = "+";
const MULTI_LEVEL: &str = "#";

/// Whether `topic` is selected by `filter`.
#[must_use]
pub fn matches(filter: &str, topic: &str) -> bool {
    if topic.starts_with('$') && (filter.starts_with(SINGLE_LEVEL) || filter.starts_with(MULTI_LEVEL)) {
        return false;
    }

    let mut topic_levels = topic.split('/');
    for level in filter.split('/') {
        if level == MULTI_LEVEL {
            return true;
        }

        match topic_levels.next() {
            Some(_) if level == SINGLE_LEVEL => {}
            Some(actual) if actual == level => {}
            _ => return false,
        }
    }

    topic_levels.next().is_none()
}

/// Check that `filter` is a well-formed subscription filter.
pub fn validate(filter: &str) -> Result<()> {
    if filter.is_empty() {
        return Err(app_err!("topic filter must not be empty"));
    }

    if filter.contains('\0') {
        return Err(app_err!("topic filter '{}' contains a NUL character", filter.escape_debug()));
    }

    let levels: Vec<&str> = filter.split('/').collect();
    let last = levels.len().saturating_sub(1);
    for (i, level) in levels.iter().enumerate() {
        if level.contains(MULTI_LEVEL) && (*level != MULTI_LEVEL || i != last) {
            return Err(app_err!("topic filter '{filter}' uses '#' other than as its whole last level"));
        }

        if level.contains(SINGLE_LEVEL) && *level != SINGLE_LEVEL {
            return Err(app_err!("topic filter '{filter}' uses '+' other than as a whole level"));
        }
    }

    Ok(())
}
