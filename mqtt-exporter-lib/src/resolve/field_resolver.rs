use super::PayloadValue;
use crate::catalog::{FieldPath, MetricDefinition};
use core::str;

const LOG_TARGET: &str = "  resolver";

/// One numeric value resolved from a message, with the name it is exported under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedValue<'a> {
    pub export_name: &'a str,
    pub value: f64,
}

/// Extract the numeric values `def` asks for from a raw payload.
///
/// Scalar definitions yield at most one value. Definitions with field paths yield one value per
/// path that resolves to a number, in field order. Failures are logged and skipped, so an empty
/// result means nothing in the payload was usable.
#[must_use]
pub fn resolve<'a>(def: &'a MetricDefinition, payload: &[u8]) -> Vec<ResolvedValue<'a>> {
    if def.is_scalar() {
        return resolve_scalar(def, payload).into_iter().collect();
    }

    let root = match PayloadValue::parse(payload) {
        Ok(root @ PayloadValue::Object(_)) => root,
        Ok(_) => {
            log::warn!(
                target: LOG_TARGET,
                "Got a JSON value '{}' that is not an object, metric '{}' needs fields",
                String::from_utf8_lossy(payload),
                def.name()
            );
            return Vec::new();
        }
        Err(e) => {
            log::warn!(
                target: LOG_TARGET,
                "Got an invalid JSON value '{}' and failed to unmarshal: {e}",
                String::from_utf8_lossy(payload)
            );
            return Vec::new();
        }
    };

    def.field_paths()
        .iter()
        .filter_map(|field| {
            resolve_field(&root, field).map(|value| ResolvedValue {
                export_name: field.export_name(),
                value,
            })
        })
        .collect()
}

fn resolve_scalar<'a>(def: &'a MetricDefinition, payload: &[u8]) -> Option<ResolvedValue<'a>> {
    let text = match str::from_utf8(payload) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Got data for metric '{}' that is not valid UTF-8: {e}", def.name());
            return None;
        }
    };

    match text.trim().parse::<f64>() {
        Ok(value) => Some(ResolvedValue {
            export_name: def.name(),
            value,
        }),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Got data with unexpected value '{text}' and failed to parse to float: {e}");
            None
        }
    }
}

fn resolve_field(root: &PayloadValue, field: &FieldPath) -> Option<f64> {
    let Some(leaf) = find_leaf(root, field) else {
        log::warn!(target: LOG_TARGET, "Field '{field}' was not found or does not hold a scalar value");
        return None;
    };

    let value = leaf.as_f64();
    if value.is_none() {
        log::warn!(target: LOG_TARGET, "Got data with unexpected value '{leaf:?}' for field '{field}' and failed to parse to float");
    }
    value
}

/// Walk the literal path first, then the underscore-flattened variant.
fn find_leaf<'a>(root: &'a PayloadValue, field: &FieldPath) -> Option<&'a PayloadValue> {
    root.walk(field.segments()).filter(|value| value.is_scalar()).or_else(|| {
        let flattened = field.flattened();
        root.walk(flattened.split('.')).filter(|value| value.is_scalar())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    const PAYLOAD: &[u8] = br#"{"city":"Tokyo", "temperatures": {"out": 12.5, "in": 22.15}, "size": -5}"#;

    fn scalar() -> MetricDefinition {
        MetricDefinition::new("value", "/topic/level2/level3/#", Duration::from_secs(60))
    }

    fn with_fields(fields: &[&str]) -> MetricDefinition {
        scalar().with_field_paths(fields)
    }

    fn pairs<'a>(resolved: &[ResolvedValue<'a>]) -> Vec<(&'a str, f64)> {
        resolved.iter().map(|r| (r.export_name, r.value)).collect()
    }

    #[test]
    fn scalar_number() {
        let def = scalar();
        assert_eq!(pairs(&resolve(&def, b"25.12")), [("value", 25.12)]);
    }

    #[test]
    fn scalar_accepts_sign_exponent_and_whitespace() {
        let def = scalar();
        assert_eq!(pairs(&resolve(&def, b"-4")), [("value", -4.0)]);
        assert_eq!(pairs(&resolve(&def, b"+1.5e3")), [("value", 1500.0)]);
        assert_eq!(pairs(&resolve(&def, b"7\n")), [("value", 7.0)]);
    }

    #[test]
    fn scalar_not_a_number() {
        let def = scalar();
        assert!(resolve(&def, b"not a number").is_empty());
        assert!(resolve(&def, b"").is_empty());
        assert!(resolve(&def, &[0xff, 0xfe]).is_empty());
    }

    #[test]
    fn first_level_field() {
        let def = with_fields(&["size"]);
        assert_eq!(pairs(&resolve(&def, PAYLOAD)), [("value_size", -5.0)]);
    }

    #[test]
    fn second_level_field_uses_last_segment_suffix() {
        let def = with_fields(&["temperatures.out"]);
        assert_eq!(pairs(&resolve(&def, PAYLOAD)), [("value_out", 12.5)]);
    }

    #[test]
    fn object_leaf_is_skipped() {
        let def = with_fields(&["temperatures"]);
        assert!(resolve(&def, PAYLOAD).is_empty());
    }

    #[test]
    fn non_numeric_leaf_is_skipped() {
        let def = with_fields(&["city"]);
        assert!(resolve(&def, PAYLOAD).is_empty());
    }

    #[test]
    fn dotted_path_through_nested_object() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total": {"count": 22, "unknown": "none"}, "random": "2"}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 22.0)]);
    }

    #[test]
    fn dotted_path_falls_back_to_underscore_name() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total_count": 9}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 9.0)]);
    }

    #[test]
    fn literal_path_wins_over_underscore_name() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total": {"count": 1}, "total_count": 2}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 1.0)]);
    }

    #[test]
    fn object_at_literal_path_falls_back_to_underscore_name() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total": {"count": {"value": 1}}, "total_count": 3}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 3.0)]);
    }

    #[test]
    fn array_at_literal_path_falls_back_to_underscore_name() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total": {"count": [1]}, "total_count": 3}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 3.0)]);
    }

    #[test]
    fn array_leaf_without_fallback_is_skipped() {
        let def = with_fields(&["list"]);
        assert!(resolve(&def, br#"{"list": [1, 2]}"#).is_empty());
    }

    #[test]
    fn intermediate_scalar_falls_back_to_underscore_name() {
        let def = with_fields(&["total.count"]);
        let payload = br#"{"total": 5, "total_count": 4}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_count", 4.0)]);
    }

    #[test]
    fn numeric_text_leaf_is_accepted() {
        let def = with_fields(&["random"]);
        let payload = br#"{"random": "2"}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_random", 2.0)]);
    }

    #[test]
    fn failed_field_does_not_affect_siblings() {
        let def = with_fields(&["size", "city"]);
        let payload = br#"{"size": -5, "city": "Tokyo"}"#;
        assert_eq!(pairs(&resolve(&def, payload)), [("value_size", -5.0)]);
    }

    #[test]
    fn every_resolvable_field_is_returned_in_order() {
        let def = with_fields(&["temperatures.in", "missing", "temperatures.out", "size"]);
        assert_eq!(
            pairs(&resolve(&def, PAYLOAD)),
            [("value_in", 22.15), ("value_out", 12.5), ("value_size", -5.0)]
        );
    }

    #[test]
    fn malformed_json_yields_nothing() {
        let def = with_fields(&["size"]);
        assert!(resolve(&def, b"{\"size\": ").is_empty());
        assert!(resolve(&def, b"25.12").is_empty());
        assert!(resolve(&def, b"[1, 2]").is_empty());
    }

    #[test]
    fn booleans_are_not_numbers() {
        let def = with_fields(&["on"]);
        assert!(resolve(&def, br#"{"on": true}"#).is_empty());
    }
}
