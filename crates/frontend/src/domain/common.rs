//! Filters shared by the dictionary screens.

use std::collections::BTreeMap;

use contracts::shared::select::{is_unconstrained, SelectOption};

use crate::shared::list_query::FilterDef;

pub const STATUS_FILTER: &str = "status";

/// Active/Inactive filter over the `isActive` flag.
pub fn active_filter() -> FilterDef {
    FilterDef::new(
        STATUS_FILTER,
        "Статус",
        [
            SelectOption::new("Active", "Активные"),
            SelectOption::new("Inactive", "Неактивные"),
        ],
    )
}

/// Sends the status filter as `isActive=true|false`; other filters pass
/// through under their own names.
pub fn active_param_mapper(filters: &BTreeMap<String, String>) -> Vec<(String, String)> {
    filters
        .iter()
        .filter(|(_, value)| !is_unconstrained(value))
        .filter_map(|(name, value)| {
            if name != STATUS_FILTER {
                return Some((name.clone(), value.clone()));
            }
            match value.as_str() {
                "Active" => Some(("isActive".to_string(), "true".to_string())),
                "Inactive" => Some(("isActive".to_string(), "false".to_string())),
                other => {
                    log::warn!("unknown status filter value {:?}", other);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_status_maps_to_is_active() {
        assert_eq!(
            active_param_mapper(&filters(&[("status", "Inactive")])),
            vec![("isActive".to_string(), "false".to_string())]
        );
        assert_eq!(
            active_param_mapper(&filters(&[("status", "Active"), ("country", "c1")])),
            vec![
                ("country".to_string(), "c1".to_string()),
                ("isActive".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_sentinel_and_unknown_values_are_dropped() {
        assert!(active_param_mapper(&filters(&[("status", "All")])).is_empty());
        assert!(active_param_mapper(&filters(&[("status", "Archived")])).is_empty());
    }

    #[test]
    fn test_filter_offers_all_first() {
        let def = active_filter();
        assert_eq!(def.options[0], SelectOption::all());
        assert_eq!(def.options.len(), 3);
    }
}
