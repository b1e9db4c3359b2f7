// ═══════════════════════════════════════════════════════════════════
// Service Tests — ValidationService, SummaryService
// ═══════════════════════════════════════════════════════════════════

use sum_aggregator_core::errors::CoreError;
use sum_aggregator_core::models::entry::Entry;
use sum_aggregator_core::models::settings::Settings;
use sum_aggregator_core::services::summary_service::SummaryService;
use sum_aggregator_core::services::validation_service::ValidationService;

fn validate(group: &str, item: &str, qty: &str) -> Result<Entry, CoreError> {
    ValidationService::new().validate(group, item, qty, &Settings::default())
}

fn validation_message(result: Result<Entry, CoreError>) -> String {
    match result {
        Err(CoreError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn accepts_valid_entry() {
        let entry = validate("G1", "apple", "3").unwrap();
        assert_eq!(entry.group_id.as_deref(), Some("G1"));
        assert_eq!(entry.item_id, "apple");
        assert_eq!(entry.quantity, 3);
    }

    #[test]
    fn blank_group_normalizes_to_none() {
        let entry = validate("", "apple", "1").unwrap();
        assert_eq!(entry.group_id, None);

        let entry = validate("   ", "apple", "1").unwrap();
        assert_eq!(entry.group_id, None);
    }

    #[test]
    fn trims_all_fields() {
        let entry = validate("  G1 ", "  apple  ", " 7 ").unwrap();
        assert_eq!(entry.group_id.as_deref(), Some("G1"));
        assert_eq!(entry.item_id, "apple");
        assert_eq!(entry.quantity, 7);
    }

    #[test]
    fn rejects_blank_item_id() {
        let msg = validation_message(validate("", "   ", "5"));
        assert!(msg.contains("Item ID cannot be blank"), "got: {msg}");
    }

    #[test]
    fn rejects_too_long_item_id() {
        let long = "x".repeat(21);
        let msg = validation_message(validate("", &long, "5"));
        assert!(
            msg.contains("Item ID cannot be longer than 20 characters"),
            "got: {msg}"
        );
    }

    #[test]
    fn rejects_too_long_group_id() {
        let long = "g".repeat(21);
        let msg = validation_message(validate(&long, "apple", "5"));
        assert!(
            msg.contains("Group ID cannot be longer than 20 characters"),
            "got: {msg}"
        );
    }

    #[test]
    fn accepts_ids_at_exact_limit() {
        let at_limit = "x".repeat(20);
        let entry = validate(&at_limit, &at_limit, "1").unwrap();
        assert_eq!(entry.item_id.len(), 20);
    }

    #[test]
    fn rejects_non_numeric_quantity() {
        let msg = validation_message(validate("", "apple", "three"));
        assert!(msg.contains("Quantity must be a number"), "got: {msg}");
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        let msg = validation_message(validate("", "apple", "0"));
        assert!(msg.contains("Quantity must be greater than zero"), "got: {msg}");

        let msg = validation_message(validate("", "apple", "-4"));
        assert!(msg.contains("Quantity must be greater than zero"), "got: {msg}");
    }

    #[test]
    fn accumulates_all_failures_joined_by_newline() {
        let long_group = "g".repeat(21);
        let msg = validation_message(validate(&long_group, "", "abc"));
        let lines: Vec<&str> = msg.lines().collect();
        assert_eq!(lines.len(), 3, "got: {msg}");
        assert!(lines[0].contains("Group ID"));
        assert!(lines[1].contains("Item ID cannot be blank"));
        assert!(lines[2].contains("Quantity must be a number"));
    }

    #[test]
    fn honors_configured_max_id_length() {
        let settings = Settings {
            max_id_length: 10,
            ..Settings::default()
        };
        let result = ValidationService::new().validate("", "elevenchars", "1", &settings);
        let msg = validation_message(result);
        assert!(
            msg.contains("Item ID cannot be longer than 10 characters"),
            "got: {msg}"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Summaries
// ═══════════════════════════════════════════════════════════════════

mod summaries {
    use super::*;

    fn entry(group: Option<&str>, item: &str, qty: i64) -> Entry {
        Entry::new(group.map(str::to_owned), item, qty)
    }

    #[test]
    fn by_item_sums_across_groups() {
        // add ("", "apple", 3) then ("", "apple", 2) → {"apple": 5}
        let entries = vec![entry(None, "apple", 3), entry(None, "apple", 2)];
        let totals = SummaryService::new().by_item_id(&entries);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["apple"], 5);
    }

    #[test]
    fn by_group_partitions_without_losing_totals() {
        // ("G1","x",1), ("G2","x",1) → {"G1":{"x":1},"G2":{"x":1}}, byItem {"x":2}
        let entries = vec![entry(Some("G1"), "x", 1), entry(Some("G2"), "x", 1)];
        let svc = SummaryService::new();

        let grouped = svc.by_group_and_item_id(&entries);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&Some("G1".to_string())]["x"], 1);
        assert_eq!(grouped[&Some("G2".to_string())]["x"], 1);

        assert_eq!(svc.by_item_id(&entries)["x"], 2);
    }

    #[test]
    fn ungrouped_entries_land_under_none() {
        let entries = vec![entry(None, "apple", 2), entry(Some("G1"), "apple", 3)];
        let grouped = SummaryService::new().by_group_and_item_id(&entries);
        assert_eq!(grouped[&None]["apple"], 2);
        assert_eq!(grouped[&Some("G1".to_string())]["apple"], 3);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let svc = SummaryService::new();
        assert!(svc.by_item_id(&[]).is_empty());
        assert!(svc.by_group_and_item_id(&[]).is_empty());
        assert!(svc.merge_for_snapshot(&[]).is_empty());
    }

    #[test]
    fn by_item_total_equals_raw_quantity_total() {
        let entries = vec![
            entry(Some("G1"), "a", 3),
            entry(Some("G2"), "a", 4),
            entry(None, "b", 5),
            entry(Some("G1"), "b", 1),
        ];
        let totals = SummaryService::new().by_item_id(&entries);
        let summed: i64 = totals.values().sum();
        let raw: i64 = entries.iter().map(|e| e.quantity).sum();
        assert_eq!(summed, raw);
    }

    #[test]
    fn grouped_projection_flattens_to_item_projection() {
        let entries = vec![
            entry(Some("G1"), "a", 3),
            entry(Some("G2"), "a", 4),
            entry(None, "b", 5),
            entry(Some("G1"), "b", 1),
            entry(None, "a", 2),
        ];
        let svc = SummaryService::new();
        let by_item = svc.by_item_id(&entries);

        let mut flattened: std::collections::BTreeMap<String, i64> = Default::default();
        for items in svc.by_group_and_item_id(&entries).values() {
            for (item, total) in items {
                *flattened.entry(item.clone()).or_insert(0) += total;
            }
        }
        assert_eq!(flattened, by_item);
    }

    #[test]
    fn merge_collapses_duplicate_keys() {
        let entries = vec![
            entry(Some("G1"), "a", 3),
            entry(Some("G1"), "a", 4),
            entry(Some("G2"), "a", 1),
            entry(None, "a", 2),
        ];
        let merged = SummaryService::new().merge_for_snapshot(&entries);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], entry(Some("G1"), "a", 7));
        assert_eq!(merged[1], entry(Some("G2"), "a", 1));
        assert_eq!(merged[2], entry(None, "a", 2));
    }

    #[test]
    fn merge_preserves_first_seen_order() {
        let entries = vec![
            entry(None, "b", 1),
            entry(Some("G1"), "a", 1),
            entry(None, "b", 1),
            entry(None, "a", 1),
        ];
        let merged = SummaryService::new().merge_for_snapshot(&entries);
        let keys: Vec<_> = merged
            .iter()
            .map(|e| (e.group_id.clone(), e.item_id.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (None, "b".to_string()),
                (Some("G1".to_string()), "a".to_string()),
                (None, "a".to_string()),
            ]
        );
    }

    #[test]
    fn aggregating_merged_snapshot_is_idempotent() {
        let entries = vec![
            entry(Some("G1"), "a", 3),
            entry(Some("G1"), "a", 4),
            entry(None, "b", 5),
            entry(Some("G2"), "a", 2),
        ];
        let svc = SummaryService::new();
        let merged = svc.merge_for_snapshot(&entries);

        assert_eq!(svc.by_item_id(&merged), svc.by_item_id(&entries));
        assert_eq!(
            svc.by_group_and_item_id(&merged),
            svc.by_group_and_item_id(&entries)
        );
        assert_eq!(svc.merge_for_snapshot(&merged), merged);
    }
}
