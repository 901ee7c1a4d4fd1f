use serde_json::json;

use crate::scoring::domain::CovenantRatio;
use crate::scoring::settings::{
    ComponentWeights, CovenantTargets, CovenantWeights, ResolvedSettings, RiskOverrides,
};

fn overrides(value: serde_json::Value) -> RiskOverrides {
    RiskOverrides::from_value(value).expect("override document parses")
}

#[test]
fn absent_document_resolves_to_defaults() {
    let resolved = ResolvedSettings::resolve(None);

    assert_eq!(resolved, ResolvedSettings::default());
    assert_eq!(resolved.components, ComponentWeights::default());
    assert_eq!(resolved.covenant.liquidity, 0.30);
    assert_eq!(resolved.targets.get(CovenantRatio::CurrentRatio), 88.0);
}

#[test]
fn empty_document_is_equivalent_to_absent() {
    let empty = overrides(json!({}));

    assert_eq!(ResolvedSettings::resolve(Some(&empty)), ResolvedSettings::default());
}

#[test]
fn partial_overrides_merge_over_defaults() {
    let document = overrides(json!({
        "weights": {
            "components": { "covenant": 0.5, "abs": 0.05 },
            "covenant": { "efficiency": 0.4 }
        },
        "targets": { "current_ratio": 500, "avg_collection_period": 45.5 }
    }));

    let resolved = ResolvedSettings::resolve(Some(&document));

    assert_eq!(resolved.components.covenant, 0.5);
    assert_eq!(resolved.components.benchmark, 0.05);
    assert_eq!(resolved.components.trend, ComponentWeights::default().trend);
    assert_eq!(resolved.covenant.efficiency, 0.4);
    assert_eq!(resolved.covenant.liquidity, CovenantWeights::default().liquidity);
    assert_eq!(resolved.targets.get(CovenantRatio::CurrentRatio), 500.0);
    assert_eq!(resolved.targets.get(CovenantRatio::AvgCollectionPeriod), 45.5);
    assert_eq!(resolved.targets.get(CovenantRatio::QuickRatio), 70.0);
}

#[test]
fn non_numeric_values_fall_back_to_defaults() {
    let document = overrides(json!({
        "weights": {
            "components": { "covenant": "0.9", "trend": null, "scale": true },
            "covenant": { "solvency": [0.2] }
        },
        "targets": { "current_ratio": "500", "quick_ratio": { "value": 1 } }
    }));

    let resolved = ResolvedSettings::resolve(Some(&document));

    assert_eq!(resolved, ResolvedSettings::default());
}

#[test]
fn wrongly_shaped_sections_are_ignored() {
    let document = overrides(json!({
        "weights": "heavy",
        "targets": [1, 2, 3]
    }));

    assert!(document.targets.is_empty());
    assert_eq!(ResolvedSettings::resolve(Some(&document)), ResolvedSettings::default());
}

#[test]
fn unknown_target_names_are_ignored() {
    let document = overrides(json!({ "targets": { "vibes_ratio": 3, "cash_ratio": 35 } }));

    let resolved = ResolvedSettings::resolve(Some(&document));

    let mut expected = CovenantTargets::default();
    expected.set(CovenantRatio::CashRatio, 35.0);
    assert_eq!(resolved.targets, expected);
}

#[test]
fn zero_weight_override_is_honoured() {
    let document = overrides(json!({ "weights": { "components": { "trend": 0 } } }));

    let resolved = ResolvedSettings::resolve(Some(&document));

    assert_eq!(resolved.components.trend, 0.0);
}

#[test]
fn scalar_document_is_rejected() {
    assert!(RiskOverrides::from_value(json!("defaults please")).is_err());
    assert!(RiskOverrides::from_value(json!(7)).is_err());
}
