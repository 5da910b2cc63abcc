//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use frrconf_isis::error::{LabelBlock, LabelBound, ValidationError};
use frrconf_isis::validation::{SPF_DELAY_TIMERS, validate};
use frrconf_utils::tree::ConfigTree;
use maplit::btreemap;
use serde_json::{Value, json};

//
// Helper functions.
//

// Minimal valid instance, extended with the given top-level nodes.
fn tree(extra: Value) -> ConfigTree {
    let mut config = json!({
        "domain": "FOO",
        "net": "49.0001.0000.0000.0001.00",
        "interface": ["eth0"],
    });
    if let (Some(config), Value::Object(extra)) =
        (config.as_object_mut(), extra)
    {
        config.extend(extra);
    }
    ConfigTree::new(config)
}

fn message(tree: &ConfigTree) -> String {
    validate(tree).unwrap_err().to_string()
}

//
// Tests.
//

#[test]
fn removal_is_always_valid() {
    assert!(validate(&ConfigTree::default()).is_ok());
    assert!(validate(&ConfigTree::new(json!({}))).is_ok());
    assert!(validate(&ConfigTree::from_document(json!({}), "protocols.isis")).is_ok());
}

#[test]
fn minimal_instance() {
    assert!(validate(&tree(json!({}))).is_ok());
}

#[test]
fn domain_missing() {
    let tree = ConfigTree::new(json!({
        "net": "49.0001.0000.0000.0001.00",
        "interface": ["eth0"],
    }));
    assert_eq!(validate(&tree), Err(ValidationError::DomainMissing));
    assert_eq!(message(&tree), "Routing domain name/tag must be set!");

    let tree = self::tree(json!({ "domain": "" }));
    assert_eq!(validate(&tree), Err(ValidationError::DomainMissing));
}

#[test]
fn net_missing() {
    let tree = ConfigTree::new(json!({
        "domain": "FOO",
        "interface": ["eth0"],
    }));
    assert_eq!(message(&tree), "Network entity is mandatory!");

    let tree = self::tree(json!({ "net": [] }));
    assert_eq!(validate(&tree), Err(ValidationError::NetMissing));
}

#[test]
fn net_as_mapping() {
    let tree = self::tree(json!({
        "net": { "49.0001.0000.0000.0001.00": {} },
    }));
    assert!(validate(&tree).is_ok());

    let tree = self::tree(json!({ "net": {} }));
    assert_eq!(validate(&tree), Err(ValidationError::NetMissing));
}

#[test]
fn interface_missing() {
    let tree = ConfigTree::new(json!({
        "domain": "FOO",
        "net": "49.0001.0000.0000.0001.00",
    }));
    assert_eq!(
        message(&tree),
        "Interface used for routing updates is mandatory!"
    );

    let tree = self::tree(json!({ "interface": [] }));
    assert_eq!(validate(&tree), Err(ValidationError::InterfaceMissing));

    // Interfaces given as a mapping of per-interface settings.
    let tree = self::tree(json!({ "interface": { "eth0": { "passive": {} } } }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn first_violation_wins() {
    let tree = ConfigTree::new(json!({ "domain": "FOO" }));
    assert_eq!(validate(&tree), Err(ValidationError::NetMissing));

    let tree = ConfigTree::new(json!({
        "area_password": { "md5": "a", "plaintext_password": "b" },
        "spf_delay_ietf": {},
    }));
    assert_eq!(validate(&tree), Err(ValidationError::DomainMissing));

    let tree = self::tree(json!({
        "area_password": { "md5": "a", "plaintext_password": "b" },
        "spf_delay_ietf": {},
    }));
    assert_eq!(validate(&tree), Err(ValidationError::AreaPasswordConflict));
}

#[test]
fn area_password_conflict() {
    let tree = tree(json!({
        "area-password": { "md5": "secret", "plaintext-password": "secret" },
    }));
    assert_eq!(
        message(&tree),
        "Can not use both md5 and plaintext-password for ISIS area-password!"
    );
}

#[test]
fn area_password_single_method() {
    let tree = self::tree(json!({ "area_password": { "md5": "secret" } }));
    assert!(validate(&tree).is_ok());

    let tree = self::tree(json!({
        "area_password": { "plaintext_password": "secret" },
    }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn spf_delay_complete() {
    let tree = tree(json!({
        "spf_delay_ietf": {
            "holddown": "10000",
            "init_delay": "50",
            "long_delay": "5000",
            "short_delay": "200",
            "time_to_learn": "500",
        },
    }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn spf_delay_one_missing() {
    let expected = btreemap! {
        "holddown" => "holddown",
        "init_delay" => "init-delay",
        "long_delay" => "long-delay",
        "short_delay" => "short-delay",
        "time_to_learn" => "time-to-learn",
    };

    for omitted in SPF_DELAY_TIMERS {
        let timers = SPF_DELAY_TIMERS
            .iter()
            .filter(|timer| **timer != omitted)
            .map(|timer| (timer.to_string(), json!("100")))
            .collect::<serde_json::Map<_, _>>();
        let tree = tree(json!({ "spf_delay_ietf": timers }));
        assert_eq!(
            message(&tree),
            format!("All types of delay must be specified: {}", expected[omitted])
        );
    }
}

#[test]
fn spf_delay_all_missing() {
    let tree = tree(json!({ "spf-delay-ietf": {} }));
    assert_eq!(
        message(&tree),
        "All types of delay must be specified: holddown, init-delay, long-delay, short-delay, time-to-learn"
    );
}

#[test]
fn spf_delay_hyphenated_input() {
    let tree = tree(json!({
        "spf-delay-ietf": {
            "holddown": "10000",
            "init-delay": "50",
            "long-delay": "5000",
            "short-delay": "200",
        },
    }));
    assert_eq!(
        validate(&tree),
        Err(ValidationError::SpfDelayIncomplete(vec![
            "time_to_learn".to_owned()
        ]))
    );
}

#[test]
fn redistribute_level_missing() {
    let tree = tree(json!({
        "redistribute": { "ipv4": { "connected": {} } },
    }));
    assert_eq!(
        message(&tree),
        "Redistribute level-1 or level-2 should be specified in \"protocols isis FOO redistribute ipv4 connected\""
    );

    let tree = self::tree(json!({
        "redistribute": { "ipv6": { "static": { "metric": "10" } } },
    }));
    assert_eq!(
        validate(&tree),
        Err(ValidationError::RedistributeLevelMissing(
            "FOO".to_owned(),
            "ipv6".to_owned(),
            "static".to_owned(),
        ))
    );
}

#[test]
fn redistribute_any_level_without_restriction() {
    let tree = tree(json!({
        "redistribute": {
            "ipv4": {
                "connected": { "level-1": {} },
                "static": { "level-2": { "metric": "20" } },
            },
            "ipv6": { "ospf6": { "level-1": {}, "level-2": {} } },
        },
    }));
    assert!(validate(&tree).is_ok());

    let tree = self::tree(json!({
        "level": "level-1-2",
        "redistribute": {
            "ipv4": { "connected": { "level-1": {}, "level-2": {} } },
        },
    }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn redistribute_level_mismatch() {
    let tree = tree(json!({
        "level": "level-1",
        "redistribute": { "ipv4": { "connected": { "level-2": {} } } },
    }));
    assert_eq!(
        message(&tree),
        "\"protocols isis FOO redistribute ipv4 connected level-2\" cannot be used with \"protocols isis FOO level level-1\""
    );
}

#[test]
fn redistribute_level_mismatch_checks_every_protocol() {
    // The offending protocol is neither the first nor the last one.
    let tree = tree(json!({
        "level": "level-2",
        "redistribute": {
            "ipv4": {
                "bgp": { "level-2": {} },
                "kernel": { "level-1": {} },
                "static": { "level-2": {} },
            },
        },
    }));
    assert_eq!(
        validate(&tree),
        Err(ValidationError::RedistributeLevelMismatch(
            "FOO".to_owned(),
            "ipv4".to_owned(),
            "kernel".to_owned(),
            "level_1".to_owned(),
            "level_2".to_owned(),
        ))
    );
}

#[test]
fn redistribute_level_mismatch_checks_every_afi() {
    let tree = tree(json!({
        "level": "level-2",
        "redistribute": {
            "ipv4": { "connected": { "level-2": {} } },
            "ipv6": { "connected": { "level-1": {}, "level-2": {} } },
        },
    }));
    assert_eq!(
        message(&tree),
        "\"protocols isis FOO redistribute ipv6 connected level-1\" cannot be used with \"protocols isis FOO level level-2\""
    );
}

#[test]
fn label_block_valid() {
    let tree = tree(json!({
        "segment_routing": {
            "global_block": { "low_label_value": "10", "high_label_value": "20" },
            "local_block": { "low_label_value": 15000, "high_label_value": 15999 },
        },
    }));
    assert!(validate(&tree).is_ok());

    // Single-label range.
    let tree = self::tree(json!({
        "segment_routing": {
            "global_block": { "low_label_value": "16000", "high_label_value": "16000" },
        },
    }));
    assert!(validate(&tree).is_ok());

    // Block declared without any bound.
    let tree = self::tree(json!({ "segment_routing": { "global_block": {} } }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn label_block_high_missing() {
    let tree = tree(json!({
        "segment_routing": { "global_block": { "low_label_value": "10" } },
    }));
    assert_eq!(
        validate(&tree),
        Err(ValidationError::LabelBoundMissing(
            LabelBlock::Global,
            LabelBound::High
        ))
    );
    assert_eq!(
        message(&tree),
        "Segment routing global block high value must not be left blank"
    );
}

#[test]
fn label_block_low_missing() {
    let tree = tree(json!({
        "segment-routing": { "local-block": { "high-label-value": "10" } },
    }));
    assert_eq!(
        message(&tree),
        "Segment routing local block low value must not be left blank"
    );
}

#[test]
fn label_block_inverted() {
    let tree = tree(json!({
        "segment_routing": {
            "global_block": { "low_label_value": "20", "high_label_value": "10" },
        },
    }));
    assert_eq!(
        message(&tree),
        "Segment routing global block low value must be lower than high value"
    );

    // Bounds are compared numerically.
    let tree = self::tree(json!({
        "segment_routing": {
            "local_block": { "low_label_value": "9", "high_label_value": "10" },
        },
    }));
    assert!(validate(&tree).is_ok());
}

#[test]
fn label_block_global_checked_first() {
    let tree = tree(json!({
        "segment_routing": {
            "global_block": { "high_label_value": "20" },
            "local_block": { "low_label_value": "20", "high_label_value": "10" },
        },
    }));
    assert_eq!(
        validate(&tree),
        Err(ValidationError::LabelBoundMissing(
            LabelBlock::Global,
            LabelBound::Low
        ))
    );
}

#[test]
fn label_block_invalid_value() {
    let tree = tree(json!({
        "segment_routing": {
            "local_block": { "low_label_value": "abc", "high_label_value": "10" },
        },
    }));
    assert_eq!(
        message(&tree),
        "Segment routing local block low value \"abc\" is not a valid label"
    );
}
