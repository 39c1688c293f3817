//! Configuration Tests.
//!
//! Verifies defaults, JSON deserialization (names, aliases, omitted fields),
//! and validation of parameter sets the engine cannot run with.

use pretty_assertions::assert_eq;
use rripsim_policy::{PolicyConfig, PolicyError, PolicyKind};
use rstest::rstest;

#[test]
fn defaults_match_reference_design() {
    let config = PolicyConfig::default();
    assert_eq!(config.policy, PolicyKind::AaDrripEbis);
    assert_eq!(config.sets, 2048);
    assert_eq!(config.ways, 16);
    assert_eq!(config.cpus, 1);
    assert_eq!(config.max_rrpv, 3);
    assert_eq!(config.btp_number, 8);
    assert_eq!(config.bip_max, 32);
    assert_eq!(config.sampler_size, 32);
    assert_eq!(config.psel_bits, 10);
    assert_eq!(config.history_size, 128);
    assert_eq!(config.seed, 1_103_515_245 + 12_345);
    assert!(config.validate().is_ok());
}

#[test]
fn derived_values() {
    let config = PolicyConfig::new(PolicyKind::Drrip, 1024, 16, 4);
    assert_eq!(config.psel_max(), 1023);
    assert_eq!(config.psel_threshold(), 511);
    assert_eq!(config.leader_sets_total(), 256);
}

#[test]
fn empty_json_is_default() {
    let config = PolicyConfig::from_json("{}").unwrap();
    assert_eq!(config, PolicyConfig::default());
}

#[rstest]
#[case("bip", PolicyKind::Bip)]
#[case("BIP", PolicyKind::Bip)]
#[case("bip-ebis", PolicyKind::BipEbis)]
#[case("BIP_EBIS", PolicyKind::BipEbis)]
#[case("aa-rrip", PolicyKind::AaRrip)]
#[case("AARRIP", PolicyKind::AaRrip)]
#[case("drrip", PolicyKind::Drrip)]
#[case("DRRIP", PolicyKind::Drrip)]
#[case("aa-drrip-ebis", PolicyKind::AaDrripEbis)]
#[case("AADRRIP_EBIS", PolicyKind::AaDrripEbis)]
fn policy_names_and_aliases(#[case] name: &str, #[case] expected: PolicyKind) {
    let json = format!(r#"{{ "policy": "{name}" }}"#);
    let config = PolicyConfig::from_json(&json).unwrap();
    assert_eq!(config.policy, expected);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config =
        PolicyConfig::from_json(r#"{ "policy": "bip", "sets": 4, "ways": 8, "btp_number": 20 }"#)
            .unwrap();
    assert_eq!(config.sets, 4);
    assert_eq!(config.ways, 8);
    assert_eq!(config.btp_number, 20);
    assert_eq!(config.history_size, 128);
}

#[test]
fn unknown_field_is_parse_error() {
    let err = PolicyConfig::from_json(r#"{ "associativity": 8 }"#).unwrap_err();
    assert!(matches!(err, PolicyError::Parse(_)), "got {err:?}");
}

#[test]
fn unknown_policy_is_parse_error() {
    let err = PolicyConfig::from_json(r#"{ "policy": "lru" }"#).unwrap_err();
    assert!(matches!(err, PolicyError::Parse(_)), "got {err:?}");
}

#[rstest]
#[case(r#"{ "sets": 0 }"#, "sets")]
#[case(r#"{ "ways": 0 }"#, "ways")]
#[case(r#"{ "cpus": 0 }"#, "cpus")]
#[case(r#"{ "max_rrpv": 0 }"#, "max_rrpv")]
#[case(r#"{ "btp_number": 100 }"#, "btp_number")]
#[case(r#"{ "bip_max": 0 }"#, "bip_max")]
#[case(r#"{ "psel_bits": 0 }"#, "psel_bits")]
#[case(r#"{ "psel_bits": 32 }"#, "psel_bits")]
#[case(r#"{ "history_size": 0 }"#, "history_size")]
#[case(r#"{ "sampler_size": 0 }"#, "sampler_size")]
fn invalid_values_name_the_field(#[case] json: &str, #[case] expected: &str) {
    match PolicyConfig::from_json(json) {
        Err(PolicyError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
    }
}

#[test]
fn dueling_needs_room_for_every_leader() {
    // 2 cpus x 2 policies x 32 leaders = 128 distinct sets.
    let tight = PolicyConfig::new(PolicyKind::AaDrripEbis, 128, 4, 2);
    assert!(tight.validate().is_ok());

    let short = PolicyConfig::new(PolicyKind::AaDrripEbis, 127, 4, 2);
    match short.validate() {
        Err(PolicyError::InvalidConfig { field, reason }) => {
            assert_eq!(field, "sets");
            assert!(reason.contains("128"), "reason: {reason}");
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn non_dueling_kinds_ignore_sampler_limits() {
    let mut config = PolicyConfig::new(PolicyKind::AaRrip, 1, 4, 8);
    config.sampler_size = 0;
    assert!(config.validate().is_ok());

    config.policy = PolicyKind::BipEbis;
    assert!(config.validate().is_ok());
}

#[test]
fn kind_properties() {
    assert!(PolicyKind::Drrip.uses_dueling());
    assert!(PolicyKind::AaDrripEbis.uses_dueling());
    assert!(!PolicyKind::Bip.uses_dueling());
    assert!(!PolicyKind::AaRrip.uses_dueling());

    assert!(PolicyKind::BipEbis.uses_history());
    assert!(PolicyKind::AaDrripEbis.uses_history());
    assert!(!PolicyKind::Drrip.uses_history());

    assert_eq!(PolicyKind::AaDrripEbis.name(), "AA-DRRIP+EbIS");
    assert_eq!(PolicyKind::BipEbis.name(), "BIP+EbIS");
}
