//! Factory and Calling-Convention Tests.
//!
//! `build` must pick the right variant and refuse bad configurations; the
//! per-access entry points must reject out-of-range arguments loudly.

use rripsim_policy::{Access, CacheLine, PolicyConfig, PolicyError, PolicyKind, build};
use rstest::rstest;

#[rstest]
#[case(PolicyKind::Bip)]
#[case(PolicyKind::BipEbis)]
#[case(PolicyKind::AaRrip)]
#[case(PolicyKind::Drrip)]
#[case(PolicyKind::AaDrripEbis)]
fn builds_requested_kind(#[case] kind: PolicyKind) {
    let config = PolicyConfig::new(kind, 256, 8, 2);
    let policy = build(&config).unwrap();
    assert_eq!(policy.kind(), kind);
    assert_eq!(policy.config(), &config);
    assert_eq!(policy.stats().policy, kind.name());
    assert_eq!(policy.stats().cpus(), 2);
}

#[test]
fn build_rejects_invalid_config() {
    let config = PolicyConfig::new(PolicyKind::Bip, 4, 0, 1);
    let err = build(&config).unwrap_err();
    assert!(matches!(err, PolicyError::InvalidConfig { field: "ways", .. }));
}

#[test]
fn build_rejects_too_few_sets_for_dueling() {
    let config = PolicyConfig::new(PolicyKind::Drrip, 63, 4, 1);
    let err = build(&config).unwrap_err();
    assert!(matches!(err, PolicyError::InvalidConfig { field: "sets", .. }));
}

#[test]
fn initialize_resets_every_line() {
    let config = PolicyConfig::new(PolicyKind::AaRrip, 3, 4, 1);
    let policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::with_state(7, 0, 9); 12];
    policy.initialize(&mut lines);

    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.owner(), 0);
        assert_eq!(line.rrpv(), 3);
        assert_eq!(line.lru_rank(), i % 4);
    }
}

#[test]
#[should_panic(expected = "line array must hold sets x ways entries")]
fn initialize_rejects_wrong_length() {
    let config = PolicyConfig::new(PolicyKind::Bip, 2, 4, 1);
    let policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::default(); 7];
    policy.initialize(&mut lines);
}

#[test]
#[should_panic(expected = "cpu 2 out of range")]
fn rejects_unknown_cpu() {
    let config = PolicyConfig::new(PolicyKind::AaRrip, 4, 4, 2);
    let mut policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::new(0, 3); 4];
    let _ = policy.find_victim(&mut lines, &Access::load(2, 0, 0));
}

#[test]
#[should_panic(expected = "set 4 out of range")]
fn rejects_unknown_set() {
    let config = PolicyConfig::new(PolicyKind::Bip, 4, 4, 1);
    let mut policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::new(0, 3); 4];
    policy.update_state(&mut lines, 0, &Access::load(0, 4, 0), false);
}

#[test]
#[should_panic(expected = "way 4 out of range")]
fn rejects_unknown_way() {
    let config = PolicyConfig::new(PolicyKind::Drrip, 64, 4, 1);
    let mut policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::new(0, 3); 4];
    policy.update_state(&mut lines, 4, &Access::load(0, 0, 0), true);
}

#[test]
#[should_panic(expected = "expected the 4 lines of one set")]
fn rejects_partial_set() {
    let config = PolicyConfig::new(PolicyKind::AaDrripEbis, 64, 4, 1);
    let mut policy = build(&config).unwrap();
    let mut lines = vec![CacheLine::new(0, 3); 3];
    let _ = policy.find_victim(&mut lines, &Access::load(0, 0, 0));
}

#[test]
fn final_stats_names_the_policy() {
    let config = PolicyConfig::new(PolicyKind::BipEbis, 4, 4, 1);
    let policy = build(&config).unwrap();
    let report = policy.final_stats();
    assert!(report.contains("REPLACEMENT STATISTICS (BIP+EbIS)"), "{report}");
}
