//! Tests for the role registry reporter.

mod support;

use std::collections::HashMap;

use chainkeeper_core::report::{build_role_report, render_text};
use chainkeeper_core::roles::RoleKey;
use support::{MockRegistry, addr};

const AA: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const BB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const CC: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

#[test]
fn report_preserves_registry_iteration_order() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("ORDER_KEEPER"), &[AA, BB]);
    registry.add_role(RoleKey::from_name("CONTROLLER"), &[CC]);

    let report = build_role_report(&registry, &HashMap::new(), 100).unwrap();

    assert_eq!(report.roles.len(), 2);
    assert_eq!(report.roles[0].name, Some("ORDER_KEEPER"));
    assert_eq!(report.roles[1].name, Some("CONTROLLER"));
    let members: Vec<_> = report.roles[0]
        .members
        .iter()
        .map(|m| m.account.clone())
        .collect();
    assert_eq!(members, vec![addr(AA), addr(BB)]);
}

#[test]
fn empty_role_yields_entry_with_no_members() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("FEE_KEEPER"), &[]);

    let report = build_role_report(&registry, &HashMap::new(), 100).unwrap();

    assert_eq!(report.roles.len(), 1);
    assert!(report.roles[0].members.is_empty());
}

#[test]
fn labels_resolve_from_configured_assignments() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("ORDER_KEEPER"), &[AA, BB]);
    let labels = HashMap::from([(addr(AA), "keeper-1".to_string())]);

    let report = build_role_report(&registry, &labels, 100).unwrap();

    let members = &report.roles[0].members;
    assert_eq!(members[0].label.as_deref(), Some("keeper-1"));
    assert_eq!(members[1].label, None);
}

#[test]
fn unknown_role_is_reported_by_raw_key() {
    let registry = MockRegistry::default();
    let unknown = RoleKey::from_name("SOME_CUSTOM_ROLE");
    registry.add_role(unknown, &[AA]);

    let report = build_role_report(&registry, &HashMap::new(), 100).unwrap();

    assert_eq!(report.roles[0].name, None);
    assert_eq!(report.roles[0].display_name(), unknown.to_string());
}

#[test]
fn text_rendering_indents_members_and_appends_labels() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("ORDER_KEEPER"), &[AA, BB]);
    let labels = HashMap::from([(addr(AA), "keeper-1".to_string())]);

    let report = build_role_report(&registry, &labels, 100).unwrap();
    let text = render_text(&report);

    let expected = format!("ORDER_KEEPER:\n\t{} (keeper-1)\n\t{}\n", addr(AA), addr(BB));
    assert_eq!(text, expected);
}

#[test]
fn role_read_failure_aborts_the_report() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("ORDER_KEEPER"), &[AA]);
    registry.fail_role_read.set(true);

    assert!(build_role_report(&registry, &HashMap::new(), 100).is_err());
}

#[test]
fn member_read_failure_aborts_the_report() {
    let registry = MockRegistry::default();
    registry.add_role(RoleKey::from_name("ORDER_KEEPER"), &[AA]);
    registry.fail_member_read.set(true);

    assert!(build_role_report(&registry, &HashMap::new(), 100).is_err());
}

#[test]
fn members_are_paginated_across_pages() {
    let registry = MockRegistry::default();
    let many: Vec<String> = (0..7)
        .map(|i| format!("0x{:040x}", 0x1000 + i))
        .collect();
    let refs: Vec<&str> = many.iter().map(|s| s.as_str()).collect();
    registry.add_role(RoleKey::from_name("CONTROLLER"), &refs);

    // Page size smaller than the member count forces multiple reads.
    let report = build_role_report(&registry, &HashMap::new(), 3).unwrap();

    let members: Vec<_> = report.roles[0]
        .members
        .iter()
        .map(|m| m.account.clone())
        .collect();
    let expected: Vec<_> = refs.iter().map(|s| addr(s)).collect();
    assert_eq!(members, expected);
    assert!(report.warnings.is_empty());
}
