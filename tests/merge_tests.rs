//! Integration tests for the merge engine over the public API.

use sbom_unify::{unify, ComponentId, DependencyKind, FilterSpec, Severity, UnifyError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// doc1: a project scan declaring the application root and its dependency.
const DOC_APP: &str = r#"{
    "bomFormat": "CycloneDX",
    "specVersion": "1.5",
    "metadata": {
        "timestamp": "2024-02-01T10:00:00Z",
        "component": {"name": "demo-project"}
    },
    "components": [
        {"bom-ref": "app@1.0", "type": "application", "name": "app", "version": "1.0"},
        {"bom-ref": "lib-a@2.0", "type": "library", "name": "lib-a", "version": "2.0"}
    ],
    "dependencies": [
        {"ref": "app@1.0", "dependsOn": ["lib-a@2.0"]}
    ]
}"#;

/// doc2: a separate scan of lib-a, no root metadata.
const DOC_LIB: &str = r#"{
    "bomFormat": "CycloneDX",
    "specVersion": "1.5",
    "metadata": {"timestamp": "2024-03-01T10:00:00Z"},
    "components": [
        {"bom-ref": "lib-a@2.0", "type": "library", "name": "lib-a", "version": "2.0"},
        {"bom-ref": "lib-b@0.3", "type": "library", "name": "lib-b", "version": "0.3"}
    ],
    "dependencies": [
        {"ref": "lib-a@2.0", "dependsOn": ["lib-b@0.3"]}
    ]
}"#;

#[test]
fn two_document_scenario_classifies_each_hop() {
    init_tracing();
    let model = unify(&[DOC_APP, DOC_LIB]).unwrap();

    assert_eq!(model.total_components, 3);
    assert_eq!(model.roots, vec![ComponentId::from_ref("app@1.0")]);

    let app = model.get(&ComponentId::from_ref("app@1.0")).unwrap();
    let lib_a = model.get(&ComponentId::from_ref("lib-a@2.0")).unwrap();
    let lib_b = model.get(&ComponentId::from_ref("lib-b@0.3")).unwrap();

    assert!(app.is_direct, "root is direct");
    assert!(lib_a.is_direct, "one hop from root is direct");
    assert!(!lib_b.is_direct, "two hops from root is transitive");

    assert_eq!(model.direct_count, 2);
    assert_eq!(model.transitive_count, 1);

    // Tie-breaks: project name from the first declaring document, timestamp
    // from the latest declaring document.
    assert_eq!(model.project_name, "demo-project");
    assert_eq!(model.timestamp.to_rfc3339(), "2024-03-01T10:00:00+00:00");
}

#[test]
fn merging_same_document_twice_is_idempotent() {
    let once = unify(&[DOC_APP]).unwrap();
    let twice = unify(&[DOC_APP, DOC_APP]).unwrap();

    assert_eq!(once.total_components, twice.total_components);
    assert_eq!(once.direct_count, twice.direct_count);
    assert_eq!(once.content_hash, twice.content_hash);
}

#[test]
fn count_invariant_holds() {
    for batch in [vec![DOC_APP], vec![DOC_APP, DOC_LIB], vec![DOC_LIB, DOC_APP]] {
        let model = unify(&batch).unwrap();
        assert_eq!(
            model.direct_count + model.transitive_count,
            model.total_components
        );
        assert_eq!(model.total_components, model.components.len());
    }
}

#[test]
fn roots_are_never_empty_for_non_empty_input() {
    // Structural inference path
    let model = unify(&[DOC_APP, DOC_LIB]).unwrap();
    assert!(!model.roots.is_empty());

    // Degenerate path: components but no dependencies array at all
    let no_deps = r#"{
        "bomFormat": "CycloneDX",
        "components": [
            {"bom-ref": "x", "type": "library", "name": "x", "version": "1.0"},
            {"bom-ref": "y", "type": "library", "name": "y", "version": "2.0"}
        ]
    }"#;
    let model = unify(&[no_deps]).unwrap();
    assert_eq!(model.roots.len(), 2);
    assert_eq!(model.direct_count, 2);
    assert_eq!(model.transitive_count, 0);
    assert!(model.components.values().all(|c| c.is_direct));
}

#[test]
fn cycle_with_no_sources_falls_back_to_all_direct() {
    let cycle = r#"{
        "components": [
            {"bom-ref": "a", "type": "library", "name": "a"},
            {"bom-ref": "b", "type": "library", "name": "b"}
        ],
        "dependencies": [
            {"ref": "a", "dependsOn": ["b"]},
            {"ref": "b", "dependsOn": ["a"]}
        ]
    }"#;
    let model = unify(&[cycle]).unwrap();

    assert_eq!(model.roots.len(), 2);
    assert_eq!(model.direct_count, 2);
    assert_eq!(model.transitive_count, 0);
}

#[test]
fn direct_marking_stops_after_one_hop() {
    // R -> [A, B], A -> [C]: A and B direct, C transitive.
    let doc = r#"{
        "components": [
            {"bom-ref": "r", "type": "application", "name": "r"},
            {"bom-ref": "a", "type": "library", "name": "a"},
            {"bom-ref": "b", "type": "library", "name": "b"},
            {"bom-ref": "c", "type": "library", "name": "c"}
        ],
        "dependencies": [
            {"ref": "r", "dependsOn": ["a", "b"]},
            {"ref": "a", "dependsOn": ["c"]}
        ]
    }"#;
    let model = unify(&[doc]).unwrap();

    assert!(model.get(&ComponentId::from_ref("a")).unwrap().is_direct);
    assert!(model.get(&ComponentId::from_ref("b")).unwrap().is_direct);
    assert!(
        !model.get(&ComponentId::from_ref("c")).unwrap().is_direct,
        "two hops from any root must not be marked direct"
    );
}

#[test]
fn first_document_wins_on_conflicting_scalars() {
    let v1 = r#"{
        "components": [{"bom-ref": "pkg", "type": "library", "name": "pkg", "version": "1.0.0"}]
    }"#;
    let v2 = r#"{
        "components": [{"bom-ref": "pkg", "type": "library", "name": "pkg", "version": "2.0.0"}]
    }"#;

    let model = unify(&[v1, v2]).unwrap();
    let pkg = model.get(&ComponentId::from_ref("pkg")).unwrap();
    assert_eq!(pkg.version.as_deref(), Some("1.0.0"));

    let model = unify(&[v2, v1]).unwrap();
    let pkg = model.get(&ComponentId::from_ref("pkg")).unwrap();
    assert_eq!(pkg.version.as_deref(), Some("2.0.0"));
}

#[test]
fn dangling_edges_are_kept_and_resolve_to_nothing() {
    let doc = r#"{
        "components": [{"bom-ref": "x", "type": "library", "name": "x"}],
        "dependencies": [{"ref": "x", "dependsOn": ["y"]}]
    }"#;
    let model = unify(&[doc]).unwrap();

    let x = model.get(&ComponentId::from_ref("x")).unwrap();
    assert_eq!(x.dependencies, vec![ComponentId::from_ref("y")]);
    assert!(model.get(&ComponentId::from_ref("y")).is_none());

    // y counts as depended-upon but never becomes a component; x stays the
    // sole root.
    assert_eq!(model.roots, vec![ComponentId::from_ref("x")]);
    assert_eq!(model.total_components, 1);
}

#[test]
fn identity_synthesized_when_bom_ref_missing() {
    let doc = r#"{
        "components": [
            {"type": "library", "name": "left-pad", "version": "1.3.0"},
            {"type": "library", "name": "left-pad", "version": "1.3.0"}
        ]
    }"#;
    let model = unify(&[doc]).unwrap();

    assert_eq!(model.total_components, 1);
    assert!(model.get(&ComponentId::from_ref("left-pad@1.3.0")).is_some());
}

#[test]
fn embedded_vulnerabilities_land_on_their_components() {
    let doc = r#"{
        "components": [
            {"bom-ref": "log4j", "type": "library", "name": "log4j-core", "version": "2.14.1"},
            {"bom-ref": "other", "type": "library", "name": "other", "version": "1.0"}
        ],
        "vulnerabilities": [
            {
                "id": "CVE-2021-44228",
                "description": "JNDI lookup remote code execution",
                "recommendation": "Upgrade to 2.17.1 or later",
                "ratings": [{"score": 10.0, "severity": "critical"}],
                "affects": [{"ref": "log4j"}, {"ref": "nonexistent"}]
            }
        ]
    }"#;
    let model = unify(&[doc]).unwrap();

    let log4j = model.get(&ComponentId::from_ref("log4j")).unwrap();
    assert_eq!(log4j.vulnerabilities.len(), 1);
    assert_eq!(log4j.vulnerabilities[0].id, "CVE-2021-44228");
    assert_eq!(log4j.max_severity(), Some(Severity::Critical));
    assert_eq!(
        log4j.vulnerabilities[0].remediation.as_deref(),
        Some("Upgrade to 2.17.1 or later")
    );

    let other = model.get(&ComponentId::from_ref("other")).unwrap();
    assert!(other.vulnerabilities.is_empty());

    // Severity and CVE filters see the annotation.
    let hits = FilterSpec::new().with_severity(Severity::Critical).apply(&model);
    assert_eq!(hits.len(), 1);
    let hits = FilterSpec::new().with_cve("44228").apply(&model);
    assert_eq!(hits.len(), 1);
}

#[test]
fn path_and_license_recovered_from_record() {
    let doc = r#"{
        "components": [{
            "bom-ref": "pkg",
            "type": "library",
            "name": "pkg",
            "version": "1.0",
            "purl": "pkg:npm/pkg@1.0",
            "licenses": [{"license": {"id": "Apache-2.0"}}],
            "properties": [
                {"name": "syft:location:0:path", "value": "/usr/lib/node_modules/pkg"}
            ]
        }]
    }"#;
    let model = unify(&[doc]).unwrap();

    let pkg = model.get(&ComponentId::from_ref("pkg")).unwrap();
    assert_eq!(pkg.license, "Apache-2.0");
    assert_eq!(pkg.path.as_deref(), Some("/usr/lib/node_modules/pkg"));
    assert_eq!(pkg.purl.as_deref(), Some("pkg:npm/pkg@1.0"));
}

#[test]
fn malformed_document_fails_the_whole_batch() {
    let err = unify(&[DOC_APP, "this is not json"]).unwrap_err();

    match &err {
        UnifyError::Parse { context, .. } => {
            assert!(
                context.contains("document #2"),
                "error should identify the failing input: {context}"
            );
        }
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn repeated_merges_are_deterministic() {
    let first = unify(&[DOC_APP, DOC_LIB]).unwrap();
    let second = unify(&[DOC_APP, DOC_LIB]).unwrap();

    assert_eq!(first.content_hash, second.content_hash);
    let first_ids: Vec<_> = first.components.keys().cloned().collect();
    let second_ids: Vec<_> = second.components.keys().cloned().collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn filtered_views_compose_with_the_merge() {
    let model = unify(&[DOC_APP, DOC_LIB]).unwrap();

    let direct = FilterSpec::new().with_kind(DependencyKind::Direct).apply(&model);
    assert_eq!(direct.len(), 2);

    let named = FilterSpec::new().with_query("lib-b").apply(&model);
    assert_eq!(named.len(), 1);
    assert!(!named[0].is_direct);
}
