use std::sync::Arc;

use stackscrub::{MetadataTable, MethodRecord, RawFrame, ScrubOptions, StackSnapshot, TypeRecord};

fn snapshot_for_paths(paths: &[Option<&str>]) -> StackSnapshot {
    let mut table = MetadataTable::new();
    let ty = table.add_type(TypeRecord::new("Worker").with_namespace("Acme.Jobs"));

    let frames = paths
        .iter()
        .enumerate()
        .map(|(i, path)| RawFrame {
            file_path: path.map(str::to_owned),
            line_number: u32::try_from(i).unwrap() + 1,
            column_number: 0,
            method: Some(table.add_method(MethodRecord::new(format!("step_{i}")).declared_on(ty))),
        })
        .collect();

    StackSnapshot::new(Arc::new(table), frames)
}

fn folded_paths(snapshot: &StackSnapshot) -> Vec<Option<String>> {
    snapshot
        .parse(&ScrubOptions::default())
        .into_iter()
        .map(|f| f.file_path)
        .collect()
}

#[test]
fn test_recurring_segments_fold_and_unique_ones_stay() {
    let snapshot = snapshot_for_paths(&[
        Some("/home/builder/acme/src/billing/invoice.rs"),
        Some("/home/builder/acme/src/payments/gateway.rs"),
        Some("/home/builder/acme/tests/integration/billing_test.rs"),
    ]);

    let paths = folded_paths(&snapshot);
    // home, builder, acme recur in all three paths; src recurs in two;
    // tests appears once and is kept.
    assert_eq!(paths[0].as_deref(), Some("/billing/invoice.rs"));
    assert_eq!(paths[1].as_deref(), Some("/payments/gateway.rs"));
    assert_eq!(paths[2].as_deref(), Some("/tests/integration/billing_test.rs"));
}

#[test]
fn test_single_file_path_is_never_folded() {
    let snapshot = snapshot_for_paths(&[
        Some("/home/builder/acme/src/billing/invoice.rs"),
        None,
        None,
    ]);

    let paths = folded_paths(&snapshot);
    assert_eq!(
        paths[0].as_deref(),
        Some("/home/builder/acme/src/billing/invoice.rs")
    );
    assert_eq!(paths[1], None);
    assert_eq!(paths[2], None);
}

#[test]
fn test_identical_paths_fold_against_each_other() {
    let snapshot = snapshot_for_paths(&[
        Some(r"C:\Work\Solution\Project\Recursion.cs"),
        Some(r"C:\Work\Solution\Project\Recursion.cs"),
        Some(r"C:\Work\Solution\Project\Recursion.cs"),
    ]);

    let paths = folded_paths(&snapshot);
    for path in paths {
        assert_eq!(path.as_deref(), Some(r"Project\Recursion.cs"));
    }
}

#[test]
fn test_windows_and_unix_paths_fold_independently() {
    let snapshot = snapshot_for_paths(&[
        Some(r"C:\Build\Agent\Work\Sources\Billing\Invoice.cs"),
        Some(r"C:\Build\Agent\Work\Sources\Payments\Gateway.cs"),
        Some("/opt/ci/cache/vendored/http/client.rs"),
        Some("/opt/ci/cache/vendored/json/decode.rs"),
    ]);

    let paths = folded_paths(&snapshot);
    assert_eq!(paths[0].as_deref(), Some(r"Billing\Invoice.cs"));
    assert_eq!(paths[1].as_deref(), Some(r"Payments\Gateway.cs"));
    assert_eq!(paths[2].as_deref(), Some("/http/client.rs"));
    assert_eq!(paths[3].as_deref(), Some("/json/decode.rs"));
}

#[test]
fn test_bare_filenames_are_left_alone() {
    let snapshot = snapshot_for_paths(&[
        Some("Invoice.cs"),
        Some("Invoice.cs"),
        Some("/home/builder/acme/src/billing/invoice.rs"),
    ]);

    let paths = folded_paths(&snapshot);
    assert_eq!(paths[0].as_deref(), Some("Invoice.cs"));
    assert_eq!(paths[1].as_deref(), Some("Invoice.cs"));
}

#[test]
fn test_folding_applies_to_filtered_raw_frames_view() {
    let snapshot = snapshot_for_paths(&[
        Some("/home/builder/acme/src/billing/invoice.rs"),
        Some("/home/builder/acme/src/payments/gateway.rs"),
    ]);

    let raws = snapshot.filtered_raw_frames(&ScrubOptions::default());
    assert_eq!(raws[0].file_path.as_deref(), Some("/billing/invoice.rs"));
    assert_eq!(raws[1].file_path.as_deref(), Some("/payments/gateway.rs"));

    // The snapshot's own raw frames keep their full paths.
    assert_eq!(
        snapshot.frames()[0].file_path.as_deref(),
        Some("/home/builder/acme/src/billing/invoice.rs")
    );
}
