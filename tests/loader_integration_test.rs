//! Payload decoding end to end.

mod common;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use metrics_viewer::loader::{load, load_with, pack_json, pack_script, LoaderOptions};
use metrics_viewer::DecodeError;
use pretty_assertions::assert_eq;

#[test]
fn test_report_round_trip() {
    let dataset = load(common::report_payload().as_bytes()).unwrap();

    assert_eq!(dataset.metadata.name, "ledger");
    assert_eq!(dataset.metadata.version, "1.2.0");
    assert_eq!(dataset.packages.len(), 3);
    assert_eq!(dataset.file_count(), 3);
    assert_eq!(dataset.method_count(), 5);
    assert_eq!(dataset.rollup.core_stats.total_loc, 420);

    let post = &dataset.packages[0].files[0].methods[0];
    assert!(!post.has_scaladoc, "string flags are normalised");
    assert_eq!(post.complexity, Some(25.0));
    assert_eq!(dataset.packages[0].files[1].methods[0].complexity, None);
}

#[test]
fn test_primary_and_fallback_inflaters_agree() {
    let payload = common::report_payload();
    let fast = load_with(payload.as_bytes(), &LoaderOptions { fast_path: true }).unwrap();
    let fallback = load_with(payload.as_bytes(), &LoaderOptions { fast_path: false }).unwrap();
    assert_eq!(fast, fallback);
}

#[test]
fn test_invalid_base64() {
    let err = load(b"%%% not base64 %%%").unwrap_err();
    assert!(matches!(err, DecodeError::Base64(_)), "{err:?}");
    assert!(err.terminal_message().starts_with("Failed to load metrics data."));
}

#[test]
fn test_uncompressed_payload() {
    let payload = STANDARD.encode(b"{\"packageStats\": []}");
    let err = load(payload.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownCompression), "{err:?}");
}

#[test]
fn test_truncated_stream_fails_on_both_paths() {
    let payload = common::report_payload();
    let mut bytes = STANDARD.decode(payload).unwrap();
    bytes.truncate(bytes.len() / 2);
    let truncated = STANDARD.encode(bytes);

    for fast_path in [true, false] {
        let result = load_with(truncated.as_bytes(), &LoaderOptions { fast_path });
        assert!(result.is_err(), "fast_path = {fast_path}");
    }
}

#[test]
fn test_script_without_document() {
    let payload = pack_script("let total = 5;").unwrap();
    let err = load(payload.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::MissingDocument), "{err:?}");
}

#[test]
fn test_malformed_document() {
    let payload = pack_script("const metricsData = {\"packageStats\": 3};").unwrap();
    let err = load(payload.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::Parse(_)), "{err:?}");
}

#[test]
fn test_null_metrics_load_as_zero() {
    let payload = pack_json(indoc::indoc! {r#"
        {
          "metadata": {"name": "sparse"},
          "rollup": {"coreStats": {"totalLoc": null}, "avgNestingDepth": null},
          "packageStats": [{
            "metadata": {"name": "sparse.core"},
            "rollup": {"totalCount": null},
            "fileStats": [{
              "metadata": {"fileName": "A.scala", "linesOfCode": null, "fileSizeBytes": null},
              "rollup": null,
              "memberStats": null,
              "methodStats": [{
                "metadata": {"signature": "run(): Unit", "linesOfCode": null},
                "complexity": null,
                "nestingDepth": null,
                "parameterStats": {"totalParams": null}
              }]
            }]
          }]
        }
    "#})
    .unwrap();

    let dataset = load(payload.as_bytes()).unwrap();
    assert_eq!(dataset.rollup.core_stats.total_loc, 0);
    let file = &dataset.packages[0].files[0];
    assert_eq!(file.metadata.lines_of_code, 0);
    assert!(file.members.is_empty());
    assert_eq!(file.methods[0].nesting_depth, 0);
    assert_eq!(file.methods[0].parameter_stats.total_params, 0);
}

#[test]
fn test_async_load_matches_sync() {
    let payload = common::report_payload().into_bytes();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap();
    let dataset = runtime
        .block_on(metrics_viewer::loader::load_async(
            payload.clone(),
            LoaderOptions::default(),
        ))
        .unwrap();
    assert_eq!(dataset, load(&payload).unwrap());
}
