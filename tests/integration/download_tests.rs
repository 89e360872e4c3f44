//! End-to-end pipeline tests against a recording mock client.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::json;

use raster_fetch::{download, Destination, DownloadError, ImageFormat, ServiceError};

use super::test_utils::{ids, sample_context, RecordingClient};

/// Tests that rely on the process-wide working directory take this lock and
/// run inside their own temporary directory.
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn in_temp_cwd<T>(f: impl FnOnce() -> T) -> T {
    let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::current_dir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = f();
    std::env::set_current_dir(original).unwrap();
    result
}

#[test]
fn test_default_destination_single_input() {
    in_temp_cwd(|| {
        let client = RecordingClient::returning(&[("generated.tif", b"tif bytes")]);

        let written = download(
            &ids(&["sceneA"]),
            &ids(&["red", "green", "blue"]),
            &sample_context(),
            "UInt16",
            None,
            Some("tif"),
            &client,
        )
        .unwrap();

        let path = written.expect("a path destination must report where it wrote");
        assert_eq!(path, PathBuf::from("sceneA-red-green-blue.tif"));
        assert_eq!(fs::read(&path).unwrap(), b"tif bytes");
    });
}

#[test]
fn test_default_destination_mosaic() {
    in_temp_cwd(|| {
        let client = RecordingClient::returning(&[("generated.png", b"png bytes")]);

        let written = download(
            &ids(&["sceneA", "sceneB"]),
            &ids(&["nir"]),
            &sample_context(),
            "UInt16",
            None,
            Some("png"),
            &client,
        )
        .unwrap();

        let path = written.unwrap();
        assert_eq!(path, PathBuf::from("mosaic-nir.png"));
        assert_eq!(fs::read(&path).unwrap(), b"png bytes");

        let request = client.last_request().unwrap();
        assert_eq!(request.output_format, ImageFormat::Png);
    });
}

#[test]
fn test_explicit_path_overrides_format_and_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("dir").join("img.jpg");
    let client = RecordingClient::returning(&[("generated.jpg", b"jpeg bytes")]);

    // The format argument is ignored: the `.jpg` extension decides.
    let written = download(
        &ids(&["sceneA"]),
        &ids(&["red"]),
        &sample_context(),
        "Byte",
        Some(Destination::path(&path)),
        Some("tif"),
        &client,
    )
    .unwrap();

    assert_eq!(written, Some(path.clone()));
    assert!(dir.path().join("out").join("dir").is_dir());
    assert_eq!(fs::read(&path).unwrap(), b"jpeg bytes");

    let request = client.last_request().unwrap();
    assert_eq!(request.output_format, ImageFormat::Jpeg);
}

#[test]
fn test_request_carries_context_parameters() {
    let client = RecordingClient::returning(&[("generated.tif", b"bytes")]);
    let mut buf = Vec::new();

    download(
        &ids(&["sceneA"]),
        &ids(&["red", "nir"]),
        &sample_context(),
        "UInt16",
        Some(Destination::stream(&mut buf)),
        Some("tif"),
        &client,
    )
    .unwrap();

    let request = client.last_request().unwrap();
    assert_eq!(request.inputs, ids(&["sceneA"]));
    assert_eq!(request.bands, ids(&["red", "nir"]));
    assert!(request.scales.is_none());
    assert!(!request.save);
    assert_eq!(request.extra.get("resolution"), Some(&json!(30.0)));
    assert_eq!(request.extra.get("srs"), Some(&json!("EPSG:32615")));
}

#[test]
fn test_missing_input_reported_with_its_id() {
    let client = RecordingClient::failing(ServiceError::NotFound("404".to_string()));
    let mut buf = Vec::new();

    let err = download(
        &ids(&["missing1"]),
        &ids(&["red"]),
        &sample_context(),
        "Byte",
        Some(Destination::stream(&mut buf)),
        Some("tif"),
        &client,
    )
    .unwrap_err();

    match err {
        DownloadError::NotFound(msg) => {
            assert!(msg.contains("'missing1'"), "message was: {}", msg);
            assert!(msg.contains("does not exist in the catalog"));
        }
        e => panic!("expected NotFound error, got {:?}", e),
    }
}

#[test]
fn test_rejected_request_dumps_payload() {
    let client = RecordingClient::failing(ServiceError::BadRequest(
        "data_type incompatible with bands".to_string(),
    ));
    let mut buf = Vec::new();

    let err = download(
        &ids(&["sceneA"]),
        &ids(&["red"]),
        &sample_context(),
        "Float64",
        Some(Destination::stream(&mut buf)),
        Some("png"),
        &client,
    )
    .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("data_type incompatible with bands"));
    assert!(text.contains("\"sceneA\""));
    assert!(text.contains("\"Float64\""));
}

#[test]
fn test_two_file_response_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("img.tif");
    let client = RecordingClient::returning(&[("a.tif", b"one"), ("b.tif", b"two")]);

    let err = download(
        &ids(&["sceneA"]),
        &ids(&["red"]),
        &sample_context(),
        "Byte",
        Some(Destination::path(&path)),
        None,
        &client,
    )
    .unwrap_err();

    match err {
        DownloadError::MultipleResults(names) => {
            assert_eq!(names, vec!["a.tif".to_string(), "b.tif".to_string()]);
        }
        e => panic!("expected MultipleResults error, got {:?}", e),
    }
    assert!(!path.exists(), "no file may be written on a shape violation");
}

#[test]
fn test_empty_response_fails() {
    let client = RecordingClient::returning(&[]);
    let mut buf = Vec::new();

    let err = download(
        &ids(&["sceneA"]),
        &ids(&["red"]),
        &sample_context(),
        "Byte",
        Some(Destination::stream(&mut buf)),
        Some("tif"),
        &client,
    )
    .unwrap_err();

    assert!(matches!(err, DownloadError::EmptyResult));
    assert!(buf.is_empty());
}

#[test]
fn test_format_defaults_to_tif_when_absent() {
    in_temp_cwd(|| {
        let client = RecordingClient::returning(&[("generated.tif", b"bytes")]);

        let written = download(
            &ids(&["sceneA"]),
            &ids(&["red"]),
            &sample_context(),
            "UInt16",
            None,
            None,
            &client,
        )
        .unwrap();

        assert_eq!(written, Some(PathBuf::from("sceneA-red.tif")));
        let request = client.last_request().unwrap();
        assert_eq!(request.output_format, ImageFormat::GeoTiff);
    });
}

#[test]
fn test_no_inputs_without_destination_never_calls_service() {
    let client = RecordingClient::returning(&[("generated.tif", b"bytes")]);

    let err = download(
        &[],
        &ids(&["red"]),
        &sample_context(),
        "Byte",
        None,
        Some("tif"),
        &client,
    )
    .unwrap_err();

    assert!(matches!(err, DownloadError::NoInputs));
    assert_eq!(client.call_count(), 0);
}
