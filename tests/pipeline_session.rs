use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use mlstudio::backend::{TrainOutcome, UploadOutcome};
use mlstudio::config::AppConfig;
use mlstudio::dataset::DatasetPreview;
use mlstudio::egui_app::controller::{StudioController, apply_train_outcome, apply_upload_outcome};
use mlstudio::egui_app::view_model;

// 1x1 opaque PNG, small enough to inline.
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

fn controller_for(base_url: &str) -> StudioController {
    StudioController::new(&AppConfig {
        api_base_url: base_url.to_string(),
    })
}

/// Serve one HTTP request with the given JSON body, then shut down.
fn serve_json_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    });
    format!("http://{addr}")
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

fn drain_until_settled(controller: &mut StudioController) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.pending_requests() > 0 {
        controller.poll_background_jobs();
        assert!(Instant::now() < deadline, "worker never reported back");
        thread::sleep(Duration::from_millis(10));
    }
    controller.poll_background_jobs();
}

#[test]
fn upload_round_trip_replaces_columns_and_preview() {
    let base_url = serve_json_once(
        r#"{"dataset_id":"ds-7","preview":{"headers":["a","b","c"],"rows":[{"a":"1","b":"2","c":"3"}],"shape":[2,3]}}"#,
    );
    let mut controller = controller_for(&base_url);
    controller.ui.session.target_col = "stale".into();

    let dir = tempfile::tempdir().expect("tempdir");
    let csv = dir.path().join("data.csv");
    std::fs::write(&csv, "a,b,c\n1,2,3\n4,5,6\n").expect("write csv");
    controller.upload_dataset(&csv);
    assert_eq!(controller.ui.status.text, "Uploading...");

    drain_until_settled(&mut controller);
    let session = &controller.ui.session;
    assert_eq!(session.dataset_id.as_deref(), Some("ds-7"));
    assert_eq!(session.all_columns, vec!["a", "b", "c"]);
    let preview = session.preview.as_ref().expect("preview present");
    assert_eq!(preview.shape, Some((2, 3)));
    assert_eq!(preview.rows[0]["b"], "2");
    assert!(session.target_col.is_empty(), "stale target must reset");
    assert_eq!(controller.ui.status.text, "Uploaded to backend");
}

#[test]
fn split_round_trip_formats_both_shapes() {
    let base_url = serve_json_once(r#"{"train_shape":[398,30],"test_shape":[171,30]}"#);
    let mut controller = controller_for(&base_url);
    controller.ui.session.all_columns = vec!["label".into()];
    controller.set_target_column("label");
    controller.run_split();
    assert_eq!(controller.ui.status.text, "Splitting dataset...");

    drain_until_settled(&mut controller);
    assert_eq!(
        controller.ui.status.text,
        "Split done — Train 398,30, Test 171,30"
    );
}

#[test]
fn server_error_text_is_surfaced_verbatim() {
    let base_url = serve_json_once(r#"{"error":"no dataset uploaded"}"#);
    let mut controller = controller_for(&base_url);
    controller.ui.session.all_columns = vec!["label".into()];
    controller.set_target_column("label");
    controller.choose_standardize();
    controller.run_preprocess();

    drain_until_settled(&mut controller);
    assert_eq!(controller.ui.status.text, "no dataset uploaded");
}

#[test]
fn local_validation_issues_no_request() {
    let mut controller = controller_for("http://127.0.0.1:1");
    controller.run_preprocess();
    assert_eq!(controller.ui.status.text, "Please select target column first");
    assert_eq!(controller.pending_requests(), 0);

    controller.ui.session.all_columns = vec!["y".into()];
    controller.set_target_column("y");
    controller.run_preprocess();
    assert_eq!(controller.ui.status.text, "Select a preprocessing method");
    assert_eq!(controller.pending_requests(), 0);
}

#[test]
fn preprocessing_methods_stay_mutually_exclusive() {
    let mut controller = controller_for("http://127.0.0.1:1");
    controller.choose_standardize();
    controller.choose_normalize();
    assert!(controller.ui.session.normalize);
    assert!(!controller.ui.session.standardize);
    controller.choose_standardize();
    assert!(controller.ui.session.standardize);
    assert!(!controller.ui.session.normalize);
}

#[test]
fn training_outcome_stores_accuracy_and_decoded_chart() {
    let mut controller = controller_for("http://127.0.0.1:1");
    apply_train_outcome(
        &mut controller,
        TrainOutcome {
            accuracy: 0.87,
            confusion_png_base64: TINY_PNG_BASE64.to_string(),
        },
    );
    let session = &controller.ui.session;
    assert_eq!(view_model::format_accuracy(session.accuracy.unwrap()), "87.00%");
    assert_eq!(session.confusion_png_base64.as_deref(), Some(TINY_PNG_BASE64));
    assert!(session.confusion_image.is_some());
    assert_eq!(session.confusion_revision, 1);
    assert_eq!(controller.ui.status.text, "Training complete");
}

#[test]
fn columns_and_preview_replace_together() {
    let mut controller = controller_for("http://127.0.0.1:1");
    let first = DatasetPreview {
        headers: vec!["a".into(), "b".into()],
        rows: Vec::new(),
        shape: None,
    };
    apply_upload_outcome(
        &mut controller,
        UploadOutcome {
            dataset_id: None,
            preview: first,
        },
    );
    let second = DatasetPreview {
        headers: vec!["x".into()],
        rows: Vec::new(),
        shape: Some((5, 1)),
    };
    apply_upload_outcome(
        &mut controller,
        UploadOutcome {
            dataset_id: Some("ds-2".into()),
            preview: second,
        },
    );
    let session = &controller.ui.session;
    assert_eq!(session.all_columns, vec!["x"]);
    assert_eq!(
        session.preview.as_ref().map(|p| p.headers.clone()),
        Some(vec!["x".to_string()])
    );
}
