//! Client for the remote pipeline backend.
//!
//! Four independent operations: upload, preprocess, split, train. Every call
//! is a multipart/form-data POST answered with JSON that may carry an `error`
//! field. There are no retries, no timeouts and no cancellation; each call is
//! fired once and reported as-is.

use std::collections::HashMap;
use std::fmt;

use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use crate::dataset::DatasetPreview;
use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Preprocessing methods the backend understands. Mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreprocessMethod {
    /// Z-score standardization.
    Standardize,
    /// Min-max normalization.
    Normalize,
}

impl PreprocessMethod {
    /// Value sent in the `method` form field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Standardize => "standard",
            Self::Normalize => "normalize",
        }
    }
}

/// Models the backend can train.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelKind {
    /// Logistic regression.
    #[default]
    Logistic,
    /// Decision tree classifier.
    Tree,
}

impl ModelKind {
    /// Value sent in the `model_name` form field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::Tree => "tree",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Logistic => "Logistic Regression",
            Self::Tree => "Decision Tree",
        }
    }
}

/// Errors surfaced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend reported an error message in the response body.
    #[error("{0}")]
    Server(String),
    /// Non-OK status with no error field in the body.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request never completed.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

/// Successful `/upload` response.
#[derive(Clone, Debug)]
pub struct UploadOutcome {
    /// Identifier of the dataset now held by the backend, when reported.
    pub dataset_id: Option<String>,
    /// Authoritative preview of the parsed dataset.
    pub preview: DatasetPreview,
}

/// Successful `/split` response.
#[derive(Clone, Debug)]
pub struct SplitOutcome {
    /// Dimensions of the training partition.
    pub train_shape: Shape,
    /// Dimensions of the test partition.
    pub test_shape: Shape,
}

/// Successful `/train` response.
#[derive(Clone, Debug)]
pub struct TrainOutcome {
    /// Accuracy on the held-out partition, as a fraction in [0, 1].
    pub accuracy: f64,
    /// Confusion-matrix chart as a base64-encoded PNG.
    pub confusion_png_base64: String,
}

/// Array dimensions as reported by the backend, rendered as `398,30`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Shape(pub Vec<u64>);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", dims.join(","))
    }
}

/// Send a dataset file to `/upload` and return the backend-held preview.
pub fn upload(
    base_url: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<UploadOutcome, BackendError> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")
        .map_err(|err| BackendError::Transport(err.to_string()))?;
    let form = Form::new().part("file", part);
    let (status, body) = post_form(base_url, "/upload", form)?;
    check_response(status, &body)?;
    parse_upload_response(&body)
}

/// Ask the backend to preprocess the held dataset.
pub fn preprocess(
    base_url: &str,
    target_col: &str,
    method: PreprocessMethod,
) -> Result<(), BackendError> {
    let form = Form::new()
        .text("method", method.wire_name())
        .text("target_col", target_col.to_string());
    let (status, body) = post_form(base_url, "/preprocess", form)?;
    check_response(status, &body)
}

/// Ask the backend to split the held dataset into train/test partitions.
pub fn split(
    base_url: &str,
    target_col: &str,
    test_size: f32,
) -> Result<SplitOutcome, BackendError> {
    let form = Form::new()
        .text("test_size", test_size.to_string())
        .text("target_col", target_col.to_string());
    let (status, body) = post_form(base_url, "/split", form)?;
    check_response(status, &body)?;
    parse_split_response(&body)
}

/// Ask the backend to train a model on the current split.
pub fn train(
    base_url: &str,
    target_col: &str,
    model: ModelKind,
) -> Result<TrainOutcome, BackendError> {
    let form = Form::new()
        .text("model_name", model.wire_name())
        .text("target_col", target_col.to_string());
    let (status, body) = post_form(base_url, "/train", form)?;
    check_response(status, &body)?;
    parse_train_response(&body)
}

fn post_form(
    base_url: &str,
    path: &str,
    form: Form,
) -> Result<(reqwest::StatusCode, String), BackendError> {
    let url = format!("{}{path}", base_url.trim_end_matches('/'));
    let response = http_client::client()
        .post(&url)
        .multipart(form)
        .send()
        .map_err(|err| BackendError::Transport(err.to_string()))?;
    let status = response.status();
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| BackendError::Transport(err.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|err| BackendError::Json(err.to_string()))?;
    Ok((status, body))
}

#[derive(Deserialize)]
struct ErrorProbe {
    error: Option<String>,
}

/// Reject responses carrying an `error` field or a non-OK status.
///
/// The backend reports failures both ways: an `error` field with HTTP 200,
/// or a bare error status. The field wins so its message can be surfaced
/// verbatim.
fn check_response(status: reqwest::StatusCode, body: &str) -> Result<(), BackendError> {
    let reported = serde_json::from_str::<ErrorProbe>(body)
        .ok()
        .and_then(|probe| probe.error);
    if let Some(message) = reported {
        return Err(BackendError::Server(message));
    }
    if !status.is_success() {
        return Err(BackendError::Status(status.as_u16()));
    }
    Ok(())
}

fn parse_upload_response(body: &str) -> Result<UploadOutcome, BackendError> {
    #[derive(Deserialize)]
    struct PreviewWire {
        headers: Vec<String>,
        #[serde(default)]
        rows: Vec<serde_json::Map<String, serde_json::Value>>,
        #[serde(default)]
        shape: Option<(usize, usize)>,
    }
    #[derive(Deserialize)]
    struct Wire {
        #[serde(default)]
        dataset_id: Option<String>,
        preview: PreviewWire,
    }

    let wire: Wire =
        serde_json::from_str(body).map_err(|err| BackendError::Json(err.to_string()))?;
    let rows = wire
        .preview
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(key, value)| (key, json_cell_text(value)))
                .collect::<HashMap<String, String>>()
        })
        .collect();
    let mut preview = DatasetPreview {
        headers: wire.preview.headers,
        rows,
        shape: wire.preview.shape,
    };
    preview.sanitize();
    Ok(UploadOutcome {
        dataset_id: wire.dataset_id,
        preview,
    })
}

fn parse_split_response(body: &str) -> Result<SplitOutcome, BackendError> {
    #[derive(Deserialize)]
    struct Wire {
        train_shape: Shape,
        test_shape: Shape,
    }
    let wire: Wire =
        serde_json::from_str(body).map_err(|err| BackendError::Json(err.to_string()))?;
    Ok(SplitOutcome {
        train_shape: wire.train_shape,
        test_shape: wire.test_shape,
    })
}

fn parse_train_response(body: &str) -> Result<TrainOutcome, BackendError> {
    #[derive(Deserialize)]
    struct Wire {
        accuracy: f64,
        confusion_matrix_base64: String,
    }
    let wire: Wire =
        serde_json::from_str(body).map_err(|err| BackendError::Json(err.to_string()))?;
    Ok(TrainOutcome {
        accuracy: wire.accuracy,
        confusion_png_base64: wire.confusion_matrix_base64,
    })
}

/// Render a JSON cell for the preview table. Numbers and booleans keep their
/// JSON text form; null becomes the empty string.
fn json_cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn wire_names_match_backend_contract() {
        assert_eq!(PreprocessMethod::Standardize.wire_name(), "standard");
        assert_eq!(PreprocessMethod::Normalize.wire_name(), "normalize");
        assert_eq!(ModelKind::Logistic.wire_name(), "logistic");
        assert_eq!(ModelKind::Tree.wire_name(), "tree");
    }

    #[test]
    fn shape_displays_as_comma_joined_dims() {
        assert_eq!(Shape(vec![398, 30]).to_string(), "398,30");
        assert_eq!(Shape(vec![171]).to_string(), "171");
    }

    #[test]
    fn error_field_wins_even_on_ok_status() {
        let err = check_response(reqwest::StatusCode::OK, r#"{"error":"Upload dataset first"}"#)
            .unwrap_err();
        assert!(matches!(err, BackendError::Server(message) if message == "Upload dataset first"));
    }

    #[test]
    fn non_ok_status_without_error_field_maps_to_status() {
        let err = check_response(reqwest::StatusCode::BAD_GATEWAY, "oops").unwrap_err();
        assert!(matches!(err, BackendError::Status(502)));
    }

    #[test]
    fn upload_response_builds_sanitized_preview() {
        let body = r#"{
            "dataset_id": "d-7",
            "preview": {
                "headers": ["age", "label"],
                "rows": [
                    {"age": 52, "label": "yes", "ghost": 1},
                    {"age": null, "label": true}
                ],
                "shape": [569, 2]
            }
        }"#;
        let outcome = parse_upload_response(body).unwrap();
        assert_eq!(outcome.dataset_id.as_deref(), Some("d-7"));
        let preview = outcome.preview;
        assert_eq!(preview.headers, vec!["age", "label"]);
        assert_eq!(preview.shape, Some((569, 2)));
        assert_eq!(preview.rows[0]["age"], "52");
        assert_eq!(preview.rows[1]["age"], "");
        assert_eq!(preview.rows[1]["label"], "true");
        assert!(!preview.rows[0].contains_key("ghost"));
    }

    #[test]
    fn upload_response_without_dataset_id_is_accepted() {
        let body = r#"{"preview": {"headers": ["a"], "rows": []}}"#;
        let outcome = parse_upload_response(body).unwrap();
        assert!(outcome.dataset_id.is_none());
        assert!(outcome.preview.rows.is_empty());
    }

    #[test]
    fn split_response_parses_shapes() {
        let body = r#"{"train_shape": [398, 30], "test_shape": [171, 30]}"#;
        let outcome = parse_split_response(body).unwrap();
        assert_eq!(outcome.train_shape, Shape(vec![398, 30]));
        assert_eq!(outcome.test_shape, Shape(vec![171, 30]));
    }

    #[test]
    fn train_response_parses_accuracy_and_image() {
        let body = r#"{"accuracy": 0.87, "confusion_matrix_base64": "aGk="}"#;
        let outcome = parse_train_response(body).unwrap();
        assert!((outcome.accuracy - 0.87).abs() < f64::EPSILON);
        assert_eq!(outcome.confusion_png_base64, "aGk=");
    }

    #[test]
    fn malformed_body_maps_to_json_error() {
        assert!(matches!(
            parse_train_response("not json"),
            Err(BackendError::Json(_))
        ));
    }

    /// Accept one request, drain it fully, then answer with the given JSON.
    fn serve_json_once(json: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            let (mut header_end, mut content_length) = (None, 0usize);
            loop {
                let Ok(read) = stream.read(&mut buf) else {
                    return;
                };
                if read == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..read]);
                if header_end.is_none() {
                    if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                        header_end = Some(pos + 4);
                        let head = String::from_utf8_lossy(&raw[..pos]);
                        content_length = head
                            .lines()
                            .find_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse().ok())?
                            })
                            .unwrap_or(0);
                    }
                }
                if let Some(end) = header_end {
                    if raw.len() >= end + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                json.len(),
                json
            );
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{}", addr)
    }

    #[test]
    fn split_round_trip_against_local_server() {
        let base = serve_json_once(r#"{"train_shape": [8, 2], "test_shape": [2, 2]}"#);
        let outcome = split(&base, "label", 0.2).unwrap();
        assert_eq!(outcome.train_shape, Shape(vec![8, 2]));
        assert_eq!(outcome.test_shape, Shape(vec![2, 2]));
    }

    #[test]
    fn upload_round_trip_against_local_server() {
        let base = serve_json_once(
            r#"{"dataset_id": "d-1", "preview": {"headers": ["a"], "rows": [{"a": 1}]}}"#,
        );
        let outcome = upload(&base, "tiny.csv", b"a\n1\n".to_vec()).unwrap();
        assert_eq!(outcome.dataset_id.as_deref(), Some("d-1"));
        assert_eq!(outcome.preview.rows[0]["a"], "1");
    }

    #[test]
    fn unreachable_backend_maps_to_transport() {
        // Grab a port the OS just released so the connection is refused.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = format!("http://127.0.0.1:{port}");
        let err = preprocess(&base, "label", PreprocessMethod::Normalize).unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
