use mec_core::{ErrorInfo, MecError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("vertex", 3)
        .with_context("line", 12)
}

#[test]
fn graph_error_surface() {
    let err = MecError::Graph(sample_info("self-loop", "self loops are not allowed"));
    assert_eq!(err.info().code, "self-loop");
    assert!(err.info().context.contains_key("vertex"));
}

#[test]
fn serde_error_surface() {
    let err = MecError::Serde(sample_info("bad-edge-line", "expected two integers"));
    assert_eq!(err.info().code, "bad-edge-line");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("12"));
}

#[test]
fn deadline_is_recognised() {
    let err = MecError::Measure(ErrorInfo::new("deadline-exceeded", "timeout"));
    assert!(err.is_deadline());
    assert!(!err.is_emit_cap());
}

#[test]
fn emit_cap_is_recognised() {
    let err = MecError::Enumerate(ErrorInfo::new("emit-cap-reached", "cap"));
    assert!(err.is_emit_cap());
    assert!(!err.is_deadline());
}

#[test]
fn display_includes_context() {
    let err = MecError::Graph(sample_info("unknown-vertex", "vertex out of range"));
    let text = err.to_string();
    assert!(text.contains("unknown-vertex"));
    assert!(text.contains("vertex=3"));
}

#[test]
fn errors_roundtrip_through_json() {
    let err = MecError::Measure(sample_info("deadline-exceeded", "timeout"));
    let json = serde_json::to_string(&err).unwrap();
    let back: MecError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, back);
}
