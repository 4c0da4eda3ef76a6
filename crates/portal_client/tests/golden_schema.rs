//! Golden schema tests for the bulk upload wire format.
//!
//! The request body is what the portal parses; the response body is what
//! `placement upload` renders. A renamed or dropped field fails here first.

use placement_engine::{template, ImportOptions, NormalizedStudent, UploadBatch};
use placement_portal_client::{describe_student, BulkAddResponse};

fn read_golden(path: &str) -> serde_json::Value {
    serde_json::from_str(
        &std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Cannot read {}: {}", path, e)),
    )
    .unwrap_or_else(|e| panic!("Cannot parse {}: {}", path, e))
}

fn template_students() -> Vec<NormalizedStudent> {
    let options = ImportOptions::new().with_default_batch(2030);
    UploadBatch::from_rows(&[template::sample_row()], &options).students
}

#[test]
fn test_golden_bulk_request() {
    let golden = read_golden("tests/golden/bulk-request.json");
    let body = serde_json::json!({ "students": template_students() });
    assert_eq!(body, golden);
}

#[test]
fn test_golden_request_omits_absent_scores() {
    let mut students = template_students();
    students[0].cgpa = None;
    students[0].education.tenth.percentage = None;

    let json = serde_json::to_value(&students[0]).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("cgpa"));
    assert_eq!(json["education"]["tenth"], serde_json::json!({}));
    assert_eq!(json["education"]["twelfth"]["percentage"], 90.2);
}

#[test]
fn test_golden_bulk_response() {
    let golden = read_golden("tests/golden/bulk-response.json");
    let response: BulkAddResponse = serde_json::from_value(golden).unwrap();

    assert_eq!(
        response.message.as_deref(),
        Some("Bulk upload completed: 1 added, 1 failed")
    );
    assert_eq!(response.data.success.len(), 1);
    assert_eq!(describe_student(&response.data.success[0]), "John Doe");

    let failed = &response.data.failed[0];
    assert_eq!(failed.label(), "Jane Roe");
    assert_eq!(failed.roll_number.as_deref(), Some("CS2021002"));
    assert_eq!(failed.error, "Student with this email already exists");
}

#[test]
fn test_response_without_data_still_parses() {
    let response: BulkAddResponse =
        serde_json::from_str(r#"{"message":"Students added"}"#).unwrap();
    assert!(response.data.success.is_empty());
    assert!(response.data.failed.is_empty());
}
