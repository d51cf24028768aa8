#![allow(clippy::unwrap_used, clippy::expect_used)]

use postlist_core::errors::PostListError;
use postlist_core::logging_facility::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use postlist_core::logging_facility::test_capture::init_test_capture;
use postlist_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, page = 3u32);

    let events = capture.find(op_name, EVENT_START);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("page"), Some("3"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42u64);

    let events = capture.find(op_name, EVENT_END);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, PostListError::MissingTotalCount, duration_ms = 10u64);

    let events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].field("err.code"), Some("ERR_DECODE"));
    assert_eq!(events[0].level, tracing::Level::ERROR);
}
