//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent between the logging macros,
//! the store operations and the test capture layer.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Store fields
pub const FIELD_PAGE: &str = "page";
pub const FIELD_PAGE_SIZE: &str = "page_size";
pub const FIELD_SORT_ORDER: &str = "sort_order";
pub const FIELD_POST_ID: &str = "post_id";
pub const FIELD_TOTAL_PAGES: &str = "total_pages";
pub const FIELD_NEXT_ID: &str = "next_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SUPERSEDED: &str = "superseded";

// Operation names
pub const OP_FETCH_PAGE: &str = "fetch_page";
pub const OP_CREATE_RECORD: &str = "create_record";
pub const OP_SET_PAGE: &str = "set_page";
pub const OP_TOGGLE_SORT_ORDER: &str = "toggle_sort_order";
pub const OP_CACHE_LOAD: &str = "cache_load";
pub const OP_CACHE_SAVE: &str = "cache_save";
