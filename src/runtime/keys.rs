//! Store keys the dispatcher writes.

/// `true` while an API call or form submission is outstanding.
pub const IS_LOADING: &str = "isLoading";
/// `"success"` or `"error"` after the latest API call.
pub const API_STATUS: &str = "apiStatus";
pub const LAST_API_RESPONSE: &str = "lastApiResponse";
pub const LAST_API_ERROR: &str = "lastApiError";
/// `"success"` or `"error"` after the latest form submission.
pub const FORM_STATUS: &str = "formStatus";
pub const FORM_ERROR: &str = "formError";
pub const NAVIGATION_ERROR: &str = "navigationError";
pub const CUSTOM_ACTION_ERROR: &str = "customActionError";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
