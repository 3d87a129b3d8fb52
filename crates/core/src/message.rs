//! Uniform response envelope returned by every endpoint.

use serde::{Deserialize, Serialize};

use crate::util::json;

/// Status of an envelope nobody has touched: success.
pub const STATUS_DEFAULT: i32 = 0;
/// Status reported when a write affected at least one row.
pub const STATUS_SUCCEEDED: i32 = 1;
/// Status reported when a write affected nothing.
pub const STATUS_FAILED: i32 = -1;

/// Message of an envelope nobody has touched.
pub const DEFAULT_MESSAGE: &str = "操作成功";

/// Response envelope: `status`, `message` and an optional `data` payload.
///
/// `status >= 0` means success and `status < 0` failure; callers must not
/// infer success from anything else. `data` is left out of the JSON form when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage<T = serde_json::Value> {
    status: i32,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Default for SystemMessage<T> {
    fn default() -> Self {
        Self {
            status: STATUS_DEFAULT,
            message: DEFAULT_MESSAGE.to_string(),
            data: None,
        }
    }
}

impl<T> SystemMessage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default success envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self::default().with_data(data)
    }

    /// Failure envelope with `status = -1`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::default()
            .with_status(STATUS_FAILED)
            .with_message(message)
    }

    /// Map an affected-row count onto the two-valued status convention.
    pub fn from_affected(
        count: usize,
        succeeded: impl Into<String>,
        failed: impl Into<String>,
    ) -> Self {
        Self::from_outcome(count > 0, succeeded, failed)
    }

    /// `status = 1` with `succeeded` when `ok`, else `status = -1` with `failed`.
    pub fn from_outcome(ok: bool, succeeded: impl Into<String>, failed: impl Into<String>) -> Self {
        if ok {
            Self::default()
                .with_status(STATUS_SUCCEEDED)
                .with_message(succeeded)
        } else {
            Self::failure(failed)
        }
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn is_success(&self) -> bool {
        self.status >= 0
    }
}

impl<T: Serialize> SystemMessage<T> {
    /// JSON form of the envelope under the process-wide JSON options.
    pub fn to_json(&self) -> Option<String> {
        json::to_json(self)
    }
}

impl<T: Serialize> core::fmt::Display for SystemMessage<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.to_json().as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_success() {
        let msg: SystemMessage = SystemMessage::new();
        assert_eq!(msg.status(), 0);
        assert_eq!(msg.message(), "操作成功");
        assert!(msg.data().is_none());
        assert!(msg.is_success());
    }

    #[test]
    fn affected_rows_map_to_status() {
        let ok: SystemMessage = SystemMessage::from_affected(1, "用户添加成功", "用户添加失败!");
        assert_eq!(ok.status(), 1);
        assert_eq!(ok.message(), "用户添加成功");

        let failed: SystemMessage = SystemMessage::from_affected(0, "用户添加成功", "用户添加失败!");
        assert_eq!(failed.status(), -1);
        assert_eq!(failed.message(), "用户添加失败!");
        assert!(!failed.is_success());
    }

    #[test]
    fn display_renders_json_without_absent_data() {
        let msg: SystemMessage = SystemMessage::from_outcome(true, "done", "failed");
        assert_eq!(msg.to_string(), r#"{"status":1,"message":"done"}"#);
    }

    #[test]
    fn payload_is_serialized_when_present() {
        let msg = SystemMessage::success(json!({"id": 7}));
        let decoded: serde_json::Value = serde_json::from_str(&msg.to_string()).unwrap();
        assert_eq!(decoded, json!({"status": 0, "message": "操作成功", "data": {"id": 7}}));
    }

    #[test]
    fn decodes_without_data_field() {
        let msg: SystemMessage<u32> = serde_json::from_str(r#"{"status":-1,"message":"x"}"#).unwrap();
        assert_eq!(msg, SystemMessage::failure("x"));
    }
}
