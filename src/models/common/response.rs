use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// 所有 JSON 接口共用的响应外壳，`data` 为空时不输出该字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: String) -> Self {
        Self {
            code: code as i32,
            message,
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message.into())
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success as i32
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message.into())
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data() {
        let resp = ApiResponse::success(vec![1_i64, 2], "Quizzes loaded");
        assert!(resp.is_success());
        assert_eq!(resp.data, Some(vec![1, 2]));

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "Quizzes loaded");
        assert_eq!(json["data"][1], 2);
    }

    #[test]
    fn test_empty_error_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::QuizNotFound, "Quiz not found");
        assert!(!resp.is_success());
        assert_eq!(resp.code, ErrorCode::QuizNotFound as i32);

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("data").is_none());
    }
}
