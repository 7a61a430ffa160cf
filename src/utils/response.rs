use serde::Serialize;
use utoipa::ToSchema;

/// API 명세에 맞는 기본 응답 구조체
///
/// 형식:
/// ```json
/// {
///   "isSuccess": true,
///   "code": "COMMON200",
///   "message": "Success",
///   "result": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    /// 성공 응답 생성
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: "Success".to_string(),
            result: Some(result),
        }
    }

    /// 결과 없이 메시지만 담는 성공 응답
    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: message.into(),
            result: None,
        }
    }
}

/// 에러 응답 구조체
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    /// 에러 응답 생성
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_success_in_camel_case() {
        // Arrange
        let response = BaseResponse::success(vec![1, 2]);

        // Act
        let json = serde_json::to_value(&response).unwrap();

        // Assert
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["code"], "COMMON200");
        assert_eq!(json["result"], serde_json::json!([1, 2]));
    }

    #[test]
    fn should_serialize_error_without_result() {
        let response = ErrorResponse::new("AI001", "failed");

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], false);
        assert!(json["result"].is_null());
    }
}
