//! 인증/사용자 요청 DTO
//!
//! 입력 규칙: 사용자명 3-30자(영문, 숫자, 언더스코어), 유효한 이메일, 비밀번호 6자 이상.
//! 사용자명은 역직렬화 시 앞뒤 공백을 제거한 뒤 검증합니다.
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// 회원가입 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// 리프레시 토큰 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// 프로필 수정 요청. 둘 다 선택
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "trimmed_optional")]
    #[validate(length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
}

/// 비밀번호 변경 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "New password must be at least 6 characters long"))]
    pub new_password: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn trimmed_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()))
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("Username can only contain letters, numbers and underscores".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let req = RegisterRequest {
            username: "kim_01".to_string(),
            email: "kim@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_bad_username() {
        let req = RegisterRequest {
            username: "kim-01!".to_string(),
            email: "kim@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_username_trimmed_before_validation() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"  kim ","email":"kim@example.com","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "kim");
        assert!(req.validate().is_ok());

        let req: UpdateProfileRequest = serde_json::from_str(r#"{"username":" lee_01 "}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("lee_01"));
        assert!(req.validate().is_ok());

        // 공백을 빼면 3자 미만
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":" ab ","email":"kim@example.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_short_password_and_bad_email() {
        let req = RegisterRequest {
            username: "kim".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_refresh_request_is_camel_case() {
        let req: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken":"abc"}"#).unwrap();
        assert_eq!(req.refresh_token, "abc");
    }

    #[test]
    fn test_update_profile_optional_fields() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateProfileRequest = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
