//! JWT 클레임 구조체 및 토큰 쌍
//!
//! 액세스 토큰은 호출자가 넘긴 임의의 필드를 그대로 싣고 다닙니다.
//! 필수 키는 사용자 식별자(`id`)뿐이고 `role`은 인가 게이트가 읽습니다.
//! 나머지 필드는 `extra`에 보존됩니다.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 서명 전에 항상 제거되는 민감 필드
pub const SENSITIVE_CLAIMS: &[&str] = &[
    "password",
    "password_hash",
    "passwordHash",
    "refresh_token",
    "refreshToken",
];

/// 액세스 토큰 클레임
///
/// ## 클레임 구성
///
/// - `id`: 사용자 ID (`_id`로도 받음)
/// - `role`: 사용자 역할 (인가 게이트 용)
/// - `iat`, `exp`, `iss`, `aud`: 서명 시점에 채워지는 등록 클레임
/// - 그 외 호출자 정의 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
            iat: None,
            exp: None,
            iss: None,
            aud: None,
            extra: Map::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// 호출자 정의 필드를 추가합니다.
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// 민감 필드를 제거한 사본
    pub fn sanitized(&self) -> Self {
        let mut claims = self.clone();
        for key in SENSITIVE_CLAIMS {
            claims.extra.remove(*key);
        }
        claims
    }

    /// 등록 클레임(`iat`, `exp`, `iss`, `aud`)을 비운 사본.
    /// 재서명 시 새 값으로 다시 채워집니다.
    pub fn without_registered(&self) -> Self {
        Self {
            iat: None,
            exp: None,
            iss: None,
            aud: None,
            ..self.clone()
        }
    }

    /// 만료까지 남은 초. `exp`가 없으면 `None`
    pub fn seconds_until_expiry(&self, now: i64) -> Option<i64> {
        self.exp.map(|exp| exp - now)
    }
}

/// 리프레시 토큰 클레임. 사용자 식별자만 싣습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub id: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT 토큰 쌍 구조체
///
/// 로그인/회원가입 응답의 `tokens` 필드로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// Authorization 헤더 스킴 (`Bearer`)
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}

/// 리프레시로 새로 발급된 액세스 토큰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claims_keep_open_fields() {
        let claims: Claims = serde_json::from_value(json!({
            "id": "u1",
            "role": "user",
            "username": "kim",
            "exp": 100
        }))
        .unwrap();

        assert_eq!(claims.id, "u1");
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert_eq!(claims.exp, Some(100));
        assert_eq!(claims.get("username"), Some(&json!("kim")));
        assert!(claims.get("exp").is_none());
    }

    #[test]
    fn test_underscore_id_alias() {
        let claims: Claims = serde_json::from_value(json!({ "_id": "abc" })).unwrap();
        assert_eq!(claims.id, "abc");
    }

    #[test]
    fn test_sanitized_strips_sensitive_fields() {
        let claims = Claims::new("u1")
            .with_claim("password", "hash")
            .with_claim("refreshToken", "r")
            .with_claim("email", "a@b.c");

        let clean = claims.sanitized();
        assert!(clean.get("password").is_none());
        assert!(clean.get("refreshToken").is_none());
        assert_eq!(clean.get("email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn test_without_registered() {
        let mut claims = Claims::new("u1").with_role("admin");
        claims.exp = Some(10);
        claims.iss = Some("x".to_string());

        let bare = claims.without_registered();
        assert_eq!(bare.exp, None);
        assert_eq!(bare.iss, None);
        assert_eq!(bare.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_token_pair_is_camel_case() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        };
        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value["accessToken"], "a");
        assert_eq!(value["refreshToken"], "r");
        assert_eq!(value["tokenType"], "Bearer");
        assert_eq!(value["expiresIn"], 3600);
    }
}
