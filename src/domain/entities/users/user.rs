//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 저장된 리프레시 토큰 값과 비밀번호 해시를 함께 보관하지만
//! 토큰 클레임이나 API 응답으로는 절대 내보내지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::models::token::token::Claims;

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 사용자 이메일 (unique, 소문자 정규화)
    pub email: String,
    /// bcrypt 해시
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 사용자 역할 (`user`, `admin`)
    pub role: String,
    /// 계정 활성화 여부
    pub active: bool,
    /// 현재 유효한 리프레시 토큰. 로그아웃 시 비움
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 사용자 생성. 기본 역할은 `user`
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            role: "user".to_string(),
            active: true,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 수정 시각 갱신
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// 토큰에 실을 공개 클레임
    pub fn to_claims(&self) -> Claims {
        Claims::new(self.id.clone())
            .with_role(self.role.clone())
            .with_claim("username", self.username.clone())
            .with_claim("email", self.email.clone())
            .with_claim("active", self.active)
            .with_claim("createdAt", self.created_at.to_rfc3339())
            .with_claim("updatedAt", self.updated_at.to_rfc3339())
    }

    /// API 응답용 공개 표현
    pub fn to_public_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "role": self.role,
            "active": self.active,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
        })
    }
}
