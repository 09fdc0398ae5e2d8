//! 도메인 계층
//!
//! - [`entities`] - 사용자 레코드
//! - [`models`] - 토큰 클레임, 토큰 쌍, 인증 사용자, 역할 정책
//! - [`dto`] - 요청 DTO와 입력 검증

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::users::User;
pub use models::auth::authenticated_user::AuthenticatedUser;
pub use models::auth::role_policy::{authorize, AllowedRoles};
pub use models::token::token::{AccessTokenGrant, Claims, RefreshClaims, TokenPair};
