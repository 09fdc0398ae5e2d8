//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자 레코드 저장은 외부 협력자의 책임이므로 여기서는 trait으로 경계를 정의하고,
//! 개발/테스트용 인메모리 구현을 함께 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{InMemoryUserRepository, UserRepository};
//!
//! let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
