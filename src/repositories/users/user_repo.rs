//! # 사용자 리포지토리
//!
//! 인증 코어가 소비하는 영속 계층 인터페이스입니다.
//! 식별자(id/email/username) 조회, 저장된 리프레시 토큰으로 소유자 조회, 저장을 제공합니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::users::user::User;
use crate::errors::AppError;

/// 사용자 데이터 액세스 trait
///
/// 구현체는 `save` 시 같은 `id`의 기존 레코드를 교체해야 합니다.
/// 다른 `id`의 레코드와 email 또는 username이 겹치면 저장하지 않고
/// `AppError::ConflictError`를 반환해야 합니다 (유니크 인덱스와 같은 보장).
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// 현재 저장된 리프레시 토큰 값으로 사용자 조회
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, AppError>;

    async fn save(&self, user: User) -> Result<User, AppError>;
}

/// 프로세스 메모리에 사용자를 보관하는 리포지토리
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_where<F>(&self, predicate: F) -> Result<Option<User>, AppError>
    where
        F: Fn(&User) -> bool,
    {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::StorageError("user store lock poisoned".to_string()))?;
        Ok(users.values().find(|user| predicate(user)).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.find_where(|user| user.id == id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_where(|user| user.email == email)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_where(|user| user.username == username)
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, AppError> {
        self.find_where(|user| user.refresh_token.as_deref() == Some(token))
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::StorageError("user store lock poisoned".to_string()))?;

        // 검사와 삽입을 같은 쓰기 락 안에서 수행
        let taken = users.values().any(|other| {
            other.id != user.id && (other.email == user.email || other.username == user.username)
        });
        if taken {
            return Err(AppError::ConflictError(
                "User with this email or username already exists".to_string(),
            ));
        }

        users.insert(user.id.clone(), user.clone());
        log::debug!("사용자 저장 - id: {}", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new("kim".into(), "kim@example.com".into(), "hash".into())
    }

    #[actix_web::test]
    async fn test_save_and_lookup_by_identifiers() {
        let repo = InMemoryUserRepository::new();
        let user = repo.save(sample_user()).await.unwrap();

        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.find_by_email("kim@example.com").await.unwrap(),
            Some(user.clone())
        );
        assert_eq!(repo.find_by_username("kim").await.unwrap(), Some(user));
        assert_eq!(repo.find_by_username("lee").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_save_replaces_and_refresh_token_lookup() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.save(sample_user()).await.unwrap();

        assert_eq!(repo.find_by_refresh_token("r1").await.unwrap(), None);

        user.refresh_token = Some("r1".to_string());
        repo.save(user.clone()).await.unwrap();
        assert_eq!(
            repo.find_by_refresh_token("r1").await.unwrap().map(|u| u.id),
            Some(user.id.clone())
        );

        user.refresh_token = None;
        repo.save(user).await.unwrap();
        assert_eq!(repo.find_by_refresh_token("r1").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_save_rejects_duplicate_email_or_username() {
        let repo = InMemoryUserRepository::new();
        let first = repo.save(sample_user()).await.unwrap();

        let same_email = User::new("lee".into(), "kim@example.com".into(), "hash".into());
        assert!(matches!(
            repo.save(same_email).await,
            Err(AppError::ConflictError(_))
        ));

        let same_username = User::new("kim".into(), "lee@example.com".into(), "hash".into());
        assert!(matches!(
            repo.save(same_username).await,
            Err(AppError::ConflictError(_))
        ));

        // 충돌한 레코드는 저장되지 않음
        assert_eq!(
            repo.find_by_email("kim@example.com").await.unwrap().map(|u| u.id),
            Some(first.id)
        );
        assert_eq!(repo.find_by_email("lee@example.com").await.unwrap(), None);
    }
}
