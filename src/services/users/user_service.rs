//! # 사용자 계정 서비스 구현
//!
//! 회원가입, 로그인, 토큰 리프레시, 로그아웃, 프로필 관리를 담당합니다.
//! 토큰 발급/검증은 [`TokenService`]에, 영속화는 [`UserRepository`]에 위임합니다.
//!
//! ## 리프레시 토큰 저장
//!
//! 로그인/회원가입 때 발급한 리프레시 토큰 값은 사용자 레코드에 저장되고,
//! `/refresh-token` 요청은 이 값으로 소유자를 찾은 뒤 토큰 서명을 검증합니다.
//! 로그아웃하면 저장값이 지워지므로 같은 리프레시 토큰은 더 이상 쓸 수 없습니다.
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 환경별 cost (개발 4, 운영 12)
//! - **자격 증명 오류 통일**: 존재하지 않는 이메일과 틀린 비밀번호를 같은 메시지로 응답
//! - **민감 정보 제거**: 비밀번호 해시와 리프레시 토큰은 클레임/응답에 포함되지 않음

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    domain::{
        dto::users::request::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest},
        entities::users::user::User,
        models::token::token::{AccessTokenGrant, TokenPair},
    },
    errors::{AppError, AppResult, AuthError},
    repositories::users::UserRepository,
    services::auth::TokenService,
    utils::string_utils::{clean_optional_string, normalize_email},
};

const INVALID_LOGIN: &str = "Invalid email or password";

/// 로그인/회원가입 결과
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

/// 대시보드 통계
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// 가입 후 경과 일수
    pub account_age: i64,
}

/// 대시보드 데이터
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub username: String,
    pub role: String,
    pub join_date: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub stats: DashboardStats,
}

/// 사용자 계정 비즈니스 로직 서비스
///
/// 모든 의존성은 생성 시 명시적으로 주입됩니다.
///
/// ```rust,ignore
/// let service = UserService::new(
///     Arc::new(InMemoryUserRepository::new()),
///     Arc::new(TokenService::new(JwtConfig::from_env()?)),
///     PasswordConfig::bcrypt_cost(),
/// );
/// let session = service.login(request).await?;
/// ```
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            tokens,
            bcrypt_cost,
        }
    }

    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    /// * `AppError::InternalError` - 비밀번호 해싱 또는 토큰 생성 실패
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthSession> {
        let username = request.username.trim().to_string();
        let email = normalize_email(&request.email);

        if self.repo.find_by_email(&email).await?.is_some()
            || self.repo.find_by_username(&username).await?.is_some()
        {
            return Err(AppError::ConflictError(
                "User with this email or username already exists".to_string(),
            ));
        }

        let password_hash = hash(&request.password, self.bcrypt_cost)?;
        let user = self.repo.save(User::new(username, email, password_hash)).await?;

        let session = self.issue_session(user).await?;
        log::info!("회원가입 완료 - 사용자 ID: {}", session.user.id);

        Ok(session)
    }

    /// 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredentials` - 이메일 없음 또는 비밀번호 불일치
    /// * `AppError::AccountDisabled` - 비활성화된 계정
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthSession> {
        let email = normalize_email(&request.email);

        let user = match self.repo.find_by_email(&email).await? {
            Some(user) if verify(&request.password, &user.password_hash)? => user,
            _ => {
                log::warn!("로그인 실패 - 이메일: {}", email);
                return Err(AppError::InvalidCredentials(INVALID_LOGIN.to_string()));
            }
        };

        if !user.active {
            log::warn!("비활성 계정 로그인 시도 - 사용자 ID: {}", user.id);
            return Err(AppError::AccountDisabled);
        }

        let session = self.issue_session(user).await?;
        log::info!("로그인 성공 - 사용자 ID: {}", session.user.id);

        Ok(session)
    }

    /// 저장된 리프레시 토큰으로 새 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - 저장된 토큰이 아니거나 검증 실패
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AccessTokenGrant> {
        let user = self
            .repo
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let grant = self.tokens.refresh_access_token(refresh_token, &user.to_claims())?;
        log::info!("액세스 토큰 재발급 - 사용자 ID: {}", user.id);

        Ok(grant)
    }

    /// 로그아웃. 저장된 리프레시 토큰을 지움
    pub async fn logout(&self, user_id: &str) -> AppResult<()> {
        let mut user = self.find_user(user_id).await?;
        user.refresh_token = None;
        user.touch();
        self.repo.save(user).await?;

        log::info!("로그아웃 - 사용자 ID: {}", user_id);
        Ok(())
    }

    pub async fn current_user(&self, user_id: &str) -> AppResult<User> {
        self.find_user(user_id).await
    }

    /// 프로필 수정 (사용자명, 이메일)
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 다른 계정이 이미 사용 중
    /// * `AppError::NotFound` - 사용자 없음
    pub async fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> AppResult<User> {
        let mut user = self.find_user(user_id).await?;

        if let Some(email) = clean_optional_string(request.email).map(|e| normalize_email(&e)) {
            if let Some(other) = self.repo.find_by_email(&email).await? {
                if other.id != user.id {
                    return Err(AppError::ConflictError(
                        "Email is already in use by another account".to_string(),
                    ));
                }
            }
            user.email = email;
        }

        if let Some(username) = clean_optional_string(request.username) {
            if let Some(other) = self.repo.find_by_username(&username).await? {
                if other.id != user.id {
                    return Err(AppError::ConflictError(
                        "Username is already in use by another account".to_string(),
                    ));
                }
            }
            user.username = username;
        }

        user.touch();
        let user = self.repo.save(user).await?;
        log::info!("프로필 수정 - 사용자 ID: {}", user.id);

        Ok(user)
    }

    /// 비밀번호 변경
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredentials` - 현재 비밀번호 불일치
    pub async fn change_password(&self, user_id: &str, request: ChangePasswordRequest) -> AppResult<()> {
        let mut user = self.find_user(user_id).await?;

        if !verify(&request.current_password, &user.password_hash)? {
            log::warn!("비밀번호 변경 실패 - 사용자 ID: {}", user_id);
            return Err(AppError::InvalidCredentials(
                "Current password is incorrect".to_string(),
            ));
        }

        user.password_hash = hash(&request.new_password, self.bcrypt_cost)?;
        user.touch();
        self.repo.save(user).await?;

        log::info!("비밀번호 변경 - 사용자 ID: {}", user_id);
        Ok(())
    }

    pub async fn dashboard(&self, user_id: &str) -> AppResult<DashboardData> {
        let user = self.find_user(user_id).await?;
        let account_age = (Utc::now() - user.created_at).num_days();

        Ok(DashboardData {
            username: user.username,
            role: user.role,
            join_date: user.created_at,
            last_active: user.updated_at,
            stats: DashboardStats { account_age },
        })
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰을 사용자 레코드에 저장
    async fn issue_session(&self, mut user: User) -> AppResult<AuthSession> {
        let tokens = self.tokens.create_tokens(&user.to_claims(), None)?;

        user.refresh_token = Some(tokens.refresh_token.clone());
        let user = self.repo.save(user).await?;

        Ok(AuthSession { user, tokens })
    }

    async fn find_user(&self, user_id: &str) -> AppResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::repositories::users::InMemoryUserRepository;

    fn service() -> (UserService, Arc<InMemoryUserRepository>, Arc<TokenService>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(TokenService::new(JwtConfig::new("svc-access", "svc-refresh")));
        let service = UserService::new(repo.clone(), tokens.clone(), 4);
        (service, repo, tokens)
    }

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_issues_tokens_and_stores_refresh_token() {
        let (service, repo, tokens) = service();

        let session = service
            .register(register_request("kim", "Kim@Example.com"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "kim@example.com");
        assert_ne!(session.user.password_hash, "secret1");

        let stored = repo.find_by_id(&session.user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token, Some(session.tokens.refresh_token.clone()));

        let claims = tokens.verify_access_token(&session.tokens.access_token).unwrap();
        assert_eq!(claims.id, session.user.id);
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert!(claims.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_register_conflict() {
        let (service, _, _) = service();
        service.register(register_request("kim", "kim@example.com")).await.unwrap();

        let same_email = service.register(register_request("lee", "kim@example.com")).await;
        assert!(matches!(same_email, Err(AppError::ConflictError(_))));

        let same_username = service.register(register_request("kim", "lee@example.com")).await;
        assert!(matches!(same_username, Err(AppError::ConflictError(_))));
    }

    /// 조회는 항상 비어 있는 것처럼 응답하는 리포지토리 (동시 가입 사이의 틈을 재현)
    struct LaggingLookupRepository {
        inner: InMemoryUserRepository,
    }

    #[async_trait::async_trait]
    impl UserRepository for LaggingLookupRepository {
        async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
            Ok(None)
        }

        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, AppError> {
            Ok(None)
        }

        async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, AppError> {
            self.inner.find_by_refresh_token(token).await
        }

        async fn save(&self, user: User) -> Result<User, AppError> {
            self.inner.save(user).await
        }
    }

    #[actix_web::test]
    async fn test_register_conflict_when_lookup_misses_concurrent_insert() {
        let repo = Arc::new(LaggingLookupRepository {
            inner: InMemoryUserRepository::new(),
        });
        let tokens = Arc::new(TokenService::new(JwtConfig::new("svc-access", "svc-refresh")));
        let service = UserService::new(repo.clone(), tokens, 4);

        let first = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();

        let second = service.register(register_request("lee", "kim@example.com")).await;
        assert!(matches!(second, Err(AppError::ConflictError(_))));

        // 이메일로 찾으면 처음 가입한 계정 하나만 존재
        assert_eq!(
            repo.inner.find_by_email("kim@example.com").await.unwrap().map(|u| u.id),
            Some(first.user.id)
        );
    }

    #[actix_web::test]
    async fn test_login_success_and_failures() {
        let (service, repo, _) = service();
        let registered = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();

        let session = service
            .login(login_request("kim@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.user.id, registered.user.id);

        let wrong_password = service.login(login_request("kim@example.com", "nope123")).await;
        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials(_))));

        let unknown = service.login(login_request("who@example.com", "secret1")).await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials(_))));

        let mut user = repo.find_by_id(&registered.user.id).await.unwrap().unwrap();
        user.active = false;
        repo.save(user).await.unwrap();

        let disabled = service.login(login_request("kim@example.com", "secret1")).await;
        assert!(matches!(disabled, Err(AppError::AccountDisabled)));
    }

    #[actix_web::test]
    async fn test_refresh_then_logout_invalidates() {
        let (service, _, tokens) = service();
        let session = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();

        let grant = service.refresh(&session.tokens.refresh_token).await.unwrap();
        let claims = tokens.verify_access_token(&grant.access_token).unwrap();
        assert_eq!(claims.id, session.user.id);

        service.logout(&session.user.id).await.unwrap();

        let after_logout = service.refresh(&session.tokens.refresh_token).await;
        assert!(matches!(
            after_logout,
            Err(AppError::Auth(AuthError::InvalidRefreshToken))
        ));
    }

    #[actix_web::test]
    async fn test_refresh_unknown_token() {
        let (service, _, _) = service();
        let result = service.refresh("never-issued").await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::InvalidRefreshToken))
        ));
    }

    #[actix_web::test]
    async fn test_update_profile() {
        let (service, _, _) = service();
        let kim = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();
        service
            .register(register_request("lee", "lee@example.com"))
            .await
            .unwrap();

        let taken = service
            .update_profile(
                &kim.user.id,
                UpdateProfileRequest {
                    username: Some("lee".to_string()),
                    email: None,
                },
            )
            .await;
        assert!(matches!(taken, Err(AppError::ConflictError(_))));

        let updated = service
            .update_profile(
                &kim.user.id,
                UpdateProfileRequest {
                    username: Some("kim_new".to_string()),
                    email: Some("KIM@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "kim_new");
        assert_eq!(updated.email, "kim@example.com");
    }

    #[actix_web::test]
    async fn test_change_password() {
        let (service, _, _) = service();
        let session = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();

        let wrong = service
            .change_password(
                &session.user.id,
                ChangePasswordRequest {
                    current_password: "wrong1".to_string(),
                    new_password: "newsecret".to_string(),
                },
            )
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials(_))));

        service
            .change_password(
                &session.user.id,
                ChangePasswordRequest {
                    current_password: "secret1".to_string(),
                    new_password: "newsecret".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(service.login(login_request("kim@example.com", "newsecret")).await.is_ok());
        assert!(service.login(login_request("kim@example.com", "secret1")).await.is_err());
    }

    #[actix_web::test]
    async fn test_dashboard_and_missing_user() {
        let (service, _, _) = service();
        let session = service
            .register(register_request("kim", "kim@example.com"))
            .await
            .unwrap();

        let data = service.dashboard(&session.user.id).await.unwrap();
        assert_eq!(data.username, "kim");
        assert_eq!(data.role, "user");
        assert_eq!(data.stats.account_age, 0);

        let missing = service.current_user("nobody").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
