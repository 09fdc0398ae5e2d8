//! JWT 인증 게이트웨이 메인 애플리케이션
//!
//! 설정을 읽어 토큰 서비스와 사용자 서비스를 한 번 생성하고,
//! Actix-web HTTP 서버에 주입해 실행합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header::{self, HeaderName};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use jwt_auth_gateway::config::{CorsConfig, JwtConfig, PasswordConfig, RateLimitConfig, ServerConfig};
use jwt_auth_gateway::repositories::users::InMemoryUserRepository;
use jwt_auth_gateway::routes::{configure_all_routes, DEFAULT_EXCLUDED_PATHS};
use jwt_auth_gateway::services::auth::TokenService;
use jwt_auth_gateway::services::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 JWT 인증 게이트웨이 시작중...");

    let jwt_config = load_jwt_config().map_err(std::io::Error::other)?;
    let token_service = Arc::new(TokenService::new(jwt_config));

    let user_service = web::Data::new(UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        token_service.clone(),
        PasswordConfig::bcrypt_cost(),
    ));

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(token_service, user_service).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    token_service: Arc<TokenService>,
    user_service: web::Data<UserService>,
) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let renewal_header = token_service.config().renewal_header.clone();

    HttpServer::new(move || {
        let cors = configure_cors(&renewal_header);
        let tokens = token_service.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(user_service.clone())
            // 라우트 설정
            .configure(move |cfg| configure_all_routes(cfg, tokens))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 토큰 설정을 읽고 기본 제외 경로를 채웁니다
///
/// `JWT_EXCLUDED_PATHS`가 비어 있으면 헬스체크와 로그인/회원가입/리프레시 경로를 사용합니다.
fn load_jwt_config() -> Result<JwtConfig, jwt_auth_gateway::errors::AppError> {
    let mut config = JwtConfig::from_env()?;
    if config.excluded_paths.is_empty() {
        config = config.with_excluded_paths(DEFAULT_EXCLUDED_PATHS.iter().copied());
    }

    info!(
        "JWT 설정 로드됨 - 알고리즘: {:?}, 액세스 TTL: {}초, 자동 갱신: {}",
        config.algorithm,
        config.access_ttl_secs(),
        config.auto_refresh
    );
    Ok(config)
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// `CORS_ORIGIN`이 없거나 `*`이면 모든 Origin을 허용합니다.
/// 클라이언트가 갱신 토큰을 읽을 수 있도록 갱신 헤더를 노출합니다.
fn configure_cors(renewal_header: &str) -> Cors {
    let origins = CorsConfig::allowed_origins();

    let mut cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    };

    if let Ok(name) = HeaderName::from_bytes(renewal_header.as_bytes()) {
        cors = cors.expose_headers(vec![name]);
    }

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
