//! Server assembly: configuration, adapter wiring, and the HTTP entry point.

pub mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::domain::auth_service::AuthService;
use crate::domain::contact_service::ContactService;
use crate::domain::reset_token::ResetTokenRegistry;
use crate::inbound::http;
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::RedisContactCache;
use crate::outbound::email::{SmtpMailer, SmtpSettings};
use crate::outbound::events::RedisEventPublisher;
use crate::outbound::persistence::{
    DbPool, DieselContactRepository, DieselUserRepository, PoolConfig, PoolError,
};
use crate::outbound::redis::{RedisPoolError, build_redis_pool};
use crate::outbound::token::JwtTokenAuthority;

/// Redis connections shared by the cache and the event publisher.
const REDIS_POOL_SIZE: u32 = 10;
/// Upper bound on one SMTP delivery attempt.
const SMTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Errors raised while assembling or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The Redis pool could not be built.
    #[error(transparent)]
    Redis(#[from] RedisPoolError),
    /// The SMTP transport could not be built.
    #[error("mailer setup failed: {0}")]
    Mailer(String),
    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Wire adapters and services into handler-facing state.
pub async fn build_state(config: &AppConfig) -> Result<HttpState, ServerError> {
    let db_pool = DbPool::build(&PoolConfig::new(config.database_url.clone())).await?;
    let redis_pool = build_redis_pool(&config.redis_url, REDIS_POOL_SIZE).await?;

    let contact_repository = Arc::new(DieselContactRepository::new(db_pool.clone()));
    let user_repository = Arc::new(DieselUserRepository::new(db_pool));
    let cache = Arc::new(RedisContactCache::new(redis_pool.clone()));
    let publisher = Arc::new(RedisEventPublisher::new(
        redis_pool,
        &config.event_exchange,
        &config.event_routing_key,
    ));
    let mailer = Arc::new(
        SmtpMailer::new(&SmtpSettings {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials: config.smtp_credentials.clone(),
            from: config.mail_from.clone(),
            timeout: SMTP_TIMEOUT,
        })
        .map_err(|err| ServerError::Mailer(err.to_string()))?,
    );
    let tokens = Arc::new(JwtTokenAuthority::new(
        config.jwt_secret.as_bytes(),
        config.jwt_ttl,
    ));
    let registry = Arc::new(ResetTokenRegistry::new());

    let contacts = Arc::new(ContactService::new(contact_repository, cache, publisher));
    let auth = Arc::new(AuthService::new(
        user_repository,
        mailer,
        registry,
        tokens.clone(),
    ));

    Ok(HttpState::new(contacts, auth, tokens))
}

/// Register the full route table under `/api/v1`.
///
/// Shared by the binary and handler tests so both serve the same routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(http::contacts::list_contacts)
            .service(http::contacts::get_contact)
            .service(http::contacts::create_contact)
            .service(http::contacts::update_contact)
            .service(http::contacts::delete_contact)
            .service(http::auth::register)
            .service(http::auth::login)
            .service(http::auth::forgot_password)
            .service(http::auth::reset_password)
            .service(crate::doc::openapi_json),
    );
}

/// Assemble the application and serve it until shutdown.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    let state = web::Data::new(build_state(&config).await?);
    info!(addr = %config.bind_addr, "starting HTTP server");
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(config.bind_addr)?
        .run()
        .await?;
    Ok(())
}
