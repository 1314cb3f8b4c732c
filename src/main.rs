pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

use crate::config::AppConfig;
use crate::modules::admin::adapter::outgoing::{
    Argon2Hasher, JwtTokenService, PostgresIdentityProvider, RedisSessionRevocation,
};
use crate::modules::admin::application::services::{AdminWorkspaces, ConsoleFactory};
use crate::modules::content::adapter::outgoing::postgres_content_store;
use crate::modules::media::adapter::outgoing::cloud_storage::GcsObjectStorage;
use crate::modules::media::application::ports::incoming::use_cases::UploadMedia;
use crate::modules::media::application::services::UploadHelper;
use crate::modules::portfolio::application::ports::incoming::use_cases::{
    BuildContactLinkUseCase, RenderPageUseCase,
};
use crate::modules::portfolio::application::services::{
    ContactLinkService, LoadPortfolioService, PortfolioPageCache,
};
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};

use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub render_page: Arc<dyn RenderPageUseCase>,
    pub contact_link: Arc<dyn BuildContactLinkUseCase>,
    pub admin: Arc<AdminWorkspaces>,
    pub upload_media: Arc<dyn UploadMedia>,
}

#[cfg(not(tarpaulin_include))]
fn load_env_file() {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    load_env_file();
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let server_url = config.server_url();

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(
        Database::connect(opt)
            .await
            .context("Failed to connect to database")?,
    );

    // Redis connection
    let redis_arc = Arc::new(
        Config::from_url(&config.redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?,
    );

    // Public page
    let store = postgres_content_store(Arc::clone(&db_arc));
    let page_cache = Arc::new(PortfolioPageCache::new(
        Arc::new(LoadPortfolioService::new(store.clone())),
        config.page_cache_ttl_secs,
    ));
    let contact_link = ContactLinkService::new(page_cache.clone());

    // Media
    let object_storage = GcsObjectStorage::new(
        config.storage_bucket_prefix.clone(),
        config.storage_public_base_url.clone(),
    );
    let upload_media: Arc<dyn UploadMedia> =
        Arc::new(UploadHelper::new(Arc::new(object_storage)));

    // Admin identity
    let hasher = Argon2Hasher::with_params(
        config.argon2.memory_kib,
        config.argon2.iterations,
        config.argon2.parallelism,
    )?;
    let identity = Arc::new(PostgresIdentityProvider::new(
        Arc::clone(&db_arc),
        Arc::new(hasher),
        Arc::new(JwtTokenService::new(config.jwt.clone())),
        Arc::new(RedisSessionRevocation::new(Arc::clone(&redis_arc))),
    ));

    if let Some(admin) = &config.bootstrap_admin {
        let created = identity
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("Failed to bootstrap admin account")?;
        if created {
            info!("Bootstrap admin {} created", admin.email);
        }
    } else {
        warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; no admin account is bootstrapped");
    }

    let console_factory = ConsoleFactory::new(
        identity,
        store,
        Arc::clone(&upload_media),
        page_cache.clone(),
    );

    let state = AppState {
        render_page: page_cache,
        contact_link: Arc::new(contact_link),
        admin: Arc::new(AdminWorkspaces::new(console_factory)),
        upload_media,
    };

    let max_upload_bytes = config.max_upload_bytes;
    // Base64 attachments grow by a third inside JSON bodies
    let max_json_bytes = max_upload_bytes / 3 * 4 + 64 * 1024;

    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(custom_json_config().limit(max_json_bytes))
            .app_data(custom_query_config())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

/// Fixed segments register before `{collection}` so `/admin/session`,
/// `/admin/password` and `/admin/uploads/..` are never read as collections.
#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    cfg.service(crate::api::openapi::openapi_json_handler);
    // Public
    cfg.service(crate::modules::portfolio::adapter::incoming::web::routes::get_portfolio_page_handler);
    cfg.service(crate::modules::portfolio::adapter::incoming::web::routes::build_contact_link_handler);
    // Admin session
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::sign_in_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::get_session_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::sign_out_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::change_password_handler);
    // Media
    cfg.service(crate::modules::media::adapter::incoming::web::routes::upload_media_handler);
    cfg.service(crate::modules::media::adapter::incoming::web::routes::delete_media_handler);
    // Admin console
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::get_console_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::create_record_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::update_record_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::delete_record_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
