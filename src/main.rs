use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get, web};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use payclock::config::Config;
use payclock::core::render::HtmlRenderer;
use payclock::core::{AttendanceTracker, PayrollEngine, PayslipComposer};
use payclock::db::{create_schema, init_db};
use payclock::docs::ApiDoc;
use payclock::error::{json_error_handler, path_error_handler, query_error_handler};
use payclock::routes;

#[get("/")]
async fn index() -> impl Responder {
    "Payclock API"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_acquire_timeout_secs),
    )
    .await
    .context("Failed to connect to database")?;

    create_schema(&pool).await.context("Failed to create schema")?;

    let tracker = AttendanceTracker::new(pool.clone());
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::with_renderer(pool.clone(), Arc::new(HtmlRenderer));

    let server_addr = config.server_addr.clone();
    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(tracker.clone()))
            .app_data(Data::new(engine.clone()))
            .app_data(Data::new(composer.clone()))
            .service(index)
            .configure(routes::configure)
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
