mod db;
mod routes;
mod services;
mod state;
mod views;

use std::path::PathBuf;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let upload_dir = PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

    let hcaptcha = services::captcha::HcaptchaConfig::from_env()
        .expect("HCAPTCHA_SITE_KEY and HCAPTCHA_SECRET required");

    let pool = db::init_pool(&database_url).await.expect("database init failed");

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("upload dir init failed");

    let state = state::AppState::new(pool, hcaptcha, upload_dir);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "homehub listening");
    axum::serve(listener, app).await.expect("server failed");
}
