//! # Accounts Backend
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Configuration comes from the environment (or a `.env` file): `DATABASE_URL`,
//! `ALLOWED_ORIGINS`, `BIND_ADDRESS`, `MIGRATIONS_PATH`, `LOG_LEVEL`.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    lib_web::start_server().await
}
