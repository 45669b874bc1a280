//! Student management server.
//!
//! Run from repo root: `cargo run -p student-management-server`
//! Without a database: `STUDENT_STORE=memory cargo run -p student-management-server`

use student_management::{
    app, ensure_database_exists, ensure_tables, AppConfig, AppState, InMemoryStudentRepository,
    PgStudentRepository, StoreKind, StudentRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("student_management=info,tower_http=info")),
        )
        .init();

    let repository: Arc<dyn StudentRepository> = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_tables(&pool).await?;
            Arc::new(PgStudentRepository::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(InMemoryStudentRepository::new())
        }
    };

    let router = app(AppState::new(repository), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("student management listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
