use bookstore_catalog::{
    adapters::memory::{InMemoryAuthorRepository, InMemoryBookRepository, StaticCredentialProvider},
    adapters::postgres::{PostgresAuthorRepository, PostgresBookRepository},
    adapters::system::SystemClock,
    api::{handlers::AppState, router::create_router},
    application::catalog::ServiceDependencies,
    config::AppConfig,
    ports::{AuthorRepository, BookRepository, Role},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Initialize adapters
    let (book_repository, author_repository): (Arc<dyn BookRepository>, Arc<dyn AuthorRepository>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("Using PostgreSQL store");

                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(database_url)
                    .await?;

                sqlx::migrate!("./migrations").run(&pool).await?;

                let books: Arc<dyn BookRepository> =
                    Arc::new(PostgresBookRepository::new(pool.clone()));
                let authors: Arc<dyn AuthorRepository> =
                    Arc::new(PostgresAuthorRepository::new(pool));
                (books, authors)
            }
            None => {
                tracing::warn!("DATABASE_URL is not set; using the in-memory store");
                let memory_authors = Arc::new(InMemoryAuthorRepository::new());
                let books: Arc<dyn BookRepository> =
                    Arc::new(InMemoryBookRepository::new(memory_authors.clone()));
                let authors: Arc<dyn AuthorRepository> = memory_authors;
                (books, authors)
            }
        };

    let credentials = Arc::new(StaticCredentialProvider::new().with_user(
        config.admin_username.clone(),
        config.admin_password.clone(),
        vec![Role::Admin],
    ));

    // Create service dependencies
    let service_deps = ServiceDependencies {
        book_repository,
        author_repository,
        clock: Arc::new(SystemClock),
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        credentials,
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
