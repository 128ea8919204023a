//! Postgres harness for repository tests.
//!
//! One container is started on first use and shared by every test in the
//! binary; migrations run once. Each test gets its own connection pool.

use sqlx::PgPool;
use storage::{Database, HackathonRepository};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct SharedTestInfra {
    db_url: String,
    // Keeps the container alive for the whole run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Self {
        // RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .expect("Failed to start Postgres container");

        let host = postgres.get_host().await.expect("container host");
        let port = postgres
            .get_host_port_ipv4(5432)
            .await
            .expect("container port");
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Database::new(&db_url)
            .await
            .expect("Failed to connect to Postgres for migrations");
        db.run_migrations().await.expect("Failed to run migrations");
        db.close().await;

        Self {
            db_url,
            _postgres: postgres,
        }
    }

    async fn get() -> &'static Self {
        SHARED_INFRA.get_or_init(Self::init).await
    }
}

pub struct TestHarness {
    /// Raw pool for asserting on projected columns.
    pub db_pool: PgPool,
    pub db_url: String,
}

impl TestHarness {
    pub async fn new() -> Self {
        let infra = SharedTestInfra::get().await;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .expect("Failed to connect to test database");
        Self {
            db_pool,
            db_url: infra.db_url.clone(),
        }
    }

    pub fn repo(&self) -> HackathonRepository {
        HackathonRepository::new(self.db_pool.clone())
    }
}
