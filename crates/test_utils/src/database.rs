//! PostgreSQL test containers
//!
//! Starts PostgreSQL in Docker and applies the `infra_db` migrations, so
//! adapter tests run against the real schema. Anything using these helpers
//! needs a Docker daemon and is marked `#[ignore]`.

use std::sync::Arc;
use std::time::Duration;

use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

use infra_db::{
    create_pool, run_migrations, DatabaseConfig, DatabasePool, PostgresClaimStore,
    PostgresLecturerStore,
};

const IMAGE: (&str, &str) = ("postgres", "16-alpine");
const USER: &str = "claims";
const PASSWORD: &str = "claims";
const DATABASE: &str = "lecturer_claims_test";
const READY_LINE: &str = "database system is ready to accept connections";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection URL for a container published on `host:port`
pub fn connection_url(host: &str, port: u16) -> String {
    format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}")
}

/// A migrated PostgreSQL instance that lives as long as this value
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    url: String,
    pool: DatabasePool,
}

impl TestDatabase {
    pub async fn start() -> Result<Self, BoxError> {
        let (name, tag) = IMAGE;
        let container = GenericImage::new(name, tag)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_LINE))
            .with_env_var("POSTGRES_USER", USER)
            .with_env_var("POSTGRES_PASSWORD", PASSWORD)
            .with_env_var("POSTGRES_DB", DATABASE)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;
        let url = connection_url(&host, port);

        let pool = create_pool(
            DatabaseConfig::new(&url)
                .max_connections(5)
                .connect_timeout(Duration::from_secs(30)),
        )
        .await?;
        run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub fn claim_store(&self) -> PostgresClaimStore {
        PostgresClaimStore::new(self.pool.clone())
    }

    pub fn lecturer_store(&self) -> PostgresLecturerStore {
        PostgresLecturerStore::new(self.pool.clone())
    }

    /// Empties both tables, keeping the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::query("TRUNCATE TABLE claims, lecturers")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

static SHARED: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// One container for every test in the binary
///
/// # Panics
///
/// Panics if the container cannot be started
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::start()
                    .await
                    .expect("failed to start shared PostgreSQL container"),
            )
        })
        .await
        .clone()
}

/// A container owned by a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::start().await
}
