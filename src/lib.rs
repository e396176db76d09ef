#[macro_use]
extern crate rocket;

pub mod bootstrap;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod migration;
pub mod models;
pub mod request_logger;
pub mod routes;

use crate::config::AppConfig;
use crate::db::FormDataDb;
use crate::request_logger::RequestLogger;
use env_logger::Env;
use rocket::fairing::AdHoc;
use rocket::fs::{FileServer, Options};
use rocket::http::Method;
use rocket::{Build, Rocket};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_db_pools::Database;
use rocket_okapi::{
    openapi_get_routes,
    rapidoc::{GeneralConfig, HideShowConfig, RapiDocConfig, make_rapidoc},
    settings::UrlObject,
    swagger_ui::{SwaggerUIConfig, make_swagger_ui},
};
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Headroom for multipart boundaries and headers around the CSV file.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

fn init_logger() {
    LOGGER.call_once(|| {
        env_logger::Builder::from_env(
            Env::default().default_filter_or("info,rocket::server=warn,rocket::request=warn"),
        )
        .init();
    });
}

pub fn rocket() -> Rocket<Build> {
    init_logger();
    log::info!("Starting FormData API Server");

    let config = AppConfig::from_env();

    if let Err(err) = bootstrap::prepare_uploads_dir(&config.uploads_dir) {
        log::error!(
            "failed to create uploads directory {}: {}",
            config.uploads_dir.display(),
            err
        );
    }

    let cors = match CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(
            vec![Method::Get, Method::Post]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allow_credentials(true)
        .to_cors()
    {
        Ok(cors) => Some(cors),
        Err(err) => {
            log::error!("invalid CORS configuration, CORS disabled: {}", err);
            None
        }
    };

    let figment = rocket::Config::figment()
        .merge(("limits.file", config.csv_upload_limit_bytes))
        .merge((
            "limits.data-form",
            config.csv_upload_limit_bytes + FORM_OVERHEAD_BYTES,
        ));

    let mut rocket = rocket::custom(figment)
        .attach(RequestLogger)
        .attach(FormDataDb::init());

    if let Some(cors) = cors {
        rocket = rocket.attach(cors);
    }

    rocket
        // Run database migrations on startup
        .attach(AdHoc::try_on_ignite("Run Migrations", |rocket| async move {
            match FormDataDb::fetch(&rocket) {
                Some(db) => {
                    let pool = (**db).clone();
                    match migration::run_migrations(&pool).await {
                        Ok(_) => Ok(rocket),
                        Err(e) => {
                            log::error!("database migrations failed: {}", e);
                            Err(rocket)
                        }
                    }
                }
                None => {
                    log::error!("database pool not available for migrations");
                    Err(rocket)
                }
            }
        }))
        // Share the pool as plain managed state so handlers and tests agree
        .attach(AdHoc::try_on_ignite("Manage DB Pool", |rocket| async move {
            match FormDataDb::fetch(&rocket) {
                Some(db) => {
                    let pool = (**db).clone();
                    Ok(rocket.manage(pool))
                }
                None => Err(rocket),
            }
        }))
        .attach(AdHoc::try_on_ignite("Seed Admin User", |rocket| async move {
            let Some(pool) = rocket.state::<rocket_db_pools::sqlx::PgPool>() else {
                log::error!("database pool not available for admin seeding");
                return Err(rocket);
            };
            let Some(config) = rocket.state::<AppConfig>() else {
                log::error!("application config not available for admin seeding");
                return Err(rocket);
            };
            match bootstrap::ensure_admin(pool, config).await {
                Ok(_) => Ok(rocket),
                Err(e) => {
                    log::error!("failed to seed admin user: {}", e);
                    Err(rocket)
                }
            }
        }))
        .mount(
            "/uploads",
            FileServer::new(&config.uploads_dir, Options::Index | Options::Missing),
        )
        .manage(config)
        .mount(
            "/api/v1",
            openapi_get_routes![
                // Health routes
                routes::health::health_check,
                routes::health::readiness,
                // User routes
                routes::users::register,
                routes::users::login,
                // Contact routes
                routes::contacts::upload_csv,
                routes::contacts::login_by_email,
                routes::contacts::get_contact,
                // Issue routes
                routes::issues::report_issue,
                routes::issues::get_issue,
            ],
        )
        .mount(
            "/api/docs/swagger/",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../../v1/openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/docs/rapidoc/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("FormData API", "../../v1/openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
}

pub mod test_support {
    use rocket::config::LogLevel;
    use rocket::figment::Figment;
    use rocket::local::asynchronous::Client as AsyncClient;
    use rocket::local::blocking::Client;
    use rocket::{Build, Rocket, Route};
    use rocket_db_pools::sqlx::{self, PgPool};

    use crate::config::AppConfig;

    pub use database::{TestDatabase, TestDatabaseError};

    /// Convenience helpers for seeding and inspecting tables in tests.
    pub struct TestFixtures<'a> {
        pool: &'a PgPool,
    }

    impl<'a> TestFixtures<'a> {
        /// Create a fixture helper bound to the provided pool.
        pub fn new(pool: &'a PgPool) -> Self {
            Self { pool }
        }

        /// Insert a user row, returning the new user id.
        pub async fn insert_user(
            &self,
            username: &str,
            password: &str,
            role: &str,
        ) -> Result<i32, sqlx::Error> {
            sqlx::query_scalar(
                "INSERT INTO users (username, password, role) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(username)
            .bind(password)
            .bind(role)
            .fetch_one(self.pool)
            .await
        }

        /// Insert a contact directly, bypassing the importer.
        pub async fn insert_contact(&self, email: &str, full_name: &str) -> Result<(), sqlx::Error> {
            sqlx::query(
                "INSERT INTO contacts (email, full_name, timestamp, twitter_profile, linkedin_profile) VALUES ($1, $2, '', '', '')",
            )
            .bind(email)
            .bind(full_name)
            .execute(self.pool)
            .await?;
            Ok(())
        }

        /// Number of rows in the contacts table.
        pub async fn contact_count(&self) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
                .fetch_one(self.pool)
                .await
        }

        /// Stored full name for an email, if the contact exists.
        pub async fn contact_name(&self, email: &str) -> Result<Option<String>, sqlx::Error> {
            sqlx::query_scalar("SELECT full_name FROM contacts WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool)
                .await
        }
    }

    pub mod database {
        use log::LevelFilter;
        use rocket_db_pools::sqlx::postgres::{PgConnectOptions, PgPoolOptions};
        use rocket_db_pools::sqlx::{self, ConnectOptions, PgPool};
        use testcontainers::{GenericImage, ImageExt, core::WaitFor};
        use testcontainers_modules::testcontainers::{
            ContainerAsync, core::error::TestcontainersError, runners::AsyncRunner,
        };
        use thiserror::Error;
        use tokio::runtime::Handle;
        use uuid::Uuid;

        use crate::migration::MIGRATOR;

        #[derive(Debug, Error)]
        pub enum TestDatabaseError {
            #[error("TEST_DATABASE_URL not set")]
            MissingUrl,
            #[error("database error: {0}")]
            Sqlx(#[from] sqlx::Error),
            #[error("migration error: {0}")]
            Migration(#[from] sqlx::migrate::MigrateError),
            #[error("container error: {0}")]
            Container(#[from] TestcontainersError),
        }

        impl TestDatabaseError {
            /// Whether the failure means no database is available at all, in
            /// which case integration tests skip instead of failing.
            pub fn is_unavailable(&self) -> bool {
                matches!(
                    self,
                    TestDatabaseError::MissingUrl | TestDatabaseError::Container(_)
                )
            }
        }

        /// Ephemeral database factory for integration tests.
        pub struct TestDatabase {
            pool: Option<PgPool>,
            admin_options: PgConnectOptions,
            database_name: String,
            container: Option<ContainerAsync<GenericImage>>,
        }

        impl TestDatabase {
            /// Use `TEST_DATABASE_URL` when set, otherwise launch a disposable
            /// Postgres container.
            pub async fn new_from_env() -> Result<Self, TestDatabaseError> {
                match std::env::var("TEST_DATABASE_URL") {
                    Ok(url) => Self::from_url(&url, None).await,
                    Err(_) => Self::new().await,
                }
            }

            /// Provision a fresh database inside a new Postgres container.
            pub async fn new() -> Result<Self, TestDatabaseError> {
                let image = GenericImage::new("postgres", "16-alpine")
                    .with_wait_for(WaitFor::message_on_stdout(
                        "database system is ready to accept connections",
                    ))
                    .with_wait_for(WaitFor::message_on_stderr(
                        "database system is ready to accept connections",
                    ));

                let container = image
                    .with_env_var("POSTGRES_DB", "postgres")
                    .with_env_var("POSTGRES_USER", "postgres")
                    .with_env_var("POSTGRES_PASSWORD", "postgres")
                    .start()
                    .await?;
                let host = container.get_host().await?.to_string();
                let port = container.get_host_port_ipv4(5432).await?;
                let admin_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

                Self::from_url(&admin_url, Some(container)).await
            }

            async fn from_url(
                url: &str,
                container: Option<ContainerAsync<GenericImage>>,
            ) -> Result<Self, TestDatabaseError> {
                let base_options: PgConnectOptions =
                    url.parse().map_err(TestDatabaseError::Sqlx)?;
                let base_options = base_options.log_statements(LevelFilter::Off);

                let base_name = base_options
                    .get_database()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "postgres".to_string());

                let admin_options = base_options.clone().database("postgres");
                let admin_pool = PgPoolOptions::new()
                    .max_connections(1)
                    .connect_with(admin_options.clone())
                    .await
                    .map_err(TestDatabaseError::Sqlx)?;

                let new_db_name = format!("{}_{}", base_name, Uuid::new_v4().simple());
                let create_sql = format!("CREATE DATABASE \"{}\" TEMPLATE template0", new_db_name);
                sqlx::query(&create_sql)
                    .execute(&admin_pool)
                    .await
                    .map_err(TestDatabaseError::Sqlx)?;
                admin_pool.close().await;

                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect_with(base_options.clone().database(&new_db_name))
                    .await
                    .map_err(TestDatabaseError::Sqlx)?;

                MIGRATOR.run(&pool).await?;

                Ok(Self {
                    pool: Some(pool),
                    admin_options,
                    database_name: new_db_name,
                    container,
                })
            }

            /// Connection pool for use in tests and Rocket state.
            pub fn pool(&self) -> &PgPool {
                self.pool.as_ref().expect("test database pool is available")
            }

            pub fn pool_clone(&self) -> PgPool {
                self.pool().clone()
            }

            /// Close pool connections and drop the ephemeral database.
            pub async fn close(mut self) -> Result<(), TestDatabaseError> {
                if let Some(pool) = self.pool.take() {
                    pool.close().await;
                }

                drop_database_with_fallback(self.admin_options.clone(), &self.database_name)
                    .await
                    .map_err(TestDatabaseError::Sqlx)?;

                if let Some(container) = self.container.take() {
                    drop(container);
                }

                Ok(())
            }
        }

        async fn drop_database_with_fallback(
            admin_options: PgConnectOptions,
            database_name: &str,
        ) -> Result<(), sqlx::Error> {
            let admin_pool = PgPoolOptions::new()
                .max_connections(1)
                .connect_with(admin_options)
                .await?;

            let drop_force = format!("DROP DATABASE \"{}\" WITH (FORCE)", database_name);
            match sqlx::query(&drop_force).execute(&admin_pool).await {
                Ok(_) => Ok(()),
                Err(err) if force_drop_unsupported(&err) => {
                    let drop_sql = format!("DROP DATABASE \"{}\"", database_name);
                    sqlx::query(&drop_sql).execute(&admin_pool).await?;
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }

        fn force_drop_unsupported(err: &sqlx::Error) -> bool {
            matches!(
                err,
                sqlx::Error::Database(db_err)
                    if db_err
                        .code()
                        .map(|code| code == "42601" || code == "0A000")
                        .unwrap_or(false)
            )
        }

        impl Drop for TestDatabase {
            fn drop(&mut self) {
                if let Some(pool) = self.pool.take() {
                    let admin_options = self.admin_options.clone();
                    let db_name = self.database_name.clone();
                    if let Ok(handle) = Handle::try_current() {
                        handle.spawn(async move {
                            pool.close().await;
                            let _ = drop_database_with_fallback(admin_options, &db_name).await;
                        });
                    }
                }

                if let Some(container) = self.container.take() {
                    drop(container);
                }
            }
        }
    }

    /// Builder for constructing Rocket instances tailored for integration tests.
    #[derive(Default)]
    pub struct TestRocketBuilder {
        figment: Figment,
        mounts: Vec<(String, Vec<Route>)>,
        pg_pool: Option<PgPool>,
        config: Option<AppConfig>,
    }

    impl TestRocketBuilder {
        /// Start a builder with sensible defaults: random port, logging disabled.
        pub fn new() -> Self {
            let figment = rocket::Config::figment()
                .merge(("port", 0))
                .merge(("log_level", LogLevel::Off))
                .merge(("cli_colors", false));

            Self {
                figment,
                mounts: Vec::new(),
                pg_pool: None,
                config: None,
            }
        }

        /// Mount routes under `/api/v1`.
        pub fn mount_api_routes(mut self, routes: Vec<Route>) -> Self {
            self.mounts.push(("/api/v1".to_string(), routes));
            self
        }

        /// Manage a `PgPool` instance for tests that exercise database-backed routes.
        pub fn manage_pg_pool(mut self, pool: PgPool) -> Self {
            self.pg_pool = Some(pool);
            self
        }

        /// Manage an explicit application config instead of the defaults.
        pub fn manage_config(mut self, config: AppConfig) -> Self {
            self.config = Some(config);
            self
        }

        /// Finish building the Rocket instance.
        pub fn build(self) -> Rocket<Build> {
            let mut rocket = rocket::custom(self.figment)
                .manage(self.config.unwrap_or_default());

            for (base, routes) in self.mounts {
                rocket = rocket.mount(base, routes);
            }

            if let Some(pool) = self.pg_pool {
                rocket = rocket.manage(pool);
            }

            rocket
        }

        /// Convenience helper to produce a blocking local client.
        pub fn blocking_client(self) -> Client {
            Client::tracked(self.build()).expect("valid Rocket instance")
        }

        /// Convenience helper to produce an asynchronous local client.
        pub async fn async_client(self) -> AsyncClient {
            AsyncClient::tracked(self.build())
                .await
                .expect("valid Rocket instance")
        }
    }
}
