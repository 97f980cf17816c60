use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "postgres";
pub const DEFAULT_INPUT_PATH: &str = "assignment/configClear_v2.json";

/// Everything a pipeline run needs to know about its environment.
///
/// Credentials are never printed: the `Debug` implementation masks the password so the
/// configuration can be logged safely at startup.
#[derive(Clone)]
pub struct PipelineConfig {
    /// Hostname or address of the PostgreSQL server.
    pub db_host: String,
    /// TCP port of the PostgreSQL server.
    pub db_port: u16,
    /// Role used to authenticate.
    pub db_user: String,
    /// Password for `db_user`.
    pub db_password: String,
    /// Database holding the `interfaces` table.
    pub db_name: String,
    /// Path of the JSON configuration export to load.
    pub input_path: PathBuf,
}

impl PipelineConfig {
    /// Creates a configuration pointing at the default local server and input file.
    ///
    /// # Arguments
    ///
    /// * `db_user` - Role used to authenticate.
    /// * `db_password` - Password for the role.
    pub fn with_credentials(db_user: impl Into<String>, db_password: impl Into<String>) -> Self {
        Self {
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_user: db_user.into(),
            db_password: db_password.into(),
            db_name: DEFAULT_DB_NAME.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }

    /// Builds the `tokio_postgres` connection settings for this configuration.
    pub fn postgres_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.db_host)
            .port(self.db_port)
            .user(&self.db_user)
            .password(&self.db_password)
            .dbname(&self.db_name);
        pg
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"********")
            .field("db_name", &self.db_name)
            .field("input_path", &self.input_path)
            .finish()
    }
}
