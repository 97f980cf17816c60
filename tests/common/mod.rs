use interface_loader::config::PipelineConfig;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_postgres::{Client, NoTls};

static NEXT_DATABASE: AtomicUsize = AtomicUsize::new(0);

/// Get test configuration from environment variables
pub fn get_test_config(db_name: &str, input_path: &Path) -> PipelineConfig {
    // Use TEST_ prefix for test environment variables
    PipelineConfig {
        db_host: env::var("TEST_PG_HOST").unwrap_or_else(|_| "localhost".to_string()),
        db_port: env::var("TEST_PG_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(5432),
        db_user: env::var("TEST_PG_USERNAME").unwrap_or_else(|_| "postgres".to_string()),
        db_password: env::var("TEST_PG_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
        db_name: db_name.to_string(),
        input_path: input_path.to_path_buf(),
    }
}

/// Connects with the given configuration and drives the connection in the background.
pub async fn connect(config: &PipelineConfig) -> Client {
    let (client, connection) = config.postgres_config().connect(NoTls).await.unwrap();
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("Test connection error: {}", e);
        }
    });
    client
}

/// A throwaway database so every test starts without an `interfaces` table.
pub struct TestDatabase {
    pub name: String,
    admin: Client,
}

impl TestDatabase {
    pub async fn create() -> Self {
        let name = format!(
            "interface_loader_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::SeqCst)
        );
        let admin_db = env::var("TEST_PG_DATABASE").unwrap_or_else(|_| "postgres".to_string());
        let admin = connect(&get_test_config(&admin_db, Path::new("unused.json"))).await;
        admin
            .batch_execute(&format!("CREATE DATABASE {}", name))
            .await
            .unwrap();
        Self { name, admin }
    }

    pub fn config(&self, input_path: &Path) -> PipelineConfig {
        get_test_config(&self.name, input_path)
    }

    pub async fn cleanup(self) {
        self.admin
            .batch_execute(&format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", self.name))
            .await
            .unwrap();
    }
}

/// Wraps an interface tree in the UniConfig/IOS-XE envelope.
pub fn native_document(interfaces: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "frinx-uniconfig-topology:configuration": {
            "Cisco-IOS-XE-native:native": {
                "interface": interfaces
            }
        }
    })
}
