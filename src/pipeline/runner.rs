use crate::config::PipelineConfig;
use crate::export::{insert_interfaces, provision_table, InsertOutcome, ProvisionOutcome};
use crate::parse::{filter_eligible, load_document, parse_native_config, InterfaceRecord};
use anyhow::{Context, Result as AnyhowResult};
use log::{error, info};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether the table was created or already present.
    pub provision: ProvisionOutcome,
    /// Interface entries found in the export.
    pub parsed: usize,
    /// Entries left after dropping excluded groups.
    pub eligible: usize,
    /// Result of the batch insert.
    pub insert: InsertOutcome,
}

/// A single load run against one PostgreSQL database.
///
/// The client and its connection task are exclusive to the pipeline: one statement is in
/// flight at a time and every step waits for the previous one to finish.
pub struct Pipeline {
    config: PipelineConfig,
    client: Client,
    connection: JoinHandle<()>,
}

impl Pipeline {
    /// Connects to the database described by `config`.
    ///
    /// The connection future is driven by a spawned task that lives until [`Pipeline::close`].
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Connected and ready to run.
    /// * `Err(anyhow::Error)` - The server could not be reached or rejected the credentials.
    pub async fn connect(config: PipelineConfig) -> AnyhowResult<Self> {
        let (client, connection) = config
            .postgres_config()
            .connect(NoTls)
            .await
            .context(format!(
                "Failed to connect to PostgreSQL at {}:{}/{}",
                config.db_host, config.db_port, config.db_name
            ))?;
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("Database connection error: {}", e);
            }
        });
        info!(
            "Connected to PostgreSQL at {}:{}/{}",
            config.db_host, config.db_port, config.db_name
        );

        Ok(Self {
            config,
            client,
            connection,
        })
    }

    /// Ensures the `interfaces` table exists.
    pub async fn provision_table(&mut self) -> AnyhowResult<ProvisionOutcome> {
        provision_table(&mut self.client).await
    }

    /// Reads the configured export and returns every interface entry it declares.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<InterfaceRecord>)` - All entries in document order, eligible or not.
    /// * `Err(anyhow::Error)` - The file is unreadable or the document is malformed.
    pub fn parse_interfaces(&self) -> AnyhowResult<Vec<InterfaceRecord>> {
        let path = &self.config.input_path;
        let document = load_document(path)?;
        let records = parse_native_config(&document)
            .context(format!("Failed to parse interfaces from {}", path.display()))?;
        info!("Parsed {} interface(s) from {}", records.len(), path.display());
        Ok(records)
    }

    /// Writes `records` to the `interfaces` table in one transaction.
    pub async fn insert(&mut self, records: &[InterfaceRecord]) -> InsertOutcome {
        insert_interfaces(&mut self.client, records).await
    }

    /// Drops the client and waits for the connection task to finish.
    pub async fn close(self) -> AnyhowResult<()> {
        drop(self.client);
        self.connection
            .await
            .context("Database connection task failed")?;
        info!("Closed PostgreSQL connection");
        Ok(())
    }

    /// Runs every step in order and closes the connection.
    ///
    /// Insert failures are reported in the summary and do not abort the run; everything else
    /// is propagated.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use interface_loader::config::PipelineConfig;
    /// use interface_loader::pipeline::Pipeline;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = PipelineConfig::with_credentials("postgres", "example");
    ///     let summary = Pipeline::connect(config).await?.run().await?;
    ///     println!("kept {} of {} interfaces", summary.eligible, summary.parsed);
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(mut self) -> AnyhowResult<RunSummary> {
        let provision = self.provision_table().await?;

        let records = self.parse_interfaces()?;
        let parsed = records.len();
        let eligible_records = filter_eligible(records);
        let eligible = eligible_records.len();
        info!("Kept {} of {} interface(s) after group filtering", eligible, parsed);

        let insert = self.insert(&eligible_records).await;

        self.close().await?;

        Ok(RunSummary {
            provision,
            parsed,
            eligible,
            insert,
        })
    }
}
