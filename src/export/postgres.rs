use super::types::{InsertOutcome, InterfaceRow, ProvisionOutcome};
use crate::parse::InterfaceRecord;
use anyhow::{Context, Result as AnyhowResult};
use log::{error, info, warn};
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Transaction};

/// Maximum number of rows sent in one `INSERT` statement.
///
/// Each row binds 5 parameters and PostgreSQL caps a statement at 65535 bind parameters.
pub const INSERT_BATCH_SIZE: usize = 1000;

/// DDL for the destination table.
///
/// `connection`, `type` and `infra_type` exist for downstream classification and are left
/// `NULL` by the loader.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE interfaces (
  id SERIAL PRIMARY KEY,
  connection INTEGER,
  name VARCHAR(255) NOT NULL,
  description VARCHAR(255),
  config JSON,
  type VARCHAR(50),
  infra_type VARCHAR(50),
  port_channel_id INTEGER,
  max_frame_size INTEGER
)";

const PARAMS_PER_ROW: usize = 5;

/// Creates the `interfaces` table inside its own transaction.
///
/// An existing table is an expected condition: the attempt is rolled back, a warning is
/// logged and the existing table and its rows are left untouched.
///
/// # Arguments
///
/// * `client` - Connected PostgreSQL client.
///
/// # Returns
///
/// * `Ok(ProvisionOutcome::Created)` - The table has been created and committed.
/// * `Ok(ProvisionOutcome::AlreadyExists)` - The table was already present.
/// * `Err(anyhow::Error)` - Any other failure; the pipeline cannot continue.
pub async fn provision_table(client: &mut Client) -> AnyhowResult<ProvisionOutcome> {
  let transaction = client
    .transaction()
    .await
    .context("Failed to start table creation transaction")?;

  let created = transaction.execute(CREATE_TABLE_SQL, &[]).await;
  match created {
    Ok(_) => {
      transaction
        .commit()
        .await
        .context("Failed to commit table creation")?;
      info!("Created table interfaces");
      Ok(ProvisionOutcome::Created)
    }
    Err(e) if e.code() == Some(&SqlState::DUPLICATE_TABLE) => {
      transaction
        .rollback()
        .await
        .context("Failed to roll back table creation")?;
      warn!("Table interfaces already exists");
      Ok(ProvisionOutcome::AlreadyExists)
    }
    Err(e) => Err(anyhow::Error::new(e).context("Failed to create interfaces table")),
  }
}

/// Inserts the given interfaces in a single transaction.
///
/// Records are shaped into rows and written with multi-row `INSERT` statements of at most
/// [`INSERT_BATCH_SIZE`] rows. Any failure, including a record whose field does not fit its
/// column, rolls back the whole transaction, so either every row is persisted or none is. Failures are reported through the outcome, never retried.
///
/// # Arguments
///
/// * `client` - Connected PostgreSQL client.
/// * `records` - The eligible interfaces, in the order they should be inserted.
///
/// # Returns
///
/// * `InsertOutcome::Inserted(n)` - `n` rows were committed (`0` for an empty input).
/// * `InsertOutcome::RolledBack(cause)` - Nothing was written.
///
/// # Examples
///
/// ```rust,no_run
/// use interface_loader::export::{insert_interfaces, InsertOutcome};
/// use interface_loader::parse::InterfaceRecord;
/// use serde_json::json;
/// use tokio_postgres::NoTls;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///   let (mut client, connection) =
///     tokio_postgres::connect("host=localhost user=postgres password=example", NoTls).await?;
///   tokio::spawn(connection);
///
///   let record = InterfaceRecord::new(
///     "GigabitEthernet",
///     Some("0/1".to_string()),
///     Some("uplink".to_string()),
///     Some(1500),
///     json!({"name": "0/1"}),
///     None,
///   );
///   let outcome = insert_interfaces(&mut client, &[record]).await;
///   assert_eq!(outcome, InsertOutcome::Inserted(1));
///   Ok(())
/// }
/// ```
pub async fn insert_interfaces(client: &mut Client, records: &[InterfaceRecord]) -> InsertOutcome {
  if records.is_empty() {
    info!("No interfaces to insert");
    return InsertOutcome::Inserted(0);
  }

  match write_rows(client, records).await {
    Ok(written) => {
      info!("Inserted {} interface(s)", written);
      InsertOutcome::Inserted(written)
    }
    Err(e) => {
      error!("Error occurred: {:#}, rolled back", e);
      InsertOutcome::RolledBack(format!("{:#}", e))
    }
  }
}

/// Runs every batch inside one transaction, rolling it back on the first failure.
async fn write_rows(client: &mut Client, records: &[InterfaceRecord]) -> AnyhowResult<usize> {
  let transaction = client
    .transaction()
    .await
    .context("Failed to start insert transaction")?;

  let inserted = match shape_rows(records) {
    Ok(rows) => insert_batches(&transaction, &rows).await,
    Err(e) => Err(e),
  };
  match inserted {
    Ok(written) => {
      transaction
        .commit()
        .await
        .context("Failed to commit inserted interfaces")?;
      Ok(written)
    }
    Err(e) => {
      if let Err(rollback_err) = transaction.rollback().await {
        warn!("Rollback of interfaces insert failed: {}", rollback_err);
      }
      Err(e)
    }
  }
}

/// Shapes every record into a row, failing on the first record with a type mismatch.
fn shape_rows(records: &[InterfaceRecord]) -> AnyhowResult<Vec<InterfaceRow>> {
  records
    .iter()
    .map(|record| InterfaceRow::try_from(record).context("Failed to shape interfaces into rows"))
    .collect()
}

async fn insert_batches(transaction: &Transaction<'_>, rows: &[InterfaceRow]) -> AnyhowResult<usize> {
  let mut written = 0;
  for batch in rows.chunks(INSERT_BATCH_SIZE) {
    written += insert_batch(transaction, batch).await? as usize;
  }
  Ok(written)
}

/// Executes a multi-row insert into the `interfaces` table.
///
/// # Arguments
///
/// * `transaction` - Active database transaction.
/// * `batch` - Rows to insert; at most [`INSERT_BATCH_SIZE`].
///
/// # Returns
///
/// * `Ok(u64)` - Number of rows inserted.
/// * `Err(anyhow::Error)` - Query execution failed.
async fn insert_batch(transaction: &Transaction<'_>, batch: &[InterfaceRow]) -> AnyhowResult<u64> {
  let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(batch.len() * PARAMS_PER_ROW);
  for row in batch {
    params.extend_from_slice(&[
      &row.name,
      &row.description,
      &row.max_frame_size,
      &row.config,
      &row.port_channel_id,
    ]);
  }

  let sql = batch_insert_sql(batch.len());
  let inserted = transaction
    .execute(sql.as_str(), &params)
    .await
    .context("Failed to insert batch into interfaces")?;
  Ok(inserted)
}

/// Builds the `INSERT` statement for `row_count` rows with numbered placeholders.
fn batch_insert_sql(row_count: usize) -> String {
  let placeholders: Vec<String> = (0..row_count)
    .map(|j| {
      let base = j * PARAMS_PER_ROW;
      format!("(${},${},${},${},${})", base + 1, base + 2, base + 3, base + 4, base + 5)
    })
    .collect();

  format!(
    "INSERT INTO interfaces (name, description, max_frame_size, config, port_channel_id) VALUES {}",
    placeholders.join(",")
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn record(name: &str, type_errors: Vec<String>) -> InterfaceRecord {
    InterfaceRecord::new(
      "GigabitEthernet",
      Some(name.to_string()),
      None,
      None,
      json!({"name": name}),
      None,
    )
    .with_type_errors(type_errors)
  }

  #[test]
  fn test_shape_rows_keeps_order() {
    let rows = shape_rows(&[record("0/1", vec![]), record("0/2", vec![])]).unwrap();
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["GigabitEthernet0/1", "GigabitEthernet0/2"]);
  }

  /// One bad record fails the whole batch before anything is sent.
  #[test]
  fn test_shape_rows_fails_on_any_type_mismatch() {
    let records = [
      record("0/1", vec![]),
      record("0/2", vec!["mtu: 4294967296 does not fit an INTEGER column".to_string()]),
      record("0/3", vec![]),
    ];
    let message = format!("{:#}", shape_rows(&records).unwrap_err());
    assert!(message.contains("GigabitEthernet0/2"), "{}", message);
    assert!(message.contains("does not fit an INTEGER column"), "{}", message);
  }

  #[test]
  fn test_batch_insert_sql_single_row() {
    assert_eq!(
      batch_insert_sql(1),
      "INSERT INTO interfaces (name, description, max_frame_size, config, port_channel_id) VALUES ($1,$2,$3,$4,$5)"
    );
  }

  #[test]
  fn test_batch_insert_sql_numbers_placeholders_across_rows() {
    let sql = batch_insert_sql(3);
    assert!(sql.ends_with("VALUES ($1,$2,$3,$4,$5),($6,$7,$8,$9,$10),($11,$12,$13,$14,$15)"));
  }

  #[test]
  fn test_batch_size_stays_under_parameter_limit() {
    assert!(INSERT_BATCH_SIZE * PARAMS_PER_ROW <= u16::MAX as usize);
    assert!(batch_insert_sql(INSERT_BATCH_SIZE).ends_with("$4996,$4997,$4998,$4999,$5000)"));
  }

  #[test]
  fn test_create_table_sql_has_every_column() {
    for column in [
      "id SERIAL PRIMARY KEY",
      "connection INTEGER",
      "name VARCHAR(255) NOT NULL",
      "description VARCHAR(255)",
      "config JSON",
      "type VARCHAR(50)",
      "infra_type VARCHAR(50)",
      "port_channel_id INTEGER",
      "max_frame_size INTEGER",
    ] {
      assert!(CREATE_TABLE_SQL.contains(column), "missing column: {}", column);
    }
  }
}
