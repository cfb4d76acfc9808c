use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// Read one value from the sys_settings key-value table
pub async fn get(key: &str) -> Result<Option<String>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [key.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let value: String = row.try_get("", "value")?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Upsert one value into the sys_settings key-value table
pub async fn set(key: &str, value: &str, description: &str) -> Result<()> {
    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            key.to_string().into(),
            value.to_string().into(),
            description.to_string().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(())
}
