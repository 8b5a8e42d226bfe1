use crate::config::DatabaseSettings;
use crate::error::ChatError;
use crate::listings::traits::ListingSource;
use crate::models::{FieldValue, ListingRecord};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Connection, Row, TypeInfo, ValueRef};
use tracing::{debug, info, warn};

const LISTINGS_QUERY: &str =
    "SELECT * FROM properties WHERE status = 'available' AND published = 1";

/// Reads the listings snapshot straight from MySQL.
/// Every call opens its own connection and closes it before returning.
pub struct MySqlListingReader {
    options: MySqlConnectOptions,
}

impl MySqlListingReader {
    pub fn new(settings: &DatabaseSettings) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name);

        Self { options }
    }
}

#[async_trait]
impl ListingSource for MySqlListingReader {
    async fn fetch_available_listings(&self) -> Result<Vec<ListingRecord>, ChatError> {
        debug!("Connecting to listings datastore");
        let mut conn = MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                warn!("Datastore connection failed: {}", e);
                ChatError::from(e)
            })?;

        let rows = match sqlx::query(LISTINGS_QUERY).fetch_all(&mut conn).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Listings query failed: {}", e);
                let _ = conn.close().await;
                return Err(e.into());
            }
        };

        if let Err(e) = conn.close().await {
            debug!("Datastore connection did not close cleanly: {}", e);
        }

        let listings: Vec<ListingRecord> = rows.iter().map(row_to_record).collect();
        info!("Fetched {} available listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "MySQL"
    }
}

fn row_to_record(row: &MySqlRow) -> ListingRecord {
    let mut record = ListingRecord::new();
    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_cell(row, index).unwrap_or_else(|e| {
            warn!("Could not decode column {}: {}", column.name(), e);
            FieldValue::Null
        });
        record.insert(column.name(), value);
    }
    record
}

/// Map one cell onto a `FieldValue` according to its MySQL column type
fn decode_cell(row: &MySqlRow, index: usize) -> Result<FieldValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(FieldValue::Null);
    }

    let type_name = row.columns()[index].type_info().name().to_string();
    let value = match type_name.as_str() {
        name if is_integer(name) && name.ends_with("UNSIGNED") => {
            let v: u64 = row.try_get_unchecked(index)?;
            match i64::try_from(v) {
                Ok(v) => FieldValue::Int(v),
                Err(_) => FieldValue::Text(v.to_string()),
            }
        }
        name if is_integer(name) => FieldValue::Int(row.try_get_unchecked::<i64, _>(index)?),
        "FLOAT" | "DOUBLE" => FieldValue::Float(row.try_get_unchecked::<f64, _>(index)?),
        "DATETIME" | "TIMESTAMP" => {
            let v: NaiveDateTime = row.try_get_unchecked(index)?;
            FieldValue::Text(v.format("%Y-%m-%d %H:%M:%S").to_string())
        }
        "DATE" => {
            let v: NaiveDate = row.try_get_unchecked(index)?;
            FieldValue::Text(v.format("%Y-%m-%d").to_string())
        }
        "TIME" => {
            let v: NaiveTime = row.try_get_unchecked(index)?;
            FieldValue::Text(v.format("%H:%M:%S").to_string())
        }
        // DECIMAL, CHAR/VARCHAR, TEXT, JSON and ENUM all arrive as text
        _ => FieldValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

fn is_integer(type_name: &str) -> bool {
    let base = type_name.split_whitespace().next().unwrap_or_default();
    matches!(
        base,
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR"
    )
}
