//! Bulk load of the three raw collections.
//!
//! Orders, customers and products are fetched concurrently. The load is
//! all-or-nothing: if any source fails, every failure is reported together
//! and no dataset is produced.

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

use super::dataset::Dataset;
use crate::shared::config::DataConfig;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Which collection a source provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Orders,
    Customers,
    Products,
}

impl SourceKind {
    /// Keys the collection may be wrapped under in the payload
    fn envelope_keys(self) -> &'static [&'static str] {
        match self {
            SourceKind::Orders => &["pedidos", "orders"],
            SourceKind::Customers => &["clientes", "customers"],
            SourceKind::Products => &["produtos", "products"],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Orders => "orders",
            SourceKind::Customers => "customers",
            SourceKind::Products => "products",
        };
        f.write_str(name)
    }
}

/// Where a collection is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Http(String),
    File(PathBuf),
}

impl DataLocation {
    /// `http(s)://` locations are URLs; anything else is a path, resolved
    /// against `base_dir` when relative.
    pub fn parse(raw: &str, base_dir: Option<&Path>) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return DataLocation::Http(raw.to_string());
        }
        let path = Path::new(raw);
        match base_dir {
            Some(base) if path.is_relative() => DataLocation::File(base.join(path)),
            _ => DataLocation::File(path.to_path_buf()),
        }
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLocation::Http(url) => f.write_str(url),
            DataLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

/// Failure of the load as a whole
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to load data: {}", describe_failures(.0))]
    Sources(Vec<(SourceKind, SourceError)>),
}

impl LoadError {
    /// Sources that failed, in orders/customers/products order
    pub fn failed_sources(&self) -> Vec<SourceKind> {
        match self {
            LoadError::Client(_) => vec![],
            LoadError::Sources(failures) => failures.iter().map(|(kind, _)| *kind).collect(),
        }
    }
}

fn describe_failures(failures: &[(SourceKind, SourceError)]) -> String {
    failures
        .iter()
        .map(|(kind, err)| format!("{kind}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Fetch and normalize all three collections described by `config`
pub async fn load_dataset(config: &DataConfig) -> Result<Dataset, LoadError> {
    let started_at = Instant::now();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(LoadError::Client)?;

    let base_dir = config.base_dir.as_deref();
    let orders_at = DataLocation::parse(&config.orders, base_dir);
    let customers_at = DataLocation::parse(&config.customers, base_dir);
    let products_at = DataLocation::parse(&config.products, base_dir);

    let (orders, customers, products) = tokio::join!(
        fetch_records(&client, SourceKind::Orders, &orders_at),
        fetch_records(&client, SourceKind::Customers, &customers_at),
        fetch_records(&client, SourceKind::Products, &products_at),
    );

    let (orders, customers, products) = match (orders, customers, products) {
        (Ok(o), Ok(c), Ok(p)) => (o, c, p),
        (o, c, p) => {
            let failures: Vec<(SourceKind, SourceError)> = [
                (SourceKind::Orders, o.err()),
                (SourceKind::Customers, c.err()),
                (SourceKind::Products, p.err()),
            ]
            .into_iter()
            .filter_map(|(kind, err)| err.map(|e| (kind, e)))
            .collect();
            let err = LoadError::Sources(failures);
            tracing::warn!("{err}");
            return Err(err);
        }
    };

    let dataset = Dataset::from_raw(&orders, &customers, &products, &config.normalize_options());

    tracing::info!(
        "Dataset {} loaded: orders={}, customers={}, products={}, elapsed_ms={}",
        dataset.id(),
        dataset.orders().len(),
        dataset.customers().len(),
        dataset.products().len(),
        started_at.elapsed().as_millis()
    );

    Ok(dataset)
}

async fn fetch_records(
    client: &reqwest::Client,
    kind: SourceKind,
    location: &DataLocation,
) -> Result<Vec<Value>, SourceError> {
    tracing::info!("Loading {} from {}", kind, location);
    let payload = fetch_json(client, location).await?;
    extract_records(kind, payload)
}

async fn fetch_json(client: &reqwest::Client, location: &DataLocation) -> Result<Value, SourceError> {
    let bytes = match location {
        DataLocation::Http(url) => {
            let response = client.get(url).send().await.map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;
            if !response.status().is_success() {
                return Err(SourceError::Status {
                    url: url.clone(),
                    status: response.status(),
                });
            }
            response
                .bytes()
                .await
                .map_err(|source| SourceError::Http {
                    url: url.clone(),
                    source,
                })?
                .to_vec()
        }
        DataLocation::File(path) => tokio::fs::read(path).await.map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?,
    };

    Ok(serde_json::from_slice(&bytes)?)
}

/// Unwrap the record array from the payload.
///
/// Accepted shapes: a bare array of records, `{ "<key>": [...] }`, or an
/// array whose first element is such an object (`[ { "pedidos": [...] } ]`).
pub fn extract_records(kind: SourceKind, payload: Value) -> Result<Vec<Value>, SourceError> {
    match payload {
        Value::Array(mut items) => {
            let wrapped = items
                .first_mut()
                .and_then(Value::as_object_mut)
                .and_then(|first| take_envelope(kind, first));
            Ok(wrapped.unwrap_or(items))
        }
        Value::Object(mut map) => take_envelope(kind, &mut map).ok_or_else(|| {
            SourceError::Shape(format!(
                "object without any of the keys {:?}",
                kind.envelope_keys()
            ))
        }),
        other => Err(SourceError::Shape(format!(
            "expected an array or object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn take_envelope(kind: SourceKind, map: &mut serde_json::Map<String, Value>) -> Option<Vec<Value>> {
    kind.envelope_keys().iter().find_map(|key| match map.get_mut(*key) {
        Some(Value::Array(items)) => Some(std::mem::take(items)),
        _ => None,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
