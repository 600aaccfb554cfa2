// crates/contract-forge-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Contract Store
// Description: Durable ContractStore backed by SQLite WAL.
// Purpose: Persist generated contracts with integrity verification.
// Dependencies: contract-forge-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each generated contract is stored as canonical JSON together with its
//! digest. Loads verify the record digest and the document content hash and
//! fail closed on any mismatch. Id assignment and download increments run
//! inside single statements or transactions on a mutex-guarded connection.
//!
//! Security posture: database contents are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use contract_forge_core::ContractId;
use contract_forge_core::ContractStore;
use contract_forge_core::GeneratedContract;
use contract_forge_core::NewContract;
use contract_forge_core::StoreError;
use contract_forge_core::hashing::DEFAULT_HASH_ALGORITHM;
use contract_forge_core::hashing::HashAlgorithm;
use contract_forge_core::hashing::canonical_json_bytes;
use contract_forge_core::hashing::hash_bytes;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Attempts at drawing an unused random identifier.
const MAX_ID_ATTEMPTS: usize = 8;
/// Maximum stored record size accepted by the store.
pub const MAX_RECORD_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` contract store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a configuration with default pragmas for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption or hash mismatch.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Store payload exceeded size limits.
    #[error("sqlite store payload too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual payload size in bytes.
        actual_bytes: usize,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::TooLarge {
                max_bytes,
                actual_bytes,
            } => Self::Invalid(format!(
                "record_json exceeds size limit: {actual_bytes} bytes (max {max_bytes})"
            )),
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Raw row fields read back from the contracts table.
struct StoredRow {
    /// Canonical JSON of the record.
    record_json: Vec<u8>,
    /// Stored record digest.
    record_hash: String,
    /// Digest algorithm label.
    hash_algorithm: String,
    /// Current download counter.
    download_count: i64,
}

/// `SQLite`-backed contract store with WAL support.
#[derive(Clone)]
pub struct SqliteContractStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteContractStore {
    /// Opens an `SQLite`-backed contract store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Inserts a new record under a fresh identifier.
    fn insert_record(&self, contract: NewContract) -> Result<GeneratedContract, SqliteStoreError> {
        let mut guard = self
            .connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let mut assigned = None;
        for _ in 0 .. MAX_ID_ATTEMPTS {
            let candidate = ContractId::generate();
            let exists: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM contracts WHERE id = ?1",
                    params![candidate.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            if exists.is_none() {
                assigned = Some(candidate);
                break;
            }
        }
        let Some(id) = assigned else {
            return Err(SqliteStoreError::Db("unable to allocate contract id".to_string()));
        };
        let record = contract.into_record(id);
        let record_json = canonical_json_bytes(&record)
            .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        if record_json.len() > MAX_RECORD_BYTES {
            return Err(SqliteStoreError::TooLarge {
                max_bytes: MAX_RECORD_BYTES,
                actual_bytes: record_json.len(),
            });
        }
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &record_json);
        tx.execute(
            "INSERT INTO contracts (id, contract_type, record_json, record_hash, hash_algorithm, \
             download_count, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
            params![
                record.id.as_str(),
                record.contract_type.as_str(),
                record_json,
                digest.value,
                digest.algorithm.label(),
                record.created_at.unix_millis()
            ],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(record)
    }

    /// Loads and verifies a record.
    fn load_record(&self, id: &ContractId) -> Result<Option<GeneratedContract>, SqliteStoreError> {
        let row = {
            let guard = self
                .connection
                .lock()
                .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
            let length: Option<i64> = guard
                .query_row(
                    "SELECT length(record_json) FROM contracts WHERE id = ?1",
                    params![id.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            let Some(length) = length else {
                return Ok(None);
            };
            let length = usize::try_from(length).map_err(|_| {
                SqliteStoreError::Invalid(format!("negative record length for {}", id.as_str()))
            })?;
            if length > MAX_RECORD_BYTES {
                return Err(SqliteStoreError::TooLarge {
                    max_bytes: MAX_RECORD_BYTES,
                    actual_bytes: length,
                });
            }
            let row = guard
                .query_row(
                    "SELECT record_json, record_hash, hash_algorithm, download_count FROM \
                     contracts WHERE id = ?1",
                    params![id.as_str()],
                    |row| {
                        Ok(StoredRow {
                            record_json: row.get(0)?,
                            record_hash: row.get(1)?,
                            hash_algorithm: row.get(2)?,
                            download_count: row.get(3)?,
                        })
                    },
                )
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            drop(guard);
            row
        };
        verify_row(id, row).map(Some)
    }

    /// Increments the download counter in a single statement.
    fn bump_download(&self, id: &ContractId) -> Result<bool, SqliteStoreError> {
        let guard = self
            .connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        let changed = guard
            .execute(
                "UPDATE contracts SET download_count = download_count + 1 WHERE id = ?1",
                params![id.as_str()],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(changed > 0)
    }
}

impl ContractStore for SqliteContractStore {
    fn create(&self, contract: NewContract) -> Result<GeneratedContract, StoreError> {
        self.insert_record(contract).map_err(StoreError::from)
    }

    fn get(&self, id: &ContractId) -> Result<Option<GeneratedContract>, StoreError> {
        self.load_record(id).map_err(StoreError::from)
    }

    fn increment_download(&self, id: &ContractId) -> Result<bool, StoreError> {
        self.bump_download(id).map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Verifies a stored row and rebuilds the record.
fn verify_row(id: &ContractId, row: StoredRow) -> Result<GeneratedContract, SqliteStoreError> {
    let algorithm = parse_hash_algorithm(&row.hash_algorithm)?;
    let expected = hash_bytes(algorithm, &row.record_json);
    if expected.value != row.record_hash {
        return Err(SqliteStoreError::Corrupt(format!("hash mismatch for contract {id}")));
    }
    let mut record: GeneratedContract = serde_json::from_slice(&row.record_json)
        .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
    if record.id != *id {
        return Err(SqliteStoreError::Invalid("id mismatch between key and payload".to_string()));
    }
    if !record.content_matches_hash() {
        return Err(SqliteStoreError::Corrupt(format!("content hash mismatch for contract {id}")));
    }
    record.download_count = u64::try_from(row.download_count).map_err(|_| {
        SqliteStoreError::Corrupt(format!("negative download count for contract {id}"))
    })?;
    Ok(record)
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS contracts (
                    id TEXT PRIMARY KEY,
                    contract_type TEXT NOT NULL,
                    record_json BLOB NOT NULL,
                    record_hash TEXT NOT NULL,
                    hash_algorithm TEXT NOT NULL,
                    download_count INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_contracts_created_at
                    ON contracts (created_at);",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Parses a hash algorithm label.
fn parse_hash_algorithm(label: &str) -> Result<HashAlgorithm, SqliteStoreError> {
    HashAlgorithm::from_label(label)
        .ok_or_else(|| SqliteStoreError::Invalid(format!("unsupported hash algorithm: {label}")))
}
