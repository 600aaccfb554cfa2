// crates/contract-forge-core/src/runtime/store.rs
// ============================================================================
// Module: Contract Forge In-Memory Store
// Description: In-memory contract store and shared store wrapper.
// Purpose: Provide a deterministic store without external dependencies.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryContractStore`] keeps records in a mutex-guarded map, so id
//! assignment and download increments are atomic within one process. Records
//! are lost on restart. [`SharedContractStore`] wraps any backend in a
//! clonable `Arc` trait object for hosts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::ContractId;
use crate::core::GeneratedContract;
use crate::core::NewContract;
use crate::interfaces::ContractStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Attempts at drawing an unused random identifier.
const MAX_ID_ATTEMPTS: usize = 8;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory contract store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContractStore {
    /// Records keyed by contract id, protected by a mutex.
    contracts: Arc<Mutex<BTreeMap<ContractId, GeneratedContract>>>,
}

impl InMemoryContractStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contracts: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Returns the number of stored contracts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .contracts
            .lock()
            .map_err(|_| StoreError::Store("contract store mutex poisoned".to_string()))?;
        Ok(guard.len())
    }

    /// Returns true when the store holds no contracts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ContractStore for InMemoryContractStore {
    fn create(&self, contract: NewContract) -> Result<GeneratedContract, StoreError> {
        let mut guard = self
            .contracts
            .lock()
            .map_err(|_| StoreError::Store("contract store mutex poisoned".to_string()))?;
        let id = (0 .. MAX_ID_ATTEMPTS)
            .map(|_| ContractId::generate())
            .find(|candidate| !guard.contains_key(candidate))
            .ok_or_else(|| StoreError::Store("unable to allocate contract id".to_string()))?;
        let record = contract.into_record(id.clone());
        guard.insert(id, record.clone());
        drop(guard);
        Ok(record)
    }

    fn get(&self, id: &ContractId) -> Result<Option<GeneratedContract>, StoreError> {
        let guard = self
            .contracts
            .lock()
            .map_err(|_| StoreError::Store("contract store mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn increment_download(&self, id: &ContractId) -> Result<bool, StoreError> {
        let mut guard = self
            .contracts
            .lock()
            .map_err(|_| StoreError::Store("contract store mutex poisoned".to_string()))?;
        let Some(record) = guard.get_mut(id) else {
            return Ok(false);
        };
        record.download_count = record.download_count.saturating_add(1);
        drop(guard);
        Ok(true)
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared contract store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedContractStore {
    /// Inner store implementation.
    inner: Arc<dyn ContractStore + Send + Sync>,
}

impl SharedContractStore {
    /// Wraps a contract store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ContractStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn ContractStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl ContractStore for SharedContractStore {
    fn create(&self, contract: NewContract) -> Result<GeneratedContract, StoreError> {
        self.inner.create(contract)
    }

    fn get(&self, id: &ContractId) -> Result<Option<GeneratedContract>, StoreError> {
        self.inner.get(id)
    }

    fn increment_download(&self, id: &ContractId) -> Result<bool, StoreError> {
        self.inner.increment_download(id)
    }
}
