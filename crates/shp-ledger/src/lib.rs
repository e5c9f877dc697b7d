//! Durable order ledger, one JSON document per identity.
//!
//! # Contract
//! - Scoped and isolated per identity key: no cross-identity visibility.
//!   Filenames are derived from a SHA-256 digest of the key, so an opaque
//!   identity string can never walk the filesystem.
//! - `append` assigns id (previous max + 1), timestamp and `Confirmed`
//!   status, then persists the full per-identity collection as one
//!   read-modify-write unit: serialize to a temp file, atomic rename.
//!   Either the new record is durably stored or the file is unchanged.
//! - Records are stored newest-first (the order history renders in that
//!   order); `list_for` returns them as stored.
//! - No update or delete operations exist.  Survives process restarts.
//!
//! The store is deliberately client-held (file-backed, no server-side
//! source of truth), preserving the reference deployment's behavior.

use anyhow::{Context, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use shp_checkout::{LedgerError, LedgerStore, OrderDraft};
use shp_schemas::{IdentityKey, OrderRecord, OrderStatus};

// ---------------------------------------------------------------------------
// OrderLedger
// ---------------------------------------------------------------------------

/// File-backed order ledger rooted at a directory.
#[derive(Debug, Clone)]
pub struct OrderLedger {
    dir: PathBuf,
}

impl OrderLedger {
    /// Create the ledger and ensure its directory exists.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("create_dir_all {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Per-identity file path.  The identity key is opaque and externally
    /// supplied; hashing it yields a stable, filesystem-safe name.
    fn file_for(&self, identity: &IdentityKey) -> PathBuf {
        let digest = Sha256::digest(identity.as_str().as_bytes());
        self.dir.join(format!("orders_{}.json", hex::encode(&digest[..16])))
    }

    fn read_all(&self, identity: &IdentityKey) -> Result<Vec<OrderRecord>> {
        let path = self.file_for(identity);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read ledger {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("parse ledger {:?}", path))
    }

    fn write_all(&self, identity: &IdentityKey, records: &[OrderRecord]) -> Result<()> {
        let path = self.file_for(identity);
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(records).context("serialize ledger")?;
        fs::write(&tmp, raw).with_context(|| format!("write ledger temp {:?}", tmp))?;
        fs::rename(&tmp, &path).with_context(|| format!("rename ledger into place {:?}", path))?;
        Ok(())
    }

    /// All records for `identity`, most-recent-first.
    pub fn list_for(&self, identity: &IdentityKey) -> Result<Vec<OrderRecord>> {
        self.read_all(identity)
    }

    fn append_inner(&self, identity: &IdentityKey, draft: OrderDraft) -> Result<OrderRecord> {
        let mut records = self.read_all(identity)?;

        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = OrderRecord {
            id: next_id,
            items: draft.items,
            total: draft.total,
            payment_id: draft.payment_id,
            order_id: draft.order_id,
            ts_utc: Utc::now(),
            status: OrderStatus::Confirmed,
        };

        // Newest first, matching how the history is listed.
        records.insert(0, record.clone());
        self.write_all(identity, &records)?;
        Ok(record)
    }
}

impl LedgerStore for OrderLedger {
    fn append(
        &self,
        identity: &IdentityKey,
        draft: OrderDraft,
    ) -> Result<OrderRecord, LedgerError> {
        self.append_inner(identity, draft)
            .map_err(|e| LedgerError::new(format!("{e:#}")))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
