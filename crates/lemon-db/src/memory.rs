//! In-process stores for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use lemon_core::StoreError;
use lemon_models::{Account, CreateFeedbackDto, Feedback, Role};

use crate::accounts::AccountRepository;
use crate::feedback::FeedbackRepository;

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend(anyhow::anyhow!("in-memory store lock poisoned"))
}

/// Account store keyed by account id.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account directly, bypassing the uniqueness check.
    pub fn seed(&self, account: Account) {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(account.id.clone(), account);
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn lookup_account_by_username(&self, username: &str) -> Result<Account, StoreError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        accounts
            .values()
            .find(|a| a.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn lookup_account_by_id(&self, id: &str) -> Result<Account, StoreError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        accounts.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn persist_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(&account.id)
            || accounts.values().any(|a| a.username == account.username)
        {
            return Err(StoreError::Conflict);
        }
        accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        let stored = accounts.get_mut(&account.id).ok_or(StoreError::NotFound)?;
        stored.hash = account.hash.clone();
        stored.save_state = account.save_state.clone();
        Ok(())
    }

    async fn update_account_role(&self, id: &str, role: Role) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        let stored = accounts.get_mut(id).ok_or(StoreError::NotFound)?;
        stored.role = role;
        Ok(())
    }

    async fn delete_account(&self, id: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        accounts.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[derive(Debug, Default)]
struct FeedbackTable {
    next_id: i64,
    rows: Vec<Feedback>,
}

#[derive(Debug, Default)]
pub struct MemoryFeedbackRepository {
    table: RwLock<FeedbackTable>,
}

impl MemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn insert_feedback(&self, dto: &CreateFeedbackDto) -> Result<i64, StoreError> {
        let mut table = self.table.write().map_err(poisoned)?;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push(Feedback {
            id,
            rating: dto.rating,
            description: dto.description.clone(),
            kind: dto.kind.clone(),
            submitted: Utc::now(),
            read: false,
        });
        Ok(id)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.rows.iter().rev().cloned().collect())
    }

    async fn find_feedback(&self, id: i64) -> Result<Feedback, StoreError> {
        let table = self.table.read().map_err(poisoned)?;
        table
            .rows
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn mark_feedback_read(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().map_err(poisoned)?;
        let row = table
            .rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound)?;
        row.read = true;
        Ok(())
    }
}
