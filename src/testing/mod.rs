use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::database::{Customer, CustomerStore, DatabaseError};

/// In-process `CustomerStore` for tests.
///
/// Assigns ids the way a `SERIAL` column does (1, 2, 3, ... never reused),
/// counts every store call, and can be switched into a failing mode that
/// behaves like a closed connection pool.
#[derive(Default)]
pub struct MemoryCustomerStore {
    rows: Mutex<Rows>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[derive(Default)]
struct Rows {
    last_id: i32,
    by_id: BTreeMap<i32, Customer>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing the call counter
    pub fn insert(&self, customer: Customer) -> Customer {
        let mut rows = self.rows();
        rows.last_id += 1;
        let stored = customer.with_id(rows.last_id);
        rows.by_id.insert(stored.id, stored.clone());
        stored
    }

    /// All rows ordered by id
    pub fn snapshot(&self) -> Vec<Customer> {
        self.rows().by_id.values().cloned().collect()
    }

    /// Number of `CustomerStore` calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail
    pub fn fail_with_closed_pool(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self, context: &'static str) -> Result<(), DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::query(context)(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, DatabaseError> {
        self.enter("can't create statement")?;
        Ok(self.insert(customer))
    }

    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError> {
        const CONTEXT: &str = "can't scan get statement";
        self.enter(CONTEXT)?;
        let found = self.rows().by_id.get(&id).cloned();
        found.ok_or_else(|| DatabaseError::query(CONTEXT)(sqlx::Error::RowNotFound))
    }

    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError> {
        self.enter("can't query get statement")?;
        Ok(self.snapshot())
    }

    async fn update_by_id(&self, id: i32, customer: &Customer) -> Result<(), DatabaseError> {
        self.enter("can't execute update statement")?;
        if let Some(row) = self.rows().by_id.get_mut(&id) {
            *row = customer.clone().with_id(id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DatabaseError> {
        self.enter("can't execute delete statement")?;
        self.rows().by_id.remove(&id);
        Ok(())
    }
}
