use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Customer;

const INSERT_CUSTOMER: &str =
    "INSERT INTO customers (name, email, status) VALUES ($1, $2, $3) RETURNING id";

// Nullable text columns are read back as empty strings
const SELECT_CUSTOMERS: &str = "SELECT id, COALESCE(name, '') AS name, COALESCE(email, '') AS email, \
     COALESCE(status, '') AS status FROM customers";

const SELECT_CUSTOMER_BY_ID: &str = "SELECT id, COALESCE(name, '') AS name, COALESCE(email, '') AS email, \
     COALESCE(status, '') AS status FROM customers WHERE id = $1";

// $1 is the id; $2..$4 follow the struct field order
const UPDATE_CUSTOMER: &str =
    "UPDATE customers SET name = $2, email = $3, status = $4 WHERE id = $1";

const DELETE_CUSTOMER: &str = "DELETE FROM customers WHERE id = $1";

/// Typed CRUD over the `customers` table.
///
/// Update and delete against an id that matches no row succeed silently.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert the customer and return it with its newly assigned id
    async fn create_customer(&self, customer: Customer) -> Result<Customer, DatabaseError>;

    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError>;

    /// Every row, in no particular order
    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError>;

    async fn update_by_id(&self, id: i32, customer: &Customer) -> Result<(), DatabaseError>;

    async fn delete_by_id(&self, id: i32) -> Result<(), DatabaseError>;
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerRepository {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, DatabaseError> {
        let id: i32 = sqlx::query_scalar(INSERT_CUSTOMER)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.status)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::query("can't create statement"))?;

        Ok(customer.with_id(id))
    }

    async fn get_by_id(&self, id: i32) -> Result<Customer, DatabaseError> {
        sqlx::query_as::<_, Customer>(SELECT_CUSTOMER_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::query("can't scan get statement"))
    }

    async fn get_all(&self) -> Result<Vec<Customer>, DatabaseError> {
        sqlx::query_as::<_, Customer>(SELECT_CUSTOMERS)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::query("can't query get statement"))
    }

    async fn update_by_id(&self, id: i32, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query(UPDATE_CUSTOMER)
            .bind(id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.status)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("can't execute update statement"))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), DatabaseError> {
        sqlx::query(DELETE_CUSTOMER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("can't execute delete statement"))?;
        Ok(())
    }
}
