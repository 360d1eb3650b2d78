//! Customer repository: CRUD.

use chrono::Utc;

use tempo_core::entities::Customer;
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::PREFIX_CUSTOMER;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, to_detail};
use crate::service::TempoService;
use crate::updates::customer::CustomerUpdate;

const SELECT_COLS: &str = "id, name, active, created_at, updated_at";

fn row_to_customer(row: &libsql::Row) -> Result<Customer, DatabaseError> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        active: row.get::<i64>(2)? != 0,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl TempoService {
    pub async fn create_customer(&self, name: &str) -> Result<Customer, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CUSTOMER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO customers (id, name, active, created_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?4)",
                libsql::params![id.as_str(), name, now.to_rfc3339(), now.to_rfc3339()],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Customer, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Customer {
            id,
            name: name.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM customers WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_customer(&row)
    }

    pub async fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM customers WHERE name = ?1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_customer(&row)?)),
            None => Ok(None),
        }
    }

    /// Look a customer up by ID, falling back to its name.
    pub async fn find_customer(&self, key: &str) -> Result<Customer, DatabaseError> {
        match self.get_customer(key).await {
            Err(DatabaseError::NoResult) => self
                .get_customer_by_name(key)
                .await?
                .ok_or(DatabaseError::NoResult),
            other => other,
        }
    }

    pub async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM customers ORDER BY name LIMIT {limit}"),
                (),
            )
            .await?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next().await? {
            customers.push(row_to_customer(&row)?);
        }
        Ok(customers)
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        update: CustomerUpdate,
    ) -> Result<Customer, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref name) = update.name {
            params.push(name.clone().into());
            sets.push(format!("name = ?{}", params.len()));
        }
        if let Some(active) = update.active {
            params.push(i64::from(active).into());
            sets.push(format!("active = ?{}", params.len()));
        }

        if sets.is_empty() {
            return self.get_customer(customer_id).await;
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(customer_id.into());
        let sql = format!(
            "UPDATE customers SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(DatabaseError::from_write)?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.record_audit(
            EntityType::Customer,
            customer_id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
            now,
        )
        .await?;

        self.get_customer(customer_id).await
    }

    /// Delete a customer. Fails with `Constraint` while projects reference it.
    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM customers WHERE id = ?1", [customer_id])
            .await
            .map_err(DatabaseError::from_write)?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.record_audit(EntityType::Customer, customer_id, AuditAction::Deleted, None, now)
            .await
    }
}
