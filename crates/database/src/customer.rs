//! Customer records converted from booked contacts.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Customer, CustomerSummary, CUSTOMER_SOURCE_CONTACT_FORM, CUSTOMER_STATUS_ACTIVE};

/// Create the customer for a contact (`source = contact_form`, `status = active`).
///
/// Fails with `AlreadyExists` if the contact already has a customer.
pub async fn create_customer_for_contact(pool: &SqlitePool, contact_id: i64) -> Result<Customer> {
    let result = sqlx::query(
        r#"
        INSERT INTO customers (contact_id, status, source)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(contact_id)
    .bind(CUSTOMER_STATUS_ACTIVE)
    .bind(CUSTOMER_SOURCE_CONTACT_FORM)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Customer for contact", contact_id))?;

    get_customer(pool, result.last_insert_rowid()).await
}

/// Get a customer by ID.
pub async fn get_customer(pool: &SqlitePool, id: i64) -> Result<Customer> {
    sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, contact_id, status, source, created_at
        FROM customers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Customer",
        id: id.to_string(),
    })
}

/// Get the customer converted from a contact, if any.
pub async fn find_customer_by_contact(pool: &SqlitePool, contact_id: i64) -> Result<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, contact_id, status, source, created_at
        FROM customers
        WHERE contact_id = ?
        "#,
    )
    .bind(contact_id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// List customers with their originating contact's name and email.
pub async fn list_customers(pool: &SqlitePool) -> Result<Vec<CustomerSummary>> {
    let customers = sqlx::query_as::<_, CustomerSummary>(
        r#"
        SELECT cu.id, cu.contact_id, cu.status, cu.source, cu.created_at,
               co.full_name, co.email
        FROM customers cu
        LEFT JOIN contacts co ON co.id = cu.contact_id
        ORDER BY cu.created_at DESC, cu.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(customers)
}

/// Count total customers.
pub async fn count_customers(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM customers
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
