//! SQLite persistence layer for the Roving Travel back-office.
//!
//! This crate provides async database operations for contact inquiries,
//! converted customers, and email content overrides using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{contact, Database, NewContact};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:roving.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let new_contact = NewContact {
//!         full_name: "John Smith".to_string(),
//!         email: "john@example.com".to_string(),
//!         whatsapp: None,
//!         quantity: 2,
//!         preferred_date: "2024-12-25".to_string(),
//!         message: None,
//!     };
//!     let contact = contact::create_contact(db.pool(), &new_contact).await?;
//!     println!("created contact #{}", contact.id);
//!
//!     Ok(())
//! }
//! ```

pub mod contact;
pub mod customer;
pub mod email_content;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    Contact, ContactStatus, Customer, CustomerSummary, EmailContentOverride, NewContact,
    CUSTOMER_SOURCE_CONTACT_FORM, CUSTOMER_STATUS_ACTIVE,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    /// For `sqlite::memory:` use [`Database::connect_with_pool_size`] with a
    /// size of 1, since every pooled connection gets its own in-memory database.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Connect to a fresh in-memory database with migrations applied.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_contact(name: &str) -> NewContact {
        NewContact {
            full_name: name.to_string(),
            email: "john@example.com".to_string(),
            whatsapp: Some("+1 555 0100".to_string()),
            quantity: 2,
            preferred_date: "2024-12-25".to_string(),
            message: None,
        }
    }

    #[tokio::test]
    async fn test_contact_crud() {
        let db = Database::in_memory().await.unwrap();

        // Create
        let created = contact::create_contact(db.pool(), &new_contact("John Smith"))
            .await
            .unwrap();
        assert_eq!(created.status, ContactStatus::New);
        assert_eq!(created.quantity, 2);
        assert!(created.responsible.is_none());

        // Read
        let fetched = contact::get_contact(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched, created);

        // Update
        contact::update_status(db.pool(), created.id, ContactStatus::Contacted)
            .await
            .unwrap();
        contact::set_responsible(db.pool(), created.id, Some("Maya"))
            .await
            .unwrap();
        let fetched = contact::get_contact(db.pool(), created.id).await.unwrap();
        assert_eq!(fetched.status, ContactStatus::Contacted);
        assert_eq!(fetched.responsible.as_deref(), Some("Maya"));

        contact::set_responsible(db.pool(), created.id, Some("  "))
            .await
            .unwrap();
        let fetched = contact::get_contact(db.pool(), created.id).await.unwrap();
        assert!(fetched.responsible.is_none());

        // List
        let contacts = contact::list_contacts(db.pool(), None).await.unwrap();
        assert_eq!(contacts.len(), 1);
        let contacted = contact::list_contacts(db.pool(), Some(ContactStatus::Contacted))
            .await
            .unwrap();
        assert_eq!(contacted.len(), 1);
        let booked = contact::list_contacts(db.pool(), Some(ContactStatus::Booked))
            .await
            .unwrap();
        assert!(booked.is_empty());

        // Delete
        contact::delete_contact(db.pool(), created.id).await.unwrap();
        let result = contact::get_contact(db.pool(), created.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_contact_rejects_invalid_input() {
        let db = Database::in_memory().await.unwrap();

        let mut invalid = new_contact("John Smith");
        invalid.quantity = 0;
        let result = contact::create_contact(db.pool(), &invalid).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Validation(ValidationError::InvalidQuantity { .. }))
        ));
        assert_eq!(contact::count_contacts(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_contact_is_not_found() {
        let db = Database::in_memory().await.unwrap();

        let result = contact::update_status(db.pool(), 99, ContactStatus::Booked).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        let result = contact::delete_contact(db.pool(), 99).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_customer_is_unique_per_contact() {
        let db = Database::in_memory().await.unwrap();
        let created = contact::create_contact(db.pool(), &new_contact("John Smith"))
            .await
            .unwrap();

        let customer = customer::create_customer_for_contact(db.pool(), created.id)
            .await
            .unwrap();
        assert_eq!(customer.contact_id, Some(created.id));
        assert_eq!(customer.source, CUSTOMER_SOURCE_CONTACT_FORM);
        assert_eq!(customer.status, CUSTOMER_STATUS_ACTIVE);

        let second = customer::create_customer_for_contact(db.pool(), created.id).await;
        assert!(matches!(second, Err(DatabaseError::AlreadyExists { .. })));
        assert_eq!(customer::count_customers(db.pool()).await.unwrap(), 1);

        let found = customer::find_customer_by_contact(db.pool(), created.id)
            .await
            .unwrap();
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn test_customer_survives_contact_deletion() {
        let db = Database::in_memory().await.unwrap();
        let created = contact::create_contact(db.pool(), &new_contact("Ana"))
            .await
            .unwrap();
        let customer = customer::create_customer_for_contact(db.pool(), created.id)
            .await
            .unwrap();

        let listed = customer::list_customers(db.pool()).await.unwrap();
        assert_eq!(listed[0].full_name.as_deref(), Some("Ana"));

        contact::delete_contact(db.pool(), created.id).await.unwrap();

        let orphan = customer::get_customer(db.pool(), customer.id).await.unwrap();
        assert!(orphan.contact_id.is_none());
    }

    #[tokio::test]
    async fn test_email_content_override_upsert() {
        let db = Database::in_memory().await.unwrap();

        assert!(email_content::get_override(db.pool(), "confirmation")
            .await
            .unwrap()
            .is_none());

        email_content::upsert_override(db.pool(), "confirmation", r#"{"subject":"A"}"#)
            .await
            .unwrap();
        email_content::upsert_override(db.pool(), "confirmation", r#"{"subject":"B"}"#)
            .await
            .unwrap();

        let stored = email_content::get_override(db.pool(), "confirmation")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.content, r#"{"subject":"B"}"#);
        assert_eq!(email_content::list_overrides(db.pool()).await.unwrap().len(), 1);

        assert!(email_content::delete_override(db.pool(), "confirmation")
            .await
            .unwrap());
        assert!(!email_content::delete_override(db.pool(), "confirmation")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_count_contacts_by_status() {
        let db = Database::in_memory().await.unwrap();
        for name in ["A", "B", "C"] {
            contact::create_contact(db.pool(), &new_contact(name))
                .await
                .unwrap();
        }
        contact::update_status(db.pool(), 1, ContactStatus::Fake)
            .await
            .unwrap();

        let counts = contact::count_contacts_by_status(db.pool()).await.unwrap();
        assert_eq!(counts[0], (ContactStatus::New, 2));
        assert_eq!(counts[1], (ContactStatus::Fake, 1));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("booked".parse::<ContactStatus>(), Ok(ContactStatus::Booked));
        assert!(matches!(
            "invalid-value".parse::<ContactStatus>(),
            Err(ValidationError::InvalidStatus(_))
        ));
    }
}
