//! crates/bookstore_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the bookstore's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete storage engine.

use async_trait::async_trait;
use crate::domain::{
    Book, BookChanges, BookDetails, Purchase, PurchaseChanges, PurchaseDetails, RecordId,
    Review, ReviewChanges, ReviewDetails, User, UserAccount, UserChanges,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., the database).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Record storage for the four bookstore tables.
///
/// Every table offers the same five operations. Lookups, updates and deletes
/// of a missing id return `PortError::NotFound`. Updates merge the given
/// changes onto the stored row and return the full result.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Users ---
    async fn list_users(&self) -> PortResult<Vec<User>>;

    async fn get_user_by_id(&self, user_id: RecordId) -> PortResult<User>;

    async fn create_user(&self, account: UserAccount) -> PortResult<User>;

    async fn update_user(&self, user_id: RecordId, changes: UserChanges) -> PortResult<User>;

    async fn delete_user(&self, user_id: RecordId) -> PortResult<()>;

    // --- Books ---
    async fn list_books(&self) -> PortResult<Vec<Book>>;

    async fn get_book_by_id(&self, book_id: RecordId) -> PortResult<Book>;

    async fn create_book(&self, details: BookDetails) -> PortResult<Book>;

    async fn update_book(&self, book_id: RecordId, changes: BookChanges) -> PortResult<Book>;

    async fn delete_book(&self, book_id: RecordId) -> PortResult<()>;

    // --- Purchases ---
    async fn list_purchases(&self) -> PortResult<Vec<Purchase>>;

    async fn get_purchase_by_id(&self, purchase_id: RecordId) -> PortResult<Purchase>;

    async fn create_purchase(&self, details: PurchaseDetails) -> PortResult<Purchase>;

    async fn update_purchase(
        &self,
        purchase_id: RecordId,
        changes: PurchaseChanges,
    ) -> PortResult<Purchase>;

    async fn delete_purchase(&self, purchase_id: RecordId) -> PortResult<()>;

    // --- Reviews ---
    async fn list_reviews(&self) -> PortResult<Vec<Review>>;

    async fn get_review_by_id(&self, review_id: RecordId) -> PortResult<Review>;

    async fn create_review(&self, details: ReviewDetails) -> PortResult<Review>;

    async fn update_review(
        &self,
        review_id: RecordId,
        changes: ReviewChanges,
    ) -> PortResult<Review>;

    async fn delete_review(&self, review_id: RecordId) -> PortResult<()>;
}
