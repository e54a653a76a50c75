//! crates/bookstore_core/src/domain.rs
//!
//! Defines the pure, core data structures for the bookstore.
//! These structs are independent of any database or serialization format.

/// Identifier type shared by every table.
pub type RecordId = i64;

//=========================================================================================
// Shared Contact Fields
//=========================================================================================

/// The contact fields carried by users, purchases and reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetails {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: i64,
    pub gender: String,
    pub age: i64,
}

/// A partial set of contact fields. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<i64>,
    pub gender: Option<String>,
    pub age: Option<i64>,
}

//=========================================================================================
// Users
//=========================================================================================

/// Represents a registered user - the public view, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub person: PersonDetails,
}

// The full persisted field set for a user, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub person: PersonDetails,
    pub hashed_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub person: PersonChanges,
    pub hashed_password: Option<String>,
}

//=========================================================================================
// Books
//=========================================================================================

/// Represents a book in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: RecordId,
    pub details: BookDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub description: String,
    pub year: i64,
    pub publisher: String,
    pub quantity: i64,
    pub pages: i64,
    pub price: i64,
    pub cover: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub year: Option<i64>,
    pub publisher: Option<String>,
    pub quantity: Option<i64>,
    pub pages: Option<i64>,
    pub price: Option<i64>,
    pub cover: Option<String>,
}

//=========================================================================================
// Purchases and Reviews
//=========================================================================================

/// Represents a purchase made on behalf of a user.
///
/// `user_id` is a plain reference; it is not checked against the users table,
/// and a user may have any number of purchases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: RecordId,
    pub details: PurchaseDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDetails {
    pub user_id: RecordId,
    pub person: PersonDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseChanges {
    pub user_id: Option<RecordId>,
    pub person: PersonChanges,
}

/// Represents a review left for a book. Same caveats as `Purchase`, keyed by `book_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: RecordId,
    pub details: ReviewDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDetails {
    pub book_id: RecordId,
    pub person: PersonDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub book_id: Option<RecordId>,
    pub person: PersonChanges,
}

