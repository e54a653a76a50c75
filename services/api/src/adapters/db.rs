//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.
//!
//! Every operation is a single statement on a connection borrowed from the pool
//! for that statement only. Partial updates merge in SQL (`COALESCE(?, column)`),
//! so concurrent writers queue on SQLite's busy timeout instead of failing.

use async_trait::async_trait;
use bookstore_core::domain::{
    Book, BookChanges, BookDetails, PersonDetails, Purchase, PurchaseChanges, PurchaseDetails,
    RecordId, Review, ReviewChanges, ReviewDetails, User, UserAccount, UserChanges,
};
use bookstore_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use std::time::Duration;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool for `database_url`, creating the database file if absent.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
    }

    /// A helper function to create the schema at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn not_found(entity: &str, id: RecordId) -> PortError {
    PortError::NotFound(format!("{} {} not found", entity, id))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    first_name: String,
    last_name: String,
    email_address: String,
    phone_number: i64,
    gender: String,
    age: i64,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            person: PersonDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                email_address: self.email_address,
                phone_number: self.phone_number,
                gender: self.gender,
                age: self.age,
            },
        }
    }
}

#[derive(FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    author: String,
    description: String,
    year: i64,
    publisher: String,
    quantity: i64,
    pages: i64,
    price: i64,
    cover: String,
}
impl BookRecord {
    fn to_domain(self) -> Book {
        Book {
            id: self.id,
            details: BookDetails {
                title: self.title,
                author: self.author,
                description: self.description,
                year: self.year,
                publisher: self.publisher,
                quantity: self.quantity,
                pages: self.pages,
                price: self.price,
                cover: self.cover,
            },
        }
    }
}

// Purchases and reviews share one row shape apart from the name of the reference column,
// which the queries alias to `ref_id`.
#[derive(FromRow)]
struct ContactRecord {
    id: i64,
    ref_id: i64,
    first_name: String,
    last_name: String,
    email_address: String,
    phone_number: i64,
    gender: String,
    age: i64,
}
impl ContactRecord {
    fn into_parts(self) -> (RecordId, RecordId, PersonDetails) {
        let person = PersonDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            phone_number: self.phone_number,
            gender: self.gender,
            age: self.age,
        };
        (self.id, self.ref_id, person)
    }

    fn to_purchase(self) -> Purchase {
        let (id, user_id, person) = self.into_parts();
        Purchase {
            id,
            details: PurchaseDetails { user_id, person },
        }
    }

    fn to_review(self) -> Review {
        let (id, book_id, person) = self.into_parts();
        Review {
            id,
            details: ReviewDetails { book_id, person },
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    // --- Users ---

    async fn list_users(&self) -> PortResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, email_address, phone_number, gender, age FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_user_by_id(&self, user_id: RecordId) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, email_address, phone_number, gender, age FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("User", user_id))?;

        Ok(record.to_domain())
    }

    async fn create_user(&self, account: UserAccount) -> PortResult<User> {
        let person = &account.person;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (first_name, last_name, email_address, phone_number, gender, age, hashed_password) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email_address)
        .bind(person.phone_number)
        .bind(&person.gender)
        .bind(person.age)
        .bind(&account.hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(User {
            id,
            person: account.person,
        })
    }

    async fn update_user(&self, user_id: RecordId, changes: UserChanges) -> PortResult<User> {
        let person = changes.person;
        let record = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name), email_address = COALESCE(?, email_address), phone_number = COALESCE(?, phone_number), gender = COALESCE(?, gender), age = COALESCE(?, age), hashed_password = COALESCE(?, hashed_password) WHERE id = ? RETURNING id, first_name, last_name, email_address, phone_number, gender, age",
        )
        .bind(person.first_name)
        .bind(person.last_name)
        .bind(person.email_address)
        .bind(person.phone_number)
        .bind(person.gender)
        .bind(person.age)
        .bind(changes.hashed_password)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("User", user_id))?;

        Ok(record.to_domain())
    }

    async fn delete_user(&self, user_id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(not_found("User", user_id));
        }
        Ok(())
    }

    // --- Books ---

    async fn list_books(&self) -> PortResult<Vec<Book>> {
        let records = sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, author, description, year, publisher, quantity, pages, price, cover FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_book_by_id(&self, book_id: RecordId) -> PortResult<Book> {
        let record = sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, author, description, year, publisher, quantity, pages, price, cover FROM books WHERE id = ?",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Book", book_id))?;

        Ok(record.to_domain())
    }

    async fn create_book(&self, details: BookDetails) -> PortResult<Book> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO books (title, author, description, year, publisher, quantity, pages, price, cover) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&details.title)
        .bind(&details.author)
        .bind(&details.description)
        .bind(details.year)
        .bind(&details.publisher)
        .bind(details.quantity)
        .bind(details.pages)
        .bind(details.price)
        .bind(&details.cover)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(Book { id, details })
    }

    async fn update_book(&self, book_id: RecordId, changes: BookChanges) -> PortResult<Book> {
        let record = sqlx::query_as::<_, BookRecord>(
            "UPDATE books SET title = COALESCE(?, title), author = COALESCE(?, author), description = COALESCE(?, description), year = COALESCE(?, year), publisher = COALESCE(?, publisher), quantity = COALESCE(?, quantity), pages = COALESCE(?, pages), price = COALESCE(?, price), cover = COALESCE(?, cover) WHERE id = ? RETURNING id, title, author, description, year, publisher, quantity, pages, price, cover",
        )
        .bind(changes.title)
        .bind(changes.author)
        .bind(changes.description)
        .bind(changes.year)
        .bind(changes.publisher)
        .bind(changes.quantity)
        .bind(changes.pages)
        .bind(changes.price)
        .bind(changes.cover)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Book", book_id))?;

        Ok(record.to_domain())
    }

    async fn delete_book(&self, book_id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Book", book_id));
        }
        Ok(())
    }

    // --- Purchases ---

    async fn list_purchases(&self) -> PortResult<Vec<Purchase>> {
        let records = sqlx::query_as::<_, ContactRecord>(
            "SELECT id, user_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age FROM purchases ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_purchase()).collect())
    }

    async fn get_purchase_by_id(&self, purchase_id: RecordId) -> PortResult<Purchase> {
        let record = sqlx::query_as::<_, ContactRecord>(
            "SELECT id, user_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age FROM purchases WHERE id = ?",
        )
        .bind(purchase_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Purchase", purchase_id))?;

        Ok(record.to_purchase())
    }

    async fn create_purchase(&self, details: PurchaseDetails) -> PortResult<Purchase> {
        let person = &details.person;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO purchases (user_id, first_name, last_name, email_address, phone_number, gender, age) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(details.user_id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email_address)
        .bind(person.phone_number)
        .bind(&person.gender)
        .bind(person.age)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(Purchase { id, details })
    }

    async fn update_purchase(
        &self,
        purchase_id: RecordId,
        changes: PurchaseChanges,
    ) -> PortResult<Purchase> {
        let person = changes.person;
        let record = sqlx::query_as::<_, ContactRecord>(
            "UPDATE purchases SET user_id = COALESCE(?, user_id), first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name), email_address = COALESCE(?, email_address), phone_number = COALESCE(?, phone_number), gender = COALESCE(?, gender), age = COALESCE(?, age) WHERE id = ? RETURNING id, user_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age",
        )
        .bind(changes.user_id)
        .bind(person.first_name)
        .bind(person.last_name)
        .bind(person.email_address)
        .bind(person.phone_number)
        .bind(person.gender)
        .bind(person.age)
        .bind(purchase_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Purchase", purchase_id))?;

        Ok(record.to_purchase())
    }

    async fn delete_purchase(&self, purchase_id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = ?")
            .bind(purchase_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Purchase", purchase_id));
        }
        Ok(())
    }

    // --- Reviews ---

    async fn list_reviews(&self) -> PortResult<Vec<Review>> {
        let records = sqlx::query_as::<_, ContactRecord>(
            "SELECT id, book_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age FROM reviews ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_review()).collect())
    }

    async fn get_review_by_id(&self, review_id: RecordId) -> PortResult<Review> {
        let record = sqlx::query_as::<_, ContactRecord>(
            "SELECT id, book_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age FROM reviews WHERE id = ?",
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Review", review_id))?;

        Ok(record.to_review())
    }

    async fn create_review(&self, details: ReviewDetails) -> PortResult<Review> {
        let person = &details.person;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO reviews (book_id, first_name, last_name, email_address, phone_number, gender, age) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(details.book_id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email_address)
        .bind(person.phone_number)
        .bind(&person.gender)
        .bind(person.age)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(Review { id, details })
    }

    async fn update_review(
        &self,
        review_id: RecordId,
        changes: ReviewChanges,
    ) -> PortResult<Review> {
        let person = changes.person;
        let record = sqlx::query_as::<_, ContactRecord>(
            "UPDATE reviews SET book_id = COALESCE(?, book_id), first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name), email_address = COALESCE(?, email_address), phone_number = COALESCE(?, phone_number), gender = COALESCE(?, gender), age = COALESCE(?, age) WHERE id = ? RETURNING id, book_id AS ref_id, first_name, last_name, email_address, phone_number, gender, age",
        )
        .bind(changes.book_id)
        .bind(person.first_name)
        .bind(person.last_name)
        .bind(person.email_address)
        .bind(person.phone_number)
        .bind(person.gender)
        .bind(person.age)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| not_found("Review", review_id))?;

        Ok(record.to_review())
    }

    async fn delete_review(&self, review_id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(not_found("Review", review_id));
        }
        Ok(())
    }
}
