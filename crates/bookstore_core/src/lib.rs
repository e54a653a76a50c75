pub mod domain;
pub mod ports;

pub use domain::{
    Book, BookChanges, BookDetails, PersonChanges, PersonDetails, Purchase, PurchaseChanges,
    PurchaseDetails, RecordId, Review, ReviewChanges, ReviewDetails, User, UserAccount,
    UserChanges,
};
pub use ports::{DatabaseService, PortError, PortResult};
