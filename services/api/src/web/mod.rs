pub mod books;
pub mod extract;
pub mod purchases;
pub mod rest;
pub mod reviews;
pub mod state;
pub mod users;

// Re-export the router builders to make them easily accessible
// to the binary that starts the web server.
pub use rest::{cors_layer, router, ApiDoc};
