pub mod mysql;
pub mod traits;

pub use mysql::MySqlListingReader;
pub use traits::ListingSource;
