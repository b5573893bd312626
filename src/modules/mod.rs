pub mod accounts;
pub mod auth;

pub use self::accounts::model::Account;
pub use self::auth::model::LoginRequest;
