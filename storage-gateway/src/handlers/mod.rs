pub mod delete;
pub mod health;
pub mod public_url;
pub mod upload;
