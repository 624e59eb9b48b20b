pub mod auth;
pub mod companies;
pub mod documents;
pub mod navigation;
