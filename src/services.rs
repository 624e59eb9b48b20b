pub mod access_policy;
pub mod auth;
pub mod document_service;
pub mod review_service;
pub mod storage;
