// Content filtering: request/response contract and the service that
// turns a backend judgment into a classification.

pub mod models;
pub mod service;
