// Brain rot filter: classifies text quality via a pluggable language model.
//
// This is the library root. Each module corresponds to one layer of the
// request path: HTTP boundary -> filter service -> model backend.

pub mod backend;
pub mod client;
pub mod config;
pub mod filter;
pub mod output;
pub mod web;
