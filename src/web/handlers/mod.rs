pub mod filter;
pub mod status;
