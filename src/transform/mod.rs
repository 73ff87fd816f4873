pub mod error;
pub mod location_filter;
pub mod mapper;
pub mod parser;
