pub mod config;
pub mod csv;
pub mod discovery;
pub mod llm_clients;
pub mod report;
pub mod response;
pub mod spreadsheet;
pub mod storage;
