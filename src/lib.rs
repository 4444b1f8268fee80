//! Loads a CSV file of people, prints it as a table and answers aggregate
//! and lookup queries about the loaded records.

pub mod commands;
pub mod errors;
pub mod group;
pub mod models;
pub mod printer;
pub mod processor;
pub mod table;
pub mod traits;
