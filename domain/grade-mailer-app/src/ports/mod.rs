pub mod email;
pub mod report;
pub mod table_source;

#[cfg(test)]
pub mod mock;
