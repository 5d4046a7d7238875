pub mod calls;
pub mod connection;
pub mod contacts;
pub mod import;
pub mod info;
pub mod migrations;
pub mod schema;
pub mod source;
#[cfg(test)]
pub mod test_fixtures;
