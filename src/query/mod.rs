pub mod dates;
pub mod filter;
pub mod search;
pub mod text;
