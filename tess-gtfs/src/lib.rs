pub mod enrich;
pub mod extract;
