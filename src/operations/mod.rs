pub mod query;
pub mod rooms;
pub mod snap;
