pub mod draft;
pub mod terminal;
