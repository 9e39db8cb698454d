pub mod ask;
pub mod document;
pub mod explain;
pub mod health;
pub mod nda;
pub mod summarize;
