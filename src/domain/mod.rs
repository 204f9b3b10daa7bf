pub mod book;
pub mod commands;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use book::{Author, AuthorSet, Book};
pub use commands::*;
pub use errors::*;
pub use value_objects::*;
