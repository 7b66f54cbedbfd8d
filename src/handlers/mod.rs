//! Request handlers, one module per entity plus the catalog home page

pub mod authors;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod instances;
