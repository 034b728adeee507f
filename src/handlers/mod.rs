pub mod books;
pub mod page;
