mod books;
mod sheet;

pub use books::{Book, ReportFiles};
pub use sheet::{week_window, PrevDataset, Sheet};

#[cfg(test)]
pub use sheet::test_fixtures;
