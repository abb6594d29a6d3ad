pub mod diary;
pub mod entry;
pub mod month;
pub mod validation;

pub use diary::*;
pub use entry::*;
pub use month::*;
pub use validation::*;
