pub mod contributors;

pub use contributors::{handle, RouteParams, SortOrder, ROUTE};
