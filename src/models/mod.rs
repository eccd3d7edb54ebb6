pub mod contributor;
pub mod feed;

pub use contributor::*;
pub use feed::*;
