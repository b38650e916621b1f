pub mod bookmark;
pub mod status;

pub use bookmark::Bookmark;
pub use status::StatusUpdate;
