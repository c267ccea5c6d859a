pub mod chat;
pub mod diff;
pub mod landing;
pub mod shared;

pub use chat::ChatView;
pub use diff::DiffView;
pub use landing::LandingView;
