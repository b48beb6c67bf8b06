pub mod markdown;
pub mod page;
pub mod session;

pub use session::{Phase, SelectedImage, UploadSession};
