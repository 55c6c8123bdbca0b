mod border;
mod custom;
mod image;
mod rectangle;
mod text;

pub use border::BorderPayload;
pub use custom::CustomPayload;
pub use image::{ImagePayload, ImageSize};
pub use rectangle::RectanglePayload;
pub use text::{TextAlign, TextPayload, WrapMode};
