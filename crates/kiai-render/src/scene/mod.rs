//! Scene (render command stream) types.
//!
//! Responsibilities:
//! - model the eight render command kinds as a closed sum type
//! - provide a reusable per-frame list that preserves insertion order
//! - keep payload definitions isolated per kind under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::{CommandKind, RenderCommand};
pub use list::CommandList;
pub use shapes::{
    BorderPayload, CustomPayload, ImagePayload, ImageSize, RectanglePayload, TextAlign,
    TextPayload, WrapMode,
};
