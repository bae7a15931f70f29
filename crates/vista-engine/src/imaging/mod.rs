//! Image sources and decoding.
//!
//! An [`ImageSource`] is consumed once: it is decoded into a [`DecodedImage`]
//! (tightly packed RGBA8), either inline or on a worker thread through an
//! [`ImageLoader`].

mod decoded;
mod loader;
mod source;

pub use decoded::DecodedImage;
pub use loader::{DecodeCompletion, ImageLoader};
pub use source::ImageSource;
