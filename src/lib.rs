//! Splits hardware-delivered multi-plane YUV 4:2:0 images into tightly packed
//! Y, U and V buffers.
//!
//! Camera pipelines hand out planes with padded rows and, quite often, chroma
//! planes that are two views into a single interleaved buffer. [extract] strips
//! the padding and separates the chroma channels without touching sample values.
mod extract;
mod frame;
mod images;
mod yuv_error;
mod yuv_support;

pub use yuv_support::ChromaLayout;
pub use yuv_support::YuvPlane;

pub use yuv_error::InvalidImageError;
pub use yuv_error::MismatchedSize;

pub use images::BufferStoreMut;
pub use images::PlaneBuffer;
pub use images::SourceImage;
pub use images::YuvPlanarImage;
pub use images::YuvPlanarImageMut;

pub use frame::ExtractedFrame;

pub use extract::extract;
pub use extract::extract_into;
