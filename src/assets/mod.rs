/// Bytes to [`source::SourceImage`].
pub mod decode;
/// Decoded source image type.
pub mod source;
