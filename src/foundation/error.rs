use crate::foundation::core::ImageId;

/// Convenience result type used across posterframe.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by the transform and export APIs.
///
/// Degenerate images and out-of-range scales are not errors: the fit calculator and the zoom
/// controller recover from them by construction.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Source bytes could not be decoded. Terminal for that image only.
    #[error("decode error for image '{id}': {reason}")]
    Decode {
        /// Identity of the image that failed.
        id: ImageId,
        /// Decoder message.
        reason: String,
    },

    /// An output raster of the requested size could not be created.
    #[error("raster allocation failed for image '{id}' ({width}x{height})")]
    RasterAllocation {
        /// Identity of the image being exported.
        id: ImageId,
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Invalid caller-provided geometry, configuration or transform data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing placement and config data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while encoding a raster into an image file format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Decode`] value.
    pub fn decode(id: impl Into<ImageId>, reason: impl Into<String>) -> Self {
        Self::Decode {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PosterError::RasterAllocation`] value.
    pub fn raster_allocation(id: impl Into<ImageId>, width: u32, height: u32) -> Self {
        Self::RasterAllocation {
            id: id.into(),
            width,
            height,
        }
    }

    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PosterError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Identity of the image this error belongs to, when the error is per-image.
    pub fn image_id(&self) -> Option<&ImageId> {
        match self {
            Self::Decode { id, .. } | Self::RasterAllocation { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Re-attribute a per-image error to `id`. Other variants pass through unchanged.
    pub(crate) fn with_image_id(self, id: &ImageId) -> Self {
        match self {
            Self::Decode { reason, .. } => Self::Decode {
                id: id.clone(),
                reason,
            },
            Self::RasterAllocation { width, height, .. } => Self::RasterAllocation {
                id: id.clone(),
                width,
                height,
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
