use image::DynamicImage;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Camera,
    Library,
}

/// A decoded photo, shared between the request's effects until it is classified.
#[derive(Clone)]
pub struct CapturedImage(Arc<DynamicImage>);

impl CapturedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.0
    }

    /// True when both handles share the same decoded photo.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapturedImage({}x{})", self.0.width(), self.0.height())
    }
}

impl PartialEq for CapturedImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

pub trait ImageSource {
    /// Runs the capture or selection flow for `mode`. `Ok(None)` means the user cancelled.
    fn acquire(
        &self,
        mode: SourceMode,
    ) -> Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>>;
}
