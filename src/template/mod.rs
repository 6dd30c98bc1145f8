//! Template storage.
//!
//! Registered templates are kept in registration order, which is load-bearing
//! downstream: the engine evaluates them in this order and the first template
//! clearing the confidence threshold wins. Names are unique by convention
//! only; registering the same name twice creates two independent entries.

use crate::image::{OwnedImage, RgbaView};
use crate::util::{FrameMatchError, FrameMatchResult};

/// Handle to a registered template, stable until the store is disposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateId(pub(crate) usize);

/// Owned reference image in contiguous RGBA format.
pub struct Template {
    name: String,
    img: OwnedImage,
}

impl Template {
    /// Creates a template from a contiguous RGBA buffer.
    pub fn from_rgba(
        name: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> FrameMatchResult<Self> {
        let name = name.into();
        if width == 0 || height == 0 {
            return Err(FrameMatchError::InvalidTemplate {
                name,
                reason: "zero dimension",
            });
        }
        let img = OwnedImage::new(data, width, height)?;
        Ok(Self { name, img })
    }

    /// Returns the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template pixels.
    pub fn view(&self) -> RgbaView<'_> {
        self.img.view()
    }
}

/// Registration-ordered collection of templates.
#[derive(Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
    disposed: bool,
}

impl TemplateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, appending it to the scan order.
    pub fn register(&mut self, template: Template) -> FrameMatchResult<TemplateId> {
        self.ensure_live()?;
        self.templates.push(template);
        Ok(TemplateId(self.templates.len() - 1))
    }

    /// Returns all templates in registration order.
    pub fn list(&self) -> FrameMatchResult<&[Template]> {
        self.ensure_live()?;
        Ok(&self.templates)
    }

    /// Returns the template behind `id`.
    pub fn get(&self, id: TemplateId) -> FrameMatchResult<&Template> {
        self.ensure_live()?;
        self.templates
            .get(id.0)
            .ok_or(FrameMatchError::IndexOutOfBounds {
                index: id.0,
                len: self.templates.len(),
                context: "template",
            })
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns whether the store holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Releases all template buffers. Subsequent operations fail with
    /// [`FrameMatchError::StoreDisposed`].
    pub fn dispose(&mut self) {
        self.templates = Vec::new();
        self.disposed = true;
    }

    /// Returns whether the store has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_live(&self) -> FrameMatchResult<()> {
        if self.disposed {
            return Err(FrameMatchError::StoreDisposed);
        }
        Ok(())
    }
}
