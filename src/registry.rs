use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{GalleryError, Result};
use crate::renderers::{FadeRenderer, InstantRenderer, SlideRenderer};
use crate::renderer::Renderer;

/// Named transition styles available to galleries.
///
/// Built once by the host and passed by reference to every gallery that
/// needs to resolve a renderer name.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Rc<dyn Renderer>>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `fade`, `slide` and `instant`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("fade", FadeRenderer);
        registry.register("slide", SlideRenderer);
        registry.register("instant", InstantRenderer);
        registry
    }

    /// Returns the renderer previously registered under `name`, if any.
    pub fn register<R>(&mut self, name: impl Into<String>, renderer: R) -> Option<Rc<dyn Renderer>>
    where
        R: Renderer + 'static,
    {
        let name = name.into();
        debug!("registering renderer '{}'", name);
        self.renderers.insert(name, Rc::new(renderer))
    }

    pub fn get(&self, name: &str) -> Result<Rc<dyn Renderer>> {
        self.renderers
            .get(name)
            .cloned()
            .ok_or_else(|| GalleryError::UnknownRenderer(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}
