use std::{fmt, rc::Rc};

use crate::{
    attach::factory::ElementFactory,
    compose::composer::Composer,
    element::{host::Host, node::Element},
    foundation::{
        config::FxConfig,
        error::{FxError, FxResult},
    },
    registry::context::FxRegistry,
};

/// One-time setup: builds the element factory and mounts roots under a registry.
pub struct FxBootstrap {
    host: Rc<dyn Host>,
    config: FxConfig,
    composer: Composer,
    factory: Option<Rc<ElementFactory>>,
}

impl FxBootstrap {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self {
            host,
            config: FxConfig::default(),
            composer: Composer::default(),
            factory: None,
        }
    }

    /// Replace the configuration. Rejected once installed.
    pub fn with_config(mut self, config: FxConfig) -> FxResult<Self> {
        config.validate()?;
        if self.is_installed() {
            return Err(FxError::config(
                "configuration must be set before install",
            ));
        }
        self.config = config;
        Ok(self)
    }

    /// Replace the effect table. Rejected once installed.
    pub fn with_composer(mut self, composer: Composer) -> FxResult<Self> {
        if self.is_installed() {
            return Err(FxError::config("effect table must be set before install"));
        }
        self.composer = composer;
        Ok(self)
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    pub fn is_installed(&self) -> bool {
        self.factory.is_some()
    }

    /// Build the factory. Returns `false` when it was already installed.
    pub fn install(&mut self) -> bool {
        if self.is_installed() {
            return false;
        }
        self.factory();
        true
    }

    /// The installed factory, installing on first use.
    pub fn factory(&mut self) -> Rc<ElementFactory> {
        if let Some(factory) = &self.factory {
            return Rc::clone(factory);
        }
        let factory = Rc::new(ElementFactory::new(
            self.composer.clone(),
            self.config.clone(),
        ));
        self.factory = Some(Rc::clone(&factory));
        tracing::info!(
            effects = self.composer.names().len(),
            effect_attr = %self.config.effect_attr,
            target_attr = %self.config.target_attr,
            "sparkfx installed"
        );
        factory
    }

    /// Run `root` through the factory and give it its own registry.
    pub fn mount_root(&mut self, root: Element) -> FxRoot {
        let content = self.factory().transform(root);
        FxRoot {
            registry: FxRegistry::new(Rc::clone(&self.host), self.config.clone()),
            content,
        }
    }
}

impl fmt::Debug for FxBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FxBootstrap")
            .field("config", &self.config)
            .field("composer", &self.composer)
            .field("installed", &self.is_installed())
            .finish()
    }
}

/// A mounted application root. Dropping it tears its registry down.
#[derive(Debug)]
pub struct FxRoot {
    registry: FxRegistry,
    content: Element,
}

impl FxRoot {
    pub fn registry(&self) -> &FxRegistry {
        &self.registry
    }

    /// The intercepted tree, without the overlay layer.
    pub fn content(&self) -> &Element {
        &self.content
    }

    /// Content with the overlay layer on top.
    pub fn render(&self) -> Element {
        self.registry.wrap(self.content.clone())
    }

    pub fn tick(&self, dt_ms: f64) {
        self.registry.tick(dt_ms);
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for FxRoot {
    fn drop(&mut self) {
        self.registry.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/attach/bootstrap.rs"]
mod tests;
