use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ActorError;

use super::app::FrameActor;
use super::params::ActorParams;

/// Which actor to run and how to configure it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub name: String,
    #[serde(default)]
    pub params: ActorParams,
}

impl ActorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: ActorParams::new() }
    }

    pub fn with_params(mut self, params: ActorParams) -> Self {
        self.params = params;
        self
    }
}

/// Builds a fresh, uninitialized actor from manifest parameters.
pub type ActorFactory = Box<dyn Fn(&ActorParams) -> Result<Box<dyn FrameActor>, ActorError>>;

/// Name → factory table the stage resolves `ActorSpec`s against.
#[derive(Default)]
pub struct ActorRegistry {
    factories: BTreeMap<String, ActorFactory>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&ActorParams) -> Result<Box<dyn FrameActor>, ActorError> + 'static,
    {
        if self.factories.insert(name.to_string(), Box::new(factory)).is_some() {
            log::warn!("actor '{name}' registered twice; keeping the latest factory");
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(&self, spec: &ActorSpec) -> Result<Box<dyn FrameActor>, ActorError> {
        let factory = self
            .factories
            .get(&spec.name)
            .ok_or_else(|| ActorError::UnknownActor(spec.name.clone()))?;
        factory(&spec.params)
    }
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
