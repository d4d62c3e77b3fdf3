//! Assembly root: owns the engine, registry, and dispatcher.
//!
//! The application root builds one [`Bridge`] per engine, wiring in the bus
//! and oracle explicitly; there is no process-wide registration state.

use std::sync::Arc;

use sim_core::CreatureOracle;

use crate::bus::EventBus;
use crate::dispatch::Dispatcher;
use crate::engine::HostEngine;
use crate::error::{BuildError, HookError};
use crate::registry::HookRegistry;

/// The assembled interception bridge over one host engine.
pub struct Bridge<E: HostEngine> {
    engine: E,
    registry: HookRegistry,
    dispatcher: Arc<Dispatcher>,
    bus: Arc<EventBus>,
}

impl<E: HostEngine> std::fmt::Debug for Bridge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("is_installed", &self.registry.is_installed())
            .finish_non_exhaustive()
    }
}

impl<E: HostEngine> Bridge<E> {
    pub fn builder() -> BridgeBuilder<E> {
        BridgeBuilder::new()
    }

    /// Installs call-site interception on the engine.
    pub fn install(&mut self) -> Result<(), HookError> {
        self.registry.install(&mut self.engine, &self.dispatcher)
    }

    /// Removes call-site interception from the engine.
    pub fn uninstall(&mut self) -> Result<(), HookError> {
        self.registry.uninstall(&mut self.engine)
    }

    pub fn is_installed(&self) -> bool {
        self.registry.is_installed()
    }

    /// The bus events are dispatched through. Subscribe here.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Builder for [`Bridge`] with explicit collaborator wiring.
pub struct BridgeBuilder<E> {
    engine: Option<E>,
    oracle: Option<Arc<dyn CreatureOracle>>,
    bus: Option<Arc<EventBus>>,
}

impl<E: HostEngine> BridgeBuilder<E> {
    fn new() -> Self {
        Self {
            engine: None,
            oracle: None,
            bus: None,
        }
    }

    /// Set the host engine (required).
    pub fn engine(mut self, engine: E) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the engine-read oracle (required).
    pub fn oracle(mut self, oracle: Arc<dyn CreatureOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Inject the bus to publish through (optional; defaults to a fresh one).
    pub fn bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<Bridge<E>, BuildError> {
        let engine = self.engine.ok_or(BuildError::EngineNotSet)?;
        let oracle = self.oracle.ok_or(BuildError::OracleNotSet)?;
        let bus = self.bus.unwrap_or_default();

        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&bus), oracle));

        Ok(Bridge {
            engine,
            registry: HookRegistry::new(),
            dispatcher,
            bus,
        })
    }
}
