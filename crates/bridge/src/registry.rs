//! Installs and removes call-site interception on the host engine.

use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::dispatch::Dispatcher;
use crate::engine::{CallSite, HostEngine, SiteHandler};
use crate::error::HookError;

/// Wires one handler into every intercepted call site, exactly once.
///
/// Installation is all-or-nothing: if a site cannot be patched, every site
/// attached so far is detached again and the error is returned. A second
/// `install` fails with [`HookError::AlreadyInstalled`] without touching the
/// engine, so repeated calls never duplicate interception; `uninstall` on a
/// registry that is not installed is a silent no-op.
pub struct HookRegistry {
    installed: bool,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { installed: false }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Attaches a handler to each call site, routing into `dispatcher`.
    pub fn install<E: HostEngine>(
        &mut self,
        engine: &mut E,
        dispatcher: &Arc<Dispatcher>,
    ) -> Result<(), HookError> {
        if self.installed {
            return Err(HookError::AlreadyInstalled);
        }

        let mut attached = Vec::new();
        for site in CallSite::iter() {
            match engine.attach(site, Self::handler_for(site, dispatcher)) {
                Ok(()) => attached.push(site),
                Err(err) => {
                    for done in attached {
                        let _ = engine.detach(done);
                    }
                    tracing::error!(
                        target: "bridge::registry",
                        site = %site,
                        error = %err,
                        "failed to install call-site interception"
                    );
                    return Err(err);
                }
            }
        }

        self.installed = true;
        tracing::info!(
            target: "bridge::registry",
            sites = CallSite::iter().count(),
            "call-site interception installed"
        );
        Ok(())
    }

    /// Detaches every call-site handler.
    pub fn uninstall<E: HostEngine>(&mut self, engine: &mut E) -> Result<(), HookError> {
        if !self.installed {
            return Ok(());
        }

        for site in CallSite::iter() {
            engine.detach(site)?;
        }

        self.installed = false;
        tracing::info!(target: "bridge::registry", "call-site interception removed");
        Ok(())
    }

    fn handler_for(site: CallSite, dispatcher: &Arc<Dispatcher>) -> SiteHandler {
        let dispatcher = Arc::clone(dispatcher);
        if site.is_preempt() {
            SiteHandler::Preempt(Box::new(move |call| dispatcher.preempt(call)))
        } else {
            SiteHandler::Notify(Box::new(move |call| dispatcher.notify(call)))
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
