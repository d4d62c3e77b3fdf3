//! Error types for hook installation, assembly, and command forwarding.

use crate::engine::CallSite;

/// Errors raised while installing or removing call-site interception.
///
/// These are fatal at startup: they are reported to the operator and never
/// retried. A failed install leaves no interception behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// The engine does not expose the requested call site.
    #[error("call site not found: {0}")]
    SiteNotFound(CallSite),

    /// Interception is already in place. Nothing was attached twice.
    #[error("call-site interception already installed")]
    AlreadyInstalled,
}

/// Errors raised while assembling a [`Bridge`](crate::Bridge).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("host engine not set")]
    EngineNotSet,

    #[error("creature oracle not set")]
    OracleNotSet,
}

/// Errors raised while forwarding a builtin command into the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// No engine command is registered under this name.
    #[error("unknown engine command: {0}")]
    UnknownCommand(String),
}
