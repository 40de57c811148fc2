//! # Digest-Pinned Module Registry
//!
//! Dynamic evaluation of a source string is replaced by statically
//! compiled modules. Each `PinnedModule` is the native stand-in for one
//! deployable script text and is registered under the digest of that
//! text. Execution dispatches on the digest of the *supplied* source, so
//! a text that does not hash to a registered module never runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use ofs_core::{ScriptDigest, ScriptSource};

use crate::engine::{EngineError, ExecutionContext, ScriptEngine, ScriptOutput};

/// A statically compiled stand-in for one deployable script.
pub trait PinnedModule: Send + Sync {
    /// Human-readable module name, used in logs and the build manifest.
    fn name(&self) -> &str;

    /// The deployable source text this module is pinned to.
    fn source(&self) -> &ScriptSource;

    /// The module body.
    fn run(&self, ctx: &mut ExecutionContext) -> Result<ScriptOutput, EngineError>;
}

/// Engine dispatching to pinned modules by source digest.
#[derive(Default)]
pub struct PinnedModuleEngine {
    modules: BTreeMap<ScriptDigest, Arc<dyn PinnedModule>>,
}

impl PinnedModuleEngine {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under the digest of its pinned source.
    ///
    /// Registering a second module with an identical source replaces the
    /// first; the replacement is logged.
    pub fn register(&mut self, module: Arc<dyn PinnedModule>) {
        let digest = ScriptDigest::of_source(module.source());
        tracing::info!(name = module.name(), digest = %digest, "registered pinned module");
        if let Some(previous) = self.modules.insert(digest, module) {
            tracing::warn!(
                name = previous.name(),
                digest = %digest,
                "replaced previously pinned module"
            );
        }
    }

    /// Builder-style registration.
    pub fn with_module(mut self, module: Arc<dyn PinnedModule>) -> Self {
        self.register(module);
        self
    }

    /// Names and digests of every registered module, in digest order.
    pub fn modules(&self) -> Vec<(String, ScriptDigest)> {
        self.modules
            .iter()
            .map(|(digest, module)| (module.name().to_string(), *digest))
            .collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ScriptEngine for PinnedModuleEngine {
    fn execute(
        &self,
        source: &ScriptSource,
        ctx: &mut ExecutionContext,
    ) -> Result<ScriptOutput, EngineError> {
        let digest = ScriptDigest::of_source(source);
        let module = self
            .modules
            .get(&digest)
            .ok_or_else(|| EngineError::UnknownModule {
                digest: digest.to_string(),
            })?;
        tracing::debug!(name = module.name(), digest = %digest, "dispatching pinned module");
        module.run(ctx)
    }
}
