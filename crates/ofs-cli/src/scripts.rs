//! # Pinned Native Modules
//!
//! The native stand-ins for the deployable scripts under `scripts/`.
//! Each module embeds its script text via `include_str!` and registers
//! under that text's digest, so simulating the file on disk dispatches to
//! the matching native body — and a locally edited file stops matching.

use std::sync::Arc;

use ofs_core::encode::{encode_string, encode_uint256};
use ofs_core::{ChainSelector, ScriptSource};
use ofs_runner::{
    EngineError, ExecutionContext, PinnedModule, PinnedModuleEngine, RpcRequest, ScriptOutput,
};

/// Endpoint the scripts target; requests to it are answered by the
/// simulation transport, never sent.
const RPC_URL: &str = "https://polygon-mumbai.gateway.tenderly.co";

/// Engine with every deployable script of this repository pinned.
pub fn default_engine() -> PinnedModuleEngine {
    PinnedModuleEngine::new()
        .with_module(Arc::new(GetBalances::new()))
        .with_module(Arc::new(RelayTransaction::new()))
}

/// Parse a `0x` hex quantity as the RPC surface renders integers.
fn hex_quantity(value: &serde_json::Value) -> Result<u128, EngineError> {
    let s = value
        .as_str()
        .ok_or_else(|| EngineError::Script(format!("expected hex quantity, got {value}")))?;
    let body = s
        .strip_prefix("0x")
        .ok_or_else(|| EngineError::Script(format!("hex quantity missing 0x prefix: {s}")))?;
    u128::from_str_radix(body, 16)
        .map_err(|e| EngineError::Script(format!("bad hex quantity {s}: {e}")))
}

/// Native body of `scripts/get_balances.js`.
pub struct GetBalances {
    source: ScriptSource,
}

impl GetBalances {
    /// Module pinned to the on-disk script text.
    pub fn new() -> Self {
        Self {
            source: ScriptSource::new(include_str!("../scripts/get_balances.js")),
        }
    }
}

impl Default for GetBalances {
    fn default() -> Self {
        Self::new()
    }
}

impl PinnedModule for GetBalances {
    fn name(&self) -> &str {
        "get-balances"
    }

    fn source(&self) -> &ScriptSource {
        &self.source
    }

    fn run(&self, ctx: &mut ExecutionContext) -> Result<ScriptOutput, EngineError> {
        let account = ctx
            .arg(1)
            .ok_or_else(|| EngineError::Script("missing account argument".into()))?
            .to_string();
        let selectors = ctx
            .args
            .get(2..)
            .unwrap_or_default()
            .iter()
            .map(|arg| {
                arg.parse::<u64>()
                    .map(ChainSelector)
                    .map_err(|_| EngineError::Script(format!("bad chain selector {arg}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut total: u128 = 0;
        for selector in &selectors {
            let value = ctx.transport.request(&RpcRequest::new(
                RPC_URL,
                "eth_getBalance",
                serde_json::json!([account, "latest"]),
            ))?;
            ctx.console.log(format!(
                "BALANCE {selector}: {}",
                value.as_str().unwrap_or_default()
            ));
            total = total.saturating_add(hex_quantity(&value)?);
        }
        Ok(ScriptOutput::new(encode_uint256(total)))
    }
}

/// Native body of `scripts/relay_transaction.js`.
pub struct RelayTransaction {
    source: ScriptSource,
}

impl RelayTransaction {
    /// Module pinned to the on-disk script text.
    pub fn new() -> Self {
        Self {
            source: ScriptSource::new(include_str!("../scripts/relay_transaction.js")),
        }
    }
}

impl Default for RelayTransaction {
    fn default() -> Self {
        Self::new()
    }
}

impl PinnedModule for RelayTransaction {
    fn name(&self) -> &str {
        "relay-transaction"
    }

    fn source(&self) -> &ScriptSource {
        &self.source
    }

    fn run(&self, ctx: &mut ExecutionContext) -> Result<ScriptOutput, EngineError> {
        if ctx.secrets.get("WALLET_PRIVATE_KEY").is_none() {
            return Err(EngineError::Script(
                "missing WALLET_PRIVATE_KEY secret".into(),
            ));
        }
        let raw_tx = ctx.arg(1).unwrap_or_default().to_string();

        for method in ["eth_chainId", "eth_maxPriorityFeePerGas", "eth_estimateGas"] {
            ctx.console.log(format!("REQUEST: {method}"));
            let value = ctx
                .transport
                .request(&RpcRequest::new(RPC_URL, method, serde_json::json!([])))?;
            ctx.console
                .log(format!("Response: {}", value.as_str().unwrap_or_default()));
        }

        let broadcast = ctx.transport.request(&RpcRequest::new(
            RPC_URL,
            "eth_sendRawTransaction",
            serde_json::json!([raw_tx]),
        ));
        match broadcast {
            Ok(hash) => Ok(ScriptOutput::new(encode_string(
                hash.as_str().unwrap_or_default(),
            ))),
            Err(err) => {
                ctx.console.log(format!("broadcast failed: {err}"));
                Ok(ScriptOutput::new(encode_string("error")))
            }
        }
    }
}
