//! # Integrity Gate
//!
//! The gate stands between a caller-supplied digest commitment and the
//! execution of the payload it commits to. It recomputes the payload's
//! SHA-256 digest and executes only on exact match; on mismatch the
//! payload never reaches an engine and the error carries both digests
//! for caller-side diagnosis.
//!
//! ## States
//!
//! ```text
//! Unverified ──▶ Verified ──▶ Executed (terminal)
//!      │
//!      └──▶ Rejected (terminal)
//! ```
//!
//! The whole lifecycle happens inside one synchronous call. The gate
//! holds no state across invocations, and a mismatch is deterministic:
//! there is nothing to retry.

use std::sync::Arc;

use thiserror::Error;

use ofs_core::{DigestParseError, ScriptDigest, ScriptSource};

use crate::engine::{EngineError, ExecutionContext, ScriptEngine, ScriptOutput};

/// Verification state of one gate invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GateState {
    /// Digest not yet checked.
    Unverified,
    /// Digest matched; payload cleared for execution.
    Verified,
    /// Digest mismatched; payload will never run (terminal).
    Rejected,
    /// Verified payload ran to completion (terminal).
    Executed,
}

impl GateState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Executed)
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(&self, to: GateState) -> bool {
        matches!(
            (self, to),
            (Self::Unverified, Self::Verified)
                | (Self::Unverified, Self::Rejected)
                | (Self::Verified, Self::Executed)
        )
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unverified => "UNVERIFIED",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
            Self::Executed => "EXECUTED",
        };
        f.write_str(s)
    }
}

/// Error surfaced by a gate invocation.
#[derive(Error, Debug)]
pub enum GateError {
    /// Computed and expected digests differ.
    ///
    /// The message is exactly the two canonical hex strings, comma
    /// separated, computed first — the format the calling harness parses
    /// when diagnosing a stale commitment. Deterministic; never retried.
    #[error("{computed},{expected}")]
    DigestMismatch {
        /// Canonical rendering of the digest computed over the payload.
        computed: String,
        /// Canonical rendering of the digest the caller supplied.
        expected: String,
    },

    /// The caller-supplied expected digest string is malformed.
    #[error("bad expected digest: {0}")]
    BadExpectedDigest(#[from] DigestParseError),

    /// The verified payload failed during execution.
    #[error("execution failed: {0}")]
    Engine(#[from] EngineError),
}

impl GateError {
    /// The terminal state this error leaves the invocation in.
    ///
    /// Mismatch and malformed commitments reject before execution; an
    /// engine error means verification passed and the payload reached
    /// the engine.
    pub fn terminal_state(&self) -> GateState {
        match self {
            Self::DigestMismatch { .. } | Self::BadExpectedDigest(_) => GateState::Rejected,
            Self::Engine(_) => GateState::Executed,
        }
    }
}

/// The integrity-gated script loader.
///
/// Pure with respect to its own state: each `run` computes, compares,
/// and discards. Side effects belong to the executed payload alone.
pub struct IntegrityGate {
    engine: Arc<dyn ScriptEngine>,
}

impl IntegrityGate {
    /// Gate executing through the given engine.
    pub fn new(engine: Arc<dyn ScriptEngine>) -> Self {
        Self { engine }
    }

    /// Verify `source` against `expected` and execute it on exact match.
    ///
    /// Execution happens if and only if the recomputed digest equals the
    /// expected one; the comparison is byte equality of the two 32-byte
    /// values, with no partial or fuzzy policy. The payload's result is
    /// passed through unchanged.
    pub fn run(
        &self,
        expected: &ScriptDigest,
        source: &ScriptSource,
        ctx: &mut ExecutionContext,
    ) -> Result<ScriptOutput, GateError> {
        let computed = ScriptDigest::of_source(source);
        if computed != *expected {
            tracing::warn!(computed = %computed, expected = %expected, "payload rejected");
            return Err(GateError::DigestMismatch {
                computed: computed.to_string(),
                expected: expected.to_string(),
            });
        }

        tracing::debug!(digest = %computed, "payload verified, executing");
        let output = self.engine.execute(source, ctx)?;
        tracing::debug!(digest = %computed, bytes = output.bytes.len(), "payload executed");
        Ok(output)
    }

    /// Like [`run`](Self::run), but parsing the expected digest from its
    /// hex string form first.
    ///
    /// Hex case in the input is normalized before comparison; a string
    /// without the `0x` prefix or of the wrong length is a
    /// [`GateError::BadExpectedDigest`], not a mismatch.
    pub fn run_str(
        &self,
        expected_hex: &str,
        source: &ScriptSource,
        ctx: &mut ExecutionContext,
    ) -> Result<ScriptOutput, GateError> {
        let expected: ScriptDigest = expected_hex.parse()?;
        self.run(&expected, source, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ofs_core::Secrets;

    use crate::mock::{DenyAllTransport, MockEngine};

    fn context() -> ExecutionContext {
        ExecutionContext::new(vec![], Secrets::new(), Arc::new(DenyAllTransport))
    }

    #[test]
    fn matching_digest_executes_and_passes_output_through() {
        let engine = Arc::new(MockEngine::with_output(b"result".to_vec()));
        let gate = IntegrityGate::new(engine.clone());

        let source = ScriptSource::new("return 1+1;");
        let expected = ScriptDigest::of_source(&source);

        let out = gate.run(&expected, &source, &mut context()).unwrap();
        assert_eq!(out.bytes, b"result".to_vec());
        assert_eq!(engine.executions(), vec!["return 1+1;".to_string()]);
    }

    #[test]
    fn mismatch_rejects_and_never_executes() {
        let engine = Arc::new(MockEngine::new());
        let gate = IntegrityGate::new(engine.clone());

        let source = ScriptSource::new("return 1+1;");
        let wrong = ScriptDigest::of_source(&ScriptSource::new("return 2+2;"));

        let err = gate.run(&wrong, &source, &mut context()).unwrap_err();
        assert!(matches!(err, GateError::DigestMismatch { .. }));
        assert!(engine.executions().is_empty());
    }

    #[test]
    fn mismatch_message_is_computed_then_expected() {
        let gate = IntegrityGate::new(Arc::new(MockEngine::new()));

        let source = ScriptSource::new("return 1+1;");
        let computed = ScriptDigest::of_source(&source).to_string();
        let all_zero = format!("0x{}", "0".repeat(64));

        let err = gate
            .run_str(&all_zero, &source, &mut context())
            .unwrap_err();
        assert_eq!(err.to_string(), format!("{computed},{all_zero}"));
    }

    #[test]
    fn expected_digest_case_is_normalized() {
        let engine = Arc::new(MockEngine::new());
        let gate = IntegrityGate::new(engine.clone());

        let source = ScriptSource::new("return 1+1;");
        let upper = format!(
            "0x{}",
            ScriptDigest::of_source(&source).to_hex().to_uppercase()
        );

        gate.run_str(&upper, &source, &mut context()).unwrap();
        assert_eq!(engine.executions().len(), 1);
    }

    #[test]
    fn malformed_expected_digest_is_not_a_mismatch() {
        let engine = Arc::new(MockEngine::new());
        let gate = IntegrityGate::new(engine.clone());

        let source = ScriptSource::new("return 1+1;");
        let err = gate
            .run_str("not-a-digest", &source, &mut context())
            .unwrap_err();
        assert!(matches!(err, GateError::BadExpectedDigest(_)));
        assert!(engine.executions().is_empty());
    }

    #[test]
    fn gate_is_stateless_across_invocations() {
        let engine = Arc::new(MockEngine::new());
        let gate = IntegrityGate::new(engine.clone());

        let good = ScriptSource::new("return 1+1;");
        let expected = ScriptDigest::of_source(&good);
        let bad = ScriptSource::new("tampered");

        assert!(gate.run(&expected, &bad, &mut context()).is_err());
        // A rejection leaves no residue; the same gate still verifies.
        assert!(gate.run(&expected, &good, &mut context()).is_ok());
        assert_eq!(engine.executions().len(), 1);
    }

    #[test]
    fn state_transitions() {
        use GateState::*;
        assert!(Unverified.can_transition_to(Verified));
        assert!(Unverified.can_transition_to(Rejected));
        assert!(Verified.can_transition_to(Executed));
        assert!(!Rejected.can_transition_to(Verified));
        assert!(!Executed.can_transition_to(Verified));
        assert!(!Verified.can_transition_to(Rejected));
        assert!(Rejected.is_terminal());
        assert!(Executed.is_terminal());
        assert!(!Unverified.is_terminal());
        assert!(!Verified.is_terminal());
    }

    #[test]
    fn error_terminal_states() {
        let mismatch = GateError::DigestMismatch {
            computed: "0xaa".into(),
            expected: "0xbb".into(),
        };
        assert_eq!(mismatch.terminal_state(), GateState::Rejected);

        let engine_err = GateError::Engine(EngineError::Script("boom".into()));
        assert_eq!(engine_err.terminal_state(), GateState::Executed);
    }

    #[test]
    fn gate_state_display() {
        assert_eq!(GateState::Unverified.to_string(), "UNVERIFIED");
        assert_eq!(GateState::Rejected.to_string(), "REJECTED");
    }
}
