/// ShaderProgram - one shading stage with its compiled-variant cache
///
/// A program owns an independent copy of the caller's token stream and every
/// variant compiled from it. The variant list is the cache: ordered
/// most-recently-added-first, scanned linearly, first structural key match
/// wins. There is no eviction; variants live exactly as long as the program.

use std::sync::Arc;

use crate::engine::{DebugFlags, ShaderEngine};
use crate::error::Result;
use crate::shader::{ShaderKey, ShaderVariant, Stage};
use crate::{engine_bail, engine_debug};

/// Descriptor for creating a shader program
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    /// Pipeline stage
    pub stage: Stage,
    /// Token stream of the program; copied on creation
    pub tokens: &'a [u32],
}

/// One shading stage plus the cache of its compiled variants
pub struct ShaderProgram {
    engine: Arc<ShaderEngine>,
    stage: Stage,
    tokens: Box<[u32]>,
    variants: Vec<ShaderVariant>,
}

impl ShaderProgram {
    pub(crate) fn new(engine: Arc<ShaderEngine>, desc: ProgramDesc<'_>) -> Result<Self> {
        if desc.tokens.is_empty() {
            engine_bail!("nova::ShaderProgram", "Program must have a non-empty token stream");
        }

        Ok(Self {
            engine,
            stage: desc.stage,
            tokens: desc.tokens.to_vec().into_boxed_slice(),
            variants: Vec::new(),
        })
    }

    /// Pipeline stage of this program
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The program's own copy of the token stream
    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    /// Number of cached variants
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Cached variants, most recently added first
    pub fn variants(&self) -> impl Iterator<Item = &ShaderVariant> {
        self.variants.iter()
    }

    /// Get or build the variant for `key`
    ///
    /// The key is normalized for this program's stage first, so requests
    /// that differ only in stage-irrelevant fields resolve to the same
    /// cached variant. On a miss the variant is built synchronously and
    /// inserted at the head of the list. On failure nothing is inserted and
    /// the same key may be requested again (no negative caching).
    pub fn variant(&mut self, key: &ShaderKey) -> Result<&ShaderVariant> {
        let key = key.normalized_for(self.stage);
        let trace = self.engine.config().debug.contains(DebugFlags::MSGS);

        if let Some(index) = self.variants.iter().position(|v| *v.key() == key) {
            if trace {
                engine_debug!("nova::ShaderProgram", "variant cache hit: stage={:?}", self.stage);
            }
            return Ok(&self.variants[index]);
        }

        if trace {
            engine_debug!("nova::ShaderProgram", "variant cache miss: stage={:?}", self.stage);
        }

        let variant = ShaderVariant::build(&self.engine, self.stage, &self.tokens, key)?;
        self.variants.insert(0, variant);
        Ok(&self.variants[0])
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
