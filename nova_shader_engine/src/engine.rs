/// ShaderEngine - explicit context bundling the backend collaborators
///
/// The engine owns the trait objects a program needs to build variants
/// (compiler, assembler, device allocator, disassembler) plus the engine
/// configuration. Everything is threaded explicitly; there is no
/// process-global engine state.

use std::sync::Arc;

use bitflags::bitflags;

use crate::backend::{DeviceAllocator, Disassembler, ShaderAssembler, ShaderCompiler};
use crate::error::Result;
use crate::shader::{ProgramDesc, ShaderProgram};

bitflags! {
    /// Diagnostic toggles threaded through [`EngineConfig`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DebugFlags: u32 {
        /// Dump the token stream before compiling and the disassembly
        /// report after upload
        const DISASM = 1 << 0;
        /// Verbose variant-cache trace logging
        const MSGS = 1 << 1;
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target GPU generation (e.g. 320, 420); selects the
    /// instruction-memory granularity among other codegen details
    pub gpu_id: u32,

    /// Diagnostic toggles
    pub debug: DebugFlags,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gpu_id: 320,
            debug: DebugFlags::empty(),
        }
    }
}

/// Descriptor for creating a [`ShaderEngine`]
pub struct ShaderEngineDesc {
    pub compiler: Arc<dyn ShaderCompiler>,
    pub assembler: Arc<dyn ShaderAssembler>,
    pub allocator: Arc<dyn DeviceAllocator>,
    pub disassembler: Arc<dyn Disassembler>,
    pub config: EngineConfig,
}

/// Shader variant engine context
///
/// Created once per device from a [`ShaderEngineDesc`] and shared by every
/// [`ShaderProgram`] built from it. All operations are synchronous and run
/// on the calling thread; programs sharing one engine from multiple threads
/// must be externally synchronized.
pub struct ShaderEngine {
    compiler: Arc<dyn ShaderCompiler>,
    assembler: Arc<dyn ShaderAssembler>,
    allocator: Arc<dyn DeviceAllocator>,
    disassembler: Arc<dyn Disassembler>,
    config: EngineConfig,
}

impl ShaderEngine {
    /// Create an engine from a descriptor
    pub fn from_desc(desc: ShaderEngineDesc) -> Self {
        Self {
            compiler: desc.compiler,
            assembler: desc.assembler,
            allocator: desc.allocator,
            disassembler: desc.disassembler,
            config: desc.config,
        }
    }

    /// Create a shader program owned by the caller
    ///
    /// The token stream is copied; the caller's slice may be freed
    /// afterwards.
    pub fn create_program(self: &Arc<Self>, desc: ProgramDesc<'_>) -> Result<ShaderProgram> {
        ShaderProgram::new(Arc::clone(self), desc)
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn compiler(&self) -> &dyn ShaderCompiler {
        self.compiler.as_ref()
    }

    pub(crate) fn assembler(&self) -> &dyn ShaderAssembler {
        self.assembler.as_ref()
    }

    pub(crate) fn allocator(&self) -> &dyn DeviceAllocator {
        self.allocator.as_ref()
    }

    pub(crate) fn disassembler(&self) -> &dyn Disassembler {
        self.disassembler.as_ref()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
