/*!
# Nova Shader Engine

Shader-variant compilation and caching for tile-based mobile GPUs.

Given an immutable shader program and a pipeline-state key, the engine
produces a machine-code variant specialized for that exact state
combination, memoizes it on the owning program, and manages its lifetime.
Backend compilation, assembly, device memory, and disassembly are external
collaborators behind traits.

## Architecture

- **ShaderEngine**: explicit context bundling the backend collaborators
- **ShaderProgram**: one shading stage plus its compiled-variant cache
- **ShaderVariant**: one compiled instance under one normalized key
- **ShaderCompiler / ShaderAssembler / DeviceAllocator / Disassembler**:
  backend collaborator traits implemented outside this crate

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod backend;
pub mod shader;

// Main nova namespace module
pub mod nova {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine context
    pub use crate::engine::{DebugFlags, EngineConfig, ShaderEngine, ShaderEngineDesc};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{set_logger, DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Backend collaborator traits
    pub mod backend {
        pub use crate::backend::*;
    }

    // Shader programs, keys, and variants
    pub mod shader {
        pub use crate::shader::*;
    }
}
