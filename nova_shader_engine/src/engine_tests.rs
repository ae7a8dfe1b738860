use super::*;
use std::sync::Arc;

use crate::backend::mock_backend::{MockAllocator, MockAssembler, MockCompiler, MockDisassembler};
use crate::backend::AssemblyInfo;
use crate::error::Error;
use crate::shader::{ProgramDesc, Stage};

// ============================================================================
// Helpers
// ============================================================================

fn mock_engine(config: EngineConfig) -> Arc<ShaderEngine> {
    Arc::new(ShaderEngine::from_desc(ShaderEngineDesc {
        compiler: Arc::new(MockCompiler::new()),
        assembler: Arc::new(MockAssembler::new(
            vec![0; 8],
            AssemblyInfo {
                instrs_count: 4,
                sizedwords: 8,
                max_reg: 0,
                max_half_reg: -1,
                max_const: -1,
            },
        )),
        allocator: Arc::new(MockAllocator::new()),
        disassembler: Arc::new(MockDisassembler),
        config,
    }))
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_default_config() {
    let config = EngineConfig::default();
    assert_eq!(config.gpu_id, 320);
    assert!(config.debug.is_empty());
}

#[test]
fn test_debug_flags_combine() {
    let flags = DebugFlags::DISASM | DebugFlags::MSGS;
    assert!(flags.contains(DebugFlags::DISASM));
    assert!(flags.contains(DebugFlags::MSGS));

    let disasm_only = DebugFlags::DISASM;
    assert!(disasm_only.contains(DebugFlags::DISASM));
    assert!(!disasm_only.contains(DebugFlags::MSGS));
}

#[test]
fn test_config_is_threaded_through_engine() {
    let engine = mock_engine(EngineConfig {
        gpu_id: 420,
        debug: DebugFlags::MSGS,
    });

    assert_eq!(engine.config().gpu_id, 420);
    assert!(engine.config().debug.contains(DebugFlags::MSGS));
}

// ============================================================================
// Program creation
// ============================================================================

#[test]
fn test_create_program() {
    let engine = mock_engine(EngineConfig::default());
    let program = engine
        .create_program(ProgramDesc {
            stage: Stage::Compute,
            tokens: &[1, 2, 3],
        })
        .unwrap();

    assert_eq!(program.stage(), Stage::Compute);
    assert_eq!(program.tokens(), &[1, 2, 3]);
}

#[test]
fn test_create_program_rejects_empty_tokens() {
    let engine = mock_engine(EngineConfig::default());
    let result = engine.create_program(ProgramDesc {
        stage: Stage::Vertex,
        tokens: &[],
    });

    assert!(matches!(result, Err(Error::InvalidResource(_))));
}
