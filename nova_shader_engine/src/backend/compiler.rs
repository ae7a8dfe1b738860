/// ShaderCompiler trait and compile output record

use std::any::Any;

use crate::error::Result;
use crate::shader::{Immediate, InputSlot, OutputSlot, ShaderKey, Stage, INVALID_REGID};

/// Compiled intermediate representation, opaque to the engine
///
/// Implemented by backend-specific IR types; the assembler recovers its own
/// type through [`CompiledIr::as_any`]. A variant holds its IR only between
/// compilation and a successful binary upload.
pub trait CompiledIr: Send + Sync {
    /// Access as `Any` so the backend can downcast to its concrete IR
    fn as_any(&self) -> &dyn Any;
}

/// Everything the backend compiler reports about a freshly-compiled variant
pub struct CompileOutput {
    /// The instruction-level representation handed to the assembler
    pub ir: Box<dyn CompiledIr>,

    /// Declared input values in declaration order
    pub inputs: Vec<InputSlot>,

    /// Declared output values in declaration order
    pub outputs: Vec<OutputSlot>,

    /// Immediate constants referenced by the program
    pub immediates: Vec<Immediate>,

    /// First constant bank free for immediates
    pub first_immediate: u32,

    /// Constant-bank length; already a worst-case value when relative
    /// addressing into constants defeats static bounding in the assembler,
    /// 0 otherwise
    pub constlen: u32,

    /// Fragment stage: register populated with the barycentric position
    pub pos_regid: u8,

    /// Fragment stage: the fragment-coordinate built-in is read (r0.x)
    pub frag_coord: bool,

    /// Fragment stage: the front/back-face built-in is read (hr0.x)
    pub frag_face: bool,
}

impl CompileOutput {
    /// Output with no declared values; the backend fills the fields in
    pub fn new(ir: Box<dyn CompiledIr>) -> Self {
        Self {
            ir,
            inputs: Vec::new(),
            outputs: Vec::new(),
            immediates: Vec::new(),
            first_immediate: 0,
            constlen: 0,
            pos_regid: INVALID_REGID,
            frag_coord: false,
            frag_face: false,
        }
    }
}

/// Backend compiler interface
///
/// Translates a stage-typed token stream plus a normalized state key into
/// the backend's instruction-level representation. The key must already be
/// normalized for the stage; the engine guarantees this.
pub trait ShaderCompiler: Send + Sync {
    /// Compile `tokens` for `stage` under `key`
    ///
    /// # Arguments
    ///
    /// * `gpu_id` - Target GPU generation
    /// * `stage` - Pipeline stage of the program
    /// * `tokens` - The program's token stream
    /// * `key` - Normalized pipeline-state key
    fn compile(
        &self,
        gpu_id: u32,
        stage: Stage,
        tokens: &[u32],
        key: &ShaderKey,
    ) -> Result<CompileOutput>;
}
