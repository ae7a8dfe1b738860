/// ShaderVariant - one compiled instance of a program under one key
///
/// Carries the compile → assemble → upload lifecycle. A variant is only ever
/// observable fully built: every failure path drops the partial variant, its
/// IR, and any device buffer before returning.

use std::sync::Arc;

use crate::backend::{AssemblyInfo, BufferDesc, BufferUsage, CompiledIr, DeviceBuffer};
use crate::engine::{DebugFlags, ShaderEngine};
use crate::error::{Error, Result};
use crate::shader::{
    disasm, footprint, Immediate, InputSlot, OutputSlot, Semantic, ShaderKey, Stage, INVALID_REGID,
};
use crate::{engine_debug, engine_error};

/// Constant banks are addressed with an 8-bit field
const MAX_CONSTLEN: u32 = 255;

/// One compiled instance of a [`ShaderProgram`](crate::shader::ShaderProgram)
/// specialized for one normalized pipeline-state key
pub struct ShaderVariant {
    pub(crate) stage: Stage,
    pub(crate) key: ShaderKey,

    /// Backend IR, held only between compilation and a successful upload
    pub(crate) ir: Option<Box<dyn CompiledIr>>,

    /// Assembled-binary statistics
    pub(crate) info: AssemblyInfo,

    /// Instruction-memory length in hardware granules
    pub(crate) instrlen: u32,

    /// Constant-bank length, clamped to the hardware maximum
    pub(crate) constlen: u32,

    pub(crate) inputs: Vec<InputSlot>,
    pub(crate) outputs: Vec<OutputSlot>,

    pub(crate) immediates: Vec<Immediate>,
    pub(crate) first_immediate: u32,

    /// Fragment stage: barycentric position register
    pub(crate) pos_regid: u8,
    pub(crate) frag_coord: bool,
    pub(crate) frag_face: bool,

    /// Device memory holding the final machine code
    pub(crate) buffer: Option<Arc<dyn DeviceBuffer>>,
}

impl ShaderVariant {
    /// Compile, assemble, and upload a new variant
    ///
    /// `key` must already be normalized for `stage`. On any failure the
    /// partially-built variant and all of its allocations are released and
    /// nothing becomes reachable from the cache.
    pub(crate) fn build(
        engine: &ShaderEngine,
        stage: Stage,
        tokens: &[u32],
        key: ShaderKey,
    ) -> Result<Self> {
        let config = engine.config();

        if config.debug.contains(DebugFlags::DISASM) {
            engine_debug!(
                "nova::ShaderVariant",
                "dump tokens: stage={:?}, k={{bp={}, cts={}, hp={}}}",
                stage,
                key.binning_pass,
                key.color_two_side,
                key.half_precision
            );
            dump_tokens(tokens);
        }

        let output = engine
            .compiler()
            .compile(config.gpu_id, stage, tokens, &key)
            .map_err(|err| {
                engine_error!("nova::ShaderVariant", "compile failed: {}", err);
                Error::CompileFailed(err.to_string())
            })?;

        let mut variant = ShaderVariant {
            stage,
            key,
            ir: Some(output.ir),
            info: AssemblyInfo::default(),
            instrlen: 0,
            constlen: output.constlen,
            inputs: output.inputs,
            outputs: output.outputs,
            immediates: output.immediates,
            first_immediate: output.first_immediate,
            pos_regid: output.pos_regid,
            frag_coord: output.frag_coord,
            frag_face: output.frag_face,
            buffer: None,
        };

        let assembly = variant
            .ir
            .as_deref()
            .and_then(|ir| engine.assembler().assemble(ir, config.gpu_id))
            .ok_or_else(|| {
                engine_error!("nova::ShaderVariant", "assemble failed: stage={:?}", stage);
                Error::AssembleFailed(format!("no binary produced for stage {:?}", stage))
            })?;

        variant.info = assembly.info;

        // Instruction memory is counted in fetch groups of 16 instructions
        // on generation >= 400 and 4 on earlier parts, 2 dwords each.
        variant.instrlen = if config.gpu_id >= 400 {
            variant.info.sizedwords / (2 * 16)
        } else {
            variant.info.sizedwords / (2 * 4)
        };

        // The compiler sets constlen to a worst-case value when relative
        // addressing into constants is used, since the assembler cannot
        // bound such accesses; never shrink it.
        let referenced = (variant.info.max_const + 1).max(0) as u32;
        variant.constlen = variant.constlen.max(referenced).min(MAX_CONSTLEN);

        footprint::fixup_register_footprint(&mut variant);

        let size = u64::from(variant.info.sizedwords) * 4;
        let buffer = engine
            .allocator()
            .create_buffer(BufferDesc {
                size,
                usage: BufferUsage::WRITE_COMBINE | BufferUsage::CPU_MAPPABLE,
            })
            .map_err(|err| {
                engine_error!("nova::ShaderVariant", "buffer allocation failed: {}", err);
                match err {
                    Error::OutOfMemory => Error::OutOfMemory,
                    other => Error::UploadFailed(other.to_string()),
                }
            })?;

        buffer
            .update(0, bytemuck::cast_slice(&assembly.words))
            .map_err(|err| {
                engine_error!("nova::ShaderVariant", "binary upload failed: {}", err);
                Error::UploadFailed(err.to_string())
            })?;

        variant.buffer = Some(buffer);

        if config.debug.contains(DebugFlags::DISASM) {
            engine_debug!(
                "nova::ShaderVariant",
                "disassemble: stage={:?}, k={{bp={}, cts={}, hp={}}}",
                stage,
                key.binning_pass,
                key.color_two_side,
                key.half_precision
            );
            print!(
                "{}",
                disasm::variant_disasm(&variant, &assembly.words, engine.disassembler())
            );
        }

        // The IR is not needed once the binary is uploaded.
        variant.ir = None;

        Ok(variant)
    }

    /// Pipeline stage the variant was compiled for
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The normalized key the variant was compiled for
    pub fn key(&self) -> &ShaderKey {
        &self.key
    }

    /// Assembled-binary statistics
    pub fn info(&self) -> &AssemblyInfo {
        &self.info
    }

    /// Instruction-memory length in hardware granules
    pub fn instrlen(&self) -> u32 {
        self.instrlen
    }

    /// Constant-bank length, clamped to the hardware maximum
    pub fn constlen(&self) -> u32 {
        self.constlen
    }

    /// Declared input values in declaration order
    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    /// Declared output values in declaration order
    pub fn outputs(&self) -> &[OutputSlot] {
        &self.outputs
    }

    /// Immediate constants referenced by the program
    pub fn immediates(&self) -> &[Immediate] {
        &self.immediates
    }

    /// First constant bank free for immediates
    pub fn first_immediate(&self) -> u32 {
        self.first_immediate
    }

    /// Fragment stage: barycentric position register
    pub fn pos_regid(&self) -> u8 {
        self.pos_regid
    }

    /// Fragment stage: the fragment-coordinate built-in is read
    pub fn frag_coord(&self) -> bool {
        self.frag_coord
    }

    /// Fragment stage: the front/back-face built-in is read
    pub fn frag_face(&self) -> bool {
        self.frag_face
    }

    /// Device buffer holding the machine code (always present on a built
    /// variant)
    pub fn buffer(&self) -> Option<&Arc<dyn DeviceBuffer>> {
        self.buffer.as_ref()
    }

    /// True while the backend IR is still held
    pub fn has_ir(&self) -> bool {
        self.ir.is_some()
    }

    /// Register id of the first output matching `semantic`, or
    /// [`INVALID_REGID`] when the program does not produce it
    pub fn output_regid(&self, semantic: Semantic) -> u8 {
        self.outputs
            .iter()
            .find(|o| o.semantic == semantic)
            .map(|o| o.regid)
            .unwrap_or(INVALID_REGID)
    }
}

/// Hex dump of the raw token stream, 8 words per line
fn dump_tokens(tokens: &[u32]) {
    for chunk in tokens.chunks(8) {
        let words: Vec<String> = chunk.iter().map(|w| format!("0x{:08x}", w)).collect();
        println!("; {}", words.join(" "));
    }
}

#[cfg(test)]
#[path = "variant_tests.rs"]
mod tests;
