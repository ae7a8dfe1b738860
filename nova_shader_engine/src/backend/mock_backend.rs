/// Mock backend for unit tests (no GPU or backend compiler required)
///
/// These mocks let the variant cache and lifecycle be exercised without a
/// real backend: the compiler hands back a programmable output template and
/// counts invocations, the assembler returns a programmable binary, the
/// allocator tracks live buffers and captured uploads, and every collaborator
/// supports failure injection.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::backend::{
    Assembly, AssemblyInfo, BufferDesc, CompileOutput, CompiledIr, DeviceAllocator, DeviceBuffer,
    Disassembler, ShaderAssembler, ShaderCompiler,
};
use crate::error::{Error, Result};
use crate::shader::{Immediate, InputSlot, OutputSlot, ShaderKey, Stage, INVALID_REGID};

// ============================================================================
// Mock IR
// ============================================================================

#[derive(Debug)]
pub struct MockIr {
    pub stage: Stage,
    pub key: ShaderKey,
}

impl CompiledIr for MockIr {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock compiler
// ============================================================================

/// Template for the [`CompileOutput`] a [`MockCompiler`] hands back
#[derive(Debug, Clone)]
pub struct CompileTemplate {
    pub inputs: Vec<InputSlot>,
    pub outputs: Vec<OutputSlot>,
    pub immediates: Vec<Immediate>,
    pub first_immediate: u32,
    pub constlen: u32,
    pub pos_regid: u8,
    pub frag_coord: bool,
    pub frag_face: bool,
}

impl Default for CompileTemplate {
    fn default() -> Self {
        Self {
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

/// Mock compiler that counts invocations and records the keys it saw
pub struct MockCompiler {
    template: CompileTemplate,
    fail: bool,
    compile_count: AtomicUsize,
    keys: Mutex<Vec<ShaderKey>>,
}

impl MockCompiler {
    pub fn new() -> Self {
        Self::with_template(CompileTemplate::default())
    }

    pub fn with_template(template: CompileTemplate) -> Self {
        Self {
            template,
            fail: false,
            compile_count: AtomicUsize::new(0),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Compiler that rejects every program
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of compile calls observed
    pub fn compile_count(&self) -> usize {
        self.compile_count.load(Ordering::SeqCst)
    }

    /// Keys passed to compile, in call order
    pub fn compiled_keys(&self) -> Vec<ShaderKey> {
        self.keys.lock().unwrap().clone()
    }
}

impl ShaderCompiler for MockCompiler {
    fn compile(
        &self,
        _gpu_id: u32,
        stage: Stage,
        _tokens: &[u32],
        key: &ShaderKey,
    ) -> Result<CompileOutput> {
        self.compile_count.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().unwrap().push(*key);

        if self.fail {
            return Err(Error::CompileFailed(
                "mock compiler configured to fail".to_string(),
            ));
        }

        let mut output = CompileOutput::new(Box::new(MockIr { stage, key: *key }));
        output.inputs = self.template.inputs.clone();
        output.outputs = self.template.outputs.clone();
        output.immediates = self.template.immediates.clone();
        output.first_immediate = self.template.first_immediate;
        output.constlen = self.template.constlen;
        output.pos_regid = self.template.pos_regid;
        output.frag_coord = self.template.frag_coord;
        output.frag_face = self.template.frag_face;
        Ok(output)
    }
}

// ============================================================================
// Mock assembler
// ============================================================================

/// Mock assembler returning a fixed binary and statistics
pub struct MockAssembler {
    words: Vec<u32>,
    info: AssemblyInfo,
    fail: bool,
    assemble_count: AtomicUsize,
}

impl MockAssembler {
    pub fn new(words: Vec<u32>, info: AssemblyInfo) -> Self {
        Self {
            words,
            info,
            fail: false,
            assemble_count: AtomicUsize::new(0),
        }
    }

    /// Assembler that produces no binary
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new(), AssemblyInfo::default())
        }
    }

    /// Number of assemble calls observed
    pub fn assemble_count(&self) -> usize {
        self.assemble_count.load(Ordering::SeqCst)
    }
}

impl ShaderAssembler for MockAssembler {
    fn assemble(&self, _ir: &dyn CompiledIr, _gpu_id: u32) -> Option<Assembly> {
        self.assemble_count.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return None;
        }

        Some(Assembly {
            words: self.words.clone(),
            info: self.info,
        })
    }
}

// ============================================================================
// Mock allocator and device buffer
// ============================================================================

#[derive(Debug)]
pub struct MockDeviceBuffer {
    size: u64,
    data: Mutex<Vec<u8>>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
    live: Arc<AtomicUsize>,
}

impl DeviceBuffer for MockDeviceBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut stored = self.data.lock().unwrap();
        let offset = offset as usize;
        if offset + data.len() > stored.len() {
            return Err(Error::UploadFailed(format!(
                "write of {} bytes at offset {} exceeds buffer of {} bytes",
                data.len(),
                offset,
                stored.len()
            )));
        }
        stored[offset..offset + data.len()].copy_from_slice(data);
        self.uploads.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

impl Drop for MockDeviceBuffer {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mock allocator tracking live buffers and captured uploads
pub struct MockAllocator {
    fail: bool,
    live: Arc<AtomicUsize>,
    created: Mutex<Vec<BufferDesc>>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockAllocator {
    pub fn new() -> Self {
        Self {
            fail: false,
            live: Arc::new(AtomicUsize::new(0)),
            created: Mutex::new(Vec::new()),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Allocator that refuses every allocation
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of buffers currently alive
    pub fn live_buffers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Descriptors of every allocation, in call order
    pub fn created_descs(&self) -> Vec<BufferDesc> {
        self.created.lock().unwrap().clone()
    }

    /// Byte payloads of every buffer update, in call order
    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

impl DeviceAllocator for MockAllocator {
    fn create_buffer(&self, desc: BufferDesc) -> Result<Arc<dyn DeviceBuffer>> {
        if self.fail {
            return Err(Error::OutOfMemory);
        }

        self.created.lock().unwrap().push(desc);
        self.live.fetch_add(1, Ordering::SeqCst);

        Ok(Arc::new(MockDeviceBuffer {
            size: desc.size,
            data: Mutex::new(vec![0; desc.size as usize]),
            uploads: Arc::clone(&self.uploads),
            live: Arc::clone(&self.live),
        }))
    }
}

// ============================================================================
// Mock disassembler
// ============================================================================

/// Mock disassembler emitting one line per instruction word
pub struct MockDisassembler;

impl Disassembler for MockDisassembler {
    fn disassemble(&self, words: &[u32], stage: Stage, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "; disasm: {:?}, {} dwords", stage, words.len())?;
        for (i, word) in words.iter().enumerate() {
            writeln!(out, ":{:04}: {:08x}", i, word)?;
        }
        Ok(())
    }
}
