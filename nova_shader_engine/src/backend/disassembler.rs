/// Disassembler trait

use std::fmt;

use crate::shader::Stage;

/// Hardware disassembler interface
///
/// Writes a human-readable listing of raw instruction words to `out`.
/// Purely diagnostic; never consulted for correctness.
pub trait Disassembler: Send + Sync {
    /// Disassemble `words` for `stage` into `out`
    fn disassemble(&self, words: &[u32], stage: Stage, out: &mut dyn fmt::Write) -> fmt::Result;
}
