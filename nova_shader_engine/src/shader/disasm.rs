/// Disassembly reporter - diagnostic dump of a built variant
///
/// Produces a deterministic textual report from a variant and its binary
/// words: declared values, immediates, the backend disassembly of the raw
/// instruction stream, summary lines, and stage-specific registers. Purely
/// diagnostic; never consulted for correctness. Ordering follows the
/// variant's declaration order exactly.

use std::fmt::{self, Write};

use crate::backend::Disassembler;
use crate::shader::variant::ShaderVariant;
use crate::shader::{reg_name, Semantic, SemanticName, Stage, INVALID_REGID};

/// Render the diagnostic report for a variant and its binary words
pub fn variant_disasm(v: &ShaderVariant, words: &[u32], dis: &dyn Disassembler) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, v, words, dis);
    out
}

fn write_report(
    out: &mut String,
    v: &ShaderVariant,
    words: &[u32],
    dis: &dyn Disassembler,
) -> fmt::Result {
    for (i, input) in v.inputs().iter().enumerate() {
        writeln!(out, "@in({})\tin{}", reg_name(input.regid, input.half), i)?;
    }

    for (i, output) in v.outputs().iter().enumerate() {
        // Kill shows up as a synthetic output; skip it.
        if output.kill {
            continue;
        }
        writeln!(out, "@out({})\tout{}", reg_name(output.regid, output.half), i)?;
    }

    for (i, imm) in v.immediates().iter().enumerate() {
        writeln!(
            out,
            "@const(c{}.x)\t0x{:08x}, 0x{:08x}, 0x{:08x}, 0x{:08x}",
            v.first_immediate() as usize + i,
            imm.val[0],
            imm.val[1],
            imm.val[2],
            imm.val[3]
        )?;
    }

    dis.disassemble(words, v.stage(), out)?;

    let tag = stage_tag(v.stage());

    write!(out, "; {}: outputs:", tag)?;
    for output in v.outputs() {
        if output.kill {
            continue;
        }
        write!(out, " {} ({})", reg_name(output.regid, false), output.semantic)?;
    }
    writeln!(out)?;

    write!(out, "; {}: inputs:", tag)?;
    for input in v.inputs() {
        write!(
            out,
            " {} ({},cm={:x},il={},b={})",
            reg_name(input.regid, false),
            input.semantic,
            input.compmask,
            input.inloc,
            u32::from(input.bary)
        )?;
    }
    writeln!(out)?;

    // Generic shader info
    writeln!(
        out,
        "; {}: {} instructions, {} half, {} full",
        tag,
        v.info().instrs_count,
        v.info().max_half_reg + 1,
        v.info().max_reg + 1
    )?;

    // Stage-specific info
    match v.stage() {
        Stage::Vertex => {
            dump_output_reg(out, v, Semantic::new(SemanticName::Position, 0), "pos")?;
            dump_output_reg(out, v, Semantic::new(SemanticName::PointSize, 0), "psize")?;
        }
        Stage::Fragment => {
            dump_reg(out, "pos (bary)", v.pos_regid())?;
            dump_output_reg(out, v, Semantic::new(SemanticName::Position, 0), "posz")?;
            dump_output_reg(out, v, Semantic::new(SemanticName::Color, 0), "color")?;
            // These two registers cannot be programmed to anything but
            // their hard-wired locations.
            if v.frag_coord() {
                writeln!(out, "; fragcoord: r0.x")?;
            }
            if v.frag_face() {
                writeln!(out, "; fragface: hr0.x")?;
            }
        }
        Stage::Compute => {}
    }

    writeln!(out)?;

    Ok(())
}

fn dump_output_reg(
    out: &mut String,
    v: &ShaderVariant,
    semantic: Semantic,
    name: &str,
) -> fmt::Result {
    dump_reg(out, name, v.output_regid(semantic))
}

fn dump_reg(out: &mut String, name: &str, regid: u8) -> fmt::Result {
    if regid != INVALID_REGID {
        writeln!(out, "; {}: {}", name, reg_name(regid, false))?;
    }
    Ok(())
}

fn stage_tag(stage: Stage) -> &'static str {
    match stage {
        Stage::Vertex => "VERT",
        Stage::Fragment => "FRAG",
        Stage::Compute => "COMP",
    }
}

#[cfg(test)]
#[path = "disasm_tests.rs"]
mod tests;
