/// Register-footprint fixup for hardware-populated registers
///
/// Vertex inputs are loaded into registers before the program executes, so
/// the assembler's max_reg may not cover them (passthrough varyings in
/// particular). Fragment programs can likewise receive values in registers
/// no instruction ever touches, as a result of dead code elimination or
/// because there is no way to turn the register off.

use crate::shader::variant::ShaderVariant;
use crate::shader::Stage;

/// Raise `max_reg`/`max_half_reg` to cover registers populated by
/// fixed-function hardware
///
/// Only ever raises a maximum; applying it twice yields the same result.
pub(crate) fn fixup_register_footprint(v: &mut ShaderVariant) {
    match v.stage {
        Stage::Vertex => {
            for input in &v.inputs {
                // Inputs fetched via the barycentric hardware are not
                // written before the program starts, and their regid may
                // not even be valid.
                if input.bary {
                    continue;
                }

                if input.compmask != 0 {
                    let regid = i32::from((input.regid + 3) >> 2);
                    v.info.max_reg = v.info.max_reg.max(regid);
                }
            }

            for output in &v.outputs {
                let regid = i32::from((output.regid + 3) >> 2);
                v.info.max_reg = v.info.max_reg.max(regid);
            }
        }
        Stage::Fragment => {
            // The position register cannot be turned off; it may be, say,
            // r1.x while the highest register the instructions touch is r0.
            v.info.max_reg = v.info.max_reg.max(i32::from(v.pos_regid >> 2));

            if v.frag_coord {
                assert!(v.info.max_reg >= 0); // hard-wired r0.x
            }
            if v.frag_face {
                assert!(v.info.max_half_reg >= 0); // hard-wired hr0.x
            }
        }
        Stage::Compute => {}
    }
}

#[cfg(test)]
#[path = "footprint_tests.rs"]
mod tests;
