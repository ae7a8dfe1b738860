use super::*;
use crate::backend::mock_backend::MockDisassembler;
use crate::backend::AssemblyInfo;
use crate::shader::{
    regid, Immediate, InputSlot, OutputSlot, Semantic, SemanticName, ShaderKey, ShaderVariant,
    Stage, INVALID_REGID,
};

// ============================================================================
// Helpers
// ============================================================================

fn make_variant(stage: Stage) -> ShaderVariant {
    ShaderVariant {
        stage,
        key: ShaderKey::default(),
        ir: None,
        info: AssemblyInfo {
            instrs_count: 10,
            sizedwords: 2,
            max_reg: 3,
            max_half_reg: -1,
            max_const: -1,
        },
        instrlen: 0,
        constlen: 0,
        inputs: Vec::new(),
        outputs: Vec::new(),
        immediates: Vec::new(),
        first_immediate: 0,
        pos_regid: INVALID_REGID,
        frag_coord: false,
        frag_face: false,
        buffer: None,
    }
}

fn report(v: &ShaderVariant) -> String {
    variant_disasm(v, &[0xdead_beef, 0x0000_1234], &MockDisassembler)
}

fn texcoord_input(regid: u8, half: bool) -> InputSlot {
    InputSlot {
        semantic: Semantic::new(SemanticName::TexCoord, 0),
        regid,
        half,
        compmask: 0xf,
        inloc: 1,
        bary: true,
    }
}

fn color_output(regid: u8) -> OutputSlot {
    OutputSlot {
        semantic: Semantic::new(SemanticName::Color, 0),
        regid,
        half: false,
        kill: false,
    }
}

// ============================================================================
// Declared values
// ============================================================================

#[test]
fn test_inputs_listed_in_declaration_order() {
    let mut v = make_variant(Stage::Fragment);
    v.inputs.push(texcoord_input(regid(0, 0), false));
    v.inputs.push(texcoord_input(regid(1, 2), true));
    v.pos_regid = regid(0, 0);

    let text = report(&v);
    let in0 = text.find("@in(r0.x)\tin0").expect("first input line");
    let in1 = text.find("@in(hr1.z)\tin1").expect("second input line");
    assert!(in0 < in1);
}

#[test]
fn test_outputs_listed_with_half_marker() {
    let mut v = make_variant(Stage::Vertex);
    v.outputs.push(OutputSlot {
        semantic: Semantic::new(SemanticName::Position, 0),
        regid: regid(2, 1),
        half: true,
        kill: false,
    });

    let text = report(&v);
    assert!(text.contains("@out(hr2.y)\tout0"));
}

#[test]
fn test_kill_outputs_skipped_everywhere() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(0, 0);
    v.outputs.push(OutputSlot {
        semantic: Semantic::new(SemanticName::Generic, 0),
        regid: regid(5, 0),
        half: false,
        kill: true,
    });
    v.outputs.push(color_output(regid(2, 1)));

    let text = report(&v);
    assert!(!text.contains("@out(r5.x)"));
    assert!(!text.contains("r5.x (generic:0)"));
    // The non-kill output keeps its declaration index.
    assert!(text.contains("@out(r2.y)\tout1"));
}

// ============================================================================
// Immediates
// ============================================================================

#[test]
fn test_immediates_dumped_from_first_free_bank() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(0, 0);
    v.first_immediate = 4;
    v.immediates.push(Immediate {
        val: [0x1, 0x2, 0x3, 0x4],
    });
    v.immediates.push(Immediate {
        val: [0xffff_ffff, 0, 0, 0],
    });

    let text = report(&v);
    assert!(text.contains("@const(c4.x)\t0x00000001, 0x00000002, 0x00000003, 0x00000004"));
    assert!(text.contains("@const(c5.x)\t0xffffffff, 0x00000000, 0x00000000, 0x00000000"));
}

// ============================================================================
// Backend disassembly
// ============================================================================

#[test]
fn test_backend_disassembly_included() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(0, 0);

    let text = report(&v);
    assert!(text.contains("; disasm: Fragment, 2 dwords"));
    assert!(text.contains("deadbeef"));
}

// ============================================================================
// Summary lines
// ============================================================================

#[test]
fn test_summary_lines_for_fragment() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(1, 0);
    v.inputs.push(texcoord_input(regid(0, 0), false));
    v.outputs.push(color_output(regid(2, 1)));

    let text = report(&v);
    assert!(text.contains("; FRAG: outputs: r2.y (color:0)"));
    assert!(text.contains("; FRAG: inputs: r0.x (texcoord:0,cm=f,il=1,b=1)"));
    assert!(text.contains("; FRAG: 10 instructions, 0 half, 4 full"));
}

#[test]
fn test_fragment_stage_trailer() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(1, 0);
    v.outputs.push(color_output(regid(2, 1)));
    v.frag_coord = true;
    v.frag_face = true;

    let text = report(&v);
    assert!(text.contains("; pos (bary): r1.x"));
    assert!(text.contains("; color: r2.y"));
    // No depth output was declared; the posz line is omitted.
    assert!(!text.contains("; posz:"));
    assert!(text.contains("; fragcoord: r0.x"));
    assert!(text.contains("; fragface: hr0.x"));
}

#[test]
fn test_vertex_stage_trailer() {
    let mut v = make_variant(Stage::Vertex);
    v.outputs.push(OutputSlot {
        semantic: Semantic::new(SemanticName::Position, 0),
        regid: regid(0, 0),
        half: false,
        kill: false,
    });
    v.outputs.push(OutputSlot {
        semantic: Semantic::new(SemanticName::PointSize, 0),
        regid: regid(1, 0),
        half: false,
        kill: false,
    });

    let text = report(&v);
    assert!(text.contains("; pos: r0.x"));
    assert!(text.contains("; psize: r1.x"));
    assert!(!text.contains("fragcoord"));
}

#[test]
fn test_vertex_without_point_size_omits_line() {
    let mut v = make_variant(Stage::Vertex);
    v.outputs.push(OutputSlot {
        semantic: Semantic::new(SemanticName::Position, 0),
        regid: regid(0, 0),
        half: false,
        kill: false,
    });

    let text = report(&v);
    assert!(text.contains("; pos: r0.x"));
    assert!(!text.contains("; psize:"));
}

#[test]
fn test_compute_has_no_stage_trailer() {
    let v = make_variant(Stage::Compute);
    let text = report(&v);
    assert!(text.contains("; COMP: 10 instructions"));
    assert!(!text.contains("; pos"));
    assert!(!text.contains("fragcoord"));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_report_is_deterministic() {
    let mut v = make_variant(Stage::Fragment);
    v.pos_regid = regid(1, 0);
    v.inputs.push(texcoord_input(regid(0, 0), false));
    v.outputs.push(color_output(regid(2, 1)));
    v.immediates.push(Immediate {
        val: [1, 2, 3, 4],
    });

    assert_eq!(report(&v), report(&v));
}

#[test]
fn test_report_ends_with_blank_line() {
    let v = make_variant(Stage::Compute);
    let text = report(&v);
    assert!(text.ends_with("\n\n"));
}
