/// Input/output value descriptors and register-id helpers

use std::fmt;

/// Pack a register number and component into a hardware register id
///
/// Bits [7:2] hold the register number, bits [1:0] the component.
pub const fn regid(num: u8, comp: u8) -> u8 {
    (num << 2) | (comp & 0x3)
}

/// Sentinel for "no register assigned" (r63.x)
pub const INVALID_REGID: u8 = regid(63, 0);

/// Render a packed register id as `r12.z` (or `hr12.z` for half precision)
pub fn reg_name(regid: u8, half: bool) -> String {
    format!(
        "{}r{}.{}",
        if half { "h" } else { "" },
        regid >> 2,
        comp_char(regid)
    )
}

fn comp_char(regid: u8) -> char {
    match regid & 0x3 {
        0 => 'x',
        1 => 'y',
        2 => 'z',
        _ => 'w',
    }
}

/// Semantic name of an input or output value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticName {
    Position,
    PointSize,
    Color,
    TexCoord,
    Generic,
}

/// Semantic name/index pair attached to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semantic {
    pub name: SemanticName,
    pub index: u8,
}

impl Semantic {
    pub const fn new(name: SemanticName, index: u8) -> Self {
        Self { name, index }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.name {
            SemanticName::Position => "position",
            SemanticName::PointSize => "psize",
            SemanticName::Color => "color",
            SemanticName::TexCoord => "texcoord",
            SemanticName::Generic => "generic",
        };
        write!(f, "{}:{}", name, self.index)
    }
}

/// Declared input value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSlot {
    /// Semantic the value carries
    pub semantic: Semantic,

    /// Packed register id the value is delivered in
    pub regid: u8,

    /// Delivered at half precision
    pub half: bool,

    /// Mask of components actually consumed
    pub compmask: u8,

    /// Interpolation location index
    pub inloc: u8,

    /// Fed by the barycentric interpolation hardware; the register id may
    /// be a meaningless placeholder in that case
    pub bary: bool,
}

/// Declared output value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSlot {
    /// Semantic the value carries
    pub semantic: Semantic,

    /// Packed register id the value is produced in
    pub regid: u8,

    /// Produced at half precision
    pub half: bool,

    /// Synthetic kill output; never materialized in a register
    pub kill: bool,
}

/// Four-component immediate constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Immediate {
    pub val: [u32; 4],
}
