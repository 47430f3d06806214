//! x86-64 register domain: physical registers named the way the Go assembler
//! spells them, virtual registers awaiting allocation, and the `Allocation`
//! map that rewrites one into the other.
#![allow(dead_code)]
use super::*;

/// Register file a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    GP,
    Vector,
    Mask,
    Pseudo,
}

/// Register width. B8L and B8H are the low and high byte views of a GP register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    B8L,
    B8H,
    B16,
    B32,
    B64,
    B128,
    B256,
    B512,
}
impl Width {
    pub fn bytes(self) -> u16 {
        match self {
            Width::B8L | Width::B8H => 1,
            Width::B16 => 2,
            Width::B32 => 4,
            Width::B64 => 8,
            Width::B128 => 16,
            Width::B256 => 32,
            Width::B512 => 64,
        }
    }
    pub fn bits(self) -> u16 { self.bytes() * 8 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Physical {
        class: Class,
        width: Width,
        index: u8,
        /// assembler spelling, e.g. "AX" for RAX, EAX and AX alike
        name: &'static str,
    },
    Virtual {
        class: Class,
        width: Width,
        id: u32,
    },
}

impl Register {
    pub fn new_virtual(class: Class, width: Width, id: u32) -> Register { Register::Virtual { class, width, id } }
    pub fn class(&self) -> Class {
        match self {
            Register::Physical { class, .. } | Register::Virtual { class, .. } => *class,
        }
    }
    pub fn width(&self) -> Width {
        match self {
            Register::Physical { width, .. } | Register::Virtual { width, .. } => *width,
        }
    }
    pub fn is_virtual(&self) -> bool { matches!(self, Register::Virtual { .. }) }
    pub fn asm(&self) -> String {
        match self {
            Register::Physical { name, .. } => name.to_string(),
            Register::Virtual { class, width, id } => format!("<virtual:{}:{:?}:{}>", id, class, width.bytes()),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.asm()) }
}

macro_rules! registers {
    ($($ident:ident = $class:ident $width:ident $index:literal $name:literal;)*) => {
        $(pub const $ident: Register = Register::Physical {
            class: Class::$class,
            width: Width::$width,
            index: $index,
            name: $name,
        };)*

        /// Every physical register, in definition order.
        pub const ALL: &[Register] = &[$($ident),*];

        impl Register {
            /// Look up a physical register by its constant name (e.g. "R13B" or "FRAME_POINTER").
            pub fn from_ident(ident: &str) -> Option<Register> {
                match ident {
                    $(stringify!($ident) => Some($ident),)*
                    _ => None,
                }
            }
        }
    };
}

registers! {
    AL    = GP B8L  0  "AL";
    CL    = GP B8L  1  "CL";
    DL    = GP B8L  2  "DL";
    BL    = GP B8L  3  "BL";
    SPB   = GP B8L  4  "SPB";
    BPB   = GP B8L  5  "BPB";
    SIB   = GP B8L  6  "SIB";
    DIB   = GP B8L  7  "DIB";
    R8B   = GP B8L  8  "R8B";
    R9B   = GP B8L  9  "R9B";
    R10B  = GP B8L  10 "R10B";
    R11B  = GP B8L  11 "R11B";
    R12B  = GP B8L  12 "R12B";
    R13B  = GP B8L  13 "R13B";
    R14B  = GP B8L  14 "R14B";
    R15B  = GP B8L  15 "R15B";
    AH    = GP B8H  0  "AH";
    CH    = GP B8H  1  "CH";
    DH    = GP B8H  2  "DH";
    BH    = GP B8H  3  "BH";
    AX    = GP B16  0  "AX";
    CX    = GP B16  1  "CX";
    DX    = GP B16  2  "DX";
    BX    = GP B16  3  "BX";
    SP    = GP B16  4  "SP";
    BP    = GP B16  5  "BP";
    SI    = GP B16  6  "SI";
    DI    = GP B16  7  "DI";
    R8W   = GP B16  8  "R8";
    R9W   = GP B16  9  "R9";
    R10W  = GP B16  10 "R10";
    R11W  = GP B16  11 "R11";
    R12W  = GP B16  12 "R12";
    R13W  = GP B16  13 "R13";
    R14W  = GP B16  14 "R14";
    R15W  = GP B16  15 "R15";
    EAX   = GP B32  0  "AX";
    ECX   = GP B32  1  "CX";
    EDX   = GP B32  2  "DX";
    EBX   = GP B32  3  "BX";
    ESP   = GP B32  4  "SP";
    EBP   = GP B32  5  "BP";
    ESI   = GP B32  6  "SI";
    EDI   = GP B32  7  "DI";
    R8L   = GP B32  8  "R8";
    R9L   = GP B32  9  "R9";
    R10L  = GP B32  10 "R10";
    R11L  = GP B32  11 "R11";
    R12L  = GP B32  12 "R12";
    R13L  = GP B32  13 "R13";
    R14L  = GP B32  14 "R14";
    R15L  = GP B32  15 "R15";
    RAX   = GP B64  0  "AX";
    RCX   = GP B64  1  "CX";
    RDX   = GP B64  2  "DX";
    RBX   = GP B64  3  "BX";
    RSP   = GP B64  4  "SP";
    RBP   = GP B64  5  "BP";
    RSI   = GP B64  6  "SI";
    RDI   = GP B64  7  "DI";
    R8    = GP B64  8  "R8";
    R9    = GP B64  9  "R9";
    R10   = GP B64  10 "R10";
    R11   = GP B64  11 "R11";
    R12   = GP B64  12 "R12";
    R13   = GP B64  13 "R13";
    R14   = GP B64  14 "R14";
    R15   = GP B64  15 "R15";
    X0    = Vector B128 0  "X0";
    X1    = Vector B128 1  "X1";
    X2    = Vector B128 2  "X2";
    X3    = Vector B128 3  "X3";
    X4    = Vector B128 4  "X4";
    X5    = Vector B128 5  "X5";
    X6    = Vector B128 6  "X6";
    X7    = Vector B128 7  "X7";
    X8    = Vector B128 8  "X8";
    X9    = Vector B128 9  "X9";
    X10   = Vector B128 10 "X10";
    X11   = Vector B128 11 "X11";
    X12   = Vector B128 12 "X12";
    X13   = Vector B128 13 "X13";
    X14   = Vector B128 14 "X14";
    X15   = Vector B128 15 "X15";
    X16   = Vector B128 16 "X16";
    X17   = Vector B128 17 "X17";
    X18   = Vector B128 18 "X18";
    X19   = Vector B128 19 "X19";
    X20   = Vector B128 20 "X20";
    X21   = Vector B128 21 "X21";
    X22   = Vector B128 22 "X22";
    X23   = Vector B128 23 "X23";
    X24   = Vector B128 24 "X24";
    X25   = Vector B128 25 "X25";
    X26   = Vector B128 26 "X26";
    X27   = Vector B128 27 "X27";
    X28   = Vector B128 28 "X28";
    X29   = Vector B128 29 "X29";
    X30   = Vector B128 30 "X30";
    X31   = Vector B128 31 "X31";
    Y0    = Vector B256 0  "Y0";
    Y1    = Vector B256 1  "Y1";
    Y2    = Vector B256 2  "Y2";
    Y3    = Vector B256 3  "Y3";
    Y4    = Vector B256 4  "Y4";
    Y5    = Vector B256 5  "Y5";
    Y6    = Vector B256 6  "Y6";
    Y7    = Vector B256 7  "Y7";
    Y8    = Vector B256 8  "Y8";
    Y9    = Vector B256 9  "Y9";
    Y10   = Vector B256 10 "Y10";
    Y11   = Vector B256 11 "Y11";
    Y12   = Vector B256 12 "Y12";
    Y13   = Vector B256 13 "Y13";
    Y14   = Vector B256 14 "Y14";
    Y15   = Vector B256 15 "Y15";
    Y16   = Vector B256 16 "Y16";
    Y17   = Vector B256 17 "Y17";
    Y18   = Vector B256 18 "Y18";
    Y19   = Vector B256 19 "Y19";
    Y20   = Vector B256 20 "Y20";
    Y21   = Vector B256 21 "Y21";
    Y22   = Vector B256 22 "Y22";
    Y23   = Vector B256 23 "Y23";
    Y24   = Vector B256 24 "Y24";
    Y25   = Vector B256 25 "Y25";
    Y26   = Vector B256 26 "Y26";
    Y27   = Vector B256 27 "Y27";
    Y28   = Vector B256 28 "Y28";
    Y29   = Vector B256 29 "Y29";
    Y30   = Vector B256 30 "Y30";
    Y31   = Vector B256 31 "Y31";
    Z0    = Vector B512 0  "Z0";
    Z1    = Vector B512 1  "Z1";
    Z2    = Vector B512 2  "Z2";
    Z3    = Vector B512 3  "Z3";
    Z4    = Vector B512 4  "Z4";
    Z5    = Vector B512 5  "Z5";
    Z6    = Vector B512 6  "Z6";
    Z7    = Vector B512 7  "Z7";
    Z8    = Vector B512 8  "Z8";
    Z9    = Vector B512 9  "Z9";
    Z10   = Vector B512 10 "Z10";
    Z11   = Vector B512 11 "Z11";
    Z12   = Vector B512 12 "Z12";
    Z13   = Vector B512 13 "Z13";
    Z14   = Vector B512 14 "Z14";
    Z15   = Vector B512 15 "Z15";
    Z16   = Vector B512 16 "Z16";
    Z17   = Vector B512 17 "Z17";
    Z18   = Vector B512 18 "Z18";
    Z19   = Vector B512 19 "Z19";
    Z20   = Vector B512 20 "Z20";
    Z21   = Vector B512 21 "Z21";
    Z22   = Vector B512 22 "Z22";
    Z23   = Vector B512 23 "Z23";
    Z24   = Vector B512 24 "Z24";
    Z25   = Vector B512 25 "Z25";
    Z26   = Vector B512 26 "Z26";
    Z27   = Vector B512 27 "Z27";
    Z28   = Vector B512 28 "Z28";
    Z29   = Vector B512 29 "Z29";
    Z30   = Vector B512 30 "Z30";
    Z31   = Vector B512 31 "Z31";
    K0    = Mask B64  0  "K0";
    K1    = Mask B64  1  "K1";
    K2    = Mask B64  2  "K2";
    K3    = Mask B64  3  "K3";
    K4    = Mask B64  4  "K4";
    K5    = Mask B64  5  "K5";
    K6    = Mask B64  6  "K6";
    K7    = Mask B64  7  "K7";
    STATIC_BASE     = Pseudo B64 0 "SB";
    FRAME_POINTER   = Pseudo B64 1 "FP";
    PROGRAM_COUNTER = Pseudo B64 2 "PC";
    STACK_POINTER   = Pseudo B64 3 "SP";
}

/// Maps registers (normally virtual) to the registers that replace them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    map: HashMap<Register, Register>,
}

impl Allocation {
    pub fn new() -> Self { Allocation { map: HashMap::new() } }
    /// Record that `from` is allocated to `to`. Re-adding the same pair is fine;
    /// moving an already allocated register elsewhere is an error.
    pub fn add(&mut self, from: Register, to: Register) -> Result<(), Error> {
        if let Some(existing) = self.map.get(&from) {
            if *existing != to {
                return Err(invariant_err!(
                    ErrorKind::Allocation,
                    Some(from.asm().as_str()),
                    "register already allocated to {}, cannot allocate to {}",
                    existing,
                    to
                ));
            }
        }
        self.map.insert(from, to);
        Ok(())
    }
    pub fn lookup(&self, reg: Register) -> Option<Register> { self.map.get(&reg).copied() }
    /// The allocated register, or `reg` itself if it has no allocation.
    pub fn lookup_default(&self, reg: Register) -> Register { self.lookup(reg).unwrap_or(reg) }
    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}
