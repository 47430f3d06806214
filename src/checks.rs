//! Operand type checks: does an operand value fit an operand type tag from the instruction table?
use super::operand::{Mem, Operand};
use super::registers::{self, Class, Register, Width};

/// Returns true if `op` is acceptable wherever an operand of type `tag` is expected.
/// Unrecognized tags accept nothing.
pub fn satisfies(op: &Operand, tag: &str) -> bool {
    match tag {
        "1" => matches!(op, Operand::Imm(1)),
        "3" => matches!(op, Operand::Imm(3)),
        "imm2u" => is_imm_within(op, 3),
        "imm8" => is_imm_within(op, u8::MAX as u64),
        "imm16" => is_imm_within(op, u16::MAX as u64),
        "imm32" => is_imm_within(op, u32::MAX as u64),
        "imm64" => matches!(op, Operand::Imm(_)),

        "al" => is_exactly(op, registers::AL),
        "cl" => is_exactly(op, registers::CL),
        "ax" => is_exactly(op, registers::AX),
        "eax" => is_exactly(op, registers::EAX),
        "rax" => is_exactly(op, registers::RAX),
        "xmm0" => is_exactly(op, registers::X0),
        "r8" => is_reg(op, Class::GP, &[Width::B8L, Width::B8H]),
        "r16" => is_reg(op, Class::GP, &[Width::B16]),
        "r32" => is_reg(op, Class::GP, &[Width::B32]),
        "r64" => is_reg(op, Class::GP, &[Width::B64]),
        "xmm" => is_reg(op, Class::Vector, &[Width::B128]),
        "ymm" => is_reg(op, Class::Vector, &[Width::B256]),
        "zmm" => is_reg(op, Class::Vector, &[Width::B512]),
        "k" => matches!(op, Operand::Reg(r) if r.class() == Class::Mask),

        "m" | "m8" | "m16" | "m32" | "m64" | "m128" | "m256" | "m512" => {
            matches!(op, Operand::Mem(m) if !has_vector_index(m))
        }
        "vm32x" | "vm64x" => is_vector_mem(op, Width::B128),
        "vm32y" | "vm64y" => is_vector_mem(op, Width::B256),
        "vm32z" | "vm64z" => is_vector_mem(op, Width::B512),

        "rel8" => matches!(op, Operand::Rel(r) if i8::try_from(*r).is_ok()),
        "rel32" => matches!(op, Operand::Rel(_) | Operand::LabelRef(_)),
        _ => false,
    }
}

fn is_imm_within(op: &Operand, max: u64) -> bool { matches!(op, Operand::Imm(v) if *v <= max) }

fn is_exactly(op: &Operand, reg: Register) -> bool { matches!(op, Operand::Reg(r) if *r == reg) }

fn is_reg(op: &Operand, class: Class, widths: &[Width]) -> bool {
    matches!(op, Operand::Reg(r) if r.class() == class && widths.contains(&r.width()))
}

fn has_vector_index(m: &Mem) -> bool { m.index.map_or(false, |r| r.class() == Class::Vector) }

fn is_vector_mem(op: &Operand, width: Width) -> bool {
    match op {
        Operand::Mem(m) => m.index.map_or(false, |r| r.class() == Class::Vector && r.width() == width),
        _ => false,
    }
}
