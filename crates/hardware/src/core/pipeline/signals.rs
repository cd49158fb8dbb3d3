//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer an instruction through the pipeline. It performs:
//! 1. **Operation Classification:** The ALU operation and compare condition.
//! 2. **Operand Selection:** The source of the ALU's B input.
//! 3. **Memory Control:** Access width and sign extension for loads and stores.
//! 4. **Control Flow:** Jumps, conditional branches and linking.
//! 5. **Hazard Inputs:** Which registers and flag an instruction reads and writes.

/// Signed and unsigned compare conditions of the `l.sf*` family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than, unsigned.
    Gtu,
    /// Greater or equal, unsigned.
    Geu,
    /// Less than, unsigned.
    Ltu,
    /// Less or equal, unsigned.
    Leu,
    /// Greater than, signed.
    Gts,
    /// Greater or equal, signed.
    Ges,
    /// Less than, signed.
    Lts,
    /// Less or equal, signed.
    Les,
}

/// ALU operation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition; also computes load/store effective addresses.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Signed multiply, low 32 bits.
    Mul,
    /// Unsigned multiply, low 32 bits.
    Mulu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Rotate right.
    Ror,
    /// Sign-extend the low half-word.
    Exths,
    /// Sign-extend the low byte.
    Extbs,
    /// Zero-extend the low half-word.
    Exthz,
    /// Zero-extend the low byte.
    Extbz,
    /// One-based index of the least significant set bit (0 if none).
    Ff1,
    /// One-based index of the most significant set bit (0 if none).
    Fl1,
    /// Compare producing 1 or 0 for the flag.
    Compare(Condition),
    /// Passes operand B through unchanged.
    PassB,
}

/// Source of the ALU's B operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperandB {
    /// Value read from register B (or the `l.cmov` selection).
    #[default]
    Register,
    /// Decoded immediate.
    Immediate,
    /// Return address (`pc + 8`) for jump-and-link instructions.
    LinkAddress,
}

/// Memory access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// One byte.
    Byte,
    /// Two bytes.
    Half,
    /// Four bytes.
    Word,
}

impl MemWidth {
    /// Access size in bytes.
    pub const fn bytes(self) -> u8 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Data memory operation of an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemOp {
    /// No data memory access.
    #[default]
    None,
    /// Load of `width` bytes, sign-extended when `signed`.
    Load {
        /// Access width.
        width: MemWidth,
        /// Sign-extend the loaded value.
        signed: bool,
    },
    /// Store of the low `width` bytes of register B.
    Store {
        /// Access width.
        width: MemWidth,
    },
}

/// Control transfer performed by an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Falls through to the next instruction.
    #[default]
    None,
    /// Unconditional PC-relative jump.
    Jump,
    /// PC-relative branch taken when the flag equals `if_flag`.
    Branch {
        /// Flag value that makes the branch taken.
        if_flag: bool,
    },
    /// Jump to the address in register B.
    JumpRegister,
}

impl ControlFlow {
    /// Returns `true` for any instruction that may redirect the program counter.
    pub const fn is_transfer(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Control signals derived by decode and carried down the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU operation; `None` when the instruction does not use the ALU.
    pub alu_op: Option<AluOp>,
    /// Source of the ALU's B operand.
    pub b_src: OperandB,
    /// Reads register A.
    pub reads_a: bool,
    /// Reads register B.
    pub reads_b: bool,
    /// Reads the compare flag.
    pub reads_flag: bool,
    /// Data memory operation.
    pub mem: MemOp,
    /// Writes the ALU result or loaded value to the destination register.
    pub reg_write: bool,
    /// Writes the ALU result to the compare flag.
    pub flag_write: bool,
    /// Control transfer kind.
    pub control: ControlFlow,
}
