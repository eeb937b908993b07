use std::io::{self, Write};

use thiserror::Error;

use crate::types::{Instruction, Opcode};

/// Words of uniformly-addressable memory, shared by program text and data.
pub const MEMORY_WORDS: usize = 65536;

/// Slots in the register file. Only slot 0 (the accumulator) is ever
/// referenced by a defined opcode; the rest are inert storage.
pub const REGISTER_COUNT: usize = 16;

/// Cycle budget used when the caller does not choose one.
pub const DEFAULT_CYCLES: u32 = 20;

#[derive(Debug, Error)]
pub enum RunError {
    /// Only raised in strict mode; the reference machine treats opcodes
    /// 8-15 as no-ops.
    #[error("undefined opcode {opcode} fetched at address {pc}")]
    UndefinedOpcode { opcode: u8, pc: u16 },
    #[error("could not write trace record")]
    Trace(#[from] io::Error),
}

pub struct Memory(Box<[u16; MEMORY_WORDS]>);

impl Default for Memory {
    fn default() -> Self {
        Self(Box::new([0; MEMORY_WORDS]))
    }
}

impl Memory {
    #[must_use]
    pub fn read(&self, addr: u16) -> u16 {
        self.0[addr as usize]
    }

    pub fn write(&mut self, addr: u16, word: u16) {
        self.0[addr as usize] = word;
    }
}

/// The whole machine state: register file, memory, program counter,
/// carry flag. One instance is exclusively owned by the driver for the
/// lifetime of a run; there is no other state anywhere.
#[derive(Default)]
pub struct Machine {
    registers: [u16; REGISTER_COUNT],
    memory: Memory,
    pc: u16,
    carry: bool,
    strict: bool,
}

impl Machine {
    /// A zeroed machine with the reference semantics: undefined opcodes
    /// execute as no-ops.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zeroed machine that faults on opcodes 8-15 instead of ignoring
    /// them.
    #[must_use]
    pub fn with_strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn registers(&self) -> &[u16; REGISTER_COUNT] {
        &self.registers
    }

    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    #[must_use]
    pub const fn carry_flag(&self) -> bool {
        self.carry
    }

    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Executes a single decoded instruction against the machine state.
    ///
    /// `pc` is only touched by the jump opcodes; the driver's unconditional
    /// post-increment still applies afterwards, so a taken jump to X lands
    /// at X + 1. The reference behaves this way and programs rely on it.
    ///
    /// # Errors
    ///
    /// Will return `RunError::UndefinedOpcode` for opcodes 8-15 in strict
    /// mode. In the default lenient mode this never fails.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), RunError> {
        let operand = instruction.operand();
        match instruction.opcode() {
            Opcode::Load => {
                self.registers[0] = self.memory.read(operand.get());
            }
            Opcode::Store => {
                self.memory.write(operand.get(), self.registers[0]);
            }
            Opcode::JumpNoCarry => {
                if !self.carry {
                    self.pc = operand.get();
                }
            }
            Opcode::JumpCarry => {
                if self.carry {
                    self.pc = operand.get();
                }
            }
            Opcode::Add => {
                // Wrapping at u16 width is identical to the architectural
                // mask to 16 bits; the overflow bit is the carry.
                let (sum, overflow) =
                    self.registers[0].overflowing_add(self.memory.read(operand.get()));
                self.registers[0] = sum;
                self.carry = overflow;
            }
            Opcode::Sub => {
                let (diff, borrow) =
                    self.registers[0].overflowing_sub(self.memory.read(operand.get()));
                self.registers[0] = diff;
                self.carry = borrow;
            }
            Opcode::And => {
                self.registers[0] &= self.memory.read(operand.get());
            }
            Opcode::Xor => {
                self.registers[0] ^= self.memory.read(operand.get());
            }
            Opcode::Undefined(opcode) => {
                if self.strict {
                    return Err(RunError::UndefinedOpcode {
                        opcode,
                        pc: self.pc,
                    });
                }
            }
        }
        Ok(())
    }

    /// Fetch-decode-execute for `cycles` cycles, writing one trace line per
    /// cycle to `out`. The loop never halts early; an infinite loop in the
    /// program just burns the remaining budget.
    ///
    /// # Errors
    ///
    /// Will return an `Err` if the trace sink fails or, in strict mode, if
    /// an undefined opcode is fetched.
    pub fn run<W: Write>(&mut self, cycles: u32, out: &mut W) -> Result<(), RunError> {
        tracing::debug!(cycles, pc = self.pc, "starting run");
        for cycle in 1..=cycles {
            let instruction = Instruction::from_word(self.memory.read(self.pc));
            self.execute(instruction)?;
            writeln!(
                out,
                "Cycle {cycle}: PC={}, Reg={:?}, Carry={}, Instruction={instruction}",
                self.pc,
                self.registers,
                u8::from(self.carry),
            )?;
            self.pc = self.pc.wrapping_add(1);
        }
        Ok(())
    }
}
