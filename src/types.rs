use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default, Hash)]
pub struct Address(u16); //0-4095 (12 bits)

impl Address {
    #[must_use]
    pub fn new(n: u16) -> Self {
        debug_assert!(n < 4096);
        Self(n)
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instruction class selector, the top 4 bits of an instruction word.
///
/// Only 0-7 are defined by the architecture; 8-15 decode to `Undefined`
/// and are executed as no-ops unless the machine is in strict mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Opcode {
    Load,
    Store,
    JumpNoCarry,
    JumpCarry,
    Add,
    Sub,
    And,
    Xor,
    Undefined(u8),
}

impl Opcode {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Load,
            1 => Self::Store,
            2 => Self::JumpNoCarry,
            3 => Self::JumpCarry,
            4 => Self::Add,
            5 => Self::Sub,
            6 => Self::And,
            7 => Self::Xor,
            n => Self::Undefined(n),
        }
    }
}

/// A raw 16-bit instruction word: 4-bit opcode, 12-bit direct address.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Instruction(u16);

impl Instruction {
    #[must_use]
    pub const fn from_word(word: u16) -> Self {
        Self(word)
    }

    #[must_use]
    pub const fn word(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn opcode(self) -> Opcode {
        Opcode::from_bits((self.0 >> 12) as u8)
    }

    #[must_use]
    pub const fn operand(self) -> Address {
        Address(self.0 & 0xfff)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_opcode_and_operand() {
        let i = Instruction::from_word(0b0100_0000_0000_0011);
        assert_eq!(i.opcode(), Opcode::Add);
        assert_eq!(i.operand(), Address::new(3));
    }

    #[test]
    fn top_half_of_opcode_space_is_undefined() {
        for bits in 8..=15 {
            assert_eq!(Opcode::from_bits(bits), Opcode::Undefined(bits));
        }
    }

    #[test]
    fn displays_as_four_hex_digits() {
        assert_eq!(Instruction::from_word(0x1a).to_string(), "001a");
        assert_eq!(Instruction::from_word(0xffff).to_string(), "ffff");
    }
}
