use std::fmt::{self, Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RegisterName {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    IX,
    IY,
    IXL,
    IXH,
    IYL,
    IYH,
    PC,
    SP,
    AFPrime,
    I,
    R,
}

impl RegisterName {
    pub fn parse<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "a" | "A" => Some(Self::A),
            "b" | "B" => Some(Self::B),
            "c" | "C" => Some(Self::C),
            "d" | "D" => Some(Self::D),
            "e" | "E" => Some(Self::E),
            "h" | "H" => Some(Self::H),
            "l" | "L" => Some(Self::L),
            "af" | "AF" => Some(Self::AF),
            "bc" | "BC" => Some(Self::BC),
            "de" | "DE" => Some(Self::DE),
            "hl" | "HL" => Some(Self::HL),
            "ix" | "IX" => Some(Self::IX),
            "iy" | "IY" => Some(Self::IY),
            "ixl" | "IXL" => Some(Self::IXL),
            "ixh" | "IXH" => Some(Self::IXH),
            "iyl" | "IYL" => Some(Self::IYL),
            "iyh" | "IYH" => Some(Self::IYH),
            "pc" | "PC" => Some(Self::PC),
            "sp" | "SP" => Some(Self::SP),
            "af'" | "AF'" => Some(Self::AFPrime),
            "i" | "I" => Some(Self::I),
            "r" | "R" => Some(Self::R),
            _ => None,
        }
    }

    #[inline]
    fn is_byte(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::B
                | Self::C
                | Self::D
                | Self::E
                | Self::H
                | Self::L
                | Self::I
                | Self::R
                | Self::IXL
                | Self::IXH
                | Self::IYL
                | Self::IYH
        )
    }

    #[inline]
    fn is_wide(self) -> bool {
        matches!(
            self,
            Self::AF
                | Self::BC
                | Self::DE
                | Self::HL
                | Self::IX
                | Self::IY
                | Self::SP
                | Self::AFPrime
        )
    }
}

impl Display for RegisterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::A => "a",
                Self::B => "b",
                Self::C => "c",
                Self::D => "d",
                Self::E => "e",
                Self::H => "h",
                Self::L => "l",
                Self::AF => "af",
                Self::BC => "bc",
                Self::DE => "de",
                Self::HL => "hl",
                Self::IX => "ix",
                Self::IY => "iy",
                Self::IXL => "ixl",
                Self::IXH => "ixh",
                Self::IYL => "iyl",
                Self::IYH => "iyh",
                Self::PC => "pc",
                Self::SP => "sp",
                Self::AFPrime => "af'",
                Self::I => "i",
                Self::R => "r",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConditionCode {
    Zero,
    NotZero,
    Carry,
    NotCarry,
    ParityEven,
    ParityOdd,
    Positive,
    Negative,
}

impl ConditionCode {
    pub fn parse<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "z" | "Z" => Some(Self::Zero),
            "nz" | "NZ" => Some(Self::NotZero),
            "c" | "C" => Some(Self::Carry),
            "nc" | "NC" => Some(Self::NotCarry),
            "pe" | "PE" => Some(Self::ParityEven),
            "po" | "PO" => Some(Self::ParityOdd),
            "p" | "P" => Some(Self::Positive),
            "m" | "M" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl Display for ConditionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Zero => "z",
                Self::NotZero => "nz",
                Self::Carry => "c",
                Self::NotCarry => "nc",
                Self::ParityEven => "pe",
                Self::ParityOdd => "po",
                Self::Positive => "p",
                Self::Negative => "m",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexRegister {
    Ix,
    Iy,
}

impl Display for IndexRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Ix => "ix",
                Self::Iy => "iy",
            }
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unrecognized operand \"{0}\"")]
pub struct UnrecognizedOperand(pub String);

/// A concrete operand value as supplied by the caller, with any labels or
/// expressions already resolved to integers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operand {
    Register(RegisterName),
    Condition(ConditionCode),
    Immediate(i32),
    Indirect(RegisterName),
    IndirectImmediate(i32),
    Indexed(IndexRegister, i32),
}

impl Operand {
    /// Returns every operand pattern this value can satisfy, most specific
    /// first. A bare integer can be a bit index, restart vector, interrupt
    /// mode, or plain immediate; only the operation name disambiguates, so
    /// the encoder walks the candidates in order. `Imm8` candidacy is not
    /// gated on the value fitting a byte: an oversized value must surface
    /// as out-of-range, not as an unknown instruction.
    pub fn classify(&self) -> Result<Vec<OperandPattern>, UnrecognizedOperand> {
        match *self {
            Self::Register(name) if name.is_byte() => {
                if name == RegisterName::C {
                    // "c" doubles as the carry condition in jp/jr/call/ret
                    Ok(vec![
                        OperandPattern::Reg8(name),
                        OperandPattern::Condition(ConditionCode::Carry),
                    ])
                } else {
                    Ok(vec![OperandPattern::Reg8(name)])
                }
            }
            Self::Register(name) if name.is_wide() => Ok(vec![OperandPattern::Reg16(name)]),
            Self::Register(_) => Err(UnrecognizedOperand(self.to_string())),
            Self::Condition(code) => Ok(vec![OperandPattern::Condition(code)]),
            Self::Immediate(value) => {
                let mut candidates = Vec::with_capacity(6);
                if (0..8).contains(&value) {
                    candidates.push(OperandPattern::Bit(value as u8));
                }
                if (0..=0x38).contains(&value) && value % 8 == 0 {
                    candidates.push(OperandPattern::Rst(value as u8));
                }
                if (0..3).contains(&value) {
                    candidates.push(OperandPattern::InterruptMode(value as u8));
                }
                if value == 0 {
                    candidates.push(OperandPattern::Zero);
                }
                candidates.push(OperandPattern::Imm8);
                candidates.push(OperandPattern::Imm16);
                Ok(candidates)
            }
            Self::Indirect(RegisterName::C) => Ok(vec![OperandPattern::PortC]),
            Self::Indirect(name) => match name {
                RegisterName::BC
                | RegisterName::DE
                | RegisterName::HL
                | RegisterName::SP
                | RegisterName::IX
                | RegisterName::IY => Ok(vec![OperandPattern::IndirectReg(name)]),
                _ => Err(UnrecognizedOperand(self.to_string())),
            },
            Self::IndirectImmediate(_) => Ok(vec![
                OperandPattern::IndirectImm16,
                OperandPattern::PortImm8,
            ]),
            Self::Indexed(base, _) => Ok(vec![OperandPattern::Indexed(base)]),
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<i32> {
        match *self {
            Self::Immediate(value) | Self::IndirectImmediate(value) => Some(value),
            Self::Indexed(_, displacement) => Some(displacement),
            _ => None,
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(name) => write!(f, "{name}"),
            Self::Condition(code) => write!(f, "{code}"),
            Self::Immediate(value) => write!(f, "{value}"),
            Self::Indirect(name) => write!(f, "({name})"),
            Self::IndirectImmediate(value) => write!(f, "({value})"),
            Self::Indexed(base, displacement) => write!(f, "({base}{displacement:+})"),
        }
    }
}

/// The operand shape an instruction form is registered under. Placeholder
/// shapes (`Imm8`, `Imm16`, `IndirectImm16`, `PortImm8`, `Indexed`) render
/// with the `*`/`**` convention the lookup tables and decoder share.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OperandPattern {
    Reg8(RegisterName),
    Reg16(RegisterName),
    Imm8,
    Imm16,
    IndirectReg(RegisterName),
    IndirectImm16,
    Indexed(IndexRegister),
    Condition(ConditionCode),
    Bit(u8),
    Rst(u8),
    InterruptMode(u8),
    PortImm8,
    PortC,
    Zero,
}

impl Display for OperandPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg8(name) => write!(f, "{name}"),
            Self::Reg16(name) => write!(f, "{name}"),
            Self::Imm8 => write!(f, "*"),
            Self::Imm16 => write!(f, "**"),
            Self::IndirectReg(name) => write!(f, "({name})"),
            Self::IndirectImm16 => write!(f, "(**)"),
            Self::Indexed(base) => write!(f, "({base}+*)"),
            Self::Condition(code) => write!(f, "{code}"),
            Self::Bit(index) => write!(f, "{index}"),
            Self::Rst(0) => write!(f, "0"),
            Self::Rst(vector) => write!(f, "0x{vector:02x}"),
            Self::InterruptMode(mode) => write!(f, "{mode}"),
            Self::PortImm8 => write!(f, "(*)"),
            Self::PortC => write!(f, "(c)"),
            Self::Zero => write!(f, "0"),
        }
    }
}
