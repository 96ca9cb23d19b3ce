use std::fmt::{self, Display, Formatter};

use fxhash::FxHashMap;

use crate::operand::OperandPattern;

mod table;


#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OperationName {
    Adc,
    Add,
    And,
    Bit,
    Call,
    Ccf,
    Cp,
    Cpd,
    Cpdr,
    Cpi,
    Cpir,
    Cpl,
    Daa,
    Dec,
    Di,
    Djnz,
    Ei,
    Ex,
    Exx,
    Halt,
    Im,
    In,
    Inc,
    Ind,
    Indr,
    Ini,
    Inir,
    Jp,
    Jr,
    Ld,
    Ldd,
    Lddr,
    Ldi,
    Ldir,
    Neg,
    Nop,
    Or,
    Otdr,
    Otir,
    Out,
    Outd,
    Outi,
    Pop,
    Push,
    Res,
    Ret,
    Reti,
    Retn,
    Rl,
    Rla,
    Rlc,
    Rlca,
    Rld,
    Rr,
    Rra,
    Rrc,
    Rrca,
    Rrd,
    Rst,
    Sbc,
    Scf,
    Set,
    Sla,
    Sll,
    Sra,
    Srl,
    Sub,
    Xor,
}

impl OperationName {
    pub fn parse<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "adc" | "ADC" => Some(Self::Adc),
            "add" | "ADD" => Some(Self::Add),
            "and" | "AND" => Some(Self::And),
            "bit" | "BIT" => Some(Self::Bit),
            "call" | "CALL" => Some(Self::Call),
            "ccf" | "CCF" => Some(Self::Ccf),
            "cp" | "CP" => Some(Self::Cp),
            "cpd" | "CPD" => Some(Self::Cpd),
            "cpdr" | "CPDR" => Some(Self::Cpdr),
            "cpi" | "CPI" => Some(Self::Cpi),
            "cpir" | "CPIR" => Some(Self::Cpir),
            "cpl" | "CPL" => Some(Self::Cpl),
            "daa" | "DAA" => Some(Self::Daa),
            "dec" | "DEC" => Some(Self::Dec),
            "di" | "DI" => Some(Self::Di),
            "djnz" | "DJNZ" => Some(Self::Djnz),
            "ei" | "EI" => Some(Self::Ei),
            "ex" | "EX" => Some(Self::Ex),
            "exx" | "EXX" => Some(Self::Exx),
            "halt" | "HALT" => Some(Self::Halt),
            "im" | "IM" => Some(Self::Im),
            "in" | "IN" => Some(Self::In),
            "inc" | "INC" => Some(Self::Inc),
            "ind" | "IND" => Some(Self::Ind),
            "indr" | "INDR" => Some(Self::Indr),
            "ini" | "INI" => Some(Self::Ini),
            "inir" | "INIR" => Some(Self::Inir),
            "jp" | "JP" => Some(Self::Jp),
            "jr" | "JR" => Some(Self::Jr),
            "ld" | "LD" => Some(Self::Ld),
            "ldd" | "LDD" => Some(Self::Ldd),
            "lddr" | "LDDR" => Some(Self::Lddr),
            "ldi" | "LDI" => Some(Self::Ldi),
            "ldir" | "LDIR" => Some(Self::Ldir),
            "neg" | "NEG" => Some(Self::Neg),
            "nop" | "NOP" => Some(Self::Nop),
            "or" | "OR" => Some(Self::Or),
            "otdr" | "OTDR" => Some(Self::Otdr),
            "otir" | "OTIR" => Some(Self::Otir),
            "out" | "OUT" => Some(Self::Out),
            "outd" | "OUTD" => Some(Self::Outd),
            "outi" | "OUTI" => Some(Self::Outi),
            "pop" | "POP" => Some(Self::Pop),
            "push" | "PUSH" => Some(Self::Push),
            "res" | "RES" => Some(Self::Res),
            "ret" | "RET" => Some(Self::Ret),
            "reti" | "RETI" => Some(Self::Reti),
            "retn" | "RETN" => Some(Self::Retn),
            "rl" | "RL" => Some(Self::Rl),
            "rla" | "RLA" => Some(Self::Rla),
            "rlc" | "RLC" => Some(Self::Rlc),
            "rlca" | "RLCA" => Some(Self::Rlca),
            "rld" | "RLD" => Some(Self::Rld),
            "rr" | "RR" => Some(Self::Rr),
            "rra" | "RRA" => Some(Self::Rra),
            "rrc" | "RRC" => Some(Self::Rrc),
            "rrca" | "RRCA" => Some(Self::Rrca),
            "rrd" | "RRD" => Some(Self::Rrd),
            "rst" | "RST" => Some(Self::Rst),
            "sbc" | "SBC" => Some(Self::Sbc),
            "scf" | "SCF" => Some(Self::Scf),
            "set" | "SET" => Some(Self::Set),
            "sla" | "SLA" => Some(Self::Sla),
            "sll" | "SLL" => Some(Self::Sll),
            "sra" | "SRA" => Some(Self::Sra),
            "srl" | "SRL" => Some(Self::Srl),
            "sub" | "SUB" => Some(Self::Sub),
            "xor" | "XOR" => Some(Self::Xor),
            _ => None,
        }
    }
}

impl Display for OperationName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Adc => "adc",
                Self::Add => "add",
                Self::And => "and",
                Self::Bit => "bit",
                Self::Call => "call",
                Self::Ccf => "ccf",
                Self::Cp => "cp",
                Self::Cpd => "cpd",
                Self::Cpdr => "cpdr",
                Self::Cpi => "cpi",
                Self::Cpir => "cpir",
                Self::Cpl => "cpl",
                Self::Daa => "daa",
                Self::Dec => "dec",
                Self::Di => "di",
                Self::Djnz => "djnz",
                Self::Ei => "ei",
                Self::Ex => "ex",
                Self::Exx => "exx",
                Self::Halt => "halt",
                Self::Im => "im",
                Self::In => "in",
                Self::Inc => "inc",
                Self::Ind => "ind",
                Self::Indr => "indr",
                Self::Ini => "ini",
                Self::Inir => "inir",
                Self::Jp => "jp",
                Self::Jr => "jr",
                Self::Ld => "ld",
                Self::Ldd => "ldd",
                Self::Lddr => "lddr",
                Self::Ldi => "ldi",
                Self::Ldir => "ldir",
                Self::Neg => "neg",
                Self::Nop => "nop",
                Self::Or => "or",
                Self::Otdr => "otdr",
                Self::Otir => "otir",
                Self::Out => "out",
                Self::Outd => "outd",
                Self::Outi => "outi",
                Self::Pop => "pop",
                Self::Push => "push",
                Self::Res => "res",
                Self::Ret => "ret",
                Self::Reti => "reti",
                Self::Retn => "retn",
                Self::Rl => "rl",
                Self::Rla => "rla",
                Self::Rlc => "rlc",
                Self::Rlca => "rlca",
                Self::Rld => "rld",
                Self::Rr => "rr",
                Self::Rra => "rra",
                Self::Rrc => "rrc",
                Self::Rrca => "rrca",
                Self::Rrd => "rrd",
                Self::Rst => "rst",
                Self::Sbc => "sbc",
                Self::Scf => "scf",
                Self::Set => "set",
                Self::Sla => "sla",
                Self::Sll => "sll",
                Self::Sra => "sra",
                Self::Srl => "srl",
                Self::Sub => "sub",
                Self::Xor => "xor",
            }
        )
    }
}

/// One of the seven prefix-byte sequences the Z80 decodes opcodes under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlanePrefix {
    Unprefixed,
    Ed,
    Cb,
    Dd,
    Fd,
    DdCb,
    FdCb,
}

impl PlanePrefix {
    pub const ALL: [PlanePrefix; 7] = [
        Self::Unprefixed,
        Self::Ed,
        Self::Cb,
        Self::Dd,
        Self::Fd,
        Self::DdCb,
        Self::FdCb,
    ];

    pub fn parse<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "unprefixed" | "UNPREFIXED" => Some(Self::Unprefixed),
            "ed" | "ED" => Some(Self::Ed),
            "cb" | "CB" => Some(Self::Cb),
            "dd" | "DD" => Some(Self::Dd),
            "fd" | "FD" => Some(Self::Fd),
            "ddcb" | "DDCB" => Some(Self::DdCb),
            "fdcb" | "FDCB" => Some(Self::FdCb),
            _ => None,
        }
    }

    #[inline]
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Self::Unprefixed => &[],
            Self::Ed => &[0xED],
            Self::Cb => &[0xCB],
            Self::Dd => &[0xDD],
            Self::Fd => &[0xFD],
            Self::DdCb => &[0xDD, 0xCB],
            Self::FdCb => &[0xFD, 0xCB],
        }
    }

    // In the dd cb and fd cb planes the CPU reads the displacement byte
    // between the prefix and the final opcode byte.
    #[inline]
    pub(crate) fn displacement_before_opcode(self) -> bool {
        matches!(self, Self::DdCb | Self::FdCb)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Display for PlanePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Unprefixed => "unprefixed",
                Self::Ed => "ed",
                Self::Cb => "cb",
                Self::Dd => "dd",
                Self::Fd => "fd",
                Self::DdCb => "ddcb",
                Self::FdCb => "fdcb",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotKind {
    Imm8,
    Imm16,
    Disp,
}

impl SlotKind {
    /// Inclusive bounds a caller-supplied value must sit in. Byte slots
    /// accept both signed and unsigned interpretations; displacements are
    /// strictly signed.
    #[inline]
    pub fn range(self) -> (i32, i32) {
        match self {
            Self::Imm8 => (-128, 255),
            Self::Imm16 => (-32768, 65535),
            Self::Disp => (-128, 127),
        }
    }
}

/// A placeholder in an encoding recipe: which operand it reads and how the
/// value is emitted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Slot {
    pub kind: SlotKind,
    pub operand: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EncodingRecipe {
    pub prefix: PlanePrefix,
    pub opcode: u8,
    pub slots: Vec<Slot>,
}

impl EncodingRecipe {
    /// Derives the placeholder slots from the operand pattern list. Slots
    /// come out in operand order, which is also emission order on every
    /// plane (the dd cb / fd cb displacement placement is a property of
    /// the plane, handled at emission).
    pub(crate) fn derive(prefix: PlanePrefix, opcode: u8, operands: &[OperandPattern]) -> Self {
        let slots = operands
            .iter()
            .enumerate()
            .filter_map(|(operand, pattern)| {
                let kind = match pattern {
                    OperandPattern::Imm8 | OperandPattern::PortImm8 => SlotKind::Imm8,
                    OperandPattern::Imm16 | OperandPattern::IndirectImm16 => SlotKind::Imm16,
                    OperandPattern::Indexed(_) => SlotKind::Disp,
                    _ => return None,
                };
                Some(Slot { kind, operand })
            })
            .collect();
        Self {
            prefix,
            opcode,
            slots,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EntryStatus {
    Canonical,
    UndocumentedCanonical,
    /// A byte pattern the CPU also recognizes but that the registry
    /// deliberately leaves unmapped; never encodable, never claims a
    /// plane slot.
    NonCanonicalDuplicate,
}

impl EntryStatus {
    #[inline]
    pub fn is_encodable(self) -> bool {
        !matches!(self, Self::NonCanonicalDuplicate)
    }
}

#[derive(Debug, Clone)]
pub struct InstructionEntry {
    pub operation: OperationName,
    pub operands: Vec<OperandPattern>,
    pub recipe: EncodingRecipe,
    pub status: EntryStatus,
}

impl Display for InstructionEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {operand}")?;
            } else {
                write!(f, ", {operand}")?;
            }
        }
        Ok(())
    }
}

/// The full instruction table, built once and immutable afterwards.
pub struct Registry {
    entries: Vec<InstructionEntry>,
    forms: FxHashMap<(OperationName, Vec<OperandPattern>), usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_entries(table::entries())
    }

    pub(crate) fn with_entries(entries: Vec<InstructionEntry>) -> Self {
        let mut forms = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            if entry.status.is_encodable() {
                let previous = forms.insert((entry.operation, entry.operands.clone()), i);
                debug_assert!(previous.is_none(), "form registered twice: {entry}");
            }
        }
        Self { entries, forms }
    }

    /// Resolves a (operation, operand-pattern) form to its entry. Only
    /// canonical and undocumented-canonical forms resolve; duplicate
    /// encodings are unreachable here by construction.
    pub fn lookup(
        &self,
        operation: OperationName,
        operands: &[OperandPattern],
    ) -> Option<&InstructionEntry> {
        self.forms
            .get(&(operation, operands.to_vec()))
            .map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn entries(&self) -> &[InstructionEntry] {
        &self.entries
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
