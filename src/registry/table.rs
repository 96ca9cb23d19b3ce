//! The opcode data for all seven planes, transcribed from the standard
//! Z80 opcode matrices. Rows and columns follow the CPU's own layout:
//! 8-bit register columns run b, c, d, e, h, l, (hl), a and wide-register
//! columns run bc, de, hl, sp, so most of the table falls out of short
//! loops over those sequences.

use crate::operand::{
    ConditionCode, IndexRegister,
    OperandPattern::{self, IndirectImm16, PortC, PortImm8},
    RegisterName::{self, *},
};

use super::{
    EncodingRecipe, EntryStatus, InstructionEntry,
    OperationName::{self, *},
    PlanePrefix,
};

const IMM8: OperandPattern = OperandPattern::Imm8;
const IMM16: OperandPattern = OperandPattern::Imm16;

#[inline]
fn r8(name: RegisterName) -> OperandPattern {
    OperandPattern::Reg8(name)
}

#[inline]
fn r16(name: RegisterName) -> OperandPattern {
    OperandPattern::Reg16(name)
}

#[inline]
fn ind(name: RegisterName) -> OperandPattern {
    OperandPattern::IndirectReg(name)
}

#[inline]
fn idx(base: IndexRegister) -> OperandPattern {
    OperandPattern::Indexed(base)
}

#[inline]
fn cond(code: ConditionCode) -> OperandPattern {
    OperandPattern::Condition(code)
}

#[inline]
fn bit(index: u8) -> OperandPattern {
    OperandPattern::Bit(index)
}

#[inline]
fn mode(mode: u8) -> OperandPattern {
    OperandPattern::InterruptMode(mode)
}

// Column order of the 8-bit register field in every opcode row.
const R8_ROW: [OperandPattern; 8] = [
    OperandPattern::Reg8(B),
    OperandPattern::Reg8(C),
    OperandPattern::Reg8(D),
    OperandPattern::Reg8(E),
    OperandPattern::Reg8(H),
    OperandPattern::Reg8(L),
    OperandPattern::IndirectReg(HL),
    OperandPattern::Reg8(A),
];

const WIDE_ROW: [RegisterName; 4] = [BC, DE, HL, SP];

const CC_ROW: [ConditionCode; 8] = [
    ConditionCode::NotZero,
    ConditionCode::Zero,
    ConditionCode::NotCarry,
    ConditionCode::Carry,
    ConditionCode::ParityOdd,
    ConditionCode::ParityEven,
    ConditionCode::Positive,
    ConditionCode::Negative,
];

// The eight accumulator operations in row order, with base opcode and
// whether the assembly form spells out the accumulator.
const ALU_OPS: [(OperationName, bool, u8); 8] = [
    (Add, true, 0x80),
    (Adc, true, 0x88),
    (Sub, false, 0x90),
    (Sbc, true, 0x98),
    (And, false, 0xA0),
    (Xor, false, 0xA8),
    (Or, false, 0xB0),
    (Cp, false, 0xB8),
];

pub(crate) fn entries() -> Vec<InstructionEntry> {
    let mut table = Tables {
        entries: Vec::with_capacity(1700),
    };
    table.unprefixed();
    table.extended();
    table.bit_ops();
    table.indexed(PlanePrefix::Dd, IX, IXH, IXL, IndexRegister::Ix);
    table.indexed(PlanePrefix::Fd, IY, IYH, IYL, IndexRegister::Iy);
    table.indexed_bit(PlanePrefix::DdCb, IndexRegister::Ix);
    table.indexed_bit(PlanePrefix::FdCb, IndexRegister::Iy);
    table.entries
}

struct Tables {
    entries: Vec<InstructionEntry>,
}

impl Tables {
    fn push(
        &mut self,
        status: EntryStatus,
        operation: OperationName,
        operands: &[OperandPattern],
        prefix: PlanePrefix,
        opcode: u8,
    ) {
        let recipe = EncodingRecipe::derive(prefix, opcode, operands);
        self.entries.push(InstructionEntry {
            operation,
            operands: operands.to_vec(),
            recipe,
            status,
        });
    }

    fn doc(
        &mut self,
        operation: OperationName,
        operands: &[OperandPattern],
        prefix: PlanePrefix,
        opcode: u8,
    ) {
        self.push(EntryStatus::Canonical, operation, operands, prefix, opcode);
    }

    fn undoc(
        &mut self,
        operation: OperationName,
        operands: &[OperandPattern],
        prefix: PlanePrefix,
        opcode: u8,
    ) {
        self.push(
            EntryStatus::UndocumentedCanonical,
            operation,
            operands,
            prefix,
            opcode,
        );
    }

    fn dup(
        &mut self,
        operation: OperationName,
        operands: &[OperandPattern],
        prefix: PlanePrefix,
        opcode: u8,
    ) {
        self.push(
            EntryStatus::NonCanonicalDuplicate,
            operation,
            operands,
            prefix,
            opcode,
        );
    }

    fn alu(
        &mut self,
        status: EntryStatus,
        operation: OperationName,
        accumulator: bool,
        operand: OperandPattern,
        prefix: PlanePrefix,
        opcode: u8,
    ) {
        if accumulator {
            self.push(status, operation, &[r8(A), operand], prefix, opcode);
        } else {
            self.push(status, operation, &[operand], prefix, opcode);
        }
    }

    fn unprefixed(&mut self) {
        let p = PlanePrefix::Unprefixed;

        self.doc(Nop, &[], p, 0x00);
        self.doc(Ld, &[ind(BC), r8(A)], p, 0x02);
        self.doc(Rlca, &[], p, 0x07);
        self.doc(Ex, &[r16(AF), r16(AFPrime)], p, 0x08);
        self.doc(Ld, &[r8(A), ind(BC)], p, 0x0A);
        self.doc(Rrca, &[], p, 0x0F);
        self.doc(Djnz, &[IMM8], p, 0x10);
        self.doc(Ld, &[ind(DE), r8(A)], p, 0x12);
        self.doc(Rla, &[], p, 0x17);
        self.doc(Jr, &[IMM8], p, 0x18);
        self.doc(Ld, &[r8(A), ind(DE)], p, 0x1A);
        self.doc(Rra, &[], p, 0x1F);
        self.doc(Ld, &[IndirectImm16, r16(HL)], p, 0x22);
        self.doc(Daa, &[], p, 0x27);
        self.doc(Ld, &[r16(HL), IndirectImm16], p, 0x2A);
        self.doc(Cpl, &[], p, 0x2F);
        self.doc(Ld, &[IndirectImm16, r8(A)], p, 0x32);
        self.doc(Scf, &[], p, 0x37);
        self.doc(Ld, &[r8(A), IndirectImm16], p, 0x3A);
        self.doc(Ccf, &[], p, 0x3F);

        for (i, wide) in WIDE_ROW.iter().enumerate() {
            let column = (i as u8) * 0x10;
            self.doc(Ld, &[r16(*wide), IMM16], p, 0x01 + column);
            self.doc(Inc, &[r16(*wide)], p, 0x03 + column);
            self.doc(Add, &[r16(HL), r16(*wide)], p, 0x09 + column);
            self.doc(Dec, &[r16(*wide)], p, 0x0B + column);
        }

        for (i, operand) in R8_ROW.iter().enumerate() {
            let row = (i as u8) * 8;
            self.doc(Inc, &[*operand], p, 0x04 + row);
            self.doc(Dec, &[*operand], p, 0x05 + row);
            self.doc(Ld, &[*operand, IMM8], p, 0x06 + row);
        }

        // only the first four conditions have relative-jump forms
        for (i, code) in CC_ROW.iter().take(4).enumerate() {
            self.doc(Jr, &[cond(*code), IMM8], p, 0x20 + (i as u8) * 8);
        }

        for (d, dst) in R8_ROW.iter().enumerate() {
            for (s, src) in R8_ROW.iter().enumerate() {
                if d == 6 && s == 6 {
                    // 0x76 would be ld (hl), (hl)
                    continue;
                }
                self.doc(Ld, &[*dst, *src], p, 0x40 + (d * 8 + s) as u8);
            }
        }
        self.doc(Halt, &[], p, 0x76);

        for (operation, accumulator, base) in ALU_OPS {
            for (i, operand) in R8_ROW.iter().enumerate() {
                self.alu(
                    EntryStatus::Canonical,
                    operation,
                    accumulator,
                    *operand,
                    p,
                    base + i as u8,
                );
            }
            self.alu(EntryStatus::Canonical, operation, accumulator, IMM8, p, base + 0x46);
        }

        for (i, code) in CC_ROW.iter().enumerate() {
            let row = (i as u8) * 8;
            self.doc(Ret, &[cond(*code)], p, 0xC0 + row);
            self.doc(Jp, &[cond(*code), IMM16], p, 0xC2 + row);
            self.doc(Call, &[cond(*code), IMM16], p, 0xC4 + row);
            self.doc(Rst, &[OperandPattern::Rst(row)], p, 0xC7 + row);
        }

        for (i, wide) in [BC, DE, HL, AF].iter().enumerate() {
            let column = (i as u8) * 0x10;
            self.doc(Pop, &[r16(*wide)], p, 0xC1 + column);
            self.doc(Push, &[r16(*wide)], p, 0xC5 + column);
        }

        self.doc(Jp, &[IMM16], p, 0xC3);
        self.doc(Ret, &[], p, 0xC9);
        self.doc(Call, &[IMM16], p, 0xCD);
        self.doc(Out, &[PortImm8, r8(A)], p, 0xD3);
        self.doc(Exx, &[], p, 0xD9);
        self.doc(In, &[r8(A), PortImm8], p, 0xDB);
        self.doc(Ex, &[ind(SP), r16(HL)], p, 0xE3);
        self.doc(Jp, &[ind(HL)], p, 0xE9);
        self.doc(Ex, &[r16(DE), r16(HL)], p, 0xEB);
        self.doc(Di, &[], p, 0xF3);
        self.doc(Ld, &[r16(SP), r16(HL)], p, 0xF9);
        self.doc(Ei, &[], p, 0xFB);
    }

    fn extended(&mut self) {
        let p = PlanePrefix::Ed;

        for (i, operand) in R8_ROW.iter().enumerate() {
            if i == 6 {
                // the (hl) column is the undocumented in (c) / out (c), 0
                continue;
            }
            let row = (i as u8) * 8;
            self.doc(In, &[*operand, PortC], p, 0x40 + row);
            self.doc(Out, &[PortC, *operand], p, 0x41 + row);
        }
        self.undoc(In, &[PortC], p, 0x70);
        self.undoc(Out, &[PortC, OperandPattern::Zero], p, 0x71);

        for (i, wide) in WIDE_ROW.iter().enumerate() {
            let column = (i as u8) * 0x10;
            self.doc(Sbc, &[r16(HL), r16(*wide)], p, 0x42 + column);
            self.doc(Adc, &[r16(HL), r16(*wide)], p, 0x4A + column);
        }

        self.doc(Ld, &[IndirectImm16, r16(BC)], p, 0x43);
        self.doc(Ld, &[r16(BC), IndirectImm16], p, 0x4B);
        self.doc(Ld, &[IndirectImm16, r16(DE)], p, 0x53);
        self.doc(Ld, &[r16(DE), IndirectImm16], p, 0x5B);
        // the hl column duplicates the unprefixed 0x22/0x2a forms
        self.dup(Ld, &[IndirectImm16, r16(HL)], p, 0x63);
        self.dup(Ld, &[r16(HL), IndirectImm16], p, 0x6B);
        self.doc(Ld, &[IndirectImm16, r16(SP)], p, 0x73);
        self.doc(Ld, &[r16(SP), IndirectImm16], p, 0x7B);

        self.doc(Neg, &[], p, 0x44);
        for opcode in [0x4C, 0x54, 0x5C, 0x64, 0x6C, 0x74, 0x7C] {
            self.dup(Neg, &[], p, opcode);
        }
        self.doc(Retn, &[], p, 0x45);
        for opcode in [0x55, 0x5D, 0x65, 0x6D, 0x75, 0x7D] {
            self.dup(Retn, &[], p, opcode);
        }
        self.doc(Reti, &[], p, 0x4D);

        self.doc(Im, &[mode(0)], p, 0x46);
        self.doc(Im, &[mode(1)], p, 0x56);
        self.doc(Im, &[mode(2)], p, 0x5E);
        // 0x4e and 0x6e select the indeterminate "0/1" mode on real silicon
        self.dup(Im, &[mode(0)], p, 0x4E);
        self.dup(Im, &[mode(0)], p, 0x66);
        self.dup(Im, &[mode(0)], p, 0x6E);
        self.dup(Im, &[mode(1)], p, 0x76);
        self.dup(Im, &[mode(2)], p, 0x7E);

        self.doc(Ld, &[r8(I), r8(A)], p, 0x47);
        self.doc(Ld, &[r8(R), r8(A)], p, 0x4F);
        self.doc(Ld, &[r8(A), r8(I)], p, 0x57);
        self.doc(Ld, &[r8(A), r8(R)], p, 0x5F);
        self.doc(Rrd, &[], p, 0x67);
        self.doc(Rld, &[], p, 0x6F);

        self.doc(Ldi, &[], p, 0xA0);
        self.doc(Cpi, &[], p, 0xA1);
        self.doc(Ini, &[], p, 0xA2);
        self.doc(Outi, &[], p, 0xA3);
        self.doc(Ldd, &[], p, 0xA8);
        self.doc(Cpd, &[], p, 0xA9);
        self.doc(Ind, &[], p, 0xAA);
        self.doc(Outd, &[], p, 0xAB);
        self.doc(Ldir, &[], p, 0xB0);
        self.doc(Cpir, &[], p, 0xB1);
        self.doc(Inir, &[], p, 0xB2);
        self.doc(Otir, &[], p, 0xB3);
        self.doc(Lddr, &[], p, 0xB8);
        self.doc(Cpdr, &[], p, 0xB9);
        self.doc(Indr, &[], p, 0xBA);
        self.doc(Otdr, &[], p, 0xBB);
    }

    fn bit_ops(&mut self) {
        let p = PlanePrefix::Cb;

        for (i, operand) in R8_ROW.iter().enumerate() {
            let i = i as u8;
            self.doc(Rlc, &[*operand], p, i);
            self.doc(Rrc, &[*operand], p, 0x08 + i);
            self.doc(Rl, &[*operand], p, 0x10 + i);
            self.doc(Rr, &[*operand], p, 0x18 + i);
            self.doc(Sla, &[*operand], p, 0x20 + i);
            self.doc(Sra, &[*operand], p, 0x28 + i);
            self.undoc(Sll, &[*operand], p, 0x30 + i);
            self.doc(Srl, &[*operand], p, 0x38 + i);
            for index in 0..8u8 {
                let row = index * 8;
                self.doc(Bit, &[bit(index), *operand], p, 0x40 + row + i);
                self.doc(Res, &[bit(index), *operand], p, 0x80 + row + i);
                self.doc(Set, &[bit(index), *operand], p, 0xC0 + row + i);
            }
        }
    }

    // The dd and fd planes are identical up to which index register the
    // hl/h/l fields rename to, so both are built here.
    fn indexed(
        &mut self,
        p: PlanePrefix,
        xy: RegisterName,
        high: RegisterName,
        low: RegisterName,
        base: IndexRegister,
    ) {
        for (i, wide) in WIDE_ROW.iter().enumerate() {
            let source = if *wide == HL { xy } else { *wide };
            self.doc(Add, &[r16(xy), r16(source)], p, 0x09 + (i as u8) * 0x10);
        }

        self.doc(Ld, &[r16(xy), IMM16], p, 0x21);
        self.doc(Ld, &[IndirectImm16, r16(xy)], p, 0x22);
        self.doc(Inc, &[r16(xy)], p, 0x23);
        self.undoc(Inc, &[r8(high)], p, 0x24);
        self.undoc(Dec, &[r8(high)], p, 0x25);
        self.undoc(Ld, &[r8(high), IMM8], p, 0x26);
        self.doc(Ld, &[r16(xy), IndirectImm16], p, 0x2A);
        self.doc(Dec, &[r16(xy)], p, 0x2B);
        self.undoc(Inc, &[r8(low)], p, 0x2C);
        self.undoc(Dec, &[r8(low)], p, 0x2D);
        self.undoc(Ld, &[r8(low), IMM8], p, 0x2E);
        self.doc(Inc, &[idx(base)], p, 0x34);
        self.doc(Dec, &[idx(base)], p, 0x35);
        self.doc(Ld, &[idx(base), IMM8], p, 0x36);

        for (i, name) in [B, C, D, E].iter().enumerate() {
            let row = (i as u8) * 8;
            self.undoc(Ld, &[r8(*name), r8(high)], p, 0x44 + row);
            self.undoc(Ld, &[r8(*name), r8(low)], p, 0x45 + row);
            self.doc(Ld, &[r8(*name), idx(base)], p, 0x46 + row);
            self.undoc(Ld, &[r8(high), r8(*name)], p, 0x60 + i as u8);
            self.undoc(Ld, &[r8(low), r8(*name)], p, 0x68 + i as u8);
            self.doc(Ld, &[idx(base), r8(*name)], p, 0x70 + i as u8);
        }
        self.undoc(Ld, &[r8(high), r8(high)], p, 0x64);
        self.undoc(Ld, &[r8(high), r8(low)], p, 0x65);
        self.doc(Ld, &[r8(H), idx(base)], p, 0x66);
        self.undoc(Ld, &[r8(high), r8(A)], p, 0x67);
        self.undoc(Ld, &[r8(low), r8(high)], p, 0x6C);
        self.undoc(Ld, &[r8(low), r8(low)], p, 0x6D);
        self.doc(Ld, &[r8(L), idx(base)], p, 0x6E);
        self.undoc(Ld, &[r8(low), r8(A)], p, 0x6F);
        self.doc(Ld, &[idx(base), r8(H)], p, 0x74);
        self.doc(Ld, &[idx(base), r8(L)], p, 0x75);
        self.doc(Ld, &[idx(base), r8(A)], p, 0x77);
        self.undoc(Ld, &[r8(A), r8(high)], p, 0x7C);
        self.undoc(Ld, &[r8(A), r8(low)], p, 0x7D);
        self.doc(Ld, &[r8(A), idx(base)], p, 0x7E);

        for (operation, accumulator, base_opcode) in ALU_OPS {
            self.alu(
                EntryStatus::UndocumentedCanonical,
                operation,
                accumulator,
                r8(high),
                p,
                base_opcode + 4,
            );
            self.alu(
                EntryStatus::UndocumentedCanonical,
                operation,
                accumulator,
                r8(low),
                p,
                base_opcode + 5,
            );
            self.alu(
                EntryStatus::Canonical,
                operation,
                accumulator,
                idx(base),
                p,
                base_opcode + 6,
            );
        }

        self.doc(Pop, &[r16(xy)], p, 0xE1);
        self.doc(Ex, &[ind(SP), r16(xy)], p, 0xE3);
        self.doc(Push, &[r16(xy)], p, 0xE5);
        self.doc(Jp, &[ind(xy)], p, 0xE9);
        self.doc(Ld, &[r16(SP), r16(xy)], p, 0xF9);
    }

    fn indexed_bit(&mut self, p: PlanePrefix, base: IndexRegister) {
        // 0x36 (the sll slot) stays unmapped in the indexed-bit planes
        for (operation, opcode) in [
            (Rlc, 0x06),
            (Rrc, 0x0E),
            (Rl, 0x16),
            (Rr, 0x1E),
            (Sla, 0x26),
            (Sra, 0x2E),
            (Srl, 0x3E),
        ] {
            self.doc(operation, &[idx(base)], p, opcode);
        }
        for index in 0..8u8 {
            let row = index * 8;
            self.doc(Bit, &[bit(index), idx(base)], p, 0x46 + row);
            self.doc(Res, &[bit(index), idx(base)], p, 0x86 + row);
            self.doc(Set, &[bit(index), idx(base)], p, 0xC6 + row);
        }
    }
}
