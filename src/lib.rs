//! Instruction-encoding core for a Z80 assembler.
//!
//! Knows the byte sequence for every documented instruction form, a
//! curated set of undocumented ones, and which real-CPU duplicate byte
//! patterns are deliberately left unmapped, across the seven opcode
//! planes (unprefixed, ed, cb, dd, fd, dd cb, fd cb). Everything is built
//! once by [`InstructionSet::new`] and immutable afterwards, so a single
//! set can be shared freely across threads; encoding and decoding are
//! pure functions over it.
//!
//! Tokenizing source text, resolving symbols and expressions, and writing
//! the output image are the surrounding assembler's job: callers hand
//! this crate a mnemonic plus already-resolved operand values and append
//! the returned bytes themselves.

pub mod decoder;
pub mod encoder;
pub mod operand;
pub mod plane;
pub mod registry;

pub use encoder::EncodeError;
pub use operand::{
    ConditionCode, IndexRegister, Operand, OperandPattern, RegisterName, UnrecognizedOperand,
};
pub use plane::{CollisionError, OpcodeCollision, PlaneIndex};
pub use registry::{
    EncodingRecipe, EntryStatus, InstructionEntry, OperationName, PlanePrefix, Registry, Slot,
    SlotKind,
};

/// The registry plus its validated plane index.
pub struct InstructionSet {
    registry: Registry,
    index: PlaneIndex,
}

impl InstructionSet {
    /// Builds the full instruction table and its plane index, failing if
    /// any opcode byte ends up with more than one canonical claimant.
    pub fn new() -> Result<Self, CollisionError> {
        let registry = Registry::new();
        let index = PlaneIndex::build(&registry)?;
        Ok(Self { registry, index })
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn encode(&self, mnemonic: &str, operands: &[Operand]) -> Result<Vec<u8>, EncodeError> {
        encoder::encode(&self.registry, mnemonic, operands)
    }

    pub fn byte_at(&self, prefix: PlanePrefix, opcode: u8) -> Option<&InstructionEntry> {
        self.index.byte_at(&self.registry, prefix, opcode)
    }

    pub fn decode_plane(&self, prefix: PlanePrefix) -> Result<Vec<String>, CollisionError> {
        decoder::decode_plane(&self.registry, prefix)
    }
}
