use crate::{
    operand::{Operand, OperandPattern, UnrecognizedOperand},
    registry::{InstructionEntry, OperationName, Registry, Slot, SlotKind},
};


#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum EncodeError {
    #[error("\"{0}\" is not a z80 operation")]
    UnknownOperation(String),
    #[error(transparent)]
    UnrecognizedOperand(#[from] UnrecognizedOperand),
    #[error("no encoding of \"{operation}\" for operands {operands}")]
    NotFound { operation: String, operands: String },
    #[error("operand value {value} does not fit its slot (expected {min}..={max})")]
    OperandOutOfRange { value: i32, min: i32, max: i32 },
}

/// Encodes one instruction: classify the operands, find the matching
/// registry form, range-check the placeholder values, and emit the bytes.
/// Pure and stateless; any relative-jump displacement must already be
/// resolved by the caller.
pub fn encode(
    registry: &Registry,
    mnemonic: &str,
    operands: &[Operand],
) -> Result<Vec<u8>, EncodeError> {
    let operation = OperationName::parse(mnemonic)
        .ok_or_else(|| EncodeError::UnknownOperation(mnemonic.into()))?;

    let mut candidates = Vec::with_capacity(operands.len());
    for operand in operands {
        candidates.push(operand.classify()?);
    }

    let entry = select(registry, operation, &candidates).ok_or_else(|| EncodeError::NotFound {
        operation: operation.to_string(),
        operands: render_operands(operands),
    })?;

    let recipe = &entry.recipe;
    let mut bytes = Vec::with_capacity(4);
    bytes.extend_from_slice(recipe.prefix.bytes());
    if recipe.prefix.displacement_before_opcode() {
        for slot in &recipe.slots {
            bytes.push(slot_value(operands, slot)? as u8);
        }
        bytes.push(recipe.opcode);
    } else {
        bytes.push(recipe.opcode);
        for slot in &recipe.slots {
            let value = slot_value(operands, slot)?;
            match slot.kind {
                SlotKind::Imm8 | SlotKind::Disp => bytes.push(value as u8),
                SlotKind::Imm16 => bytes.extend_from_slice(&(value as u16).to_le_bytes()),
            }
        }
    }
    Ok(bytes)
}

// Walks the operand-candidate combinations in classification order and
// returns the first registered form.
fn select<'a>(
    registry: &'a Registry,
    operation: OperationName,
    candidates: &[Vec<OperandPattern>],
) -> Option<&'a InstructionEntry> {
    let mut patterns = Vec::with_capacity(candidates.len());
    select_inner(registry, operation, candidates, &mut patterns)
}

fn select_inner<'a>(
    registry: &'a Registry,
    operation: OperationName,
    candidates: &[Vec<OperandPattern>],
    patterns: &mut Vec<OperandPattern>,
) -> Option<&'a InstructionEntry> {
    if patterns.len() == candidates.len() {
        return registry.lookup(operation, patterns);
    }
    for &candidate in &candidates[patterns.len()] {
        patterns.push(candidate);
        if let Some(entry) = select_inner(registry, operation, candidates, patterns) {
            return Some(entry);
        }
        patterns.pop();
    }
    None
}

fn slot_value(operands: &[Operand], slot: &Slot) -> Result<i32, EncodeError> {
    let value = match operands[slot.operand].value() {
        Some(value) => value,
        // slots are derived from placeholder patterns, which only ever
        // match value-carrying operands
        None => unreachable!("placeholder slot bound to a value-less operand"),
    };
    let (min, max) = slot.kind.range();
    if value < min || value > max {
        return Err(EncodeError::OperandOutOfRange { value, min, max });
    }
    Ok(value)
}

fn render_operands(operands: &[Operand]) -> String {
    if operands.is_empty() {
        return "(none)".into();
    }
    operands
        .iter()
        .map(|operand| operand.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
