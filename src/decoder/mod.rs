use crate::{
    plane::{CollisionError, PlaneIndex},
    registry::{PlanePrefix, Registry},
};

#[cfg(test)]
mod tests;

/// Reconstructs one plane of the registry as 256 rendered mnemonic
/// strings, the view the reference-table tests compare against. Unmapped
/// bytes (including every non-canonical duplicate) render empty. The
/// projection is validated first; a colliding table is an error here, not
/// an arbitrary pick among the claimants.
pub fn decode_plane(registry: &Registry, prefix: PlanePrefix) -> Result<Vec<String>, CollisionError> {
    let index = PlaneIndex::build(registry)?;
    Ok((0..=255u8)
        .map(|opcode| {
            index
                .byte_at(registry, prefix, opcode)
                .map(|entry| entry.to_string())
                .unwrap_or_default()
        })
        .collect())
}
