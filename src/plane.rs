use std::fmt::{self, Display, Formatter};

use crate::registry::{EntryStatus, InstructionEntry, PlanePrefix, Registry};

/// More than one canonical entry claimed the same opcode byte. Carries
/// every claimant so the report pinpoints the broken table rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpcodeCollision {
    pub plane: PlanePrefix,
    pub opcode: u8,
    pub colliders: Vec<String>,
}

impl Display for OpcodeCollision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collision in {} plane at 0x{:02x}: {}",
            self.plane,
            self.opcode,
            self.colliders.join("; ")
        )
    }
}

/// The registry is structurally broken. This is a defect in the
/// instruction table, not a user error; callers treat it as a fatal
/// build/test failure.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("{}", render(.0))]
pub struct CollisionError(pub Vec<OpcodeCollision>);

fn render(collisions: &[OpcodeCollision]) -> String {
    collisions
        .iter()
        .map(|collision| collision.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-plane projection of the registry: each of the seven prefix planes
/// maps all 256 opcode bytes to at most one canonical entry.
pub struct PlaneIndex {
    slots: [[Option<usize>; 256]; 7],
}

impl PlaneIndex {
    pub fn build(registry: &Registry) -> Result<Self, CollisionError> {
        let (index, collisions) = Self::project(registry);
        if collisions.is_empty() {
            Ok(index)
        } else {
            Err(CollisionError(collisions))
        }
    }

    /// Runs the projection purely for its collision report.
    pub fn validate(registry: &Registry) -> Vec<OpcodeCollision> {
        Self::project(registry).1
    }

    fn project(registry: &Registry) -> (Self, Vec<OpcodeCollision>) {
        let mut claims: Vec<Vec<usize>> = vec![Vec::new(); 7 * 256];
        for (i, entry) in registry.entries().iter().enumerate() {
            match entry.status {
                EntryStatus::Canonical | EntryStatus::UndocumentedCanonical => {
                    let plane = entry.recipe.prefix.index();
                    claims[plane * 256 + entry.recipe.opcode as usize].push(i);
                }
                EntryStatus::NonCanonicalDuplicate => {}
            }
        }

        let mut slots = [[None; 256]; 7];
        let mut collisions = Vec::new();
        for (slot, claimants) in claims.iter().enumerate() {
            match claimants.as_slice() {
                [] => {}
                [single] => slots[slot / 256][slot % 256] = Some(*single),
                many => collisions.push(OpcodeCollision {
                    plane: PlanePrefix::ALL[slot / 256],
                    opcode: (slot % 256) as u8,
                    colliders: many
                        .iter()
                        .map(|&i| registry.entries()[i].to_string())
                        .collect(),
                }),
            }
        }
        (Self { slots }, collisions)
    }

    pub fn byte_at<'a>(
        &self,
        registry: &'a Registry,
        prefix: PlanePrefix,
        opcode: u8,
    ) -> Option<&'a InstructionEntry> {
        self.slots[prefix.index()][opcode as usize].map(|i| &registry.entries()[i])
    }
}
