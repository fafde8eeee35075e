//! The narrow "apply effect to player resources" interface.

use super::types::{PermanentTool, PlayerResources, Resource};
use crate::error::ManorError;
use serde::{Deserialize, Serialize};

/// A single change to player resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceEffect {
    /// Add to a counter.
    Gain(Resource, u32),
    /// Pay from a counter. Rejected when the counter is too small.
    Spend(Resource, u32),
    /// Forced loss from a counter, stopping at zero.
    Lose(Resource, u32),
    /// Add a permanent tool. The player must not own it yet.
    GrantTool(PermanentTool),
}

impl ResourceEffect {
    /// Player-facing description of the effect.
    pub fn describe(&self) -> String {
        match self {
            ResourceEffect::Gain(resource, amount) => {
                format!("You gain {} {}.", amount, resource.name())
            }
            ResourceEffect::Spend(resource, amount) => {
                format!("You spend {} {}.", amount, resource.name())
            }
            ResourceEffect::Lose(resource, amount) => {
                format!("You lose {} {}.", amount, resource.name())
            }
            ResourceEffect::GrantTool(tool) => format!("You pick up the {}.", tool.name()),
        }
    }
}

impl PlayerResources {
    /// Applies one effect. Failure leaves the player untouched.
    pub fn apply(&mut self, effect: ResourceEffect) -> Result<(), ManorError> {
        match effect {
            ResourceEffect::Gain(resource, amount) => {
                let counter = self.counter_mut(resource);
                *counter = counter.saturating_add(amount);
            }
            ResourceEffect::Spend(resource, amount) => {
                let available = self.amount(resource);
                if available < amount {
                    return Err(ManorError::InsufficientResource {
                        resource,
                        needed: amount,
                        available,
                    });
                }
                *self.counter_mut(resource) -= amount;
            }
            ResourceEffect::Lose(resource, amount) => {
                let counter = self.counter_mut(resource);
                *counter = counter.saturating_sub(amount);
            }
            ResourceEffect::GrantTool(tool) => {
                let inserted = self.tools.insert(tool);
                assert!(inserted, "player already owns {:?}", tool);
            }
        }
        tracing::trace!(?effect, "applied resource effect");
        Ok(())
    }

    /// Applies effects in order, all or nothing.
    pub fn apply_all(&mut self, effects: &[ResourceEffect]) -> Result<(), ManorError> {
        let mut scratch = self.clone();
        for effect in effects {
            scratch.apply(*effect)?;
        }
        *self = scratch;
        Ok(())
    }

    /// Pays one key. Returns false (and changes nothing) without one.
    pub fn spend_key(&mut self) -> bool {
        self.apply(ResourceEffect::Spend(Resource::Keys, 1)).is_ok()
    }

    /// Pays `cost` gems up front, as when drafting a room.
    pub fn spend_gems(&mut self, cost: u32) -> Result<(), ManorError> {
        self.apply(ResourceEffect::Spend(Resource::Gems, cost))
            .map_err(|_| ManorError::InsufficientGems {
                cost,
                available: self.gems,
            })
    }

    /// Uses up one step for a room-to-room move.
    pub fn spend_step(&mut self) -> Result<(), ManorError> {
        self.apply(ResourceEffect::Spend(Resource::Steps, 1))
    }
}
