use crate::battle::state::{PerSide, SideId};
use schema::{BattleFormat, Terrain, Weather};
use serde::{Deserialize, Serialize};

pub const MAX_SPIKES: u8 = 3;
pub const MAX_TOXIC_SPIKES: u8 = 2;
pub const SCREEN_TURNS: u8 = 5;
pub const LIGHT_CLAY_BONUS: u8 = 3;
pub const TAILWIND_TURNS: u8 = 4;
pub const FIELD_EFFECT_TURNS: u8 = 5;
pub const GMAX_RESIDUAL_TURNS: u8 = 4;

/// A field condition with a remaining-turn counter. Zero turns means it lasts indefinitely.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<T> {
    pub kind: T,
    pub turns_remaining: u8,
}

impl<T> Timed<T> {
    pub fn new(kind: T, turns_remaining: u8) -> Self {
        Self {
            kind,
            turns_remaining,
        }
    }

    pub fn indefinite(kind: T) -> Self {
        Self::new(kind, 0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hazard {
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
    Steelsurge,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideCondition {
    Reflect,
    LightScreen,
    AuroraVeil,
    Tailwind,
}

/// Field-wide timed effects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEffect {
    Gravity,
    TrickRoom,
    MagicRoom,
    WonderRoom,
}

/// The four G-Max residual-damage timers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GMaxResidual {
    VineLash,
    Wildfire,
    Cannonade,
    Volcalith,
}

/// Hazards and timed conditions on one side of the field.
/// Turn counters of zero mean the condition is not active.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SideField {
    pub spikes: u8,
    pub toxic_spikes: u8,
    pub stealth_rock: bool,
    pub sticky_web: bool,
    pub steelsurge: bool,
    pub reflect: u8,
    pub light_screen: u8,
    pub aurora_veil: u8,
    pub tailwind: u8,
    pub vine_lash: u8,
    pub wildfire: u8,
    pub cannonade: u8,
    pub volcalith: u8,
}

impl SideField {
    pub fn has_hazards(&self) -> bool {
        self.spikes > 0
            || self.toxic_spikes > 0
            || self.stealth_rock
            || self.sticky_web
            || self.steelsurge
    }

    pub fn clear_hazards(&mut self) {
        self.spikes = 0;
        self.toxic_spikes = 0;
        self.stealth_rock = false;
        self.sticky_web = false;
        self.steelsurge = false;
    }

    /// Adds one layer of a hazard. Returns false when already at the cap.
    pub fn add_hazard(&mut self, hazard: Hazard) -> bool {
        match hazard {
            Hazard::Spikes if self.spikes < MAX_SPIKES => self.spikes += 1,
            Hazard::ToxicSpikes if self.toxic_spikes < MAX_TOXIC_SPIKES => self.toxic_spikes += 1,
            Hazard::StealthRock if !self.stealth_rock => self.stealth_rock = true,
            Hazard::StickyWeb if !self.sticky_web => self.sticky_web = true,
            Hazard::Steelsurge if !self.steelsurge => self.steelsurge = true,
            _ => return false,
        }
        true
    }

    pub fn condition_turns(&self, condition: SideCondition) -> u8 {
        match condition {
            SideCondition::Reflect => self.reflect,
            SideCondition::LightScreen => self.light_screen,
            SideCondition::AuroraVeil => self.aurora_veil,
            SideCondition::Tailwind => self.tailwind,
        }
    }

    pub fn condition_turns_mut(&mut self, condition: SideCondition) -> &mut u8 {
        match condition {
            SideCondition::Reflect => &mut self.reflect,
            SideCondition::LightScreen => &mut self.light_screen,
            SideCondition::AuroraVeil => &mut self.aurora_veil,
            SideCondition::Tailwind => &mut self.tailwind,
        }
    }

    pub fn gmax_timer(&self, residual: GMaxResidual) -> u8 {
        match residual {
            GMaxResidual::VineLash => self.vine_lash,
            GMaxResidual::Wildfire => self.wildfire,
            GMaxResidual::Cannonade => self.cannonade,
            GMaxResidual::Volcalith => self.volcalith,
        }
    }

    pub fn gmax_timer_mut(&mut self, residual: GMaxResidual) -> &mut u8 {
        match residual {
            GMaxResidual::VineLash => &mut self.vine_lash,
            GMaxResidual::Wildfire => &mut self.wildfire,
            GMaxResidual::Cannonade => &mut self.cannonade,
            GMaxResidual::Volcalith => &mut self.volcalith,
        }
    }
}

/// Aura and ruin abilities in play. Recorded on the field; damage does not read them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuraFlags {
    pub fairy_aura: bool,
    pub dark_aura: bool,
    pub aura_break: bool,
    pub tablets_of_ruin: bool,
    pub sword_of_ruin: bool,
    pub vessel_of_ruin: bool,
    pub beads_of_ruin: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub format: BattleFormat,
    pub weather: Option<Timed<Weather>>,
    pub terrain: Option<Timed<Terrain>>,
    pub sides: PerSide<SideField>,
    pub gravity: u8,
    pub trick_room: u8,
    pub magic_room: u8,
    pub wonder_room: u8,
    pub auras: AuraFlags,
}

impl Field {
    pub fn new(format: BattleFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn weather(&self) -> Option<Weather> {
        self.weather.map(|w| w.kind)
    }

    pub fn terrain(&self) -> Option<Terrain> {
        self.terrain.map(|t| t.kind)
    }

    pub fn is_weather(&self, weather: Weather) -> bool {
        self.weather() == Some(weather)
    }

    pub fn is_terrain(&self, terrain: Terrain) -> bool {
        self.terrain() == Some(terrain)
    }

    pub fn effect_turns_mut(&mut self, effect: FieldEffect) -> &mut u8 {
        match effect {
            FieldEffect::Gravity => &mut self.gravity,
            FieldEffect::TrickRoom => &mut self.trick_room,
            FieldEffect::MagicRoom => &mut self.magic_room,
            FieldEffect::WonderRoom => &mut self.wonder_room,
        }
    }

    pub fn side(&self, side: SideId) -> &SideField {
        &self.sides[side]
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut SideField {
        &mut self.sides[side]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_layers_cap_and_stay_put() {
        let mut side = SideField::default();
        for _ in 0..MAX_SPIKES {
            assert!(side.add_hazard(Hazard::Spikes));
        }
        assert!(!side.add_hazard(Hazard::Spikes));
        assert_eq!(side.spikes, 3);

        assert!(side.add_hazard(Hazard::ToxicSpikes));
        assert!(side.add_hazard(Hazard::ToxicSpikes));
        assert!(!side.add_hazard(Hazard::ToxicSpikes));
        assert_eq!(side.toxic_spikes, 2);

        assert!(side.add_hazard(Hazard::StealthRock));
        assert!(!side.add_hazard(Hazard::StealthRock));
    }

    #[test]
    fn sides_are_independent() {
        let mut field = Field::new(BattleFormat::Single);
        field.side_mut(SideId::Player).reflect = 5;
        assert_eq!(field.side(SideId::Opponent).reflect, 0);
        assert_eq!(field.sides[SideId::Player].reflect, 5);
    }
}
