//! Hack resolution rules.
//!
//! The defense rating is half the firewall plus half the strongest installed
//! defense, capped at 90. A hack succeeds when a roll in `1..=100` lands at or
//! below `100 - rating`. Targets that are offline or fully firewalled cannot
//! be reached at all.

use netwatch_domain::{Computer, Defense, HackType};

pub const MAX_DEFENSE_RATING: u8 = 90;
pub const SUCCESS_EXPERIENCE: u64 = 50;
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;
pub const STOLEN_MONEY_PERCENT: u8 = 10;

/// Lowest and highest roll drawn per resolution.
pub const ROLL_MIN: i32 = 1;
pub const ROLL_MAX: i32 = 100;

/// Resource damage dealt by a successful hack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Damage {
    pub storage: u32,
    pub cpu: u32,
    pub memory: u32,
}

impl Damage {
    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

pub fn defense_rating(target: &Computer, defenses: &[Defense]) -> u8 {
    let strongest = defenses
        .iter()
        .map(Defense::effectiveness)
        .max()
        .unwrap_or(0);
    (target.firewall_level() / 2 + strongest / 2).min(MAX_DEFENSE_RATING)
}

/// Percentage chance of success; zero when the target is unreachable.
pub fn success_chance(target: &Computer, defenses: &[Defense]) -> u8 {
    if !target.is_vulnerable() {
        return 0;
    }
    100 - defense_rating(target, defenses)
}

pub fn roll_succeeds(chance: u8, roll: i32) -> bool {
    (ROLL_MIN..=i32::from(chance)).contains(&roll)
}

pub fn damage_for(hack_type: HackType) -> Damage {
    match hack_type {
        HackType::StealMoney => Damage::default(),
        HackType::StealData => Damage {
            storage: 100,
            ..Damage::default()
        },
        HackType::InstallVirus => Damage {
            memory: 64,
            ..Damage::default()
        },
        HackType::Ddos => Damage {
            cpu: 25,
            ..Damage::default()
        },
    }
}
