//! Tagged union over the top-level stored records, used by the generic
//! create/get/update/delete dispatch in `repos::entities`.

use std::fmt;
use std::str::FromStr;

use crate::adapters::tree::path;
use crate::errors::domain::{DomainError, ValidationKind};

use super::{Ability, Character, Game, Group, Player, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Game,
    Step,
    Character,
    Ability,
    Group,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Player,
        EntityKind::Game,
        EntityKind::Step,
        EntityKind::Character,
        EntityKind::Ability,
        EntityKind::Group,
    ];

    /// Top-level collection holding records of this kind.
    pub const fn collection(self) -> &'static str {
        match self {
            EntityKind::Player => path::PLAYERS,
            EntityKind::Game => path::GAMES,
            EntityKind::Step => path::STEPS,
            EntityKind::Character => path::CHARACTERS,
            EntityKind::Ability => path::ABILITIES,
            EntityKind::Group => path::GAME_GROUPS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.collection() == tag)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidArgument,
                    format!("invalid data type: {tag}"),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Player(Player),
    Game(Game),
    Step(Step),
    Character(Character),
    Ability(Ability),
    Group(Group),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Game(_) => EntityKind::Game,
            Entity::Step(_) => EntityKind::Step,
            Entity::Character(_) => EntityKind::Character,
            Entity::Ability(_) => EntityKind::Ability,
            Entity::Group(_) => EntityKind::Group,
        }
    }

    pub fn bin(&self) -> &str {
        match self {
            Entity::Player(p) => &p.bin,
            Entity::Game(g) => &g.bin,
            Entity::Step(s) => &s.bin,
            Entity::Character(c) => &c.bin,
            Entity::Ability(a) => &a.bin,
            Entity::Group(g) => &g.bin,
        }
    }
}
