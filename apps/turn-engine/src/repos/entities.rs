//! Generic create/get/update/delete over every top-level record kind.
//!
//! Callers holding only a collection tag (`"players"`, `"game_groups"`, ...)
//! parse it into an `EntityKind`; unknown tags fail with `InvalidArgument`
//! before the store is touched.

use serde_json::{Map, Value};

use crate::adapters::tree::codec;
use crate::adapters::tree::{StorePath, TreeStore};
use crate::domain::ensure_key;
use crate::entities::{Ability, Character, Entity, EntityKind, Game, Group, Player, Step};
use crate::errors::domain::DomainError;

/// `{collection}/{bin}`; a bin that is not a single key never reaches the store.
fn record_path(kind: EntityKind, bin: &str) -> Result<StorePath, DomainError> {
    ensure_key(kind.collection(), bin)?;
    Ok(StorePath::root(kind.collection()).child(bin))
}

/// Write the whole record at `{collection}/{bin}`, replacing any existing one.
pub async fn create(store: &dyn TreeStore, entity: &Entity) -> Result<(), DomainError> {
    let at = record_path(entity.kind(), entity.bin())?;
    match entity {
        Entity::Player(p) => codec::set_typed(store, &at, p).await?,
        Entity::Game(g) => codec::set_typed(store, &at, g).await?,
        Entity::Step(s) => codec::set_typed(store, &at, s).await?,
        Entity::Character(c) => codec::set_typed(store, &at, c).await?,
        Entity::Ability(a) => codec::set_typed(store, &at, a).await?,
        Entity::Group(g) => codec::set_typed(store, &at, g).await?,
    }
    Ok(())
}

pub async fn get(store: &dyn TreeStore, kind: EntityKind, bin: &str) -> Result<Option<Entity>, DomainError> {
    let at = record_path(kind, bin)?;
    let Some(value) = store.get(&at).await? else {
        return Ok(None);
    };
    decode_entity(kind, &at, value).map(Some)
}

/// `get` addressed by collection tag.
pub async fn get_by_tag(store: &dyn TreeStore, tag: &str, bin: &str) -> Result<Option<Entity>, DomainError> {
    let kind: EntityKind = tag.parse()?;
    get(store, kind, bin).await
}

/// Every record of `kind`, ordered by key.
pub async fn list(store: &dyn TreeStore, kind: EntityKind) -> Result<Vec<Entity>, DomainError> {
    let at = StorePath::root(kind.collection());
    let entities = match kind {
        EntityKind::Player => wrap(codec::get_children::<Player>(store, &at).await?, Entity::Player),
        EntityKind::Game => wrap(codec::get_children::<Game>(store, &at).await?, Entity::Game),
        EntityKind::Step => wrap(codec::get_children::<Step>(store, &at).await?, Entity::Step),
        EntityKind::Character => {
            wrap(codec::get_children::<Character>(store, &at).await?, Entity::Character)
        }
        EntityKind::Ability => wrap(codec::get_children::<Ability>(store, &at).await?, Entity::Ability),
        EntityKind::Group => wrap(codec::get_children::<Group>(store, &at).await?, Entity::Group),
    };
    Ok(entities)
}

/// Merge `fields` into the record at `{collection}/{bin}`.
pub async fn update(
    store: &dyn TreeStore,
    kind: EntityKind,
    bin: &str,
    fields: Map<String, Value>,
) -> Result<(), DomainError> {
    store.update(&record_path(kind, bin)?, fields).await?;
    Ok(())
}

/// `update` addressed by collection tag.
pub async fn update_by_tag(
    store: &dyn TreeStore,
    tag: &str,
    bin: &str,
    fields: Map<String, Value>,
) -> Result<(), DomainError> {
    let kind: EntityKind = tag.parse()?;
    update(store, kind, bin, fields).await
}

pub async fn delete(store: &dyn TreeStore, kind: EntityKind, bin: &str) -> Result<(), DomainError> {
    store.delete(&record_path(kind, bin)?).await?;
    Ok(())
}

/// `delete` addressed by collection tag.
pub async fn delete_by_tag(store: &dyn TreeStore, tag: &str, bin: &str) -> Result<(), DomainError> {
    let kind: EntityKind = tag.parse()?;
    delete(store, kind, bin).await
}

fn wrap<T>(records: Vec<T>, variant: fn(T) -> Entity) -> Vec<Entity> {
    records.into_iter().map(variant).collect()
}

fn decode_entity(kind: EntityKind, at: &StorePath, value: Value) -> Result<Entity, DomainError> {
    let entity = match kind {
        EntityKind::Player => Entity::Player(codec::decode(at, value)?),
        EntityKind::Game => Entity::Game(codec::decode(at, value)?),
        EntityKind::Step => Entity::Step(codec::decode(at, value)?),
        EntityKind::Character => Entity::Character(codec::decode(at, value)?),
        EntityKind::Ability => Entity::Ability(codec::decode(at, value)?),
        EntityKind::Group => Entity::Group(codec::decode(at, value)?),
    };
    Ok(entity)
}
