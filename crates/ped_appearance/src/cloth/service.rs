//! Outfit codec + variation catalog queries
//!
//! # Operations
//!
//! - `apply_outfit` - Outfit → per-slot вариации на педе
//! - `capture` / `capture_ffs` - текущие вариации педа → Outfit
//! - `max_options` - сколько drawable/texture вариаций у каждого slot'а
//!
//! Hair зависит от маски: пересчитывается только как side effect
//! применения `Component::Mask`.

use crate::bridge::{EngineAdapter, PedHandle};

use super::catalog::{Component, ComponentCatalog, Prop, PropCatalog, SlotRef};
use super::hair::keeps_hair_with_mask;
use super::outfit::{MaxOptionEntry, Outfit, OutfitItem};

pub fn apply_component(engine: &mut dyn EngineAdapter, ped: PedHandle, component: Component, item: &OutfitItem) {
    engine.set_component_variation(ped, component, item.drawable, item.texture, item.palette);
}

/// Prop: `clear` снимает prop, иначе drawable/texture (palette не нужна)
pub fn apply_prop(engine: &mut dyn EngineAdapter, ped: PedHandle, prop: Prop, item: &OutfitItem) {
    if item.clear {
        engine.clear_prop(ped, prop);
    } else {
        engine.set_prop_index(ped, prop, item.drawable, item.texture);
    }
}

/// Применить outfit целиком
///
/// `hair_type` - сохранённая причёска игрока, нужна только если outfit
/// содержит маску.
pub fn apply_outfit(engine: &mut dyn EngineAdapter, ped: PedHandle, outfit: &Outfit, hair_type: i32) {
    for (component, item) in &outfit.components {
        apply_component(engine, ped, *component, item);

        if *component == Component::Mask {
            let hair = if keeps_hair_with_mask(item.drawable) { hair_type } else { 0 };
            engine.set_component_variation(ped, Component::Hair, hair, 0, 0);
        }
    }

    for (prop, item) in &outfit.props {
        apply_prop(engine, ped, *prop, item);
    }
}

/// Снять текущие вариации педа по каталогам
///
/// Palette не читается движком - всегда 0. Prop drawable может быть -1
/// (prop не надет).
pub fn capture(
    engine: &dyn EngineAdapter,
    ped: PedHandle,
    components: ComponentCatalog,
    props: PropCatalog,
) -> Outfit {
    let mut outfit = Outfit::new();

    for component in components.slots() {
        let drawable = engine.drawable_variation(ped, *component);
        let texture = engine.texture_variation(ped, *component);
        outfit.components.insert(*component, OutfitItem::new(drawable, texture));
    }

    for prop in props.slots() {
        let drawable = engine.prop_index(ped, *prop);
        let texture = engine.prop_texture_index(ped, *prop);
        outfit.props.insert(*prop, OutfitItem::new(drawable, texture));
    }

    outfit
}

/// Standard каталоги
pub fn capture_standard(engine: &dyn EngineAdapter, ped: PedHandle) -> Outfit {
    capture(engine, ped, ComponentCatalog::Standard, PropCatalog::Standard)
}

/// Showroom вариант: prop drawable -1 → 0 (showroom не знает -1)
pub fn capture_ffs(engine: &dyn EngineAdapter, ped: PedHandle) -> Outfit {
    let mut outfit = capture(engine, ped, ComponentCatalog::Showroom, PropCatalog::Standard);

    for item in outfit.props.values_mut() {
        item.drawable = item.drawable.max(0);
    }

    outfit
}

/// Max drawable/texture counts для каждого slot'а каталогов
///
/// `max_textures` - максимум по всем drawable'ам slot'а. Slot с 0 drawable'ов
/// даёт `max_textures == 0`.
pub fn max_options(
    engine: &dyn EngineAdapter,
    ped: PedHandle,
    components: ComponentCatalog,
    props: PropCatalog,
) -> Vec<MaxOptionEntry> {
    let mut entries = Vec::new();

    for component in components.slots() {
        if *component == Component::MAX_OPTIONS_EXCLUDED {
            continue;
        }

        let max_drawables = engine.drawable_variation_count(ped, *component);
        let max_textures = (0..max_drawables)
            .map(|drawable| engine.texture_variation_count(ped, *component, drawable))
            .fold(0, i32::max);

        entries.push(MaxOptionEntry {
            slot: SlotRef::Component(*component),
            max_drawables,
            max_textures,
        });
    }

    for prop in props.slots() {
        let max_drawables = engine.prop_drawable_variation_count(ped, *prop);
        let max_textures = (0..max_drawables)
            .map(|drawable| engine.prop_texture_variation_count(ped, *prop, drawable))
            .fold(0, i32::max);

        entries.push(MaxOptionEntry {
            slot: SlotRef::Prop(*prop),
            max_drawables,
            max_textures,
        });
    }

    entries
}
