//! Outfit value objects
//!
//! Outfit собирается на каждый вызов и никогда не хранится внутри engine.
//! Wire формат совпадает с player skin data: PascalCase поля, ключи map'ов -
//! slot index числом.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::{CatalogError, Component, Prop, SlotRef};

/// Вариация одного slot'а
///
/// `clear` имеет смысл только для props: «prop не надет», drawable/texture
/// при этом игнорируются.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutfitItem {
    pub drawable: i32,
    pub texture: i32,
    pub palette: i32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clear: bool,
}

impl OutfitItem {
    pub fn new(drawable: i32, texture: i32) -> Self {
        Self {
            drawable,
            texture,
            palette: 0,
            clear: false,
        }
    }

    pub fn with_palette(mut self, palette: i32) -> Self {
        self.palette = palette;
        self
    }

    /// Prop item «снять prop»
    pub fn cleared() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }
}

/// Полный набор вариаций педа
///
/// Ключи - типизированные slot'ы, поэтому невалидный index не может попасть
/// в outfit (десериализация с неизвестным index'ом падает).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Outfit {
    pub components: BTreeMap<Component, OutfitItem>,
    pub props: BTreeMap<Prop, OutfitItem>,
}

impl Outfit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: Component, item: OutfitItem) -> Self {
        self.components.insert(component, item);
        self
    }

    pub fn with_prop(mut self, prop: Prop, item: OutfitItem) -> Self {
        self.props.insert(prop, item);
        self
    }

    /// Outfit из raw slot index'ов. Первый неизвестный index - ошибка.
    pub fn from_raw(
        components: impl IntoIterator<Item = (i32, OutfitItem)>,
        props: impl IntoIterator<Item = (i32, OutfitItem)>,
    ) -> Result<Self, CatalogError> {
        let mut outfit = Self::new();

        for (index, item) in components {
            outfit.components.insert(Component::try_from(index)?, item);
        }

        for (index, item) in props {
            outfit.props.insert(Prop::try_from(index)?, item);
        }

        Ok(outfit)
    }
}

/// Максимум вариаций для slot'а
///
/// `max_textures` - максимум по всем drawable'ам slot'а, per-drawable
/// детализация не сохраняется.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxOptionEntry {
    pub slot: SlotRef,
    pub max_drawables: i32,
    pub max_textures: i32,
}
