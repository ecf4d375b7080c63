//! Slot catalogs: components и props педа
//!
//! # Архитектура
//!
//! **Component** / **Prop** - закрытые enum'ы slot index'ов. Raw `i32` из
//! движка или из сериализованного outfit'а проходит через `TryFrom<i32>`:
//! неизвестный index отклоняется сразу (`CatalogError`), а не коэрсится.
//!
//! **ComponentCatalog** - вариант каталога компонентов:
//! - `Standard` - все 12 компонентов
//! - `Showroom` - подмножество для FFS showroom (одежда без головы/волос)
//!
//! Props каталог один для обоих вариантов.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown component slot index {0}")]
    UnknownComponent(i32),
    #[error("unknown prop slot index {0}")]
    UnknownProp(i32),
}

// ============================================================================
// Component
// ============================================================================

/// Component slot (одежда/тело)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Component {
    Head = 0,
    Mask = 1,
    Hair = 2,
    /// Руки/торс (по drawable определяем перчатки)
    Torso = 3,
    Legs = 4,
    Bag = 5,
    Shoes = 6,
    /// Index 7 зарезервирован движком, не участвует в max options
    Accessories = 7,
    Undershirt = 8,
    BodyArmor = 9,
    Decals = 10,
    Tops = 11,
}

impl Component {
    pub const ALL: [Component; 12] = [
        Component::Head,
        Component::Mask,
        Component::Hair,
        Component::Torso,
        Component::Legs,
        Component::Bag,
        Component::Shoes,
        Component::Accessories,
        Component::Undershirt,
        Component::BodyArmor,
        Component::Decals,
        Component::Tops,
    ];

    /// Slot, исключённый из enumeration max options
    pub const MAX_OPTIONS_EXCLUDED: Component = Component::Accessories;

    pub fn index(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Component {
    type Error = CatalogError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Component::ALL
            .iter()
            .copied()
            .find(|component| component.index() == index)
            .ok_or(CatalogError::UnknownComponent(index))
    }
}

impl From<Component> for i32 {
    fn from(component: Component) -> Self {
        component.index()
    }
}

// ============================================================================
// Prop
// ============================================================================

/// Prop slot (аксессуары поверх модели, могут отсутствовать)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Prop {
    Hat = 0,
    Glasses = 1,
    Ears = 2,
    Watch = 6,
    Bracelet = 7,
}

impl Prop {
    pub const ALL: [Prop; 5] = [Prop::Hat, Prop::Glasses, Prop::Ears, Prop::Watch, Prop::Bracelet];

    pub fn index(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Prop {
    type Error = CatalogError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Prop::ALL
            .iter()
            .copied()
            .find(|prop| prop.index() == index)
            .ok_or(CatalogError::UnknownProp(index))
    }
}

impl From<Prop> for i32 {
    fn from(prop: Prop) -> Self {
        prop.index()
    }
}

// ============================================================================
// Catalog variants
// ============================================================================

/// FFS showroom components (подмножество `Component`)
pub const FFS_COMPONENTS: [Component; 5] = [
    Component::Torso,
    Component::Legs,
    Component::Shoes,
    Component::Undershirt,
    Component::Tops,
];

/// Какой набор компонентов обходить при capture / max options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCatalog {
    Standard,
    Showroom,
}

impl ComponentCatalog {
    pub fn slots(self) -> &'static [Component] {
        match self {
            ComponentCatalog::Standard => &Component::ALL,
            ComponentCatalog::Showroom => &FFS_COMPONENTS,
        }
    }

    pub fn contains(self, component: Component) -> bool {
        self.slots().contains(&component)
    }
}

/// Props каталог (сейчас один вариант)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropCatalog {
    Standard,
}

impl PropCatalog {
    pub fn slots(self) -> &'static [Prop] {
        match self {
            PropCatalog::Standard => &Prop::ALL,
        }
    }
}

/// Slot из любого каталога (ключ `MaxOptionEntry`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRef {
    Component(Component),
    Prop(Prop),
}
