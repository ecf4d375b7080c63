//! Glove classification
//!
//! Перчатки в движке - это не отдельный slot, а drawable компонента `Torso`
//! (руки). Для каждой body-модели есть фиксированный набор drawable'ов
//! «голые руки»; всё остальное считается перчатками.
//!
//! Таблицы - данные: список inclusive диапазонов на модель. Female таблица
//! используется как default для любой не-male модели.

use std::ops::RangeInclusive;

use crate::bridge::{EngineAdapter, ModelHash, PedHandle};
use crate::cloth::Component;

/// Male freemode модель
pub const MALE_FREEMODE: ModelHash = ModelHash::from_name("mp_m_freemode_01");
/// Female freemode модель
pub const FEMALE_FREEMODE: ModelHash = ModelHash::from_name("mp_f_freemode_01");

/// Набор «голых» arm drawable'ов для одной модели
#[derive(Debug)]
pub struct GloveTable {
    pub bare_hands: &'static [RangeInclusive<i32>],
}

impl GloveTable {
    pub fn is_bare_hands(&self, arms_drawable: i32) -> bool {
        self.bare_hands.iter().any(|range| range.contains(&arms_drawable))
    }
}

pub static MALE_GLOVE_TABLE: GloveTable = GloveTable {
    bare_hands: &[
        i32::MIN..=15,
        18..=18,
        52..=62,
        97..=98,
        112..=114,
        118..=118,
        125..=125,
        132..=132,
        164..=164,
        169..=169,
        184..=184,
        188..=188,
        196..=198,
        202..=202,
    ],
};

pub static FEMALE_GLOVE_TABLE: GloveTable = GloveTable {
    bare_hands: &[
        i32::MIN..=15,
        19..=19,
        59..=71,
        112..=113,
        129..=131,
        135..=135,
        142..=142,
        149..=149,
        153..=153,
        157..=157,
        161..=161,
        165..=165,
        205..=205,
        210..=210,
        229..=229,
        233..=233,
        241..=242,
    ],
};

/// Таблица для модели (всё, что не male, идёт по female таблице)
pub fn glove_table(model: ModelHash) -> &'static GloveTable {
    if model == MALE_FREEMODE {
        &MALE_GLOVE_TABLE
    } else {
        &FEMALE_GLOVE_TABLE
    }
}

/// Pure классификация: надеты ли перчатки при данном arm drawable
pub fn is_gloved(model: ModelHash, arms_drawable: i32) -> bool {
    !glove_table(model).is_bare_hands(arms_drawable)
}

/// Читает модель + Torso drawable педа и классифицирует
pub fn check_wearing_gloves(engine: &dyn EngineAdapter, ped: PedHandle) -> bool {
    let arms_drawable = engine.drawable_variation(ped, Component::Torso);
    let model = engine.entity_model(ped);
    is_gloved(model, arms_drawable)
}
