//! Plaster config - статические данные по anchor точкам
//!
//! `PlasterConfigs` создаётся один раз (hardcoded в `Default`, host может
//! подгрузить свои через serde) и только читается.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::bridge::{BoneId, ControlAction, ModelHash};
use crate::cloth::gloves::{FEMALE_FREEMODE, MALE_FREEMODE};

/// Anchor точка гипса на теле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasterLocation {
    Head,
    Neck,
    ArmLeft,
    ArmRight,
    LegLeft,
    LegRight,
}

impl PlasterLocation {
    pub const ALL: [PlasterLocation; 6] = [
        PlasterLocation::Head,
        PlasterLocation::Neck,
        PlasterLocation::ArmLeft,
        PlasterLocation::ArmRight,
        PlasterLocation::LegLeft,
        PlasterLocation::LegRight,
    ];
}

/// Config одной anchor точки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasterConfig {
    /// body model → prop model (у male/female разные меши)
    pub prop: HashMap<ModelHash, ModelHash>,
    pub bone: BoneId,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    /// Input actions, заблокированные пока гипс есть
    pub blocked_actions: Vec<ControlAction>,
}

impl PlasterConfig {
    pub fn prop_for(&self, body_model: ModelHash) -> Option<ModelHash> {
        self.prop.get(&body_model).copied()
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Vec3 {
        Vec3::from_array(self.rotation)
    }
}

// Bone ids скелета
const SKEL_HEAD: BoneId = BoneId(31086);
const SKEL_NECK_1: BoneId = BoneId(39317);
const SKEL_L_FOREARM: BoneId = BoneId(61163);
const SKEL_R_FOREARM: BoneId = BoneId(28252);
const SKEL_L_CALF: BoneId = BoneId(63931);
const SKEL_R_CALF: BoneId = BoneId(36864);

// Control actions
const INPUT_SPRINT: ControlAction = ControlAction(21);
const INPUT_JUMP: ControlAction = ControlAction(22);
const INPUT_ATTACK: ControlAction = ControlAction(24);
const INPUT_AIM: ControlAction = ControlAction(25);
const INPUT_MELEE_ATTACK_LIGHT: ControlAction = ControlAction(140);
const INPUT_MELEE_ATTACK_HEAVY: ControlAction = ControlAction(141);
const INPUT_MELEE_ATTACK_ALTERNATE: ControlAction = ControlAction(142);
const INPUT_ATTACK2: ControlAction = ControlAction(257);

/// Lookup table location → config
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlasterConfigs {
    configs: BTreeMap<PlasterLocation, PlasterConfig>,
}

impl PlasterConfigs {
    pub fn new() -> Self {
        Self {
            configs: BTreeMap::new(),
        }
    }

    pub fn get(&self, location: PlasterLocation) -> Option<&PlasterConfig> {
        self.configs.get(&location)
    }

    pub fn insert(&mut self, location: PlasterLocation, config: PlasterConfig) {
        self.configs.insert(location, config);
    }
}

fn plaster(
    male_prop: &str,
    female_prop: &str,
    bone: BoneId,
    position: [f32; 3],
    rotation: [f32; 3],
    blocked_actions: Vec<ControlAction>,
) -> PlasterConfig {
    PlasterConfig {
        prop: HashMap::from([
            (MALE_FREEMODE, ModelHash::from_name(male_prop)),
            (FEMALE_FREEMODE, ModelHash::from_name(female_prop)),
        ]),
        bone,
        position,
        rotation,
        blocked_actions,
    }
}

impl Default for PlasterConfigs {
    fn default() -> Self {
        let mut configs = Self::new();

        configs.insert(
            PlasterLocation::Head,
            plaster(
                "prop_plaster_head_m",
                "prop_plaster_head_f",
                SKEL_HEAD,
                [0.02, 0.0, 0.0],
                [0.0, 90.0, 180.0],
                vec![],
            ),
        );
        configs.insert(
            PlasterLocation::Neck,
            plaster(
                "prop_plaster_neck_m",
                "prop_plaster_neck_f",
                SKEL_NECK_1,
                [0.0, 0.0, 0.0],
                [0.0, 90.0, 180.0],
                vec![],
            ),
        );
        configs.insert(
            PlasterLocation::ArmLeft,
            plaster(
                "prop_plaster_arm_l_m",
                "prop_plaster_arm_l_f",
                SKEL_L_FOREARM,
                [0.12, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                vec![
                    INPUT_AIM,
                    INPUT_MELEE_ATTACK_LIGHT,
                    INPUT_MELEE_ATTACK_HEAVY,
                    INPUT_MELEE_ATTACK_ALTERNATE,
                ],
            ),
        );
        configs.insert(
            PlasterLocation::ArmRight,
            plaster(
                "prop_plaster_arm_r_m",
                "prop_plaster_arm_r_f",
                SKEL_R_FOREARM,
                [0.12, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                vec![
                    INPUT_ATTACK,
                    INPUT_AIM,
                    INPUT_ATTACK2,
                    INPUT_MELEE_ATTACK_LIGHT,
                    INPUT_MELEE_ATTACK_HEAVY,
                    INPUT_MELEE_ATTACK_ALTERNATE,
                ],
            ),
        );
        configs.insert(
            PlasterLocation::LegLeft,
            plaster(
                "prop_plaster_leg_l_m",
                "prop_plaster_leg_l_f",
                SKEL_L_CALF,
                [0.18, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                vec![INPUT_SPRINT, INPUT_JUMP],
            ),
        );
        configs.insert(
            PlasterLocation::LegRight,
            plaster(
                "prop_plaster_leg_r_m",
                "prop_plaster_leg_r_f",
                SKEL_R_CALF,
                [0.18, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                vec![INPUT_SPRINT, INPUT_JUMP],
            ),
        );

        configs
    }
}
