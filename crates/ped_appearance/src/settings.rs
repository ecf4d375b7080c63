//! Runtime settings (resource)
//!
//! Hardcoded defaults; host может заменить resource до `app.update()`
//! (serde, чтобы грузить из data файла).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;
use crate::plaster::{ProgressAnimation, ProgressRequest};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    /// Control group для disable actions (0 = player control)
    pub control_group: i32,
    /// Progress action при наложении/снятии гипса
    pub plaster_progress: ProgressRequest,
    pub log_level: LogLevel,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            control_group: 0,
            plaster_progress: ProgressRequest {
                name: "plaster".to_string(),
                label: "Gestion de platre...".to_string(),
                duration_ms: 5000,
                animation: Some(ProgressAnimation {
                    dictionary: "mp_fm_intro_cut".to_string(),
                    name: "fixing_a_ped".to_string(),
                    repeat: true,
                }),
            },
            log_level: LogLevel::Debug,
        }
    }
}
