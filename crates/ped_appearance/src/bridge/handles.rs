//! Engine-side identifiers
//!
//! Все handle'ы движка - числа, но из разных namespace'ов. Newtype на каждый
//! namespace, чтобы local object handle нельзя было передать туда, где ждут
//! network id (и наоборот).

use serde::{Deserialize, Serialize};

/// Local handle педа (entity в движке)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PedHandle(pub i32);

/// Local handle физического объекта (валиден только на этом клиенте)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub i32);

/// Network id объекта (резолвится remote peers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub i32);

/// Server id игрока (адресат remote запросов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerId(pub i32);

/// Bone id скелета педа (не bone index - index резолвит движок)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoneId(pub i32);

/// Input action id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlAction(pub i32);

/// Model identity (joaat hash имени модели)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelHash(pub u32);

impl ModelHash {
    /// Hash модели по имени (case-insensitive, как считает движок)
    pub const fn from_name(name: &str) -> Self {
        Self(joaat(name))
    }
}

/// Jenkins one-at-a-time hash над lowercase байтами
pub const fn joaat(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 0;
    let mut i = 0;

    while i < bytes.len() {
        hash = hash.wrapping_add(bytes[i].to_ascii_lowercase() as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
        i += 1;
    }

    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Networked объект, созданный этим клиентом
///
/// Local handle и network id живут парой: handle нужен для delete/attach,
/// net id - для регистрации во внешнем registry. Конвертация handle → net id
/// происходит один раз при создании.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkedObject {
    pub handle: ObjectHandle,
    pub net_id: NetworkId,
}
