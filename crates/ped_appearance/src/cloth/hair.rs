//! Hair visibility под маской
//!
//! Таблица mask drawable'ов, при которых причёска остаётся видимой.
//! Все остальные маски прячут волосы (hair drawable 0).

/// Mask drawables, совместимые с причёской (отсортировано для binary search)
pub const KEEP_HAIR_WITH_MASK: &[i32] = &[
    0, 11, 12, 13, 15, 26, 30, 36, 37, 38, 51, 52, 53, 54, 73, 74, 90, 101, 107, 111, 112, 113,
    114, 118, 119, 120, 121, 124, 145, 147, 148, 156, 157, 158, 159, 160, 161, 162, 163, 164,
    165, 166, 167, 168, 169, 170, 171, 172, 173, 174, 175, 176, 177, 178, 179, 180, 181, 182,
    183, 184, 185, 186, 187, 188, 189, 190, 191, 192, 193, 194, 195, 196, 197, 198,
];

/// Остаётся ли причёска видимой с этой маской
pub fn keeps_hair_with_mask(mask_drawable: i32) -> bool {
    KEEP_HAIR_WITH_MASK.binary_search(&mask_drawable).is_ok()
}
