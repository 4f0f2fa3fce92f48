//! Classic chain scoring tables.

pub const COLOR_BONUS: [u32; 7] = [0, 0, 3, 6, 12, 24, 48];
pub const GROUP_BONUS: [u32; 8] = [0, 2, 3, 4, 5, 6, 7, 10];
pub const CHAIN_POWERS: [u32; 24] = [
    0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512, 544,
    576, 608, 640, 672,
];

pub const MAX_CLEAR_BONUS: u32 = 999;
pub const ALL_CLEAR_BONUS: u32 = 8500;

/// Bonus for a single cleared group of `size` cells (`size >= 4`).
#[inline]
pub fn group_bonus(size: u32) -> u32 {
    let index = size.saturating_sub(crate::CLEAR_THRESHOLD) as usize;
    GROUP_BONUS[index.min(GROUP_BONUS.len() - 1)]
}

#[inline]
pub fn color_bonus(num_colors: u32) -> u32 {
    COLOR_BONUS[(num_colors as usize).min(COLOR_BONUS.len() - 1)]
}

/// Chain power for the zero-based clearing pass `chain`.
#[inline]
pub fn chain_power(chain: u32) -> u32 {
    CHAIN_POWERS[(chain as usize).min(CHAIN_POWERS.len() - 1)]
}

#[inline]
pub fn clear_bonus(chain: u32, num_colors: u32, group_bonus: u32) -> u32 {
    (chain_power(chain) + color_bonus(num_colors) + group_bonus).clamp(1, MAX_CLEAR_BONUS)
}

/// Score of one clearing pass.
#[inline]
pub fn pass_score(num_cleared: u32, chain: u32, num_colors: u32, group_bonus: u32) -> u32 {
    10 * num_cleared * clear_bonus(chain, num_colors, group_bonus)
}
