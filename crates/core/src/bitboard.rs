//! Single-floor bit primitives.
//!
//! A floor is an 8x8 grid packed into one `u64`: bit `row * 8 + col`, row 0 at
//! the top. Every color (and the garbage layer) gets its own word.

/// One layer of one floor.
pub type Puyos = u64;

pub const WIDTH: usize = 8;
pub const FLOOR_HEIGHT: usize = 8;
pub const FLOOR_CELLS: usize = WIDTH * FLOOR_HEIGHT;
pub const CLEAR_THRESHOLD: u32 = 4;

pub const H_SHIFT: u32 = 1;
pub const V_SHIFT: u32 = WIDTH as u32;

/// Row 0 of a floor.
pub const TOP_ROW: Puyos = 0x0000_0000_0000_00FF;
/// Row 7 of a floor.
pub const BOTTOM_ROW: Puyos = 0xFF00_0000_0000_0000;
/// Every column except column 0. Masks horizontal shifts so they never wrap.
pub const RIGHT_BLOCK: Puyos = 0xFEFE_FEFE_FEFE_FEFE;
pub const FULL: Puyos = !0;

/// Distance from row 7 of one floor to row 0 of the next.
pub const FLOOR_CARRY: u32 = (FLOOR_CELLS - WIDTH) as u32;

#[inline(always)]
pub fn popcount(puyos: Puyos) -> u32 {
    puyos.count_ones()
}

/// Orthogonal neighbours of every set bit, the bits themselves included.
#[inline(always)]
fn spread(puyos: Puyos) -> Puyos {
    puyos
        | ((puyos & RIGHT_BLOCK) >> H_SHIFT)
        | ((puyos << H_SHIFT) & RIGHT_BLOCK)
        | (puyos << V_SHIFT)
        | (puyos >> V_SHIFT)
}

/// Grow `seed` inside `target` until it covers its whole connected component.
#[inline]
pub fn flood(seed: Puyos, target: Puyos) -> Puyos {
    let mut group = seed & target;
    if group == 0 {
        return group;
    }
    loop {
        let next = spread(group) & target;
        if next == group {
            return group;
        }
        group = next;
    }
}

/// Cells orthogonally adjacent to `puyos`, excluding `puyos` itself.
#[inline]
pub fn cross(puyos: Puyos) -> Puyos {
    spread(puyos) & !puyos
}

/// Mirror every row left to right.
#[inline(always)]
pub fn mirror_word(puyos: Puyos) -> Puyos {
    puyos.swap_bytes().reverse_bits()
}

/// Bit for the cell at (`row`, `col`) within a floor.
#[inline(always)]
pub const fn cell(row: usize, col: usize) -> Puyos {
    1 << (row * WIDTH + col)
}
