use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Used for every simulation quantity that is fractional: tick deltas in
/// seconds, conveyor progress, miner timers.
pub type Fixed64 = I32F32;

/// Convert an f64 to Fixed64. Use only for initialization, never in sim loop.
#[inline]
pub fn fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Tick delta for a frame at the given rate, e.g. `frame_dt(60)` is 1/60 s.
#[inline]
pub fn frame_dt(frames_per_second: u32) -> Fixed64 {
    Fixed64::ONE / Fixed64::from_num(frames_per_second.max(1))
}
