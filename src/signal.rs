use crate::map_state::MapState;

/// Distance to the nearest gem implied by the signal strength.
///
/// Strength falls off as `1 / (1 + d² / r²)`. Underestimates the distance to
/// the closest gem when several gems contribute.
pub fn distance_from_signal_strength(signal_radius: f64, strength: f64) -> f64 {
    if strength <= 0.0 || strength >= 1.0 {
        return 0.0;
    }
    signal_radius * ((1.0 - strength) / strength).sqrt()
}

/// Mark every cell strictly closer than the signalled gem as checked at `tick`.
/// Returns the number of cells marked.
pub fn mark_signal_area(
    map: &mut MapState,
    bot: (i32, i32),
    signal_radius: f64,
    strength: f64,
    tick: u32,
) -> usize {
    let distance = distance_from_signal_strength(signal_radius, strength);
    if distance == 0.0 {
        return 0;
    }

    // Shrink a little so the gem cell itself stays unchecked
    let distance_sq = distance * distance - 0.1;
    let reach = distance.ceil() as i32;
    let (bx, by) = bot;

    let mut marked = 0;
    for dy in (-reach).max(-by)..=reach.min(map.height - 1 - by) {
        for dx in (-reach).max(-bx)..=reach.min(map.width - 1 - bx) {
            if ((dx * dx + dy * dy) as f64) >= distance_sq {
                continue;
            }
            map.check(bx + dx, by + dy, tick);
            marked += 1;
        }
    }
    marked
}
