/// median of a duration sample set, `None` when empty.
///
/// odd counts return the exact middle value; even counts return the average
/// of the two middle values rounded to the nearest second, ties rounding up.
/// the result depends only on the sample multiset, not its order.
pub fn median(samples: &[u32]) -> Option<u32> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        // widen so the sum cannot overflow; the average always fits u32
        let sum = sorted[mid - 1] as u64 + sorted[mid] as u64;
        Some(((sum + 1) / 2) as u32)
    }
}
