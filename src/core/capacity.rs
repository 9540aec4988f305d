use crate::config::MIN_INSTANCE_CAPACITY;

/// Slot count the instance buffer should move to for `needed` instances, or
/// `None` to keep `current`.
///
/// Grows to the next power of two and shrinks once less than a quarter is in
/// use. Never goes below `MIN_INSTANCE_CAPACITY` or above `max_slots`, the
/// device's buffer size limit expressed in instances.
pub fn next_instance_capacity(current: usize, needed: usize, max_slots: usize) -> Option<usize> {
    let ceiling = max_slots.max(MIN_INSTANCE_CAPACITY);
    let target = needed
        .checked_next_power_of_two()
        .unwrap_or(ceiling)
        .clamp(MIN_INSTANCE_CAPACITY, ceiling);
    let grow = needed > current && current < ceiling;
    let shrink = current > MIN_INSTANCE_CAPACITY && needed < current / 4;
    if (grow || shrink) && target != current {
        Some(target)
    } else {
        None
    }
}

/// How many `stride`-byte instances fit in a buffer of `max_buffer_size` bytes.
pub fn max_instance_slots(max_buffer_size: u64, stride: u64) -> usize {
    if stride == 0 {
        return usize::MAX;
    }
    usize::try_from(max_buffer_size / stride).unwrap_or(usize::MAX)
}
