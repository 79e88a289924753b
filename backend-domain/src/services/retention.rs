use crate::entities::TryOnEvent;

/// Appends `event` and evicts from the front until at most `cap` remain.
pub fn append_with_cap(events: &mut Vec<TryOnEvent>, event: TryOnEvent, cap: usize) {
    events.push(event);
    if events.len() > cap {
        let overflow = events.len() - cap;
        events.drain(..overflow);
    }
}
