use super::*;

#[test]
fn manual_queue_fires_in_request_order() {
    let mut s = ManualScheduler::new();
    let a = s.request_tick();
    let b = s.request_tick();
    assert_ne!(a, b);
    assert_eq!(s.pending_len(), 2);
    assert_eq!(s.fire_next(), Some(a));
    assert_eq!(s.fire_next(), Some(b));
    assert_eq!(s.fire_next(), None);
    assert_eq!(s.requested(), 2);
}

#[test]
fn cancel_only_counts_pending_ticks() {
    let mut s = ManualScheduler::new();
    let a = s.request_tick();
    s.cancel_tick(a);
    s.cancel_tick(a);
    s.cancel_tick(TickId(99));
    assert_eq!(s.pending_len(), 0);
    assert_eq!(s.cancelled(), 1);
}

#[test]
fn clones_share_the_queue() {
    let mut s = ManualScheduler::new();
    let host = s.clone();
    let id = s.request_tick();
    assert_eq!(host.fire_next(), Some(id));
    assert_eq!(s.pending_len(), 0);
}

#[test]
fn sleep_scheduler_hands_out_the_pending_tick_once() {
    let mut s = SleepScheduler::with_fps(1000);
    assert_eq!(s.wait_next(), None);
    let id = s.request_tick();
    assert_eq!(s.wait_next(), Some(id));
    assert_eq!(s.wait_next(), None);

    let id = s.request_tick();
    s.cancel_tick(id);
    assert_eq!(s.wait_next(), None);
}
