use super::*;

fn noop() -> TimerCallback {
    Box::new(|_world: &mut World| {})
}

#[test]
fn take_due_orders_by_due_then_id() {
    let mut q = TimerQueue::default();
    let late = q.schedule(Millis(200), noop());
    let a = q.schedule(Millis(100), noop());
    let b = q.schedule(Millis(100), noop());
    let future = q.schedule(Millis(500), noop());

    let fired: Vec<TimerId> = q.take_due(Millis(300)).into_iter().map(|(id, _)| id).collect();
    assert_eq!(fired, vec![a, b, late]);
    assert_eq!(q.len(), 1);
    assert!(q.is_pending(future));
    assert_eq!(q.next_due(), Some(Millis(500)));
}

#[test]
fn cancel_reports_whether_removed() {
    let mut q = TimerQueue::default();
    let id = q.schedule(Millis(10), noop());
    assert!(q.cancel(id));
    assert!(!q.cancel(id));
    assert!(q.is_empty());
    assert!(q.take_due(Millis(100)).is_empty());
}
