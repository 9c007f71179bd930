use vows_event_bus::{EventBus, EventBusError, EventReceiverExt};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Claimed(u32);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Replied(&'static str);

#[tokio::test]
async fn published_events_reach_every_subscriber() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<Claimed>().unwrap();
    let mut second = bus.subscribe::<Claimed>().unwrap();

    let delivered = bus.publish(Claimed(7)).unwrap();
    assert_eq!(delivered, 2);

    assert_eq!(*first.next_event().await.unwrap(), Claimed(7));
    assert_eq!(*second.next_event().await.unwrap(), Claimed(7));
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut claims = bus.subscribe::<Claimed>().unwrap();
    let mut replies = bus.subscribe::<Replied>().unwrap();

    bus.publish(Replied("yes")).unwrap();
    bus.publish(Claimed(1)).unwrap();

    assert_eq!(*replies.next_event().await.unwrap(), Replied("yes"));
    assert_eq!(*claims.next_event().await.unwrap(), Claimed(1));
}

#[test]
fn publishing_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(Claimed(1)).unwrap(), 0);
}

#[tokio::test]
async fn lagged_receiver_resumes_at_retained_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<Claimed>(2).unwrap();

    for i in 0..50 {
        bus.publish(Claimed(i)).unwrap();
    }

    let first = rx.next_event().await.unwrap();
    assert_eq!(*first, Claimed(48));
    assert_eq!(*rx.next_event().await.unwrap(), Claimed(49));
}

#[tokio::test]
async fn shutdown_closes_subscribers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Claimed>().unwrap();

    assert_eq!(bus.shutdown(), 1);
    assert!(rx.next_event().await.is_none());
}

#[test]
fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<Claimed>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}
