use vows_database::Database;
use vows_domain::rsvp::Attendance;
use vows_event_bus::{EventBus, EventReceiverExt};
use vows_rsvp::{MIGRATIONS, RsvpForm, RsvpReceived, RsvpStats, Rsvps, SubmitError};

async fn rsvps() -> (Rsvps, EventBus) {
    let db = Database::builder()
        .url("mem://")
        .session("vows", "rsvp_test")
        .migrations(MIGRATIONS)
        .init()
        .await
        .unwrap();
    let events = EventBus::new();
    let slice = vows_rsvp::init(&db, &events).unwrap();
    let rsvps = slice.downcast_ref::<Rsvps>().unwrap().clone();
    (rsvps, events)
}

fn form(name: &str, attending: &str, guests: u32) -> RsvpForm {
    RsvpForm {
        name: Some(name.to_owned()),
        attending: Some(attending.to_owned()),
        num_guests: Some(guests.into()),
        ..RsvpForm::default()
    }
}

#[tokio::test]
async fn submissions_are_stored_newest_first() {
    let (rsvps, _) = rsvps().await;

    rsvps.submit(form("Alex", "yes", 2)).await.unwrap();
    rsvps.submit(form("Sam", "no", 1)).await.unwrap();
    rsvps.submit(form("Jo", "yes", 0)).await.unwrap();

    let stored = rsvps.store.list().await.unwrap();
    let names: Vec<_> = stored.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Jo", "Sam", "Alex"]);
    assert_eq!(stored[0].num_guests, 1);
    assert_eq!(stored[1].attending, Attendance::No);

    let stats = RsvpStats::from_rsvps(&stored);
    assert_eq!(stats.total_attending, 2);
    assert_eq!(stats.total_guests, 3);
}

#[tokio::test]
async fn incomplete_forms_are_not_stored() {
    let (rsvps, _) = rsvps().await;

    let err = rsvps.submit(RsvpForm { name: Some("Alex".to_owned()), ..RsvpForm::default() }).await;
    assert_eq!(err, Err(SubmitError::MissingFields));
    assert!(rsvps.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_reports_whether_it_existed() {
    let (rsvps, _) = rsvps().await;
    let stored = rsvps.submit(form("Alex", "yes", 2)).await.unwrap();

    assert!(rsvps.store.delete(&stored.id).await.unwrap());
    assert!(!rsvps.store.delete(&stored.id).await.unwrap());
    assert!(rsvps.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn submissions_are_announced() {
    let (rsvps, events) = rsvps().await;
    let mut rx = events.subscribe::<RsvpReceived>().unwrap();

    let stored = rsvps.submit(form("Alex", "yes", 2)).await.unwrap();

    let event = rx.next_event().await.unwrap();
    assert_eq!(event.rsvp, stored);
}
