use classbook_core::repo::sample::sample_address_book;
use classbook_core::{GroupName, PersonFilter, PersonName, ResultView, RosterEvent, RosterService};
use std::cell::RefCell;
use std::rc::Rc;

fn recording_service() -> (RosterService, Rc<RefCell<Vec<RosterEvent>>>) {
    let mut service = RosterService::new(sample_address_book());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    service.subscribe(Box::new(move |event| sink.borrow_mut().push(event.clone())));
    (service, events)
}

#[test]
fn successful_mutations_notify_and_failures_do_not() {
    let (mut service, events) = recording_service();
    let group = GroupName::parse("CS2103T T12").unwrap();
    let roy = PersonName::parse("Roy Balakrishnan").unwrap();

    service.add_person_to_group(&roy, &group).unwrap();
    assert_eq!(*events.borrow(), vec![RosterEvent::GroupsChanged]);

    events.borrow_mut().clear();
    assert!(service.add_person_to_group(&roy, &group).is_err());
    assert!(service.mark_attendance(&roy, &group, 14).is_err());
    assert!(events.borrow().is_empty());
}

#[test]
fn show_commands_switch_view() {
    let (mut service, events) = recording_service();
    let group = GroupName::parse("CS2103T T12").unwrap();
    let alex = PersonName::parse("Alex Yeoh").unwrap();

    service.show_attendance(&alex, &group).unwrap();
    let expected = ResultView::Attendance {
        person: alex.clone(),
        group: group.clone(),
    };
    assert_eq!(service.view(), &expected);
    assert_eq!(events.borrow().last(), Some(&RosterEvent::ViewChanged(expected)));

    service.delete_group(&group).unwrap();
    assert_eq!(service.view(), &ResultView::Groups);
}

#[test]
fn person_filter_narrows_snapshot() {
    let (mut service, _events) = recording_service();
    service.update_person_filter(PersonFilter::NameKeywords(vec![
        "alex".to_string(),
        "DAVID".to_string(),
    ]));
    let names: Vec<&str> = service
        .filtered_persons()
        .iter()
        .map(|person| person.name.as_str())
        .collect();
    assert_eq!(names, ["Alex Yeoh", "David Li"]);
}

#[test]
fn unsubscribed_listener_stops_receiving() {
    let mut service = RosterService::new(sample_address_book());
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = service.subscribe(Box::new(move |_| *sink.borrow_mut() += 1));

    service.clear();
    let seen = *count.borrow();
    assert!(seen > 0);

    assert!(service.unsubscribe(id));
    service.clear();
    assert_eq!(*count.borrow(), seen);
}
