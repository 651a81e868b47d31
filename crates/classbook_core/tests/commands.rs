use classbook_core::{
    AddressBook, AddressBookRepository, CommandError, GroupName, JsonAddressBookRepository, Logic,
    LogicError, ModelError, ParseError, PersonName, ResultView,
};

fn fresh_logic(dir: &tempfile::TempDir) -> Logic<JsonAddressBookRepository> {
    let repo = JsonAddressBookRepository::new(dir.path().join("addressbook.json"));
    Logic::new(AddressBook::new(), repo)
}

fn seed(logic: &mut Logic<JsonAddressBookRepository>) {
    for line in [
        "add n/Alex Yeoh p/87438807 e/alexyeoh@example.com a/Blk 30 Geylang Street 29 t/friends",
        "add n/Bernice Yu p/99272758 e/berniceyu@example.com a/Blk 30 Lorong 3 Serangoon Gardens",
        "add-group n/CS2103T T12 t/CS",
        "add-to-group P/Alex Yeoh g/CS2103T T12",
        "add-to-group P/Bernice Yu g/CS2103T T12",
    ] {
        logic.execute(line).unwrap();
    }
}

#[test]
fn session_state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);
    logic
        .execute("add-assignment n/HW 1 g/CS2103T T12 d/01-01-2099 l/0.5")
        .unwrap();
    logic
        .execute("grade-assignment P/Alex Yeoh g/CS2103T T12 A/HW 1 s/85")
        .unwrap();
    logic
        .execute("mark-attendance P/Bernice Yu g/CS2103T T12 w/4")
        .unwrap();

    let reloaded = Logic::load(JsonAddressBookRepository::new(dir.path().join("addressbook.json")))
        .unwrap();
    assert_eq!(reloaded.roster().address_book(), logic.roster().address_book());

    let group = GroupName::parse("CS2103T T12").unwrap();
    let alex = PersonName::parse("Alex Yeoh").unwrap();
    let bernice = PersonName::parse("Bernice Yu").unwrap();
    let hw = classbook_core::AssignmentName::parse("HW 1").unwrap();
    assert_eq!(reloaded.roster().grade(&alex, &group, &hw).unwrap(), Some(85.0));
    let detail = reloaded.roster().member_detail(&bernice, &group).unwrap();
    assert!(detail.attended(4).unwrap());
}

#[test]
fn late_grade_feedback_shows_stored_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);
    logic
        .execute("add-assignment n/HW 0 g/CS2103T T12 d/01-01-2020 l/0.5")
        .unwrap();

    let result = logic
        .execute("grade-assignment P/Alex Yeoh g/CS2103T T12 A/HW 0 s/80")
        .unwrap();
    assert!(result.feedback.contains("40.00"));
}

#[test]
fn deleting_person_by_index_removes_memberships() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);

    let result = logic.execute("delete 1").unwrap();
    assert!(result.feedback.starts_with("Deleted Person: Alex Yeoh"));

    let group = logic
        .roster()
        .group(&GroupName::parse("CS2103T T12").unwrap())
        .unwrap();
    assert_eq!(group.len(), 1);

    let stored = logic.repository().read().unwrap().unwrap();
    assert_eq!(stored.persons().len(), 1);
}

#[test]
fn edit_group_renames_and_follows_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);
    logic.execute("show-group-details g/CS2103T T12").unwrap();

    logic.execute("edit-group 1 n/CS2103T T13").unwrap();
    assert_eq!(
        logic.roster().view(),
        &ResultView::GroupDetails {
            group: GroupName::parse("CS2103T T13").unwrap()
        }
    );

    let renamed = logic
        .roster()
        .group(&GroupName::parse("CS2103T T13").unwrap())
        .unwrap();
    assert_eq!(renamed.len(), 2);
    assert_eq!(renamed.tags().len(), 1);
}

#[test]
fn errors_are_typed_by_stage() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);

    let err = logic.execute("teleport").unwrap_err();
    assert!(matches!(err, LogicError::Parse(ParseError::UnknownCommand(_))));

    let err = logic.execute("add-to-group P/Nobody Here g/CS2103T T12").unwrap_err();
    assert!(matches!(
        err,
        LogicError::Command(CommandError::Model(ModelError::PersonNotFound(_)))
    ));
    assert_eq!(err.to_string(), "This person does not exist!");

    let err = logic
        .execute("edit-assignment n/Missing g/CS2103T T12 l/0.3")
        .unwrap_err();
    assert_eq!(err.to_string(), "Assignment not found!");
}

#[test]
fn clear_empties_book_and_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut logic = fresh_logic(&dir);
    seed(&mut logic);

    logic.execute("clear").unwrap();
    let stored = logic.repository().read().unwrap().unwrap();
    assert!(stored.persons().is_empty());
    assert!(stored.groups().is_empty());
}
