use classbook_core::{
    AddressBookRepository, GroupName, JsonAddressBookRepository, PersonName, RepoError, Role,
};
use classbook_core::repo::address_book_repo::{decode_address_book, encode_address_book};
use classbook_core::repo::sample::sample_address_book;

#[test]
fn missing_file_reads_as_none_and_save_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("addressbook.json");
    let repo = JsonAddressBookRepository::new(&path);

    assert!(repo.read().unwrap().is_none());

    let book = sample_address_book();
    repo.save(&book).unwrap();
    assert!(path.exists());
    assert_eq!(repo.read().unwrap(), Some(book));
}

#[test]
fn stored_document_references_members_by_name() {
    let text = encode_address_book(&sample_address_book()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let member = &value["groups"][0]["members"][0];
    assert_eq!(member["person"], "Alex Yeoh");
    assert_eq!(member["attendance"].as_array().unwrap().len(), 13);
    assert_eq!(value["groups"][0]["assignments"][0]["deadline"], "2025-04-21");
}

#[test]
fn unresolved_references_are_dropped_on_load() {
    let text = r#"{
        "persons": [
            {"name": "Alex Yeoh", "phone": "87438807", "email": "alex@example.com", "address": "Blk 30", "tags": ["friends"]}
        ],
        "groups": [{
            "name": "CS2103T T12",
            "tags": [],
            "members": [
                {"person": "Alex Yeoh", "role": "TeachingAssistant", "attendance": [true, false, true], "grades": {"HW 1": 50.0, "Quiz": 3.0}},
                {"person": "Ghost Person", "role": "Student", "attendance": [], "grades": {}}
            ],
            "assignments": [{"name": "HW 1", "deadline": "2025-04-21", "penalty": 0.5}]
        }]
    }"#;

    let book = decode_address_book(text).unwrap();
    let group = book.group(&GroupName::parse("CS2103T T12").unwrap()).unwrap();
    assert_eq!(group.len(), 1);

    let alex = book.person(&PersonName::parse("Alex Yeoh").unwrap()).unwrap();
    let detail = group.member(alex).unwrap();
    assert_eq!(detail.role(), Role::TeachingAssistant);
    assert_eq!(detail.attendance_count(), 2);
    assert_eq!(detail.grades().len(), 1);
}

#[test]
fn invalid_field_values_fail_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("addressbook.json");
    std::fs::write(
        &path,
        r#"{"persons": [{"name": "Alex Yeoh", "phone": "12", "email": "alex@example.com", "address": "Blk 30"}]}"#,
    )
    .unwrap();

    let err = JsonAddressBookRepository::new(&path).read().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("phone")));
}

#[test]
fn truncated_document_is_a_json_error() {
    let err = decode_address_book(r#"{"persons": [{"name": "Alex Yeoh""#).unwrap_err();
    assert!(matches!(err, RepoError::Json(_)));
}

#[test]
fn negative_stored_grade_fails_the_load() {
    let text = r#"{
        "persons": [
            {"name": "Alex Yeoh", "phone": "87438807", "email": "alex@example.com", "address": "Blk 30"}
        ],
        "groups": [{
            "name": "CS2103T T12",
            "members": [{"person": "Alex Yeoh", "grades": {"HW 1": -50.0}}],
            "assignments": [{"name": "HW 1", "deadline": "2025-04-21"}]
        }]
    }"#;

    let err = decode_address_book(text).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("HW 1")));
}
