//! First-run sample roster.

use crate::model::address_book::AddressBook;
use crate::model::fields::{parse_tags, Address, Email, GroupName, PersonName, Phone};
use crate::model::group::Group;
use crate::model::person::Person;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;

const SAMPLE_PERSONS: &[(&str, &str, &str, &str, &[&str])] = &[
    ("Alex Yeoh", "87438807", "alexyeoh@example.com", "Blk 30 Geylang Street 29, #06-40", &["friends"]),
    ("Bernice Yu", "99272758", "berniceyu@example.com", "Blk 30 Lorong 3 Serangoon Gardens, #07-18", &["colleagues", "friends"]),
    ("Charlotte Oliveiro", "93210283", "charlotte@example.com", "Blk 11 Ang Mo Kio Street 74, #11-04", &["neighbours"]),
    ("David Li", "91031282", "lidavid@example.com", "Blk 436 Serangoon Gardens Street 26, #16-43", &["family"]),
    ("Irfan Ibrahim", "92492021", "irfan@example.com", "Blk 47 Tampines Street 20, #17-35", &["classmates"]),
    ("Roy Balakrishnan", "92624417", "royb@example.com", "Blk 45 Aljunied Street 85, #11-31", &["colleagues"]),
];

/// Builds the roster shown when no data file exists yet.
pub fn sample_address_book() -> AddressBook {
    // Sample literals are fixed and valid; failure here is a programming error.
    build_sample().unwrap_or_default()
}

fn build_sample() -> Result<AddressBook, Box<dyn std::error::Error>> {
    let mut book = AddressBook::new();
    for (name, phone, email, address, tags) in SAMPLE_PERSONS {
        book.add_person(sample_person(name, phone, email, address, tags)?)?;
    }

    let t12 = GroupName::parse("CS2103T T12")?;
    book.add_group(Group::new(t12.clone(), parse_tags(["CS"])?))?;
    for person in book.persons()[..3].to_vec() {
        book.add_person_to_group(&person, &t12)?;
    }
    if let Some(deadline) = NaiveDate::from_ymd_opt(2025, 4, 21) {
        book.add_assignment_to_group(
            crate::model::fields::AssignmentName::parse("HW 1")?,
            deadline,
            &t12,
            1.0,
        )?;
    }
    Ok(book)
}

fn sample_person(
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    tags: &[&str],
) -> Result<Person, ValidationError> {
    Ok(Person::new(
        PersonName::parse(name)?,
        Phone::parse(phone)?,
        Email::parse(email)?,
        Address::parse(address)?,
        parse_tags(tags.iter().copied())?,
    ))
}
