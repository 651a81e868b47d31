//! Usage text shown for malformed commands and by `help`.

pub const ADD: &str = "add: Adds a person to the address book.\n\
Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...\n\
Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 t/friends";

pub const EDIT: &str = "edit: Edits the person identified by the index in the displayed person list.\n\
Parameters: INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

pub const DELETE: &str = "delete: Deletes the person identified by the index in the displayed person list.\n\
Parameters: INDEX\n\
Example: delete 1";

pub const LIST: &str = "list: Lists all persons.";

pub const FIND: &str = "find: Finds persons whose names contain any of the given keywords (case-insensitive).\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob charlie";

pub const CLEAR: &str = "clear: Deletes every person and group.";

pub const ADD_GROUP: &str = "add-group: Adds a group to the address book.\n\
Parameters: n/GROUP_NAME [t/TAG]...\n\
Example: add-group n/CS2103T T12 t/CS";

pub const EDIT_GROUP: &str = "edit-group: Edits the group identified by the index in the displayed group list.\n\
Parameters: INDEX [n/GROUP_NAME] [t/TAG]...\n\
Example: edit-group 1 n/CS2103T T13";

pub const DELETE_GROUP: &str = "delete-group: Deletes the group identified by the index in the displayed group list.\n\
Parameters: INDEX\n\
Example: delete-group 1";

pub const LIST_GROUP: &str = "list-group: Lists all groups.";

pub const FIND_GROUP: &str = "find-group: Finds groups whose names contain any of the given keywords (case-insensitive).\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find-group T12";

pub const SHOW_GROUP_DETAILS: &str = "show-group-details: Shows the members of a group.\n\
Parameters: g/GROUP_NAME\n\
Example: show-group-details g/CS2103T T12";

pub const ADD_TO_GROUP: &str = "add-to-group: Adds a person to a group.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME\n\
Example: add-to-group P/Alex Yeoh g/CS2103T T12";

pub const DELETE_FROM_GROUP: &str = "delete-from-group: Removes a person from a group.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME\n\
Example: delete-from-group P/Alex Yeoh g/CS2103T T12";

pub const MARK_ATTENDANCE: &str = "mark-attendance: Marks a member present for a week.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME w/WEEK\n\
Example: mark-attendance P/Alex Yeoh g/CS2103T T12 w/3";

pub const UNMARK_ATTENDANCE: &str = "unmark-attendance: Marks a member absent for a week.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME w/WEEK\n\
Example: unmark-attendance P/Alex Yeoh g/CS2103T T12 w/3";

pub const SHOW_ATTENDANCE: &str = "show-attendance: Shows the attendance of a member.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME\n\
Example: show-attendance P/Alex Yeoh g/CS2103T T12";

pub const ADD_ASSIGNMENT: &str = "add-assignment: Adds an assignment to a group.\n\
Parameters: n/ASSIGNMENT_NAME g/GROUP_NAME d/DEADLINE(dd-MM-yyyy) [l/LATE_PENALTY]\n\
Example: add-assignment n/HW 1 g/CS2103T T12 d/21-04-2025 l/0.5";

pub const EDIT_ASSIGNMENT: &str = "edit-assignment: Edits an assignment of a group.\n\
Parameters: n/ASSIGNMENT_NAME g/GROUP_NAME [N/NEW_NAME] [d/DEADLINE(dd-MM-yyyy)] [l/LATE_PENALTY]\n\
Example: edit-assignment n/HW 1 g/CS2103T T12 N/HW 2 d/28-04-2025";

pub const DELETE_ASSIGNMENT: &str = "delete-assignment: Deletes an assignment from a group.\n\
Parameters: n/ASSIGNMENT_NAME g/GROUP_NAME\n\
Example: delete-assignment n/HW 1 g/CS2103T T12";

pub const GRADE_ASSIGNMENT: &str = "grade-assignment: Grades an assignment for a member.\n\
Parameters: P/PERSON_NAME g/GROUP_NAME A/ASSIGNMENT_NAME s/SCORE\n\
Example: grade-assignment P/Alex Yeoh g/CS2103T T12 A/HW 1 s/85";

pub const HELP: &str = "help: Shows the list of commands.\n\
Example: help";

pub const EXIT: &str = "exit: Exits the program.";

/// Every usage entry, in the order `help` prints them.
pub const ALL: &[&str] = &[
    ADD,
    EDIT,
    DELETE,
    LIST,
    FIND,
    CLEAR,
    ADD_GROUP,
    EDIT_GROUP,
    DELETE_GROUP,
    LIST_GROUP,
    FIND_GROUP,
    SHOW_GROUP_DETAILS,
    ADD_TO_GROUP,
    DELETE_FROM_GROUP,
    MARK_ATTENDANCE,
    UNMARK_ATTENDANCE,
    SHOW_ATTENDANCE,
    ADD_ASSIGNMENT,
    EDIT_ASSIGNMENT,
    DELETE_ASSIGNMENT,
    GRADE_ASSIGNMENT,
    HELP,
    EXIT,
];
