//! End-to-end menu sessions against in-memory buffers.
//!
//! Each test scripts a full session (input lines ending in `q`) and
//! asserts on the printed transcript, the way a user at the terminal
//! would see it.

use std::io::Cursor;

use registrar_core::Registry;

/// Run a scripted session and return the transcript.
fn session(script: &str) -> String {
    let mut registry = Registry::default();
    let mut input = Cursor::new(script.to_string());
    let mut output = Vec::new();
    registrar_cli::run(&mut input, &mut output, &mut registry).expect("in-memory I/O");
    String::from_utf8(output).expect("menu output is UTF-8")
}

#[test]
fn enrollment_scenario_refuses_then_admits() {
    let script = "\
1
CS101
Intro to computing
8
1
CS201
Data structures
12
7
CS201
CS101
2
Alice
123-45-6789
20
3
CS201
A1
2024-01-10
9
CS201
2024-01-10
Alice
8
Alice
CS101
9
CS201
2024-01-10
Alice
12
CS201
2024-01-10
q
";
    let transcript = session(script);

    let refused = transcript
        .find("Admission refused: student does not have the necessary prerequisites.")
        .expect("first attempt is refused");
    let admitted =
        transcript.find("Student added to course offering.").expect("second attempt is admitted");
    assert!(refused < admitted, "refusal must precede admission in the transcript");

    // Offering detail lists the admitted student.
    assert!(transcript.contains("Offering: CS201"));
    assert!(transcript.contains("Attendees: Alice"));
}

#[test]
fn lookup_misses_are_reported_and_session_continues() {
    let script = "\
3
PHYS999
11
Bob
10
PHYS999
q
";
    let transcript = session(script);
    assert!(transcript.contains("Sorry, cannot find that course."));
    assert!(transcript.contains("Sorry, cannot find that student."));
    // The menu came back after every miss.
    assert!(transcript.matches("Your choice:").count() >= 4);
}

#[test]
fn non_numeric_input_reprompts_instead_of_aborting() {
    let script = "\
1
CS101
Intro
eight
8
4
q
";
    let transcript = session(script);
    assert!(transcript.contains("Please enter a number."));
    assert!(transcript.contains("Course created."));
    assert!(transcript.contains("CS101"));
}

#[test]
fn listings_render_short_summaries() {
    let script = "\
1
CS101
Intro
8
2
Alice
123
20
3
CS101
A1
2024-01-10
4
5
6
q
";
    let transcript = session(script);
    assert!(transcript.contains("List of courses:\n  CS101"));
    assert!(transcript.contains("List of students:\n  Alice"));
    assert!(transcript.contains("List of offerings:\n  CS101 (2024-01-10)"));
}

#[test]
fn end_of_input_quits_cleanly() {
    let transcript = session("4\n");
    assert!(transcript.contains("List of courses:"));
}
