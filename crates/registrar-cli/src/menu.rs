//! The interactive menu loop.
//!
//! A thin dispatcher over [`Registry`]: every choice prompts for its
//! fields, resolves names through the registry's lookups, and prints the
//! outcome. Lookup misses and capacity errors are reported and the menu
//! continues; nothing here aborts the session. The loop is generic over
//! `BufRead`/`Write` so whole sessions run against in-memory buffers in
//! tests.

use std::io::{self, BufRead, Write};

use registrar_core::{Admission, Registry};

/// Drive a menu session until quit or end of input, then tear the
/// registry down.
///
/// # Errors
///
/// Returns any I/O error raised by the input or output handle.
pub fn run<R, W>(input: &mut R, output: &mut W, registry: &mut Registry) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write_menu(output)?;
        let Some(choice) = read_line(input)? else { break };
        match choice.trim() {
            "" => {},
            "q" | "Q" => break,
            "1" => create_course(input, output, registry)?,
            "2" => create_student(input, output, registry)?,
            "3" => create_offering(input, output, registry)?,
            "4" => list(output, "List of courses:", &registry.list_courses())?,
            "5" => list(output, "List of students:", &registry.list_students())?,
            "6" => list(output, "List of offerings:", &registry.list_offerings())?,
            "7" => add_prerequisite(input, output, registry)?,
            "8" => add_course_to_student(input, output, registry)?,
            "9" => enroll(input, output, registry)?,
            "10" => course_detail(input, output, registry)?,
            "11" => student_detail(input, output, registry)?,
            "12" => offering_detail(input, output, registry)?,
            other => writeln!(output, "Unrecognized choice: {other}")?,
        }
    }
    registry.clear();
    Ok(())
}

fn write_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "What would you like to do?")?;
    writeln!(output, "  1) Create a course")?;
    writeln!(output, "  2) Create a student")?;
    writeln!(output, "  3) Create a course offering")?;
    writeln!(output, "  4) List courses")?;
    writeln!(output, "  5) List students")?;
    writeln!(output, "  6) List offerings")?;
    writeln!(output, "  7) Add a prerequisite to a course")?;
    writeln!(output, "  8) Add a course to a student")?;
    writeln!(output, "  9) Enroll a student in an offering")?;
    writeln!(output, " 10) Course details")?;
    writeln!(output, " 11) Student details")?;
    writeln!(output, " 12) Offering details")?;
    writeln!(output, "  q) Quit")?;
    writeln!(output)?;
    write!(output, "Your choice: ")?;
    output.flush()
}

/// Read one line, stripped of its terminator. `None` means end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    read_line(input)
}

/// Prompt for a number, re-prompting until one parses or input ends.
fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<u32>> {
    loop {
        let Some(line) = prompt(input, output, label)? else { return Ok(None) };
        match line.trim().parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(output, "Please enter a number.")?,
        }
    }
}

fn list<W: Write>(output: &mut W, heading: &str, entries: &[String]) -> io::Result<()> {
    writeln!(output, "{heading}")?;
    for entry in entries {
        writeln!(output, "  {entry}")?;
    }
    Ok(())
}

fn create_course<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "Enter name: ")? else { return Ok(()) };
    let Some(description) = prompt(input, output, "Enter description: ")? else { return Ok(()) };
    let Some(duration) = prompt_number(input, output, "Enter length of course: ")? else {
        return Ok(());
    };
    match registry.create_course(name.trim(), description.trim(), duration) {
        Ok(_) => writeln!(output, "Course created."),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn create_student<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "Enter name: ")? else { return Ok(()) };
    let Some(ssn) = prompt(input, output, "Enter ssn: ")? else { return Ok(()) };
    let Some(age) = prompt_number(input, output, "Enter age: ")? else { return Ok(()) };
    match registry.create_student(name.trim(), ssn.trim(), age) {
        Ok(_) => writeln!(output, "Student created."),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn create_offering<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "Enter course: ")? else { return Ok(()) };
    let Some(course) = registry.find_course(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that course.");
    };
    let Some(room) = prompt(input, output, "Enter room: ")? else { return Ok(()) };
    let Some(date) = prompt(input, output, "Enter date: ")? else { return Ok(()) };
    match registry.create_offering(course, room.trim(), date.trim()) {
        Ok(_) => writeln!(output, "Offering created."),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn add_prerequisite<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "To which course? ")? else { return Ok(()) };
    let Some(course) = registry.find_course(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that course.");
    };
    let Some(name) = prompt(input, output, "Which prerequisite? ")? else { return Ok(()) };
    let Some(prereq) = registry.find_course(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that course.");
    };
    match registry.add_prerequisite(course, prereq) {
        Ok(()) => writeln!(output, "Prerequisite added."),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn add_course_to_student<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "To which student? ")? else { return Ok(()) };
    let Some(student) = registry.find_student(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that student.");
    };
    let Some(name) = prompt(input, output, "Which course? ")? else { return Ok(()) };
    let Some(course) = registry.find_course(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that course.");
    };
    match registry.add_course_to_student(student, course) {
        Ok(()) => writeln!(output, "Course added to student."),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn enroll<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &mut Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "To which course? ")? else { return Ok(()) };
    let Some(date) = prompt(input, output, "On which date? ")? else { return Ok(()) };
    let Some(offering) = registry.find_offering(name.trim(), date.trim()) else {
        return writeln!(output, "Sorry, cannot find that course offering.");
    };
    let Some(name) = prompt(input, output, "Which student? ")? else { return Ok(()) };
    let Some(student) = registry.find_student(name.trim()) else {
        return writeln!(output, "Sorry, cannot find that student.");
    };
    match registry.enroll(offering, student) {
        Ok(Admission::Admitted) => writeln!(output, "Student added to course offering."),
        Ok(Admission::Refused { .. }) => writeln!(
            output,
            "Admission refused: student does not have the necessary prerequisites."
        ),
        Err(error) => writeln!(output, "{error}"),
    }
}

fn course_detail<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "On which course? ")? else { return Ok(()) };
    match registry.course_detail(name.trim()) {
        Ok(detail) => writeln!(output, "{detail}"),
        Err(_) => writeln!(output, "Sorry, cannot find that course."),
    }
}

fn student_detail<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "On which student? ")? else { return Ok(()) };
    match registry.student_detail(name.trim()) {
        Ok(detail) => writeln!(output, "{detail}"),
        Err(_) => writeln!(output, "Sorry, cannot find that student."),
    }
}

fn offering_detail<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &Registry,
) -> io::Result<()> {
    let Some(name) = prompt(input, output, "On which course? ")? else { return Ok(()) };
    let Some(date) = prompt(input, output, "Which date? ")? else { return Ok(()) };
    match registry.offering_detail(name.trim(), date.trim()) {
        Ok(detail) => writeln!(output, "{detail}"),
        Err(_) => writeln!(output, "Sorry, cannot find that course offering."),
    }
}
