//! # Roster & Schedule Domain Types
//!
//! Students, faculty, class sections, and the weekly timetable. The demo
//! deployment ships a seeded in-memory roster; there is no persistence
//! layer behind it. All wire representations are camelCase.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ids::{ClassId, FacultyId, StudentId};

/// Running attendance tally for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Total sessions held.
    pub total: u32,
    /// Sessions the student attended.
    pub attended: u32,
}

impl AttendanceSummary {
    /// Attendance percentage, rounded to the nearest whole percent.
    /// Zero sessions held reads as 0%.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.attended as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Registrar-assigned identifier.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Avatar image path.
    pub avatar: String,
    /// Running attendance tally.
    pub attendance: AttendanceSummary,
}

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Registrar-assigned identifier.
    pub id: FacultyId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Avatar image path.
    pub avatar: String,
    /// Classes this faculty member teaches.
    pub classes: Vec<ClassId>,
}

/// Weekly schedule for a class section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    /// Day of week the section meets.
    pub day: Weekday,
    /// Scheduled start, local wall-clock time.
    pub start_time: NaiveTime,
    /// Scheduled end, local wall-clock time.
    pub end_time: NaiveTime,
}

/// A class section with its enrolled students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    /// Registrar-assigned identifier.
    pub id: ClassId,
    /// Course name.
    pub name: String,
    /// Teaching faculty member.
    pub faculty_id: FacultyId,
    /// Enrolled student identifiers.
    pub students: Vec<StudentId>,
    /// Weekly meeting schedule.
    pub schedule: ClassSchedule,
}

/// One entry in the published weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    /// Display time range, e.g. `09:00 - 10:00`.
    pub time: String,
    /// Course name.
    pub class_name: String,
    /// Teaching faculty display name.
    pub faculty_name: String,
    /// Room assignment.
    pub room: String,
}

/// The full roster: students, faculty, class sections, and the published
/// timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// All registered students.
    pub students: Vec<Student>,
    /// All faculty members.
    pub faculty: Vec<Faculty>,
    /// All class sections.
    pub classes: Vec<ClassSection>,
    /// Published weekly timetable, keyed by weekday.
    pub timetable: Vec<(Weekday, Vec<TimetableSlot>)>,
}

impl Roster {
    /// Look up a student by identifier.
    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// Look up a faculty member by identifier.
    pub fn faculty_member(&self, id: &FacultyId) -> Option<&Faculty> {
        self.faculty.iter().find(|f| &f.id == id)
    }

    /// Look up a class section by identifier.
    pub fn class_section(&self, id: &ClassId) -> Option<&ClassSection> {
        self.classes.iter().find(|c| &c.id == id)
    }
}

// Seed-data constructors. The demo identifiers follow the registrar
// convention and are valid by construction, so the unwraps below cannot
// fire; they are confined to this seed path.
#[allow(clippy::unwrap_used)]
fn student(id: &str, name: &str, email: &str, avatar: &str, total: u32, attended: u32) -> Student {
    Student {
        id: StudentId::new(id).unwrap(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: avatar.to_string(),
        attendance: AttendanceSummary { total, attended },
    }
}

#[allow(clippy::unwrap_used)]
fn faculty(id: &str, name: &str, email: &str, avatar: &str, classes: &[&str]) -> Faculty {
    Faculty {
        id: FacultyId::new(id).unwrap(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: avatar.to_string(),
        classes: classes.iter().map(|c| ClassId::new(*c).unwrap()).collect(),
    }
}

#[allow(clippy::unwrap_used)]
fn section(
    id: &str,
    name: &str,
    faculty_id: &str,
    students: &[&str],
    day: Weekday,
    start: (u32, u32),
    end: (u32, u32),
) -> ClassSection {
    ClassSection {
        id: ClassId::new(id).unwrap(),
        name: name.to_string(),
        faculty_id: FacultyId::new(faculty_id).unwrap(),
        students: students.iter().map(|s| StudentId::new(*s).unwrap()).collect(),
        schedule: ClassSchedule {
            day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        },
    }
}

fn slot(time: &str, class_name: &str, faculty_name: &str, room: &str) -> TimetableSlot {
    TimetableSlot {
        time: time.to_string(),
        class_name: class_name.to_string(),
        faculty_name: faculty_name.to_string(),
        room: room.to_string(),
    }
}

/// Build the seeded demo roster.
pub fn seed() -> Roster {
    Roster {
        students: vec![
            student("S001", "Alice Johnson", "alice@example.com", "/avatars/01.png", 20, 18),
            student("S002", "Bob Williams", "bob@example.com", "/avatars/02.png", 20, 15),
            student("S003", "Charlie Brown", "charlie@example.com", "/avatars/03.png", 20, 19),
            student("S004", "Diana Miller", "diana@example.com", "/avatars/04.png", 20, 20),
            student("S005", "Ethan Davis", "ethan@example.com", "/avatars/05.png", 20, 12),
        ],
        faculty: vec![
            faculty("F01", "Dr. Alan Grant", "grant@example.com", "/avatars/f01.png", &["C01", "C03"]),
            faculty("F02", "Dr. Ellie Sattler", "sattler@example.com", "/avatars/f02.png", &["C02"]),
        ],
        classes: vec![
            section(
                "C01",
                "Computer Science 101",
                "F01",
                &["S001", "S002", "S003"],
                Weekday::Mon,
                (9, 0),
                (10, 0),
            ),
            section(
                "C02",
                "Mathematics 202",
                "F02",
                &["S001", "S004", "S005"],
                Weekday::Tue,
                (11, 0),
                (12, 0),
            ),
            section(
                "C03",
                "Advanced Algorithms",
                "F01",
                &["S002", "S003", "S004", "S005"],
                Weekday::Mon,
                (14, 0),
                (15, 0),
            ),
        ],
        timetable: vec![
            (
                Weekday::Mon,
                vec![
                    slot("09:00 - 10:00", "Computer Science 101", "Dr. Alan Grant", "A-101"),
                    slot("14:00 - 15:00", "Advanced Algorithms", "Dr. Alan Grant", "A-102"),
                ],
            ),
            (
                Weekday::Tue,
                vec![slot("11:00 - 12:00", "Mathematics 202", "Dr. Ellie Sattler", "B-201")],
            ),
            (Weekday::Wed, vec![]),
            (
                Weekday::Thu,
                vec![slot("10:00 - 11:00", "Data Structures", "Dr. Alan Grant", "A-101")],
            ),
            (
                Weekday::Fri,
                vec![slot("13:00 - 14:00", "Calculus III", "Dr. Ellie Sattler", "B-201")],
            ),
        ],
    }
}
