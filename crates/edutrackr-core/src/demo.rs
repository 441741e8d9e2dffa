//! Static demo data backing every screen.
//!
//! This is a mock-data portal: nothing here is fetched or persisted.
//! Dates that read as "upcoming" are computed relative to today so the
//! demo never looks stale.

use chrono::{Datelike, Duration, Local};

/// Per-subject attendance summary.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub subject: &'static str,
    pub percentage: u32,
    pub attended: u32,
    pub total: u32,
}

/// One exam result in the marks series.
#[derive(Debug, Clone)]
pub struct MarkRecord {
    pub exam: &'static str,
    pub marks: u32,
}

/// An upcoming exam, dated relative to today.
#[derive(Debug, Clone)]
pub struct UpcomingExam {
    pub name: &'static str,
    pub subject: &'static str,
    pub days_away: i64,
}

impl UpcomingExam {
    /// "Oct 24, 2023"-style date label.
    pub fn date_label(&self) -> String {
        let date = Local::now().date_naive() + Duration::days(self.days_away);
        format!("{} {}, {}", month_abbrev(date.month()), date.day(), date.year())
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub title: &'static str,
    pub subject: &'static str,
    pub due: &'static str,
    pub completed: bool,
}

/// One timetable slot.
#[derive(Debug, Clone)]
pub struct ClassSession {
    pub subject: &'static str,
    pub time: &'static str,
    pub duration: &'static str,
    pub room: &'static str,
    pub teacher: &'static str,
    pub kind: SessionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Lecture,
    Lab,
    Tutorial,
}

impl SessionKind {
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lecture",
            SessionKind::Lab => "Lab",
            SessionKind::Tutorial => "Tutorial",
        }
    }
}

/// A seeded chat message.
#[derive(Debug, Clone)]
pub struct ChatSeed {
    pub sender: &'static str,
    pub body: &'static str,
    pub is_me: bool,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub title: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn label(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub student: &'static str,
    pub reason: &'static str,
    pub days: &'static str,
    pub dates: &'static str,
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: &'static str,
    pub xp: u32,
    pub trend: Trend,
}

#[derive(Debug, Clone)]
pub struct BadgeInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// A potential study partner for the matching screen.
#[derive(Debug, Clone)]
pub struct StudyPartner {
    pub name: &'static str,
    pub subjects: &'static [&'static str],
    pub compatibility: u32,
}

/// A roster entry for attendance marking.
#[derive(Debug, Clone)]
pub struct RosterStudent {
    pub name: &'static str,
    pub roll: &'static str,
}

pub fn attendance() -> Vec<AttendanceRecord> {
    vec![
        AttendanceRecord { subject: "Physics", percentage: 88, attended: 44, total: 50 },
        AttendanceRecord { subject: "Calculus II", percentage: 92, attended: 46, total: 50 },
        AttendanceRecord { subject: "Computer Science", percentage: 85, attended: 34, total: 40 },
        AttendanceRecord { subject: "Chemistry", percentage: 76, attended: 38, total: 50 },
    ]
}

/// Overall attendance percentage shown on the dashboards.
pub fn overall_attendance() -> u32 {
    85
}

pub fn marks_series() -> Vec<MarkRecord> {
    vec![
        MarkRecord { exam: "Test 1", marks: 65 },
        MarkRecord { exam: "Test 2", marks: 72 },
        MarkRecord { exam: "Mid", marks: 85 },
        MarkRecord { exam: "Test 3", marks: 82 },
        MarkRecord { exam: "Final", marks: 90 },
    ]
}

pub fn upcoming_exams() -> Vec<UpcomingExam> {
    vec![
        UpcomingExam { name: "Physics Mid-Term", subject: "Physics", days_away: 5 },
        UpcomingExam { name: "Calculus Final", subject: "Mathematics", days_away: 14 },
    ]
}

pub fn assignments() -> Vec<Assignment> {
    vec![
        Assignment {
            title: "Calculus Worksheet 4.2",
            subject: "Math",
            due: "Tomorrow",
            completed: false,
        },
        Assignment {
            title: "React Project Proposal",
            subject: "CS",
            due: "In 2 days",
            completed: false,
        },
        Assignment {
            title: "History Essay Draft",
            subject: "History",
            due: "Next Week",
            completed: true,
        },
    ]
}

/// Weekday labels for the timetable, Monday first.
pub const WEEK_DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Index into [`WEEK_DAYS`] for today, clamped to Monday on weekends.
pub fn today_day_index() -> usize {
    let weekday = Local::now().date_naive().weekday().num_days_from_monday() as usize;
    if weekday < WEEK_DAYS.len() { weekday } else { 0 }
}

pub fn timetable(day: usize) -> Vec<ClassSession> {
    match day {
        0 => vec![
            ClassSession { subject: "Physics", time: "09:00 AM", duration: "1h", room: "Room 301", teacher: "Dr. Smith", kind: SessionKind::Lecture },
            ClassSession { subject: "Calculus II", time: "10:15 AM", duration: "1.5h", room: "Room 104", teacher: "Prof. Johnson", kind: SessionKind::Lecture },
            ClassSession { subject: "Computer Science", time: "01:00 PM", duration: "2h", room: "Lab 2", teacher: "Ms. Davis", kind: SessionKind::Lab },
        ],
        1 => vec![
            ClassSession { subject: "English Lit", time: "09:00 AM", duration: "1h", room: "Room 205", teacher: "Mr. White", kind: SessionKind::Lecture },
            ClassSession { subject: "Physics", time: "11:00 AM", duration: "1h", room: "Room 301", teacher: "Dr. Smith", kind: SessionKind::Lecture },
        ],
        2 => vec![
            ClassSession { subject: "Chemistry", time: "10:00 AM", duration: "1.5h", room: "Lab 1", teacher: "Mrs. Green", kind: SessionKind::Lab },
            ClassSession { subject: "History", time: "02:00 PM", duration: "1h", room: "Room 402", teacher: "Mr. Black", kind: SessionKind::Lecture },
        ],
        3 => vec![
            ClassSession { subject: "Calculus II", time: "09:00 AM", duration: "1h", room: "Room 104", teacher: "Prof. Johnson", kind: SessionKind::Tutorial },
            ClassSession { subject: "Computer Science", time: "10:30 AM", duration: "1h", room: "Room 201", teacher: "Ms. Davis", kind: SessionKind::Lecture },
        ],
        _ => vec![
            ClassSession { subject: "Physical Ed", time: "08:00 AM", duration: "1h", room: "Field A", teacher: "Coach T", kind: SessionKind::Lecture },
            ClassSession { subject: "Library", time: "10:00 AM", duration: "2h", room: "Main Lib", teacher: "-", kind: SessionKind::Tutorial },
        ],
    }
}

/// Seed conversation for the parent-teacher chat.
pub fn parent_chat() -> Vec<ChatSeed> {
    vec![
        ChatSeed {
            sender: "Teacher",
            body: "Hello! Alex missed the first period today. Is everything okay?",
            is_me: false,
        },
        ChatSeed {
            sender: "Me",
            body: "Hi, yes, he had a dental appointment. He should be there by 10 AM.",
            is_me: true,
        },
    ]
}

pub fn notices() -> Vec<Notice> {
    vec![
        Notice { title: "Holiday Declaration", date: "Oct 20" },
        Notice { title: "Exam Schedule Released", date: "Oct 18" },
    ]
}

pub fn leave_requests() -> Vec<LeaveRequest> {
    vec![
        LeaveRequest {
            student: "Sarah Smith",
            reason: "Medical (Fever)",
            days: "2 Days",
            dates: "24-25 Oct",
            status: LeaveStatus::Pending,
        },
        LeaveRequest {
            student: "John Doe",
            reason: "Family Function",
            days: "1 Day",
            dates: "28 Oct",
            status: LeaveStatus::Pending,
        },
        LeaveRequest {
            student: "Emily Davis",
            reason: "Personal",
            days: "3 Days",
            dates: "1-3 Nov",
            status: LeaveStatus::Pending,
        },
    ]
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
    vec![
        LeaderboardEntry { rank: 1, name: "Chloe Price", xp: 2450, trend: Trend::Up },
        LeaderboardEntry { rank: 2, name: "Alex Johnson", xp: 2320, trend: Trend::Same },
        LeaderboardEntry { rank: 3, name: "Liam D.", xp: 2100, trend: Trend::Down },
        LeaderboardEntry { rank: 4, name: "Sarah S.", xp: 1950, trend: Trend::Up },
    ]
}

pub fn badges() -> Vec<BadgeInfo> {
    vec![
        BadgeInfo { name: "Early Bird", icon: "🌅", description: "Complete a study session before 7 AM", unlocked: true },
        BadgeInfo { name: "Quiz Master", icon: "🧠", description: "Score 100% on 3 consecutive quizzes", unlocked: true },
        BadgeInfo { name: "7 Day Streak", icon: "🔥", description: "Study for 7 days in a row", unlocked: true },
        BadgeInfo { name: "Night Owl", icon: "🦉", description: "Study past midnight", unlocked: false },
        BadgeInfo { name: "Helper", icon: "🤝", description: "Share notes with 5 friends", unlocked: false },
        BadgeInfo { name: "Marathon", icon: "🏃", description: "Study for 4 hours in one day", unlocked: false },
    ]
}

pub fn study_partners() -> Vec<StudyPartner> {
    vec![
        StudyPartner { name: "Chloe Price", subjects: &["Physics", "Calculus"], compatibility: 94 },
        StudyPartner { name: "Max C.", subjects: &["History", "Literature"], compatibility: 81 },
        StudyPartner { name: "Liam D.", subjects: &["Chemistry", "Biology"], compatibility: 77 },
    ]
}

pub fn affirmations() -> &'static [&'static str] {
    &[
        "You are capable of amazing things.",
        "Progress over perfection, every single day.",
        "One chapter at a time. You're doing great.",
        "Take a deep breath. You got this.",
    ]
}

/// Mood options for the wellness check-in.
pub fn moods() -> &'static [&'static str] {
    &["😄", "🙂", "😐", "😔", "😫"]
}

/// Breathing cycle phases as (label, seconds).
pub fn breathing_cycle() -> &'static [(&'static str, u64)] {
    &[("Inhale", 4), ("Hold", 4), ("Exhale", 4)]
}

pub fn class_roster() -> Vec<RosterStudent> {
    vec![
        RosterStudent { name: "Alex Johnson", roll: "45" },
        RosterStudent { name: "Sarah Smith", roll: "46" },
        RosterStudent { name: "Michael Brown", roll: "47" },
        RosterStudent { name: "Emily Davis", roll: "48" },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timetable_covers_every_weekday() {
        for day in 0..WEEK_DAYS.len() {
            assert!(!timetable(day).is_empty(), "no sessions for {}", WEEK_DAYS[day]);
        }
    }

    #[test]
    fn today_day_index_is_always_a_weekday() {
        assert!(today_day_index() < WEEK_DAYS.len());
    }

    #[test]
    fn exam_dates_render_relative_to_today() {
        let exam = UpcomingExam { name: "X", subject: "Y", days_away: 0 };
        let today = Local::now().date_naive();
        assert!(exam.date_label().contains(&today.year().to_string()));
    }

    #[test]
    fn leaderboard_ranks_are_sequential() {
        let entries = leaderboard();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.rank as usize, i + 1);
        }
    }
}
