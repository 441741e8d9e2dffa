//! View routing: the view enumeration, page titles, role-keyed
//! navigation sets, and screen dispatch.

use edutrackr_core::identity::Role;

/// Every screen the portal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Timetable,
    Assignments,
    Timer,
    Messages,
    Profile,
    AiPlanner,
    StudyTwin,
    StressManagement,
    SmartStudy,
    Gamification,
    LearningSwipe,
    Leaves,
    CollegeUpload,
    CollegeAttendance,
    CollegeMarks,
    CollegeNotices,
    CollegeLeaves,
}

/// Fallback page title when a view has no title of its own.
pub const APP_TITLE: &str = "EduTrackr";

/// Page title for a view.
pub fn title_for(view: View) -> &'static str {
    match view {
        View::Dashboard => "Dashboard",
        View::Timetable => "Schedule",
        View::Timer => "Focus Timer",
        View::AiPlanner => "Study Plan",
        View::Assignments => "Assignments",
        View::Messages => "Messages",
        View::StudyTwin => "StudyTwin",
        View::StressManagement => "Wellness",
        View::SmartStudy => "Smart Tools",
        View::Gamification => "Rankings",
        View::LearningSwipe => "Daily Learning",
        View::Profile => "Profile",
        View::CollegeAttendance => "Attendance",
        View::CollegeMarks => "Upload Marks",
        View::CollegeNotices => "Notices",
        View::CollegeLeaves => "Leave Requests",
        View::CollegeUpload => "Manage",
        View::Leaves => APP_TITLE,
    }
}

/// The fixed, ordered navigation affordance set for a role.
pub fn nav_items(role: Role) -> &'static [(View, &'static str)] {
    match role {
        Role::Student => &[
            (View::Dashboard, "Home"),
            (View::Timetable, "Schedule"),
            (View::SmartStudy, "Learn"),
            (View::StudyTwin, "Twin"),
            (View::StressManagement, "Wellness"),
        ],
        Role::Parent => &[
            (View::Dashboard, "Overview"),
            (View::Messages, "Chat"),
            (View::Leaves, "Leaves"),
            (View::Profile, "Profile"),
        ],
        Role::College => &[
            (View::Dashboard, "Admin"),
            (View::CollegeUpload, "Manage"),
            (View::Messages, "Notices"),
        ],
    }
}

/// Content collaborator resolved for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    StudentDashboard,
    ParentDashboard,
    CollegeDashboard,
    Timetable,
    Timer,
    AiPlanner,
    Assignments,
    Messages,
    StudyTwin,
    StressManagement,
    SmartStudy,
    Gamification,
    LearningSwipe,
    AttendanceMarker,
    MarksUpload,
    NoticeManager,
    LeaveApproval,
    Profile,
    /// "Work in progress" fallback offering a way back home.
    Placeholder,
}

/// Resolves the screen for a view. Only the dashboard is role-sensitive;
/// everything else maps 1:1 regardless of role.
pub fn dispatch(view: View, role: Role) -> Screen {
    match view {
        View::Dashboard => match role {
            Role::Student => Screen::StudentDashboard,
            Role::Parent => Screen::ParentDashboard,
            Role::College => Screen::CollegeDashboard,
        },
        View::Timetable => Screen::Timetable,
        View::Timer => Screen::Timer,
        View::AiPlanner => Screen::AiPlanner,
        View::Assignments => Screen::Assignments,
        View::Messages => Screen::Messages,
        View::StudyTwin => Screen::StudyTwin,
        View::StressManagement => Screen::StressManagement,
        View::SmartStudy => Screen::SmartStudy,
        View::Gamification => Screen::Gamification,
        View::LearningSwipe => Screen::LearningSwipe,
        View::CollegeAttendance => Screen::AttendanceMarker,
        View::CollegeMarks | View::CollegeUpload => Screen::MarksUpload,
        View::CollegeNotices => Screen::NoticeManager,
        View::CollegeLeaves => Screen::LeaveApproval,
        View::Profile => Screen::Profile,
        View::Leaves => Screen::Placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_dispatch_is_role_sensitive() {
        let student = dispatch(View::Dashboard, Role::Student);
        let parent = dispatch(View::Dashboard, Role::Parent);
        let college = dispatch(View::Dashboard, Role::College);
        assert_ne!(student, parent);
        assert_ne!(parent, college);
        assert_ne!(student, college);
    }

    #[test]
    fn non_dashboard_dispatch_ignores_role() {
        for role in Role::all() {
            assert_eq!(dispatch(View::Messages, role), Screen::Messages);
            assert_eq!(dispatch(View::Timer, role), Screen::Timer);
            assert_eq!(dispatch(View::CollegeMarks, role), Screen::MarksUpload);
        }
    }

    #[test]
    fn upload_shares_the_marks_screen() {
        assert_eq!(
            dispatch(View::CollegeUpload, Role::College),
            dispatch(View::CollegeMarks, Role::College)
        );
    }

    #[test]
    fn unlinked_view_falls_back_to_placeholder() {
        assert_eq!(dispatch(View::Leaves, Role::Parent), Screen::Placeholder);
        assert_eq!(title_for(View::Leaves), APP_TITLE);
    }

    #[test]
    fn nav_sets_are_fixed_per_role() {
        let student: Vec<&str> = nav_items(Role::Student).iter().map(|(_, l)| *l).collect();
        assert_eq!(student, ["Home", "Schedule", "Learn", "Twin", "Wellness"]);

        let parent: Vec<View> = nav_items(Role::Parent).iter().map(|(v, _)| *v).collect();
        assert_eq!(
            parent,
            [View::Dashboard, View::Messages, View::Leaves, View::Profile]
        );

        let college = nav_items(Role::College);
        assert_eq!(college.len(), 3);
        assert_eq!(college[1], (View::CollegeUpload, "Manage"));
    }

    #[test]
    fn every_view_has_a_title() {
        // The placeholder-only view reads as the app name; everything else
        // names its screen.
        assert_eq!(title_for(View::Gamification), "Rankings");
        assert_eq!(title_for(View::CollegeUpload), "Manage");
        assert_eq!(title_for(View::StressManagement), "Wellness");
    }
}
