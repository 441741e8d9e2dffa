//! The three-step login flow state machine.
//!
//! `RoleSelection -> DetailsForm -> CodeVerification -> identity published`.
//! Steps after role selection carry the chosen role in their payload, so a
//! details form or code prompt without a role cannot be represented.
//!
//! The two submissions are split into begin/complete pairs: `begin_*`
//! validates and raises the busy flag, the caller runs the asynchronous
//! step (simulated latency), and `complete_*` advances the machine. At
//! most one step is in flight per flow; a second `begin_*` while busy is
//! rejected. Backward navigation abandons any in-flight step.

use serde::{Deserialize, Serialize};

use crate::identity::{Identity, Role};

/// Number of verification code slots.
pub const CODE_LEN: usize = 4;

/// Current position in the login sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    RoleSelection,
    DetailsForm { role: Role },
    CodeVerification { role: Role },
}

/// Role-dependent form payload. All fields exist on every flow; which of
/// them are required depends on the chosen role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub id: String,
    pub section: String,
    pub phone: String,
    pub password: String,
}

/// A single form field, used for focus handling and validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Id,
    Section,
    Phone,
    Password,
}

impl FormField {
    /// Fields required for a role, in display order.
    pub fn required_for(role: Role) -> &'static [FormField] {
        match role {
            Role::Student => &[FormField::Name, FormField::Id, FormField::Section],
            Role::Parent => &[FormField::Name, FormField::Phone],
            Role::College => &[FormField::Id, FormField::Password],
        }
    }

    pub fn label(self, role: Role) -> &'static str {
        match (self, role) {
            (FormField::Name, Role::Parent) => "Parent Name",
            (FormField::Name, _) => "Student Name",
            (FormField::Id, Role::College) => "Employee ID",
            (FormField::Id, _) => "College ID",
            (FormField::Section, _) => "Class Section",
            (FormField::Phone, _) => "Phone Number",
            (FormField::Password, _) => "Password",
        }
    }

    /// Whether the field should be rendered masked.
    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Password)
    }
}

impl LoginForm {
    fn clear(&mut self) {
        *self = LoginForm::default();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Id => &self.id,
            FormField::Section => &self.section,
            FormField::Phone => &self.phone,
            FormField::Password => &self.password,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Id => &mut self.id,
            FormField::Section => &mut self.section,
            FormField::Phone => &mut self.phone,
            FormField::Password => &mut self.password,
        }
    }
}

/// Rejection reasons for login flow operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// An asynchronous step is already in flight.
    Busy,
    /// The operation is not valid for the current step.
    Step { operation: &'static str },
    /// A required form field is empty.
    MissingField { label: &'static str },
    /// The verification code has empty slots.
    IncompleteCode,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::Busy => write!(f, "A submission is already in progress"),
            LoginError::Step { operation } => {
                write!(f, "{operation} is not available at this step")
            }
            LoginError::MissingField { label } => write!(f, "{label} is required"),
            LoginError::IncompleteCode => write!(f, "Enter all four code digits"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Result of writing into a code slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEntry {
    /// The slot was updated; focus should move to `advance_to` if set.
    Accepted { advance_to: Option<usize> },
    /// Multi-character or out-of-range input; buffer and focus unchanged.
    Rejected,
}

/// Login flow state. Created fresh whenever no identity is held.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    step: LoginStep,
    form: LoginForm,
    code: [Option<char>; CODE_LEN],
    busy: bool,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            step: LoginStep::RoleSelection,
            form: LoginForm::default(),
            code: [None; CODE_LEN],
            busy: false,
        }
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    /// The chosen role, if role selection has completed.
    pub fn role(&self) -> Option<Role> {
        match self.step {
            LoginStep::RoleSelection => None,
            LoginStep::DetailsForm { role } | LoginStep::CodeVerification { role } => Some(role),
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LoginForm {
        &mut self.form
    }

    pub fn code(&self) -> &[Option<char>; CODE_LEN] {
        &self.code
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Resets the whole flow back to role selection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Chooses a role and advances to the details form.
    ///
    /// Re-selection is idempotent: any prior form payload and code buffer
    /// are cleared.
    pub fn select_role(&mut self, role: Role) {
        self.step = LoginStep::DetailsForm { role };
        self.form.clear();
        self.code = [None; CODE_LEN];
        self.busy = false;
    }

    /// Returns from the details form to role selection, clearing the
    /// chosen role. No-op anywhere else.
    pub fn return_to_role_selection(&mut self) {
        if let LoginStep::DetailsForm { .. } = self.step {
            self.reset();
        }
    }

    /// Returns from code verification to the details form, keeping the
    /// form payload. Abandons any in-flight submission.
    pub fn return_to_details(&mut self) {
        if let LoginStep::CodeVerification { role } = self.step {
            self.step = LoginStep::DetailsForm { role };
            self.code = [None; CODE_LEN];
            self.busy = false;
        }
    }

    /// Validates the details form and raises the busy flag.
    ///
    /// The caller is expected to run the verification dispatch (simulated
    /// latency) and then call [`LoginFlow::complete_details_submission`].
    ///
    /// # Errors
    /// Rejects when not on the details form, when a submission is already
    /// in flight, or when a required field for the chosen role is empty.
    pub fn begin_details_submission(&mut self) -> Result<(), LoginError> {
        let LoginStep::DetailsForm { role } = self.step else {
            return Err(LoginError::Step {
                operation: "Submitting details",
            });
        };
        if self.busy {
            return Err(LoginError::Busy);
        }
        for field in FormField::required_for(role) {
            if self.form.get(*field).trim().is_empty() {
                return Err(LoginError::MissingField {
                    label: field.label(role),
                });
            }
        }
        self.busy = true;
        Ok(())
    }

    /// Advances to code verification after the dispatch delay.
    ///
    /// Returns false (and changes nothing) when the flow is no longer
    /// waiting on this step, e.g. after backward navigation.
    pub fn complete_details_submission(&mut self) -> bool {
        match self.step {
            LoginStep::DetailsForm { role } if self.busy => {
                self.step = LoginStep::CodeVerification { role };
                self.code = [None; CODE_LEN];
                self.busy = false;
                true
            }
            _ => false,
        }
    }

    /// Writes a single character into a code slot.
    ///
    /// Multi-character input is rejected without touching the buffer.
    /// An empty string clears the slot. Focus advances after a non-empty
    /// write to any slot but the last.
    pub fn set_code_slot(&mut self, position: usize, value: &str) -> CodeEntry {
        if !matches!(self.step, LoginStep::CodeVerification { .. }) || position >= CODE_LEN {
            return CodeEntry::Rejected;
        }
        let mut chars = value.chars();
        let first = chars.next();
        if chars.next().is_some() {
            return CodeEntry::Rejected;
        }
        self.code[position] = first;
        let advance_to = match first {
            Some(_) if position < CODE_LEN - 1 => Some(position + 1),
            _ => None,
        };
        CodeEntry::Accepted { advance_to }
    }

    /// True when every code slot is filled.
    pub fn code_complete(&self) -> bool {
        self.code.iter().all(Option::is_some)
    }

    /// Validates the code buffer and raises the busy flag.
    ///
    /// The caller runs the authentication delay and then calls
    /// [`LoginFlow::complete_code_submission`].
    ///
    /// # Errors
    /// Rejects when not on code verification, when a submission is
    /// already in flight, or when any slot is empty.
    pub fn begin_code_submission(&mut self) -> Result<(), LoginError> {
        if !matches!(self.step, LoginStep::CodeVerification { .. }) {
            return Err(LoginError::Step {
                operation: "Submitting the code",
            });
        }
        if self.busy {
            return Err(LoginError::Busy);
        }
        if !self.code_complete() {
            return Err(LoginError::IncompleteCode);
        }
        self.busy = true;
        Ok(())
    }

    /// Publishes the identity after the authentication delay and resets
    /// the flow for a future login cycle.
    ///
    /// Returns None (and changes nothing) when the flow is no longer
    /// waiting on this step.
    pub fn complete_code_submission(&mut self) -> Option<Identity> {
        match self.step {
            LoginStep::CodeVerification { role } if self.busy => {
                let identity = Identity::synthesize(role, &self.form.name, &self.form.id);
                self.reset();
                Some(identity)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_at_code_step(role: Role) -> LoginFlow {
        let mut flow = LoginFlow::new();
        flow.select_role(role);
        flow.form_mut().name = "Alex Johnson".to_string();
        flow.form_mut().id = "STU-2023-089".to_string();
        flow.form_mut().section = "12-A".to_string();
        flow.form_mut().phone = "+91 98765 43210".to_string();
        flow.form_mut().password = "hunter2".to_string();
        flow.begin_details_submission().unwrap();
        assert!(flow.complete_details_submission());
        flow
    }

    #[test]
    fn select_role_resets_form_and_code() {
        for role in Role::all() {
            let mut flow = LoginFlow::new();
            flow.form_mut().name = "stale".to_string();
            flow.select_role(role);
            assert_eq!(flow.step(), LoginStep::DetailsForm { role });
            assert_eq!(flow.role(), Some(role));
            assert_eq!(*flow.form(), LoginForm::default());
            assert_eq!(*flow.code(), [None; CODE_LEN]);
        }
    }

    #[test]
    fn details_submission_requires_role_fields() {
        let mut flow = LoginFlow::new();
        flow.select_role(Role::Student);
        assert_eq!(
            flow.begin_details_submission(),
            Err(LoginError::MissingField {
                label: "Student Name"
            })
        );

        flow.form_mut().name = "Alex".to_string();
        flow.form_mut().id = "STU-1".to_string();
        assert_eq!(
            flow.begin_details_submission(),
            Err(LoginError::MissingField {
                label: "Class Section"
            })
        );

        flow.form_mut().section = "12-A".to_string();
        assert!(flow.begin_details_submission().is_ok());
        assert!(flow.busy());
    }

    #[test]
    fn parent_and_staff_have_their_own_required_fields() {
        let mut flow = LoginFlow::new();
        flow.select_role(Role::Parent);
        flow.form_mut().name = "Mrs. Johnson".to_string();
        assert_eq!(
            flow.begin_details_submission(),
            Err(LoginError::MissingField {
                label: "Phone Number"
            })
        );

        flow.select_role(Role::College);
        flow.form_mut().id = "EMP-001".to_string();
        flow.form_mut().password = "secret".to_string();
        assert!(flow.begin_details_submission().is_ok());
    }

    #[test]
    fn double_submission_is_rejected_while_busy() {
        let mut flow = LoginFlow::new();
        flow.select_role(Role::College);
        flow.form_mut().id = "EMP-001".to_string();
        flow.form_mut().password = "secret".to_string();
        flow.begin_details_submission().unwrap();
        assert_eq!(flow.begin_details_submission(), Err(LoginError::Busy));
    }

    #[test]
    fn back_to_role_selection_only_from_details() {
        let mut flow = LoginFlow::new();
        flow.return_to_role_selection();
        assert_eq!(flow.step(), LoginStep::RoleSelection);

        flow.select_role(Role::Student);
        flow.return_to_role_selection();
        assert_eq!(flow.step(), LoginStep::RoleSelection);
        assert_eq!(flow.role(), None);

        // Not reachable from code verification.
        let mut flow = flow_at_code_step(Role::Student);
        flow.return_to_role_selection();
        assert!(matches!(flow.step(), LoginStep::CodeVerification { .. }));
    }

    #[test]
    fn back_to_details_keeps_the_form() {
        let mut flow = flow_at_code_step(Role::Student);
        flow.set_code_slot(0, "1");
        flow.return_to_details();
        assert_eq!(flow.step(), LoginStep::DetailsForm { role: Role::Student });
        assert_eq!(flow.form().name, "Alex Johnson");
        assert_eq!(*flow.code(), [None; CODE_LEN]);
    }

    #[test]
    fn code_slot_rejects_multi_character_input() {
        let mut flow = flow_at_code_step(Role::Student);
        assert_eq!(flow.set_code_slot(0, "12"), CodeEntry::Rejected);
        assert_eq!(flow.code()[0], None);
    }

    #[test]
    fn code_entry_advances_focus_except_at_last_slot() {
        let mut flow = flow_at_code_step(Role::Student);
        assert_eq!(
            flow.set_code_slot(0, "1"),
            CodeEntry::Accepted { advance_to: Some(1) }
        );
        assert_eq!(
            flow.set_code_slot(2, "3"),
            CodeEntry::Accepted { advance_to: Some(3) }
        );
        assert_eq!(
            flow.set_code_slot(3, "4"),
            CodeEntry::Accepted { advance_to: None }
        );
        // Clearing a slot never advances.
        assert_eq!(
            flow.set_code_slot(1, ""),
            CodeEntry::Accepted { advance_to: None }
        );
    }

    #[test]
    fn code_submission_requires_all_slots() {
        let mut flow = flow_at_code_step(Role::Student);
        for (i, digit) in ["1", "2", "3"].iter().enumerate() {
            flow.set_code_slot(i, digit);
        }
        assert_eq!(flow.begin_code_submission(), Err(LoginError::IncompleteCode));

        flow.set_code_slot(3, "4");
        assert!(flow.begin_code_submission().is_ok());
    }

    #[test]
    fn completed_flow_publishes_identity_and_resets() {
        let mut flow = flow_at_code_step(Role::Student);
        for (i, digit) in ["1", "2", "3", "4"].iter().enumerate() {
            flow.set_code_slot(i, digit);
        }
        flow.begin_code_submission().unwrap();
        let identity = flow.complete_code_submission().unwrap();

        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.name, "Alex Johnson");
        assert_eq!(identity.id, "STU-2023-089");
        // Ready for a future logout/login cycle.
        assert_eq!(flow.step(), LoginStep::RoleSelection);
        assert!(!flow.busy());
    }

    #[test]
    fn stale_completions_are_ignored_after_backward_navigation() {
        let mut flow = LoginFlow::new();
        flow.select_role(Role::College);
        flow.form_mut().id = "EMP-001".to_string();
        flow.form_mut().password = "secret".to_string();
        flow.begin_details_submission().unwrap();
        flow.return_to_role_selection();
        assert!(!flow.complete_details_submission());
        assert_eq!(flow.step(), LoginStep::RoleSelection);

        let mut flow = flow_at_code_step(Role::Parent);
        for i in 0..CODE_LEN {
            flow.set_code_slot(i, "7");
        }
        flow.begin_code_submission().unwrap();
        flow.return_to_details();
        assert_eq!(flow.complete_code_submission(), None);
    }
}
