//! The authenticated actor: role, display data, and role-keyed extras.

use serde::{Deserialize, Serialize};

/// Actor role. Immutable for the lifetime of an [`Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Parent,
    College,
}

impl Role {
    /// Human-readable label, as shown on the profile screen.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Parent => "Parent",
            Role::College => "College Staff",
        }
    }

    /// Placeholder display name used when the login form collected none.
    pub fn placeholder_name(self) -> &'static str {
        match self {
            Role::Student => "Alex Johnson",
            Role::Parent => "Mrs. Johnson",
            Role::College => "Admin Staff",
        }
    }

    pub fn all() -> [Role; 3] {
        [Role::Student, Role::Parent, Role::College]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Role-keyed extras. Gamification stats exist only for students; the
/// other roles carry nothing, which keeps callers from reading stats
/// that were never meaningful for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum RoleExtras {
    Student { level: u32, xp: u32, max_xp: u32 },
    Parent,
    College,
}

impl RoleExtras {
    fn defaults_for(role: Role) -> Self {
        match role {
            Role::Student => RoleExtras::Student {
                level: 12,
                xp: 2320,
                max_xp: 3000,
            },
            Role::Parent => RoleExtras::Parent,
            Role::College => RoleExtras::College,
        }
    }
}

/// The logged-in actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Avatar image reference (never fetched by this crate).
    pub avatar: String,
    pub extras: RoleExtras,
}

impl Identity {
    /// Synthesizes an identity at the end of a successful login flow.
    ///
    /// Empty name/id fields fall back to role-specific placeholders, the
    /// same way the simulated backend would fill in a demo account.
    pub fn synthesize(role: Role, name: &str, id: &str) -> Self {
        let name = if name.trim().is_empty() {
            role.placeholder_name().to_string()
        } else {
            name.trim().to_string()
        };
        let id = if id.trim().is_empty() {
            "1".to_string()
        } else {
            id.trim().to_string()
        };
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}&background=4F46E5&color=fff",
            urlencode(&name)
        );
        Self {
            id,
            name,
            role,
            avatar,
            extras: RoleExtras::defaults_for(role),
        }
    }

    /// First word of the display name, for "Welcome, Alex" greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Gamification level, present only for students.
    pub fn level(&self) -> Option<u32> {
        match self.extras {
            RoleExtras::Student { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Experience progress as (current, max), present only for students.
    pub fn xp_progress(&self) -> Option<(u32, u32)> {
        match self.extras {
            RoleExtras::Student { xp, max_xp, .. } => Some((xp, max_xp)),
            _ => None,
        }
    }
}

/// Minimal percent-encoding for the avatar URL query value.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_uses_form_values_when_present() {
        let identity = Identity::synthesize(Role::Student, "Alex Johnson", "STU-2023-089");
        assert_eq!(identity.name, "Alex Johnson");
        assert_eq!(identity.id, "STU-2023-089");
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.level(), Some(12));
        assert_eq!(identity.xp_progress(), Some((2320, 3000)));
        assert!(identity.avatar.contains("Alex+Johnson"));
    }

    #[test]
    fn synthesize_falls_back_to_role_placeholders() {
        let parent = Identity::synthesize(Role::Parent, "", "");
        assert_eq!(parent.name, "Mrs. Johnson");
        assert_eq!(parent.id, "1");
        assert_eq!(parent.extras, RoleExtras::Parent);
        assert_eq!(parent.level(), None);

        let staff = Identity::synthesize(Role::College, "  ", "EMP-001");
        assert_eq!(staff.name, "Admin Staff");
        assert_eq!(staff.id, "EMP-001");
        assert_eq!(staff.xp_progress(), None);
    }

    #[test]
    fn first_name_splits_on_whitespace() {
        let identity = Identity::synthesize(Role::Student, "Alex Johnson", "1");
        assert_eq!(identity.first_name(), "Alex");
    }
}
