use serde::{Deserialize, Serialize};

/// Access level a portal user signs in as. The set is closed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Supervisor,
    ProductionManager,
    Operator,
}

impl Role {
    /// Human-readable label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Supervisor => "Supervisor",
            Role::ProductionManager => "Production Manager",
            Role::Operator => "Operator",
        }
    }

    /// Badge style used for this role on the dashboard.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            Role::Supervisor => "default",
            Role::ProductionManager => "secondary",
            Role::Operator => "outline",
        }
    }

    /// Parse from the form / query-string value.
    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "supervisor" => Some(Role::Supervisor),
            "production_manager" => Some(Role::ProductionManager),
            "operator" => Some(Role::Operator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Supervisor => "supervisor",
            Role::ProductionManager => "production_manager",
            Role::Operator => "operator",
        }
    }

    /// All roles, in display order.
    pub fn all() -> &'static [Role] {
        &[Role::Supervisor, Role::ProductionManager, Role::Operator]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
