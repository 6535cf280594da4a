use serde::Serialize;

/// Account profiles, keyed by the numeric profile id stored on the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Governor,
    SecretaryGeneral,
    Coordinator,
    PoleHead,
    Pacha,
    CircleHead,
}

/// Which dashboard a role lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    Admin,
    Governor,
    Coordinator,
    PoleHead,
    Pacha,
}

/// The slice of project data an account may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    Global,
    Pole { pole_id: i64 },
    Circle { code_cercle: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown profile id {0}")]
    UnknownProfile(i32),
    #[error("Account is not attached to a pole")]
    MissingPole,
    #[error("Account is not attached to a pachalik")]
    MissingCircle,
    #[error("Access reserved to the governor and the secretary general")]
    GlobalViewRequired,
}

impl Role {
    pub fn from_profile_id(profile_id: i32) -> Result<Self, AccessError> {
        match profile_id {
            1 => Ok(Role::Administrator),
            2 => Ok(Role::Governor),
            3 => Ok(Role::SecretaryGeneral),
            4 => Ok(Role::Coordinator),
            5 => Ok(Role::PoleHead),
            7 => Ok(Role::Pacha),
            8 => Ok(Role::CircleHead),
            other => Err(AccessError::UnknownProfile(other)),
        }
    }

    pub fn profile_id(self) -> i32 {
        match self {
            Role::Administrator => 1,
            Role::Governor => 2,
            Role::SecretaryGeneral => 3,
            Role::Coordinator => 4,
            Role::PoleHead => 5,
            Role::Pacha => 7,
            Role::CircleHead => 8,
        }
    }

    pub fn dashboard(self) -> DashboardKind {
        match self {
            Role::Administrator => DashboardKind::Admin,
            Role::Governor | Role::SecretaryGeneral => DashboardKind::Governor,
            Role::Coordinator => DashboardKind::Coordinator,
            Role::PoleHead => DashboardKind::PoleHead,
            Role::Pacha | Role::CircleHead => DashboardKind::Pacha,
        }
    }

    /// Administrator, governor and secretary general see every pole.
    pub fn has_global_view(self) -> bool {
        matches!(self, Role::Administrator | Role::Governor | Role::SecretaryGeneral)
    }

    /// Governor and secretary general follow the instructions they issued;
    /// every other role sees the whole instruction register.
    pub fn tracks_own_instructions(self) -> bool {
        matches!(self, Role::Governor | Role::SecretaryGeneral)
    }

    pub fn require_global_view(self) -> Result<(), AccessError> {
        if self.has_global_view() {
            Ok(())
        } else {
            Err(AccessError::GlobalViewRequired)
        }
    }

    /// Resolves the data scope from the account's organizational attachment.
    pub fn scope(self, pole_id: Option<i64>, code_cercle: Option<&str>) -> Result<Scope, AccessError> {
        match self {
            Role::Administrator | Role::Governor | Role::SecretaryGeneral => Ok(Scope::Global),
            Role::Coordinator | Role::PoleHead => pole_id
                .map(|pole_id| Scope::Pole { pole_id })
                .ok_or(AccessError::MissingPole),
            Role::Pacha | Role::CircleHead => code_cercle
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| Scope::Circle {
                    code_cercle: code.to_string(),
                })
                .ok_or(AccessError::MissingCircle),
        }
    }
}

impl Scope {
    pub fn pole_id(&self) -> Option<i64> {
        match self {
            Scope::Pole { pole_id } => Some(*pole_id),
            _ => None,
        }
    }

    pub fn code_cercle(&self) -> Option<&str> {
        match self {
            Scope::Circle { code_cercle } => Some(code_cercle),
            _ => None,
        }
    }
}
