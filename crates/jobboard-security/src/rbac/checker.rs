//! Role checks over validated claims.

use crate::Claims;
use jobboard_core::{JobBoardError, JobBoardResult, UserId, UserRole};

/// Extension trait for Claims to check roles.
pub trait ClaimsExt {
    /// Requires a specific role.
    fn require_role(&self, role: UserRole) -> JobBoardResult<()>;

    /// Requires the user to be an admin.
    fn require_admin(&self) -> JobBoardResult<()> {
        self.require_role(UserRole::Admin)
    }

    /// Requires the user to be an applicant.
    fn require_applicant(&self) -> JobBoardResult<()> {
        self.require_role(UserRole::Applicant)
    }

    /// Requires the caller to be `user_id` or an admin.
    fn require_self_or_admin(&self, user_id: UserId) -> JobBoardResult<()>;
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: UserRole) -> JobBoardResult<()> {
        if self.role == role {
            Ok(())
        } else {
            let who = match role {
                UserRole::Admin => "Admin",
                UserRole::Applicant => "Applicant",
            };
            Err(JobBoardError::Forbidden(format!("{who} access required")))
        }
    }

    fn require_self_or_admin(&self, user_id: UserId) -> JobBoardResult<()> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(JobBoardError::Forbidden(
                "You don't have permission to access this resource".to_string(),
            ))
        }
    }
}
