// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Session expiry is measured against the real wall clock. A simulated date
//! never extends or shortens a session.

use stepline_persistence::{OperatorData, Persistence, PersistenceError, SessionData};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::error::AuthError;

/// Operator roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Studio owners and managers.
    ///
    /// Admins may additionally:
    /// - set and clear the simulated date
    /// - wipe all business data
    /// - seed demo data and generate test scenarios
    Admin,
    /// Front-desk staff.
    ///
    /// Staff may read simulation status, table counts and listings.
    Staff,
}

impl Role {
    /// The stored name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
        }
    }

    /// Parses a stored role name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The operator's login name.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may set or clear the simulated date.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_simulation_control(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "simulation_control")
    }

    /// Checks if an actor may wipe all business data.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_wipe(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "wipe_all_business_data")
    }

    /// Checks if an actor may seed demo data.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_seed(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "seed_demo_data")
    }

    /// Checks if an actor may generate test scenarios.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_generate_scenario(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "generate_scenario")
    }

    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff => {
                warn!(actor = %actor.id, action, "Denied admin operation");
                Err(AuthError::Unauthorized {
                    action: action.to_string(),
                    required_role: String::from(Role::Admin.as_str()),
                })
            }
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    pub const SESSION_LIFETIME: Duration = Duration::hours(8);

    /// Authenticates an operator and creates a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the operator is
    /// disabled, or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, OperatorData), AuthError> {
        let operator: OperatorData = persistence
            .get_operator_by_login(login_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(login_name, "Login for unknown operator");
                Self::invalid_credentials()
            })?;

        let password_valid: bool = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_valid {
            warn!(login_name = %operator.login_name, "Login with wrong password");
            return Err(Self::invalid_credentials());
        }

        let role: Role = Self::active_role(&operator)?;

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + Self::SESSION_LIFETIME;
        let expires_at_str: String =
            expires_at
                .format(&Iso8601::DEFAULT)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format expiration time: {e}"),
                })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at_str)
            .map_err(Self::map_persistence_error)?;
        persistence
            .update_last_login(operator.operator_id)
            .map_err(Self::map_persistence_error)?;

        info!(login_name = %operator.login_name, role = role.as_str(), "Operator logged in");
        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((session_token, authenticated_actor, operator))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// An expired session is deleted.
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or if its
    /// operator is disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, OperatorData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        let role: Role = Self::active_role(&operator)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let authenticated_actor: AuthenticatedActor =
            AuthenticatedActor::new(operator.login_name.clone(), role);

        Ok((authenticated_actor, operator))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        info!("Operator logged out");
        Ok(())
    }

    fn active_role(operator: &OperatorData) -> Result<Role, AuthError> {
        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        Role::parse(&operator.role).ok_or_else(|| AuthError::AuthenticationFailed {
            reason: format!("Invalid role: {}", operator.role),
        })
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid login name or password"),
        }
    }

    fn generate_session_token() -> String {
        let nanos: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{nanos}_{}", rand::random::<u64>())
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::NotFound(reason) => AuthError::AuthenticationFailed { reason },
            other => AuthError::AuthenticationFailed {
                reason: format!("Database error: {other}"),
            },
        }
    }
}
