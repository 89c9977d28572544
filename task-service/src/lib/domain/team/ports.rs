use async_trait::async_trait;

use crate::domain::team::models::CreateTeamCommand;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::team::errors::TeamError;

/// Port for team domain service operations.
#[async_trait]
pub trait TeamServicePort: Send + Sync + 'static {
    /// Create a team with the creator as a member.
    ///
    /// Every member is linked back to the team.
    ///
    /// # Errors
    /// * `MemberNotFound` - A listed member does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_team(
        &self,
        creator: &UserId,
        command: CreateTeamCommand,
    ) -> Result<Team, TeamError>;

    async fn list_teams(&self) -> Result<Vec<Team>, TeamError>;

    /// # Errors
    /// * `NotFound` - Team does not exist
    async fn get_team(&self, id: &TeamId) -> Result<Team, TeamError>;

    /// Missing IDs are skipped without error.
    async fn get_teams_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError>;

    /// Add a user to a team. Adding an existing member succeeds unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Team does not exist
    /// * `MemberNotFound` - User does not exist
    async fn add_member(&self, id: &TeamId, user_id: &UserId) -> Result<Team, TeamError>;
}

/// Persistence operations for team aggregate.
#[async_trait]
pub trait TeamRepository: Send + Sync + 'static {
    async fn insert(&self, team: Team) -> Result<Team, TeamError>;

    async fn find_all(&self) -> Result<Vec<Team>, TeamError>;

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError>;

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError>;

    /// Add a member and return the updated team, or `None` when the team does
    /// not exist.
    async fn add_member(&self, id: &TeamId, user_id: UserId) -> Result<Option<Team>, TeamError>;
}
