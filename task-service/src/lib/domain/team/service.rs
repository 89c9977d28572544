use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::team::models::CreateTeamCommand;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::team::errors::TeamError;
use crate::team::ports::TeamRepository;
use crate::team::ports::TeamServicePort;
use crate::user::ports::UserRepository;

pub struct TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    repository: Arc<TR>,
    user_repository: Arc<UR>,
}

impl<TR, UR> TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    pub fn new(repository: Arc<TR>, user_repository: Arc<UR>) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    async fn ensure_users_exist(&self, user_ids: &[UserId]) -> Result<(), TeamError> {
        let found = self.user_repository.find_by_ids(user_ids).await?;
        match user_ids
            .iter()
            .find(|id| !found.iter().any(|user| user.id == **id))
        {
            Some(missing) => Err(TeamError::MemberNotFound(missing.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<TR, UR> TeamServicePort for TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    async fn create_team(
        &self,
        creator: &UserId,
        command: CreateTeamCommand,
    ) -> Result<Team, TeamError> {
        let mut members = vec![*creator];
        for member in command.members {
            if !members.contains(&member) {
                members.push(member);
            }
        }

        self.ensure_users_exist(&members).await?;

        let now = Utc::now();
        let team = self
            .repository
            .insert(Team {
                id: TeamId::new(),
                name: command.name,
                description: command.description,
                members,
                created_at: now,
                updated_at: now,
            })
            .await?;

        for member in &team.members {
            self.user_repository
                .link(member, UserLink::Team(team.id))
                .await?;
        }

        tracing::info!(
            team_id = %team.id,
            members = team.members.len(),
            "Team created"
        );

        Ok(team)
    }

    async fn list_teams(&self) -> Result<Vec<Team>, TeamError> {
        self.repository.find_all().await
    }

    async fn get_team(&self, id: &TeamId) -> Result<Team, TeamError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id.to_string()))
    }

    async fn get_teams_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError> {
        self.repository.find_by_ids(ids).await
    }

    async fn add_member(&self, id: &TeamId, user_id: &UserId) -> Result<Team, TeamError> {
        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(TeamError::MemberNotFound(user_id.to_string()));
        }

        let team = self
            .repository
            .add_member(id, *user_id)
            .await?
            .ok_or(TeamError::NotFound(id.to_string()))?;

        self.user_repository
            .link(user_id, UserLink::Team(team.id))
            .await?;

        tracing::info!(team_id = %team.id, user_id = %user_id, "Team member added");

        Ok(team)
    }
}
