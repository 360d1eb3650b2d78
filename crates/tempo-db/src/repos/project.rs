//! Project repository: CRUD and lookups by title.

use chrono::Utc;

use tempo_core::entities::{Project, Task};
use tempo_core::enums::{AuditAction, EntityType};
use tempo_core::ids::{PREFIX_PROJECT, prefix_of};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_u64, parse_datetime, sql_int, to_detail};
use crate::service::TempoService;
use crate::updates::project::ProjectUpdate;

const SELECT_COLS: &str =
    "id, title, customer_id, gitlab_project_id, active, created_at, updated_at";

pub(crate) fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        customer_id: row.get(2)?,
        gitlab_project_id: get_opt_u64(row, 3)?,
        active: row.get::<i64>(4)? != 0,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl TempoService {
    pub async fn create_project(
        &self,
        customer_id: &str,
        title: &str,
        gitlab_project_id: Option<u64>,
    ) -> Result<Project, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        let gitlab_id = gitlab_project_id.map(sql_int).transpose()?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO projects (id, title, customer_id, gitlab_project_id, active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    title,
                    customer_id,
                    gitlab_id,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from_write)?;

        self.record_audit(EntityType::Project, &id, AuditAction::Created, None, now)
            .await?;

        Ok(Project {
            id,
            title: title.to_string(),
            customer_id: customer_id.to_string(),
            gitlab_project_id,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    pub async fn get_project_by_title(&self, title: &str) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE title = ?1"),
                [title],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    /// Resolve `key` as a project ID (`prj-…`) or a project title.
    pub async fn find_project(&self, key: &str) -> Result<Project, DatabaseError> {
        if prefix_of(key) == Some(PREFIX_PROJECT) {
            return self.get_project(key).await;
        }
        self.get_project_by_title(key)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    pub async fn list_projects(
        &self,
        active_only: bool,
        limit: u32,
    ) -> Result<Vec<Project>, DatabaseError> {
        let filter = if active_only { "WHERE active = 1" } else { "" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects {filter} ORDER BY title LIMIT {limit}"),
                (),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(title.clone().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(ref customer_id) = update.customer_id {
            params.push(customer_id.clone().into());
            sets.push(format!("customer_id = ?{}", params.len()));
        }
        if let Some(gitlab_project_id) = update.gitlab_project_id {
            params.push(
                gitlab_project_id
                    .map(sql_int)
                    .transpose()?
                    .map_or(libsql::Value::Null, Into::into),
            );
            sets.push(format!("gitlab_project_id = ?{}", params.len()));
        }
        if let Some(active) = update.active {
            params.push(i64::from(active).into());
            sets.push(format!("active = ?{}", params.len()));
        }

        if sets.is_empty() {
            return self.get_project(project_id).await;
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(project_id.into());
        let sql = format!(
            "UPDATE projects SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(DatabaseError::from_write)?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.record_audit(
            EntityType::Project,
            project_id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
            now,
        )
        .await?;

        self.get_project(project_id).await
    }

    /// Delete a project together with its sprints, milestones, issues, tasks
    /// and timesheets.
    pub async fn delete_project(&self, project_id: &str) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", [project_id])
            .await
            .map_err(DatabaseError::from_write)?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.record_audit(EntityType::Project, project_id, AuditAction::Deleted, None, now)
            .await
    }

    /// All tasks of a project in creation order.
    pub async fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>, DatabaseError> {
        self.list_tasks(&crate::repos::task::TaskFilter {
            project_id: Some(project_id.to_string()),
            status: None,
            limit: None,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed, test_service};
    use crate::updates::project::ProjectUpdateBuilder;

    #[tokio::test]
    async fn create_project_roundtrip() {
        let svc = test_service().await;
        let customer = svc.create_customer("Acme").await.unwrap();
        let project = svc
            .create_project(&customer.id, "site", Some(99))
            .await
            .unwrap();

        assert!(project.id.starts_with("prj-"));
        assert_eq!(project.gitlab_project_id, Some(99));

        let fetched = svc.get_project(&project.id).await.unwrap();
        assert_eq!(fetched, project);
        assert_eq!(svc.find_project("site").await.unwrap().id, project.id);
        assert_eq!(svc.find_project(&project.id).await.unwrap().id, project.id);
        assert!(matches!(
            svc.find_project("nope").await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected() {
        let svc = test_service().await;
        let result = svc.create_project("cus-missing", "site", None).await;
        assert!(matches!(result, Err(DatabaseError::Constraint(_))));
    }

    #[tokio::test]
    async fn list_active_only() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let other = svc
            .create_project(&seeded.customer.id, "archive", None)
            .await
            .unwrap();
        svc.update_project(&other.id, ProjectUpdateBuilder::new().active(false).build())
            .await
            .unwrap();

        assert_eq!(svc.list_projects(false, 10).await.unwrap().len(), 2);
        let active = svc.list_projects(true, 10).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "site");
    }

    #[tokio::test]
    async fn update_clears_gitlab_id() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        let updated = svc
            .update_project(
                &seeded.project.id,
                ProjectUpdateBuilder::new()
                    .title("website")
                    .gitlab_project_id(None)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "website");
        assert_eq!(updated.gitlab_project_id, None);
    }

    #[tokio::test]
    async fn delete_project_cascades_to_sprints() {
        let svc = test_service().await;
        let seeded = seed(&svc).await;
        svc.delete_project(&seeded.project.id).await.unwrap();
        assert!(matches!(
            svc.get_sprint(&seeded.sprint.id).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
