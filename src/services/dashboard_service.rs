use std::sync::Arc;

use serde::Serialize;

use crate::auth::{AccessError, DashboardKind, Scope};
use crate::database::models::{InstructionStats, PageRequest, Pagination, ProjectPage, ProjectSummary};
use crate::database::{DatabaseError, StatsRepository};
use crate::middleware::AuthUser;
use crate::stats::{aggregate, axis_shares, AxisShare, Hierarchy, RollupStats, RowFilter, StatRow};

/// Payload behind a role's landing dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub dashboard: DashboardKind,
    pub scope: Scope,
    pub hierarchy: Hierarchy,
    /// Budget share per axis. Only filled for roles with the global view,
    /// matching `/api/dashboard/axes`; empty for pole and circle dashboards.
    pub axis_shares: Vec<AxisShare>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn StatsRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Statistic rows for `scope`. A failing query is logged and treated as
    /// "no data"; callers never see the error.
    pub async fn rows(&self, scope: &Scope) -> Vec<StatRow> {
        match self.repository.hierarchy_rows(scope).await {
            Ok(rows) => {
                tracing::debug!(?scope, rows = rows.len(), "Loaded statistic rows");
                rows
            }
            Err(e) => {
                tracing::error!(?scope, error = %e, "Statistic rows query failed, rendering empty hierarchy");
                Vec::new()
            }
        }
    }

    pub async fn hierarchy(&self, scope: &Scope, filter: &RowFilter) -> Hierarchy {
        let rows = self.rows(scope).await;
        aggregate(filter.apply(&rows))
    }

    pub async fn totals(&self, scope: &Scope) -> RollupStats {
        self.hierarchy(scope, &RowFilter::default()).await.total_stats
    }

    pub async fn axis_shares(&self, scope: &Scope) -> Vec<AxisShare> {
        axis_shares(&self.hierarchy(scope, &RowFilter::default()).await)
    }

    pub async fn summary(&self, user: &AuthUser) -> Result<DashboardSummary, AccessError> {
        let scope = user.scope()?;
        let hierarchy = self.hierarchy(&scope, &RowFilter::default()).await;
        let axis_shares = if user.role.has_global_view() {
            axis_shares(&hierarchy)
        } else {
            Vec::new()
        };

        Ok(DashboardSummary {
            dashboard: user.dashboard(),
            scope,
            hierarchy,
            axis_shares,
        })
    }

    pub async fn projects_by_axis(&self, axis_id: i64, scope: &Scope) -> Result<Vec<ProjectSummary>, DatabaseError> {
        self.repository.projects_by_axis(axis_id, scope).await
    }

    /// One page of the projects in `scope`. Like the hierarchy, a failing
    /// query renders as an empty page.
    pub async fn projects_page(&self, scope: &Scope, request: &PageRequest) -> ProjectPage {
        let page = async {
            let total = self.repository.count_projects(scope).await?;
            let projects = self
                .repository
                .projects_page(scope, request.limit(), request.offset())
                .await?;
            Ok::<_, DatabaseError>(ProjectPage {
                projects,
                pagination: Pagination::new(request, total),
            })
        };

        match page.await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(?scope, page = request.page(), error = %e, "Project page query failed, rendering empty page");
                ProjectPage::empty(request)
            }
        }
    }

    /// Instruction counters for `user`; zeros when the query fails.
    pub async fn instruction_stats(&self, user: &AuthUser) -> InstructionStats {
        let issuer_id = user.instruction_issuer();
        match self.repository.instruction_stats(issuer_id).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(user_id = user.user_id, ?issuer_id, error = %e, "Instruction stats query failed");
                InstructionStats::default()
            }
        }
    }

    pub async fn database_ok(&self) -> Result<(), DatabaseError> {
        self.repository.ping().await
    }
}
