use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;
use vigia_core::{Role, Session};

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{
    CreateReportDto, PaginatedReportsResponse, Report, ReportFilterParams, UpdateReportStatusDto,
};

const REPORT_COLUMNS: &str =
    "id, type, description, location, anonymous, status, reporter_id, created_at";

/// Students only ever see the reports they filed under their own name;
/// anonymous submissions are invisible even to their author.
fn push_scope_and_filters<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    session: &'a Session,
    filters: &'a ReportFilterParams,
) {
    let mut has_where = false;
    if session.role == Role::Student {
        qb.push(" WHERE reporter_id = ").push_bind(session.principal_id);
        has_where = true;
    }
    if let Some(status) = filters.status {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("status = ").push_bind(status);
        has_where = true;
    }
    if let Some(report_type) = filters.report_type {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("type = ").push_bind(report_type);
    }
}

pub struct ReportsService;

impl ReportsService {
    #[instrument(skip(db, session, dto))]
    pub async fn create(
        db: &PgPool,
        session: &Session,
        dto: CreateReportDto,
    ) -> Result<Report, AppError> {
        // An anonymous report carries no reporter at all.
        let reporter_id = if dto.anonymous {
            None
        } else {
            Some(session.principal_id)
        };

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"INSERT INTO reports (type, description, location, anonymous, reporter_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {REPORT_COLUMNS}"#
        ))
        .bind(dto.report_type)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(dto.anonymous)
        .bind(reporter_id)
        .fetch_one(db)
        .await?;

        Ok(report)
    }

    #[instrument(skip(db, session))]
    pub async fn list(
        db: &PgPool,
        session: &Session,
        filters: ReportFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedReportsResponse, AppError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM reports");
        push_scope_and_filters(&mut count_query, session, &filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let limit = pagination.limit();
        let offset = pagination.offset();

        let mut query = QueryBuilder::new(format!("SELECT {REPORT_COLUMNS} FROM reports"));
        push_scope_and_filters(&mut query, session, &filters);
        query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let data: Vec<Report> = query.build_query_as().fetch_all(db).await?;

        Ok(PaginatedReportsResponse {
            data,
            meta: PaginationMeta {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    /// Out-of-scope reports return 404 rather than 403 so students cannot
    /// probe for the existence of other reports.
    #[instrument(skip(db, session))]
    pub async fn get(db: &PgPool, session: &Session, report_id: Uuid) -> Result<Report, AppError> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(report_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Report not found")))?;

        if session.role == Role::Student && report.reporter_id != Some(session.principal_id) {
            return Err(AppError::not_found(anyhow::anyhow!("Report not found")));
        }

        Ok(report)
    }

    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        report_id: Uuid,
        dto: UpdateReportStatusDto,
    ) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(&format!(
            "UPDATE reports SET status = $1 WHERE id = $2 RETURNING {REPORT_COLUMNS}"
        ))
        .bind(dto.status)
        .bind(report_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Report not found")))
    }
}
