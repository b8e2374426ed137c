use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{EmergencyAlert, TriggerAlertDto};

const ALERT_COLUMNS: &str =
    "id, message, location, triggered_by, triggered_at, resolved, resolved_by, resolved_at";

pub struct AlertsService;

impl AlertsService {
    #[instrument(skip(db, dto))]
    pub async fn trigger(
        db: &PgPool,
        triggered_by: Uuid,
        dto: TriggerAlertDto,
    ) -> Result<EmergencyAlert, AppError> {
        let alert = sqlx::query_as::<_, EmergencyAlert>(&format!(
            r#"INSERT INTO emergency_alerts (message, location, triggered_by)
               VALUES ($1, $2, $3)
               RETURNING {ALERT_COLUMNS}"#
        ))
        .bind(&dto.message)
        .bind(&dto.location)
        .bind(triggered_by)
        .fetch_one(db)
        .await?;

        warn!(alert_id = %alert.id, location = ?alert.location, "emergency alert triggered");

        Ok(alert)
    }

    /// Active alerts first, then history, both newest first.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<EmergencyAlert>, AppError> {
        let alerts = sqlx::query_as::<_, EmergencyAlert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM emergency_alerts \
             ORDER BY resolved ASC, triggered_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(alerts)
    }

    #[instrument(skip(db))]
    pub async fn resolve(
        db: &PgPool,
        alert_id: Uuid,
        resolved_by: Uuid,
    ) -> Result<EmergencyAlert, AppError> {
        let resolved = sqlx::query_as::<_, EmergencyAlert>(&format!(
            r#"UPDATE emergency_alerts
               SET resolved = TRUE, resolved_by = $1, resolved_at = NOW()
               WHERE id = $2 AND NOT resolved
               RETURNING {ALERT_COLUMNS}"#
        ))
        .bind(resolved_by)
        .bind(alert_id)
        .fetch_optional(db)
        .await?;

        if let Some(alert) = resolved {
            return Ok(alert);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM emergency_alerts WHERE id = $1)",
        )
        .bind(alert_id)
        .fetch_one(db)
        .await?;

        if exists {
            Err(AppError::conflict(anyhow::anyhow!("Alert already resolved")))
        } else {
            Err(AppError::not_found(anyhow::anyhow!("Alert not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use vigia_core::Role;

    async fn staff_id(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind("Carla Dias")
        .bind(email)
        .bind(Role::Staff.as_str())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn alert_dto(message: &str) -> TriggerAlertDto {
        TriggerAlertDto {
            message: message.to_string(),
            location: Some("Bloco B".to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn trigger_creates_active_alert(pool: PgPool) {
        let staff = staff_id(&pool, "carla@escola.edu").await;

        let alert = AlertsService::trigger(&pool, staff, alert_dto("Evacuar o bloco B"))
            .await
            .unwrap();

        assert!(!alert.resolved);
        assert!(alert.resolved_at.is_none());
        assert_eq!(alert.triggered_by, staff);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn list_puts_active_alerts_first(pool: PgPool) {
        let staff = staff_id(&pool, "carla@escola.edu").await;

        let old = AlertsService::trigger(&pool, staff, alert_dto("Primeiro alerta"))
            .await
            .unwrap();
        AlertsService::resolve(&pool, old.id, staff).await.unwrap();

        let active = AlertsService::trigger(&pool, staff, alert_dto("Segundo alerta"))
            .await
            .unwrap();

        let alerts = AlertsService::list(&pool).await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, active.id);
        assert!(alerts[1].resolved);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn resolve_is_idempotent_guarded(pool: PgPool) {
        let trigger_staff = staff_id(&pool, "carla@escola.edu").await;
        let resolve_staff = staff_id(&pool, "diego@escola.edu").await;

        let alert = AlertsService::trigger(&pool, trigger_staff, alert_dto("Evacuar"))
            .await
            .unwrap();

        let resolved = AlertsService::resolve(&pool, alert.id, resolve_staff)
            .await
            .unwrap();
        assert!(resolved.resolved);
        assert_eq!(resolved.resolved_by, Some(resolve_staff));
        assert!(resolved.resolved_at.is_some());

        let err = AlertsService::resolve(&pool, alert.id, resolve_staff)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = AlertsService::resolve(&pool, Uuid::new_v4(), resolve_staff)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
