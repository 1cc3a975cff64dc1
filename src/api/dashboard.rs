use actix_web::{HttpResponse, web};

use crate::{
    clock::Clock,
    error::ApiError,
    model::report::DashboardSummary,
    service::dashboard,
    store::AttendanceStore,
};

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Headline attendance figures", body = DashboardSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn dashboard_summary(
    store: web::Data<dyn AttendanceStore>,
    clock: web::Data<dyn Clock>,
) -> Result<HttpResponse, ApiError> {
    let month = dashboard::current_month(clock.today());
    let counts = store.dashboard_counts(month).await?;

    Ok(HttpResponse::Ok().json(dashboard::summarize(counts)))
}
