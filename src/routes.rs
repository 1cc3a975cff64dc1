use crate::{
    api::{attendance, dashboard, employee, report},
    error::{json_error_handler, path_error_handler, query_error_handler},
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/present-days, must precede /{id}
                    .service(
                        web::resource("/present-days")
                            .route(web::get().to(employee::employee_present_days)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("").route(web::post().to(attendance::create_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::list_employee_attendance)),
                    ),
            )
            .service(
                web::resource("/dashboard/summary")
                    .route(web::get().to(dashboard::dashboard_summary)),
            )
            .service(
                web::resource("/hr/attendance-report")
                    .route(web::get().to(report::attendance_report)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::store::{AttendanceStore, MemoryStore};
    use actix_web::{
        App,
        dev::{Service, ServiceResponse},
        http::StatusCode,
        middleware::NormalizePath,
        test,
        web::Data,
    };
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    async fn app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        let store: Arc<dyn AttendanceStore> = Arc::new(MemoryStore::new());
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(today()));

        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(Data::from(store))
                .app_data(Data::from(clock))
                .configure(|cfg| configure(cfg, "/api")),
        )
        .await
    }

    async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
        let resp = test::call_service(app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    async fn add_employee<S>(app: &S, code: &str, name: &str) -> u64
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let (status, body) = post_json(
            app,
            "/api/employees/",
            json!({
                "employee_id": code,
                "full_name": name,
                "email": format!("{}@example.com", code.to_lowercase()),
                "department": "Operations"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap()
    }

    async fn mark<S>(app: &S, employee: u64, date: &str, status: &str) -> (StatusCode, Value)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        post_json(
            app,
            "/api/attendance/",
            json!({ "employee": employee, "date": date, "status": status }),
        )
        .await
    }

    /// E1 (A1): present 2024-01-05, absent 2024-01-06. E2 (B1): present 2024-01-05.
    async fn seed<S>(app: &S) -> (u64, u64)
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let e1 = add_employee(app, "A1", "Alice Smith").await;
        let e2 = add_employee(app, "B1", "Bob Jones").await;
        assert_eq!(mark(app, e1, "2024-01-05", "PRESENT").await.0, StatusCode::CREATED);
        assert_eq!(mark(app, e1, "2024-01-06", "ABSENT").await.0, StatusCode::CREATED);
        assert_eq!(mark(app, e2, "2024-01-05", "PRESENT").await.0, StatusCode::CREATED);
        (e1, e2)
    }

    #[actix_web::test]
    async fn employees_can_be_created_and_listed() {
        let app = app().await;
        let id = add_employee(&app, "A1", "Alice Smith").await;

        let (status, body) = get_json(&app, "/api/employees/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": id,
                "employee_id": "A1",
                "full_name": "Alice Smith",
                "email": "a1@example.com",
                "department": "Operations"
            }])
        );
    }

    #[actix_web::test]
    async fn invalid_employee_payloads_are_rejected() {
        let app = app().await;
        add_employee(&app, "A1", "Alice Smith").await;

        let (status, body) = post_json(
            &app,
            "/api/employees",
            json!({
                "employee_id": "A1",
                "full_name": "Someone Else",
                "email": "else@example.com",
                "department": "Sales"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Employee with this employee_id already exists.");

        let (status, body) = post_json(&app, "/api/employees", json!({ "employee_id": "X" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn duplicate_attendance_is_a_bad_request() {
        let app = app().await;
        let id = add_employee(&app, "A1", "Alice Smith").await;

        let (status, first) = mark(&app, id, "2024-01-05", "PRESENT").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            first,
            json!({ "id": 1, "employee": id, "date": "2024-01-05", "status": "PRESENT" })
        );

        let (status, body) = mark(&app, id, "2024-01-05", "ABSENT").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Attendance for this employee on this date already exists." })
        );
    }

    #[actix_web::test]
    async fn attendance_requires_a_known_employee_and_valid_status() {
        let app = app().await;

        let (status, body) = mark(&app, 99, "2024-01-05", "PRESENT").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Employee 99 does not exist.");

        let id = add_employee(&app, "A1", "Alice Smith").await;
        let (status, _) = mark(&app, id, "2024-01-05", "LATE").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn attendance_list_filters_by_date() {
        let app = app().await;
        let (e1, _) = seed(&app).await;

        let (status, all) = get_json(&app, &format!("/api/attendance/employee/{e1}/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (status, one) =
            get_json(&app, &format!("/api/attendance/employee/{e1}/?date=2024-01-05")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            one,
            json!([{ "id": 1, "employee": e1, "date": "2024-01-05", "status": "PRESENT" }])
        );

        let (status, body) =
            get_json(&app, &format!("/api/attendance/employee/{e1}?date=05-01-2024")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date format, expected YYYY-MM-DD");

        let (status, _) = get_json(&app, "/api/attendance/employee/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn deleting_an_employee_cascades() {
        let app = app().await;
        let (e1, _) = seed(&app).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/employees/{e1}/"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/employees/{e1}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Employee not found");

        let (_, dashboard) = get_json(&app, "/api/dashboard/summary/").await;
        assert_eq!(dashboard["total_employees"], 1);
        assert_eq!(dashboard["total_attendance_records"], 1);
    }

    #[actix_web::test]
    async fn dashboard_uses_the_injected_clock() {
        let app = app().await;
        let (_, e2) = seed(&app).await;
        assert_eq!(mark(&app, e2, "2023-12-29", "ABSENT").await.0, StatusCode::CREATED);

        let (status, body) = get_json(&app, "/api/dashboard/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_employees": 2,
                "total_attendance_records": 4,
                "total_present_days": 2,
                "total_absent_days": 2,
                "current_month_present": 2,
                "current_month_absent": 1,
                "attendance_rate_percentage": 50.0
            })
        );
    }

    #[actix_web::test]
    async fn empty_dashboard_reports_zero_rate() {
        let app = app().await;
        let (_, body) = get_json(&app, "/api/dashboard/summary").await;
        assert_eq!(body["attendance_rate_percentage"], json!(0.0));
        assert_eq!(body["total_employees"], 0);
    }

    #[actix_web::test]
    async fn present_days_lists_every_employee_once() {
        let app = app().await;
        let (e1, e2) = seed(&app).await;
        let e3 = add_employee(&app, "C1", "Carol White").await;

        let (status, body) = get_json(&app, "/api/employees/present-days/").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        let totals: Vec<(u64, i64, i64)> = rows
            .iter()
            .map(|r| {
                (
                    r["id"].as_u64().unwrap(),
                    r["total_present_days"].as_i64().unwrap(),
                    r["total_absent_days"].as_i64().unwrap(),
                )
            })
            .collect();
        assert_eq!(totals, vec![(e1, 1, 1), (e2, 1, 0), (e3, 0, 0)]);

        let (_, annotated) = get_json(&app, "/api/employees?with_counts=true").await;
        assert_eq!(annotated, body);
    }

    #[actix_web::test]
    async fn january_report_for_two_employees() {
        let app = app().await;
        let (e1, e2) = seed(&app).await;

        let (status, body) = get_json(&app, "/api/hr/attendance-report/?month=1&year=2024").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(
            body["filters_applied"],
            json!({
                "employee_name": "All",
                "month": "1",
                "year": 2024,
                "total_working_days_in_month": 31
            })
        );
        assert_eq!(
            body["summary"],
            json!({
                "total_employees_in_report": 2,
                "total_attendance_records": 3,
                "overall_present": 2,
                "overall_absent": 1,
                "overall_attendance_rate": 66.67
            })
        );

        let summaries = body["employee_summary"].as_array().unwrap();
        assert_eq!(summaries[0]["employee_info"]["id"], e1);
        assert_eq!(summaries[0]["employee_info"]["employee_id"], "A1");
        assert_eq!(summaries[0]["attendance_rate"], json!(50.0));
        assert_eq!(
            summaries[0]["attendance_records"],
            json!([
                { "date": "2024-01-05", "status": "PRESENT" },
                { "date": "2024-01-06", "status": "ABSENT" }
            ])
        );
        assert_eq!(summaries[1]["employee_info"]["id"], e2);
        assert_eq!(summaries[1]["attendance_rate"], json!(100.0));

        assert_eq!(
            body["detailed_attendance"][2],
            json!({
                "id": 3,
                "employee_id": e2,
                "employee_name": "Bob Jones",
                "employee_code": "B1",
                "date": "2024-01-05",
                "status": "PRESENT"
            })
        );
    }

    #[actix_web::test]
    async fn report_name_filter_is_case_insensitive_substring() {
        let app = app().await;
        let (e1, _) = seed(&app).await;

        let (status, body) = get_json(&app, "/api/hr/attendance-report?employee_name=a1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filters_applied"]["employee_name"], "a1");
        assert_eq!(body["summary"]["total_employees_in_report"], 1);
        assert_eq!(body["employee_summary"][0]["employee_info"]["id"], e1);

        let (_, body) = get_json(&app, "/api/hr/attendance-report?employee_name=JONES").await;
        assert_eq!(body["employee_summary"][0]["employee_info"]["employee_id"], "B1");
    }

    #[actix_web::test]
    async fn report_without_month_omits_working_days() {
        let app = app().await;
        seed(&app).await;

        let (status, body) = get_json(&app, "/api/hr/attendance-report").await;
        assert_eq!(status, StatusCode::OK);

        let filters = body["filters_applied"].as_object().unwrap();
        assert!(!filters.contains_key("total_working_days_in_month"));
        assert_eq!(filters["month"], "All");
        assert_eq!(filters["year"], 2024);
        assert_eq!(body["summary"]["total_attendance_records"], 3);
    }

    #[actix_web::test]
    async fn report_echoes_month_as_requested() {
        let app = app().await;
        seed(&app).await;

        let (status, body) = get_json(&app, "/api/hr/attendance-report?month=01&year=2024").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filters_applied"]["month"], "01");
        assert_eq!(body["filters_applied"]["total_working_days_in_month"], 31);
        assert_eq!(body["summary"]["total_attendance_records"], 3);
    }

    #[actix_web::test]
    async fn report_rejects_bad_months() {
        let app = app().await;

        let (status, body) = get_json(&app, "/api/hr/attendance-report?month=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Month must be between 1 and 12" }));

        let (status, body) = get_json(&app, "/api/hr/attendance-report?month=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid month format" }));

        let (status, body) =
            get_json(&app, "/api/hr/attendance-report?month=99999999999999999999").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Month must be between 1 and 12" }));

        let (status, body) = get_json(&app, "/api/hr/attendance-report?year=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid year format" }));
    }
}
