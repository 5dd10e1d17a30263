use mockito::{Matcher, Server};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::JenkinsError;

use super::{BuildRef, BuildStatus, JenkinsClient};

fn anonymous_client(server: &Server) -> JenkinsClient {
    JenkinsClient::new(ClientConfig::new(&server.url(), None).unwrap()).unwrap()
}

fn authenticated_client(server: &Server) -> JenkinsClient {
    let creds = Credentials::from_parts(Some("user"), Some("token"));
    JenkinsClient::new(ClientConfig::new(&server.url(), creds).unwrap()).unwrap()
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jobs": []}"#)
            .create_async()
            .await;

        let jobs = anonymous_client(&server).list_jobs().await.unwrap();

        assert!(jobs.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn credentials_are_sent_as_basic_auth() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Any)
            .match_header("authorization", "Basic dXNlcjp0b2tlbg==")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jobs": []}"#)
            .create_async()
            .await;

        authenticated_client(&server).list_jobs().await.unwrap();

        mock.assert_async().await;
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn not_found_names_the_job() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/missing/api/json")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = anonymous_client(&server).job_status("missing").await.unwrap_err();

        match err {
            JenkinsError::NotFound(what) => assert!(what.contains("missing")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthenticated() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let err = anonymous_client(&server).list_jobs().await.unwrap_err();

        assert!(matches!(err, JenkinsError::Unauthenticated));
    }

    #[tokio::test]
    async fn forbidden_names_the_job() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/secret/lastBuild/api/json")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let err = anonymous_client(&server)
            .build_status("secret", &BuildRef::Last)
            .await
            .unwrap_err();

        match err {
            JenkinsError::Forbidden(what) => assert!(what.contains("secret")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_errors_do_not_leak_the_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/queue/api/json")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("java.lang.NullPointerException at hudson.Secret")
            .create_async()
            .await;

        let err = anonymous_client(&server).queue_status().await.unwrap_err();

        match &err {
            JenkinsError::Upstream { status, code, .. } => {
                assert_eq!(*status, Some(500));
                assert_eq!(code, "HTTP_STATUS");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.to_string().contains("NullPointerException"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/computer/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let err = anonymous_client(&server).node_status().await.unwrap_err();

        match err {
            JenkinsError::Upstream { code, status, .. } => {
                assert_eq!(code, "DECODE");
                assert!(status.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let config = ClientConfig::new("http://127.0.0.1:1", None).unwrap();
        let client = JenkinsClient::new(config).unwrap();

        let err = client.list_jobs().await.unwrap_err();

        assert!(matches!(err, JenkinsError::Upstream { status: None, .. }));
    }
}

mod jobs {
    use super::*;

    const JOBS_BODY: &str = r#"{
        "jobs": [
            {"name": "app", "url": "http://ci/job/app/", "color": "blue",
             "lastBuild": {"number": 5, "timestamp": 1000}},
            {"name": "cfg-deploy-1", "url": "http://ci/job/cfg-deploy-1/", "color": "red_anime",
             "lastBuild": {"number": 12, "timestamp": 2000}},
            {"name": "xcfg-deploy-1", "url": "http://ci/job/xcfg-deploy-1/", "color": "notbuilt"}
        ]
    }"#;

    #[tokio::test]
    async fn list_jobs_requests_tree_and_summarizes() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::UrlEncoded(
                "tree".into(),
                "jobs[name,url,color,lastBuild[number,timestamp]]".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(JOBS_BODY)
            .create_async()
            .await;

        let jobs = anonymous_client(&server).list_jobs().await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].name, "app");
        assert_eq!(jobs[0].status, BuildStatus::Success);
        assert_eq!(jobs[0].last_build_number, Some(5));
        assert_eq!(
            jobs[0].last_build_time.as_deref(),
            Some("1970-01-01T00:00:01.000Z")
        );
        assert_eq!(jobs[1].status, BuildStatus::Building);
        assert!(jobs[2].last_build_number.is_none());
    }

    #[tokio::test]
    async fn search_jobs_filters_by_glob() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(JOBS_BODY)
            .create_async()
            .await;

        let jobs = anonymous_client(&server).search_jobs("cfg-*").await.unwrap();

        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["cfg-deploy-1"]);
    }

    #[tokio::test]
    async fn folder_jobs_use_nested_paths() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/job/team/job/app/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"name": "app", "url": "http://ci/job/team/job/app/", "color": "yellow",
                    "buildable": true, "inQueue": false,
                    "healthReport": [{"score": 60, "description": "Build stability: 2 of 5 failed"}],
                    "lastBuild": {"number": 9, "url": "http://ci/job/team/job/app/9/", "result": "UNSTABLE", "timestamp": 1000}}"#,
            )
            .create_async()
            .await;

        let details = anonymous_client(&server).job_status("team/app").await.unwrap();

        mock.assert_async().await;
        assert_eq!(details.status, BuildStatus::Unstable);
        assert_eq!(details.health_score, Some(60));
        assert!(details.buildable);
        assert_eq!(details.last_build.unwrap().number, 9);
        assert!(details.last_failed_build.is_none());
    }

    #[tokio::test]
    async fn failed_jobs_scan_filters_recent_failures() {
        let now = chrono::Utc::now().timestamp_millis();
        let body = format!(
            r#"{{"jobs": [
                {{"name": "api", "url": "http://ci/job/api/", "builds": [
                    {{"number": 3, "url": "u3", "result": "FAILURE", "timestamp": {recent}, "duration": 10}},
                    {{"number": 2, "url": "u2", "result": "SUCCESS", "timestamp": {recent}, "duration": 10}},
                    {{"number": 1, "url": "u1", "result": "FAILURE", "timestamp": {old}, "duration": 10}}
                ]}},
                {{"name": "web", "url": "http://ci/job/web/", "builds": [
                    {{"number": 4, "url": "u4", "result": "UNSTABLE", "timestamp": {newest}, "duration": 10}}
                ]}}
            ]}}"#,
            recent = now - 60_000,
            old = now - 48 * 3_600_000,
            newest = now - 1_000,
        );

        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Regex("builds".into()))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let summary = anonymous_client(&server).recent_failures(24).await.unwrap();

        assert_eq!(summary.total_failures, 2);
        assert_eq!(summary.time_window, "last 24 hours");
        assert_eq!(summary.failures[0].job_name, "web");
        assert_eq!(summary.failures[1].job_name, "api");
        assert_eq!(summary.failures[1].build_number, 3);
    }
}

mod builds {
    use super::*;

    async fn mock_build(server: &mut Server, number: u64, duration: i64, result: &str) -> mockito::Mock {
        server
            .mock("GET", format!("/job/app/{number}/api/json").as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(format!(
                r##"{{"number": {number}, "url": "http://ci/job/app/{number}/", "result": {result},
                    "timestamp": 1000, "duration": {duration}, "displayName": "#{number}"}}"##
            ))
            .create_async()
            .await
    }

    #[tokio::test]
    async fn compare_builds_fetches_both_builds() {
        let mut server = Server::new_async().await;
        let first = mock_build(&mut server, 1, 100, r#""SUCCESS""#).await;
        let second = mock_build(&mut server, 2, 150, r#""FAILURE""#).await;

        let cmp = anonymous_client(&server)
            .compare_builds("app", &BuildRef::Number(1), &BuildRef::Number(2))
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(cmp.duration_diff, 50);
        assert_eq!(cmp.duration_diff_percent, 50.0);
        assert!(cmp.result_changed);
    }

    #[tokio::test]
    async fn compare_builds_fails_when_either_build_is_missing() {
        let mut server = Server::new_async().await;
        let _first = mock_build(&mut server, 1, 100, r#""SUCCESS""#).await;
        let _mock = server
            .mock("GET", "/job/app/99/api/json")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = anonymous_client(&server)
            .compare_builds("app", &BuildRef::Number(1), &BuildRef::Number(99))
            .await
            .unwrap_err();

        match err {
            JenkinsError::NotFound(what) => assert!(what.contains("#99")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn running_build_reports_building() {
        let mut server = Server::new_async().await;
        let _mock = mock_build(&mut server, 7, 0, "null").await;

        let info = anonymous_client(&server)
            .build_status("app", &BuildRef::Number(7))
            .await
            .unwrap();

        assert_eq!(info.status, BuildStatus::Building);
        assert!(info.building);
        assert!(info.result.is_none());
    }

    #[tokio::test]
    async fn history_requests_bounded_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/job/app/api/json")
            .match_query(Matcher::UrlEncoded(
                "tree".into(),
                "builds[number,url,result,timestamp,duration,estimatedDuration,displayName,building]{0,3}"
                    .into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"builds": [
                    {"number": 3, "result": "SUCCESS", "timestamp": 3000, "duration": 1},
                    {"number": 2, "result": "FAILURE", "timestamp": 2000, "duration": 1},
                    {"number": 1, "result": "SUCCESS", "timestamp": 1000, "duration": 1}
                ]}"#,
            )
            .create_async()
            .await;

        let history = anonymous_client(&server).build_history("app", 3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(history.total_builds, 3);
        assert_eq!(history.builds[1].status, BuildStatus::Failure);
    }

    #[tokio::test]
    async fn artifacts_carry_download_links() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/lastSuccessfulBuild/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"number": 4, "url": "http://ci/job/app/4/",
                    "artifacts": [{"fileName": "app.jar", "relativePath": "target/app.jar"}]}"#,
            )
            .create_async()
            .await;

        let list = anonymous_client(&server)
            .build_artifacts("app", &BuildRef::LastSuccessful)
            .await
            .unwrap();

        assert_eq!(list.build_number, 4);
        assert_eq!(list.artifacts[0].url, "http://ci/job/app/4/artifact/target/app.jar");
    }
}

mod console_logs {
    use super::*;

    #[tokio::test]
    async fn tail_returns_last_lines() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/lastBuild/consoleText")
            .with_status(200)
            .with_body("one\ntwo\nthree\nfour\n")
            .create_async()
            .await;

        let log = anonymous_client(&server)
            .console_log("app", &BuildRef::Last, Some(2))
            .await
            .unwrap();

        assert_eq!(log, "... [2 lines omitted, showing last 2 lines] ...\nthree\nfour");
    }

    #[tokio::test]
    async fn search_reports_matches() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/3/consoleText")
            .with_status(200)
            .with_body("compile\n[ERROR] missing symbol\nlink\n")
            .create_async()
            .await;

        let result = anonymous_client(&server)
            .search_console_log("app", &BuildRef::Number(3), "error", Some(1), None)
            .await
            .unwrap();

        assert_eq!(result.total_matches, 1);
        assert_eq!(result.total_lines, 3);
        assert_eq!(result.matches[0].line_number, 2);
    }

    #[tokio::test]
    async fn invalid_pattern_fails_before_fetching() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/job/app/lastBuild/consoleText")
            .with_status(200)
            .with_body("text")
            .expect(0)
            .create_async()
            .await;

        let err = anonymous_client(&server)
            .search_console_log("app", &BuildRef::Last, "(unclosed", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, JenkinsError::InvalidInput(_)));
        mock.assert_async().await;
    }
}

mod reports {
    use super::*;

    #[tokio::test]
    async fn test_results_are_summarized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/lastBuild/testReport/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"passCount": 10, "failCount": 1, "skipCount": 2, "duration": 3.5,
                    "suites": [{"name": "s", "cases": [
                        {"className": "a.B", "name": "works", "status": "PASSED"},
                        {"className": "a.B", "name": "breaks", "status": "REGRESSION", "errorDetails": "expected 1"}
                    ]}]}"#,
            )
            .create_async()
            .await;

        let summary = anonymous_client(&server)
            .test_results("app", &BuildRef::Last)
            .await
            .unwrap();

        assert_eq!(summary.total, 13);
        assert_eq!(summary.failed_tests.len(), 1);
        assert_eq!(summary.failed_tests[0].class_name, "a.B");
    }

    #[tokio::test]
    async fn missing_test_report_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/2/testReport/api/json")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = anonymous_client(&server)
            .test_results("app", &BuildRef::Number(2))
            .await
            .unwrap_err();

        assert!(matches!(err, JenkinsError::NotFound(ref what) if what.contains("test results")));
    }

    #[tokio::test]
    async fn pipeline_stages_find_failed_stage() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/job/app/5/wfapi/describe")
            .with_status(200)
            .with_body(
                r##"{"id": "5", "name": "#5", "status": "FAILED", "durationMillis": 900,
                    "stages": [
                        {"id": "1", "name": "Build", "status": "SUCCESS", "startTimeMillis": 1000, "durationMillis": 300},
                        {"id": "2", "name": "Test", "status": "FAILED", "startTimeMillis": 1300, "durationMillis": 600}
                    ]}"##,
            )
            .create_async()
            .await;

        let info = anonymous_client(&server)
            .pipeline_stages("app", &BuildRef::Number(5))
            .await
            .unwrap();

        assert_eq!(info.stages.len(), 2);
        assert_eq!(info.failed_stage.as_deref(), Some("Test"));
    }
}

mod system {
    use super::*;

    #[tokio::test]
    async fn health_reports_version_header() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("x-jenkins", "2.440.1")
            .with_body(r#"{"mode": "NORMAL", "numExecutors": 2, "useSecurity": true}"#)
            .create_async()
            .await;

        let health = authenticated_client(&server).health().await.unwrap();

        assert_eq!(health.status, "ok");
        assert_eq!(health.version.as_deref(), Some("2.440.1"));
        assert_eq!(health.num_executors, Some(2));
        assert!(health.authenticated);
    }

    #[tokio::test]
    async fn queue_and_nodes_are_summarized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/queue/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"items": [{"id": 11, "task": {"name": "app"}, "why": "Waiting for executor",
                    "inQueueSince": 1000, "stuck": false, "blocked": true}]}"#,
            )
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/computer/api/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"computer": [
                    {"displayName": "built-in", "offline": false, "temporarilyOffline": false, "numExecutors": 2, "idle": true},
                    {"displayName": "agent", "offline": true, "temporarilyOffline": true, "offlineCauseReason": "maintenance"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = anonymous_client(&server);
        let queue = client.queue_status().await.unwrap();
        let nodes = client.node_status().await.unwrap();

        assert_eq!(queue.total_items, 1);
        assert_eq!(queue.items[0].job_name, "app");
        assert!(queue.items[0].blocked);
        assert_eq!(nodes.total, 2);
        assert_eq!(nodes.online, 1);
        assert_eq!(nodes.offline, 1);
        assert_eq!(nodes.nodes[1].offline_reason.as_deref(), Some("maintenance"));
    }
}
