//! Management API
//!
//! The HTTP binding of the section-update protocol. Routing is table-driven:
//! a fixed registry maps (method, path) onto store operations; anything else
//! falls through to axum's 404/405 handling. Domain aliases (`/api/l2/...`,
//! `/api/l3/...`, `/api/mgmt/...`) mirror the generic
//! `/api/config/{section}` form for discoverability.

pub mod handlers;
pub mod response;
pub mod server;

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{delete, get};

use handlers::{Body, SharedStore};
use crate::types::SectionName;

pub use response::{ApiError, ApiResult};
pub use server::serve;

/// Singleton alias registry: path → section
const SINGLETON_ROUTES: &[(&str, SectionName)] = &[
    ("/api/l2/stp", SectionName::Stp),
    ("/api/l2/lldp", SectionName::Lldp),
    ("/api/l2/igmp-snooping", SectionName::IgmpSnooping),
    ("/api/l3/ospf", SectionName::Ospf),
    ("/api/l3/bgp", SectionName::Bgp),
    ("/api/l3/vrrp", SectionName::Vrrp),
    ("/api/mgmt/qos", SectionName::Qos),
    ("/api/mgmt/span", SectionName::Span),
    ("/api/mgmt/system", SectionName::System),
    ("/api/mgmt/aaa", SectionName::Aaa),
];

/// Build the full management API router over a shared store
pub fn router(store: SharedStore) -> Router {
    use SectionName::{Acl, Interfaces, Lacp, StaticRoutes, Vlans};

    let mut app = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/config", get(handlers::get_config))
        .route(
            "/api/config/{section}",
            get(handlers::get_config_section)
                .put(handlers::put_config_section)
                .post(handlers::put_config_section),
        )
        // L2: interfaces (keyed by interface name)
        .route(
            "/api/l2/interfaces",
            get(|state: State<SharedStore>| handlers::get_collection(state, Interfaces)).put(
                |state: State<SharedStore>, body: Body| {
                    handlers::put_keyed_collection(state, Interfaces, body)
                },
            ),
        )
        .route(
            "/api/l2/interfaces/{interface}",
            get(|state: State<SharedStore>, path: Path<String>| {
                handlers::get_keyed_member(state, Interfaces, path)
            })
            .put(handlers::put_interface)
            .post(handlers::put_interface)
            .delete(|state: State<SharedStore>, path: Path<String>| {
                handlers::delete_keyed_member(state, Interfaces, "interface", path)
            }),
        )
        // L2: VLANs (keyed by vlan_id)
        .route(
            "/api/l2/vlans",
            get(|state: State<SharedStore>| handlers::get_collection(state, Vlans))
                .post(handlers::create_vlan),
        )
        .route(
            "/api/l2/vlans/{vlan_id}",
            get(|state: State<SharedStore>, path: Path<String>| {
                handlers::get_keyed_member(state, Vlans, path)
            })
            .put(|state: State<SharedStore>, path: Path<String>, body: Body| {
                handlers::put_keyed_member(state, Vlans, "vlan", path, body)
            })
            .delete(|state: State<SharedStore>, path: Path<String>| {
                handlers::delete_keyed_member(state, Vlans, "vlan_id", path)
            }),
        )
        // L2: LACP groups (keyed by LAG name)
        .route(
            "/api/l2/lacp",
            get(|state: State<SharedStore>| handlers::get_collection(state, Lacp)).put(
                |state: State<SharedStore>, body: Body| {
                    handlers::put_keyed_collection(state, Lacp, body)
                },
            ),
        )
        .route(
            "/api/l2/lacp/{lag}",
            get(|state: State<SharedStore>, path: Path<String>| {
                handlers::get_keyed_member(state, Lacp, path)
            })
            .put(|state: State<SharedStore>, path: Path<String>, body: Body| {
                handlers::put_keyed_member(state, Lacp, "lacp", path, body)
            })
            .delete(|state: State<SharedStore>, path: Path<String>| {
                handlers::delete_keyed_member(state, Lacp, "lacp", path)
            }),
        )
        // L3: static routes (ordered, first match wins)
        .route(
            "/api/l3/static-routes",
            get(|state: State<SharedStore>| handlers::get_collection(state, StaticRoutes))
                .post(|state: State<SharedStore>, body: Body| {
                    handlers::append_list(state, StaticRoutes, "route", body)
                })
                .put(|state: State<SharedStore>, body: Body| {
                    handlers::put_list(state, StaticRoutes, body)
                }),
        )
        .route(
            "/api/l3/static-routes/{index}",
            delete(|state: State<SharedStore>, path: Path<String>| {
                handlers::delete_list_index(state, StaticRoutes, "route", path)
            }),
        )
        // Management: ACL rules (ordered, first match wins)
        .route(
            "/api/mgmt/acl",
            get(|state: State<SharedStore>| handlers::get_collection(state, Acl))
                .post(|state: State<SharedStore>, body: Body| {
                    handlers::append_list(state, Acl, "acl", body)
                })
                .put(|state: State<SharedStore>, body: Body| {
                    handlers::put_list(state, Acl, body)
                }),
        )
        .route(
            "/api/mgmt/acl/{index}",
            delete(|state: State<SharedStore>, path: Path<String>| {
                handlers::delete_list_index(state, Acl, "acl", path)
            }),
        );

    for (path, section) in SINGLETON_ROUTES {
        let section = *section;
        app = app.route(
            path,
            get(move |state: State<SharedStore>| handlers::get_singleton(state, section)).put(
                move |state: State<SharedStore>, body: Body| {
                    handlers::put_singleton(state, section, body)
                },
            ),
        );
    }

    app.with_state(store)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body as AxumBody;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::store::ConfigStore;

    fn app() -> Router {
        router(Arc::new(ConfigStore::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(AxumBody::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(AxumBody::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["service"], json!("nateos-mgmt-api"));
    }

    #[tokio::test]
    async fn test_full_config_snapshot() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stp"]["mode"], json!("rstp"));
        assert_eq!(body["system"]["hostname"], json!("nateos-switch"));
        assert_eq!(body["static_routes"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_section_is_404_and_not_created() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/config/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nonexistent"));

        // No section was implicitly created by the read
        let (_, config) = send(&app, "GET", "/api/config", None).await;
        assert!(config.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_generic_singleton_merge() {
        let app = app();
        let (status, body) = send(
            &app,
            "PUT",
            "/api/config/stp",
            Some(json!({"enabled": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("updated"));
        assert_eq!(body["stp"]["enabled"], json!(true));
        assert_eq!(body["stp"]["mode"], json!("rstp"));
    }

    #[tokio::test]
    async fn test_singleton_alias_atomic_rejection() {
        let app = app();
        let (before_status, before) = send(&app, "GET", "/api/l2/stp", None).await;
        assert_eq!(before_status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "PUT",
            "/api/l2/stp",
            Some(json!({"enabled": true, "priority": 99999})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("priority"));

        let (_, after) = send(&app, "GET", "/api/l2/stp", None).await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_vlan_create_requires_vlan_id() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/l2/vlans",
            Some(json!({"name": "eng"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("vlan_id required"));
    }

    #[tokio::test]
    async fn test_referential_integrity_flow() {
        let app = app();

        // Trunk assignment to a missing VLAN is rejected
        let (status, body) = send(
            &app,
            "PUT",
            "/api/l2/interfaces/eth0",
            Some(json!({"mode": "trunk", "vlan": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("DANGLING_REFERENCE"));

        // Create the VLAN, then the same write succeeds
        let (status, body) = send(
            &app,
            "POST",
            "/api/l2/vlans",
            Some(json!({"vlan_id": 10, "name": "eng"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("created"));
        assert_eq!(body["vlan"]["vlan_id"], json!(10));

        let (status, body) = send(
            &app,
            "PUT",
            "/api/l2/interfaces/eth0",
            Some(json!({"mode": "trunk", "vlan": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["interface"], json!("eth0"));
        assert_eq!(body["config"]["vlan"], json!(10));
    }

    #[tokio::test]
    async fn test_vlan_delete_denied_while_referenced() {
        let app = app();
        send(
            &app,
            "POST",
            "/api/l2/vlans",
            Some(json!({"vlan_id": 10})),
        )
        .await;
        send(
            &app,
            "PUT",
            "/api/l2/interfaces/eth0",
            Some(json!({"vlan": 10})),
        )
        .await;

        let (status, body) = send(&app, "DELETE", "/api/l2/vlans/10", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("eth0"));

        // Unreference, then the delete goes through
        send(
            &app,
            "DELETE",
            "/api/l2/interfaces/eth0",
            None,
        )
        .await;
        let (status, body) = send(&app, "DELETE", "/api/l2/vlans/10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vlan_id"], json!("10"));
    }

    #[tokio::test]
    async fn test_static_route_ordering() {
        let app = app();
        for hop in ["192.168.1.1", "192.168.1.2", "192.168.1.3"] {
            let (status, body) = send(
                &app,
                "POST",
                "/api/l3/static-routes",
                Some(json!({"destination": "10.0.0.0/24", "next_hop": hop})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], json!("added"));
        }

        let (status, body) = send(&app, "DELETE", "/api/l3/static-routes/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"]["next_hop"], json!("192.168.1.2"));

        let (_, routes) = send(&app, "GET", "/api/l3/static-routes", None).await;
        let routes = routes.as_array().unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0]["next_hop"], json!("192.168.1.1"));
        assert_eq!(routes[1]["next_hop"], json!("192.168.1.3"));

        let (status, _) = send(&app, "DELETE", "/api/l3/static-routes/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_acl_append_and_missing_action() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/mgmt/acl",
            Some(json!({"action": "deny", "protocol": "tcp", "dst_port": 23})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["acl"]["action"], json!("deny"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/mgmt/acl",
            Some(json!({"protocol": "udp"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let app = app();
        let request = Request::builder()
            .method("PUT")
            .uri("/api/l2/stp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(AxumBody::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_member_get_not_found() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/l2/interfaces/eth99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("eth99"));
    }

    #[tokio::test]
    async fn test_hyphenated_generic_section_name() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/config/igmp-snooping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enabled"], json!(false));
    }
}
