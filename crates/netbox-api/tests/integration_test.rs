//! Integration tests for NetBox client
//!
//! These tests require a running NetBox instance.
//! Set NETBOX_URL and NETBOX_TOKEN (or NETBOX_LOGIN/NETBOX_PASSWORD) to run.

use netbox_api::{ClientConfig, NetBoxClient, StatusCode};
use serde_json::{json, Value};

fn live_client() -> anyhow::Result<NetBoxClient> {
    let config = ClientConfig::from_env()?;
    Ok(NetBoxClient::from_config(&config)?)
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_client_creation() -> anyhow::Result<()> {
    let client = live_client()?;

    // Test basic API connectivity
    let status = client.status().await?;
    assert!(status.get("netbox-version").is_some());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_query_prefixes() -> anyhow::Result<()> {
    let client = live_client()?;

    let route = client.build_model_route("ipam", "prefixes");
    let prefixes: Vec<Value> = client.get_all(&route, &[("limit", "50")]).await?;

    println!("Found {} prefixes", prefixes.len());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_tag() -> anyhow::Result<()> {
    let client = live_client()?;
    let route = client.build_model_route("extras", "tags");

    let tag: Value = client
        .post(&route, &json!({"name": "netbox-api-test", "slug": "netbox-api-test"}))
        .await?;
    let id = tag["id"].as_u64().ok_or_else(|| anyhow::anyhow!("tag without id: {tag}"))?;
    let tag_route = format!("{route}{id}/");

    let patched: Value = client
        .patch(&tag_route, &json!({"description": "created by integration test"}))
        .await?;
    assert_eq!(patched["description"], "created by integration test");

    // Clean up
    let response = client.delete(&tag_route).await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    Ok(())
}
