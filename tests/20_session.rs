mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::StatusCode;

use common::{TestServer, TEST_EMAIL};
use todo_api_rust::auth::ClaimSet;

async fn refresh(server: &TestServer, authorization: Option<&str>) -> Result<reqwest::Response> {
    let mut req = reqwest::Client::new().post(format!("{}/auth/refresh_token", server.base_url));
    if let Some(value) = authorization {
        req = req.header("Authorization", value);
    }
    Ok(req.send().await?)
}

#[tokio::test]
async fn refresh_token_ok() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token().await?;

    let res = refresh(&server, Some(&format!("Bearer {}", token))).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["token_type"], "bearer");

    let new_token = body["data"]["access_token"].as_str().unwrap_or_default().to_string();
    let user = server.authority().resolve(&new_token, &server.users).await?;
    assert_eq!(user.email, TEST_EMAIL);
    Ok(())
}

#[tokio::test]
async fn refresh_without_header_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = refresh(&server, None).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers().get("www-authenticate").and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Not authenticated");
    Ok(())
}

#[tokio::test]
async fn refresh_with_expired_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server
        .authority()
        .issue_at(ClaimSet::for_subject(TEST_EMAIL), Utc::now() - Duration::minutes(31))?;

    let res = refresh(&server, Some(&format!("Bearer {}", token.access_token))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn refresh_with_tampered_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token().await?;

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let signature = &mut parts[2];
    let mid = signature.len() / 2;
    let replacement = if signature.as_bytes()[mid] == b'A' { "B" } else { "A" };
    signature.replace_range(mid..mid + 1, replacement);
    let tampered = parts.join(".");

    let res = refresh(&server, Some(&format!("Bearer {}", tampered))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Could not validate credentials");
    Ok(())
}

#[tokio::test]
async fn refresh_for_unknown_subject() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.authority().issue(ClaimSet::for_subject("ghost@test.com"))?;

    let res = refresh(&server, Some(&format!("Bearer {}", token.access_token))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Could not validate credentials");
    Ok(())
}

#[tokio::test]
async fn refresh_after_user_removed() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token().await?;
    server.users.remove(TEST_EMAIL).await;

    let res = refresh(&server, Some(&format!("Bearer {}", token))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
