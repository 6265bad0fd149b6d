use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req).ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = claims_from_token(&token).await?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req).ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = claims_from_token(&token).await?;

    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// The request itself must not be held across this await: `Body` is not `Sync`
async fn claims_from_token(token: &str) -> Result<TokenClaims, StatusCode> {
    super::jwt::validate_token(token).await.map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        StatusCode::UNAUTHORIZED
    })
}

/// Token from the `Authorization: Bearer` header, or from `?token=` for
/// EventSource clients that cannot set headers
fn bearer_token(req: &Request<Body>) -> Option<String> {
    if let Some(token) = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    req.uri().query().and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "token")
            .map(|(_, value)| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};

    fn request(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_header() {
        let req = request("/api/orders", Some("Bearer abc.def"));
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_query_token_for_event_stream() {
        let req = request("/api/changes?since=1&token=xyz", None);
        assert_eq!(bearer_token(&req).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_missing_or_malformed_token() {
        assert_eq!(bearer_token(&request("/api/orders", None)), None);
        assert_eq!(
            bearer_token(&request("/api/orders", Some("Basic abc"))),
            None
        );
    }

    #[test]
    fn test_guards_can_layer_a_router() {
        // from_fn only yields a Service when the middleware future is Send
        let _staff: Router = Router::new()
            .route("/api/orders", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(require_auth));
        let _admin: Router = Router::new()
            .route("/api/system/users", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_admin));
    }
}
