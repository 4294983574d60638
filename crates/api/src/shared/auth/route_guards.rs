use crate::error::PawError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use pawhome_domain::{User, ID};
use pawhome_infra::PawContext;
use serde::{Deserialize, Serialize};

const ADMIN_SECRET_HEADER: &str = "pawhome-admin-secret";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub exp: usize,      // Expiration time (as UTC timestamp)
    pub user_id: String, // Subject (whom token refers to)
}

/// A `User` acting on behalf of the foundation it belongs to
#[derive(Debug, Clone)]
pub struct FoundationMember {
    pub user: User,
    pub foundation_id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

async fn auth_user_req(token: &str, ctx: &PawContext) -> Result<User, PawError> {
    let token = parse_authtoken_header(token);
    let claims = decode_token(&ctx.config.jwt_secret, &token).map_err(|e| {
        PawError::Unauthorized(format!("Malformed or expired token provided: {}", e))
    })?;
    let user_id = claims
        .user_id
        .parse::<ID>()
        .map_err(|_| PawError::Unauthorized("Token refers to an invalid user id".into()))?;

    ctx.repos
        .users
        .find(&user_id)
        .await
        .ok_or_else(|| PawError::Unauthorized("Unable to find user from credentials".into()))
}

/// Identifies the acting `User` from the bearer token. Requests without
/// an authorization header are anonymous, requests with an invalid one are rejected.
pub async fn protect_optional_route(
    req: &HttpRequest,
    ctx: &PawContext,
) -> Result<Option<User>, PawError> {
    match req.headers().get("authorization") {
        Some(token) => {
            let token = token.to_str().map_err(|_| {
                PawError::Unauthorized("Malformed authorization header provided".into())
            })?;
            auth_user_req(token, ctx).await.map(Some)
        }
        None => Ok(None),
    }
}

pub async fn protect_route(req: &HttpRequest, ctx: &PawContext) -> Result<User, PawError> {
    match protect_optional_route(req, ctx).await? {
        Some(user) => Ok(user),
        None => Err(PawError::Unauthorized(
            "Unable to find a bearer token in the authorization header".into(),
        )),
    }
}

pub async fn protect_foundation_route(
    req: &HttpRequest,
    ctx: &PawContext,
) -> Result<FoundationMember, PawError> {
    let user = protect_route(req, ctx).await?;
    match user.foundation_id.clone() {
        Some(foundation_id) => Ok(FoundationMember {
            user,
            foundation_id,
        }),
        None => Err(PawError::Unauthorized(
            "The user is not a member of any foundation".into(),
        )),
    }
}

pub fn protect_admin_route(req: &HttpRequest, ctx: &PawContext) -> Result<(), PawError> {
    let secret = match req.headers().get(ADMIN_SECRET_HEADER) {
        Some(secret) => secret.to_str().map_err(|_| {
            PawError::Unauthorized(format!("Malformed {} header provided", ADMIN_SECRET_HEADER))
        })?,
        None => {
            return Err(PawError::Unauthorized(format!(
                "Unable to find the {} header",
                ADMIN_SECRET_HEADER
            )))
        }
    };

    if secret == ctx.config.admin_secret {
        Ok(())
    } else {
        Err(PawError::Unauthorized(format!(
            "Invalid secret provided in the {} header",
            ADMIN_SECRET_HEADER
        )))
    }
}
