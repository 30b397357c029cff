//! Reddit API client for the authenticated OAuth endpoints

use super::listing::{self, ApiResponse, Listing, Thing};
use super::{RedditApi, SearchQuery};
use crate::config::RedditConfig;
use crate::content::model::{Comment, CommentNode, Continuation, Forest, Post, SavedItem};
use crate::error::AppError;
use crate::http::client_with_timeout;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Reddit caps listing pages at 100 items
const PAGE_SIZE: usize = 100;

/// `/api/morechildren` accepts at most 100 ids per call
const MORE_CHILDREN_BATCH: usize = 100;

/// Reddit API client
///
/// Constructed once at startup and shared read-only by every tool call.
pub struct RedditClient {
    client: reqwest::Client,
    api_base: String,
    access_token: Option<String>,
    /// True when the token was issued for a user account
    user_session: bool,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct MeResponse {
    name: Option<String>,
}

impl RedditClient {
    /// Build the client and obtain a bearer token.
    ///
    /// A failed token request is logged and leaves the client unauthenticated; every
    /// call then reports an auth error instead of aborting startup.
    pub async fn connect(config: &RedditConfig) -> Result<Self, AppError> {
        let client = client_with_timeout(Duration::from_secs(30), &config.user_agent)?;

        let access_token = match obtain_token(&client, config).await {
            Ok(token) => {
                info!("Obtained Reddit access token");
                Some(token)
            }
            Err(e) => {
                error!("Reddit authentication failed: {}", e);
                None
            }
        };

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token,
            user_session: config.user_credentials().is_some(),
        })
    }

    fn token(&self) -> Result<&str, AppError> {
        self.access_token
            .as_deref()
            .ok_or_else(|| AppError::Auth("no Reddit access token; check REDDIT_* settings".to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let token = self.token()?;
        let url = format!("{}{}", self.api_base, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("raw_json", "1")])
            .query(params)
            .send()
            .await?;

        decode_response(response, path).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let token = self.token()?;
        let url = format!("{}{}", self.api_base, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .form(form)
            .send()
            .await?;

        decode_response(response, path).await
    }

    /// Follow `after` cursors until `limit` things are collected or the listing ends
    async fn list_things(
        &self,
        path: &str,
        params: &[(&str, String)],
        limit: u32,
    ) -> Result<Vec<Thing>, AppError> {
        let limit = limit as usize;
        let mut things: Vec<Thing> = Vec::new();
        let mut after: Option<String> = None;

        while things.len() < limit {
            let mut page_params = params.to_vec();
            page_params.push(("limit", (limit - things.len()).min(PAGE_SIZE).to_string()));
            if let Some(cursor) = &after {
                page_params.push(("after", cursor.clone()));
            }

            let page: Listing = self.get(path, &page_params).await?;
            let received = page.data.children.len();
            things.extend(page.data.children);

            match page.data.after {
                Some(next) if received > 0 => after = Some(next),
                _ => break,
            }
        }

        things.truncate(limit);
        Ok(things)
    }

    /// `/comments/{id}` returns `[post listing, comment listing]`
    async fn comment_listing(
        &self,
        submission_id: &str,
        params: &[(&str, String)],
    ) -> Result<Listing, AppError> {
        let (_post, comments): (Listing, Listing) = self
            .get(&format!("/comments/{}", submission_id), params)
            .await?;
        Ok(comments)
    }

    /// Replies of one comment, fetched by focusing the thread on it
    async fn continue_thread(
        &self,
        submission_id: &str,
        parent_fullname: &str,
    ) -> Result<Vec<CommentNode>, AppError> {
        let parent_id = parent_fullname
            .strip_prefix("t1_")
            .unwrap_or(parent_fullname);
        let listing = self
            .comment_listing(submission_id, &[("comment", parent_id.to_string())])
            .await?;

        let focused = listing::comment_nodes(listing)?;
        let replies = focused
            .into_iter()
            .find_map(|node| match node {
                CommentNode::Comment(raw) if raw.id == parent_id => Some(raw.replies),
                _ => None,
            })
            .flatten()
            .unwrap_or_default();
        Ok(replies)
    }
}

impl RedditApi for RedditClient {
    async fn current_user(&self) -> Result<Option<String>, AppError> {
        if !self.user_session {
            return Ok(None);
        }
        let me: MeResponse = self.get("/api/v1/me", &[]).await?;
        Ok(me.name)
    }

    async fn fetch_submission(&self, id: &str) -> Result<Post, AppError> {
        let listing: Listing = self.get(&format!("/by_id/t3_{}", id), &[]).await?;
        listing::posts(listing.data.children)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    async fn fetch_comments(&self, submission_id: &str) -> Result<Vec<CommentNode>, AppError> {
        let listing = self.comment_listing(submission_id, &[]).await?;
        listing::comment_nodes(listing)
    }

    async fn expand_continuation(
        &self,
        submission_id: &str,
        marker: &Continuation,
    ) -> Result<Vec<CommentNode>, AppError> {
        if marker.children.is_empty() {
            return self.continue_thread(submission_id, &marker.parent_id).await;
        }

        let link_id = format!("t3_{}", submission_id);
        let mut things = Vec::new();
        for batch in marker.children.chunks(MORE_CHILDREN_BATCH) {
            let params = [
                ("api_type", "json".to_string()),
                ("link_id", link_id.clone()),
                ("children", batch.join(",")),
            ];
            let response: ApiResponse = self.get("/api/morechildren", &params).await?;
            things.extend(response.into_things()?);
        }

        listing::assemble_flat(things, &marker.parent_id)
    }

    async fn fetch_comment_tree(
        &self,
        post_id: &str,
        sort: &str,
        limit: u32,
        depth: u32,
    ) -> Result<Forest, AppError> {
        let params = [
            ("sort", sort.to_string()),
            ("limit", limit.to_string()),
            ("depth", depth.to_string()),
        ];
        let listing = self.comment_listing(post_id, &params).await?;
        Ok(listing::into_forest(listing::comment_nodes(listing)?))
    }

    async fn post_reply(&self, comment_id: &str, body: &str) -> Result<Comment, AppError> {
        let thing_id = format!("t1_{}", comment_id);
        let form = [("api_type", "json"), ("thing_id", thing_id.as_str()), ("text", body)];
        let response: ApiResponse = self.post_form("/api/comment", &form).await?;

        for thing in response.into_things()? {
            if let Some(comment) = thing.into_comment()? {
                return Ok(comment);
            }
        }
        Err(AppError::Provider("reply created but no comment returned".to_string()))
    }

    async fn list_saved_items(&self, user: &str, limit: u32) -> Result<Vec<SavedItem>, AppError> {
        let things = self
            .list_things(&format!("/user/{}/saved", user), &[], limit)
            .await?;

        let mut items = Vec::with_capacity(things.len());
        for thing in things {
            if let Some(item) = thing.into_saved_item()? {
                items.push(item);
            }
        }
        Ok(items)
    }

    async fn search_posts(&self, query: &SearchQuery<'_>) -> Result<Vec<Post>, AppError> {
        let mut params = vec![
            ("q", query.query.to_string()),
            ("sort", query.sort.to_string()),
            ("type", "link".to_string()),
        ];
        if let Some(t) = query.time_filter {
            params.push(("t", t.to_string()));
        }

        let path = match query.scope {
            Some(subreddit) => {
                params.push(("restrict_sr", "true".to_string()));
                format!("/r/{}/search", subreddit)
            }
            None => "/search".to_string(),
        };

        let things = self.list_things(&path, &params, query.limit).await?;
        listing::posts(things)
    }
}

/// Request a bearer token: password grant with user credentials, else app-only
async fn obtain_token(client: &reqwest::Client, config: &RedditConfig) -> Result<String, AppError> {
    let client_id = config
        .client_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Auth("REDDIT_CLIENT_ID is not set".to_string()))?;
    let client_secret = config.client_secret.as_deref().unwrap_or_default();

    let form: Vec<(&str, &str)> = match config.user_credentials() {
        Some((username, password)) => vec![
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ],
        None => vec![("grant_type", "client_credentials")],
    };

    let response = client
        .post(&config.auth_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&form)
        .send()
        .await?;

    let token: TokenResponse = decode_response(response, "access_token").await?;
    match (token.access_token, token.error) {
        (Some(access_token), _) => Ok(access_token),
        (None, Some(error)) => Err(AppError::Auth(error)),
        (None, None) => Err(AppError::Auth("token response without access_token".to_string())),
    }
}

/// Map HTTP status to the error taxonomy, then decode the JSON body
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(status_error(status, endpoint, &text));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AppError::Parse(format!("{}: {}", endpoint, e)))
}

fn status_error(status: StatusCode, endpoint: &str, body: &str) -> AppError {
    let detail = format!("{} returned {}: {}", endpoint, status, body.trim());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(detail),
        StatusCode::NOT_FOUND => AppError::NotFound(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => AppError::Timeout(detail),
        _ => AppError::Provider(detail),
    }
}
