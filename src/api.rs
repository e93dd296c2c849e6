use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Endpoints;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    ActionResponse, BattleId, BattleStatus, ClaimRequest, TapRequest, TapResponse, UserRequest,
};

/// Calls the controller makes against the game server.
///
/// `HttpApi` is the production implementation; tests drive the controller
/// through an in-memory fake.
#[async_trait]
pub trait RoyaleApi: Send + Sync {
    /// Fetch the user's latest battle status.
    async fn latest_status(&self) -> ApiResult<BattleStatus>;

    /// Buy a ticket for the next battle.
    async fn buy_ticket(&self) -> ApiResult<()>;

    /// Claim the reward of the given battle.
    async fn claim_reward(&self, battle_id: Option<&BattleId>) -> ApiResult<()>;

    /// Send a single tap and return the resulting Hearts balance.
    async fn tap_balance(&self) -> ApiResult<f64>;
}

/// `RoyaleApi` over HTTP POST + JSON.
pub struct HttpApi {
    client: reqwest::Client,
    endpoints: Endpoints,
    user_id: u64,
}

impl HttpApi {
    pub fn new(endpoints: Endpoints, user_id: u64) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints, user_id)
    }

    pub fn with_client(client: reqwest::Client, endpoints: Endpoints, user_id: u64) -> Self {
        Self {
            client,
            endpoints,
            user_id,
        }
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        post_json(&self.client, url, body).await
    }
}

/// POST `body` as JSON to `url` and decode the JSON response.
///
/// Non-2xx responses become [`ApiError::Transport`] carrying the status code
/// and response text.
pub async fn post_json<B, R>(client: &reqwest::Client, url: &str, body: &B) -> ApiResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!("POST {url}");
    let resp = client.post(url).json(body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(ApiError::Transport(format!("HTTP {status} - {text}")));
    }
    let decoded = resp.json::<R>().await?;
    debug!("POST {url} -> {status}");
    Ok(decoded)
}

/// Turn a `success: false` action response into an error.
fn check_action(resp: ActionResponse) -> ApiResult<()> {
    if resp.success {
        Ok(())
    } else {
        Err(ApiError::rejected(resp.message))
    }
}

#[async_trait]
impl RoyaleApi for HttpApi {
    async fn latest_status(&self) -> ApiResult<BattleStatus> {
        let body = UserRequest {
            user_id: self.user_id,
        };
        self.post(&self.endpoints.latest_battle, &body).await
    }

    async fn buy_ticket(&self) -> ApiResult<()> {
        let body = UserRequest {
            user_id: self.user_id,
        };
        let resp: ActionResponse = self.post(&self.endpoints.buy_ticket, &body).await?;
        check_action(resp)
    }

    async fn claim_reward(&self, battle_id: Option<&BattleId>) -> ApiResult<()> {
        let body = ClaimRequest {
            battle_id,
            user_id: self.user_id,
        };
        let resp: ActionResponse = self.post(&self.endpoints.claim_reward, &body).await?;
        check_action(resp)
    }

    async fn tap_balance(&self) -> ApiResult<f64> {
        let body = TapRequest {
            user_id: self.user_id,
            tap_count: 1,
        };
        let resp: TapResponse = self.post(&self.endpoints.tap, &body).await?;
        resp.balance.ok_or(ApiError::MissingField("balance"))
    }
}
