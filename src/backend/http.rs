use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{GameConstants, GameState, SuspicionResult, SuspicionTriple};

use super::dto::{
    AccusationOutcome, AccuseResponse, ErrorBody, MoveRequest, RollOutcome, StartGameRequest,
    SuspectResponse,
};
use super::error::BackendError;
use super::GameBackend;

const LOG_TARGET: &str = "clue_session::backend::http";

/// JSON-over-HTTP backend. No retries and no request timeouts.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        let started = Instant::now();
        let response = self.client.get(url).send().await?;
        decode(path, started, response).await
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let started = Instant::now();
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode(path, started, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    path: &str,
    started: Instant,
    response: Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let text = response.text().await?;
    debug!(
        target: LOG_TARGET,
        %path,
        status = status.as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "backend call completed"
    );
    if !status.is_success() {
        let detail = error_detail(&text);
        warn!(target: LOG_TARGET, %path, status = status.as_u16(), %detail, "backend rejected call");
        return Err(BackendError::from_status(status.as_u16(), detail));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Extracts `detail` from an error body, falling back to the raw text.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "no detail".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl GameBackend for HttpBackend {
    async fn start_game(&self, human_character: &str) -> Result<GameState, BackendError> {
        let body = StartGameRequest {
            human_character: human_character.to_string(),
        };
        self.post("game/start", Some(&body)).await
    }

    async fn get_state(&self) -> Result<GameState, BackendError> {
        self.get("game/state").await
    }

    async fn get_constants(&self) -> Result<GameConstants, BackendError> {
        self.get("game/constants").await
    }

    async fn roll(&self) -> Result<RollOutcome, BackendError> {
        self.post::<(), _>("game/roll", None).await
    }

    async fn move_to(&self, destination_room: &str) -> Result<GameState, BackendError> {
        let body = MoveRequest {
            destination_room: destination_room.to_string(),
        };
        self.post("game/move", Some(&body)).await
    }

    async fn suspect(&self, suspicion: &SuspicionTriple) -> Result<SuspicionResult, BackendError> {
        let response: SuspectResponse = self.post("game/suspect", Some(suspicion)).await?;
        Ok(response.result)
    }

    async fn accuse(
        &self,
        accusation: &SuspicionTriple,
    ) -> Result<AccusationOutcome, BackendError> {
        let response: AccuseResponse = self.post("game/accuse", Some(accusation)).await?;
        Ok(response.into())
    }

    async fn pass_turn(&self) -> Result<GameState, BackendError> {
        self.post::<(), _>("game/pass", None).await
    }

    async fn play_ai_turn(&self) -> Result<GameState, BackendError> {
        self.post::<(), _>("game/ai-turn", None).await
    }
}
