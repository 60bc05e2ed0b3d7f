use crate::domain::model::{CreateResponse, NewWeightRecord, WeightRecord};
use crate::domain::ports::{ConfigProvider, WeightApi};
use crate::utils::error::{Result, TrackerError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_AUDIO_FILE_NAME: &str = "recording.webm";
const AUDIO_MIME: &str = "audio/webm";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 後端 REST API 的薄封裝，不做任何重試
pub struct HttpWeightApi {
    client: Client,
    api_url: String,
    audio_url: String,
}

impl HttpWeightApi {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms()))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url().trim_end_matches('/').to_string(),
            audio_url: config.audio_url().to_string(),
        })
    }

    /// 紀錄查詢網址，兩個路徑片段分別編碼
    pub fn records_url(&self, usuario: &str, ejercicio: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            encode_usuario(usuario),
            encode_ejercicio(ejercicio)
        )
    }
}

/// 後端路由要求 email 中的 `@` 保持原樣
pub fn encode_usuario(usuario: &str) -> String {
    urlencoding::encode(usuario).replace("%40", "@")
}

pub fn encode_ejercicio(ejercicio: &str) -> String {
    ejercicio
        .split(' ')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("%20")
}

#[async_trait::async_trait]
impl WeightApi for HttpWeightApi {
    async fn create_weight_record(&self, data: &NewWeightRecord) -> Result<CreateResponse> {
        let url = format!("{}/", self.api_url);
        tracing::debug!(
            "Creating weight record: {} {} lb x {} for {}",
            data.ejercicio,
            data.peso_discos_lb,
            data.nrepeticiones,
            data.usuario
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(data)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty());

            tracing::error!("Create request failed with status {}", status);
            return Err(match message {
                Some(message) => TrackerError::RejectedError { message },
                None => TrackerError::ServerError {
                    status: status.as_u16(),
                    message: "Unknown error".to_string(),
                },
            });
        }

        // 2xx 但本體無法解析時，交由呼叫端以 status 非 success 處理
        let body = response.text().await?;
        let created = serde_json::from_str::<CreateResponse>(&body).unwrap_or_else(|e| {
            tracing::warn!("Unreadable create response ({}): {}", e, body);
            CreateResponse::default()
        });
        tracing::debug!("Record created: status={}", created.status);
        Ok(created)
    }

    async fn get_weight_records(
        &self,
        usuario: &str,
        ejercicio: &str,
    ) -> Result<Vec<WeightRecord>> {
        let url = self.records_url(usuario, ejercicio);
        tracing::debug!(url = %url, usuario, ejercicio, "Fetching history");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!("No records found for {} / {}", usuario, ejercicio);
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("History request failed with status {}", status);
            return Err(TrackerError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        let records: Vec<WeightRecord> = response.json().await?;
        tracing::debug!("Received {} records", records.len());
        Ok(records)
    }

    async fn upload_audio(
        &self,
        usuario: &str,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<serde_json::Value> {
        tracing::debug!("Uploading {} bytes of audio for {}", audio.len(), usuario);

        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(AUDIO_MIME)?;
        let form = Form::new().part("audio", part);

        let response = self
            .client
            .post(&self.audio_url)
            .query(&[("usuario", usuario)])
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Audio upload failed with status {}", status);
            return Err(TrackerError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}
