use crate::domain::model::{CreateResponse, NewWeightRecord, Session, WeightRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端後端的三個端點
#[async_trait]
pub trait WeightApi: Send + Sync {
    /// 2xx 但本體缺少 `status` 時回傳空的 `CreateResponse`，不視為傳輸錯誤
    async fn create_weight_record(&self, data: &NewWeightRecord) -> Result<CreateResponse>;

    /// 找不到紀錄 (404) 時回傳空陣列而不是錯誤
    async fn get_weight_records(&self, usuario: &str, ejercicio: &str)
        -> Result<Vec<WeightRecord>>;

    async fn upload_audio(
        &self,
        usuario: &str,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<serde_json::Value>;
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn audio_url(&self) -> &str;
    fn timeout_ms(&self) -> u64;
}
