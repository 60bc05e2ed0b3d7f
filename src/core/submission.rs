use crate::domain::model::{CreateResponse, Exercise, NewWeightRecord, Session};
use crate::domain::ports::WeightApi;
use crate::utils::error::{Result, TrackerError, ValidationError};
use crate::utils::validation::{parse_positive_count, parse_positive_weight};

const DEFAULT_REPS: &str = "1";
const GENERIC_SAVE_ERROR: &str = "Failed to save the record";

/// 新增紀錄的表單狀態。欄位保留原始輸入字串，送出前才解析
#[derive(Debug, Clone, PartialEq)]
pub struct WeightForm {
    pub ejercicio: Exercise,
    pub peso_discos_lb: String,
    pub nrepeticiones: String,
}

impl Default for WeightForm {
    fn default() -> Self {
        Self {
            ejercicio: Exercise::default(),
            peso_discos_lb: String::new(),
            nrepeticiones: DEFAULT_REPS.to_string(),
        }
    }
}

impl WeightForm {
    pub fn new(ejercicio: Exercise, peso_discos_lb: &str, nrepeticiones: &str) -> Self {
        Self {
            ejercicio,
            peso_discos_lb: peso_discos_lb.to_string(),
            nrepeticiones: nrepeticiones.to_string(),
        }
    }

    /// 依序檢查重量、次數、登入身分；第一個失敗的規則即中止
    pub fn validate(
        &self,
        session: Option<&Session>,
    ) -> std::result::Result<NewWeightRecord, ValidationError> {
        let peso = parse_positive_weight(&self.peso_discos_lb)
            .ok_or(ValidationError::InvalidWeight)?;
        let reps =
            parse_positive_count(&self.nrepeticiones).ok_or(ValidationError::InvalidRepetitions)?;
        let usuario = session
            .map(|s| s.email.trim())
            .filter(|email| !email.is_empty())
            .ok_or(ValidationError::MissingUser)?;

        Ok(NewWeightRecord {
            usuario: usuario.to_string(),
            ejercicio: self.ejercicio,
            peso_discos_lb: peso,
            nrepeticiones: reps,
        })
    }

    /// 成功後清空重量、次數回到 1，保留動作選擇
    fn reset_after_success(&mut self) {
        self.peso_discos_lb.clear();
        self.nrepeticiones = DEFAULT_REPS.to_string();
    }

    pub async fn submit<A: WeightApi + ?Sized>(
        &mut self,
        api: &A,
        session: Option<&Session>,
    ) -> Result<CreateResponse> {
        let record = self.validate(session).map_err(|e| {
            tracing::warn!("Submission rejected: {}", e);
            TrackerError::from(e)
        })?;

        let response = api.create_weight_record(&record).await?;
        if !response.is_success() {
            let message = response
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_SAVE_ERROR.to_string());
            tracing::error!("Server refused record: {}", message);
            return Err(TrackerError::RejectedError { message });
        }

        tracing::info!(
            "Saved {} {} lb x {}",
            record.ejercicio,
            record.peso_discos_lb,
            record.nrepeticiones
        );
        self.reset_after_success();
        Ok(response)
    }
}
