use crate::utils::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可記錄的八種動作，序列化時使用顯示名稱
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exercise {
    #[default]
    #[serde(rename = "Clean")]
    Clean,
    #[serde(rename = "Squat Clean")]
    SquatClean,
    #[serde(rename = "Clean & Jerk")]
    CleanAndJerk,
    #[serde(rename = "Front Squat")]
    FrontSquat,
    #[serde(rename = "Back Squat")]
    BackSquat,
    #[serde(rename = "Snatch")]
    Snatch,
    #[serde(rename = "Squat Snatch")]
    SquatSnatch,
    #[serde(rename = "Deadlift")]
    Deadlift,
}

impl Exercise {
    pub const ALL: [Exercise; 8] = [
        Exercise::Clean,
        Exercise::SquatClean,
        Exercise::CleanAndJerk,
        Exercise::FrontSquat,
        Exercise::BackSquat,
        Exercise::Snatch,
        Exercise::SquatSnatch,
        Exercise::Deadlift,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::Clean => "Clean",
            Exercise::SquatClean => "Squat Clean",
            Exercise::CleanAndJerk => "Clean & Jerk",
            Exercise::FrontSquat => "Front Squat",
            Exercise::BackSquat => "Back Squat",
            Exercise::Snatch => "Snatch",
            Exercise::SquatSnatch => "Squat Snatch",
            Exercise::Deadlift => "Deadlift",
        }
    }

    fn slug(&self) -> String {
        self.name()
            .to_lowercase()
            .replace(" & ", "-and-")
            .replace(' ', "-")
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = ValidationError;

    /// 接受顯示名稱（不分大小寫）或 kebab-case，例如 `front-squat`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Exercise::ALL
            .into_iter()
            .find(|e| e.name().to_lowercase() == needle || e.slug() == needle)
            .ok_or_else(|| ValidationError::UnknownExercise(s.to_string()))
    }
}

/// 後端回傳的一筆紀錄；伺服器端欄位皆為選填，數值欄位接受整數、小數或數字字串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub ejercicio: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub peso_discos_lb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub peso_discos_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub nrepeticiones: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rm_lb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rm_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub peso_barra: Option<f64>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// 數字或數字字串；其他型別（含 null）視為缺值
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        })
    }
}

/// POST 的請求本體
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWeightRecord {
    pub usuario: String,
    pub ejercicio: Exercise,
    pub peso_discos_lb: f64,
    pub nrepeticiones: u32,
}

/// POST 成功時的回應；只看 `status`，`data` 保留原樣不解析
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CreateResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateRow {
    pub pounds_per_side: f64,
    pub men_total_lb: f64,
    pub men_total_kg: f64,
    pub women_total_lb: f64,
    pub women_total_kg: f64,
}
