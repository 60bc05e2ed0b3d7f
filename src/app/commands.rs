use crate::core::client::DEFAULT_AUDIO_FILE_NAME;
use crate::core::history::{fetch as fetch_history, HistoryView};
use crate::core::plates::default_plate_table;
use crate::core::render::{self, OutputFormat};
use crate::core::session::SessionManager;
use crate::core::submission::WeightForm;
use crate::domain::model::{Exercise, WeightRecord};
use crate::domain::ports::{SessionStore, WeightApi};
use crate::utils::error::{Result, TrackerError, ValidationError};
use std::path::Path;

/// 驗證並送出一筆紀錄，回傳成功訊息
pub async fn record<A, S>(
    api: &A,
    sessions: &SessionManager<S>,
    exercise: &str,
    weight: &str,
    reps: &str,
) -> Result<String>
where
    A: WeightApi + ?Sized,
    S: SessionStore,
{
    let ejercicio: Exercise = exercise.parse()?;
    let mut form = WeightForm::new(ejercicio, weight, reps);
    form.submit(api, sessions.current()).await?;
    Ok(format!(
        "Record saved: {} {} lb x {}",
        ejercicio,
        weight.trim(),
        reps.trim()
    ))
}

pub async fn history<A, S>(
    api: &A,
    sessions: &SessionManager<S>,
    exercise: &str,
) -> Result<Vec<WeightRecord>>
where
    A: WeightApi + ?Sized,
    S: SessionStore,
{
    let ejercicio: Exercise = exercise.parse()?;
    let session = sessions.require()?;

    // 先設使用者再選動作，只會在第二步拿到唯一一張 ticket
    let mut view = HistoryView::new();
    view.set_user(Some(session.email.clone()));
    if let Some(ticket) = view.select_exercise(Some(ejercicio)) {
        let outcome = fetch_history(api, &ticket).await;
        view.complete(&ticket, outcome);
    }

    if let Some(message) = view.error() {
        return Err(TrackerError::HistoryError {
            message: message.to_string(),
        });
    }
    Ok(view.records().to_vec())
}

pub async fn history_report<A, S>(
    api: &A,
    sessions: &SessionManager<S>,
    exercise: &str,
    format: OutputFormat,
) -> Result<String>
where
    A: WeightApi + ?Sized,
    S: SessionStore,
{
    let records = history(api, sessions, exercise).await?;
    render::history(&records, format)
}

/// 上傳語音檔；需要已登入的身分
pub async fn audio<A, S>(
    api: &A,
    sessions: &SessionManager<S>,
    file: &Path,
) -> Result<serde_json::Value>
where
    A: WeightApi + ?Sized,
    S: SessionStore,
{
    let session = sessions.require()?;
    let audio = tokio::fs::read(file).await?;
    if audio.is_empty() {
        tracing::warn!("Audio file {} is empty", file.display());
        return Err(ValidationError::EmptyAudio.into());
    }

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_AUDIO_FILE_NAME);

    let ack = api.upload_audio(&session.email, audio, file_name).await?;
    tracing::info!("Audio processed for {}", session.email);
    Ok(ack)
}

pub fn plates(format: OutputFormat) -> Result<String> {
    render::plates(&default_plate_table(), format)
}

pub fn exercises() -> String {
    Exercise::ALL
        .iter()
        .map(|e| e.name())
        .collect::<Vec<_>>()
        .join("\n")
}
