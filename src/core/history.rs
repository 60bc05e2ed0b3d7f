//! History view state: which exercise and user are selected, what was last
//! loaded, and which request is allowed to update it.
//!
//! Every fetch takes a strictly increasing token. Only the completion carrying
//! the latest token is applied; older ones are dropped, so a slow response for
//! a previous filter can never overwrite a newer result.

use crate::domain::model::{Exercise, WeightRecord};
use crate::domain::ports::WeightApi;
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Reverse;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load history";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub usuario: String,
    pub ejercicio: Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct HistoryView {
    exercise: Option<Exercise>,
    usuario: Option<String>,
    records: Vec<WeightRecord>,
    loading: bool,
    error: Option<String>,
    latest_token: u64,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exercise(&self) -> Option<Exercise> {
        self.exercise
    }

    pub fn usuario(&self) -> Option<&str> {
        self.usuario.as_deref()
    }

    pub fn records(&self) -> &[WeightRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 切換動作；有變動且使用者已知時回傳新的請求票根
    pub fn select_exercise(&mut self, exercise: Option<Exercise>) -> Option<FetchTicket> {
        if self.exercise == exercise {
            return None;
        }
        self.exercise = exercise;
        self.on_filter_changed()
    }

    pub fn set_user(&mut self, usuario: Option<String>) -> Option<FetchTicket> {
        let usuario = usuario.filter(|u| !u.trim().is_empty());
        if self.usuario == usuario {
            return None;
        }
        self.usuario = usuario;
        self.on_filter_changed()
    }

    fn on_filter_changed(&mut self) -> Option<FetchTicket> {
        let ticket = self.begin_fetch();
        if ticket.is_none() {
            // 條件不完整：清空畫面並讓進行中的請求失效
            self.latest_token += 1;
            self.records.clear();
            self.loading = false;
            self.error = None;
        }
        ticket
    }

    /// 以目前的篩選條件開始一次查詢
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let ejercicio = self.exercise?;
        let usuario = self.usuario.clone()?;

        self.latest_token += 1;
        self.loading = true;
        self.error = None;

        Some(FetchTicket {
            token: self.latest_token,
            usuario,
            ejercicio,
        })
    }

    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<WeightRecord>>,
    ) -> Completion {
        if ticket.token != self.latest_token {
            tracing::debug!(
                "Discarding stale history response (token {}, latest {})",
                ticket.token,
                self.latest_token
            );
            return Completion::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(mut records) => {
                sort_newest_first(&mut records);
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load history: {}", e);
                self.records.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        Completion::Applied
    }
}

pub async fn fetch<A: WeightApi + ?Sized>(
    api: &A,
    ticket: &FetchTicket,
) -> Result<Vec<WeightRecord>> {
    tracing::debug!(
        "Loading history for {} / {} (token {})",
        ticket.usuario,
        ticket.ejercicio,
        ticket.token
    );
    api.get_weight_records(&ticket.usuario, ticket.ejercicio.name())
        .await
}

/// `fecha` + `hora` 組成的時間；任一缺少或無法解析時回傳 None
pub fn record_timestamp(record: &WeightRecord) -> Option<NaiveDateTime> {
    let fecha = record.fecha.as_deref()?.trim();
    let hora = record.hora.as_deref()?.trim();

    let date = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(fecha, f).ok())?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(hora, f).ok())?;

    Some(date.and_time(time))
}

/// 新的在前；無法判斷時間的紀錄排在最後並維持伺服器順序
pub fn sort_newest_first(records: &mut [WeightRecord]) {
    records.sort_by_cached_key(|r| Reverse(record_timestamp(r)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TrackerError;

    fn record(fecha: Option<&str>, hora: Option<&str>, peso: f64) -> WeightRecord {
        WeightRecord {
            id: None,
            usuario: "a@b.com".to_string(),
            ejercicio: "Deadlift".to_string(),
            peso_discos_lb: Some(peso),
            peso_discos_kg: None,
            nrepeticiones: Some(1.0),
            fecha: fecha.map(str::to_string),
            hora: hora.map(str::to_string),
            rm: None,
            rm_lb: None,
            rm_kg: None,
            peso_barra: None,
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![
            record(Some("2024-01-01"), Some("09:00"), 1.0),
            record(Some("2024-01-02"), Some("10:00"), 2.0),
        ];
        sort_newest_first(&mut records);
        assert_eq!(records[0].peso_discos_lb, Some(2.0));
        assert_eq!(records[1].peso_discos_lb, Some(1.0));
    }

    #[test]
    fn test_sort_uses_time_within_same_day() {
        let mut records = vec![
            record(Some("2024-03-05"), Some("08:15:00"), 1.0),
            record(Some("2024-03-05"), Some("18:45:30"), 2.0),
            record(Some("05/03/2024"), Some("12:00"), 3.0),
        ];
        sort_newest_first(&mut records);
        let order: Vec<f64> = records.iter().filter_map(|r| r.peso_discos_lb).collect();
        assert_eq!(order, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_unparseable_timestamps_go_last_in_server_order() {
        let mut records = vec![
            record(None, None, 1.0),
            record(Some("2024-01-01"), Some("09:00"), 2.0),
            record(Some("yesterday"), Some("09:00"), 3.0),
            record(Some("2024-01-01"), None, 4.0),
        ];
        sort_newest_first(&mut records);
        let order: Vec<f64> = records.iter().filter_map(|r| r.peso_discos_lb).collect();
        assert_eq!(order, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_no_fetch_until_exercise_and_user_known() {
        let mut view = HistoryView::new();
        assert!(view.select_exercise(Some(Exercise::Clean)).is_none());
        assert!(!view.is_loading());

        let ticket = view.set_user(Some("a@b.com".to_string())).unwrap();
        assert_eq!(ticket.ejercicio, Exercise::Clean);
        assert_eq!(ticket.usuario, "a@b.com");
        assert!(view.is_loading());
    }

    #[test]
    fn test_user_then_exercise_issues_one_applicable_ticket() {
        let mut view = HistoryView::new();
        assert!(view.set_user(Some("a@b.com".to_string())).is_none());

        let ticket = view.select_exercise(Some(Exercise::Snatch)).unwrap();
        let records = vec![
            record(Some("2024-01-01"), Some("09:00"), 95.0),
            record(Some("2024-01-02"), Some("10:00"), 115.0),
        ];
        assert_eq!(view.complete(&ticket, Ok(records)), Completion::Applied);
        assert_eq!(view.records()[0].peso_discos_lb, Some(115.0));
        assert!(!view.is_loading());
        assert!(view.error().is_none());
    }

    #[test]
    fn test_same_selection_does_not_refetch() {
        let mut view = HistoryView::new();
        view.set_user(Some("a@b.com".to_string()));
        assert!(view.select_exercise(Some(Exercise::Snatch)).is_some());
        assert!(view.select_exercise(Some(Exercise::Snatch)).is_none());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut view = HistoryView::new();
        view.set_user(Some("a@b.com".to_string()));
        let first = view.select_exercise(Some(Exercise::Clean)).unwrap();
        let second = view.select_exercise(Some(Exercise::Deadlift)).unwrap();
        assert!(second.token > first.token);

        let newest = vec![record(Some("2024-01-02"), Some("10:00"), 315.0)];
        assert_eq!(view.complete(&second, Ok(newest.clone())), Completion::Applied);

        // 較早的請求晚到，不能覆蓋
        let old = vec![record(Some("2023-01-01"), Some("10:00"), 135.0)];
        assert_eq!(view.complete(&first, Ok(old)), Completion::Stale);
        assert_eq!(view.records(), newest.as_slice());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_failure_resets_records_and_sets_error() {
        let mut view = HistoryView::new();
        view.set_user(Some("a@b.com".to_string()));
        let ticket = view.select_exercise(Some(Exercise::Clean)).unwrap();
        view.complete(&ticket, Ok(vec![record(None, None, 1.0)]));
        assert_eq!(view.records().len(), 1);

        let ticket = view.begin_fetch().unwrap();
        let failure = Err(TrackerError::ServerError {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(view.complete(&ticket, failure), Completion::Applied);
        assert!(view.records().is_empty());
        assert_eq!(view.error(), Some(LOAD_ERROR_MESSAGE));
        assert!(!view.is_loading());
    }

    #[test]
    fn test_sign_out_clears_view_and_invalidates_in_flight() {
        let mut view = HistoryView::new();
        view.set_user(Some("a@b.com".to_string()));
        let ticket = view.select_exercise(Some(Exercise::Clean)).unwrap();

        assert!(view.set_user(None).is_none());
        assert!(view.records().is_empty());
        assert!(!view.is_loading());
        assert_eq!(
            view.complete(&ticket, Ok(vec![record(None, None, 1.0)])),
            Completion::Stale
        );
        assert!(view.records().is_empty());
    }
}
