use crate::domain::model::PlateRow;

pub const MEN_BAR_LB: f64 = 45.0;
pub const WOMEN_BAR_LB: f64 = 35.0;
pub const LB_TO_KG: f64 = 0.453_592_37;

pub const DEFAULT_MAX_PER_SIDE_LB: f64 = 200.0;
pub const DEFAULT_STEP_LB: f64 = 5.0;

pub fn lb_to_kg(lb: f64) -> f64 {
    (lb * LB_TO_KG * 10.0).round() / 10.0
}

pub fn plate_row(pounds_per_side: f64) -> PlateRow {
    let loaded = pounds_per_side * 2.0;
    let men_total_lb = loaded + MEN_BAR_LB;
    let women_total_lb = loaded + WOMEN_BAR_LB;

    PlateRow {
        pounds_per_side,
        men_total_lb,
        men_total_kg: lb_to_kg(men_total_lb),
        women_total_lb,
        women_total_kg: lb_to_kg(women_total_lb),
    }
}

/// 從 0 開始每 `step_lb` 一列，直到 `max_per_side_lb`（含）
pub fn plate_table(max_per_side_lb: f64, step_lb: f64) -> Vec<PlateRow> {
    if step_lb <= 0.0 || max_per_side_lb < 0.0 {
        return Vec::new();
    }

    let steps = (max_per_side_lb / step_lb).floor() as usize;
    (0..=steps).map(|i| plate_row(i as f64 * step_lb)).collect()
}

pub fn default_plate_table() -> Vec<PlateRow> {
    plate_table(DEFAULT_MAX_PER_SIDE_LB, DEFAULT_STEP_LB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forty_five_per_side() {
        let row = plate_row(45.0);
        assert_eq!(row.men_total_lb, 135.0);
        assert_eq!(row.men_total_kg, 61.2);
        assert_eq!(row.women_total_lb, 125.0);
        assert_eq!(row.women_total_kg, 56.7);
    }

    #[test]
    fn test_empty_bar_row() {
        let row = plate_row(0.0);
        assert_eq!(row.men_total_lb, 45.0);
        assert_eq!(row.men_total_kg, 20.4);
        assert_eq!(row.women_total_lb, 35.0);
        assert_eq!(row.women_total_kg, 15.9);
    }

    #[test]
    fn test_default_table_bounds() {
        let table = default_plate_table();
        assert_eq!(table.len(), 41);
        assert_eq!(table.first().unwrap().pounds_per_side, 0.0);
        assert_eq!(table.last().unwrap().pounds_per_side, 200.0);
        assert_eq!(table.last().unwrap().men_total_lb, 445.0);
    }

    #[test]
    fn test_invalid_step_yields_empty_table() {
        assert!(plate_table(100.0, 0.0).is_empty());
        assert!(plate_table(-5.0, 5.0).is_empty());
    }
}
