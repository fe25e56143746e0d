//! Five-bar summary of the values the user submitted, before encoding

use attrition_features::RawInputRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBar {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputSummary {
    bars: Vec<SummaryBar>,
}

impl InputSummary {
    pub fn from_raw(raw: &RawInputRecord) -> Self {
        let bars = [
            ("Satisfaction", raw.satisfaction_level_pct),
            ("Evaluation", raw.last_evaluation_pct),
            ("Projects", raw.number_project),
            ("Monthly Hours", raw.average_monthly_hours),
            ("Years", raw.time_spend_company),
        ]
        .into_iter()
        .map(|(label, v)| SummaryBar {
            label,
            value: f64::from(v),
        })
        .collect();
        Self { bars }
    }

    pub fn bars(&self) -> &[SummaryBar] {
        &self.bars
    }

    /// Horizontal bars scaled so the largest value spans `max_width` cells
    pub fn render_ascii(&self, max_width: usize) -> Vec<String> {
        if max_width == 0 {
            return Vec::new();
        }
        let max_value = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let label_width = self.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);

        self.bars
            .iter()
            .map(|b| {
                let bar_len = if max_value <= 0.0 {
                    0
                } else {
                    ((b.value / max_value) * max_width as f64).round() as usize
                };
                format!(
                    "{:<label_width$} | {:<max_width$} {}",
                    b.label,
                    "#".repeat(bar_len),
                    b.value
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_follow_raw_values() {
        let s = InputSummary::from_raw(&RawInputRecord::default());
        let pairs: Vec<_> = s.bars().iter().map(|b| (b.label, b.value)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Satisfaction", 20.0),
                ("Evaluation", 70.0),
                ("Projects", 4.0),
                ("Monthly Hours", 160.0),
                ("Years", 3.0),
            ]
        );
    }

    #[test]
    fn ascii_scales_to_largest_bar() {
        let s = InputSummary::from_raw(&RawInputRecord::default());
        let lines = s.render_ascii(16);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], format!("Monthly Hours | {} 160", "#".repeat(16)));
        // 20 / 160 * 16 = 2
        assert!(lines[0].starts_with("Satisfaction  | ## "));
        assert!(s.render_ascii(0).is_empty());
    }

    #[test]
    fn serializes_as_label_value_list() {
        let s = InputSummary::from_raw(&RawInputRecord::default());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json[4]["label"], "Years");
        assert_eq!(json[4]["value"], 3.0);
    }
}
