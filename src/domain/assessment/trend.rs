//! Progress across a user's assessment history.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Change in percentage points that counts as a real movement.
pub const TREND_THRESHOLD: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub taken_at: Timestamp,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentTrend {
    pub count: usize,
    pub average_percentage: Option<f64>,
    pub latest_percentage: Option<u8>,
    pub direction: TrendDirection,
    /// Oldest first.
    pub series: Vec<TrendPoint>,
}

/// Builds the trend from points in any order.
pub fn compute_trend(mut points: Vec<TrendPoint>) -> AssessmentTrend {
    points.sort_by(|a, b| a.taken_at.cmp(&b.taken_at));

    let count = points.len();
    let average_percentage = if count == 0 {
        None
    } else {
        let sum: u32 = points.iter().map(|p| u32::from(p.percentage)).sum();
        Some((f64::from(sum) / count as f64 * 10.0).round() / 10.0)
    };

    let direction = match points.as_slice() {
        [.., previous, latest] => {
            let delta = i16::from(latest.percentage) - i16::from(previous.percentage);
            if delta >= TREND_THRESHOLD {
                TrendDirection::Improving
            } else if delta <= -TREND_THRESHOLD {
                TrendDirection::Declining
            } else {
                TrendDirection::Stable
            }
        }
        _ => TrendDirection::InsufficientData,
    };

    AssessmentTrend {
        count,
        average_percentage,
        latest_percentage: points.last().map(|p| p.percentage),
        direction,
        series: points,
    }
}
