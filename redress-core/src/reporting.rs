//! Reporting reductions over the complaint list
//!
//! All aggregates are computed in memory from the complaints visible to the
//! caller; nothing is materialized. Maps are keyed by the snake_case status
//! and priority names and by category id (the API layer joins in category
//! names).

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ComplaintRecord;

/// Default trend window in days
pub const DEFAULT_TREND_DAYS: u32 = 14;

/// One day in the submitted/resolved trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub submitted: u64,
    pub resolved: u64,
}

/// Aggregate view over a set of complaints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintSummary {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    /// category id -> complaint count
    pub by_category: BTreeMap<String, u64>,
    /// category id -> mean whole-day resolution time over resolved complaints
    pub avg_resolution_days: BTreeMap<String, f64>,
    /// Oldest day first, covering the requested window up to `now`
    pub trend: Vec<TrendPoint>,
}

/// Reduce a complaint list into the summary aggregates.
///
/// `now` anchors the trend window so callers (and tests) control the clock.
pub fn summarize(
    complaints: &[ComplaintRecord],
    trend_days: u32,
    now: DateTime<Utc>,
) -> ComplaintSummary {
    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_priority: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_category: BTreeMap<String, u64> = BTreeMap::new();
    let mut resolution_sums: BTreeMap<String, (i64, u64)> = BTreeMap::new();

    for complaint in complaints {
        *by_status.entry(complaint.status.to_string()).or_insert(0) += 1;
        *by_priority
            .entry(complaint.priority.to_string())
            .or_insert(0) += 1;
        *by_category
            .entry(complaint.category_id.clone())
            .or_insert(0) += 1;

        if let Some(days) = complaint.resolution_days() {
            let entry = resolution_sums
                .entry(complaint.category_id.clone())
                .or_insert((0, 0));
            entry.0 += days;
            entry.1 += 1;
        }
    }

    let avg_resolution_days = resolution_sums
        .into_iter()
        .map(|(category_id, (sum, count))| (category_id, sum as f64 / count as f64))
        .collect();

    ComplaintSummary {
        total: complaints.len() as u64,
        by_status,
        by_priority,
        by_category,
        avg_resolution_days,
        trend: trend(complaints, trend_days, now),
    }
}

/// Per-day submitted/resolved counts for the trailing window ending at `now`
pub fn trend(complaints: &[ComplaintRecord], days: u32, now: DateTime<Utc>) -> Vec<TrendPoint> {
    let days = days.max(1);
    let today = now.date_naive();
    let mut points: Vec<TrendPoint> = (0..days)
        .rev()
        .map(|back| TrendPoint {
            date: today - Duration::days(back as i64),
            submitted: 0,
            resolved: 0,
        })
        .collect();
    let first_day = points[0].date;

    for complaint in complaints {
        let created = complaint.created_at.date_naive();
        if created >= first_day && created <= today {
            let idx = (created - first_day).num_days() as usize;
            points[idx].submitted += 1;
        }
        if let Some(resolved_at) = complaint.resolved_at {
            let resolved = resolved_at.date_naive();
            if resolved >= first_day && resolved <= today {
                let idx = (resolved - first_day).num_days() as usize;
                points[idx].resolved += 1;
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComplaintPriority, ComplaintStatus};
    use chrono::TimeZone;

    fn complaint(
        id: &str,
        category: &str,
        status: ComplaintStatus,
        priority: ComplaintPriority,
        created_at: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> ComplaintRecord {
        ComplaintRecord {
            complaint_id: id.to_string(),
            owner_id: "user:001".to_string(),
            category_id: category.to_string(),
            subject: "Broken projector".to_string(),
            description: "The projector in room 204 stopped working".to_string(),
            status,
            priority,
            admin_response: None,
            attachment_path: None,
            created_at,
            updated_at: created_at,
            resolved_at,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_histograms() {
        let now = fixed_now();
        let complaints = vec![
            complaint(
                "cmp:1",
                "cat:a",
                ComplaintStatus::Submitted,
                ComplaintPriority::Medium,
                now,
                None,
            ),
            complaint(
                "cmp:2",
                "cat:a",
                ComplaintStatus::Resolved,
                ComplaintPriority::High,
                now - Duration::days(4),
                Some(now - Duration::days(1)),
            ),
            complaint(
                "cmp:3",
                "cat:b",
                ComplaintStatus::InReview,
                ComplaintPriority::Medium,
                now,
                None,
            ),
        ];

        let summary = summarize(&complaints, 7, now);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_status["submitted"], 1);
        assert_eq!(summary.by_status["in_review"], 1);
        assert_eq!(summary.by_status["resolved"], 1);
        assert_eq!(summary.by_priority["medium"], 2);
        assert_eq!(summary.by_priority["high"], 1);
        assert_eq!(summary.by_category["cat:a"], 2);
        assert_eq!(summary.by_category["cat:b"], 1);
    }

    #[test]
    fn test_avg_resolution_days_per_category() {
        let now = fixed_now();
        let complaints = vec![
            complaint(
                "cmp:1",
                "cat:a",
                ComplaintStatus::Resolved,
                ComplaintPriority::Medium,
                now - Duration::days(10),
                Some(now - Duration::days(8)), // 2 days
            ),
            complaint(
                "cmp:2",
                "cat:a",
                ComplaintStatus::Resolved,
                ComplaintPriority::Medium,
                now - Duration::days(10),
                Some(now - Duration::days(6)), // 4 days
            ),
            complaint(
                "cmp:3",
                "cat:b",
                ComplaintStatus::Submitted,
                ComplaintPriority::Medium,
                now,
                None,
            ),
        ];

        let summary = summarize(&complaints, 7, now);
        assert_eq!(summary.avg_resolution_days["cat:a"], 3.0);
        assert!(!summary.avg_resolution_days.contains_key("cat:b"));
    }

    #[test]
    fn test_trend_window() {
        let now = fixed_now();
        let complaints = vec![
            complaint(
                "cmp:1",
                "cat:a",
                ComplaintStatus::Resolved,
                ComplaintPriority::Medium,
                now - Duration::days(2),
                Some(now),
            ),
            complaint(
                "cmp:2",
                "cat:a",
                ComplaintStatus::Submitted,
                ComplaintPriority::Medium,
                now - Duration::days(2),
                None,
            ),
            // outside the window
            complaint(
                "cmp:3",
                "cat:a",
                ComplaintStatus::Submitted,
                ComplaintPriority::Medium,
                now - Duration::days(30),
                None,
            ),
        ];

        let points = trend(&complaints, 7, now);
        assert_eq!(points.len(), 7);
        assert_eq!(points[6].date, now.date_naive());
        assert_eq!(points[6].resolved, 1);
        assert_eq!(points[4].submitted, 2);
        let total_submitted: u64 = points.iter().map(|p| p.submitted).sum();
        assert_eq!(total_submitted, 2);
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&[], 7, fixed_now());
        assert_eq!(summary.total, 0);
        assert!(summary.by_status.is_empty());
        assert_eq!(summary.trend.len(), 7);
    }
}
