//! Interaction trend
//!
//! Daily buckets of the vote and comment records a user authored, oldest day first. Days
//! are UTC calendar days and the window ends with the day containing `now`.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use showcase_core::{Comment, Vote};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
	pub date: NaiveDate,
	pub votes: usize,
	pub comments: usize,
}

impl TrendPoint {
	pub fn total(&self) -> usize {
		self.votes + self.comments
	}
}

/// One point per day for the last `days` days; records outside the window are ignored
pub fn interaction_trend(
	votes: &[Vote],
	comments: &[Comment],
	now: DateTime<Utc>,
	days: usize,
) -> Vec<TrendPoint> {
	let today = now.date_naive();
	let dates: Vec<NaiveDate> = (0..days as u64)
		.rev()
		.filter_map(|back| today.checked_sub_days(Days::new(back)))
		.collect();

	let mut buckets: HashMap<NaiveDate, TrendPoint> = dates
		.iter()
		.map(|date| {
			(
				*date,
				TrendPoint {
					date: *date,
					votes: 0,
					comments: 0,
				},
			)
		})
		.collect();
	for vote in votes {
		if let Some(point) = buckets.get_mut(&vote.created_at.date_naive()) {
			point.votes += 1;
		}
	}
	for comment in comments {
		if let Some(point) = buckets.get_mut(&comment.created_at.date_naive()) {
			point.comments += 1;
		}
	}

	dates
		.iter()
		.filter_map(|date| buckets.remove(date))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{Duration, TimeZone};
	use showcase_core::{ProfileId, ProjectId};

	#[test]
	fn test_buckets_per_day_oldest_first() {
		let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
		let user = ProfileId::new();
		let vote_at = |at: DateTime<Utc>| {
			let mut vote = Vote::new(user, ProjectId::new());
			vote.created_at = at;
			vote
		};
		let votes = vec![
			vote_at(now),
			vote_at(now - Duration::hours(14)),
			vote_at(now - Duration::days(2)),
			vote_at(now - Duration::days(30)),
		];
		let mut comment = Comment::new(ProjectId::new(), user, "hi");
		comment.created_at = now - Duration::days(1);

		let trend = interaction_trend(&votes, &[comment], now, 3);

		let summary: Vec<(String, usize, usize)> = trend
			.iter()
			.map(|p| (p.date.to_string(), p.votes, p.comments))
			.collect();
		assert_eq!(
			summary,
			vec![
				("2025-03-08".to_string(), 1, 0),
				("2025-03-09".to_string(), 0, 1),
				("2025-03-10".to_string(), 2, 0),
			]
		);
	}

	#[test]
	fn test_zero_days() {
		assert!(interaction_trend(&[], &[], Utc::now(), 0).is_empty());
	}
}
