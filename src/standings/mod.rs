//! Schedule and standings views.
//!
//! Read-only queries recomputed on every call from stored records:
//! - A team's schedule for a season, ordered by week
//! - Standings ordered from stored team season aggregates
//! - A win/loss tally recomputed from final game scores

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::calculate::win_percentage;
use crate::models::{ConferenceId, Game, SchoolId, SeasonId, TeamSeason};

/// Every game in `season` that `team` played home or away, ordered by week.
///
/// Games in the same week keep their input order.
pub fn schedule_for<'a, I>(games: I, team: SchoolId, season: SeasonId) -> Vec<&'a Game>
where
    I: IntoIterator<Item = &'a Game>,
{
    let mut schedule: Vec<&Game> = games
        .into_iter()
        .filter(|g| g.season == season && g.involves(team))
        .collect();
    schedule.sort_by_key(|g| g.week);
    schedule
}

/// Win/loss tally for one team, computed from final games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: Option<SchoolId>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: i32,
    pub points_against: i32,
    pub conference_wins: u32,
    pub conference_losses: u32,
    pub conference_ties: u32,
}

impl TeamRecord {
    /// Games counted in this record.
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Win percentage over decided games, 3 decimals.
    pub fn win_percentage(&self) -> f64 {
        win_percentage(self.wins, self.losses)
    }

    /// Copy the tally onto a stored season aggregate.
    pub fn apply_to(&self, line: &mut TeamSeason) {
        line.wins = self.wins;
        line.losses = self.losses;
        line.points_for = self.points_for;
        line.points_against = self.points_against;
        line.conference_wins = self.conference_wins;
        line.conference_losses = self.conference_losses;
    }
}

/// Tally `team`'s record for `season`. Only games with a final status count.
pub fn tally_record<'a, I>(games: I, team: SchoolId, season: SeasonId) -> TeamRecord
where
    I: IntoIterator<Item = &'a Game>,
{
    let mut record = TeamRecord {
        team: Some(team),
        ..Default::default()
    };

    for game in schedule_for(games, team, season) {
        if !game.details.status.is_final() {
            continue;
        }
        let Some((scored, allowed)) = game.score_for(team) else {
            continue;
        };

        record.points_for += scored;
        record.points_against += allowed;

        let conference = game.details.conference_game;
        match scored.cmp(&allowed) {
            Ordering::Greater => {
                record.wins += 1;
                if conference {
                    record.conference_wins += 1;
                }
            }
            Ordering::Less => {
                record.losses += 1;
                if conference {
                    record.conference_losses += 1;
                }
            }
            Ordering::Equal => {
                record.ties += 1;
                if conference {
                    record.conference_ties += 1;
                }
            }
        }
    }

    record
}

/// Unplaced teams (place 0) sort after every placed team.
fn compare_place(a: &TeamSeason, b: &TeamSeason) -> Ordering {
    match (a.place, b.place) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (x, y) => x.cmp(&y),
    }
}

fn compare_conference_pct(a: &TeamSeason, b: &TeamSeason) -> Ordering {
    let pa = win_percentage(a.conference_wins, a.conference_losses);
    let pb = win_percentage(b.conference_wins, b.conference_losses);
    pb.total_cmp(&pa)
}

fn compare_overall_pct(a: &TeamSeason, b: &TeamSeason) -> Ordering {
    let pa = win_percentage(a.wins, a.losses);
    let pb = win_percentage(b.wins, b.losses);
    pb.total_cmp(&pa)
}

fn compare_differential(a: &TeamSeason, b: &TeamSeason) -> Ordering {
    b.point_differential().cmp(&a.point_differential())
}

/// Standings for a season, optionally limited to one conference.
///
/// Ordered by final place, then conference win percentage, then overall win
/// percentage, then point differential. Full ties keep input order.
pub fn standings<'a, I>(
    lines: I,
    season: SeasonId,
    conference: Option<ConferenceId>,
) -> Vec<&'a TeamSeason>
where
    I: IntoIterator<Item = &'a TeamSeason>,
{
    let mut table: Vec<&TeamSeason> = lines
        .into_iter()
        .filter(|l| l.season == season)
        .filter(|l| conference.map_or(true, |c| l.conference == Some(c)))
        .collect();

    table.sort_by(|a, b| {
        compare_place(a, b)
            .then_with(|| compare_conference_pct(a, b))
            .then_with(|| compare_overall_pct(a, b))
            .then_with(|| compare_differential(a, b))
    });
    table
}
