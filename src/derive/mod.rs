//! Entity derivation pipeline.
//!
//! Every record passes through [`Derive::derive`] before it is committed:
//! - Games get their home and away totals summed from the period scores
//! - Player game and season lines get their rates and passer rating
//! - Every record without a slug gets one generated from its label
//!
//! Numeric derivation reads only the record itself and always recomputes from
//! scratch. Labels may look up related records through a [`Directory`]; a
//! slug that is already set is never regenerated.

mod labels;

pub use labels::*;

use thiserror::Error;
use tracing::debug;

use crate::calculate::{
    passer_rating, safe_ratio, side_total, PERCENTAGE_PRECISION, YARDS_PER_PRECISION,
};
use crate::models::{
    slug_missing, slugify, Conference, FootballStats, Game, GameId, Player, PlayerGame, PlayerId,
    PlayerRates, PlayerSeason, Position, RecordId, School, SchoolId, Season, SeasonId, Sport,
    SportId, TeamGame, TeamSeason, MAX_SHORT_NAME_LEN,
};

/// Errors raised while deriving a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    #[error("Cannot build label: {kind} {id} not found")]
    MissingReference { kind: &'static str, id: RecordId },

    #[error("Position short name '{short_name}' is longer than {max} characters")]
    ShortNameTooLong { short_name: String, max: usize },
}

/// Read-only lookup of related records, used only to compose labels.
pub trait Directory {
    fn sport(&self, id: SportId) -> Option<&Sport>;
    fn season(&self, id: SeasonId) -> Option<&Season>;
    fn school(&self, id: SchoolId) -> Option<&School>;
    fn player(&self, id: PlayerId) -> Option<&Player>;
    fn game(&self, id: GameId) -> Option<&Game>;
}

/// A record that must be derived before it is committed.
pub trait Derive {
    /// Recompute every derived field and fill in a missing slug.
    ///
    /// On error the record is left untouched.
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError>;
}

/// Keep an existing slug, or generate one from the label.
fn resolve_slug<F>(current: &Option<String>, label: F) -> Result<Option<String>, DeriveError>
where
    F: FnOnce() -> Result<String, DeriveError>,
{
    if !slug_missing(current) {
        return Ok(current.clone());
    }
    Ok(Some(slugify(&label()?)))
}

/// Recompute a game's totals from its period scores.
pub fn derive_game_totals(game: &mut Game) {
    game.home_total_score = side_total(&game.home_scores);
    game.away_total_score = side_total(&game.away_scores);
}

/// Passer rating with the no-attempts case resolved to 0.0.
pub fn guarded_passer_rating(stats: &FootballStats) -> f64 {
    if stats.passing_attempts == 0 {
        return 0.0;
    }
    passer_rating(
        stats.passing_yards,
        stats.passing_touchdowns,
        stats.passing_completions,
        stats.passing_interceptions,
        stats.passing_attempts,
    )
}

/// Derive a player's rates from a raw stat line.
pub fn player_rates(stats: &FootballStats) -> PlayerRates {
    PlayerRates {
        rushing_yards_per_attempt: safe_ratio(
            stats.rushing_yards,
            stats.rushing_rushes,
            YARDS_PER_PRECISION,
        ),
        receiving_yards_per_reception: safe_ratio(
            stats.receiving_yards,
            stats.receiving_receptions,
            YARDS_PER_PRECISION,
        ),
        passing_yards_per_attempt: safe_ratio(
            stats.passing_yards,
            stats.passing_attempts,
            YARDS_PER_PRECISION,
        ),
        passing_completion_percentage: safe_ratio(
            stats.passing_completions,
            stats.passing_attempts,
            PERCENTAGE_PRECISION,
        ),
        passing_rating: guarded_passer_rating(stats),
    }
}

impl Derive for Sport {
    fn derive(&mut self, _dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || Ok(self.label()))?;
        Ok(())
    }
}

impl Derive for Conference {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || conference_label(self, dir))?;
        Ok(())
    }
}

impl Derive for Season {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || season_label(self, dir))?;
        Ok(())
    }
}

impl Derive for School {
    fn derive(&mut self, _dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || Ok(self.label()))?;
        Ok(())
    }
}

impl Derive for Player {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || player_label(self, dir))?;
        Ok(())
    }
}

impl Derive for Position {
    fn derive(&mut self, _dir: &dyn Directory) -> Result<(), DeriveError> {
        if self.short_name.chars().count() > MAX_SHORT_NAME_LEN {
            return Err(DeriveError::ShortNameTooLong {
                short_name: self.short_name.clone(),
                max: MAX_SHORT_NAME_LEN,
            });
        }
        self.slug = resolve_slug(&self.slug, || Ok(self.name.clone()))?;
        Ok(())
    }
}

impl Derive for Game {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        let slug = resolve_slug(&self.slug, || game_label(self, dir))?;
        derive_game_totals(self);
        self.slug = slug;

        debug!(
            "Derived game {:?}: {} - {}",
            self.slug, self.home_total_score, self.away_total_score
        );
        Ok(())
    }
}

impl Derive for TeamGame {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || team_game_label(self, dir))?;
        Ok(())
    }
}

impl Derive for TeamSeason {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        self.slug = resolve_slug(&self.slug, || team_season_label(self, dir))?;
        Ok(())
    }
}

impl Derive for PlayerGame {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        let slug = resolve_slug(&self.slug, || player_game_label(self, dir))?;
        self.rates = player_rates(&self.stats);
        self.slug = slug;

        debug!(
            "Derived player game {:?}: rating {}",
            self.slug, self.rates.passing_rating
        );
        Ok(())
    }
}

impl Derive for PlayerSeason {
    fn derive(&mut self, dir: &dyn Directory) -> Result<(), DeriveError> {
        let slug = resolve_slug(&self.slug, || player_season_label(self, dir))?;
        self.rates = player_rates(&self.stats);
        self.slug = slug;

        debug!(
            "Derived player season {:?}: rating {}",
            self.slug, self.rates.passing_rating
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, PeriodScores};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapDirectory {
        sports: HashMap<SportId, Sport>,
        seasons: HashMap<SeasonId, Season>,
        schools: HashMap<SchoolId, School>,
        players: HashMap<PlayerId, Player>,
        games: HashMap<GameId, Game>,
    }

    impl Directory for MapDirectory {
        fn sport(&self, id: SportId) -> Option<&Sport> {
            self.sports.get(&id)
        }
        fn season(&self, id: SeasonId) -> Option<&Season> {
            self.seasons.get(&id)
        }
        fn school(&self, id: SchoolId) -> Option<&School> {
            self.schools.get(&id)
        }
        fn player(&self, id: PlayerId) -> Option<&Player> {
            self.players.get(&id)
        }
        fn game(&self, id: GameId) -> Option<&Game> {
            self.games.get(&id)
        }
    }

    fn fixture() -> MapDirectory {
        let mut dir = MapDirectory::default();
        dir.sports
            .insert(SportId::new(1), Sport::new("Football", Gender::Boys));
        dir.seasons
            .insert(SeasonId::new(1), Season::new(2011, SportId::new(1)));
        dir.schools.insert(
            SchoolId::new(1),
            School::new("Central").with_mascot("Eagles"),
        );
        dir.schools
            .insert(SchoolId::new(2), School::new("North").with_mascot("Bears"));
        dir.players.insert(
            PlayerId::new(1),
            Player::new(SchoolId::new(1), "Sam", "Reed"),
        );
        dir.games.insert(
            GameId::new(5),
            Game::new(SeasonId::new(1), 3, SchoolId::new(1), SchoolId::new(2)),
        );
        dir
    }

    fn passing_line() -> FootballStats {
        FootballStats {
            passing_attempts: 30,
            passing_completions: 20,
            passing_yards: 250,
            passing_touchdowns: 3,
            passing_interceptions: 1,
            rushing_rushes: 12,
            rushing_yards: 87,
            receiving_receptions: 0,
            receiving_yards: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_game_totals_and_slug() {
        let dir = fixture();
        let mut game = Game::new(SeasonId::new(1), 3, SchoolId::new(1), SchoolId::new(2))
            .with_scores(
                PeriodScores::new([7, 10, 0, 3], [6, 0, 0]),
                PeriodScores::new([0, 14, 3, 3], [0, 0, 0]),
            );
        game.home_total_score = 999;

        game.derive(&dir).unwrap();

        assert_eq!(game.home_total_score, 26);
        assert_eq!(game.away_total_score, 20);
        assert_eq!(
            game.slug.as_deref(),
            Some("boys-football-2011-week-3-north-bears-at-central-eagles")
        );
    }

    #[test]
    fn test_game_totals_idempotent() {
        let dir = fixture();
        let mut game = Game::new(SeasonId::new(1), 1, SchoolId::new(1), SchoolId::new(2))
            .with_scores(PeriodScores::regulation([7, 7, 0, 0]), PeriodScores::default());

        game.derive(&dir).unwrap();
        let first = game.clone();
        game.derive(&dir).unwrap();

        assert_eq!(game, first);
        assert_eq!(game.home_total_score, 14);
    }

    #[test]
    fn test_slug_is_stable() {
        let dir = fixture();
        let mut game = Game::new(SeasonId::new(1), 3, SchoolId::new(1), SchoolId::new(2));
        game.slug = Some("opening-night".to_string());
        game.week = 9;
        game.away_team = SchoolId::new(1);
        game.home_team = SchoolId::new(2);

        game.derive(&dir).unwrap();

        assert_eq!(game.slug.as_deref(), Some("opening-night"));
    }

    #[test]
    fn test_blank_slug_is_regenerated() {
        let dir = fixture();
        let mut school = School::new("Central").with_mascot("Eagles");
        school.slug = Some(String::new());

        school.derive(&dir).unwrap();

        assert_eq!(school.slug.as_deref(), Some("central-eagles"));
    }

    #[test]
    fn test_player_game_rates() {
        let dir = fixture();
        let mut line = PlayerGame::new(PlayerId::new(1), GameId::new(5)).with_stats(passing_line());
        line.id = Some(RecordId::new(88));

        line.derive(&dir).unwrap();

        assert_eq!(
            line.rates,
            PlayerRates {
                rushing_yards_per_attempt: 7.3,
                receiving_yards_per_reception: 0.0,
                passing_yards_per_attempt: 8.3,
                passing_completion_percentage: 0.667,
                passing_rating: 163.0,
            }
        );
        assert_eq!(
            line.slug.as_deref(),
            Some("week-3-sam-reed-central-eagles-stats-88")
        );
    }

    #[test]
    fn test_player_season_zero_attempts() {
        let dir = fixture();
        let mut line = PlayerSeason::new(PlayerId::new(1), SeasonId::new(1)).with_stats(
            FootballStats {
                receiving_receptions: 4,
                receiving_yards: 61,
                ..Default::default()
            },
        );

        line.derive(&dir).unwrap();

        assert_eq!(line.rates.passing_rating, 0.0);
        assert_eq!(line.rates.passing_completion_percentage, 0.0);
        assert_eq!(line.rates.passing_yards_per_attempt, 0.0);
        assert_eq!(line.rates.receiving_yards_per_reception, 15.3);
        assert_eq!(
            line.slug.as_deref(),
            Some("season-2011-sam-reed-central-eagles-stats")
        );
    }

    #[test]
    fn test_stale_rates_are_recomputed() {
        let dir = fixture();
        let mut line = PlayerGame::new(PlayerId::new(1), GameId::new(5)).with_stats(passing_line());
        line.derive(&dir).unwrap();
        assert_eq!(line.rates.passing_rating, 163.0);

        line.stats.passing_attempts = 0;
        line.derive(&dir).unwrap();

        assert_eq!(line.rates.passing_rating, 0.0);
        assert_eq!(line.rates.passing_completion_percentage, 0.0);
    }

    #[test]
    fn test_team_lines_pass_through() {
        let dir = fixture();
        let stats = passing_line();
        let mut tg = TeamGame::new(SchoolId::new(2), GameId::new(5)).with_stats(stats.clone());
        tg.id = Some(RecordId::new(41));
        let mut ts = TeamSeason::new(SchoolId::new(1), SeasonId::new(1)).with_record(8, 2);

        tg.derive(&dir).unwrap();
        ts.derive(&dir).unwrap();

        assert_eq!(tg.stats, stats);
        assert_eq!(tg.slug.as_deref(), Some("week-3-north-bears-stats-41"));
        assert_eq!(ts.wins, 8);
        assert_eq!(ts.slug.as_deref(), Some("season-2011-central-eagles-stats"));
    }

    #[test]
    fn test_missing_reference_leaves_record_untouched() {
        let dir = fixture();
        let mut game = Game::new(SeasonId::new(1), 2, SchoolId::new(1), SchoolId::new(77))
            .with_scores(PeriodScores::regulation([7, 0, 0, 0]), PeriodScores::default());

        let err = game.derive(&dir).unwrap_err();

        assert_eq!(
            err,
            DeriveError::MissingReference {
                kind: "school",
                id: SchoolId::new(77)
            }
        );
        assert_eq!(game.home_total_score, 0);
        assert!(game.slug.is_none());
    }

    #[test]
    fn test_missing_reference_ignored_when_slug_set() {
        let dir = fixture();
        let mut game = Game::new(SeasonId::new(1), 2, SchoolId::new(1), SchoolId::new(77))
            .with_scores(PeriodScores::regulation([7, 0, 0, 0]), PeriodScores::default());
        game.slug = Some("set-by-hand".to_string());

        game.derive(&dir).unwrap();

        assert_eq!(game.home_total_score, 7);
    }

    #[test]
    fn test_reference_record_slugs() {
        let dir = fixture();
        let mut sport = Sport::new("Football", Gender::Girls);
        let mut conference = Conference::new("Metro League", SportId::new(1));
        let mut season = Season::new(2012, SportId::new(1));
        let mut player = Player::new(SchoolId::new(2), "Ana", "Cruz");
        let mut position = Position::new("Quarterback", "QB");

        sport.derive(&dir).unwrap();
        conference.derive(&dir).unwrap();
        season.derive(&dir).unwrap();
        player.derive(&dir).unwrap();
        position.derive(&dir).unwrap();

        assert_eq!(sport.slug.as_deref(), Some("girls-football"));
        assert_eq!(conference.slug.as_deref(), Some("metro-league-boys-football"));
        assert_eq!(season.slug.as_deref(), Some("boys-football-2012"));
        assert_eq!(player.slug.as_deref(), Some("ana-cruz-north-bears"));
        assert_eq!(position.slug.as_deref(), Some("quarterback"));
    }

    #[test]
    fn test_position_short_name_limit() {
        let dir = fixture();
        let mut position: Position =
            serde_json::from_str(r#"{"name": "Outside Linebacker", "short_name": "OUTSIDE"}"#)
                .unwrap();

        assert_eq!(
            position.derive(&dir),
            Err(DeriveError::ShortNameTooLong {
                short_name: "OUTSIDE".to_string(),
                max: MAX_SHORT_NAME_LEN,
            })
        );
        assert_eq!(position.slug, None);

        position.short_name = "OLB".to_string();
        assert!(position.derive(&dir).is_ok());
    }

    #[test]
    fn test_guarded_passer_rating() {
        assert_eq!(guarded_passer_rating(&FootballStats::default()), 0.0);
        assert_eq!(guarded_passer_rating(&passing_line()), 163.0);
    }
}
