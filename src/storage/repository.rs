//! Repository: id assignment, derivation on commit, and table persistence.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{EntityKind, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::derive::{Derive, Directory};
use crate::models::{
    Conference, ConferenceId, Game, GameId, Player, PlayerGame, PlayerId, PlayerSeason, Position,
    RecordId, School, SchoolId, Season, SeasonId, Sport, SportId, TeamGame, TeamSeason,
};
use crate::standings::{self, TeamRecord};

/// One kind of record, keyed by id. Iteration is in id order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<RecordId, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One past the highest id in use, starting at 1.
    fn next_id(&self) -> RecordId {
        self.rows
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(RecordId::new(1))
    }
}

/// A record the repository can store.
pub trait Record: Derive + Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> Option<RecordId>;
    fn set_id(&mut self, id: RecordId);
    fn slug(&self) -> Option<&str>;

    fn table(repo: &Repository) -> &Table<Self>;
    fn table_mut(repo: &mut Repository) -> &mut Table<Self>;
}

macro_rules! impl_record {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Record for $ty {
            const KIND: EntityKind = EntityKind::$kind;

            fn id(&self) -> Option<RecordId> {
                self.id
            }

            fn set_id(&mut self, id: RecordId) {
                self.id = Some(id);
            }

            fn slug(&self) -> Option<&str> {
                self.slug.as_deref()
            }

            fn table(repo: &Repository) -> &Table<Self> {
                &repo.$field
            }

            fn table_mut(repo: &mut Repository) -> &mut Table<Self> {
                &mut repo.$field
            }
        }
    };
}

impl_record!(Sport, Sport, sports);
impl_record!(Conference, Conference, conferences);
impl_record!(Season, Season, seasons);
impl_record!(School, School, schools);
impl_record!(Player, Player, players);
impl_record!(Position, Position, positions);
impl_record!(Game, Game, games);
impl_record!(TeamGame, TeamGame, team_games);
impl_record!(TeamSeason, TeamSeason, team_seasons);
impl_record!(PlayerGame, PlayerGame, player_games);
impl_record!(PlayerSeason, PlayerSeason, player_seasons);

/// Durable store for every record kind.
///
/// Every commit goes through [`Repository::commit`], which derives the
/// record before it is stored. Without a [`StorageConfig`] the repository
/// keeps records in memory only.
#[derive(Debug, Default)]
pub struct Repository {
    config: Option<StorageConfig>,
    sports: Table<Sport>,
    conferences: Table<Conference>,
    seasons: Table<Season>,
    schools: Table<School>,
    players: Table<Player>,
    positions: Table<Position>,
    games: Table<Game>,
    team_games: Table<TeamGame>,
    team_seasons: Table<TeamSeason>,
    player_games: Table<PlayerGame>,
    player_seasons: Table<PlayerSeason>,
}

impl Repository {
    /// A repository that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a repository, loading every table found under the data directory.
    pub fn open(config: StorageConfig) -> Result<Self, StorageError> {
        let tables_dir = config.tables_dir();
        if tables_dir.exists() && !tables_dir.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "{} is not a directory",
                tables_dir.display()
            )));
        }

        let mut repo = Self {
            config: Some(config),
            ..Default::default()
        };

        repo.load::<Sport>()?;
        repo.load::<Conference>()?;
        repo.load::<Season>()?;
        repo.load::<School>()?;
        repo.load::<Player>()?;
        repo.load::<Position>()?;
        repo.load::<Game>()?;
        repo.load::<TeamGame>()?;
        repo.load::<TeamSeason>()?;
        repo.load::<PlayerGame>()?;
        repo.load::<PlayerSeason>()?;

        if repo.games.is_empty() && repo.schools.is_empty() {
            info!("Opened empty repository at {:?}", tables_dir);
        } else {
            info!(
                "Opened repository: {} schools, {} games, {} team seasons, {} player games",
                repo.schools.len(),
                repo.games.len(),
                repo.team_seasons.len(),
                repo.player_games.len()
            );
        }
        Ok(repo)
    }

    fn load<T: Record>(&mut self) -> Result<(), StorageError> {
        let Some(config) = &self.config else {
            return Ok(());
        };
        let records: Vec<T> = JsonlReader::<T>::for_entity(config, T::KIND).read_all()?;

        let table = T::table_mut(self);
        for record in records {
            match record.id() {
                Some(id) => {
                    table.rows.insert(id, record);
                }
                None => {
                    warn!("Skipping stored {} without an id", T::KIND);
                }
            }
        }
        Ok(())
    }

    /// Derive and store a record, returning the committed copy.
    ///
    /// A record without an id gets the next free one; a record with an id
    /// replaces the stored record with that id. Nothing is stored if
    /// derivation fails or the slug is taken by another record.
    pub fn commit<T: Record>(&mut self, record: T) -> Result<T, StorageError> {
        let mut record = record;
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = T::table(self).next_id();
                record.set_id(id);
                id
            }
        };

        record.derive(&*self)?;

        if let Some(slug) = record.slug().filter(|s| !s.is_empty()) {
            let clash = T::table(self)
                .iter()
                .find(|other| other.id() != Some(id) && other.slug() == Some(slug));
            if let Some(existing) = clash.and_then(|other| other.id()) {
                return Err(StorageError::SlugConflict {
                    kind: T::KIND,
                    slug: slug.to_string(),
                    existing,
                });
            }
        }

        let previous = T::table_mut(self).rows.insert(id, record.clone());

        if self.config.as_ref().is_some_and(|c| c.sync_on_commit) {
            if let Err(e) = self.persist::<T>() {
                let rows = &mut T::table_mut(self).rows;
                match previous {
                    Some(prev) => rows.insert(id, prev),
                    None => rows.remove(&id),
                };
                return Err(e);
            }
        }

        debug!("Committed {} {} ({:?})", T::KIND, id, record.slug());
        Ok(record)
    }

    /// Re-derive every stored record of one kind, e.g. after a formula change.
    pub fn rederive_all<T: Record>(&mut self) -> Result<usize, StorageError> {
        let records: Vec<T> = T::table(self).iter().cloned().collect();
        let count = records.len();
        for record in records {
            self.commit(record)?;
        }
        info!("Re-derived {} {} records", count, T::KIND);
        Ok(count)
    }

    fn persist<T: Record>(&self) -> Result<(), StorageError> {
        if let Some(config) = &self.config {
            JsonlWriter::<T>::for_entity(config, T::KIND).write_all(T::table(self).iter())?;
        }
        Ok(())
    }

    /// Write every table to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.persist::<Sport>()?;
        self.persist::<Conference>()?;
        self.persist::<Season>()?;
        self.persist::<School>()?;
        self.persist::<Player>()?;
        self.persist::<Position>()?;
        self.persist::<Game>()?;
        self.persist::<TeamGame>()?;
        self.persist::<TeamSeason>()?;
        self.persist::<PlayerGame>()?;
        self.persist::<PlayerSeason>()?;
        Ok(())
    }

    pub fn get<T: Record>(&self, id: RecordId) -> Option<&T> {
        T::table(self).get(id)
    }

    /// Like [`Repository::get`], but a missing record is an error.
    pub fn require<T: Record>(&self, id: RecordId) -> Result<&T, StorageError> {
        self.get(id).ok_or(StorageError::NotFound { kind: T::KIND, id })
    }

    /// Every record of a kind, in id order.
    pub fn all<'a, T: Record + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        T::table(self).iter()
    }

    /// Records matching a predicate, in id order.
    pub fn find<T, F>(&self, predicate: F) -> Vec<&T>
    where
        T: Record,
        F: Fn(&T) -> bool,
    {
        self.all::<T>().filter(|r| predicate(r)).collect()
    }

    pub fn find_by_slug<T: Record>(&self, slug: &str) -> Option<&T> {
        self.all::<T>().find(|r| r.slug() == Some(slug))
    }

    /// A team's schedule for a season, ordered by week.
    pub fn schedule_for(&self, team: SchoolId, season: SeasonId) -> Vec<&Game> {
        standings::schedule_for(self.games.iter(), team, season)
    }

    /// Win/loss tally from the team's final games.
    pub fn tally_record(&self, team: SchoolId, season: SeasonId) -> TeamRecord {
        standings::tally_record(self.games.iter(), team, season)
    }

    /// Stored team season aggregates in standings order.
    pub fn standings(&self, season: SeasonId, conference: Option<ConferenceId>) -> Vec<&TeamSeason> {
        standings::standings(self.team_seasons.iter(), season, conference)
    }
}

impl Directory for Repository {
    fn sport(&self, id: SportId) -> Option<&Sport> {
        self.sports.get(id)
    }

    fn season(&self, id: SeasonId) -> Option<&Season> {
        self.seasons.get(id)
    }

    fn school(&self, id: SchoolId) -> Option<&School> {
        self.schools.get(id)
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    fn game(&self, id: GameId) -> Option<&Game> {
        self.games.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::DeriveError;
    use crate::models::{FootballStats, Gender, PeriodScores};
    use tempfile::TempDir;

    fn seeded(repo: &mut Repository) -> (SeasonId, SchoolId, SchoolId) {
        let sport = repo.commit(Sport::new("Football", Gender::Boys)).unwrap();
        let season = repo
            .commit(Season::new(2011, sport.id.unwrap()))
            .unwrap();
        let home = repo
            .commit(School::new("Central").with_mascot("Eagles"))
            .unwrap();
        let away = repo
            .commit(School::new("North").with_mascot("Bears"))
            .unwrap();
        (season.id.unwrap(), home.id.unwrap(), away.id.unwrap())
    }

    #[test]
    fn test_commit_assigns_sequential_ids() {
        let mut repo = Repository::in_memory();
        let a = repo.commit(School::new("Central")).unwrap();
        let b = repo.commit(School::new("North")).unwrap();

        assert_eq!(a.id, Some(RecordId::new(1)));
        assert_eq!(b.id, Some(RecordId::new(2)));
        assert_eq!(a.slug.as_deref(), Some("central"));
    }

    #[test]
    fn test_ids_are_per_kind() {
        let mut repo = Repository::in_memory();
        repo.commit(School::new("Central")).unwrap();
        let position = repo.commit(Position::new("Quarterback", "QB")).unwrap();

        assert_eq!(position.id, Some(RecordId::new(1)));
    }

    #[test]
    fn test_commit_derives_game() {
        let mut repo = Repository::in_memory();
        let (season, home, away) = seeded(&mut repo);

        let game = repo
            .commit(Game::new(season, 3, home, away).with_scores(
                PeriodScores::new([7, 10, 0, 3], [6, 0, 0]),
                PeriodScores::regulation([0, 7, 7, 6]),
            ))
            .unwrap();

        assert_eq!(game.home_total_score, 26);
        assert_eq!(game.away_total_score, 20);
        let stored: &Game = repo.get(game.id.unwrap()).unwrap();
        assert_eq!(stored, &game);
    }

    #[test]
    fn test_recommit_keeps_id_and_slug() {
        let mut repo = Repository::in_memory();
        let (season, home, away) = seeded(&mut repo);
        let mut game = repo.commit(Game::new(season, 3, home, away)).unwrap();
        let slug = game.slug.clone();

        game.week = 4;
        game.home_scores = PeriodScores::regulation([3, 0, 0, 0]);
        let again = repo.commit(game).unwrap();

        assert_eq!(again.slug, slug);
        assert_eq!(again.home_total_score, 3);
        assert_eq!(repo.all::<Game>().count(), 1);
    }

    #[test]
    fn test_failed_derivation_stores_nothing() {
        let mut repo = Repository::in_memory();
        let (season, home, _) = seeded(&mut repo);

        let result = repo.commit(Game::new(season, 1, home, SchoolId::new(99)));

        assert!(matches!(result, Err(StorageError::Derive(_))));
        assert_eq!(repo.all::<Game>().count(), 0);
    }

    #[test]
    fn test_long_position_code_rejected() {
        let mut repo = Repository::in_memory();
        let position: Position =
            serde_json::from_str(r#"{"name": "Special Teams", "short_name": "SPECIAL"}"#).unwrap();

        let result = repo.commit(position);

        assert!(matches!(
            result,
            Err(StorageError::Derive(DeriveError::ShortNameTooLong { .. }))
        ));
        assert_eq!(repo.all::<Position>().count(), 0);
    }

    #[test]
    fn test_slug_conflict_rejected() {
        let mut repo = Repository::in_memory();
        repo.commit(School::new("Central")).unwrap();

        let result = repo.commit(School::new("Central"));

        match result {
            Err(StorageError::SlugConflict { kind, slug, existing }) => {
                assert_eq!(kind, EntityKind::School);
                assert_eq!(slug, "central");
                assert_eq!(existing, RecordId::new(1));
            }
            other => panic!("expected slug conflict, got {:?}", other),
        }
        assert_eq!(repo.all::<School>().count(), 1);
    }

    #[test]
    fn test_failed_write_rolls_back_commit() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let mut repo = Repository::open(config.clone()).unwrap();
        std::fs::write(config.tables_dir(), "not a directory").unwrap();

        let result = repo.commit(School::new("Central"));

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(repo.all::<School>().count(), 0);
        assert!(matches!(
            repo.commit(School::new("Central")),
            Err(StorageError::Io(_))
        ));
    }

    #[test]
    fn test_failed_write_restores_previous_row() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let mut repo = Repository::open(config.clone()).unwrap();
        let mut school = repo.commit(School::new("Central")).unwrap();
        std::fs::remove_dir_all(config.tables_dir()).unwrap();
        std::fs::write(config.tables_dir(), "not a directory").unwrap();

        school.mascot = Some("Eagles".to_string());
        assert!(repo.commit(school.clone()).is_err());

        let stored: &School = repo.require(school.id.unwrap()).unwrap();
        assert_eq!(stored.mascot, None);
    }

    #[test]
    fn test_open_rejects_tables_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        std::fs::write(config.tables_dir(), "not a directory").unwrap();

        assert!(matches!(
            Repository::open(config),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_player_lines_get_rates() {
        let mut repo = Repository::in_memory();
        let (season, home, away) = seeded(&mut repo);
        let game = repo.commit(Game::new(season, 1, home, away)).unwrap();
        let player = repo.commit(Player::new(home, "Sam", "Reed")).unwrap();

        let line = repo
            .commit(
                PlayerGame::new(player.id.unwrap(), game.id.unwrap()).with_stats(FootballStats {
                    passing_attempts: 30,
                    passing_completions: 20,
                    passing_yards: 250,
                    passing_touchdowns: 3,
                    passing_interceptions: 1,
                    ..Default::default()
                }),
            )
            .unwrap();

        assert_eq!(line.rates.passing_rating, 163.0);
        assert_eq!(
            line.slug.as_deref(),
            Some("week-1-sam-reed-central-eagles-stats-1")
        );
    }

    #[test]
    fn test_require_missing() {
        let repo = Repository::in_memory();
        let result = repo.require::<Game>(GameId::new(4));
        assert!(matches!(
            result,
            Err(StorageError::NotFound {
                kind: EntityKind::Game,
                ..
            })
        ));
    }

    #[test]
    fn test_find_and_find_by_slug() {
        let mut repo = Repository::in_memory();
        repo.commit(School::new("Central")).unwrap();
        repo.commit(School::new("North")).unwrap();
        repo.commit(School::new("Northwest")).unwrap();

        let north = repo.find::<School, _>(|s| s.name.starts_with("North"));
        assert_eq!(north.len(), 2);

        let found: &School = repo.find_by_slug("northwest").unwrap();
        assert_eq!(found.id, Some(RecordId::new(3)));
    }

    #[test]
    fn test_persist_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());

        let game_id = {
            let mut repo = Repository::open(config.clone()).unwrap();
            let (season, home, away) = seeded(&mut repo);
            let game = repo
                .commit(
                    Game::new(season, 2, home, away)
                        .with_scores(PeriodScores::regulation([7, 7, 7, 7]), PeriodScores::default()),
                )
                .unwrap();
            game.id.unwrap()
        };

        let repo = Repository::open(config.clone()).unwrap();
        let game: &Game = repo.require(game_id).unwrap();
        assert_eq!(game.home_total_score, 28);
        assert!(config.table_path(EntityKind::Game).exists());

        let next = repo.all::<School>().count();
        assert_eq!(next, 2);
    }

    #[test]
    fn test_flush_when_not_syncing() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = StorageConfig::new(temp_dir.path().to_path_buf());
        config.sync_on_commit = false;

        let mut repo = Repository::open(config.clone()).unwrap();
        repo.commit(School::new("Central")).unwrap();
        assert!(!config.table_path(EntityKind::School).exists());

        repo.flush().unwrap();
        assert!(config.table_path(EntityKind::School).exists());
    }

    #[test]
    fn test_rederive_all_repairs_stale_totals() {
        let mut repo = Repository::in_memory();
        let (season, home, away) = seeded(&mut repo);
        let game = repo
            .commit(Game::new(season, 1, home, away).with_scores(
                PeriodScores::regulation([7, 0, 0, 0]),
                PeriodScores::default(),
            ))
            .unwrap();
        let id = game.id.unwrap();
        Game::table_mut(&mut repo)
            .rows
            .get_mut(&id)
            .unwrap()
            .home_total_score = 50;

        assert_eq!(repo.rederive_all::<Game>().unwrap(), 1);

        let game: &Game = repo.require(id).unwrap();
        assert_eq!(game.home_total_score, 7);
    }

    #[test]
    fn test_schedule_through_repository() {
        let mut repo = Repository::in_memory();
        let (season, home, away) = seeded(&mut repo);
        let third = repo
            .commit(School::new("South").with_mascot("Hawks"))
            .unwrap()
            .id
            .unwrap();

        repo.commit(Game::new(season, 3, home, away)).unwrap();
        repo.commit(Game::new(season, 1, third, home)).unwrap();
        repo.commit(Game::new(season, 2, away, third)).unwrap();
        repo.commit(Game::new(season, 2, home, third)).unwrap();

        let weeks: Vec<u32> = repo
            .schedule_for(home, season)
            .iter()
            .map(|g| g.week)
            .collect();
        assert_eq!(weeks, vec![1, 2, 3]);
    }
}
