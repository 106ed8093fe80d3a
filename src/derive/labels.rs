//! Human-readable labels that slugs are generated from.

use crate::models::{
    Conference, Game, GameId, Player, PlayerGame, PlayerId, PlayerSeason, RecordId, School,
    SchoolId, Season, SeasonId, Sport, SportId, TeamGame, TeamSeason,
};

use super::{DeriveError, Directory};

fn sport_of<'a>(dir: &'a dyn Directory, id: SportId) -> Result<&'a Sport, DeriveError> {
    dir.sport(id).ok_or(DeriveError::MissingReference { kind: "sport", id })
}

fn season_of<'a>(dir: &'a dyn Directory, id: SeasonId) -> Result<&'a Season, DeriveError> {
    dir.season(id).ok_or(DeriveError::MissingReference { kind: "season", id })
}

fn school_of<'a>(dir: &'a dyn Directory, id: SchoolId) -> Result<&'a School, DeriveError> {
    dir.school(id).ok_or(DeriveError::MissingReference { kind: "school", id })
}

fn player_of<'a>(dir: &'a dyn Directory, id: PlayerId) -> Result<&'a Player, DeriveError> {
    dir.player(id).ok_or(DeriveError::MissingReference { kind: "player", id })
}

fn game_of<'a>(dir: &'a dyn Directory, id: GameId) -> Result<&'a Game, DeriveError> {
    dir.game(id).ok_or(DeriveError::MissingReference { kind: "game", id })
}

/// " (12)" for committed records, nothing before an id is assigned.
fn id_suffix(id: Option<RecordId>) -> String {
    id.map(|id| format!(" ({})", id)).unwrap_or_default()
}

/// "Boys Football: Metro League"
pub fn conference_label(conference: &Conference, dir: &dyn Directory) -> Result<String, DeriveError> {
    let sport = sport_of(dir, conference.sport)?;
    Ok(format!("{}: {}", conference.name, sport.label()))
}

/// "Boys Football 2011"
pub fn season_label(season: &Season, dir: &dyn Directory) -> Result<String, DeriveError> {
    let sport = sport_of(dir, season.sport)?;
    Ok(format!("{} {}", sport.label(), season.year))
}

/// "Sam Reed (Central Eagles)"
pub fn player_label(player: &Player, dir: &dyn Directory) -> Result<String, DeriveError> {
    let school = school_of(dir, player.school)?;
    Ok(format!("{} ({})", player.full_name(), school.label()))
}

/// "Boys Football 2011, week 3: North Bears at Central Eagles"
pub fn game_label(game: &Game, dir: &dyn Directory) -> Result<String, DeriveError> {
    let season = season_label(season_of(dir, game.season)?, dir)?;
    let away = school_of(dir, game.away_team)?;
    let home = school_of(dir, game.home_team)?;
    Ok(format!(
        "{}, week {}: {} at {}",
        season,
        game.week,
        away.label(),
        home.label()
    ))
}

/// "Week 3: Central Eagles stats (41)"
pub fn team_game_label(line: &TeamGame, dir: &dyn Directory) -> Result<String, DeriveError> {
    let game = game_of(dir, line.game)?;
    let team = school_of(dir, line.team)?;
    Ok(format!(
        "Week {}: {} stats{}",
        game.week,
        team.label(),
        id_suffix(line.id)
    ))
}

/// "Season 2011: Central Eagles stats (7)"
pub fn team_season_label(line: &TeamSeason, dir: &dyn Directory) -> Result<String, DeriveError> {
    let season = season_of(dir, line.season)?;
    let team = school_of(dir, line.team)?;
    Ok(format!(
        "Season {}: {} stats{}",
        season.year,
        team.label(),
        id_suffix(line.id)
    ))
}

/// "Week 3: Sam Reed (Central Eagles) stats (88)"
pub fn player_game_label(line: &PlayerGame, dir: &dyn Directory) -> Result<String, DeriveError> {
    let game = game_of(dir, line.game)?;
    let player = player_label(player_of(dir, line.player)?, dir)?;
    Ok(format!(
        "Week {}: {} stats{}",
        game.week,
        player,
        id_suffix(line.id)
    ))
}

/// "Season 2011: Sam Reed (Central Eagles) stats (9)"
pub fn player_season_label(line: &PlayerSeason, dir: &dyn Directory) -> Result<String, DeriveError> {
    let season = season_of(dir, line.season)?;
    let player = player_label(player_of(dir, line.player)?, dir)?;
    Ok(format!(
        "Season {}: {} stats{}",
        season.year,
        player,
        id_suffix(line.id)
    ))
}
