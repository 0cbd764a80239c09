use std::sync::Arc;
use std::thread;

use assert_float_eq::*;

use fulltime::probs::SliceExt;
use fulltime_testing::assert_probabilities;

use super::*;
use crate::advice::Confidence;
use crate::config::ModelKind;
use crate::domain::{MatchOutcome, Side, VenueRecord};

fn team(name: &str, games: f64, points: f64, home: VenueRecord, away: VenueRecord) -> TeamSeasonStats {
    TeamSeasonStats {
        name: name.into(),
        games,
        points,
        goals_for: home.goals_for + away.goals_for,
        goals_against: home.goals_against + away.goals_against,
        home,
        away,
        ..Default::default()
    }
}

fn venue(games: f64, wins: f64, goals_for: f64, goals_against: f64) -> VenueRecord {
    VenueRecord {
        games,
        wins,
        goals_for,
        goals_against,
    }
}

fn create_test_league() -> League {
    League::new(
        "esp.1",
        vec![
            team("Real Madrid", 20.0, 48.0, venue(10.0, 8.0, 24.0, 6.0), venue(10.0, 6.0, 18.0, 9.0)),
            team("Barcelona", 20.0, 44.0, venue(10.0, 7.0, 22.0, 8.0), venue(10.0, 6.0, 17.0, 11.0)),
            team("Getafe", 20.0, 22.0, venue(10.0, 4.0, 11.0, 10.0), venue(10.0, 2.0, 7.0, 15.0)),
            team("Almería", 20.0, 10.0, venue(10.0, 2.0, 9.0, 18.0), venue(10.0, 0.0, 6.0, 22.0)),
        ],
    )
}

#[test]
pub fn predict_from_league() {
    let league = create_test_league();
    let predictor = Predictor::default();
    let input = MatchInput::lookup(&league, "real madrid", " Getafe ").unwrap();
    let prediction = predictor.predict(&input);

    assert_eq!("Real Madrid", prediction.home);
    assert_eq!("Getafe", prediction.away);
    assert!(!prediction.is_uniform_prior());
    assert!(prediction.caveats.is_empty());

    // league home averages: 66 / 40 for, 42 / 40 against
    assert_float_relative_eq!(66.0 / 40.0, prediction.averages.home_goals_for, 1e-12);
    assert_float_relative_eq!(42.0 / 40.0, prediction.averages.home_goals_against, 1e-12);

    let strengths = prediction.strengths.as_ref().unwrap();
    let expected = strengths.expected_goals(predictor.config());
    assert_eq!(expected, prediction.expected);
    // 2.4 scored v 1.5 conceded, both against 1.65, with advantage and form 1.3
    assert_float_relative_eq!(2.4 * 1.5 / 1.65 * 1.25 * 1.3, prediction.expected.home, 1e-9);
    // 0.7 scored v 0.6 conceded, against 1.05, with form 0.7
    assert_float_relative_eq!(0.7 * 0.6 / 1.05 * 0.7, prediction.expected.away, 1e-9);

    assert!(prediction.rho.unwrap() < 0.0);
    assert_float_absolute_eq!(1.0, prediction.markets.outcomes.sum(), 1e-9);
    assert_probabilities(&prediction.markets.outcomes);
    assert_eq!(MatchOutcome::Home, prediction.advice.pick);
    assert_eq!(Confidence::High, prediction.advice.confidence);
    assert_float_absolute_eq!(2.4 - 1.1, prediction.advice.strength_difference, 1e-12);

    assert_eq!(TOP_SCORES, prediction.top_scores.len());
    assert!(prediction.top_scores.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    assert_float_absolute_eq!(1.0, prediction.scoregrid.flatten().sum(), 1e-9);
    assert_eq!(predictor.config().max_goals as usize + 1, prediction.scoregrid.rows());
}

#[test]
pub fn teams_without_games_get_the_uniform_prior() {
    let league = League::new(
        "new.1",
        vec![
            TeamSeasonStats {
                name: "Alpha".into(),
                ..Default::default()
            },
            TeamSeasonStats {
                name: "Beta".into(),
                ..Default::default()
            },
        ],
    );
    let predictor = Predictor::default();
    let prediction = predictor.predict(&MatchInput::lookup(&league, "Alpha", "Beta").unwrap());

    assert!(prediction.is_uniform_prior());
    assert_eq!([1.0 / 3.0; 3], prediction.markets.outcomes);
    assert_eq!(0.5, prediction.markets.both_score);
    assert_eq!(Some(0.5), prediction.markets.over(2));
    assert_eq!(None, prediction.rho);
    assert!(prediction.top_scores.is_empty());
    assert_eq!(Confidence::Balanced, prediction.advice.confidence);
    assert_eq!(
        vec![
            Caveat::NoData { team: "Alpha".into() },
            Caveat::NoData { team: "Beta".into() }
        ],
        prediction.caveats
    );
    assert_eq!(LeagueAverages::default(), prediction.averages);

    let stakes = prediction.stakes(
        &[
            (OutcomeType::Draw, 3.2),
            (OutcomeType::Score(Score::nil_all()), 9.0),
        ],
        predictor.config(),
    );
    assert_float_absolute_eq!((2.2 / 3.0 - 2.0 / 3.0) / 2.2, stakes[0].1.kelly_fraction, 1e-12);
    assert_eq!(0.0, stakes[1].1.probability);
}

#[test]
pub fn one_side_without_games_is_uniform() {
    let mut league_teams = create_test_league().teams().to_vec();
    league_teams.push(TeamSeasonStats {
        name: "Promoted".into(),
        ..Default::default()
    });
    let league = League::new("esp.1", league_teams);
    let prediction = Predictor::default().predict(&MatchInput::lookup(&league, "Barcelona", "Promoted").unwrap());
    assert!(prediction.is_uniform_prior());
    assert_eq!(1, prediction.caveats.len());
}

#[test]
pub fn thin_samples_are_flagged() {
    let league = League::new(
        "early",
        vec![
            team("Early", 3.0, 6.0, venue(2.0, 2.0, 5.0, 1.0), venue(1.0, 0.0, 0.0, 1.0)),
            team("Late", 4.0, 7.0, venue(2.0, 1.0, 3.0, 2.0), venue(2.0, 1.0, 2.0, 2.0)),
        ],
    );
    let prediction = Predictor::default().predict(&MatchInput::lookup(&league, "Early", "Late").unwrap());
    assert!(!prediction.is_uniform_prior());
    assert_eq!(2, prediction.caveats.len());
    assert!(matches!(prediction.caveats[0], Caveat::LowSample { .. }));
}

#[test]
pub fn lookup_errors() {
    let league = create_test_league();
    assert_eq!(
        Some(LookupError::SameTeam("Getafe".into())),
        MatchInput::lookup(&league, "Getafe", "GETAFE").err()
    );
    assert_eq!(
        Some(LookupError::Team {
            league: "esp.1".into(),
            team: "Sevilla".into()
        }),
        MatchInput::lookup(&league, "Getafe", "Sevilla").err()
    );
}

#[test]
pub fn predictor_sanitises_config() {
    let predictor = Predictor::from(Config {
        max_goals: 99,
        kelly_multiplier: 3.0,
        model: ModelKind::Poisson,
        ..Config::default()
    });
    assert_eq!(30, predictor.config().max_goals);
    assert_eq!(1.0, predictor.config().kelly_multiplier);

    let prediction = predictor.predict(&MatchInput::lookup(&create_test_league(), "Barcelona", "Almería").unwrap());
    assert_eq!(None, prediction.rho);
    assert_eq!(31, prediction.scoregrid.rows());
}

#[test]
pub fn quick_rates() {
    let predictor = Predictor::default();
    let prediction = predictor.predict_from_rates(
        &Rates {
            goals_for: 1.8,
            goals_against: 0.9,
            win_pct: 60.0,
        },
        &Rates {
            goals_for: 1.0,
            goals_against: 1.5,
            win_pct: 20.0,
        },
    );
    assert!(prediction.caveats.is_empty());
    assert_float_absolute_eq!(1.0, prediction.markets.outcomes.sum(), 1e-9);
    assert!(prediction.markets.get(MatchOutcome::Home) > prediction.markets.get(MatchOutcome::Away));
}

#[test]
pub fn predictions_are_deterministic_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Predictor>();

    let league = Arc::new(create_test_league());
    let predictor = Arc::new(Predictor::default());
    let reference = predictor
        .predict(&MatchInput::lookup(&league, "Barcelona", "Real Madrid").unwrap())
        .markets;

    let handles = (0..4)
        .map(|_| {
            let (league, predictor) = (Arc::clone(&league), Arc::clone(&predictor));
            thread::spawn(move || {
                predictor
                    .predict(&MatchInput::lookup(&league, "Barcelona", "Real Madrid").unwrap())
                    .markets
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(reference, handle.join().unwrap());
    }
}

#[test]
pub fn stakes_against_prices() {
    let league = create_test_league();
    let predictor = Predictor::default();
    let prediction = predictor.predict(&MatchInput::lookup(&league, "Real Madrid", "Almería").unwrap());
    let stakes = prediction.stakes(
        &[
            (OutcomeType::Win(Side::Home), 1.5),
            (OutcomeType::Win(Side::Away), 1.5),
        ],
        predictor.config(),
    );
    let (home, away) = (&stakes[0].1, &stakes[1].1);
    assert!(home.has_edge());
    assert!(home.amount > 0.0 && home.amount <= predictor.config().bankroll * predictor.config().kelly_multiplier);
    assert!(!away.has_edge());
    assert_eq!(0.0, away.amount);
}

#[test]
pub fn prediction_serialises() {
    let league = create_test_league();
    let prediction = Predictor::default().predict(&MatchInput::lookup(&league, "Real Madrid", "Barcelona").unwrap());
    let json = serde_json::to_value(&prediction).unwrap();
    assert_eq!("Real Madrid", json["home"]);
    assert_eq!(3, json["markets"]["outcomes"].as_array().unwrap().len());
    assert!(json["rho"].is_number());
    assert!(json.get("scoregrid").is_none());
}
