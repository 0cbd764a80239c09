use assert_float_eq::*;

use fulltime::factorial::{Lookup, Memo};
use fulltime_testing::assert_slice_f64_relative;

use super::*;

const POISSON_GOLDEN: [f64; 3] = [0.5144153512303633, 0.2313902484731001, 0.2541912140968226];
const POISSON_TOTAL: f64 = 0.9999968138002858;

fn create_test_4x4_scoregrid() -> Matrix<f64> {
    let mut scoregrid = Matrix::allocate(4, 4);
    let rows = [
        [0.04, 0.03, 0.02, 0.01],
        [0.08, 0.06, 0.04, 0.02],
        [0.12, 0.09, 0.06, 0.03],
        [0.16, 0.12, 0.08, 0.04],
    ];
    for (row, values) in rows.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            scoregrid[(row, col)] = value;
        }
    }
    scoregrid
}

#[test]
pub fn outcome_win_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.65, OutcomeType::Win(Side::Home).gather(&scoregrid), 1e-12);
    assert_float_absolute_eq!(0.15, OutcomeType::Win(Side::Away).gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_draw_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.2, OutcomeType::Draw.gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_goals_ou_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.35, OutcomeType::Under(3).gather(&scoregrid), 1e-12);
    assert_float_absolute_eq!(0.65, OutcomeType::Over(2).gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_both_score_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    // rows 1..=3, cols 1..=3
    assert_float_absolute_eq!(0.54, OutcomeType::BothScore.gather(&scoregrid), 1e-12);
    assert_float_absolute_eq!(0.46, OutcomeType::NotBothScore.gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_correct_score_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_eq!(0.04, OutcomeType::Score(Score::nil_all()).gather(&scoregrid));
    assert_eq!(0.08, OutcomeType::Score(Score::new(3, 2)).gather(&scoregrid));
    assert_eq!(0.0, OutcomeType::Score(Score::new(4, 0)).gather(&scoregrid));
}

#[test]
pub fn poisson_golden() {
    let dist = ScoreDistribution::build(&ExpectedGoals::new(1.8, 1.2), Correction::None, 10, &[1, 2, 3], &Memo::default());
    assert_eq!(11, dist.scoregrid.rows());
    assert_eq!(10, dist.max_goals());
    assert_slice_f64_relative(&POISSON_GOLDEN, &dist.sums.outcomes, 1e-9);
    assert_float_relative_eq!(POISSON_TOTAL, dist.sums.total, 1e-9);
    assert_float_relative_eq!(0.5832917332417251, dist.sums.both_score, 1e-9);
    assert_slice_f64_relative(
        &[0.8008485403288298, 0.5768067326734421, 0.3527649250180545],
        &dist.sums.over,
        1e-9,
    );
}

#[test]
pub fn sums_agree_with_gathering() {
    let dist = ScoreDistribution::build(&ExpectedGoals::new(2.3, 0.8), Correction::DixonColes { rho: -0.1 }, 9, &[2], &Lookup::default());
    let grid = &dist.scoregrid;
    assert_float_relative_eq!(OutcomeType::Win(Side::Home).gather(grid), dist.sums.outcomes[0], 1e-12);
    assert_float_relative_eq!(OutcomeType::Draw.gather(grid), dist.sums.outcomes[1], 1e-12);
    assert_float_relative_eq!(OutcomeType::Win(Side::Away).gather(grid), dist.sums.outcomes[2], 1e-12);
    assert_float_relative_eq!(OutcomeType::BothScore.gather(grid), dist.sums.both_score, 1e-12);
    assert_float_relative_eq!(OutcomeType::Over(2).gather(grid), dist.sums.over[0], 1e-12);
    assert_float_relative_eq!(grid.flatten().sum(), dist.sums.total, 1e-12);
}

#[test]
pub fn single_pass_matches_two_step_construction() {
    let factorial = Lookup::default();
    let (home_rate, away_rate, rho) = (1.4, 1.1, -0.13);
    let dist = ScoreDistribution::build(
        &ExpectedGoals::new(home_rate, away_rate),
        Correction::DixonColes { rho },
        8,
        &[],
        &factorial,
    );
    let mut scoregrid = Matrix::allocate(9, 9);
    from_univariate_poisson(home_rate, away_rate, &mut scoregrid, &factorial);
    correct_dixon_coles(home_rate, away_rate, rho, &mut scoregrid);
    assert_slice_f64_relative(scoregrid.flatten(), dist.scoregrid.flatten(), 1e-12);
    assert!(dist.sums.over.is_empty());
}

#[test]
pub fn dixon_coles_reweights_low_scores() {
    let factorial = Memo::default();
    let expected = ExpectedGoals::new(1.8, 1.2);
    let poisson = ScoreDistribution::build(&expected, Correction::None, 10, &[2], &factorial);
    let dixon_coles = ScoreDistribution::build(&expected, Correction::DixonColes { rho: -0.12 }, 10, &[2], &factorial);

    let (p, dc) = (&poisson.scoregrid, &dixon_coles.scoregrid);
    assert_float_relative_eq!(p[(0, 0)] * (1.0 + 1.8 * 1.2 * 0.12), dc[(0, 0)], 1e-12);
    assert_float_relative_eq!(p[(0, 1)] * (1.0 - 1.8 * 0.12), dc[(0, 1)], 1e-12);
    assert_float_relative_eq!(p[(1, 0)] * (1.0 - 1.2 * 0.12), dc[(1, 0)], 1e-12);
    assert_float_relative_eq!(p[(1, 1)] * 1.12, dc[(1, 1)], 1e-12);
    assert_eq!(p[(2, 1)], dc[(2, 1)]);
    assert_eq!(p[(0, 2)], dc[(0, 2)]);

    // a negative ρ shifts mass towards draws
    assert!(dixon_coles.sums.outcomes[1] > poisson.sums.outcomes[1]);
    // only low-score cells move, so totals above 2.5 are untouched
    assert_eq!(poisson.sums.over[0], dixon_coles.sums.over[0]);
}

#[test]
pub fn corrected_cells_are_floored() {
    let dist = ScoreDistribution::build(
        &ExpectedGoals::new(3.0, 3.0),
        Correction::DixonColes { rho: 1.0 },
        10,
        &[2],
        &Lookup::default(),
    );
    assert_eq!(0.0, dist.scoregrid[(0, 0)]);
    assert_eq!(0.0, dist.scoregrid[(1, 1)]);
    assert!(dist.scoregrid.flatten().iter().all(|&prob| prob >= 0.0));
}

#[test]
pub fn normalised_grid_has_unit_mass() {
    let factorial = Memo::default();
    for (home_rate, away_rate) in [(0.1, 0.1), (1.8, 1.2), (0.4, 3.7), (6.0, 6.0)] {
        let dist = ScoreDistribution::build(
            &ExpectedGoals::new(home_rate, away_rate),
            Correction::DixonColes { rho: -0.15 * f64::min(home_rate, away_rate) / f64::max((home_rate + away_rate) / 2.0, 1.0) },
            15,
            &[2],
            &factorial,
        );
        assert_float_absolute_eq!(1.0, dist.normalised().flatten().sum(), 1e-9);
    }
}

#[test]
pub fn truncation_tail_is_negligible() {
    let dist = ScoreDistribution::build(&ExpectedGoals::new(1.0, 1.0), Correction::None, 8, &[], &Lookup::default());
    assert!(1.0 - dist.sums.total < 1e-4);
}

#[test]
pub fn expectations_recover_rates() {
    let mut scoregrid = Matrix::allocate(26, 26);
    from_univariate_poisson(1.7, 0.9, &mut scoregrid, &Lookup::default());
    let (home, away) = home_away_expectations(&scoregrid);
    assert_float_absolute_eq!(1.7, home, 1e-9);
    assert_float_absolute_eq!(0.9, away, 1e-9);
}

#[test]
pub fn most_probable_scores() {
    let dist = ScoreDistribution::build(&ExpectedGoals::new(1.8, 1.2), Correction::None, 10, &[], &Lookup::default());
    let top = top_scores(&dist.scoregrid, 3);
    assert_eq!(
        vec![Score::new(1, 1), Score::new(2, 1), Score::new(1, 0)],
        top.iter().map(|(score, _)| score.clone()).collect::<Vec<_>>()
    );
    assert_float_relative_eq!(0.10754006767458614, top[0].1, 1e-9);
}

#[test]
pub fn increasing_home_rate_favours_the_host() {
    let factorial = Lookup::default();
    let mut previous: Option<ScoreDistribution> = None;
    for home_rate in [0.3, 0.6, 1.0, 1.5, 2.2, 3.0, 4.5] {
        let dist = ScoreDistribution::build(&ExpectedGoals::new(home_rate, 1.3), Correction::None, 15, &[2], &factorial);
        if let Some(previous) = previous {
            let home_win = |dist: &ScoreDistribution| dist.sums.outcomes[0] / dist.sums.total;
            assert!(home_win(&dist) > home_win(&previous));
            let total_goals = |dist: &ScoreDistribution| {
                let (home, away) = home_away_expectations(&dist.normalised());
                home + away
            };
            assert!(total_goals(&dist) >= total_goals(&previous));
        }
        previous = Some(dist);
    }
}
