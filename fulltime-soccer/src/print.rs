use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use fulltime::display::{Decimal, Percent};
use fulltime::kelly::Stake;
use fulltime::price::format_american;

use crate::data::{DataSet, Fixture};
use crate::domain::{MatchOutcome, OutcomeType, Score, Side};
use crate::model::Prediction;

fn header(labels: &[&str]) -> Row {
    Row::new(
        Styles::default().with(Header(true)),
        labels.iter().map(|&label| label.to_string().into()).collect(),
    )
}

pub fn describe_outcome(outcome: &OutcomeType) -> String {
    match outcome {
        OutcomeType::Win(Side::Home) => "Home win".into(),
        OutcomeType::Win(Side::Away) => "Away win".into(),
        OutcomeType::Draw => "Draw".into(),
        OutcomeType::BothScore => "Both score".into(),
        OutcomeType::NotBothScore => "Not both score".into(),
        OutcomeType::Over(goals) => format!("Over {goals}.5"),
        OutcomeType::Under(goals) => format!("Under {}.5", goals.saturating_sub(1)),
        OutcomeType::Score(score) => format!("{}-{}", score.home, score.away),
    }
}

pub fn tabulate_markets(prediction: &Prediction) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(header(&["Market", "Prob", "Fair"]));

    let markets = &prediction.markets;
    let mut rows = vec![
        (
            format!("1 {}", prediction.home),
            markets.get(MatchOutcome::Home),
        ),
        ("X Draw".to_string(), markets.get(MatchOutcome::Draw)),
        (
            format!("2 {}", prediction.away),
            markets.get(MatchOutcome::Away),
        ),
        ("Both score".to_string(), markets.both_score),
        ("Not both score".to_string(), markets.not_both_score()),
    ];
    for &(line, prob) in &markets.over {
        rows.push((format!("Over {line}.5"), prob));
        rows.push((format!("Under {line}.5"), 1.0 - prob));
    }
    for (label, prob) in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.into(),
                Percent(prob).to_string().into(),
                fair_price(prob).into(),
            ],
        ));
    }
    table
}

fn fair_price(prob: f64) -> String {
    if prob > 0.0 {
        Decimal(1.0 / prob).to_string()
    } else {
        "-".into()
    }
}

pub fn tabulate_scores(scores: &[(Score, f64)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(header(&["Score", "Prob"]));
    for (score, prob) in scores {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}-{}", score.home, score.away).into(),
                Percent(*prob).to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_stakes(stakes: &[(OutcomeType, Stake)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(14)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(header(&["Outcome", "Prob", "Price", "US", "EV", "Kelly", "Stake"]));
    for (outcome, stake) in stakes {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                describe_outcome(outcome).into(),
                Percent(stake.probability).to_string().into(),
                Decimal(stake.price).to_string().into(),
                format_american(stake.price).into(),
                Decimal(stake.expected_value).to_string().into(),
                Percent(stake.kelly_fraction).to_string().into(),
                Decimal(stake.amount).to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_leagues(data: &DataSet) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
        ])
        .with_row(header(&["League", "Rank", "Team", "GP", "Pts"]));
    for (code, league) in &data.leagues {
        for team in league.teams() {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    code.clone().into(),
                    format!("{}", team.rank).into(),
                    team.name.clone().into(),
                    format!("{}", team.games).into(),
                    format!("{}", team.points).into(),
                ],
            ));
        }
    }
    table
}

pub fn tabulate_fixtures(fixtures: &[Fixture]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
        ])
        .with_row(header(&["League", "Home", "Away", "Kickoff", "Venue"]));
    for fixture in fixtures {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                fixture.league.clone().into(),
                fixture.home.clone().into(),
                fixture.away.clone().into(),
                fixture.kickoff.clone().unwrap_or_default().into(),
                fixture.venue.clone().unwrap_or_default().into(),
            ],
        ));
    }
    table
}
