use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use fulltime::display::{Decimal, Percent, Signed};
use fulltime::file::{ReadJsonFile, WriteJsonFile};
use fulltime::kelly::Stake;
use fulltime::price::{MarketPrice, MIN_DECIMAL};
use fulltime_soccer::advice::HEADLINE_LINE;
use fulltime_soccer::config::Config;
use fulltime_soccer::data::DataSet;
use fulltime_soccer::domain::{OutcomeType, Side};
use fulltime_soccer::model::{MatchInput, Prediction, Predictor};
use fulltime_soccer::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the league data from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// league code, e.g., esp.1
    #[clap(short = 'l', long)]
    league: Option<String>,

    /// home team
    #[clap(long)]
    home: Option<String>,

    /// away team
    #[clap(long)]
    away: Option<String>,

    /// JSON file with engine parameters
    #[clap(long)]
    config: Option<PathBuf>,

    /// multiplier applied to the host's expected goals
    #[clap(long = "home-advantage")]
    home_advantage: Option<f64>,

    /// highest number of goals per side in the score grid
    #[clap(long = "max-goals")]
    max_goals: Option<u8>,

    /// bankroll to size stakes against
    #[clap(long)]
    bankroll: Option<f64>,

    /// fractional-Kelly multiplier
    #[clap(long)]
    kelly: Option<f64>,

    /// home win price, decimal or American
    #[clap(long = "price-home", allow_hyphen_values = true)]
    price_home: Option<String>,

    /// draw price, decimal or American
    #[clap(long = "price-draw", allow_hyphen_values = true)]
    price_draw: Option<String>,

    /// away win price, decimal or American
    #[clap(long = "price-away", allow_hyphen_values = true)]
    price_away: Option<String>,

    /// both-teams-to-score price, decimal or American
    #[clap(long = "price-btts", allow_hyphen_values = true)]
    price_btts: Option<String>,

    /// over 2.5 goals price, decimal or American
    #[clap(long = "price-over", allow_hyphen_values = true)]
    price_over: Option<String>,

    /// list leagues, teams and upcoming fixtures
    #[clap(long)]
    list: bool,

    /// write the prediction to a JSON file
    #[clap(long)]
    export: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.list && (self.league.is_none() || self.home.is_none() || self.away.is_none()) {
            bail!("the -l, --home and --away flags must be specified unless --list is set");
        }
        if let Some(max_goals) = self.max_goals {
            if max_goals == 0 {
                bail!("--max-goals must be positive");
            }
        }
        for (outcome, quote) in self.quotes() {
            if quote.decimal() <= MIN_DECIMAL {
                bail!("invalid price '{quote}' for {outcome:?}: expected a decimal above 1 or an American quote of at least 100");
            }
        }
        Ok(())
    }

    fn quotes(&self) -> Vec<(OutcomeType, &str)> {
        [
            (OutcomeType::Win(Side::Home), &self.price_home),
            (OutcomeType::Draw, &self.price_draw),
            (OutcomeType::Win(Side::Away), &self.price_away),
            (OutcomeType::BothScore, &self.price_btts),
            (OutcomeType::Over(HEADLINE_LINE), &self.price_over),
        ]
        .into_iter()
        .filter_map(|(outcome, quote)| quote.as_deref().map(|quote| (outcome, quote)))
        .collect()
    }

    fn prices(&self) -> Vec<(OutcomeType, f64)> {
        self.quotes()
            .into_iter()
            .map(|(outcome, quote)| (outcome, quote.decimal()))
            .collect()
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated: String,
    prediction: &'a Prediction,
    stakes: Vec<(OutcomeType, Stake)>,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let data = DataSet::read_json_file(&args.file)?;
    info!("loaded {} leagues and {} fixtures", data.leagues.len(), data.fixtures.len());

    if args.list {
        info!("Leagues:\n{}", Console::default().render(&print::tabulate_leagues(&data)));
        info!("Fixtures:\n{}", Console::default().render(&print::tabulate_fixtures(&data.fixtures)));
        if args.league.is_none() {
            return Ok(());
        }
    }

    let config = load_config(&args)?;
    let predictor = Predictor::from(config);
    let (Some(league), Some(home), Some(away)) = (&args.league, &args.home, &args.away) else {
        return Ok(());
    };
    let league = data.league(league)?;
    let input = MatchInput::lookup(league, home, away)?;
    let prediction = predictor.predict(&input);

    info!(
        "{} v {}: λ {} / {}, ρ {}, strength difference {}",
        prediction.home,
        prediction.away,
        Decimal(prediction.expected.home),
        Decimal(prediction.expected.away),
        prediction.rho.map(|rho| Decimal(rho).to_string()).unwrap_or_else(|| "-".into()),
        Decimal(prediction.advice.strength_difference)
    );
    info!("Markets:\n{}", Console::default().render(&print::tabulate_markets(&prediction)));
    if !prediction.top_scores.is_empty() {
        info!("Correct scores:\n{}", Console::default().render(&print::tabulate_scores(&prediction.top_scores)));
    }

    let advice = &prediction.advice;
    info!(
        "pick: {} ({}), confidence {}, both score: {}, goals: {}",
        advice.pick,
        Percent(advice.pick_probability),
        advice.confidence,
        advice.both_score,
        advice.goal_profile
    );
    if let Some(over) = &advice.over {
        info!("over {HEADLINE_LINE}.5: {over}");
    }
    let goal_difference = (input.home.goal_difference() - input.away.goal_difference()).round() as i64;
    info!("goal difference margin: {}", Signed(goal_difference));

    let stakes = prediction.stakes(&args.prices(), predictor.config());
    if !stakes.is_empty() {
        info!("Stakes:\n{}", Console::default().render(&print::tabulate_stakes(&stakes)));
    }

    if let Some(path) = &args.export {
        let report = Report {
            generated: Utc::now().to_rfc3339(),
            prediction: &prediction,
            stakes,
        };
        report.write_json_file(path)?;
        info!("exported to {}", path.display());
    }
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::read_json_file(path)?,
        None => Config::default(),
    };
    if let Some(home_advantage) = args.home_advantage {
        config.home_advantage = home_advantage;
    }
    if let Some(max_goals) = args.max_goals {
        config.max_goals = max_goals;
    }
    if let Some(bankroll) = args.bankroll {
        config.bankroll = bankroll;
    }
    if let Some(kelly) = args.kelly {
        config.kelly_multiplier = kelly;
    }
    debug!("config: {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let base = ["predict", "-f", "league.json", "-l", "esp.1", "--home", "A", "--away", "B"];
        Args::try_parse_from(base.iter().chain(args).copied()).unwrap()
    }

    #[test]
    fn accepts_decimal_and_american_prices() {
        let args = parse(&["--price-home", "2.10", "--price-away", "-120", "--price-btts", "+150"]);
        args.validate().unwrap();
        let prices = args.prices();
        assert_eq!(3, prices.len());
        assert_eq!((OutcomeType::Win(Side::Home), 2.1), prices[0]);
        assert_eq!(OutcomeType::Win(Side::Away), prices[1].0);
        assert_eq!((OutcomeType::BothScore, 2.5), prices[2]);
    }

    #[test]
    fn rejects_prices_without_a_payout() {
        for quote in ["evens", "1", "0.8", "-1.5", "+50"] {
            let args = parse(&["--price-home", quote]);
            assert!(args.validate().is_err(), "quote '{quote}' should be rejected");
        }
    }

    #[test]
    fn requires_a_fixture_unless_listing() {
        let args = Args::try_parse_from(["predict", "-f", "league.json"]).unwrap();
        assert!(args.validate().is_err());
        let args = Args::try_parse_from(["predict", "-f", "league.json", "--list"]).unwrap();
        args.validate().unwrap();
    }
}
