use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ccm_core::config::load_guidance_catalog;
use ccm_core::measurements::ranges;
use ccm_core::{
    AssessmentResult, AsthmaMeasurements, CardiovascularMeasurements, CareResult, Condition,
    CopdMeasurements, CoreConfig, DiabetesMeasurements, MeasurementSet, RiskTier, ScoringPolicy,
};

#[derive(Parser)]
#[command(name = "ccm")]
#[command(about = "Chronic care management risk assessment CLI")]
struct Cli {
    /// Scoring policy: threshold-rule or weighted-score (overrides CCM_SCORING_POLICY)
    #[arg(long, global = true)]
    policy: Option<ScoringPolicy>,
    /// Guidance catalog YAML file (overrides CCM_GUIDANCE_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess cardiovascular risk
    Cardiovascular {
        /// Age in years
        #[arg(long, value_parser = parse_age)]
        age: f64,
        /// Systolic blood pressure (mmHg)
        #[arg(long, value_parser = parse_systolic_bp)]
        systolic_bp: f64,
        /// Current smoker
        #[arg(long)]
        smoker: bool,
        /// Total cholesterol (mg/dL)
        #[arg(long, value_parser = parse_cholesterol)]
        cholesterol: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Assess diabetes risk
    Diabetes {
        #[arg(long, value_parser = parse_bmi)]
        bmi: f64,
        /// Age in years
        #[arg(long, value_parser = parse_age)]
        age: f64,
        /// Family history of diabetes
        #[arg(long)]
        family_history: bool,
        /// Fasting glucose (mg/dL)
        #[arg(long, value_parser = parse_fasting_glucose)]
        fasting_glucose: f64,
        /// HbA1c (%)
        #[arg(long, value_parser = parse_hba1c)]
        hba1c: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Assess COPD risk
    Copd {
        /// Years smoking
        #[arg(long, value_parser = parse_smoking_years)]
        smoking_years: f64,
        /// Age in years
        #[arg(long, value_parser = parse_age)]
        age: f64,
        /// FEV1 (% of predicted)
        #[arg(long, value_parser = parse_fev1)]
        fev1: f64,
        /// Exacerbations in the last year
        #[arg(long, value_parser = parse_exacerbations)]
        exacerbations_last_year: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Assess asthma risk
    Asthma {
        /// Days per week with symptoms
        #[arg(long, value_parser = parse_days_per_week)]
        frequency_of_symptoms: f64,
        /// Nights per week with symptoms
        #[arg(long, value_parser = parse_days_per_week)]
        nighttime_symptoms: f64,
        /// Days per week using a reliever inhaler
        #[arg(long, value_parser = parse_days_per_week)]
        inhaler_use: f64,
        /// FEV1 (% of predicted)
        #[arg(long, value_parser = parse_fev1)]
        fev1: f64,
        /// Eosinophil count (cells/µL)
        #[arg(long, value_parser = parse_eosinophil_count)]
        eosinophil_count: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render the unified care plan for completed assessments
    Plan {
        /// Completed assessment as <condition>=<tier>, e.g. copd=high (repeatable)
        #[arg(long = "assessment", value_parser = parse_assessment)]
        assessments: Vec<(Condition, RiskTier)>,
    },
    /// Render the multidisciplinary team plan for completed assessments
    TeamPlan {
        /// Completed assessment as <condition>=<tier>, e.g. copd=high (repeatable)
        #[arg(long = "assessment", value_parser = parse_assessment)]
        assessments: Vec<(Condition, RiskTier)>,
    },
    /// Validate a guidance catalog file
    CheckCatalog {
        /// Path to the catalog YAML
        path: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Also print the guidance for the resulting tier
    #[arg(long)]
    plan: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ccm=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = resolve_config(
        cli.policy,
        cli.catalog.clone(),
        std::env::var("CCM_SCORING_POLICY").ok(),
        std::env::var("CCM_GUIDANCE_CATALOG").ok(),
    )?;
    tracing::debug!(
        policy = %config.scoring_policy(),
        catalog = ?config.guidance_catalog(),
        "resolved configuration"
    );

    match cli.command {
        Some(Commands::Cardiovascular {
            age,
            systolic_bp,
            smoker,
            cholesterol,
            output,
        }) => {
            let set = MeasurementSet::Cardiovascular(CardiovascularMeasurements {
                age,
                systolic_bp,
                is_smoker: smoker,
                cholesterol,
            });
            assess(&config, &set, &output)?;
        }
        Some(Commands::Diabetes {
            bmi,
            age,
            family_history,
            fasting_glucose,
            hba1c,
            output,
        }) => {
            let set = MeasurementSet::Diabetes(DiabetesMeasurements {
                bmi,
                age,
                family_history,
                fasting_glucose,
                hba1c,
            });
            assess(&config, &set, &output)?;
        }
        Some(Commands::Copd {
            smoking_years,
            age,
            fev1,
            exacerbations_last_year,
            output,
        }) => {
            let set = MeasurementSet::Copd(CopdMeasurements {
                smoking_years,
                age,
                fev1,
                exacerbations_last_year,
            });
            assess(&config, &set, &output)?;
        }
        Some(Commands::Asthma {
            frequency_of_symptoms,
            nighttime_symptoms,
            inhaler_use,
            fev1,
            eosinophil_count,
            output,
        }) => {
            let set = MeasurementSet::Asthma(AsthmaMeasurements {
                frequency_of_symptoms,
                nighttime_symptoms,
                inhaler_use,
                fev1,
                eosinophil_count,
            });
            assess(&config, &set, &output)?;
        }
        Some(Commands::Plan { assessments }) => {
            let assessment: AssessmentResult = assessments.into_iter().collect();
            println!("{}", config.resolver()?.render_combined(&assessment)?);
        }
        Some(Commands::TeamPlan { assessments }) => {
            let assessment: AssessmentResult = assessments.into_iter().collect();
            println!("{}", config.resolver()?.render_team_plan(&assessment)?);
        }
        Some(Commands::CheckCatalog { path }) => {
            let catalog = load_guidance_catalog(Some(&path))?;
            println!(
                "Catalog OK: {} entries in {}",
                catalog.len(),
                path.display()
            );
        }
        None => {
            println!("Use 'ccm --help' for commands");
        }
    }

    Ok(())
}

/// Merge command-line flags over `CCM_*` environment values. Flags win when given.
fn resolve_config(
    policy_flag: Option<ScoringPolicy>,
    catalog_flag: Option<PathBuf>,
    policy_env: Option<String>,
    catalog_env: Option<String>,
) -> CareResult<CoreConfig> {
    let from_env = CoreConfig::from_env_values(
        if policy_flag.is_some() { None } else { policy_env },
        catalog_env,
    )?;
    Ok(CoreConfig::new(
        policy_flag.unwrap_or(from_env.scoring_policy()),
        catalog_flag.or_else(|| from_env.guidance_catalog().map(PathBuf::from)),
    ))
}

fn assess(config: &CoreConfig, set: &MeasurementSet, output: &OutputArgs) -> anyhow::Result<()> {
    let (condition, tier) = config.classifier().classify(set);

    if output.json {
        let value = serde_json::json!({
            "condition": condition,
            "tier": tier,
            "policy": config.scoring_policy(),
            "weighted_score": set.weighted_score(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{condition} Risk Level: {tier}");
    }

    if output.plan {
        let resolver = config.resolver()?;
        println!("\n{}", resolver.render_entry(condition, tier)?);
    }

    Ok(())
}

fn parse_bounded(value: &str, range: &RangeInclusive<f64>) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !range.contains(&parsed) {
        return Err(format!(
            "{parsed} is outside the accepted range {}..={}",
            range.start(),
            range.end()
        ));
    }
    Ok(parsed)
}

fn parse_age(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::AGE)
}

fn parse_systolic_bp(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::SYSTOLIC_BP)
}

fn parse_cholesterol(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::CHOLESTEROL)
}

fn parse_bmi(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::BMI)
}

fn parse_fasting_glucose(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::FASTING_GLUCOSE)
}

fn parse_hba1c(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::HBA1C)
}

fn parse_smoking_years(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::SMOKING_YEARS)
}

fn parse_fev1(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::FEV1)
}

fn parse_exacerbations(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::EXACERBATIONS_LAST_YEAR)
}

fn parse_days_per_week(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::DAYS_PER_WEEK)
}

fn parse_eosinophil_count(s: &str) -> Result<f64, String> {
    parse_bounded(s, &ranges::EOSINOPHIL_COUNT)
}

fn parse_assessment(s: &str) -> Result<(Condition, RiskTier), String> {
    let (condition, tier) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <condition>=<tier>, got '{s}'"))?;
    let condition = condition.parse::<Condition>().map_err(|e| e.to_string())?;
    let tier = tier.parse::<RiskTier>().map_err(|e| e.to_string())?;
    Ok((condition, tier))
}
