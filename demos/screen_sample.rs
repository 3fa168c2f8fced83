//! Screen a canned patient sample end to end.
//!
//! Run with:
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example screen_sample -- healthy
//! ```
//!
//! Pass `healthy` or `ckd` (the default) to pick the sample.

use ckdscreen::logging::{LogLevel, init_logging};
use ckdscreen::{
    BoundsPolicy, GeminiClient, Page, Predictor, PredictorConfig, RangeStatus, Sample, Session,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info);

    let sample = match env::args().nth(1).as_deref() {
        Some("healthy") => Sample::Healthy,
        _ => Sample::CkdPositive,
    };

    let predictor = Predictor::with_config(GeminiClient::from_env()?, PredictorConfig::from_env());
    let mut session = Session::new(BoundsPolicy::from_env());
    session.new_prediction();
    session.load_sample(sample);

    let verdict = match session.submit(&predictor).await {
        Ok(verdict) => verdict,
        Err(e) => {
            eprintln!("{}", session.error().unwrap_or("Prediction failed"));
            return Err(e.into());
        }
    };

    let guidance = session.guidance().ok_or("no assessment")?;
    println!("{}", guidance.headline);
    println!(
        "Confidence {:.0}%  Risk {} ({:.0}/100)",
        verdict.confidence(),
        verdict.risk_level(),
        verdict.risk_score()
    );

    session.navigate(Page::Analysis);
    let analysis = session.analysis().ok_or("no assessment")?;

    println!("\n{}", guidance.findings_title);
    for line in analysis.clinical.lines() {
        println!("  - {}", line);
    }

    println!("\nOutside normal range ({}):", analysis.abnormal_count());
    for row in analysis
        .comparisons
        .iter()
        .filter(|c| c.status == RangeStatus::Abnormal)
    {
        println!("  {:<24} {:>8}   normal {}", row.label, row.value, row.range);
    }

    println!("\nRisk features: {}", analysis.risk_feature_lines().join(", "));
    println!("Protective features: {}", analysis.protective_feature_lines().join(", "));

    println!("\n{}", guidance.recommendations_title);
    for tip in guidance.recommendations {
        println!("  - {}", tip);
    }
    Ok(())
}
