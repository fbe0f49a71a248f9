use anyhow::{anyhow, Result};
use log::info;
use shnn_analysis::{
    AnalysisConfig, AnalysisDataStructure, AnalysisResult, CyclicTuningCurve, ResultKind,
    StimulusCodec, StimulusRecord, TuningCurve,
};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional TOML config as first argument
    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::load_from_file(Path::new(&path))?,
        None => AnalysisConfig::default(),
    };
    let codec = StimulusCodec::new();

    // Synthetic orientation sweep: 8 orientations at two contrasts, 2 units
    let mut ids = Vec::new();
    let mut values = Vec::new();
    for contrast in [50u32, 100] {
        for step in 0..8 {
            let orientation = step as f64 * std::f64::consts::PI / 8.0;
            let record = StimulusRecord::new("FullfieldDriftingSinusoidalGrating")
                .with_parameter("contrast", contrast.to_string())
                .with_parameter("orientation", format!("{:.4}", orientation))
                .with_parameter("temporal_frequency", "2");
            ids.push(codec.encode(&record)?);

            let gain = contrast as f64 / 100.0;
            values.push(vec![
                gain * (1.0 + orientation.cos().powi(2)),
                gain * (1.0 + orientation.sin().powi(2)),
            ]);
        }
    }

    let curve = TuningCurve::new("V1_Exc", values, ids, 1)?.with_tags(["demo"]);
    let cyclic = CyclicTuningCurve::from_config(curve, &codec, &config)?;
    let result = AnalysisResult::from(cyclic);

    if !result.matches(ResultKind::TuningCurve, ["demo"]) {
        return Err(anyhow!("tagged result not found by kind/tag lookup"));
    }

    let curve = result
        .as_tuning_curve()
        .ok_or_else(|| anyhow!("expected a tuning curve"))?;
    let mut groups: Vec<_> = curve.group_by_parametrization(&codec)?.into_iter().collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, group) in &groups {
        info!(
            "{}: {} orientations x {} units, tags {:?}",
            key.render_with(&config),
            group.len(),
            group.num_units(),
            result.tags().iter().collect::<Vec<_>>()
        );
        let peak = group
            .values
            .column(0)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        info!("  unit 0 peak response {:.3}", peak);
    }

    println!("Tuning OK: {} parametrizations from {} stimuli", groups.len(), curve.len());
    Ok(())
}
