use fabwatch_core::{FabricSpec, Sample};
use serde_json::{json, Value};

/// Prompt asking for a short quality summary of the current production state.
pub fn efficiency_prompt(sample: &Sample, fabric: &FabricSpec, critical_percent: f64) -> String {
    format!(
        "Analyze the following production data from a fabric defect detection system.\n\
         \n\
         Parameters:\n\
         - Fabric GSM: {gsm}\n\
         - Fabric Width: {width} inches\n\
         \n\
         Current Metrics:\n\
         - Total Holes Detected: {holes}\n\
         - Sewing Lines Detected: {lines}\n\
         - Total Wastage: {kg:.3} kg\n\
         - Wastage Percentage: {pct:.2}%\n\
         \n\
         Provide a concise 3-sentence summary of the production quality.\n\
         Flag if the wastage percentage is critically high (assume > {critical_percent}% is critical).\n\
         Suggest one immediate action if defects are present.",
        gsm = fabric.gsm,
        width = fabric.width_in,
        holes = sample.hole_count(),
        lines = sample.sewing_line_count(),
        kg = sample.cumulative_wastage_kg(),
        pct = sample.wastage_percentage(),
    )
}

/// Prompt asking for a structured anomaly judgement.
pub fn anomaly_prompt(wastage_percent: f64) -> String {
    format!(
        "Current fabric wastage is {wastage_percent}%. Is this considered an anomaly \
         in standard textile manufacturing? Return JSON."
    )
}

/// Response schema for [`anomaly_prompt`].
pub fn anomaly_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isAnomaly": { "type": "BOOLEAN" },
            "reason":    { "type": "STRING" }
        },
        "required": ["isAnomaly", "reason"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fabwatch_core::WastageModel;

    #[test]
    fn efficiency_prompt_carries_all_inputs() {
        let sample = Sample::new(8, 2, 0.25, Utc::now(), &WastageModel::default());
        let prompt = efficiency_prompt(&sample, &FabricSpec::default(), 5.0);

        assert!(prompt.contains("Fabric GSM: 180\n"));
        assert!(prompt.contains("Fabric Width: 60 inches"));
        assert!(prompt.contains("Total Holes Detected: 8"));
        assert!(prompt.contains("Sewing Lines Detected: 2"));
        assert!(prompt.contains("Total Wastage: 0.250 kg"));
        assert!(prompt.contains("Wastage Percentage: 2.63%"));
        assert!(prompt.contains("> 5% is critical"));
    }

    #[test]
    fn anomaly_prompt_embeds_percentage() {
        let prompt = anomaly_prompt(6.5);
        assert!(prompt.starts_with("Current fabric wastage is 6.5%."));
        assert!(prompt.ends_with("Return JSON."));
    }
}
