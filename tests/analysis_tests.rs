//! Tests for the derived analysis on the canned samples and threshold edges.

#[cfg(test)]
mod analysis_tests {
    use ckdscreen::{
        Attribute, BoundsPolicy, ClinicalRiskFactor, ClinicalSummary, DomainSchema, Outcome,
        PatientRecord, PredictionVerdict, RangeStatus, RiskLevel, Sample, analyze, guidance,
        validate_form,
    };
    use ckdscreen::analysis::{
        HEALTHY_STATUS_MESSAGE, MODERATE_CONTRIBUTION_MESSAGE, NO_CONTRIBUTING_FACTORS_MESSAGE,
        NO_PROMINENT_FACTORS_MESSAGE, NO_PROTECTIVE_FACTORS_MESSAGE, PROTECTIVE_DISPLAY_LIMIT,
        clinical_risk_factors,
    };

    fn record(sample: Sample, overrides: &[(&str, &str)]) -> PatientRecord {
        let mut form = sample.to_form();
        for (key, value) in overrides {
            form.insert(key.to_string(), value.to_string());
        }
        validate_form(&form, &DomainSchema::standard(), BoundsPolicy::Strict)
            .expect("form should validate")
    }

    fn detected() -> PredictionVerdict {
        PredictionVerdict::new(Outcome::Detected, 94.0, RiskLevel::High, 88.0)
    }

    fn not_detected() -> PredictionVerdict {
        PredictionVerdict::new(Outcome::NotDetected, 91.0, RiskLevel::Low, 9.0)
    }

    #[test]
    fn test_ckd_sample_fires_every_heuristic() {
        let record = record(Sample::CkdPositive, &[]);
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());

        assert_eq!(
            analysis.clinical,
            ClinicalSummary::RiskFactors(ClinicalRiskFactor::ALL.to_vec())
        );
        assert_eq!(
            analysis.clinical.lines(),
            vec![
                "Elevated Serum Creatinine",
                "High Blood Urea",
                "Low Hemoglobin",
                "Hypertension Present",
                "Diabetes Mellitus Present",
                "Albumin in Urine",
            ]
        );
    }

    #[test]
    fn test_ckd_sample_feature_partition() {
        let record = record(Sample::CkdPositive, &[]);
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());

        assert_eq!(
            analysis.features.risk,
            vec![
                "Serum Creatinine",
                "Blood Urea",
                "Hemoglobin",
                "Blood Pressure",
                "Hypertension",
                "Albumin",
                "Anemia",
            ]
        );
        assert!(analysis.features.protective.is_empty());
        assert_eq!(analysis.displayed_risk_features(), analysis.features.risk.as_slice());
        assert_eq!(analysis.abnormal_count(), 17);
    }

    #[test]
    fn test_healthy_sample_partition_caps_protective() {
        let record = record(Sample::Healthy, &[]);
        let analysis = analyze(&record, &not_detected(), &DomainSchema::standard());

        assert_eq!(analysis.features.risk, vec!["Blood Urea"]);
        assert_eq!(analysis.features.protective.len(), PROTECTIVE_DISPLAY_LIMIT);
        assert_eq!(
            analysis.features.protective,
            vec![
                "Serum Creatinine",
                "Hemoglobin",
                "Blood Pressure",
                "Hypertension",
                "Albumin",
            ]
        );
    }

    #[test]
    fn test_features_never_in_both_lists() {
        for sample in [Sample::Healthy, Sample::CkdPositive] {
            let analysis = analyze(&record(sample, &[]), &detected(), &DomainSchema::standard());
            for name in &analysis.features.protective {
                assert!(!analysis.features.risk.contains(name), "{} in both lists", name);
            }
            for skipped in ["Age", "Diabetes", "RBC Abnormal"] {
                assert!(!analysis.features.risk.contains(&skipped));
                assert!(!analysis.features.protective.contains(&skipped));
            }
        }
    }

    #[test]
    fn test_negative_outcome_shows_healthy_status() {
        let record = record(Sample::CkdPositive, &[]);
        let analysis = analyze(&record, &not_detected(), &DomainSchema::standard());

        assert_eq!(analysis.clinical, ClinicalSummary::Healthy);
        assert_eq!(analysis.clinical.lines(), vec![HEALTHY_STATUS_MESSAGE]);
        assert!(!analysis.features.risk.is_empty());
        assert!(analysis.displayed_risk_features().is_empty());
    }

    #[test]
    fn test_detected_without_heuristics() {
        let record = record(Sample::Healthy, &[]);
        assert!(clinical_risk_factors(&record).is_empty());

        let analysis = analyze(&record, &detected(), &DomainSchema::standard());
        assert_eq!(analysis.clinical, ClinicalSummary::NoProminentFactors);
        assert_eq!(analysis.clinical.lines(), vec![NO_PROMINENT_FACTORS_MESSAGE]);
    }

    #[test]
    fn test_heuristic_thresholds_are_strict() {
        let at_threshold = record(
            Sample::Healthy,
            &[("sc", "1.4"), ("bu", "50"), ("hemo", "12")],
        );
        assert!(clinical_risk_factors(&at_threshold).is_empty());

        let past_threshold = record(
            Sample::Healthy,
            &[("sc", "1.5"), ("bu", "51"), ("hemo", "11.9")],
        );
        assert_eq!(
            clinical_risk_factors(&past_threshold),
            vec![
                ClinicalRiskFactor::ElevatedCreatinine,
                ClinicalRiskFactor::HighUrea,
                ClinicalRiskFactor::LowHemoglobin,
            ]
        );
    }

    #[test]
    fn test_heuristics_and_ranges_can_disagree() {
        // Urea of 32 is outside 7 - 20 but below the heuristic threshold.
        let record = record(Sample::Healthy, &[]);
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());
        assert!(analysis.features.risk.contains(&"Blood Urea"));
        assert!(!clinical_risk_factors(&record).contains(&ClinicalRiskFactor::HighUrea));
    }

    #[test]
    fn test_range_comparison_table() {
        let record = record(Sample::Healthy, &[("htn", "YES")]);
        let analysis = analyze(&record, &not_detected(), &DomainSchema::standard());

        assert_eq!(analysis.comparisons.len(), Attribute::COUNT);

        let age = &analysis.comparisons[Attribute::Age.index()];
        assert_eq!(age.status, RangeStatus::NotApplicable);
        assert_eq!(age.range, "N/A");

        let bp = &analysis.comparisons[Attribute::Bp.index()];
        assert_eq!(bp.label, "Blood Pressure");
        assert_eq!(bp.value, "70");
        assert_eq!(bp.range, "60 - 80");
        assert_eq!(bp.status, RangeStatus::Normal);

        let htn = &analysis.comparisons[Attribute::Htn.index()];
        assert_eq!(htn.value, "yes");
        assert_eq!(htn.range, "no - no");
        assert_eq!(htn.status, RangeStatus::Abnormal);

        let pcc = &analysis.comparisons[Attribute::Pcc.index()];
        assert_eq!(pcc.range, "notpresent - notpresent");

        let sg = &analysis.comparisons[Attribute::Sg.index()];
        assert_eq!(sg.value, "1.020");
        assert_eq!(sg.range, "1.010 - 1.025");
        assert_eq!(sg.status, RangeStatus::Normal);

        assert_eq!(analysis.abnormal_count(), 2);
    }

    #[test]
    fn test_feature_lines_list_names() {
        let record = record(Sample::CkdPositive, &[]);
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());
        assert_eq!(analysis.risk_feature_lines(), analysis.features.risk);
    }

    #[test]
    fn test_detected_without_abnormal_features() {
        let record = record(
            Sample::Healthy,
            &[("bu", "15"), ("htn", "no"), ("al", "0")],
        );
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());
        assert!(analysis.features.risk.is_empty());
        assert_eq!(
            analysis.risk_feature_lines(),
            vec![MODERATE_CONTRIBUTION_MESSAGE]
        );
    }

    #[test]
    fn test_not_detected_hides_contributing_features() {
        let record = record(Sample::Healthy, &[]);
        let analysis = analyze(&record, &not_detected(), &DomainSchema::standard());
        assert_eq!(analysis.features.risk, vec!["Blood Urea"]);
        assert_eq!(
            analysis.risk_feature_lines(),
            vec![NO_CONTRIBUTING_FACTORS_MESSAGE]
        );
    }

    #[test]
    fn test_no_protective_features_message() {
        let record = record(Sample::CkdPositive, &[]);
        let analysis = analyze(&record, &detected(), &DomainSchema::standard());
        assert!(analysis.features.protective.is_empty());
        assert_eq!(
            analysis.protective_feature_lines(),
            vec![NO_PROTECTIVE_FACTORS_MESSAGE]
        );

        let healthy = analyze(
            &self::record(Sample::Healthy, &[]),
            &not_detected(),
            &DomainSchema::standard(),
        );
        assert_eq!(healthy.protective_feature_lines(), healthy.features.protective);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let record = record(Sample::CkdPositive, &[]);
        let schema = DomainSchema::standard();
        assert_eq!(
            analyze(&record, &detected(), &schema),
            analyze(&record, &detected(), &schema)
        );
    }

    #[test]
    fn test_guidance_follows_outcome() {
        assert_eq!(guidance(Outcome::Detected).headline, "CKD DETECTED");
        assert_eq!(guidance(Outcome::NotDetected).headline, "NO CKD DETECTED");
        assert_eq!(
            guidance(Outcome::NotDetected).recommendations_title,
            "Healthy Lifestyle Tips"
        );
    }
}
