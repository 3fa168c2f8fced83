#[cfg(test)]
mod error_tests {
    use ckdscreen::{CkdError, PREDICTION_FAILED_MESSAGE, PredictionError, Result, ValidationError};
    use serde_json::json;

    #[test]
    fn test_api_error() {
        let err = PredictionError::Api("Gemini API error (503): overloaded".to_string());
        assert_eq!(
            format!("{}", err),
            "API error: Gemini API error (503): overloaded"
        );
    }

    #[test]
    fn test_malformed_response_error() {
        let err = PredictionError::MalformedResponse("missing field `riskScore`".to_string());
        assert_eq!(
            format!("{}", err),
            "Malformed response: missing field `riskScore`"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_value::<String>(json!(42)).unwrap_err();
        let err: PredictionError = json_err.into();
        assert!(matches!(err, PredictionError::Json(_)));
        assert!(format!("{}", err).starts_with("JSON error:"));
    }

    #[test]
    fn test_every_prediction_error_has_same_user_message() {
        let errors = [
            PredictionError::Api("boom".to_string()),
            PredictionError::EmptyResponse,
            PredictionError::MalformedResponse("bad".to_string()),
            PredictionError::Timeout,
            PredictionError::Cancelled,
        ];
        for err in &errors {
            assert_eq!(err.user_message(), PREDICTION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = ValidationError::OutOfBounds {
            field: "bp".to_string(),
            value: 250.0,
            min: 40.0,
            max: 200.0,
        };
        assert_eq!(err.to_string(), "bp: 250 is outside the allowed range 40 - 200");
    }

    #[test]
    fn test_not_an_option_lists_allowed_values() {
        let err = ValidationError::NotAnOption {
            field: "htn".to_string(),
            value: "maybe".to_string(),
            allowed: vec!["yes".to_string(), "no".to_string()],
        };
        assert_eq!(err.to_string(), "htn: 'maybe' is not one of [yes, no]");
        assert_eq!(err.field(), "htn");
    }

    #[test]
    fn test_conversion_to_ckd_error() {
        let err: CkdError = ValidationError::MissingField {
            field: "age".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: age: value is required");

        let err: CkdError = PredictionError::Timeout.into();
        assert_eq!(err.to_string(), "Prediction error: Timeout error");
    }

    #[test]
    fn test_result_type() {
        fn pending() -> Result<()> {
            Err(CkdError::SubmissionPending)
        }
        assert_eq!(
            pending().unwrap_err().to_string(),
            "A prediction is already in progress"
        );
    }
}
