use serde::{Deserialize, Serialize};

/// Wire body of every data route: `{"SampleSize": n, "Data": [...]}`.
///
/// Reduced routes carry a single value in `Data`. A NaN reduction (empty
/// input) is written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SampleSet {
    /// Older upstreams send only `Data`.
    #[serde(default)]
    pub sample_size: usize,
    pub data: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::SampleSet;

    #[test]
    fn uses_pascal_case_fields() {
        let set = SampleSet {
            sample_size: 2,
            data: vec![0.25, 0.5],
        };
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"SampleSize":2,"Data":[0.25,0.5]}"#);
    }

    #[test]
    fn nan_serializes_as_null() {
        let set = SampleSet {
            sample_size: 0,
            data: vec![f64::NAN],
        };
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"SampleSize":0,"Data":[null]}"#);
    }

    #[test]
    fn decodes_body_without_sample_size() {
        let set: SampleSet = serde_json::from_str(r#"{"Data":[0.1,0.2]}"#).unwrap();
        assert_eq!(set.sample_size, 0);
        assert_eq!(set.data, vec![0.1, 0.2]);
    }

    #[test]
    fn rejects_body_without_data() {
        assert!(serde_json::from_str::<SampleSet>(r#"{"SampleSize":3}"#).is_err());
    }
}
