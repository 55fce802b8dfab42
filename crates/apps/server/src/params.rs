use serde::Deserialize;

use crate::error::ApiError;

/// Query string as received. Values stay strings so that parse failures are
/// reported with our own message instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RawQuery {
    pub sample_size: Option<String>,
    pub num_copy: Option<String>,
    pub response_time: Option<String>,
}

/// Per-route parsing rules.
#[derive(Debug, Copy, Clone)]
pub struct ParamRules {
    pub default_sample_size: usize,
    /// Whether `num_copy` is honored. Routes without tiling ignore it.
    pub tiling: bool,
    pub max_samples: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub sample_size: usize,
    pub num_copies: usize,
    pub response_delay_ms: u64,
}

impl RequestParameters {
    /// Validates every parameter before any work is done. A path segment wins
    /// over `?sample_size=`. Empty values count as absent.
    pub fn parse(
        path_sample_size: Option<&str>,
        query: &RawQuery,
        rules: ParamRules,
    ) -> Result<Self, ApiError> {
        let sample_size = match path_sample_size.or(present(&query.sample_size)) {
            Some(raw) => parse_count("sample_size", raw, 0)?,
            None => rules.default_sample_size,
        };

        let num_copies = match present(&query.num_copy) {
            Some(raw) if rules.tiling => parse_count("num_copy", raw, 1)?,
            _ => 1,
        };

        let response_delay_ms = match present(&query.response_time) {
            Some(raw) => parse_count("response_time", raw, 0)? as u64,
            None => 0,
        };

        let total = sample_size.checked_mul(num_copies).ok_or_else(|| {
            ApiError::invalid(
                "num_copy",
                &num_copies.to_string(),
                "sample_size * num_copy overflows",
            )
        })?;
        if total > rules.max_samples {
            return Err(ApiError::invalid(
                "sample_size",
                &sample_size.to_string(),
                format!(
                    "payload of {total} samples exceeds the limit of {}",
                    rules.max_samples
                ),
            ));
        }

        Ok(Self {
            sample_size,
            num_copies,
            response_delay_ms,
        })
    }

    /// The `SampleSize` reported for a raw payload.
    pub fn total_samples(&self) -> usize {
        self.sample_size * self.num_copies
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_count(name: &'static str, raw: &str, min: i64) -> Result<usize, ApiError> {
    let value: i64 = raw
        .parse()
        .map_err(|e| ApiError::invalid(name, raw, format!("not an integer ({e})")))?;
    if value < min {
        return Err(ApiError::invalid(name, raw, format!("must be at least {min}")));
    }
    usize::try_from(value).map_err(|_| ApiError::invalid(name, raw, "out of range"))
}

#[cfg(test)]
mod tests {
    use super::{ParamRules, RawQuery, RequestParameters};
    use crate::error::ApiError;

    const RULES: ParamRules = ParamRules {
        default_sample_size: 200,
        tiling: true,
        max_samples: 1_000,
    };

    fn query(sample_size: Option<&str>, num_copy: Option<&str>, response_time: Option<&str>) -> RawQuery {
        RawQuery {
            sample_size: sample_size.map(str::to_string),
            num_copy: num_copy.map(str::to_string),
            response_time: response_time.map(str::to_string),
        }
    }

    fn rejected_param(result: Result<RequestParameters, ApiError>) -> &'static str {
        match result {
            Err(ApiError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        let p = RequestParameters::parse(None, &RawQuery::default(), RULES).unwrap();
        assert_eq!(p.sample_size, 200);
        assert_eq!(p.num_copies, 1);
        assert_eq!(p.response_delay_ms, 0);
    }

    #[test]
    fn empty_values_count_as_absent() {
        let p = RequestParameters::parse(None, &query(Some(""), Some(""), Some("")), RULES).unwrap();
        assert_eq!(p.sample_size, 200);
        assert_eq!(p.num_copies, 1);
    }

    #[test]
    fn path_segment_wins_over_query() {
        let p = RequestParameters::parse(Some("7"), &query(Some("9"), None, None), RULES).unwrap();
        assert_eq!(p.sample_size, 7);
    }

    #[test]
    fn parses_all_parameters() {
        let p = RequestParameters::parse(None, &query(Some("5"), Some("3"), Some("50")), RULES)
            .unwrap();
        assert_eq!(p.sample_size, 5);
        assert_eq!(p.num_copies, 3);
        assert_eq!(p.response_delay_ms, 50);
        assert_eq!(p.total_samples(), 15);
    }

    #[test]
    fn zero_sample_size_is_valid() {
        let p = RequestParameters::parse(Some("0"), &RawQuery::default(), RULES).unwrap();
        assert_eq!(p.sample_size, 0);
    }

    #[test]
    fn rejects_non_integers() {
        let r = RequestParameters::parse(None, &query(Some("abc"), None, None), RULES);
        assert_eq!(rejected_param(r), "sample_size");
        let r = RequestParameters::parse(Some("1.5"), &RawQuery::default(), RULES);
        assert_eq!(rejected_param(r), "sample_size");
        let r = RequestParameters::parse(None, &query(None, None, Some("soon")), RULES);
        assert_eq!(rejected_param(r), "response_time");
    }

    #[test]
    fn rejects_out_of_range() {
        let r = RequestParameters::parse(Some("-1"), &RawQuery::default(), RULES);
        assert_eq!(rejected_param(r), "sample_size");
        let r = RequestParameters::parse(None, &query(None, Some("0"), None), RULES);
        assert_eq!(rejected_param(r), "num_copy");
        let r = RequestParameters::parse(None, &query(None, None, Some("-50")), RULES);
        assert_eq!(rejected_param(r), "response_time");
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        let r = RequestParameters::parse(None, &query(Some(" 5"), None, None), RULES);
        assert_eq!(rejected_param(r), "sample_size");
        let r = RequestParameters::parse(Some("5 "), &RawQuery::default(), RULES);
        assert_eq!(rejected_param(r), "sample_size");
        let r = RequestParameters::parse(None, &query(None, None, Some(" 50")), RULES);
        assert_eq!(rejected_param(r), "response_time");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn rejects_overflowing_payload() {
        let r = RequestParameters::parse(
            None,
            &query(Some("4611686018427387904"), Some("4"), None),
            RULES,
        );
        assert_eq!(rejected_param(r), "num_copy");
    }

    #[test]
    fn enforces_payload_limit() {
        assert!(RequestParameters::parse(Some("1000"), &RawQuery::default(), RULES).is_ok());
        let r = RequestParameters::parse(Some("500"), &query(None, Some("3"), None), RULES);
        assert_eq!(rejected_param(r), "sample_size");
    }

    #[test]
    fn num_copy_ignored_without_tiling() {
        let rules = ParamRules {
            tiling: false,
            ..RULES
        };
        let p = RequestParameters::parse(Some("4"), &query(None, Some("bogus"), None), rules)
            .unwrap();
        assert_eq!(p.num_copies, 1);
        assert_eq!(p.total_samples(), 4);
    }
}
