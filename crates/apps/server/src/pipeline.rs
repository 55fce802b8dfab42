use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use sampling::{latency, Reduction};
use tracing::debug;

use crate::error::ApiError;
use crate::params::{ParamRules, RawQuery, RequestParameters};
use crate::payload::SampleSet;
use crate::AppState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Source {
    /// Samples drawn in-process.
    Local,
    /// Samples fetched from the configured upstream.
    Upstream,
}

/// One request path: validate, generate or fetch, reduce, serialize, delay.
#[derive(Debug, Copy, Clone)]
pub struct Pipeline {
    pub default_sample_size: usize,
    pub reduction: Reduction,
    pub source: Source,
    pub tiling: bool,
}

impl Pipeline {
    pub const RAW_DS: Pipeline = Pipeline {
        default_sample_size: 200,
        reduction: Reduction::None,
        source: Source::Local,
        tiling: true,
    };

    pub const RAW_GEN: Pipeline = Pipeline {
        default_sample_size: 100,
        ..Self::RAW_DS
    };

    pub const AGGREGATE: Pipeline = Pipeline {
        default_sample_size: 100,
        reduction: Reduction::Median,
        source: Source::Local,
        tiling: false,
    };

    pub const FETCH: Pipeline = Pipeline {
        default_sample_size: 100,
        reduction: Reduction::Mean,
        source: Source::Upstream,
        tiling: false,
    };

    pub async fn run(
        self,
        state: &AppState,
        path_sample_size: Option<&str>,
        query: &RawQuery,
    ) -> Result<Response, ApiError> {
        let rules = ParamRules {
            default_sample_size: self.default_sample_size,
            tiling: self.tiling,
            max_samples: state.max_samples,
        };
        let params = RequestParameters::parse(path_sample_size, query, rules)?;

        let data = match self.source {
            Source::Local => state
                .seeds
                .generator()
                .generate(params.sample_size, params.num_copies),
            Source::Upstream => state.upstream.fetch(params.sample_size).await?.data,
        };

        let data = self.reduction.apply(data);
        let body = serde_json::to_vec(&SampleSet {
            sample_size: params.total_samples(),
            data,
        })?;
        debug!(
            "{} samples reduced by {}, {} bytes",
            params.total_samples(),
            self.reduction.name(),
            body.len()
        );

        latency::delay(params.response_delay_ms).await;

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok((StatusCode::OK, headers, Body::from(body)).into_response())
    }
}
