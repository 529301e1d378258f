use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CREATOR_PULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Named impression/reach heuristics. The defaults reproduce the
/// multipliers observed in production dashboards; treat them as
/// estimates, not measurements.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimationConfig {
    /// Impressions credited per video view.
    #[serde(default = "default_video_impression_factor")]
    pub video_impression_factor: f64,
    /// Share of an influencer's followers assumed to see a photo post.
    #[serde(default = "default_photo_engagement_share")]
    pub photo_engagement_share: f64,
    /// Unique-reach share of estimated impressions.
    #[serde(default = "default_reach_factor")]
    pub reach_factor: f64,
    /// Lower bound on reach as a share of impressions.
    #[serde(default = "default_reach_floor_factor")]
    pub reach_floor_factor: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How many of the most frequent words to keep in the aggregate.
    #[serde(default = "default_top_word_limit")]
    pub top_word_limit: usize,
    /// How many of the least frequent words to keep in the aggregate.
    #[serde(default = "default_rare_word_limit")]
    pub rare_word_limit: usize,
    /// Cap on generated insights per report.
    #[serde(default = "default_max_insights")]
    pub max_insights: usize,
    /// Positive-share delta between halves before a trend is called.
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,
}

// Default functions
fn default_video_impression_factor() -> f64 {
    1.3
}
fn default_photo_engagement_share() -> f64 {
    0.4
}
fn default_reach_factor() -> f64 {
    0.65
}
fn default_reach_floor_factor() -> f64 {
    0.5
}
fn default_top_word_limit() -> usize {
    30
}
fn default_rare_word_limit() -> usize {
    30
}
fn default_max_insights() -> usize {
    4
}
fn default_trend_threshold() -> f64 {
    0.05
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            video_impression_factor: default_video_impression_factor(),
            photo_engagement_share: default_photo_engagement_share(),
            reach_factor: default_reach_factor(),
            reach_floor_factor: default_reach_floor_factor(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_word_limit: default_top_word_limit(),
            rare_word_limit: default_rare_word_limit(),
            max_insights: default_max_insights(),
            trend_threshold: default_trend_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            estimation: EstimationConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CREATOR_PULSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_heuristics() {
        let cfg = AppConfig::default();
        assert!((cfg.estimation.video_impression_factor - 1.3).abs() < f64::EPSILON);
        assert!((cfg.estimation.photo_engagement_share - 0.4).abs() < f64::EPSILON);
        assert!((cfg.estimation.reach_factor - 0.65).abs() < f64::EPSILON);
        assert!((cfg.estimation.reach_floor_factor - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.engine.max_insights, 4);
    }
}
