//! Study configuration resolved once at startup.

use crate::color::ToneSteps;
use crate::experiment::OrderPattern;

use super::platform;

/// URL query parameter selecting the order pattern (`?order=2`).
pub const ORDER_QUERY_PARAM: &str = "order";
/// Native fallback for the order selector.
pub const ORDER_ENV_VAR: &str = "CHROMALAB_ORDER";

#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    pub order_pattern: OrderPattern,
    pub tone_steps: ToneSteps,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            order_pattern: OrderPattern::default(),
            tone_steps: ToneSteps::default(),
        }
    }
}

impl StudyConfig {
    pub fn from_environment() -> Self {
        let raw = platform::query_param(ORDER_QUERY_PARAM)
            .or_else(|| std::env::var(ORDER_ENV_VAR).ok());
        Self {
            order_pattern: OrderPattern::from_selector(raw.as_deref()),
            ..Self::default()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    // One test owns the variable so parallel tests never race on it.
    #[test]
    fn order_selector_is_read_from_the_environment() {
        std::env::set_var(ORDER_ENV_VAR, "2");
        assert_eq!(StudyConfig::from_environment().order_pattern, OrderPattern::Two);

        std::env::set_var(ORDER_ENV_VAR, "7");
        assert_eq!(StudyConfig::from_environment().order_pattern, OrderPattern::One);

        std::env::set_var(ORDER_ENV_VAR, " 1 ");
        assert_eq!(StudyConfig::from_environment().order_pattern, OrderPattern::One);

        std::env::remove_var(ORDER_ENV_VAR);
        let config = StudyConfig::from_environment();
        assert_eq!(config, StudyConfig::default());
    }
}
