use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{DeskError, Result};

/// desk-wide defaults applied to new deals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// default annual percentage rate offered on new deals
    pub default_rate: Rate,
    /// default term length in months
    pub default_term_months: u32,
    /// term lengths offered in the deal worksheet
    pub term_options: Vec<u32>,
    pub salesperson: String,
    pub finance_manager: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            default_rate: Rate::from_bps(490),
            default_term_months: 60,
            term_options: vec![36, 48, 60, 72],
            salesperson: "Current User".to_string(),
            finance_manager: "Jennifer Lopez".to_string(),
        }
    }
}

impl DeskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_rate.is_negative() {
            return Err(DeskError::InvalidConfiguration {
                message: format!("default rate must not be negative: {}", self.default_rate),
            });
        }
        if self.default_term_months == 0 {
            return Err(DeskError::InvalidConfiguration {
                message: "default term must be at least one month".to_string(),
            });
        }
        if self.term_options.iter().any(|&t| t == 0) {
            return Err(DeskError::InvalidConfiguration {
                message: "term options must be at least one month".to_string(),
            });
        }
        Ok(())
    }
}
