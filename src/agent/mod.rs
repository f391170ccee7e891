//! Agent identity types.
//!
//! Agent roles are an explicit enum rather than free-form display names, so
//! dispatch and wire attribution never depend on substring matching.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a persona agent plays during marketplace exploration.
///
/// The snake_case form of the role travels on the wire as `agent_type` and
/// in the `X-Agent-Type` header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Explores electronics with a focus on specs and tech trends
    TechEnthusiast,
    /// Hunts deals and compares prices across sellers
    BudgetShopper,
    /// Evaluates gift categories and delivery services
    GiftBuyer,
    /// Surveys marketplace-wide categories and statistics
    MarketContext,
    /// Coordinates exploration and synthesizes multi-agent feedback
    Communication,
    /// Curates feedback into departmental recommendations
    CompanyAnalysis,
    /// Monitors the other agents for anomalies
    Oversight,
}

impl AgentRole {
    /// Returns the snake_case wire form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::TechEnthusiast => "tech_enthusiast",
            AgentRole::BudgetShopper => "budget_shopper",
            AgentRole::GiftBuyer => "gift_buyer",
            AgentRole::MarketContext => "market_context",
            AgentRole::Communication => "communication",
            AgentRole::CompanyAnalysis => "company_analysis",
            AgentRole::Oversight => "oversight",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tech_enthusiast" => Ok(AgentRole::TechEnthusiast),
            "budget_shopper" => Ok(AgentRole::BudgetShopper),
            "gift_buyer" => Ok(AgentRole::GiftBuyer),
            "market_context" => Ok(AgentRole::MarketContext),
            "communication" => Ok(AgentRole::Communication),
            "company_analysis" => Ok(AgentRole::CompanyAnalysis),
            "oversight" => Ok(AgentRole::Oversight),
            other => Err(Error::validation(format!("unknown agent role: {}", other))),
        }
    }
}
