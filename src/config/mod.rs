//! Client configuration.
//!
//! Agent processes are configured from the environment in deployment and
//! constructed directly in tests.

use crate::agent::AgentRole;
use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Default period between heartbeat messages, also used as the fixed delay
/// between reconnection attempts.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a single agent connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay endpoint URI
    pub uri: String,
    /// API key sent as a bearer credential
    pub api_key: String,
    /// Unique agent identifier
    pub agent_id: String,
    /// Role of the agent
    pub agent_type: AgentRole,
    /// Period between heartbeats and reconnection attempts
    pub heartbeat_interval: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default heartbeat interval.
    pub fn new(
        uri: impl Into<String>,
        api_key: impl Into<String>,
        agent_id: impl Into<String>,
        agent_type: AgentRole,
    ) -> Self {
        Self {
            uri: uri.into(),
            api_key: api_key.into(),
            agent_id: agent_id.into(),
            agent_type,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `AGENTLINK_URI`, `AGENTLINK_API_KEY`, `AGENT_ID` and
    /// `AGENT_TYPE`; all four are required and `AGENT_TYPE` must be a known
    /// role in snake_case form.
    pub fn from_env() -> Result<Self> {
        let uri = required_var("AGENTLINK_URI")?;
        let api_key = required_var("AGENTLINK_API_KEY")?;
        let agent_id = required_var("AGENT_ID")?;
        let agent_type = required_var("AGENT_TYPE")?.parse()?;

        Ok(Self {
            uri,
            api_key,
            agent_id,
            agent_type,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::validation(format!("{} is not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_interval() {
        let config = ClientConfig::new(
            "ws://localhost:3002/api/v1/ws",
            "mcp_agent_test_123",
            "test_agent_1",
            AgentRole::TechEnthusiast,
        );

        assert_eq!(config.heartbeat_interval, HEARTBEAT_INTERVAL);
        assert_eq!(config.agent_type, AgentRole::TechEnthusiast);
    }

    // Environment access is process-global, so both from_env paths live in
    // one test.
    #[test]
    fn test_from_env() {
        env::remove_var("AGENTLINK_URI");
        env::remove_var("AGENTLINK_API_KEY");
        env::remove_var("AGENT_ID");
        env::remove_var("AGENT_TYPE");
        assert!(ClientConfig::from_env().is_err());

        env::set_var("AGENTLINK_URI", "ws://localhost:3002/api/v1/ws");
        env::set_var("AGENTLINK_API_KEY", "mcp_agent_test_123");
        env::set_var("AGENT_ID", "budget_shopper_1");
        env::set_var("AGENT_TYPE", "budget_shopper");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.agent_id, "budget_shopper_1");
        assert_eq!(config.agent_type, AgentRole::BudgetShopper);

        env::set_var("AGENT_TYPE", "not_a_role");
        assert!(ClientConfig::from_env().is_err());

        env::remove_var("AGENTLINK_URI");
        env::remove_var("AGENTLINK_API_KEY");
        env::remove_var("AGENT_ID");
        env::remove_var("AGENT_TYPE");
    }
}
