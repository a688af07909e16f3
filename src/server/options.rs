use clap::{ArgEnum, Parser};

use crate::gateway::SEMAPHORE_OTP_URL;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upstream {
    /// Semaphore's OTP API, authenticated with the configured key
    Semaphore,
    /// A self-hosted relay that holds its own credentials
    Relay,
}

impl Upstream {

    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Semaphore => "semaphore",
            Upstream::Relay => "relay",
        }
    }
}

/// Forwards OTP send requests to an SMS gateway.
#[derive(Clone, Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ServerOptions {
    /// A bind address. The default value is 0.0.0.0
    #[clap(short, long, env = "OTP_RELAY_BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,
    /// The port number that the server will listen to. The default value is 3000
    #[clap(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,
    /// Which gateway receives the OTP requests
    #[clap(short, long, arg_enum, env = "OTP_RELAY_UPSTREAM", default_value = "semaphore")]
    pub upstream: Upstream,
    /// Semaphore OTP endpoint
    #[clap(long, env = "OTP_RELAY_SEMAPHORE_URL", default_value = SEMAPHORE_OTP_URL)]
    pub semaphore_url: String,
    /// Self-hosted relay endpoint
    #[clap(long, env = "OTP_RELAY_URL", default_value = "http://localhost:3000/send-otp")]
    pub relay_url: String,
    /// Timeout for the outbound gateway call in seconds
    #[clap(short, long, env = "OTP_RELAY_TIMEOUT", default_value = "10")]
    pub timeout: u64,
    /// Reject requests without a message. Defaults to true for semaphore, false for relay
    #[clap(long, env = "OTP_RELAY_REQUIRE_MESSAGE")]
    pub require_message: Option<bool>,
    /// Name of the environment variable holding the gateway API key. It is read on every request.
    #[clap(long, env = "OTP_RELAY_API_KEY_VAR", default_value = "SEMAPHORE_API_KEY")]
    pub api_key_var: String,
}

impl ServerOptions {

    pub fn upstream_url(&self) -> &str {
        match self.upstream {
            Upstream::Semaphore => &self.semaphore_url,
            Upstream::Relay => &self.relay_url,
        }
    }

    pub fn require_message(&self) -> bool {
        self.require_message.unwrap_or(self.upstream == Upstream::Semaphore)
    }
}


pub fn parse_options() -> ServerOptions {
    Parser::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_semaphore() {
        let options = ServerOptions::try_parse_from(["otp-relay"]).unwrap();
        assert_eq!(options.upstream, Upstream::Semaphore);
        assert_eq!(options.upstream_url(), "https://api.semaphore.co/api/v4/otp");
        assert_eq!(options.timeout, 10);
        assert_eq!(options.api_key_var, "SEMAPHORE_API_KEY");
        assert!(options.require_message());
    }

    #[test]
    fn relay_does_not_require_message_by_default() {
        let options = ServerOptions::try_parse_from(
            ["otp-relay", "--upstream", "relay", "--relay-url", "http://relay.local:3000/send-otp"]).unwrap();
        assert_eq!(options.upstream_url(), "http://relay.local:3000/send-otp");
        assert!(!options.require_message());

        let options = ServerOptions::try_parse_from(
            ["otp-relay", "--upstream", "relay", "--require-message", "true"]).unwrap();
        assert!(options.require_message());
    }

    #[test]
    fn rejects_unknown_upstream() {
        assert!(ServerOptions::try_parse_from(["otp-relay", "--upstream", "twilio"]).is_err());
    }
}
