//! Connection settings.

use std::time::Duration;

use clap::Args;
use insim_proto::{
    ProtoError,
    constants::{DEFAULT_INSIM_VERSION, DEFAULT_TCP_PORT},
    packets::{Isi, IsiFlags},
};

/// How to reach an InSim host and what to ask of it.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Host name or address of the InSim host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// TCP port of the InSim host
    #[arg(short, long, default_value_t = DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Local UDP port for high-frequency packets (none when omitted)
    #[arg(long)]
    pub udp_port: Option<u16>,

    /// Program name shown by the host (max 16 bytes)
    #[arg(long, default_value = "insim-rs")]
    pub product: String,

    /// Admin password (max 16 bytes)
    #[arg(long, default_value = "", hide_default_value = true)]
    pub password: String,

    /// Special host message prefix character
    #[arg(long, value_parser = parse_prefix)]
    pub prefix: Option<u8>,

    /// Init flags, e.g. `LOCAL | MCI` or `0x24`
    #[arg(long, value_parser = parse_flags, default_value = "0x0")]
    pub flags: IsiFlags,

    /// Milliseconds between node/lap or multi car packets (0 for none)
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u16,

    /// Protocol version to request
    #[arg(long, default_value_t = DEFAULT_INSIM_VERSION)]
    pub insim_version: u8,

    /// Wait for the host's version reply during connect
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub request_version: bool,

    /// Seconds a blocked receive waits before re-checking for shutdown
    #[arg(long, value_parser = parse_secs, default_value = "5")]
    pub poll_timeout: Duration,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_TCP_PORT,
            udp_port: None,
            product: "insim-rs".to_owned(),
            password: String::new(),
            prefix: None,
            flags: IsiFlags::empty(),
            interval_ms: 0,
            insim_version: DEFAULT_INSIM_VERSION,
            request_version: true,
            poll_timeout: Duration::from_secs(5),
        }
    }
}

impl ConnectConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_udp_port(mut self, port: u16) -> Self {
        self.udp_port = Some(port);
        self
    }

    pub fn with_product(mut self, name: impl Into<String>) -> Self {
        self.product = name.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_prefix(mut self, prefix: u8) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_flags(mut self, flags: IsiFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u16) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_insim_version(mut self, version: u8) -> Self {
        self.insim_version = version;
        self
    }

    pub fn with_request_version(mut self, yes: bool) -> Self {
        self.request_version = yes;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Builds the init packet, failing on an oversized name or password.
    pub fn init_packet(&self) -> Result<Isi, ProtoError> {
        let mut isi = Isi::new(&self.product, &self.password)?.request_version(self.request_version);
        isi.udp_port = self.udp_port.unwrap_or(0);
        isi.flags = self.flags;
        isi.insim_version = self.insim_version;
        isi.prefix = self.prefix.unwrap_or(0);
        isi.interval_ms = self.interval_ms;
        Ok(isi)
    }
}

fn parse_prefix(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii_graphic() => Ok(*b),
        _ => Err(format!("prefix must be one printable ASCII character, got {s:?}")),
    }
}

fn parse_flags(s: &str) -> Result<IsiFlags, String> {
    bitflags::parser::from_str(s).map_err(|e| e.to_string())
}

fn parse_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{e}"))?;
    let timeout = Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())?;
    if timeout.is_zero() {
        return Err("poll timeout must be greater than zero".to_owned());
    }
    Ok(timeout)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        connect: ConnectConfig,
    }

    #[test]
    fn cli_defaults_match_default() {
        let cli = Cli::try_parse_from(["insim"]).unwrap();
        assert_eq!(cli.connect, ConnectConfig::default());
    }

    #[test]
    fn cli_parses_flags_prefix_and_timeout() {
        let cli = Cli::try_parse_from([
            "insim",
            "--host",
            "10.0.0.2",
            "-p",
            "30000",
            "--udp-port",
            "30001",
            "--prefix",
            "!",
            "--flags",
            "LOCAL | MCI",
            "--poll-timeout",
            "0.25",
            "--request-version",
            "false",
        ])
        .unwrap();
        let c = cli.connect;
        assert_eq!(c.host, "10.0.0.2");
        assert_eq!(c.port, 30000);
        assert_eq!(c.udp_port, Some(30001));
        assert_eq!(c.prefix, Some(b'!'));
        assert_eq!(c.flags, IsiFlags::LOCAL | IsiFlags::MCI);
        assert_eq!(c.poll_timeout, Duration::from_millis(250));
        assert!(!c.request_version);
    }

    #[test]
    fn cli_rejects_zero_poll_timeout() {
        let err = Cli::try_parse_from(["insim", "--poll-timeout", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert!(Cli::try_parse_from(["insim", "--poll-timeout", "0.0"]).is_err());
        assert!(Cli::try_parse_from(["insim", "--poll-timeout", "-1"]).is_err());
    }

    #[test]
    fn cli_rejects_long_prefix() {
        assert!(Cli::try_parse_from(["insim", "--prefix", "ab"]).is_err());
    }

    #[test]
    fn init_packet_carries_settings() {
        let isi = ConnectConfig::new("host", 1)
            .with_udp_port(4000)
            .with_prefix(b'@')
            .with_flags(IsiFlags::NLP)
            .with_interval_ms(100)
            .with_insim_version(8)
            .with_request_version(false)
            .init_packet()
            .unwrap();
        assert_eq!(isi.udp_port, 4000);
        assert_eq!(isi.prefix, b'@');
        assert_eq!(isi.flags, IsiFlags::NLP);
        assert_eq!(isi.interval_ms, 100);
        assert_eq!(isi.insim_version, 8);
        assert_eq!(isi.req_i, 0);
        assert_eq!(isi.name(), "insim-rs");
    }

    #[test]
    fn init_packet_rejects_long_password() {
        let err = ConnectConfig::default()
            .with_password("p".repeat(17))
            .init_packet()
            .unwrap_err();
        assert!(matches!(err, ProtoError::FieldTooLong { len: 17, .. }));
    }
}
