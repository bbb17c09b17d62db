//! The demo's schema type: a small server endpoint description.

use leafconf::{codec, Deserializable, Format, FormatError, Observers, Serializable, Subject};
use serde::{Deserialize, Serialize};

/// Settings persisted to `demo.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    pub test: u32,
    pub ip_address: IpAddress,
    #[serde(skip)]
    observers: Observers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpAddress {
    pub ip: String,
    pub port: u16,
    pub sock_mode: SockMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SockMode {
    pub tcp: bool,
    pub udp: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            test: 0,
            ip_address: IpAddress {
                ip: "127.0.0.1".to_string(),
                port: 25565,
                sock_mode: SockMode {
                    tcp: true,
                    udp: false,
                },
            },
            observers: Observers::default(),
        }
    }
}

impl Serializable for DemoSettings {
    fn serialize_as(&self, format: Format) -> Result<String, FormatError> {
        codec::encode(self, format)
    }
}

impl Deserializable for DemoSettings {
    fn deserialize_from(&mut self, text: &str, format: Format) -> Result<(), FormatError> {
        codec::decode_into(self, text, format)
    }

    fn validate(&self) -> Result<(), String> {
        let mode = &self.ip_address.sock_mode;
        if !mode.tcp && !mode.udp {
            return Err("at least one of tcp/udp must be enabled".to_string());
        }
        if self.ip_address.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Subject for DemoSettings {
    fn observers(&self) -> &Observers {
        &self.observers
    }

    fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}
