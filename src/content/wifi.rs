//! Wi-Fi join payload (`WIFI:` convention).
//!
//! Wire format, byte-exact:
//!
//! ```text
//! WIFI:T:WPA;S:{ssid};P:{password};H:{hidden};;
//! ```
//!
//! Fields are interpolated verbatim by default, so an SSID containing `;`
//! produces a payload strict scanners will misparse. [`WifiEscaping::Strict`]
//! opts into backslash escaping at the cost of differing from codes that
//! were generated verbatim.

use serde::{Deserialize, Serialize};

/// How special characters in SSID/password are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WifiEscaping {
    /// Insert fields as typed.
    #[default]
    Verbatim,
    /// Backslash-escape `\ ; , : "`.
    Strict,
}

/// Build the Wi-Fi payload string.
pub fn wifi_payload(ssid: &str, password: &str, hidden: bool, escaping: WifiEscaping) -> String {
    let (ssid, password) = match escaping {
        WifiEscaping::Verbatim => (ssid.to_string(), password.to_string()),
        WifiEscaping::Strict => (escape_field(ssid), escape_field(password)),
    };
    format!("WIFI:T:WPA;S:{ssid};P:{password};H:{hidden};;")
}

fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' | ';' | ',' | ':' | '"' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
